//! Prometheus metrics for form-assistant-service.
//!
//! Metrics go through the `metrics` facade; without an installed recorder
//! (tests) every call is a no-op.

use metrics::{counter, histogram};
use metrics_exporter_prometheus::{BuildError, PrometheusBuilder, PrometheusHandle};
use std::time::Duration;

/// Install the global Prometheus recorder. Must be called once at startup.
pub fn init_metrics() -> Result<PrometheusHandle, BuildError> {
    PrometheusBuilder::new().install_recorder()
}

/// Count a finished assistant request by prompt and outcome.
pub fn record_request(prompt: &'static str, outcome: &'static str) {
    counter!(
        "form_assistant_requests_total",
        "prompt" => prompt,
        "outcome" => outcome
    )
    .increment(1);
}

pub fn record_llm_call(provider: &'static str, status: &'static str, elapsed: Duration) {
    histogram!(
        "form_assistant_llm_duration_seconds",
        "provider" => provider,
        "status" => status
    )
    .record(elapsed.as_secs_f64());
}

pub fn record_tokens(provider: &'static str, input: u32, output: u32) {
    counter!(
        "form_assistant_llm_tokens_total",
        "provider" => provider,
        "type" => "input"
    )
    .increment(u64::from(input));
    counter!(
        "form_assistant_llm_tokens_total",
        "provider" => provider,
        "type" => "output"
    )
    .increment(u64::from(output));
}
