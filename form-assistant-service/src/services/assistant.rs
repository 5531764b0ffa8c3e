use std::sync::Arc;
use std::time::Instant;

use crate::config::LlmConfig;
use crate::error::FormAssistantError;
use crate::prompts::FormPrompt;
use crate::services::form_schema::{parse_form_schema, FormSchema};
use crate::services::metrics;
use crate::services::providers::{ChatMessage, ChatProvider, GenerationParams};

/// Turns a form description into a validated schema with one LLM call.
#[derive(Clone)]
pub struct FormAssistant {
    provider: Arc<dyn ChatProvider>,
    params: GenerationParams,
}

impl FormAssistant {
    pub fn new(provider: Arc<dyn ChatProvider>, llm: &LlmConfig) -> Self {
        Self {
            provider,
            params: GenerationParams {
                temperature: Some(llm.temperature),
                max_tokens: Some(llm.max_tokens),
            },
        }
    }

    pub fn messages(prompt: FormPrompt, description: &str) -> Vec<ChatMessage> {
        vec![
            ChatMessage::system(prompt.system_prompt()),
            ChatMessage::user(FormPrompt::user_message(description)),
        ]
    }

    pub async fn generate(
        &self,
        prompt: FormPrompt,
        description: &str,
    ) -> Result<FormSchema, FormAssistantError> {
        let messages = Self::messages(prompt, description);
        let provider = self.provider.name();

        let started = Instant::now();
        let result = self.provider.complete(&messages, &self.params).await;
        let elapsed = started.elapsed();

        let response = match result {
            Ok(response) => {
                metrics::record_llm_call(provider, "ok", elapsed);
                response
            }
            Err(e) => {
                metrics::record_llm_call(provider, e.kind(), elapsed);
                return Err(e.into());
            }
        };

        metrics::record_tokens(provider, response.input_tokens, response.output_tokens);

        tracing::info!(
            prompt = prompt.as_str(),
            provider,
            finish_reason = ?response.finish_reason,
            elapsed_ms = elapsed.as_millis() as u64,
            raw = %response.text,
            "LLM completion received"
        );

        let schema = parse_form_schema(&response.text)?;

        tracing::info!(
            prompt = prompt.as_str(),
            field_count = schema.len(),
            fields = ?schema.iter().map(|f| f.label.as_str()).collect::<Vec<_>>(),
            "Form schema parsed"
        );

        Ok(schema)
    }
}
