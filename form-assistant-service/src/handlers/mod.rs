//! HTTP handlers for the form assistant service.

pub mod form;
pub mod health;
pub mod metrics;
