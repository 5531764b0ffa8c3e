//! System prompts sent ahead of the user's form description.

pub mod form;

pub use form::{FormPrompt, USER_PREFIX};
