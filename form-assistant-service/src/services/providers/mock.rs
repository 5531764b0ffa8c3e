//! Mock provider implementation for testing.

use super::{
    ChatMessage, ChatProvider, FinishReason, GenerationParams, ProviderError, ProviderResponse,
};
use async_trait::async_trait;
use std::sync::Mutex;

/// What the mock answers with.
#[derive(Debug, Clone)]
pub enum MockReply {
    Text(String),
    ApiError(String),
    Disabled,
}

/// A recorded `complete` call.
#[derive(Debug, Clone)]
pub struct MockCall {
    pub messages: Vec<ChatMessage>,
    pub params: GenerationParams,
}

/// Mock chat provider returning a canned reply and recording its calls.
pub struct MockChatProvider {
    reply: MockReply,
    calls: Mutex<Vec<MockCall>>,
}

impl MockChatProvider {
    pub fn new(reply: MockReply) -> Self {
        Self {
            reply,
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn replying(text: impl Into<String>) -> Self {
        Self::new(MockReply::Text(text.into()))
    }

    pub fn failing(message: impl Into<String>) -> Self {
        Self::new(MockReply::ApiError(message.into()))
    }

    pub fn calls(&self) -> Vec<MockCall> {
        self.calls
            .lock()
            .map(|calls| calls.clone())
            .unwrap_or_default()
    }
}

#[async_trait]
impl ChatProvider for MockChatProvider {
    fn name(&self) -> &'static str {
        "mock"
    }

    async fn complete(
        &self,
        messages: &[ChatMessage],
        params: &GenerationParams,
    ) -> Result<ProviderResponse, ProviderError> {
        if let Ok(mut calls) = self.calls.lock() {
            calls.push(MockCall {
                messages: messages.to_vec(),
                params: params.clone(),
            });
        }

        match &self.reply {
            MockReply::Text(text) => Ok(ProviderResponse {
                text: text.clone(),
                input_tokens: messages.iter().map(|m| m.content.len() as u32 / 4).sum(),
                output_tokens: text.len() as u32 / 4,
                finish_reason: FinishReason::Complete,
            }),
            MockReply::ApiError(message) => Err(ProviderError::ApiError(message.clone())),
            MockReply::Disabled => Err(ProviderError::NotConfigured(
                "Mock chat provider not enabled".to_string(),
            )),
        }
    }
}
