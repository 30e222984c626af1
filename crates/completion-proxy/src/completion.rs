//! The prompt completion operation.
//!
//! [`CompletionProxy`] sends one user message to the provider and hands back
//! the trimmed text of the first choice. Any failure is logged and reduced to
//! [`CompletionError::ExternalCallFailure`], so provider details never reach
//! the caller.

use derive_builder::Builder;
use tracing::{debug, error};

use crate::chat_completions::{
    ChatCompletion, ChatCompletionMessage, ChatCompletionRequestBuilder,
    ChatCompletionUserMessage,
};
use crate::clients::openai;
use crate::config::{Config, DEFAULT_MODEL};
use crate::Result;

/// Message returned to callers whenever a completion fails.
pub const GENERIC_FAILURE_MESSAGE: &str = "Something went wrong with OpenAI.";

#[derive(thiserror::Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum CompletionError {
    #[error("Something went wrong with OpenAI.")]
    ExternalCallFailure,
}

#[derive(Clone, Builder)]
#[builder(pattern = "mutable")]
pub struct CompletionProxy {
    #[builder(setter(custom))]
    client: Box<dyn ChatCompletion>,
    #[builder(setter(into), default = "DEFAULT_MODEL.to_string()")]
    model: String,
    /// Unset for in-process callers, set by the hosted endpoint.
    #[builder(setter(into, strip_option), default)]
    max_completion_tokens: Option<u32>,
}

impl CompletionProxyBuilder {
    pub fn client<C: ChatCompletion + 'static>(&mut self, client: C) -> &mut Self {
        self.client = Some(Box::new(client));
        self
    }
}

impl CompletionProxy {
    /// Proxy for the hosted endpoint, talking to the configured provider.
    pub fn from_config(config: &Config) -> Self {
        Self {
            client: Box::new(openai::Client::from_config(&config.openai)),
            model: config.model.clone(),
            max_completion_tokens: config.max_completion_tokens,
        }
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    pub fn max_completion_tokens(&self) -> Option<u32> {
        self.max_completion_tokens
    }

    pub async fn complete(&self, prompt: &str) -> std::result::Result<String, CompletionError> {
        self.complete_message(prompt.into()).await
    }

    /// Same as [`CompletionProxy::complete`] for a message whose content may
    /// be missing. The message is forwarded without validation.
    pub async fn complete_message(
        &self,
        message: ChatCompletionUserMessage,
    ) -> std::result::Result<String, CompletionError> {
        self.try_complete(message).await.map_err(|err| {
            error!(error = %err, "Error fetching from OpenAI");
            CompletionError::ExternalCallFailure
        })
    }

    /// In-process form: the completion text, or [`GENERIC_FAILURE_MESSAGE`].
    pub async fn complete_or_message(&self, prompt: &str) -> String {
        self.complete(prompt)
            .await
            .unwrap_or_else(|err| err.to_string())
    }

    async fn try_complete(&self, message: ChatCompletionUserMessage) -> Result<String> {
        let mut builder = ChatCompletionRequestBuilder::default();
        builder
            .model(self.model.as_str())
            .messages(vec![ChatCompletionMessage::User(message)]);
        if let Some(max_completion_tokens) = self.max_completion_tokens {
            builder.max_completion_tokens(max_completion_tokens);
        }
        let request = builder.build()?;

        let response = self.client.chat_completions(&request).await?;
        debug!(model = %response.model, usage = ?response.usage, "completion received");

        Ok(response.first_content()?.trim().to_string())
    }
}
