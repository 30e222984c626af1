use crate::chat_completions::{ChatCompletion, ChatCompletionRequest, ChatCompletionResponse};
use crate::config::{DEFAULT_BASE_URL, OPENAI_API_KEY_ENV_VAR, OpenAiConfig};
use crate::utils::uri::ensure_no_trailing_slash;
use crate::{Error, Result};
use async_trait::async_trait;
use derive_builder::Builder;
use reqwest::header::{AUTHORIZATION, CONTENT_TYPE, HeaderMap, HeaderValue};
use secrecy::{ExposeSecret, SecretString};

/// Client for an OpenAI-compatible chat completions API.
///
/// The underlying [`reqwest::Client`] is shared by every clone, so one
/// instance can serve concurrent requests. No timeout is set; a request waits
/// for as long as the provider takes.
#[derive(Debug, Clone, Builder)]
#[builder(derive(Debug))]
#[builder(setter(into))]
pub struct Client {
    #[builder(default)]
    http_client: reqwest::Client,
    #[builder(default = "DEFAULT_BASE_URL.to_string()")]
    base_url: String,
    #[builder(default, setter(strip_option))]
    api_key: Option<SecretString>,
}

impl Client {
    pub fn new(api_key: &str) -> Result<Self> {
        Self::from_url(api_key, DEFAULT_BASE_URL)
    }

    pub fn from_url(api_key: &str, base_url: &str) -> Result<Self> {
        Ok(ClientBuilder::default()
            .api_key(api_key)
            .base_url(ensure_no_trailing_slash(base_url))
            .build()?)
    }

    /// Builds a client from configuration. A missing key is not an error
    /// here; it is reported by the first completion attempt.
    pub fn from_config(config: &OpenAiConfig) -> Self {
        Self {
            http_client: reqwest::Client::default(),
            base_url: ensure_no_trailing_slash(config.base_url.as_str()),
            api_key: config.api_key.clone(),
        }
    }

    fn headers(&self) -> Result<HeaderMap> {
        let api_key = self
            .api_key
            .as_ref()
            .ok_or_else(|| Error::MissingApiKey(OPENAI_API_KEY_ENV_VAR.to_string()))?;

        let mut authorization =
            HeaderValue::from_str(&format!("Bearer {}", api_key.expose_secret()))
                .map_err(|e| Error::InvalidHeaderValue(AUTHORIZATION.to_string(), e))?;
        authorization.set_sensitive(true);

        let mut headers = HeaderMap::new();
        headers.insert(AUTHORIZATION, authorization);
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        Ok(headers)
    }
}

#[async_trait]
impl ChatCompletion for Client {
    async fn chat_completions(
        &self,
        request: &ChatCompletionRequest,
    ) -> Result<ChatCompletionResponse> {
        let headers = self.headers()?;
        let url = format!("{}/chat/completions", self.base_url);

        let response = self
            .http_client
            .post(url)
            .headers(headers)
            .json(request)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(Error::ApiError {
                status: status.as_u16(),
                body: response.text().await?,
            });
        }

        let chat_completion_response = response.json::<ChatCompletionResponse>().await?;

        Ok(chat_completion_response)
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::chat_completions::{ChatCompletionMessage, ChatCompletionRequestBuilder};
    use httpmock::prelude::*;
    use serde_json::json;

    fn request() -> ChatCompletionRequest {
        ChatCompletionRequestBuilder::default()
            .model("gpt-3.5-turbo")
            .messages(vec![ChatCompletionMessage::User("Say hi".into())])
            .max_completion_tokens(50u32)
            .build()
            .unwrap()
    }

    #[tokio::test]
    async fn test_chat_completions() {
        let server = MockServer::start_async().await;
        let mock = server
            .mock_async(|when, then| {
                when.method(POST)
                    .path("/v1/chat/completions")
                    .header("authorization", "Bearer sk-test")
                    .json_body(json!({
                        "model": "gpt-3.5-turbo",
                        "messages": [{"role": "user", "content": "Say hi"}],
                        "max_completion_tokens": 50
                    }));
                then.status(200).json_body(json!({
                    "id": "chatcmpl-1",
                    "object": "chat.completion",
                    "created": 1700000000,
                    "model": "gpt-3.5-turbo-0125",
                    "choices": [{
                        "index": 0,
                        "message": {"role": "assistant", "content": "Hi!"},
                        "finish_reason": "stop"
                    }],
                    "usage": {"prompt_tokens": 9, "completion_tokens": 2, "total_tokens": 11}
                }));
            })
            .await;

        let client = Client::from_url("sk-test", &server.url("/v1/")).unwrap();
        let response = client.chat_completions(&request()).await.unwrap();

        mock.assert_async().await;
        assert_eq!(response.first_content().unwrap(), "Hi!");
        assert_eq!(response.usage.total_tokens, 11);
    }

    #[tokio::test]
    async fn test_api_error() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(POST).path("/chat/completions");
                then.status(429)
                    .json_body(json!({"error": {"message": "quota exceeded"}}));
            })
            .await;

        let client = Client::from_url("sk-test", &server.base_url()).unwrap();
        let err = client.chat_completions(&request()).await.unwrap_err();

        assert!(matches!(
            err,
            Error::ApiError { status: 429, ref body } if body.contains("quota exceeded")
        ));
    }

    #[tokio::test]
    async fn test_malformed_response() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(POST).path("/chat/completions");
                then.status(200).body("not json");
            })
            .await;

        let client = Client::from_url("sk-test", &server.base_url()).unwrap();
        let err = client.chat_completions(&request()).await.unwrap_err();

        assert!(matches!(err, Error::ReqwestError(_)));
    }

    #[tokio::test]
    async fn test_missing_api_key_sends_nothing() {
        let server = MockServer::start_async().await;
        let mock = server
            .mock_async(|when, then| {
                when.method(POST).path("/chat/completions");
                then.status(200);
            })
            .await;

        let client = Client::from_config(&OpenAiConfig {
            api_key: None,
            base_url: server.base_url(),
        });
        let err = client.chat_completions(&request()).await.unwrap_err();

        assert!(matches!(err, Error::MissingApiKey(ref var) if var == OPENAI_API_KEY_ENV_VAR));
        assert_eq!(mock.hits_async().await, 0);
    }

    #[test]
    fn test_debug_redacts_api_key() {
        let client = Client::new("sk-very-secret").unwrap();
        assert!(!format!("{client:?}").contains("sk-very-secret"));
    }
}
