//! HTTP adapter for [`CompletionProxy`].
//!
//! `POST /api/openai` takes `{"prompt": "..."}` and answers with
//! `{"text": "..."}` on success or a 500 carrying
//! `{"error": "Something went wrong with OpenAI."}`.

use std::future::Future;

use axum::Json;
use axum::Router;
use axum::body::Bytes;
use axum::extract::{DefaultBodyLimit, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::post;
use serde::{Deserialize, Serialize};
use tokio::net::TcpListener;
use tracing::{error, info};

use crate::Result;
use crate::chat_completions::ChatCompletionUserMessage;
use crate::completion::{CompletionError, CompletionProxy};

pub const COMPLETION_ROUTE: &str = "/api/openai";

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct PromptRequest {
    #[serde(default)]
    pub prompt: Option<String>,
}

impl From<PromptRequest> for ChatCompletionUserMessage {
    fn from(request: PromptRequest) -> Self {
        ChatCompletionUserMessage {
            content: request.prompt,
            name: None,
        }
    }
}

/// Response body of the hosted endpoint. Exactly one field is present.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum CompletionResult {
    Text(String),
    Error(String),
}

impl From<std::result::Result<String, CompletionError>> for CompletionResult {
    fn from(result: std::result::Result<String, CompletionError>) -> Self {
        match result {
            Ok(text) => CompletionResult::Text(text),
            Err(err) => CompletionResult::Error(err.to_string()),
        }
    }
}

impl IntoResponse for CompletionResult {
    fn into_response(self) -> Response {
        let status = match &self {
            CompletionResult::Text(_) => StatusCode::OK,
            CompletionResult::Error(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };
        (status, Json(self)).into_response()
    }
}

/// Builds the endpoint. Request bodies are not size limited; prompt length is
/// left to the provider.
pub fn router(proxy: CompletionProxy) -> Router {
    Router::new()
        .route(COMPLETION_ROUTE, post(complete_prompt))
        .layer(DefaultBodyLimit::disable())
        .with_state(proxy)
}

/// Serves the completion endpoint on `listener` until `shutdown` resolves.
pub async fn serve<F>(listener: TcpListener, proxy: CompletionProxy, shutdown: F) -> Result<()>
where
    F: Future<Output = ()> + Send + 'static,
{
    info!(address = %listener.local_addr()?, model = proxy.model(), "listening");
    axum::serve(listener, router(proxy))
        .with_graceful_shutdown(shutdown)
        .await?;
    Ok(())
}

async fn complete_prompt(State(proxy): State<CompletionProxy>, body: Bytes) -> CompletionResult {
    let result = match serde_json::from_slice::<PromptRequest>(&body) {
        Ok(request) => proxy.complete_message(request.into()).await,
        Err(err) => {
            error!(error = %err, "Invalid completion request body");
            Err(CompletionError::ExternalCallFailure)
        }
    };
    result.into()
}
