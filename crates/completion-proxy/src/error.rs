/// The main error type for the completion proxy [`crate`].
///
/// These errors stay on the server side. Callers of
/// [`crate::completion::CompletionProxy`] only ever observe
/// [`crate::completion::CompletionError`].
#[derive(thiserror::Error, Debug)]
pub enum Error {
    /// Represents errors that occur during IO operations.
    #[error(transparent)]
    IOError(#[from] std::io::Error),

    #[error(transparent)]
    ReqwestError(#[from] reqwest::Error),

    #[error(transparent)]
    JsonError(#[from] serde_json::Error),

    /// No credential was configured for the provider. Reported at call time.
    #[error("Missing API key, set {0}")]
    MissingApiKey(String),

    #[error("Invalid header value for {0}: {1}")]
    InvalidHeaderValue(String, reqwest::header::InvalidHeaderValue),

    /// The provider answered with a non-success status.
    #[error("API error ({status}): {body}")]
    ApiError { status: u16, body: String },

    /// The provider answered without any choice text.
    #[error("Completion response contained no choice content")]
    EmptyCompletion,

    #[error("Invalid value for {key}: {value}")]
    InvalidConfig { key: String, value: String },

    /// Represents [`crate::chat_completions::ChatCompletionRequestBuilder`] errors.
    #[error(transparent)]
    ChatCompletionRequestBuilderError(
        #[from] crate::chat_completions::ChatCompletionRequestBuilderError,
    ),

    /// Represents [`crate::clients::openai::ClientBuilder`] errors.
    #[error(transparent)]
    ClientBuilderError(#[from] crate::clients::openai::ClientBuilderError),

    /// Represents [`crate::completion::CompletionProxyBuilder`] errors.
    #[error(transparent)]
    CompletionProxyBuilderError(#[from] crate::completion::CompletionProxyBuilderError),
}

/// A specialized [`Result`] type for this [`crate`].
///
/// This typedef is generally used to avoid writing out [`Error`] directly and
/// is otherwise a direct mapping to [`Result`].
///
/// # Examples
///
/// ```
/// fn load() -> completion_proxy::Result<()> {
///     let _config = completion_proxy::config::Config::from_lookup(|_| None)?;
///     Ok(())
/// }
/// # load().unwrap();
/// ```
pub type Result<T> = std::result::Result<T, Error>;
