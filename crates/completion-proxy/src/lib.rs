mod error;
pub mod utils;
pub use error::{Error, Result};

pub mod chat_completions;
pub mod clients;
pub mod completion;
pub mod config;
pub mod logging;
pub mod server;

pub use completion::{CompletionError, CompletionProxy, GENERIC_FAILURE_MESSAGE};
