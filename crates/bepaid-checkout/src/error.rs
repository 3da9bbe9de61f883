//! Checkout Error Types

use thiserror::Error;

/// Result type alias
pub type Result<T> = std::result::Result<T, CheckoutError>;

/// Faults raised by the checkout client.
///
/// Provider-side rejections are not faults: they come back as a
/// [`CheckoutResult`](crate::CheckoutResult) with `ok == false`.
#[derive(Error, Debug)]
pub enum CheckoutError {
    /// Required configuration value missing or malformed
    #[error("Configuration error: {0}")]
    Config(String),

    /// Connection, DNS or timeout failure in the HTTP transport
    #[error("Transport error: {0}")]
    Transport(String),

    /// The caller cancelled the request before the transport finished
    #[error("Request cancelled")]
    Cancelled,

    /// Request payload could not be encoded
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl CheckoutError {
    /// Check if this error is retryable
    pub fn is_retryable(&self) -> bool {
        matches!(self, CheckoutError::Transport(_))
    }

    /// Get user-friendly message
    pub fn user_message(&self) -> &str {
        match self {
            CheckoutError::Config(_) => "Service configuration error.",
            CheckoutError::Transport(_) => "Payment service is unreachable. Please try again.",
            CheckoutError::Cancelled => "The request was cancelled.",
            CheckoutError::Serialization(_) => "An error occurred processing your request.",
        }
    }
}

impl From<reqwest::Error> for CheckoutError {
    fn from(err: reqwest::Error) -> Self {
        CheckoutError::Transport(err.to_string())
    }
}
