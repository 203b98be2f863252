//! Ekispert client error types.

/// Errors from the Ekispert HTTP client.
#[derive(Debug, thiserror::Error)]
pub enum EkispertError {
    /// HTTP request failed (network error, timeout, etc.)
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// API key rejected
    #[error("unauthorized: check EKISPERT_API_KEY")]
    Unauthorized,

    /// API returned an error status code
    #[error("API error {status}: {message}")]
    Api { status: u16, message: String },

    /// Response body didn't decode
    #[error("JSON parse error: {message}")]
    Json {
        message: String,
        body: Option<String>,
    },

    /// No fixture for a mock request
    #[error("no mock data: {0}")]
    MockMissing(String),
}
