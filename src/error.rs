//! Errors surfaced by the login flow.
//!
//! Every variant is handled where it occurs and shown to the user as a message;
//! none of them is retried and none of them changes the session.

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AuthError {
    /// Callback page loaded without `code` or `error`.
    #[error("missing authorization code")]
    MissingCode,

    /// The identity provider redirected back with `error=<value>`.
    #[error("provider returned an error: {0}")]
    Provider(String),

    /// Backend answered the code exchange with a non-2xx status.
    #[error("Login failed: {status} - {body}")]
    ExchangeRejected { status: u16, body: String },

    /// Backend answered 2xx but the body was not the expected JSON.
    #[error("invalid response from server: {0}")]
    InvalidResponse(String),

    /// Request never produced a response (DNS, connection, CORS, ...).
    #[error("{0}")]
    Transport(String),

    /// Login was requested before the provider client finished initializing.
    #[error("Kakao SDK is not loaded yet. Please try again in a moment.")]
    SdkNotReady,
}

impl From<reqwest::Error> for AuthError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            AuthError::InvalidResponse(err.to_string())
        } else {
            AuthError::Transport(err.to_string())
        }
    }
}
