//! Error types for the quiz client
//!
//! Every failure the client can observe falls in one of a few categories:
//!
//! - **Transport**: the request never produced a usable HTTP response
//! - **GraphQl**: the server answered with an `errors` array
//! - **NoData**: the server answered without data and without errors
//! - **AuthFailed**: the login, signup or logout endpoint returned a non-2xx status
//!
//! Callers present all of them the same way (a generic error view). The
//! variants exist so that logs and tests can tell them apart.
//!
//! # Examples
//!
//! ```rust
//! use quizapp::errors::ClientError;
//!
//! let err = ClientError::AuthFailed {
//!     status: 401,
//!     body: "Unauthorized".to_string(),
//! };
//! assert_eq!(err.to_string(), "Authentication request failed (401): Unauthorized");
//! ```

use thiserror::Error;

use crate::graphql::GraphQlErrorMessage;

/// Errors surfaced by the client, the session and the auth gateway
#[derive(Error, Debug)]
pub enum ClientError {
    /// Network failure or unexpected HTTP status on the GraphQL endpoint
    #[error("Transport error: {0}")]
    Transport(String),

    /// The operation result carried GraphQL errors
    #[error("GraphQL error: {}", join_messages(.0))]
    GraphQl(Vec<GraphQlErrorMessage>),

    /// The operation resolved with neither data nor errors
    #[error("Unexpected: no data")]
    NoData,

    /// An auth endpoint answered with a non-2xx status
    #[error("Authentication request failed ({status}): {body}")]
    AuthFailed { status: u16, body: String },

    /// A response could not be decoded into the expected shape
    #[error("Invalid response payload: {0}")]
    Decode(#[from] serde_json::Error),

    /// Configuration could not be loaded or is invalid
    #[error("Configuration error: {0}")]
    Config(String),

    /// A user-scoped action was attempted without a session user
    #[error("Login required to {0}")]
    Anonymous(String),
}

impl From<reqwest::Error> for ClientError {
    fn from(value: reqwest::Error) -> Self {
        ClientError::Transport(value.to_string())
    }
}

impl From<url::ParseError> for ClientError {
    fn from(value: url::ParseError) -> Self {
        ClientError::Config(value.to_string())
    }
}

fn join_messages(errors: &[GraphQlErrorMessage]) -> String {
    errors
        .iter()
        .map(|e| e.message.as_str())
        .collect::<Vec<_>>()
        .join("; ")
}

/// Result type alias for client operations
pub type ClientResult<T> = Result<T, ClientError>;
