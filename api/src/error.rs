//! Error types for the todo API client.

use thiserror::Error;

/// Errors that can occur when talking to the remote todo API.
///
/// The client reports what happened; it never retries. Callers collapse all
/// of these to log-and-drop, but 404 gets its own variant because same-id
/// races (toggle or delete against an already-deleted record) make it an
/// expected outcome rather than a surprise.
#[derive(Debug, Error)]
pub enum TodoApiError {
    /// HTTP request failed to complete
    #[error("request failed: {0}")]
    RequestFailed(String),

    /// Response body could not be parsed as the expected JSON
    #[error("response parsing failed: {0}")]
    ResponseParseFailed(String),

    /// Server has no record with the requested id
    #[error("todo not found")]
    NotFound,

    /// Server returned a status outside the operation's contract
    #[error("unexpected status {status}: {message}")]
    UnexpectedStatus {
        /// HTTP status code
        status: u16,
        /// Response body, if any
        message: String,
    },
}
