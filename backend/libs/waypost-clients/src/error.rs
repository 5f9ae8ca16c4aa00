//! Error type shared by all collaborator clients

use thiserror::Error;

/// Result type alias for collaborator calls
pub type ClientResult<T> = std::result::Result<T, ClientError>;

/// Failure modes of a single collaborator call.
///
/// Whether a given failure degrades or propagates is the caller's
/// decision; the clients themselves never retry.
#[derive(Error, Debug)]
pub enum ClientError {
    /// The request never produced a response (connect failure, timeout).
    #[error("transport error: {0}")]
    Transport(String),

    /// The upstream answered with a non-success status.
    #[error("unexpected status {status} from {url}")]
    UnexpectedStatus { status: u16, url: String },

    /// The response body could not be decoded.
    #[error("decode error: {0}")]
    Decode(String),
}
