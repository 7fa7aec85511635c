//! Error types for the game client
//!
//! Nothing here is fatal: network errors surface as alerts (blend) or
//! logged empty-state fallbacks (session/object loads), validation errors
//! are caught before any network call.

use thiserror::Error;

/// Errors surfaced by the client core
#[derive(Error, Debug)]
pub enum GameError {
    /// A REST call could not be made or completed
    #[error("network failure: {0}")]
    Network(String),

    /// The backend answered with a non-success status
    #[error("api error: http {status}")]
    Api { status: u16 },

    /// A payload could not be decoded
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),

    /// Bad input caught client-side, before any network call
    #[error("{0}")]
    Validation(String),
}

/// Result type for game client operations
pub type Result<T> = std::result::Result<T, GameError>;
