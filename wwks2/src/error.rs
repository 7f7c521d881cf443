//! High-level error types

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Core protocol error: {0}")]
    Core(#[from] wwks2_core::Error),

    #[error("Transport error: {0}")]
    Transport(#[from] wwks2_transport::Error),

    #[error("Type error: {0}")]
    Types(#[from] wwks2_types::Error),

    #[error("Not connected to peer")]
    NotConnected,

    #[error("Handshake failed: {0}")]
    HandshakeFailed(String),

    #[error("Unexpected message: expected {expected}, got {actual}")]
    UnexpectedMessage {
        expected: &'static str,
        actual: &'static str,
    },

    #[error("Correlation mismatch: sent Id {expected}, response carried Id {actual}")]
    CorrelationMismatch { expected: String, actual: String },

    #[error("Invalid response from peer: {0}")]
    InvalidResponse(String),
}
