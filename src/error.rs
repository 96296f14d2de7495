//! Error types for encoder construction.

use thiserror::Error;

/// Errors that can occur when configuring an encoder.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum EncoderError {
    /// Requested recurrent cell kind is not supported.
    ///
    /// Only GRU and LSTM are recognized; plain (non-gated) RNN cells are
    /// deliberately rejected.
    #[error("Unsupported cell kind: '{0}'. Supported kinds are GRU and LSTM")]
    UnsupportedCellKind(String),

    /// Invalid configuration.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}

/// Result type for encoder construction.
pub type EncoderResult<T> = Result<T, EncoderError>;
