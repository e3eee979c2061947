//! Custom error types for tpc.
//!
//! Explicit enum error types only. No `Box<dyn Error>`, no `anyhow::Result`
//! in library code - every failure is strongly typed.

use std::fmt;
use std::path::PathBuf;

use thiserror::Error;

/// Top-level error type for the benchmark core.
#[derive(Debug, Error)]
pub enum TpcError {
    // =========================================================================
    // Configuration Errors - Fail-Fast on Invalid Config
    // =========================================================================
    #[error("Hard validation error: {0}")]
    HardValidation(#[from] HardValidationError),

    #[error("Configuration file not found: {path}")]
    ConfigNotFound { path: PathBuf },

    #[error("Configuration parse error: {message}")]
    ConfigParse { message: String },

    // =========================================================================
    // Codec Errors - Abort the Offending Codec Only
    // =========================================================================
    #[error("Codec error: {0}")]
    Codec(#[from] CodecError),

    // =========================================================================
    // System Errors
    // =========================================================================
    #[error("IO error: {context} - {source}")]
    Io {
        context: &'static str,
        #[source]
        source: std::io::Error,
    },
}

/// Hard validation errors reject configuration or names before a run starts.
#[derive(Debug, Error)]
pub enum HardValidationError {
    #[error("Invalid field value: {field} = {value} - {reason}")]
    InvalidFieldValue {
        field: &'static str,
        value: String,
        reason: String,
    },

    #[error("Unknown codec: {name}")]
    UnknownCodec { name: String },

    #[error("Duplicate codec name: {name}")]
    DuplicateCodecName { name: String },
}

/// Which half of a round-trip an encoding failure came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EncodingStage {
    Serialize,
    Deserialize,
}

impl fmt::Display for EncodingStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EncodingStage::Serialize => write!(f, "serialize"),
            EncodingStage::Deserialize => write!(f, "deserialize"),
        }
    }
}

/// Failures raised by a codec plugin.
///
/// Either variant aborts measurement of the plugin that raised it; the run
/// moves on to the next plugin. Failures are never retried.
#[derive(Debug, Error)]
pub enum CodecError {
    #[error("Failed to construct payload: {reason}")]
    Construction { reason: String },

    #[error("Failed to {stage} payload: {reason}")]
    Encoding { stage: EncodingStage, reason: String },
}

impl CodecError {
    /// Build an encoding error for the serialize stage.
    pub fn serialize(reason: impl fmt::Display) -> Self {
        CodecError::Encoding {
            stage: EncodingStage::Serialize,
            reason: reason.to_string(),
        }
    }

    /// Build an encoding error for the deserialize stage.
    pub fn deserialize(reason: impl fmt::Display) -> Self {
        CodecError::Encoding {
            stage: EncodingStage::Deserialize,
            reason: reason.to_string(),
        }
    }
}

/// Result type alias using TpcError.
pub type TpcResult<T> = Result<T, TpcError>;

/// Result type alias for codec plugin operations.
pub type CodecResult<T> = Result<T, CodecError>;
