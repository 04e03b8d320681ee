//! Errors for the deleted-kinds evaluator and its converter collaborator.

use super::error_code::{self, GateErrorCode};
use super::version_error::VersionError;

/// Construction-time failures of [`crate::deleted_kinds::ResourceExpirationEvaluator`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum EvaluatorError {
    #[error("Version error: {0}")]
    Version(#[from] VersionError),

    #[error("invalid boolean in {var}: {value:?}")]
    InvalidEnvBool { var: String, value: String },
}

impl GateErrorCode for EvaluatorError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::Version(e) => e.error_code(),
            Self::InvalidEnvBool { .. } => error_code::EVALUATOR_CONFIG_INVALID,
        }
    }
}

/// A converter could not produce the requested versioned representation.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("cannot convert {kind} to {target}: {reason}")]
pub struct ConversionError {
    pub kind: String,
    pub target: String,
    pub reason: String,
}

impl GateErrorCode for ConversionError {
    fn error_code(&self) -> &'static str {
        error_code::CONVERSION_FAILED
    }
}
