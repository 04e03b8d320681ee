//! Version parsing errors.

use super::error_code::{self, GateErrorCode};

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum VersionError {
    #[error("version string is empty")]
    Empty,

    #[error("invalid version {input:?}: {reason}")]
    InvalidFormat { input: String, reason: String },

    #[error("version string {input:?} must only contain major and minor")]
    MajorAndMinorOnly { input: String },

    #[error("{field} version {version} is not between [{min}, {max}]")]
    OutOfRange {
        field: &'static str,
        version: String,
        min: String,
        max: String,
    },
}

impl GateErrorCode for VersionError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::MajorAndMinorOnly { .. } => error_code::VERSION_MAJOR_MINOR_ONLY,
            _ => error_code::VERSION_INVALID,
        }
    }
}
