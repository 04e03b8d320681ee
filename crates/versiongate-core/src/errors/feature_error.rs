//! Feature gate registration and parse errors.

use super::error_code::{self, GateErrorCode};
use super::version_error::VersionError;

/// Errors returned by [`crate::featuregate::FeatureGate`] mutations.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FeatureGateError {
    #[error("unrecognized feature gate: {name}")]
    UnknownFeature { name: String },

    #[error("feature {name:?} is not registered in FeatureGate {gate:?}")]
    NotRegistered { name: String, gate: String },

    #[error("cannot set feature gate {name} to {requested}, feature is locked to {locked_to}")]
    LockedToDefault {
        name: String,
        requested: bool,
        locked_to: bool,
    },

    #[error("feature gate {name:?} with different spec already exists: {existing}")]
    ConflictingSpec { name: String, existing: String },

    #[error("feature gate {name:?} declares more than one spec for version {version}")]
    DuplicateSpecVersion { name: String, version: String },

    #[error("cannot add a feature gate after adding it to the flag set")]
    RegistryClosed,

    #[error("missing bool value for {key}")]
    MissingValue { key: String },

    #[error("invalid value of {key}={value}, err: {reason}")]
    InvalidBool {
        key: String,
        value: String,
        reason: String,
    },

    #[error("Version error: {0}")]
    Version(#[from] VersionError),
}

impl GateErrorCode for FeatureGateError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::UnknownFeature { .. } | Self::NotRegistered { .. } => error_code::FEATURE_UNKNOWN,
            Self::LockedToDefault { .. } => error_code::FEATURE_LOCKED,
            Self::ConflictingSpec { .. } | Self::DuplicateSpecVersion { .. } => {
                error_code::FEATURE_SPEC_CONFLICT
            }
            Self::RegistryClosed => error_code::FEATURE_REGISTRY_CLOSED,
            Self::MissingValue { .. } | Self::InvalidBool { .. } => error_code::FEATURE_PARSE_ERROR,
            Self::Version(e) => e.error_code(),
        }
    }
}

pub type FeatureGateResult<T> = Result<T, FeatureGateError>;
