//! Stable error codes surfaced to operators and callers.

/// Every error enum in the crate maps its variants to a stable code.
pub trait GateErrorCode {
    fn error_code(&self) -> &'static str;
}

pub const VERSION_INVALID: &str = "VERSION_INVALID";
pub const VERSION_MAJOR_MINOR_ONLY: &str = "VERSION_MAJOR_MINOR_ONLY";
pub const FEATURE_UNKNOWN: &str = "FEATURE_UNKNOWN";
pub const FEATURE_LOCKED: &str = "FEATURE_LOCKED";
pub const FEATURE_SPEC_CONFLICT: &str = "FEATURE_SPEC_CONFLICT";
pub const FEATURE_REGISTRY_CLOSED: &str = "FEATURE_REGISTRY_CLOSED";
pub const FEATURE_PARSE_ERROR: &str = "FEATURE_PARSE_ERROR";
pub const EVALUATOR_CONFIG_INVALID: &str = "EVALUATOR_CONFIG_INVALID";
pub const CONVERSION_FAILED: &str = "CONVERSION_FAILED";
