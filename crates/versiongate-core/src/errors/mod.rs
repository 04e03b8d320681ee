//! Error types for every component, each carrying a stable error code.

pub mod error_code;
pub mod evaluator_error;
pub mod feature_error;
pub mod version_error;

pub use error_code::GateErrorCode;
pub use evaluator_error::{ConversionError, EvaluatorError};
pub use feature_error::{FeatureGateError, FeatureGateResult};
pub use version_error::VersionError;
