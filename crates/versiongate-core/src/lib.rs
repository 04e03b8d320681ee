//! # versiongate-core
//!
//! Version-aware gating for long-lived servers.
//! Decides, for a compatibility version the operator pins to, which named
//! features are enabled and which API resources are still served.
//!
//! ## Modules
//! - `version`: `Version` (major.minor), release parsing, `EffectiveVersion`
//! - `featuregate`: versioned feature specs, `FeatureGate`, `--feature-gates` flag, metrics hook
//! - `resource`: group-version / resource enablement with lifecycle-aware defaults
//! - `deleted_kinds`: pruning of served kinds past their removal release
//! - `config`: environment toggles for removal handling
//! - `errors`: error enums with stable codes

pub mod config;
pub mod deleted_kinds;
pub mod errors;
pub mod featuregate;
pub mod resource;
pub mod version;

// Re-export the most commonly used types at the crate root.
pub use config::ExpirationConfig;
pub use deleted_kinds::{
    ApiLifecycle, ObjectConverter, ResourceExpirationEvaluator, ResourceStorage, VersionedObject,
};
pub use errors::{EvaluatorError, FeatureGateError, GateErrorCode, VersionError};
pub use featuregate::{FeatureGate, FeatureSpec, PreRelease, VersionedSpecs};
pub use resource::{GroupVersion, GroupVersionResource, ResourceConfig, ResourceConfigSource};
pub use rustc_hash::FxHashMap;
pub use version::{EffectiveVersion, Version};
