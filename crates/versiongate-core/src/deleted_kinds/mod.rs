//! Dropping API kinds whose lifecycle says they should no longer be served.
//!
//! ## Components
//! - **lifecycle**: `ApiLifecycle`, the storage and converter collaborators
//! - **evaluator**: `ResourceExpirationEvaluator` and the storage-map pruning

pub mod evaluator;
pub mod lifecycle;

pub use evaluator::{ResourceExpirationEvaluator, VersionedStorageMap};
pub use lifecycle::{
    ApiLifecycle, ObjectConverter, ResourceStorage, StaticObjectConverter, VersionedObject,
};
