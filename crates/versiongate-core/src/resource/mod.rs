//! API resource enablement.
//!
//! ## Components
//! - **schema**: `GroupVersion` / `GroupVersionResource` identifiers
//! - **registry**: lifecycle bounds (introduced / removed) per group-version and resource
//! - **config**: `ResourceConfig`: version- and resource-level enable/disable matrix
//!
//! Built once at startup and then only read; there is no internal locking.

pub mod config;
pub mod registry;
pub mod schema;

pub use config::{ResourceConfig, ResourceConfigSource};
pub use registry::{GroupVersionRegistry, StaticGroupVersionRegistry};
pub use schema::{GroupVersion, GroupVersionResource};
