//! Versioned feature gates.
//!
//! ## Components
//! - **spec**: `FeatureSpec`, `PreRelease`, `VersionedSpecs`, and the current-spec selector
//! - **gate**: `FeatureGate`: copy-on-write registry of known specs and explicit overrides
//! - **flag**: binding the gate to a `--feature-gates` command-line argument
//! - **metrics**: per-feature enablement gauges
//!
//! ## Special gates
//! `AllAlpha` and `AllBeta` are always registered. Setting one fills in every
//! feature currently at that stage that has no explicit override yet.

pub mod flag;
pub mod gate;
pub mod metrics;
pub mod spec;

pub use flag::FeatureGatesValueParser;
pub use gate::{FeatureGate, ALL_ALPHA_GATE, ALL_BETA_GATE, FLAG_NAME};
pub use metrics::{FeatureMetricsSink, InMemoryFeatureMetrics};
pub use spec::{current_spec, FeatureSpec, PreRelease, VersionedSpecs};
