//! Version primitives.
//!
//! - **version**: two-part `Version`, release-string parsing
//! - **effective**: binary / emulation / min-compatibility triple
//! - **provider**: where the running binary's version string comes from

pub mod effective;
pub mod provider;
#[allow(clippy::module_inception)]
pub mod version;

pub use effective::EffectiveVersion;
pub use provider::{BuildVersionInfo, StaticVersionInfo, VersionInfoProvider};
pub use version::{parse_release, Version};
