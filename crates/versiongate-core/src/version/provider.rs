//! Source of the running binary's version string.

/// Yields the git-style version of the running binary (e.g. `v1.31.0`).
pub trait VersionInfoProvider: Send + Sync {
    fn git_version(&self) -> String;
}

/// Version baked in at compile time from the crate manifest.
pub struct BuildVersionInfo;

impl VersionInfoProvider for BuildVersionInfo {
    fn git_version(&self) -> String {
        format!("v{}", env!("CARGO_PKG_VERSION"))
    }
}

/// Fixed version string, for wiring and tests.
#[derive(Debug, Clone)]
pub struct StaticVersionInfo(pub String);

impl StaticVersionInfo {
    pub fn new(version: impl Into<String>) -> Self {
        Self(version.into())
    }
}

impl VersionInfoProvider for StaticVersionInfo {
    fn git_version(&self) -> String {
        self.0.clone()
    }
}
