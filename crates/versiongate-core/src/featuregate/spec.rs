//! Feature specs and their version history.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::version::Version;

/// Maturity of a feature at a given version.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PreRelease {
    PreAlpha,
    Alpha,
    Beta,
    #[serde(rename = "GA")]
    Ga,
    Deprecated,
}

impl PreRelease {
    /// Stage label used in help text and metrics. GA has an empty label.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::PreAlpha => "PRE-ALPHA",
            Self::Alpha => "ALPHA",
            Self::Beta => "BETA",
            Self::Ga => "",
            Self::Deprecated => "DEPRECATED",
        }
    }
}

impl fmt::Display for PreRelease {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Behavior of a feature as of `version`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct FeatureSpec {
    pub default: bool,
    /// The feature cannot be overridden away from `default`.
    pub lock_to_default: bool,
    pub pre_release: PreRelease,
    pub version: Version,
}

impl FeatureSpec {
    pub fn new(default: bool, pre_release: PreRelease) -> Self {
        Self {
            default,
            lock_to_default: false,
            pre_release,
            version: Version::default(),
        }
    }

    /// Spec taking effect at `version`.
    pub fn at(major: u64, minor: u64, default: bool, pre_release: PreRelease) -> Self {
        Self {
            version: Version::new(major, minor),
            ..Self::new(default, pre_release)
        }
    }

    pub fn locked(mut self) -> Self {
        self.lock_to_default = true;
        self
    }

    /// Returned when a compatibility version predates every spec of a feature.
    pub const fn pre_alpha_sentinel() -> Self {
        Self {
            default: false,
            lock_to_default: false,
            pre_release: PreRelease::PreAlpha,
            version: Version::new(0, 0),
        }
    }
}

/// The specs of one feature, sorted ascending by version.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Vec<FeatureSpec>")]
pub struct VersionedSpecs(Vec<FeatureSpec>);

impl VersionedSpecs {
    pub fn new(mut specs: Vec<FeatureSpec>) -> Self {
        specs.sort_by_key(|s| s.version);
        Self(specs)
    }

    pub fn single(spec: FeatureSpec) -> Self {
        Self(vec![spec])
    }

    /// The spec active at `compatibility`.
    pub fn current(&self, compatibility: Version) -> FeatureSpec {
        current_spec(&self.0, compatibility)
    }

    /// First version that appears more than once, if any.
    pub fn duplicate_version(&self) -> Option<Version> {
        self.0
            .windows(2)
            .find(|pair| pair[0].version == pair[1].version)
            .map(|pair| pair[0].version)
    }

    pub fn as_slice(&self) -> &[FeatureSpec] {
        &self.0
    }

    pub fn iter(&self) -> impl Iterator<Item = &FeatureSpec> {
        self.0.iter()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl From<Vec<FeatureSpec>> for VersionedSpecs {
    fn from(specs: Vec<FeatureSpec>) -> Self {
        Self::new(specs)
    }
}

impl fmt::Display for VersionedSpecs {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("[")?;
        for (i, spec) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str(" ")?;
            }
            write!(
                f,
                "{{{} default={} locked={} stage={:?}}}",
                spec.version, spec.default, spec.lock_to_default, spec.pre_release
            )?;
        }
        f.write_str("]")
    }
}

/// Pick the spec with the greatest version `<= compatibility` from an
/// ascending slice, or the pre-alpha sentinel when none qualifies.
pub fn current_spec(specs: &[FeatureSpec], compatibility: Version) -> FeatureSpec {
    specs
        .iter()
        .rev()
        .find(|spec| spec.version <= compatibility)
        .copied()
        .unwrap_or(FeatureSpec::pre_alpha_sentinel())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn history() -> VersionedSpecs {
        VersionedSpecs::new(vec![
            FeatureSpec::at(1, 29, true, PreRelease::Ga),
            FeatureSpec::at(1, 25, false, PreRelease::Alpha),
            FeatureSpec::at(1, 28, false, PreRelease::Beta),
        ])
    }

    #[test]
    fn new_sorts_by_version() {
        let versions: Vec<Version> = history().iter().map(|s| s.version).collect();
        assert_eq!(
            versions,
            vec![Version::new(1, 25), Version::new(1, 28), Version::new(1, 29)]
        );
    }

    #[test]
    fn current_picks_greatest_not_after() {
        let specs = history();
        assert_eq!(specs.current(Version::new(1, 30)).pre_release, PreRelease::Ga);
        assert!(specs.current(Version::new(1, 30)).default);
        assert_eq!(specs.current(Version::new(1, 28)).pre_release, PreRelease::Beta);
        assert_eq!(specs.current(Version::new(1, 27)).pre_release, PreRelease::Alpha);
        assert_eq!(
            specs.current(Version::new(1, 24)),
            FeatureSpec::pre_alpha_sentinel()
        );
    }

    #[test]
    fn empty_history_resolves_to_sentinel() {
        assert_eq!(
            current_spec(&[], Version::new(9, 9)),
            FeatureSpec::pre_alpha_sentinel()
        );
    }

    #[test]
    fn duplicate_versions_detected() {
        let specs = VersionedSpecs::new(vec![
            FeatureSpec::at(1, 28, false, PreRelease::Alpha),
            FeatureSpec::at(1, 28, true, PreRelease::Beta),
        ]);
        assert_eq!(specs.duplicate_version(), Some(Version::new(1, 28)));
        assert_eq!(history().duplicate_version(), None);
    }
}
