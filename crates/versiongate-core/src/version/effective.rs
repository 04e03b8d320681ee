//! EffectiveVersion: the binary version plus the versions it emulates and
//! stays compatible with. Each part is swapped atomically.

use std::fmt;
use std::sync::Arc;

use arc_swap::ArcSwap;

use crate::errors::VersionError;

use super::version::{parse_release, Version};

/// Release where emulation was introduced; emulation cannot go below it.
const EMULATION_FLOOR: Version = Version::new(1, 31);

pub struct EffectiveVersion {
    binary: ArcSwap<semver::Version>,
    /// Only major and minor are kept. The binary's pre-release tag is
    /// re-attached on read so alpha builds keep serving expiring APIs.
    emulation: ArcSwap<Version>,
    min_compatibility: ArcSwap<Version>,
}

impl EffectiveVersion {
    /// Emulation defaults to the binary version, min-compatibility to one minor earlier.
    pub fn new(binary: &str) -> Result<Self, VersionError> {
        let binary = parse_release(binary)?;
        let short = Version::from(&binary);
        Ok(Self {
            binary: ArcSwap::from_pointee(binary),
            emulation: ArcSwap::from_pointee(short),
            min_compatibility: ArcSwap::from_pointee(short.subtract_minor(1)),
        })
    }

    pub fn binary_version(&self) -> semver::Version {
        (**self.binary.load()).clone()
    }

    /// Emulation version carrying the binary's pre-release tag.
    pub fn emulation_version(&self) -> semver::Version {
        let emulation = **self.emulation.load();
        let mut v = semver::Version::new(emulation.major, emulation.minor, 0);
        v.pre = self.binary.load().pre.clone();
        v
    }

    pub fn min_compatibility_version(&self) -> Version {
        **self.min_compatibility.load()
    }

    pub fn set(&self, binary: semver::Version, emulation: Version, min_compatibility: Version) {
        self.binary.store(Arc::new(binary));
        self.emulation.store(Arc::new(emulation));
        self.min_compatibility.store(Arc::new(min_compatibility));
    }

    pub fn set_emulation_version(&self, emulation: Version) {
        self.emulation.store(Arc::new(emulation));
    }

    pub fn set_min_compatibility_version(&self, min_compatibility: Version) {
        self.min_compatibility.store(Arc::new(min_compatibility));
    }

    pub fn equal_to(&self, other: &EffectiveVersion) -> bool {
        self.binary_version() == other.binary_version()
            && self.emulation_version() == other.emulation_version()
            && self.min_compatibility_version() == other.min_compatibility_version()
    }

    /// Only major and minor are checked.
    ///
    /// Emulation must lie in `[binary - 1, binary]` and min-compatibility
    /// must be exactly `binary - 1`.
    pub fn validate(&self) -> Vec<VersionError> {
        let mut errors = Vec::new();
        let binary = Version::from(&self.binary_version());
        let emulation = **self.emulation.load();
        let min_compat = self.min_compatibility_version();

        let max_emulation = binary;
        let min_emulation = if binary == EMULATION_FLOOR {
            EMULATION_FLOOR
        } else {
            binary.subtract_minor(1)
        };
        if emulation > max_emulation || emulation < min_emulation {
            errors.push(VersionError::OutOfRange {
                field: "emulation",
                version: emulation.to_string(),
                min: min_emulation.to_string(),
                max: max_emulation.to_string(),
            });
        }

        let expected_compat = binary.subtract_minor(1);
        if min_compat != expected_compat {
            errors.push(VersionError::OutOfRange {
                field: "minCompatibility",
                version: min_compat.to_string(),
                min: expected_compat.to_string(),
                max: expected_compat.to_string(),
            });
        }
        errors
    }
}

impl fmt::Display for EffectiveVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{{BinaryVersion: {}, EmulationVersion: {}, MinCompatibilityVersion: {}}}",
            self.binary_version(),
            self.emulation_version(),
            self.min_compatibility_version()
        )
    }
}

impl fmt::Debug for EffectiveVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(self, f)
    }
}
