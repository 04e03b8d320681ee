//! Lifecycle metadata and the collaborators that supply it.

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

use crate::errors::ConversionError;
use crate::resource::GroupVersion;
use crate::version::Version;

/// Release window of a versioned kind. `None` means unbounded in that direction.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiLifecycle {
    pub introduced: Option<Version>,
    pub removed: Option<Version>,
}

impl ApiLifecycle {
    pub const UNBOUNDED: ApiLifecycle = ApiLifecycle {
        introduced: None,
        removed: None,
    };

    pub fn introduced_in(major: u64, minor: u64) -> Self {
        Self {
            introduced: Some(Version::new(major, minor)),
            removed: None,
        }
    }

    pub fn removed_in(major: u64, minor: u64) -> Self {
        Self {
            introduced: None,
            removed: Some(Version::new(major, minor)),
        }
    }

    pub fn between(introduced: Version, removed: Version) -> Self {
        Self {
            introduced: Some(introduced),
            removed: Some(removed),
        }
    }
}

/// A served resource's storage, as far as expiration is concerned.
pub trait ResourceStorage {
    /// Kind of the internal object this storage serves.
    fn kind(&self) -> &str;

    /// Group-version to convert to instead of the one the storage is
    /// registered under (scale subresources use this).
    fn group_version_override(&self, _gv: &GroupVersion) -> Option<GroupVersion> {
        None
    }
}

/// The versioned form of a kind, with its lifecycle probed once at conversion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VersionedObject {
    pub group_version: GroupVersion,
    pub kind: String,
    pub lifecycle: ApiLifecycle,
}

/// Converts an internal kind to its representation at a group-version.
pub trait ObjectConverter {
    fn convert_to_version(
        &self,
        kind: &str,
        target: &GroupVersion,
    ) -> Result<VersionedObject, ConversionError>;
}

/// Table of known (kind, group-version) pairs and their lifecycles.
#[derive(Debug, Clone, Default)]
pub struct StaticObjectConverter {
    kinds: FxHashMap<(String, GroupVersion), ApiLifecycle>,
}

impl StaticObjectConverter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_kind(
        mut self,
        kind: impl Into<String>,
        gv: GroupVersion,
        lifecycle: ApiLifecycle,
    ) -> Self {
        self.kinds.insert((kind.into(), gv), lifecycle);
        self
    }
}

impl ObjectConverter for StaticObjectConverter {
    fn convert_to_version(
        &self,
        kind: &str,
        target: &GroupVersion,
    ) -> Result<VersionedObject, ConversionError> {
        match self.kinds.get(&(kind.to_string(), target.clone())) {
            Some(lifecycle) => Ok(VersionedObject {
                group_version: target.clone(),
                kind: kind.to_string(),
                lifecycle: *lifecycle,
            }),
            None => Err(ConversionError {
                kind: kind.to_string(),
                target: target.to_string(),
                reason: "kind is not registered for this group version".to_string(),
            }),
        }
    }
}
