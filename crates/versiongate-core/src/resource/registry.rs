//! Lifecycle bounds for group-versions and resources.

use rustc_hash::FxHashMap;

use crate::version::Version;

use super::schema::{GroupVersion, GroupVersionResource};

/// Answers when a group-version (or one of its resources) became available
/// and when it stops being served. `None` means unbounded in that direction.
pub trait GroupVersionRegistry: Send + Sync {
    fn version_introduced(&self, gv: &GroupVersion) -> Option<Version>;

    fn version_removed(&self, gv: &GroupVersion) -> Option<Version>;

    /// Defaults to the bound of the resource's group-version.
    fn resource_introduced(&self, gvr: &GroupVersionResource) -> Option<Version> {
        self.version_introduced(&gvr.group_version())
    }

    /// Defaults to the bound of the resource's group-version.
    fn resource_removed(&self, gvr: &GroupVersionResource) -> Option<Version> {
        self.version_removed(&gvr.group_version())
    }
}

/// Table-driven registry, filled in at startup.
#[derive(Debug, Clone, Default)]
pub struct StaticGroupVersionRegistry {
    versions: FxHashMap<GroupVersion, (Option<Version>, Option<Version>)>,
    resources: FxHashMap<GroupVersionResource, (Option<Version>, Option<Version>)>,
}

impl StaticGroupVersionRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_version(
        mut self,
        gv: GroupVersion,
        introduced: Option<Version>,
        removed: Option<Version>,
    ) -> Self {
        self.versions.insert(gv, (introduced, removed));
        self
    }

    pub fn with_resource(
        mut self,
        gvr: GroupVersionResource,
        introduced: Option<Version>,
        removed: Option<Version>,
    ) -> Self {
        self.resources.insert(gvr, (introduced, removed));
        self
    }
}

impl GroupVersionRegistry for StaticGroupVersionRegistry {
    fn version_introduced(&self, gv: &GroupVersion) -> Option<Version> {
        self.versions.get(gv).and_then(|(introduced, _)| *introduced)
    }

    fn version_removed(&self, gv: &GroupVersion) -> Option<Version> {
        self.versions.get(gv).and_then(|(_, removed)| *removed)
    }

    fn resource_introduced(&self, gvr: &GroupVersionResource) -> Option<Version> {
        match self.resources.get(gvr) {
            Some((introduced, _)) => *introduced,
            None => self.version_introduced(&gvr.group_version()),
        }
    }

    fn resource_removed(&self, gvr: &GroupVersionResource) -> Option<Version> {
        match self.resources.get(gvr) {
            Some((_, removed)) => *removed,
            None => self.version_removed(&gvr.group_version()),
        }
    }
}
