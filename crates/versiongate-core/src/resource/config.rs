//! ResourceConfig: which group-versions and resources are served.
//!
//! An explicit resource setting always wins over its group-version setting.
//! Enabling or disabling a whole group-version clears the resource settings
//! inside it. Enabling something outside its lifecycle window is downgraded
//! to disabled with a warning, never an error.

use std::sync::Arc;

use rustc_hash::FxHashMap;
use tracing::warn;

use crate::errors::VersionError;
use crate::version::{parse_release, Version, VersionInfoProvider};

use super::registry::GroupVersionRegistry;
use super::schema::{GroupVersion, GroupVersionResource};

/// Read side of a resource configuration.
pub trait ResourceConfigSource {
    fn resource_enabled(&self, resource: &GroupVersionResource) -> bool;

    fn any_resource_for_group_enabled(&self, group: &str) -> bool;

    fn group_version_configs(&self) -> &FxHashMap<GroupVersion, bool>;
}

pub struct ResourceConfig {
    group_version_configs: FxHashMap<GroupVersion, bool>,
    resource_configs: FxHashMap<GroupVersionResource, bool>,
    compatibility_version: Version,
    registry: Option<Arc<dyn GroupVersionRegistry>>,
}

impl ResourceConfig {
    /// Without a registry every group-version is always available.
    pub fn new(
        compatibility_version: Version,
        registry: Option<Arc<dyn GroupVersionRegistry>>,
    ) -> Self {
        Self {
            group_version_configs: FxHashMap::default(),
            resource_configs: FxHashMap::default(),
            compatibility_version,
            registry,
        }
    }

    /// Parse `compatibility_version`; when it is absent or empty, fall back
    /// to the running binary's version.
    pub fn from_version_string(
        compatibility_version: Option<&str>,
        registry: Option<Arc<dyn GroupVersionRegistry>>,
        provider: &dyn VersionInfoProvider,
    ) -> Result<Self, VersionError> {
        let raw = match compatibility_version {
            Some(v) if !v.trim().is_empty() => v.to_string(),
            _ => provider.git_version(),
        };
        let release = parse_release(&raw)?;
        Ok(Self::new(Version::from(&release), registry))
    }

    pub fn compatibility_version(&self) -> Version {
        self.compatibility_version
    }

    /// Disable every already-configured group-version `matcher` accepts.
    pub fn disable_matching_versions<F>(&mut self, matcher: F)
    where
        F: Fn(&GroupVersion) -> bool,
    {
        let matched: Vec<GroupVersion> = self
            .group_version_configs
            .keys()
            .filter(|&gv| matcher(gv))
            .cloned()
            .collect();
        for gv in matched {
            self.group_version_configs.insert(gv.clone(), false);
            self.remove_resource_preferences(&gv);
        }
    }

    /// Enable every already-configured group-version `matcher` accepts and
    /// whose lifecycle window contains the compatibility version.
    pub fn enable_matching_versions<F>(&mut self, matcher: F)
    where
        F: Fn(&GroupVersion) -> bool,
    {
        let matched: Vec<GroupVersion> = self
            .group_version_configs
            .keys()
            .filter(|&gv| matcher(gv))
            .cloned()
            .collect();
        for gv in matched {
            if !self.version_available(&gv) {
                warn!(
                    group_version = %gv,
                    compatibility_version = %self.compatibility_version,
                    "group version cannot be enabled due to its lifecycle"
                );
                continue;
            }
            self.group_version_configs.insert(gv.clone(), true);
            self.remove_resource_preferences(&gv);
        }
    }

    pub fn disable_versions(&mut self, versions: &[GroupVersion]) {
        for gv in versions {
            self.group_version_configs.insert(gv.clone(), false);
            self.remove_resource_preferences(gv);
        }
    }

    /// Enable whole group-versions. One outside its lifecycle window is
    /// recorded as disabled instead.
    pub fn enable_versions(&mut self, versions: &[GroupVersion]) {
        for gv in versions {
            let available = self.version_available(gv);
            if !available {
                warn!(
                    group_version = %gv,
                    compatibility_version = %self.compatibility_version,
                    "group version cannot be enabled due to its lifecycle, disabling it"
                );
            }
            self.group_version_configs.insert(gv.clone(), available);
            self.remove_resource_preferences(gv);
        }
    }

    pub fn disable_resources(&mut self, resources: &[GroupVersionResource]) {
        for gvr in resources {
            self.resource_configs.insert(gvr.clone(), false);
        }
    }

    /// Enable individual resources. One outside its lifecycle window is
    /// recorded as disabled instead.
    pub fn enable_resources(&mut self, resources: &[GroupVersionResource]) {
        for gvr in resources {
            let available = self.resource_available(gvr);
            if !available {
                warn!(
                    resource = %gvr,
                    compatibility_version = %self.compatibility_version,
                    "resource cannot be enabled due to its lifecycle, disabling it"
                );
            }
            self.resource_configs.insert(gvr.clone(), available);
        }
    }

    /// Explicit group-version setting; absent counts as disabled.
    fn version_enabled(&self, gv: &GroupVersion) -> bool {
        self.group_version_configs.get(gv).copied().unwrap_or(false)
    }

    fn remove_resource_preferences(&mut self, gv: &GroupVersion) {
        self.resource_configs
            .retain(|gvr, _| gvr.group != gv.group || gvr.version != gv.version);
    }

    fn version_available(&self, gv: &GroupVersion) -> bool {
        match &self.registry {
            Some(registry) => self.within_lifecycle(
                registry.version_introduced(gv),
                registry.version_removed(gv),
            ),
            None => true,
        }
    }

    fn resource_available(&self, gvr: &GroupVersionResource) -> bool {
        match &self.registry {
            Some(registry) => self.within_lifecycle(
                registry.resource_introduced(gvr),
                registry.resource_removed(gvr),
            ),
            None => true,
        }
    }

    /// An unset (0.0) compatibility version ignores lifecycle bounds.
    fn within_lifecycle(&self, introduced: Option<Version>, removed: Option<Version>) -> bool {
        let cver = self.compatibility_version;
        if cver.is_unset() {
            return true;
        }
        if introduced.is_some_and(|introduced| cver < introduced) {
            return false;
        }
        if removed.is_some_and(|removed| cver > removed) {
            return false;
        }
        true
    }
}

impl ResourceConfigSource for ResourceConfig {
    /// Explicit resource setting, else the group-version setting, else enabled.
    fn resource_enabled(&self, resource: &GroupVersionResource) -> bool {
        if let Some(&enabled) = self.resource_configs.get(resource) {
            return enabled;
        }
        self.group_version_configs
            .get(&resource.group_version())
            .copied()
            .unwrap_or(true)
    }

    fn any_resource_for_group_enabled(&self, group: &str) -> bool {
        let version_enabled = self
            .group_version_configs
            .keys()
            .any(|gv| gv.group == group && self.version_enabled(gv));
        version_enabled
            || self
                .resource_configs
                .keys()
                .any(|gvr| gvr.group == group && self.resource_enabled(gvr))
    }

    fn group_version_configs(&self) -> &FxHashMap<GroupVersion, bool> {
        &self.group_version_configs
    }
}

impl std::fmt::Debug for ResourceConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ResourceConfig")
            .field("group_version_configs", &self.group_version_configs)
            .field("resource_configs", &self.resource_configs)
            .field("compatibility_version", &self.compatibility_version)
            .field("has_registry", &self.registry.is_some())
            .finish()
    }
}
