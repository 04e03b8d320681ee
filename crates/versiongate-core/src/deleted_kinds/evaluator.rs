//! ResourceExpirationEvaluator: decides whether a served kind has expired.
//!
//! Immutable once built; a pure function of the compatibility version and
//! the two escape-hatch toggles.

use std::collections::{BTreeMap, BTreeSet};

use tracing::{info, warn};

use crate::config::ExpirationConfig;
use crate::errors::EvaluatorError;
use crate::resource::GroupVersion;
use crate::version::{parse_release, Version};

use super::lifecycle::{ObjectConverter, ResourceStorage};

/// API version → resource name → storage, pruned in place.
pub type VersionedStorageMap<S> = BTreeMap<String, BTreeMap<String, S>>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResourceExpirationEvaluator {
    compatibility_version: Version,
    is_alpha: bool,
    /// Mostly for CI: shows on an alpha build what goes away once beta is tagged.
    strict_removed_handling_in_alpha: bool,
    /// Short-term escape hatch for cluster admins.
    serve_removed_apis_one_more_release: bool,
}

impl ResourceExpirationEvaluator {
    /// Build from a git-style release string (`v1.20.0-alpha.0.62+...`).
    /// The build counts as alpha when the string mentions `alpha`.
    pub fn new(
        compatibility_git_version: &str,
        config: &ExpirationConfig,
    ) -> Result<Self, EvaluatorError> {
        let release = parse_release(compatibility_git_version)?;
        let evaluator = Self {
            compatibility_version: Version::from(&release),
            is_alpha: compatibility_git_version.contains("alpha"),
            strict_removed_handling_in_alpha: config.effective_strict_removed_handling_in_alpha(),
            serve_removed_apis_one_more_release: config
                .effective_serve_removed_apis_one_more_release(),
        };
        info!(
            compatibility_git_version,
            compatibility_version = %evaluator.compatibility_version,
            is_alpha = evaluator.is_alpha,
            "resource expiration evaluator created"
        );
        Ok(evaluator)
    }

    /// Same as [`Self::new`], with the toggles read from the process environment.
    pub fn from_env(compatibility_git_version: &str) -> Result<Self, EvaluatorError> {
        let config = ExpirationConfig::from_env()?;
        Self::new(compatibility_git_version, &config)
    }

    pub fn from_parts(
        compatibility_version: Version,
        is_alpha: bool,
        strict_removed_handling_in_alpha: bool,
        serve_removed_apis_one_more_release: bool,
    ) -> Self {
        Self {
            compatibility_version,
            is_alpha,
            strict_removed_handling_in_alpha,
            serve_removed_apis_one_more_release,
        }
    }

    pub fn compatibility_version(&self) -> Version {
        self.compatibility_version
    }

    pub fn is_alpha(&self) -> bool {
        self.is_alpha
    }

    pub fn strict_removed_handling_in_alpha(&self) -> bool {
        self.strict_removed_handling_in_alpha
    }

    pub fn serve_removed_apis_one_more_release(&self) -> bool {
        self.serve_removed_apis_one_more_release
    }

    /// Whether a kind removed at `major.minor` is still served.
    pub fn should_serve_for_version(&self, major: u64, minor: u64) -> bool {
        let removed = Version::new(major, minor);
        if self.compatibility_version < removed {
            return true;
        }
        if self.compatibility_version > removed {
            return false;
        }
        // Removed in this very release.
        if self.is_alpha && self.strict_removed_handling_in_alpha {
            return false;
        }
        if self.is_alpha {
            return true;
        }
        self.serve_removed_apis_one_more_release
    }

    /// Whether the storage registered for `resource_name` under `gv` is served.
    /// A conversion failure is logged and counts as "do not serve".
    pub fn should_serve<S>(
        &self,
        gv: &GroupVersion,
        converter: &dyn ObjectConverter,
        storage: &S,
        resource_name: &str,
    ) -> bool
    where
        S: ResourceStorage + ?Sized,
    {
        let target = storage
            .group_version_override(gv)
            .unwrap_or_else(|| gv.clone());

        let versioned = match converter.convert_to_version(storage.kind(), &target) {
            Ok(versioned) => versioned,
            Err(e) => {
                warn!(
                    group_version = %gv,
                    resource = resource_name,
                    error = %e,
                    "conversion failed, not serving resource"
                );
                return false;
            }
        };

        if let Some(introduced) = versioned.lifecycle.introduced {
            if !self.compatibility_version.is_unset() && introduced > self.compatibility_version {
                info!(
                    group_version = %gv,
                    resource = resource_name,
                    introduced = %introduced,
                    compatibility_version = %self.compatibility_version,
                    "resource introduced after compatibility version"
                );
                return false;
            }
        }

        match versioned.lifecycle.removed {
            None => true,
            Some(removed) => self.should_serve_for_version(removed.major, removed.minor),
        }
    }

    /// Remove every expired resource (with its subresources) from
    /// `storage_map`, then every API version left without resources.
    pub fn remove_deleted_kinds<S>(
        &self,
        group_name: &str,
        converter: &dyn ObjectConverter,
        storage_map: &mut VersionedStorageMap<S>,
    ) where
        S: ResourceStorage,
    {
        let mut versions_to_remove = Vec::new();

        for (api_version, resources) in storage_map.iter_mut() {
            let gv = GroupVersion::new(group_name, api_version.clone());
            let expired: BTreeSet<String> = resources
                .iter()
                .filter(|(name, storage)| !self.should_serve(&gv, converter, *storage, name))
                .map(|(name, _)| name.clone())
                .collect();

            resources.retain(|name, _| {
                if !is_resource_or_subresource_of(&expired, name) {
                    return true;
                }
                info!(
                    resource = %name,
                    version = %api_version,
                    group = group_name,
                    "removing resource because it is time to stop serving it per API lifecycle"
                );
                false
            });

            if resources.is_empty() {
                versions_to_remove.push(api_version.clone());
            }
        }

        for api_version in versions_to_remove {
            info!(
                version = %api_version,
                group = group_name,
                "removing version because it has no resources left per API lifecycle"
            );
            storage_map.remove(&api_version);
        }
    }
}

/// Subresources go with their parent: removing `foo` removes `foo/scale`.
fn is_resource_or_subresource_of(expired: &BTreeSet<String>, resource_name: &str) -> bool {
    expired.iter().any(|parent| {
        resource_name == parent
            || resource_name
                .strip_prefix(parent.as_str())
                .is_some_and(|rest| rest.starts_with('/'))
    })
}
