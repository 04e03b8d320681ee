//! Group-version and resource enablement, with lifecycle-aware downgrades.

use std::sync::Arc;

use versiongate_core::resource::{GroupVersionRegistry, StaticGroupVersionRegistry};
use versiongate_core::version::StaticVersionInfo;
use versiongate_core::{
    GroupVersion, GroupVersionResource, ResourceConfig, ResourceConfigSource, Version,
    VersionError,
};

fn apps_v1() -> GroupVersion {
    GroupVersion::new("apps", "v1")
}

fn apps_v2() -> GroupVersion {
    GroupVersion::new("apps", "v2")
}

fn batch_v1beta1() -> GroupVersion {
    GroupVersion::new("batch", "v1beta1")
}

/// apps/v1 since 1.9, apps/v2 from 1.22, batch/v1beta1 served until 1.21,
/// and apps/v1 daemonsets only until 1.19.
fn registry() -> Arc<dyn GroupVersionRegistry> {
    Arc::new(
        StaticGroupVersionRegistry::new()
            .with_version(apps_v1(), Some(Version::new(1, 9)), None)
            .with_version(apps_v2(), Some(Version::new(1, 22)), None)
            .with_version(batch_v1beta1(), Some(Version::new(1, 8)), Some(Version::new(1, 21)))
            .with_resource(apps_v1().with_resource("daemonsets"), None, Some(Version::new(1, 19))),
    )
}

fn config_at(major: u64, minor: u64) -> ResourceConfig {
    ResourceConfig::new(Version::new(major, minor), Some(registry()))
}

// ============================================================
// Version-level settings
// ============================================================

#[test]
fn enabling_available_version_records_true() {
    let mut cfg = config_at(1, 21);
    cfg.enable_versions(&[apps_v1(), batch_v1beta1()]);
    assert_eq!(cfg.group_version_configs().get(&apps_v1()), Some(&true));
    assert_eq!(cfg.group_version_configs().get(&batch_v1beta1()), Some(&true));
    assert!(cfg.resource_enabled(&apps_v1().with_resource("deployments")));
}

#[test]
fn enabling_version_outside_lifecycle_records_false() {
    let mut cfg = config_at(1, 21);
    cfg.enable_versions(&[apps_v2()]);
    assert_eq!(cfg.group_version_configs().get(&apps_v2()), Some(&false));
    assert!(!cfg.resource_enabled(&apps_v2().with_resource("deployments")));

    let mut cfg = config_at(1, 22);
    cfg.enable_versions(&[batch_v1beta1()]);
    assert_eq!(cfg.group_version_configs().get(&batch_v1beta1()), Some(&false));
}

#[test]
fn disabling_version_clears_its_resource_settings() {
    let mut cfg = config_at(1, 21);
    let deployments = apps_v1().with_resource("deployments");
    cfg.enable_resources(&[deployments.clone()]);
    cfg.disable_versions(&[apps_v1()]);
    assert!(!cfg.resource_enabled(&deployments));
}

#[test]
fn enabling_version_clears_its_resource_settings() {
    let mut cfg = config_at(1, 21);
    let statefulsets = apps_v1().with_resource("statefulsets");
    cfg.disable_resources(&[statefulsets.clone()]);
    assert!(!cfg.resource_enabled(&statefulsets));

    cfg.enable_versions(&[apps_v1()]);
    assert!(cfg.resource_enabled(&statefulsets));
}

#[test]
fn version_settings_leave_other_groups_alone() {
    let mut cfg = config_at(1, 21);
    let cronjobs = batch_v1beta1().with_resource("cronjobs");
    cfg.disable_resources(&[cronjobs.clone()]);
    cfg.enable_versions(&[apps_v1()]);
    assert!(!cfg.resource_enabled(&cronjobs));
}

// ============================================================
// Resource-level settings
// ============================================================

#[test]
fn resource_setting_beats_version_setting() {
    let mut cfg = config_at(1, 21);
    cfg.disable_versions(&[apps_v1()]);
    let deployments = apps_v1().with_resource("deployments");
    cfg.enable_resources(&[deployments.clone()]);

    assert!(cfg.resource_enabled(&deployments));
    assert!(!cfg.resource_enabled(&apps_v1().with_resource("replicasets")));

    cfg.enable_versions(&[apps_v1()]);
    let replicasets = apps_v1().with_resource("replicasets");
    cfg.disable_resources(&[replicasets.clone()]);
    assert!(!cfg.resource_enabled(&replicasets));
    assert!(cfg.resource_enabled(&deployments));
}

#[test]
fn enabling_resource_outside_lifecycle_records_false() {
    let mut cfg = config_at(1, 21);
    cfg.enable_versions(&[apps_v1()]);
    let daemonsets = apps_v1().with_resource("daemonsets");
    cfg.enable_resources(&[daemonsets.clone()]);
    assert!(!cfg.resource_enabled(&daemonsets));

    let mut cfg = config_at(1, 19);
    cfg.enable_resources(&[daemonsets.clone()]);
    assert!(cfg.resource_enabled(&daemonsets));
}

#[test]
fn unconfigured_resource_defaults_to_enabled() {
    let cfg = config_at(1, 21);
    assert!(cfg.resource_enabled(&GroupVersionResource::new("storage", "v1", "csidrivers")));
}

#[test]
fn any_resource_for_group() {
    let mut cfg = config_at(1, 21);
    assert!(!cfg.any_resource_for_group_enabled("apps"));

    cfg.disable_versions(&[apps_v1(), apps_v2()]);
    assert!(!cfg.any_resource_for_group_enabled("apps"));

    cfg.enable_resources(&[apps_v1().with_resource("deployments")]);
    assert!(cfg.any_resource_for_group_enabled("apps"));
    assert!(!cfg.any_resource_for_group_enabled("batch"));

    cfg.enable_versions(&[batch_v1beta1()]);
    assert!(cfg.any_resource_for_group_enabled("batch"));
}

// ============================================================
// Matcher-driven settings
// ============================================================

#[test]
fn matching_versions_only_touch_configured_entries() {
    let mut cfg = config_at(1, 21);
    cfg.disable_versions(&[apps_v1(), apps_v2(), batch_v1beta1()]);

    cfg.enable_matching_versions(|gv| gv.group == "apps");
    assert_eq!(cfg.group_version_configs().get(&apps_v1()), Some(&true));
    // Not yet introduced at 1.21, so it stays disabled.
    assert_eq!(cfg.group_version_configs().get(&apps_v2()), Some(&false));
    assert_eq!(cfg.group_version_configs().get(&batch_v1beta1()), Some(&false));

    cfg.enable_matching_versions(|gv| gv.group == "policy");
    assert!(!cfg.group_version_configs().contains_key(&GroupVersion::new("policy", "v1")));

    cfg.disable_matching_versions(|gv| gv.version == "v1");
    assert_eq!(cfg.group_version_configs().get(&apps_v1()), Some(&false));
    assert_eq!(cfg.group_version_configs().len(), 3);
}

#[test]
fn matching_versions_clear_resource_settings() {
    let mut cfg = config_at(1, 21);
    cfg.enable_versions(&[apps_v1()]);
    let deployments = apps_v1().with_resource("deployments");
    cfg.disable_resources(&[deployments.clone()]);

    cfg.enable_matching_versions(|gv| *gv == apps_v1());
    assert!(cfg.resource_enabled(&deployments));
}

// ============================================================
// Lifecycle edge cases
// ============================================================

#[test]
fn without_registry_everything_is_available() {
    let mut cfg = ResourceConfig::new(Version::new(1, 21), None);
    cfg.enable_versions(&[apps_v2()]);
    assert_eq!(cfg.group_version_configs().get(&apps_v2()), Some(&true));
}

#[test]
fn unset_compatibility_version_ignores_lifecycle() {
    let mut cfg = config_at(0, 0);
    cfg.enable_versions(&[apps_v2(), batch_v1beta1()]);
    assert_eq!(cfg.group_version_configs().get(&apps_v2()), Some(&true));
    assert_eq!(cfg.group_version_configs().get(&batch_v1beta1()), Some(&true));
}

#[test]
fn bounds_are_inclusive() {
    let mut cfg = config_at(1, 22);
    cfg.enable_versions(&[apps_v2()]);
    assert_eq!(cfg.group_version_configs().get(&apps_v2()), Some(&true));

    let mut cfg = config_at(1, 21);
    cfg.enable_versions(&[batch_v1beta1()]);
    assert_eq!(cfg.group_version_configs().get(&batch_v1beta1()), Some(&true));
}

// ============================================================
// Construction
// ============================================================

#[test]
fn compatibility_version_falls_back_to_binary() {
    let binary = StaticVersionInfo::new("v1.30.4");

    let cfg = ResourceConfig::from_version_string(None, None, &binary).unwrap();
    assert_eq!(cfg.compatibility_version(), Version::new(1, 30));

    let cfg = ResourceConfig::from_version_string(Some(""), None, &binary).unwrap();
    assert_eq!(cfg.compatibility_version(), Version::new(1, 30));

    let cfg = ResourceConfig::from_version_string(Some("1.28"), Some(registry()), &binary).unwrap();
    assert_eq!(cfg.compatibility_version(), Version::new(1, 28));

    let err = ResourceConfig::from_version_string(Some("garbage"), None, &binary).unwrap_err();
    assert!(matches!(err, VersionError::InvalidFormat { .. }));
}

#[test]
fn identifiers_render_like_api_paths() {
    assert_eq!(apps_v1().to_string(), "apps/v1");
    assert_eq!(GroupVersion::new("", "v1").to_string(), "v1");
    assert_eq!(
        apps_v1().with_resource("deployments").to_string(),
        "apps/v1, Resource=deployments"
    );
}
