//! FeatureGate: registry of versioned feature specs plus explicit overrides.
//!
//! Writes are serialized by a single mutex and publish brand-new maps through
//! `ArcSwap`. Reads never take the lock: they load whichever snapshot is
//! current, which is always complete but may trail an in-flight write.

use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

use arc_swap::ArcSwap;
use parking_lot::Mutex;
use rustc_hash::FxHashMap;
use tracing::{debug, warn};

use crate::config::parse_bool;
use crate::errors::{FeatureGateError, FeatureGateResult};
use crate::version::{parse_release, Version, VersionInfoProvider};

use super::spec::{FeatureSpec, PreRelease, VersionedSpecs};

/// Name of the command-line flag exposing the gate.
pub const FLAG_NAME: &str = "feature-gates";

/// Global toggle for alpha features. Explicit per-feature values win:
/// `AllAlpha=true,NewFeature=false` leaves `NewFeature` disabled.
pub const ALL_ALPHA_GATE: &str = "AllAlpha";

/// Global toggle for beta features, with the same precedence as [`ALL_ALPHA_GATE`].
pub const ALL_BETA_GATE: &str = "AllBeta";

const DEFAULT_GATE_NAME: &str = "default";

type KnownMap = FxHashMap<String, VersionedSpecs>;
type EnabledMap = FxHashMap<String, bool>;

/// Back-fills enablement for the features a special gate controls.
type SpecialFn = fn(&KnownMap, &mut EnabledMap, bool, Version);

/// Shared by every gate and every deep copy.
static SPECIAL_FEATURES: &[(&str, SpecialFn)] = &[
    (ALL_ALPHA_GATE, set_unset_alpha_gates),
    (ALL_BETA_GATE, set_unset_beta_gates),
];

fn special_feature(name: &str) -> Option<SpecialFn> {
    SPECIAL_FEATURES
        .iter()
        .find(|(key, _)| *key == name)
        .map(|(_, f)| *f)
}

fn is_special(name: &str) -> bool {
    special_feature(name).is_some()
}

fn set_unset_alpha_gates(known: &KnownMap, enabled: &mut EnabledMap, val: bool, cver: Version) {
    set_unset_gates_at_stage(known, enabled, val, cver, PreRelease::Alpha);
}

fn set_unset_beta_gates(known: &KnownMap, enabled: &mut EnabledMap, val: bool, cver: Version) {
    set_unset_gates_at_stage(known, enabled, val, cver, PreRelease::Beta);
}

fn set_unset_gates_at_stage(
    known: &KnownMap,
    enabled: &mut EnabledMap,
    val: bool,
    cver: Version,
    stage: PreRelease,
) {
    for (name, specs) in known {
        if is_special(name) || enabled.contains_key(name) {
            continue;
        }
        let current = specs.current(cver);
        if current.pre_release != stage {
            continue;
        }
        // A locked feature keeps its default no matter what the toggle says.
        if current.lock_to_default && current.default != val {
            continue;
        }
        enabled.insert(name.clone(), val);
    }
}

fn default_known() -> KnownMap {
    let mut known = KnownMap::default();
    known.insert(
        ALL_ALPHA_GATE.to_string(),
        VersionedSpecs::single(FeatureSpec::new(false, PreRelease::Alpha)),
    );
    known.insert(
        ALL_BETA_GATE.to_string(),
        VersionedSpecs::single(FeatureSpec::new(false, PreRelease::Beta)),
    );
    known
}

/// Thread-safe, copy-on-write feature gate.
pub struct FeatureGate {
    name: String,
    /// Guards every write path and the `closed` flag.
    lock: Mutex<bool>,
    known: ArcSwap<KnownMap>,
    enabled: ArcSwap<EnabledMap>,
    compatibility_version: ArcSwap<Version>,
    binary_version: Version,
}

impl FeatureGate {
    /// New gate whose compatibility version starts equal to the binary version.
    pub fn new(binary_version: Version) -> Self {
        Self::with_versions(binary_version, binary_version)
    }

    pub fn with_versions(binary_version: Version, compatibility_version: Version) -> Self {
        Self {
            name: DEFAULT_GATE_NAME.to_string(),
            lock: Mutex::new(false),
            known: ArcSwap::from_pointee(default_known()),
            enabled: ArcSwap::from_pointee(EnabledMap::default()),
            compatibility_version: ArcSwap::from_pointee(compatibility_version),
            binary_version,
        }
    }

    /// Gate for the running binary, as reported by `provider`.
    pub fn from_provider(provider: &dyn VersionInfoProvider) -> FeatureGateResult<Self> {
        let release = parse_release(&provider.git_version())?;
        Ok(Self::new(Version::from(&release)))
    }

    /// Name used in error messages.
    pub fn named(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn binary_version(&self) -> Version {
        self.binary_version
    }

    pub fn compatibility_version(&self) -> Version {
        **self.compatibility_version.load()
    }

    /// Changes which spec resolves as current for later lookups and sets.
    /// Overrides already applied are not re-validated.
    pub fn set_compatibility_version(&self, version: Version) {
        let _guard = self.lock.lock();
        self.compatibility_version.store(Arc::new(version));
    }

    /// Whether `add_flag` has closed the gate to new registrations.
    pub fn is_closed(&self) -> bool {
        *self.lock.lock()
    }

    pub(crate) fn close(&self) {
        *self.lock.lock() = true;
    }

    /// Register features whose spec applies from the binary version on.
    pub fn add<I, K>(&self, features: I) -> FeatureGateResult<()>
    where
        I: IntoIterator<Item = (K, FeatureSpec)>,
        K: Into<String>,
    {
        let binary = self.binary_version;
        self.add_versioned(features.into_iter().map(|(name, mut spec)| {
            spec.version = binary;
            (name, VersionedSpecs::single(spec))
        }))
    }

    /// Register features with their full spec history.
    ///
    /// Re-adding an identical history is a no-op; any difference is an error.
    /// Nothing is committed when an error is returned.
    pub fn add_versioned<I, K>(&self, features: I) -> FeatureGateResult<()>
    where
        I: IntoIterator<Item = (K, VersionedSpecs)>,
        K: Into<String>,
    {
        let closed = self.lock.lock();
        if *closed {
            return Err(FeatureGateError::RegistryClosed);
        }

        let mut known = KnownMap::clone(&self.known.load());
        for (name, specs) in features {
            let name = name.into();
            if let Some(version) = specs.duplicate_version() {
                return Err(FeatureGateError::DuplicateSpecVersion {
                    name,
                    version: version.to_string(),
                });
            }
            if let Some(existing) = known.get(&name) {
                if *existing == specs {
                    continue;
                }
                return Err(FeatureGateError::ConflictingSpec {
                    existing: existing.to_string(),
                    name,
                });
            }
            known.insert(name, specs);
        }

        self.known.store(Arc::new(known));
        Ok(())
    }

    /// Parse `key1=value1,key2=value2,...` and apply it like [`Self::set_from_map`].
    pub fn set(&self, value: &str) -> FeatureGateResult<()> {
        let mut overrides = BTreeMap::new();
        for pair in value.split(',') {
            if pair.is_empty() {
                continue;
            }
            let mut parts = pair.splitn(2, '=');
            let key = parts.next().unwrap_or_default().trim().to_string();
            let Some(raw) = parts.next() else {
                return Err(FeatureGateError::MissingValue { key });
            };
            let raw = raw.trim();
            let flag = parse_bool(raw).map_err(|reason| FeatureGateError::InvalidBool {
                key: key.clone(),
                value: raw.to_string(),
                reason,
            })?;
            overrides.insert(key, flag);
        }
        self.set_from_map(overrides)
    }

    /// Record explicit overrides.
    ///
    /// Keys are validated in sorted order and nothing is committed if any of
    /// them fails. Explicit keys are applied before `AllAlpha`/`AllBeta`
    /// back-fill, so the toggles only ever fill gaps regardless of input order.
    pub fn set_from_map<I, K>(&self, overrides: I) -> FeatureGateResult<()>
    where
        I: IntoIterator<Item = (K, bool)>,
        K: Into<String>,
    {
        let overrides: BTreeMap<String, bool> = overrides
            .into_iter()
            .map(|(k, v)| (k.into(), v))
            .collect();

        let _guard = self.lock.lock();
        let known = self.known.load_full();
        let cver = self.compatibility_version();
        let mut enabled = EnabledMap::clone(&self.enabled.load());

        for (key, &value) in &overrides {
            let Some(specs) = known.get(key) else {
                return Err(FeatureGateError::UnknownFeature { name: key.clone() });
            };
            let current = specs.current(cver);
            if current.lock_to_default && current.default != value {
                return Err(FeatureGateError::LockedToDefault {
                    name: key.clone(),
                    requested: value,
                    locked_to: current.default,
                });
            }
        }

        let (specials, explicit): (Vec<_>, Vec<_>) =
            overrides.iter().partition(|(key, _)| is_special(key));

        for (key, &value) in explicit.into_iter().chain(specials) {
            enabled.insert(key.clone(), value);
            if let Some(fill) = special_feature(key) {
                fill(&known, &mut enabled, value, cver);
            }

            match known[key].current(cver).pre_release {
                PreRelease::Deprecated => warn!(
                    feature = %key,
                    value,
                    "Setting deprecated feature gate. It will be removed in a future release."
                ),
                PreRelease::Ga => warn!(
                    feature = %key,
                    value,
                    "Setting GA feature gate. It will be removed in a future release."
                ),
                _ => {}
            }
        }

        self.enabled.store(Arc::new(enabled));
        debug!(gate = %self.name, feature_gates = %self, "feature gates updated");
        Ok(())
    }

    /// Whether `key` is enabled: explicit override first, then the default of
    /// the spec current at the compatibility version.
    ///
    /// # Panics
    /// If `key` was never registered. Callers must only query their own features.
    pub fn enabled(&self, key: &str) -> bool {
        if let Some(&value) = self.enabled.load().get(key) {
            return value;
        }
        if let Some(specs) = self.known.load().get(key) {
            return specs.current(self.compatibility_version()).default;
        }
        panic!(
            "{}",
            FeatureGateError::NotRegistered {
                name: key.to_string(),
                gate: self.name.clone(),
            }
        );
    }

    /// Stage and `major.minor` of the spec current for `key`.
    pub fn stability_level(&self, key: &str) -> FeatureGateResult<(PreRelease, String)> {
        match self.known.load().get(key) {
            Some(specs) => {
                let current = specs.current(self.compatibility_version());
                Ok((current.pre_release, current.version.to_string()))
            }
            None => Err(FeatureGateError::NotRegistered {
                name: key.to_string(),
                gate: self.name.clone(),
            }),
        }
    }

    /// Sorted `name=true|false (STAGE - default=X)` lines for operator help.
    /// GA, deprecated, and pre-alpha features are hidden.
    pub fn known_features(&self) -> Vec<String> {
        let cver = self.compatibility_version();
        let mut known: Vec<String> = self
            .known
            .load()
            .iter()
            .filter_map(|(name, specs)| {
                let spec = if is_special(name) {
                    specs.as_slice().first().copied()?
                } else {
                    let current = specs.current(cver);
                    if matches!(
                        current.pre_release,
                        PreRelease::Ga | PreRelease::Deprecated | PreRelease::PreAlpha
                    ) {
                        return None;
                    }
                    current
                };
                Some(format!(
                    "{}=true|false ({} - default={})",
                    name, spec.pre_release, spec.default
                ))
            })
            .collect();
        known.sort();
        known
    }

    /// Current spec of every known feature.
    pub fn get_all(&self) -> FxHashMap<String, FeatureSpec> {
        let cver = self.compatibility_version();
        self.known
            .load()
            .iter()
            .map(|(name, specs)| (name.clone(), specs.current(cver)))
            .collect()
    }

    /// Full spec history of every known feature.
    pub fn get_all_versioned(&self) -> FxHashMap<String, VersionedSpecs> {
        KnownMap::clone(&self.known.load())
    }

    /// Independent gate with the same specs, overrides, versions, and closed state.
    pub fn deep_copy(&self) -> FeatureGate {
        let closed = self.lock.lock();
        FeatureGate {
            name: self.name.clone(),
            lock: Mutex::new(*closed),
            known: ArcSwap::from_pointee(KnownMap::clone(&self.known.load())),
            enabled: ArcSwap::from_pointee(EnabledMap::clone(&self.enabled.load())),
            compatibility_version: ArcSwap::from_pointee(self.compatibility_version()),
            binary_version: self.binary_version,
        }
    }
}

/// Explicit overrides as sorted `key=value` pairs joined by commas.
impl fmt::Display for FeatureGate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut pairs: Vec<String> = self
            .enabled
            .load()
            .iter()
            .map(|(k, v)| format!("{}={}", k, v))
            .collect();
        pairs.sort();
        f.write_str(&pairs.join(","))
    }
}

impl fmt::Debug for FeatureGate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FeatureGate")
            .field("name", &self.name)
            .field("binary_version", &self.binary_version)
            .field("compatibility_version", &self.compatibility_version())
            .field("enabled", &self.to_string())
            .finish()
    }
}
