//! Feature enablement gauges.

use std::collections::BTreeMap;

use parking_lot::Mutex;

use super::gate::FeatureGate;

/// Receives one gauge per feature, keyed by (name, stage), valued 0 or 1.
pub trait FeatureMetricsSink: Send + Sync {
    fn record_feature_info(&self, name: &str, stage: &str, enabled: bool);
}

/// Keeps the last recorded value of every gauge in memory.
#[derive(Debug, Default)]
pub struct InMemoryFeatureMetrics {
    gauges: Mutex<BTreeMap<(String, String), u8>>,
}

impl InMemoryFeatureMetrics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn gauge(&self, name: &str, stage: &str) -> Option<u8> {
        self.gauges
            .lock()
            .get(&(name.to_string(), stage.to_string()))
            .copied()
    }

    pub fn snapshot(&self) -> BTreeMap<(String, String), u8> {
        self.gauges.lock().clone()
    }

    pub fn len(&self) -> usize {
        self.gauges.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.gauges.lock().is_empty()
    }
}

impl FeatureMetricsSink for InMemoryFeatureMetrics {
    fn record_feature_info(&self, name: &str, stage: &str, enabled: bool) {
        self.gauges
            .lock()
            .insert((name.to_string(), stage.to_string()), u8::from(enabled));
    }
}

impl FeatureGate {
    /// Export every known feature at its current spec to `sink`.
    pub fn add_metrics(&self, sink: &dyn FeatureMetricsSink) {
        for (name, spec) in self.get_all() {
            sink.record_feature_info(&name, spec.pre_release.as_str(), self.enabled(&name));
        }
    }
}
