//! Escape hatches for serving APIs that reached their removal release.

use serde::{Deserialize, Serialize};

use crate::errors::EvaluatorError;

use super::parse_bool;

/// Set to see on an alpha build what will be removed once the release is tagged beta.
pub const STRICT_REMOVED_API_HANDLING_IN_ALPHA_ENV: &str =
    "KUBE_APISERVER_STRICT_REMOVED_API_HANDLING_IN_ALPHA";

/// Short-term escape hatch: keep serving APIs for one release past their removal.
pub const SERVE_REMOVED_APIS_FOR_ONE_RELEASE_ENV: &str =
    "KUBE_APISERVER_SERVE_REMOVED_APIS_FOR_ONE_RELEASE";

/// Removal-handling toggles for the resource expiration evaluator.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExpirationConfig {
    /// Stop serving removed APIs even on alpha builds. Default: false.
    pub strict_removed_handling_in_alpha: Option<bool>,
    /// Serve APIs removed in the current release for one more release. Default: false.
    pub serve_removed_apis_one_more_release: Option<bool>,
}

impl ExpirationConfig {
    /// Read both toggles from the process environment.
    pub fn from_env() -> Result<Self, EvaluatorError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Read both toggles through `lookup`. Unset variables leave the toggle unset;
    /// set but malformed ones are an error.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, EvaluatorError>
    where
        F: Fn(&str) -> Option<String>,
    {
        Ok(Self {
            strict_removed_handling_in_alpha: lookup_bool(
                &lookup,
                STRICT_REMOVED_API_HANDLING_IN_ALPHA_ENV,
            )?,
            serve_removed_apis_one_more_release: lookup_bool(
                &lookup,
                SERVE_REMOVED_APIS_FOR_ONE_RELEASE_ENV,
            )?,
        })
    }

    pub fn effective_strict_removed_handling_in_alpha(&self) -> bool {
        self.strict_removed_handling_in_alpha.unwrap_or(false)
    }

    pub fn effective_serve_removed_apis_one_more_release(&self) -> bool {
        self.serve_removed_apis_one_more_release.unwrap_or(false)
    }
}

fn lookup_bool<F>(lookup: &F, var: &str) -> Result<Option<bool>, EvaluatorError>
where
    F: Fn(&str) -> Option<String>,
{
    match lookup(var) {
        None => Ok(None),
        Some(value) => parse_bool(&value)
            .map(Some)
            .map_err(|_| EvaluatorError::InvalidEnvBool {
                var: var.to_string(),
                value,
            }),
    }
}
