//! `--feature-gates` command-line argument bound to a [`FeatureGate`].

use std::ffi::OsStr;
use std::sync::Arc;

use clap::builder::TypedValueParser;
use clap::error::ErrorKind;
use clap::{Arg, ArgAction, Command};

use super::gate::{FeatureGate, FLAG_NAME};

/// Applies every `--feature-gates` occurrence to the gate as it is parsed.
///
/// The parsed value is the raw `key=value,...` string.
#[derive(Clone)]
pub struct FeatureGatesValueParser {
    gate: Arc<FeatureGate>,
}

impl FeatureGatesValueParser {
    pub fn new(gate: Arc<FeatureGate>) -> Self {
        Self { gate }
    }
}

impl TypedValueParser for FeatureGatesValueParser {
    type Value = String;

    fn parse_ref(
        &self,
        cmd: &Command,
        _arg: Option<&Arg>,
        value: &OsStr,
    ) -> Result<Self::Value, clap::Error> {
        let raw = value.to_str().ok_or_else(|| {
            clap::Error::raw(
                ErrorKind::InvalidUtf8,
                format!("--{} value is not valid UTF-8\n", FLAG_NAME),
            )
            .with_cmd(cmd)
        })?;
        self.gate.set(raw).map_err(|e| {
            clap::Error::raw(
                ErrorKind::ValueValidation,
                format!("invalid argument {:?} for \"--{}\" flag: {}\n", raw, FLAG_NAME, e),
            )
            .with_cmd(cmd)
        })?;
        Ok(raw.to_string())
    }
}

impl FeatureGate {
    /// Close the gate to new registrations and build the `--feature-gates` argument.
    ///
    /// The help text lists the operator-visible features known at this point.
    pub fn add_flag(self: &Arc<Self>) -> Arg {
        self.close();

        let help = format!(
            "A set of key=value pairs that describe feature gates for alpha/experimental features. Options are:\n{}",
            self.known_features().join("\n")
        );
        Arg::new(FLAG_NAME)
            .long(FLAG_NAME)
            .value_name("key=value,...")
            .action(ArgAction::Append)
            .value_parser(FeatureGatesValueParser::new(Arc::clone(self)))
            .help(help)
    }
}
