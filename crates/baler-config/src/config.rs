//! Top-level configuration structure for Baler.
//!
//! This module provides the main `BalerConfig` struct and mode merging
//! logic. For file discovery, see the `discovery` module.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::build::BuildOptions;
use crate::error::{ConfigError, Result as ConfigResult};
use crate::mode::BuildMode;

/// The deserialized shape of `baler.toml`.
///
/// Build options are flattened into the top level; `modes` holds per-mode
/// override tables merged by [`BalerConfig::materialize_mode`].
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BalerConfig {
    #[serde(default)]
    pub mode: BuildMode,

    #[serde(flatten)]
    pub build: BuildOptions,

    /// Mode-keyed overrides, e.g. `[modes.production]`.
    #[serde(default)]
    pub modes: HashMap<String, Value>,
}

impl BalerConfig {
    /// Create from a `serde_json::Value` (for programmatic config).
    pub fn from_value(value: Value) -> ConfigResult<Self> {
        serde_json::from_value(value).map_err(|e| ConfigError::InvalidValue {
            field: "config".to_string(),
            message: e.to_string(),
        })
    }

    /// Convert to a `serde_json::Value`.
    pub fn to_value(&self) -> ConfigResult<Value> {
        serde_json::to_value(self).map_err(|e| ConfigError::InvalidValue {
            field: "config".to_string(),
            message: e.to_string(),
        })
    }

    /// Apply the override table for the selected mode.
    ///
    /// `mode` (typically from `--mode`) wins over the file's `mode` key.
    /// The matching `[modes.<mode>]` table, if any, is deep-merged into the
    /// flattened build options: objects merge recursively, arrays and
    /// scalars replace.
    pub fn materialize_mode(mut self, mode: Option<BuildMode>) -> ConfigResult<Self> {
        if let Some(mode) = mode {
            self.mode = mode;
        }

        let Some(overrides) = self.modes.get(&self.mode.to_string()).cloned() else {
            return Ok(self);
        };
        if overrides.is_null() {
            return Ok(self);
        }

        let mut base = serde_json::to_value(&self.build)
            .map_err(|err| ConfigError::InvalidModeOverride(err.to_string()))?;
        merge_values(&mut base, &overrides);
        self.build = serde_json::from_value(base)
            .map_err(|err| ConfigError::InvalidModeOverride(err.to_string()))?;

        Ok(self)
    }
}

fn merge_values(target: &mut Value, update: &Value) {
    match (target, update) {
        (Value::Object(target_map), Value::Object(update_map)) => {
            for (key, value) in update_map {
                merge_values(target_map.entry(key.clone()).or_insert(Value::Null), value);
            }
        }
        (target_slot, _) => {
            *target_slot = update.clone();
        }
    }
}
