//! Host-owned configuration for ColorWall devices.
//!
//! The host keeps one parameter-override bag per effect id. On first setup
//! every bag holds the declared defaults; afterwards the user changes single
//! parameters and the bag is used as the settings whenever that effect is
//! started.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::{ColorWallError, Result};
use crate::protocol::{EFFECTS, Effect, EffectKind};

// =============================================================================
// Effect Options
// =============================================================================

/// Per-effect parameter overrides, keyed by effect id.
///
/// In JSON the ids are object keys, so they are stored as strings and read
/// back as numbers.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EffectOptions {
    effects: BTreeMap<u8, Map<String, Value>>,
}

impl EffectOptions {
    /// Every effect with all of its declared defaults.
    pub fn defaults() -> Self {
        let effects = EFFECTS
            .iter()
            .map(|kind| {
                let values: Map<String, Value> = kind
                    .params()
                    .iter()
                    .map(|spec| (spec.name.to_string(), Value::from(spec.default)))
                    .collect();
                (kind.id(), values)
            })
            .collect();
        Self { effects }
    }

    /// Override bag for an effect id, if one is stored.
    pub fn get(&self, id: u8) -> Option<&Map<String, Value>> {
        self.effects.get(&id)
    }

    /// Set one parameter of an effect.
    ///
    /// # Errors
    /// `UnknownEffect` for an unknown id, `InvalidInput` if the effect does
    /// not declare `name`.
    pub fn set_param(&mut self, id: u8, name: &str, value: i32) -> Result<()> {
        let kind = EffectKind::from_id(id)?;
        if kind.param(name).is_none() {
            let known: Vec<&str> = kind.params().iter().map(|p| p.name).collect();
            return Err(ColorWallError::InvalidInput(format!(
                "'{}' has no parameter '{}' (parameters: {})",
                kind.name(),
                name,
                if known.is_empty() {
                    "none".to_string()
                } else {
                    known.join(", ")
                }
            )));
        }

        self.effects
            .entry(id)
            .or_default()
            .insert(name.to_string(), Value::from(value));
        Ok(())
    }

    /// Drop all overrides of an effect so it runs with its defaults.
    pub fn reset(&mut self, id: u8) -> Result<()> {
        EffectKind::from_id(id)?;
        self.effects.remove(&id);
        Ok(())
    }

    /// Check that every stored id belongs to a known effect and every bag
    /// decodes into its effect.
    pub fn validate(&self) -> Result<()> {
        for (id, values) in &self.effects {
            Effect::variant_by_id(*id, Some(&Value::Object(values.clone())))?;
        }
        Ok(())
    }

    /// Configured effect for one id. Missing bags fall back to defaults.
    pub fn effect(&self, id: u8) -> Result<Effect> {
        let settings = self.effects.get(&id).map(|m| Value::Object(m.clone()));
        Effect::variant_by_id(id, settings.as_ref())
    }

    /// Configured effect for every id in the registry.
    pub fn effect_settings(&self) -> Result<BTreeMap<u8, Effect>> {
        EFFECTS
            .iter()
            .map(|kind| self.effect(kind.id()).map(|effect| (kind.id(), effect)))
            .collect()
    }
}

// =============================================================================
// Application Config
// =============================================================================

/// Everything the CLI host persists between runs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AppConfig {
    /// Device address (`ip` or `ip:port`).
    #[serde(default)]
    pub host: Option<String>,

    /// Seconds between synchronizations in `monitor`.
    #[serde(default = "default_poll_interval")]
    pub poll_interval: u64,

    /// Per-effect parameter overrides.
    #[serde(default = "EffectOptions::defaults")]
    pub effects: EffectOptions,
}

fn default_poll_interval() -> u64 {
    30
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            host: None,
            poll_interval: default_poll_interval(),
            effects: EffectOptions::defaults(),
        }
    }
}
