//! Effect model for the ColorWall firmware.
//!
//! Every effect has its own strongly-typed parameter struct. [`Effect`]
//! wraps them in a closed enum whose serialized form is exactly what the
//! firmware accepts as a settings object:
//!
//! ```json
//! {"type": "Wash", "speed": 5, "baseHue": 0, "deltaHue": 16}
//! ```
//!
//! The firmware runs out of memory on unknown fields, so the structs carry
//! nothing but their declared parameters and the display name never reaches
//! the wire.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::{ColorWallError, Result};
use crate::protocol::registry::EffectKind;

// =============================================================================
// Effect Capability
// =============================================================================

/// Shared capability of every effect parameter struct.
pub trait EffectParams: Default + Serialize + DeserializeOwned + Into<Effect> {
    /// Which effect these parameters belong to.
    const KIND: EffectKind;

    /// Firmware id of the effect.
    fn id(&self) -> u8 {
        Self::KIND.id()
    }

    /// Display name of the effect.
    fn name(&self) -> &'static str {
        Self::KIND.name()
    }

    /// Decode a settings bag, filling missing parameters with their defaults.
    ///
    /// `None` and JSON `null` yield the defaults. Keys outside the schema
    /// (such as `type`) are ignored.
    fn from_settings(settings: Option<&Value>) -> Result<Self> {
        match settings {
            None | Some(Value::Null) => Ok(Self::default()),
            Some(value) => serde_json::from_value(value.clone()).map_err(|e| {
                ColorWallError::InvalidSettings {
                    effect: Self::KIND.name().into(),
                    message: e.to_string(),
                }
            }),
        }
    }
}

// =============================================================================
// Parameter Structs
// =============================================================================

/// "Smooth line of light".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Smooth {
    pub speed: i32,
    pub width: i32,
}

impl Default for Smooth {
    fn default() -> Self {
        Self {
            speed: 2,
            width: 10,
        }
    }
}

/// "Pulses of light".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Bpm {
    pub bpm: i32,
    pub style: i32,
}

impl Default for Bpm {
    fn default() -> Self {
        Self { bpm: 62, style: 0 }
    }
}

/// "Solid light". Panels keep their individual colors.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Solid {}

/// "Animated tile colors".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Colory {
    pub speed: i32,
}

impl Default for Colory {
    fn default() -> Self {
        Self { speed: 2 }
    }
}

/// "Color wash".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Wash {
    pub speed: i32,
    pub base_hue: i32,
    pub delta_hue: i32,
}

impl Default for Wash {
    fn default() -> Self {
        Self {
            speed: 5,
            base_hue: 0,
            delta_hue: 16,
        }
    }
}

/// "Animated rainbow".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Rainbow {
    pub speed: i32,
    pub direction: i32,
}

impl Default for Rainbow {
    fn default() -> Self {
        Self {
            speed: 2,
            direction: 0,
        }
    }
}

impl EffectParams for Smooth {
    const KIND: EffectKind = EffectKind::Smooth;
}

impl EffectParams for Bpm {
    const KIND: EffectKind = EffectKind::Bpm;
}

impl EffectParams for Solid {
    const KIND: EffectKind = EffectKind::Solid;
}

impl EffectParams for Colory {
    const KIND: EffectKind = EffectKind::Colory;
}

impl EffectParams for Wash {
    const KIND: EffectKind = EffectKind::Wash;
}

impl EffectParams for Rainbow {
    const KIND: EffectKind = EffectKind::Rainbow;
}

impl From<Smooth> for Effect {
    fn from(params: Smooth) -> Self {
        Effect::Smooth(params)
    }
}

impl From<Bpm> for Effect {
    fn from(params: Bpm) -> Self {
        Effect::Bpm(params)
    }
}

impl From<Solid> for Effect {
    fn from(params: Solid) -> Self {
        Effect::Solid(params)
    }
}

impl From<Colory> for Effect {
    fn from(params: Colory) -> Self {
        Effect::Colory(params)
    }
}

impl From<Wash> for Effect {
    fn from(params: Wash) -> Self {
        Effect::Wash(params)
    }
}

impl From<Rainbow> for Effect {
    fn from(params: Rainbow) -> Self {
        Effect::Rainbow(params)
    }
}

// =============================================================================
// Effect
// =============================================================================

/// One configured effect. Serializes to the firmware settings object.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "type")]
pub enum Effect {
    Smooth(Smooth),
    Bpm(Bpm),
    Solid(Solid),
    Colory(Colory),
    Wash(Wash),
    Rainbow(Rainbow),
}

impl Effect {
    /// Build an effect from its kind and an optional settings bag.
    pub fn build(kind: EffectKind, settings: Option<&Value>) -> Result<Self> {
        Ok(match kind {
            EffectKind::Smooth => Smooth::from_settings(settings)?.into(),
            EffectKind::Bpm => Bpm::from_settings(settings)?.into(),
            EffectKind::Solid => Solid::from_settings(settings)?.into(),
            EffectKind::Colory => Colory::from_settings(settings)?.into(),
            EffectKind::Wash => Wash::from_settings(settings)?.into(),
            EffectKind::Rainbow => Rainbow::from_settings(settings)?.into(),
        })
    }

    /// Build an effect by firmware id.
    ///
    /// # Errors
    /// `UnknownEffect` for ids outside the registry, `InvalidSettings` when a
    /// declared parameter has the wrong type.
    pub fn variant_by_id(id: u8, settings: Option<&Value>) -> Result<Self> {
        Self::build(EffectKind::from_id(id)?, settings)
    }

    /// Build an effect by display name.
    ///
    /// # Errors
    /// Same as [`Effect::variant_by_id`].
    pub fn variant_by_name(name: &str, settings: Option<&Value>) -> Result<Self> {
        Self::build(EffectKind::from_name(name)?, settings)
    }

    /// Effect with every parameter at its declared default.
    pub fn defaults(kind: EffectKind) -> Self {
        match kind {
            EffectKind::Smooth => Smooth::default().into(),
            EffectKind::Bpm => Bpm::default().into(),
            EffectKind::Solid => Solid::default().into(),
            EffectKind::Colory => Colory::default().into(),
            EffectKind::Wash => Wash::default().into(),
            EffectKind::Rainbow => Rainbow::default().into(),
        }
    }

    pub fn kind(&self) -> EffectKind {
        match self {
            Effect::Smooth(_) => EffectKind::Smooth,
            Effect::Bpm(_) => EffectKind::Bpm,
            Effect::Solid(_) => EffectKind::Solid,
            Effect::Colory(_) => EffectKind::Colory,
            Effect::Wash(_) => EffectKind::Wash,
            Effect::Rainbow(_) => EffectKind::Rainbow,
        }
    }

    pub fn id(&self) -> u8 {
        self.kind().id()
    }

    pub fn name(&self) -> &'static str {
        self.kind().name()
    }

    /// Current parameter values in schema order.
    pub fn param_values(&self) -> Vec<(&'static str, i32)> {
        match self {
            Effect::Smooth(p) => vec![("speed", p.speed), ("width", p.width)],
            Effect::Bpm(p) => vec![("bpm", p.bpm), ("style", p.style)],
            Effect::Solid(_) => vec![],
            Effect::Colory(p) => vec![("speed", p.speed)],
            Effect::Wash(p) => vec![
                ("speed", p.speed),
                ("baseHue", p.base_hue),
                ("deltaHue", p.delta_hue),
            ],
            Effect::Rainbow(p) => vec![("speed", p.speed), ("direction", p.direction)],
        }
    }

    /// Serialized settings object: `type` plus the declared parameters.
    pub fn to_settings(&self) -> Result<Value> {
        serde_json::to_value(self).map_err(|e| ColorWallError::InvalidSettings {
            effect: self.name().into(),
            message: e.to_string(),
        })
    }
}

impl std::fmt::Display for Effect {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())?;
        let params = self.param_values();
        if !params.is_empty() {
            let list: Vec<String> = params
                .iter()
                .map(|(name, value)| format!("{}={}", name, value))
                .collect();
            write!(f, " ({})", list.join(", "))?;
        }
        Ok(())
    }
}
