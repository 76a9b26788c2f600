//! Effect registry for the ColorWall firmware.
//!
//! The firmware ships a fixed set of six effects. Their ids, display names,
//! wire tags and parameter schemas live here as plain lookup tables; the
//! order of [`EFFECTS`] is the order effects are offered for selection.

use crate::error::{ColorWallError, Result};

// =============================================================================
// Parameter Schemas
// =============================================================================

/// One declared effect parameter and its default value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParamSpec {
    /// Wire name of the parameter.
    pub name: &'static str,
    /// Value used when the settings bag does not provide one.
    pub default: i32,
}

impl ParamSpec {
    const fn new(name: &'static str, default: i32) -> Self {
        Self { name, default }
    }
}

/// Smooth line of light: `speed`, `width`.
pub const SMOOTH_PARAMS: &[ParamSpec] = &[ParamSpec::new("speed", 2), ParamSpec::new("width", 10)];

/// Pulses of light: `bpm`, `style`.
pub const BPM_PARAMS: &[ParamSpec] = &[ParamSpec::new("bpm", 62), ParamSpec::new("style", 0)];

/// Solid light takes no parameters.
pub const SOLID_PARAMS: &[ParamSpec] = &[];

/// Animated tile colors: `speed`.
pub const COLORY_PARAMS: &[ParamSpec] = &[ParamSpec::new("speed", 2)];

/// Color wash: `speed`, `baseHue`, `deltaHue`.
pub const WASH_PARAMS: &[ParamSpec] = &[
    ParamSpec::new("speed", 5),
    ParamSpec::new("baseHue", 0),
    ParamSpec::new("deltaHue", 16),
];

/// Animated rainbow: `speed`, `direction`.
pub const RAINBOW_PARAMS: &[ParamSpec] =
    &[ParamSpec::new("speed", 2), ParamSpec::new("direction", 0)];

// =============================================================================
// Effect Kinds
// =============================================================================

/// Identifies one of the firmware effects without carrying its settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum EffectKind {
    Smooth,
    Bpm,
    Solid,
    Colory,
    Wash,
    Rainbow,
}

/// All effects, index-aligned with their ids and in selection order.
pub const EFFECTS: [EffectKind; 6] = [
    EffectKind::Smooth,
    EffectKind::Bpm,
    EffectKind::Solid,
    EffectKind::Colory,
    EffectKind::Wash,
    EffectKind::Rainbow,
];

/// Display names in selection order.
pub const EFFECT_NAMES: [&str; 6] = [
    "Smooth line of light",
    "Pulses of light",
    "Solid light",
    "Animated tile colors",
    "Color wash",
    "Animated rainbow",
];

/// Parameter schemas, indexed by effect id.
pub const SCHEMA_BY_ID: [&[ParamSpec]; 6] = [
    SMOOTH_PARAMS,
    BPM_PARAMS,
    SOLID_PARAMS,
    COLORY_PARAMS,
    WASH_PARAMS,
    RAINBOW_PARAMS,
];

impl EffectKind {
    /// Numeric id used by the firmware.
    pub const fn id(&self) -> u8 {
        match self {
            EffectKind::Smooth => 0,
            EffectKind::Bpm => 1,
            EffectKind::Solid => 2,
            EffectKind::Colory => 3,
            EffectKind::Wash => 4,
            EffectKind::Rainbow => 5,
        }
    }

    /// Human-readable name shown in selection lists.
    pub const fn name(&self) -> &'static str {
        EFFECT_NAMES[self.id() as usize]
    }

    /// Value of the `type` discriminator in serialized settings.
    pub const fn tag(&self) -> &'static str {
        match self {
            EffectKind::Smooth => "Smooth",
            EffectKind::Bpm => "Bpm",
            EffectKind::Solid => "Solid",
            EffectKind::Colory => "Colory",
            EffectKind::Wash => "Wash",
            EffectKind::Rainbow => "Rainbow",
        }
    }

    /// Declared parameters of this effect.
    pub const fn params(&self) -> &'static [ParamSpec] {
        SCHEMA_BY_ID[self.id() as usize]
    }

    /// Look up a declared parameter by wire name.
    pub fn param(&self, name: &str) -> Option<&'static ParamSpec> {
        self.params().iter().find(|p| p.name == name)
    }

    /// Resolve an effect id.
    ///
    /// # Errors
    /// Returns `UnknownEffect` for ids outside 0-5.
    pub fn from_id(id: u8) -> Result<Self> {
        EFFECTS
            .get(id as usize)
            .copied()
            .ok_or_else(|| ColorWallError::UnknownEffect(format!("id {}", id)))
    }

    /// Resolve an effect display name (exact match).
    ///
    /// # Errors
    /// Returns `UnknownEffect` if no effect carries this name.
    pub fn from_name(name: &str) -> Result<Self> {
        EFFECTS
            .iter()
            .copied()
            .find(|kind| kind.name() == name)
            .ok_or_else(|| ColorWallError::UnknownEffect(format!("'{}'", name)))
    }
}

impl std::fmt::Display for EffectKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Id for an effect display name.
///
/// # Errors
/// Returns `UnknownEffect` if the name is not registered.
pub fn id_for_name(name: &str) -> Result<u8> {
    EffectKind::from_name(name).map(|kind| kind.id())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ids_match_table_order() {
        for (index, kind) in EFFECTS.iter().enumerate() {
            assert_eq!(kind.id() as usize, index);
            assert_eq!(EffectKind::from_id(index as u8).unwrap(), *kind);
        }
    }

    #[test]
    fn test_selection_order() {
        assert_eq!(
            EFFECT_NAMES,
            [
                "Smooth line of light",
                "Pulses of light",
                "Solid light",
                "Animated tile colors",
                "Color wash",
                "Animated rainbow",
            ]
        );
    }

    #[test]
    fn test_name_lookup_roundtrip() {
        for kind in EFFECTS {
            assert_eq!(id_for_name(kind.name()).unwrap(), kind.id());
        }
    }

    #[test]
    fn test_unknown_effect() {
        assert!(matches!(
            EffectKind::from_id(99),
            Err(ColorWallError::UnknownEffect(_))
        ));
        assert!(matches!(
            id_for_name("nonexistent"),
            Err(ColorWallError::UnknownEffect(_))
        ));
        // Names are matched exactly
        assert!(id_for_name("color wash").is_err());
    }

    #[test]
    fn test_schema_lookup() {
        assert_eq!(EffectKind::Wash.param("deltaHue").unwrap().default, 16);
        assert!(EffectKind::Wash.param("type").is_none());
        assert!(EffectKind::Solid.params().is_empty());
    }
}
