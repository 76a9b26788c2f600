//! HTTP endpoints and JSON payloads of the ColorWall firmware.
//!
//! | Endpoint  | GET response                    | POST body                       |
//! |-----------|---------------------------------|---------------------------------|
//! | `/power`  | `{power, brightness}`           | `{power, brightness}`           |
//! | `/panels` | `[{id, hue, saturation, brightness}]` | same array               |
//! | `/effect` | `{effect, settings?}`           | `{effect, settings}`            |

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::Result;
use crate::protocol::effects::Effect;

// =============================================================================
// Endpoints
// =============================================================================

/// Power state and master brightness.
pub const ENDPOINT_POWER: &str = "/power";

/// Full panel list.
pub const ENDPOINT_PANELS: &str = "/panels";

/// Active effect and its settings.
pub const ENDPOINT_EFFECT: &str = "/effect";

/// The only status code the firmware uses for success.
pub const STATUS_OK: u16 = 200;

/// Content type sent with every write.
pub const CONTENT_TYPE_JSON: &str = "application/json";

// =============================================================================
// Payloads
// =============================================================================

/// Body of `GET /power` and `POST /power`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PowerState {
    pub power: bool,
    pub brightness: u8,
}

/// Body of `GET /effect`. `settings` is absent for effects without parameters.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct EffectReport {
    pub effect: u8,
    #[serde(default)]
    pub settings: Option<Value>,
}

impl EffectReport {
    /// Resolve the reported id and settings into an [`Effect`].
    pub fn into_effect(self) -> Result<Effect> {
        Effect::variant_by_id(self.effect, self.settings.as_ref())
    }
}

/// Body of `POST /effect`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct EffectCommand<'a> {
    pub effect: u8,
    pub settings: &'a Effect,
}

impl<'a> From<&'a Effect> for EffectCommand<'a> {
    fn from(effect: &'a Effect) -> Self {
        Self {
            effect: effect.id(),
            settings: effect,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::protocol::effects::{Smooth, Solid};
    use serde_json::json;

    #[test]
    fn test_effect_report_without_settings() {
        let report: EffectReport = serde_json::from_str(r#"{"effect":2}"#).unwrap();
        assert_eq!(report.settings, None);
        assert_eq!(report.into_effect().unwrap(), Effect::Solid(Solid {}));
    }

    #[test]
    fn test_effect_report_with_settings() {
        let body = r#"{"effect":0,"settings":{"type":"Smooth","speed":4,"width":6}}"#;
        let report: EffectReport = serde_json::from_str(body).unwrap();
        assert_eq!(
            report.into_effect().unwrap(),
            Effect::Smooth(Smooth { speed: 4, width: 6 })
        );
    }

    #[test]
    fn test_effect_command_body() {
        let effect = Effect::Smooth(Smooth { speed: 3, width: 8 });
        let body = serde_json::to_value(EffectCommand::from(&effect)).unwrap();
        assert_eq!(
            body,
            json!({"effect": 0, "settings": {"type": "Smooth", "speed": 3, "width": 8}})
        );
    }

    #[test]
    fn test_power_state_body() {
        let body = serde_json::to_string(&PowerState {
            power: true,
            brightness: 128,
        })
        .unwrap();
        assert_eq!(body, r#"{"power":true,"brightness":128}"#);
    }
}
