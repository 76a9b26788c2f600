//! A single light tile of the wall.

use serde::{Deserialize, Serialize};

/// One panel as reported by `GET /panels`.
///
/// Hue, saturation and brightness use the device's 0-255 range. The `id`
/// equals the panel's position in the device list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Panel {
    pub id: u16,
    pub hue: u8,
    pub saturation: u8,
    pub brightness: u8,
}

impl Panel {
    pub fn new(id: u16, hue: u8, saturation: u8, brightness: u8) -> Self {
        Self {
            id,
            hue,
            saturation,
            brightness,
        }
    }

    /// A panel at brightness 0 is dark regardless of its color.
    pub fn is_lit(&self) -> bool {
        self.brightness != 0
    }
}

impl std::fmt::Display for Panel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Panel {:>2}: hue {:>3} | sat {:>3} | bri {:>3}",
            self.id, self.hue, self.saturation, self.brightness
        )
    }
}
