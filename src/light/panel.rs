//! One light per panel: on/off, brightness and color.

use log::warn;

use crate::device::{ColorWall, Transport};
use crate::error::{ColorWallError, Result};
use crate::protocol::Panel;
use crate::utils::parsing::{device_to_hs, hs_to_device};

/// Panel light adapter.
///
/// Works on a copy of its panel and pushes the whole panel list through the
/// client on every change.
#[derive(Debug, Clone, PartialEq)]
pub struct PanelLight {
    id: u16,
    unique_id: String,
    panel: Panel,
    available: bool,
}

impl PanelLight {
    /// Adapter for panel `id` of the last synchronized state.
    ///
    /// # Errors
    /// Returns `InvalidInput` if the client has no such panel cached.
    pub fn new<T: Transport>(wall: &ColorWall<T>, id: u16) -> Result<Self> {
        let panel = *wall.panels().get(id as usize).ok_or_else(|| {
            ColorWallError::InvalidInput(format!("Panel {} does not exist", id))
        })?;

        Ok(Self {
            id,
            unique_id: format!("{}-panel-{}", wall.host(), id),
            panel,
            available: false,
        })
    }

    /// One adapter per cached panel, in panel order.
    ///
    /// Panels whose id does not match their position are skipped.
    pub fn for_all<T: Transport>(wall: &ColorWall<T>) -> Vec<Self> {
        wall.panels()
            .iter()
            .enumerate()
            .filter_map(|(index, panel)| {
                if panel.id as usize != index {
                    warn!(
                        "Skipping panel {} reported at position {} by {}",
                        panel.id,
                        index,
                        wall.host()
                    );
                    return None;
                }
                Self::new(wall, panel.id).ok()
            })
            .collect()
    }

    pub fn id(&self) -> u16 {
        self.id
    }

    pub fn name(&self) -> String {
        format!("ColorWall Panel {}", self.id)
    }

    pub fn unique_id(&self) -> &str {
        &self.unique_id
    }

    pub fn panel(&self) -> &Panel {
        &self.panel
    }

    pub fn brightness(&self) -> u8 {
        self.panel.brightness
    }

    pub fn available(&self) -> bool {
        self.available
    }

    /// Hue (0-360) and saturation (0-100).
    pub fn hs_color(&self) -> (f64, f64) {
        device_to_hs(self.panel.hue, self.panel.saturation)
    }

    /// Lit only while the panel has brightness and the wall is powered.
    pub fn is_on<T: Transport>(&self, wall: &ColorWall<T>) -> bool {
        self.panel.is_lit() && wall.powered()
    }

    /// Turn the panel on.
    ///
    /// Without an explicit brightness a dark panel comes back at full
    /// brightness. `hs` is hue 0-360 and saturation 0-100.
    pub fn turn_on<T: Transport>(
        &mut self,
        wall: &mut ColorWall<T>,
        brightness: Option<u8>,
        hs: Option<(f64, f64)>,
    ) -> Result<()> {
        match brightness {
            Some(value) => self.panel.brightness = value,
            None if self.panel.brightness == 0 => self.panel.brightness = 255,
            None => {}
        }

        if let Some((hue, saturation)) = hs {
            let (hue, saturation) = hs_to_device(hue, saturation);
            self.panel.hue = hue;
            self.panel.saturation = saturation;
        }

        self.push(wall)
    }

    pub fn turn_off<T: Transport>(&mut self, wall: &mut ColorWall<T>) -> Result<()> {
        self.panel.brightness = 0;
        self.push(wall)
    }

    fn push<T: Transport>(&self, wall: &mut ColorWall<T>) -> Result<()> {
        if !wall.set_panel(self.panel)? {
            warn!("{} rejected update of panel {}", wall.host(), self.id);
        }
        Ok(())
    }

    /// Sync with the device and pick up this panel's state. A connection
    /// failure marks the light unavailable instead of failing.
    pub fn update<T: Transport>(&mut self, wall: &mut ColorWall<T>) -> Result<()> {
        match wall.update() {
            Ok(()) => {
                let Some(panel) = wall.panels().get(self.id as usize) else {
                    warn!("Panel {} vanished from {}", self.id, wall.host());
                    self.available = false;
                    return Ok(());
                };
                self.panel = *panel;
                self.available = true;
                Ok(())
            }
            Err(e) if e.is_connection() => {
                warn!("Cannot connect to previously available host {}", wall.host());
                self.available = false;
                Ok(())
            }
            Err(e) => Err(e),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::device::transport::mock::MockTransport;
    use crate::log_capture;
    use log::Level;

    const PANELS_BODY: &str = r#"[{"id":0,"hue":0,"saturation":255,"brightness":0},{"id":1,"hue":128,"saturation":64,"brightness":200}]"#;

    fn synced_wall() -> ColorWall<MockTransport> {
        let transport = MockTransport::new()
            .reply(200, r#"{"power":true,"brightness":255}"#)
            .reply(200, PANELS_BODY)
            .reply(200, r#"{"effect":2}"#);
        let mut wall = ColorWall::with_transport(transport);
        wall.update().unwrap();
        wall
    }

    fn sent_panels(wall: &ColorWall<MockTransport>) -> Vec<Panel> {
        let body = wall.transport().last_request().unwrap().body.unwrap();
        serde_json::from_str(&body).unwrap()
    }

    #[test]
    fn test_for_all() {
        let wall = synced_wall();
        let lights = PanelLight::for_all(&wall);
        assert_eq!(lights.len(), 2);
        assert_eq!(lights[1].unique_id(), "mock-wall-panel-1");
        assert_eq!(lights[1].name(), "ColorWall Panel 1");
        assert!(PanelLight::new(&wall, 5).is_err());
    }

    #[test]
    fn test_for_all_skips_misplaced_panels() {
        let transport = MockTransport::new()
            .reply(200, r#"{"power":true,"brightness":255}"#)
            .reply(200, r#"[{"id":0,"hue":0,"saturation":0,"brightness":9},{"id":7,"hue":0,"saturation":0,"brightness":9}]"#)
            .reply(200, r#"{"effect":2}"#);
        let mut wall = ColorWall::with_transport(transport);
        wall.update().unwrap();

        let (lights, records) = log_capture::capture(|| PanelLight::for_all(&wall));
        assert_eq!(lights.len(), 1);
        assert_eq!(lights[0].id(), 0);
        assert!(
            records
                .iter()
                .any(|(level, message)| *level == Level::Warn && message.contains("panel 7"))
        );
    }

    #[test]
    fn test_is_on() {
        let wall = synced_wall();
        assert!(!PanelLight::new(&wall, 0).unwrap().is_on(&wall));
        assert!(PanelLight::new(&wall, 1).unwrap().is_on(&wall));
    }

    #[test]
    fn test_hs_color() {
        let wall = synced_wall();
        let (hue, saturation) = PanelLight::new(&wall, 0).unwrap().hs_color();
        assert_eq!(hue, 0.0);
        assert_eq!(saturation, 100.0);
    }

    #[test]
    fn test_turn_on_dark_panel_defaults_to_full() {
        let mut wall = synced_wall();
        let mut light = PanelLight::new(&wall, 0).unwrap();

        wall.transport().push_reply(200, "");
        light.turn_on(&mut wall, None, None).unwrap();

        assert_eq!(light.brightness(), 255);
        let sent = sent_panels(&wall);
        assert_eq!(sent.len(), 2);
        assert_eq!(sent[0].brightness, 255);
        assert_eq!(sent[1], Panel::new(1, 128, 64, 200));
    }

    #[test]
    fn test_turn_on_with_color() {
        let mut wall = synced_wall();
        let mut light = PanelLight::new(&wall, 1).unwrap();

        wall.transport().push_reply(200, "");
        light
            .turn_on(&mut wall, Some(10), Some((180.0, 50.0)))
            .unwrap();

        assert_eq!(sent_panels(&wall)[1], Panel::new(1, 128, 128, 10));
        assert_eq!(wall.panels()[1], Panel::new(1, 128, 128, 10));
    }

    #[test]
    fn test_turn_off() {
        let mut wall = synced_wall();
        let mut light = PanelLight::new(&wall, 1).unwrap();

        wall.transport().push_reply(200, "");
        light.turn_off(&mut wall).unwrap();
        assert_eq!(sent_panels(&wall)[1].brightness, 0);
        assert!(!light.is_on(&wall));
    }

    #[test]
    fn test_update_availability() {
        let mut wall = synced_wall();
        let mut light = PanelLight::new(&wall, 1).unwrap();
        assert!(!light.available());

        wall.transport().push_refuse();
        light.update(&mut wall).unwrap();
        assert!(!light.available());

        wall.transport()
            .push_reply(200, r#"{"power":true,"brightness":255}"#);
        wall.transport()
            .push_reply(200, r#"[{"id":0,"hue":0,"saturation":0,"brightness":0},{"id":1,"hue":9,"saturation":9,"brightness":9}]"#);
        wall.transport().push_reply(200, r#"{"effect":2}"#);
        light.update(&mut wall).unwrap();
        assert!(light.available());
        assert_eq!(light.panel(), &Panel::new(1, 9, 9, 9));
    }
}
