//! Master light for the whole wall: power, brightness and effect.

use log::{info, warn};

use crate::device::{ColorWall, Transport};
use crate::error::Result;
use crate::protocol::{EFFECT_NAMES, Effect};

/// Optional changes requested with a turn-on.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TurnOn {
    pub brightness: Option<u8>,
    /// Effect display name.
    pub effect: Option<String>,
}

/// Master light adapter.
#[derive(Debug, Clone, PartialEq)]
pub struct WallLight {
    unique_id: String,
    is_on: bool,
    brightness: u8,
    effect: Option<Effect>,
    available: bool,
}

impl WallLight {
    pub const NAME: &'static str = "ColorWall";

    /// Sync with the device and re-send the running effect with its
    /// configured settings, so option changes show up right away.
    pub fn new<T: Transport>(wall: &mut ColorWall<T>) -> Result<Self> {
        wall.update()?;
        info!("ColorWall at {} is available", wall.host());

        let mut light = Self {
            unique_id: format!("{}-main", wall.host()),
            is_on: wall.powered(),
            brightness: 255,
            effect: wall.current_effect().copied(),
            available: true,
        };
        light.send_initial(wall)?;
        Ok(light)
    }

    fn send_initial<T: Transport>(&mut self, wall: &ColorWall<T>) -> Result<()> {
        if let Some(current) = self.effect {
            let configured = wall.configured_effect(current.name())?;
            if !wall.set_effect(&configured)? {
                warn!("{} rejected the configured '{}'", wall.host(), configured.name());
            }
            self.effect = Some(configured);
        }
        Ok(())
    }

    pub fn name(&self) -> &'static str {
        Self::NAME
    }

    pub fn unique_id(&self) -> &str {
        &self.unique_id
    }

    pub fn is_on(&self) -> bool {
        self.is_on
    }

    pub fn brightness(&self) -> u8 {
        self.brightness
    }

    pub fn available(&self) -> bool {
        self.available
    }

    /// Display name of the running effect.
    pub fn effect(&self) -> Option<&'static str> {
        self.effect.map(|e| e.name())
    }

    /// Effects offered for selection, in registry order.
    pub fn effect_list(&self) -> &'static [&'static str] {
        &EFFECT_NAMES
    }

    /// Turn the wall on, optionally changing brightness and effect first.
    ///
    /// The effect is started with its configured settings.
    pub fn turn_on<T: Transport>(&mut self, wall: &ColorWall<T>, request: TurnOn) -> Result<()> {
        if let Some(brightness) = request.brightness {
            self.brightness = brightness;
        }

        if let Some(name) = request.effect {
            let effect = wall.configured_effect(&name)?;
            if !wall.set_effect(&effect)? {
                warn!("{} rejected effect '{}'", wall.host(), name);
            }
            self.effect = Some(effect);
        }

        if !wall.set_power(true, self.brightness)? {
            warn!("{} rejected power on", wall.host());
        }
        self.is_on = true;
        Ok(())
    }

    pub fn turn_off<T: Transport>(&mut self, wall: &ColorWall<T>) -> Result<()> {
        if !wall.set_power(false, self.brightness)? {
            warn!("{} rejected power off", wall.host());
        }
        self.is_on = false;
        Ok(())
    }

    /// Sync with the device. A connection failure marks the light
    /// unavailable instead of failing; other errors are returned.
    pub fn update<T: Transport>(&mut self, wall: &mut ColorWall<T>) -> Result<()> {
        match wall.update() {
            Ok(()) => {
                self.is_on = wall.powered();
                self.brightness = wall.brightness();
                self.effect = wall.current_effect().copied();
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
    use crate::protocol::{Colory, EffectKind};

    const POWER_BODY: &str = r#"{"power":true,"brightness":90}"#;
    const PANELS_BODY: &str = r#"[{"id":0,"hue":1,"saturation":2,"brightness":3}]"#;
    const EFFECT_BODY: &str = r#"{"effect":3,"settings":{"type":"Colory","speed":2}}"#;

    fn scripted() -> MockTransport {
        MockTransport::new()
            .reply(200, POWER_BODY)
            .reply(200, PANELS_BODY)
            .reply(200, EFFECT_BODY)
            .reply(200, "")
    }

    #[test]
    fn test_new_resends_configured_effect() {
        let mut wall = ColorWall::with_transport(scripted());
        wall.configure_effect(Effect::Colory(Colory { speed: 8 }));

        let light = WallLight::new(&mut wall).unwrap();
        assert!(light.is_on());
        assert!(light.available());
        assert_eq!(light.unique_id(), "mock-wall-main");
        assert_eq!(light.effect(), Some("Animated tile colors"));

        let request = wall.transport().last_request().unwrap();
        assert_eq!(request.path, "/effect");
        assert!(request.body.unwrap().contains(r#""speed":8"#));
    }

    #[test]
    fn test_turn_on_with_effect() {
        let mut wall = ColorWall::with_transport(scripted());
        let mut light = WallLight::new(&mut wall).unwrap();

        wall.transport().push_reply(200, "");
        wall.transport().push_reply(200, "");
        light
            .turn_on(
                &wall,
                TurnOn {
                    brightness: Some(40),
                    effect: Some("Color wash".into()),
                },
            )
            .unwrap();

        let requests = wall.transport().requests.borrow().clone();
        let effect_req = &requests[requests.len() - 2];
        assert_eq!(effect_req.path, "/effect");
        assert!(effect_req.body.as_ref().unwrap().contains(r#""effect":4"#));

        let power_req = &requests[requests.len() - 1];
        assert_eq!(
            power_req.body.as_deref(),
            Some(r#"{"power":true,"brightness":40}"#)
        );
        assert_eq!(light.brightness(), 40);
        assert_eq!(light.effect(), Some(EffectKind::Wash.name()));
    }

    #[test]
    fn test_turn_on_unknown_effect() {
        let mut wall = ColorWall::with_transport(scripted());
        let mut light = WallLight::new(&mut wall).unwrap();
        let request = TurnOn {
            brightness: None,
            effect: Some("Strobe".into()),
        };
        assert!(light.turn_on(&wall, request).is_err());
    }

    #[test]
    fn test_turn_off_keeps_brightness() {
        let mut wall = ColorWall::with_transport(scripted());
        let mut light = WallLight::new(&mut wall).unwrap();

        wall.transport().push_reply(500, "oops");
        light.turn_off(&wall).unwrap();
        assert!(!light.is_on());
        assert_eq!(
            wall.transport().last_request().unwrap().body.as_deref(),
            Some(r#"{"power":false,"brightness":255}"#)
        );
    }

    #[test]
    fn test_update_marks_unavailable_and_recovers() {
        let mut wall = ColorWall::with_transport(scripted());
        let mut light = WallLight::new(&mut wall).unwrap();

        wall.transport().push_refuse();
        light.update(&mut wall).unwrap();
        assert!(!light.available());

        wall.transport()
            .push_reply(200, r#"{"power":false,"brightness":12}"#);
        wall.transport().push_reply(200, PANELS_BODY);
        wall.transport().push_reply(200, r#"{"effect":2}"#);
        light.update(&mut wall).unwrap();
        assert!(light.available());
        assert!(!light.is_on());
        assert_eq!(light.brightness(), 12);
        assert_eq!(light.effect(), Some("Solid light"));
    }

    #[test]
    fn test_update_unknown_effect_marks_unavailable() {
        let mut wall = ColorWall::with_transport(scripted());
        let mut light = WallLight::new(&mut wall).unwrap();
        assert!(light.available());

        wall.transport().push_reply(200, POWER_BODY);
        wall.transport().push_reply(200, PANELS_BODY);
        wall.transport().push_reply(200, r#"{"effect":42}"#);
        light.update(&mut wall).unwrap();
        assert!(!light.available());
        assert_eq!(light.effect(), Some("Animated tile colors"));
    }

    #[test]
    fn test_effect_list_order() {
        let mut wall = ColorWall::with_transport(scripted());
        let light = WallLight::new(&mut wall).unwrap();
        assert_eq!(light.effect_list()[0], "Smooth line of light");
        assert_eq!(light.effect_list()[5], "Animated rainbow");
    }
}
