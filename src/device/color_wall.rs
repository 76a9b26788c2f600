//! ColorWall device client.
//!
//! High-level interface for one ColorWall endpoint with a local cache of the
//! last synchronized device state.
//!
//! Reads and writes fail differently: reads (and [`ColorWall::update`])
//! return `Err(Connection)` on any transport failure, non-200 status or
//! undecodable body. Writes return `Ok(false)` for a non-200 status, log the
//! response body, and only fail with `Err(Connection)` when the request never
//! got a response. Host integrations depend on this split.

use std::collections::BTreeMap;

use log::{debug, error};
use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::config::EffectOptions;
use crate::device::transport::{HttpTransport, Response, Transport};
use crate::error::{ColorWallError, Result};
use crate::protocol::{
    ENDPOINT_EFFECT, ENDPOINT_PANELS, ENDPOINT_POWER, EFFECT_NAMES, Effect, EffectCommand,
    EffectKind, EffectReport, Panel, PowerState, STATUS_OK, id_for_name,
};

// =============================================================================
// Device State
// =============================================================================

/// Snapshot of the device taken by the last successful [`ColorWall::update`].
#[derive(Debug, Clone, PartialEq)]
pub struct DeviceState {
    pub powered: bool,
    pub brightness: u8,
    pub panels: Vec<Panel>,
    pub current_effect: Option<Effect>,
}

impl Default for DeviceState {
    fn default() -> Self {
        Self {
            powered: false,
            brightness: 255,
            panels: Vec::new(),
            current_effect: None,
        }
    }
}

impl std::fmt::Display for DeviceState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let effect = self
            .current_effect
            .map(|e| e.name())
            .unwrap_or("(unknown)");

        writeln!(f, "+-----------------------------------------+")?;
        writeln!(f, "|            ColorWall Status             |")?;
        writeln!(f, "+-----------------------------------------+")?;
        writeln!(
            f,
            "|  Power:        {:<25}|",
            if self.powered { "ON" } else { "OFF" }
        )?;
        writeln!(f, "|  Brightness:   {:<25}|", self.brightness)?;
        writeln!(f, "|  Effect:       {:<25}|", effect)?;
        writeln!(f, "|  Panels:       {:<25}|", self.panels.len())?;
        writeln!(f, "+-----------------------------------------+")?;
        for panel in &self.panels {
            writeln!(f, "|  {:<39}|", panel.to_string())?;
        }
        if !self.panels.is_empty() {
            writeln!(f, "+-----------------------------------------+")?;
        }
        Ok(())
    }
}

// =============================================================================
// ColorWall
// =============================================================================

/// Client for one ColorWall device.
///
/// Not thread-safe: callers must serialize access, for example by running
/// every call on a single worker.
///
/// # Example
///
/// ```no_run
/// use color_wall::ColorWall;
///
/// let mut wall = ColorWall::new("192.168.1.50")?;
/// wall.update()?;
/// println!("{}", wall.state());
///
/// if !wall.set_power(true, 128)? {
///     eprintln!("device rejected the power change");
/// }
/// # Ok::<(), color_wall::ColorWallError>(())
/// ```
pub struct ColorWall<T: Transport = HttpTransport> {
    transport: T,
    state: DeviceState,
    effect_settings: BTreeMap<u8, Effect>,
}

impl ColorWall<HttpTransport> {
    /// Create a client for the device at `host`. No request is made.
    pub fn new(host: &str) -> Result<Self> {
        Ok(Self::with_transport(HttpTransport::new(host)?))
    }

    /// Probe `host` by reading its power endpoint.
    ///
    /// # Errors
    /// Returns `Connection` if the device cannot be reached or answers with a
    /// non-200 status.
    pub fn validate_connection(host: &str) -> Result<()> {
        probe(&HttpTransport::new(host)?)
    }

    /// Effect names in selection order.
    pub fn effect_list() -> &'static [&'static str] {
        &EFFECT_NAMES
    }

    pub fn effect_id_by_name(name: &str) -> Result<u8> {
        id_for_name(name)
    }

    pub fn effect_by_name(name: &str, settings: Option<&serde_json::Value>) -> Result<Effect> {
        Effect::variant_by_name(name, settings)
    }
}

/// Read the power endpoint through `transport` and discard the result.
pub fn probe<T: Transport>(transport: &T) -> Result<()> {
    let response = transport.get(ENDPOINT_POWER)?;
    if response.status != STATUS_OK {
        return Err(ColorWallError::connection(format!(
            "{} answered {} with status {}",
            transport.host(),
            ENDPOINT_POWER,
            response.status
        )));
    }
    Ok(())
}

impl<T: Transport> ColorWall<T> {
    /// Create a client over an existing transport.
    pub fn with_transport(transport: T) -> Self {
        Self {
            transport,
            state: DeviceState::default(),
            effect_settings: BTreeMap::new(),
        }
    }

    pub fn host(&self) -> &str {
        self.transport.host()
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    // -------------------------------------------------------------------------
    // Cached state
    // -------------------------------------------------------------------------

    pub fn state(&self) -> &DeviceState {
        &self.state
    }

    pub fn powered(&self) -> bool {
        self.state.powered
    }

    pub fn brightness(&self) -> u8 {
        self.state.brightness
    }

    pub fn panels(&self) -> &[Panel] {
        &self.state.panels
    }

    pub fn current_effect(&self) -> Option<&Effect> {
        self.state.current_effect.as_ref()
    }

    /// Last configured settings per effect id.
    pub fn effect_settings(&self) -> &BTreeMap<u8, Effect> {
        &self.effect_settings
    }

    /// Replace the configured settings table from host options.
    pub fn load_effect_settings(&mut self, options: &EffectOptions) -> Result<()> {
        self.effect_settings = options.effect_settings()?;
        Ok(())
    }

    /// Remember `effect` as the configured settings for its id.
    pub fn configure_effect(&mut self, effect: Effect) {
        self.effect_settings.insert(effect.id(), effect);
    }

    /// The configured variant for an effect name, or its defaults when
    /// nothing was configured.
    pub fn configured_effect(&self, name: &str) -> Result<Effect> {
        let kind = EffectKind::from_name(name)?;
        Ok(self
            .effect_settings
            .get(&kind.id())
            .copied()
            .unwrap_or_else(|| Effect::defaults(kind)))
    }

    // -------------------------------------------------------------------------
    // Power
    // -------------------------------------------------------------------------

    /// Switch the wall on or off and set its master brightness.
    pub fn set_power(&self, on: bool, brightness: u8) -> Result<bool> {
        let state = PowerState {
            power: on,
            brightness,
        };
        self.write(ENDPOINT_POWER, &state)
    }

    /// Read power state and master brightness.
    pub fn get_power(&self) -> Result<PowerState> {
        self.read(ENDPOINT_POWER)
    }

    // -------------------------------------------------------------------------
    // Panels
    // -------------------------------------------------------------------------

    /// Read all panels in device order.
    pub fn get_panels(&self) -> Result<Vec<Panel>> {
        self.read(ENDPOINT_PANELS)
    }

    /// Write the complete panel list.
    ///
    /// The device replaces all of its panel state with this list, so it must
    /// always be the full current list and never a delta.
    pub fn set_panels(&self, panels: &[Panel]) -> Result<bool> {
        self.write(ENDPOINT_PANELS, &panels)
    }

    /// Replace one panel in the cached list and write the whole list.
    ///
    /// The cache only takes the new panel once the device accepted the list.
    ///
    /// # Errors
    /// Returns `InvalidInput` if the panel id is not in the cached list.
    pub fn set_panel(&mut self, panel: Panel) -> Result<bool> {
        let mut panels = self.state.panels.clone();
        let count = panels.len();
        let slot = panels.get_mut(panel.id as usize).ok_or_else(|| {
            ColorWallError::InvalidInput(format!(
                "Panel {} does not exist ({} panels known)",
                panel.id, count
            ))
        })?;
        *slot = panel;

        let accepted = self.set_panels(&panels)?;
        if accepted {
            self.state.panels = panels;
        }
        Ok(accepted)
    }

    // -------------------------------------------------------------------------
    // Effect
    // -------------------------------------------------------------------------

    /// Read the running effect and its settings.
    ///
    /// An effect id or settings bag the registry cannot decode is reported as
    /// `Connection`, like any other malformed read.
    pub fn get_effect(&self) -> Result<Effect> {
        let report: EffectReport = self.read(ENDPOINT_EFFECT)?;
        report.into_effect().map_err(|e| match e {
            ColorWallError::InvalidSettings { .. } | ColorWallError::UnknownEffect(_) => {
                ColorWallError::connection(e)
            }
            other => other,
        })
    }

    /// Start `effect` with its settings.
    pub fn set_effect(&self, effect: &Effect) -> Result<bool> {
        self.write(ENDPOINT_EFFECT, &EffectCommand::from(effect))
    }

    // -------------------------------------------------------------------------
    // Synchronization
    // -------------------------------------------------------------------------

    /// Refresh the cached state from the device.
    ///
    /// All three reads must succeed before anything is committed; on error
    /// the cache keeps its previous values.
    pub fn update(&mut self) -> Result<()> {
        let power = self.get_power()?;
        let panels = self.get_panels()?;
        let effect = self.get_effect()?;

        self.state = DeviceState {
            powered: power.power,
            brightness: power.brightness,
            panels,
            current_effect: Some(effect),
        };
        Ok(())
    }

    // -------------------------------------------------------------------------
    // Exchange helpers
    // -------------------------------------------------------------------------

    fn read<R: DeserializeOwned>(&self, path: &str) -> Result<R> {
        let response = self.transport.get(path)?;
        if response.status != STATUS_OK {
            return Err(ColorWallError::connection(format!(
                "GET {} returned status {}: {}",
                path, response.status, response.body
            )));
        }
        serde_json::from_str(&response.body).map_err(|e| {
            ColorWallError::connection(format!("Malformed response from {}: {}", path, e))
        })
    }

    fn write<B: Serialize + ?Sized>(&self, path: &str, body: &B) -> Result<bool> {
        let payload = serde_json::to_string(body)
            .map_err(|e| ColorWallError::InvalidInput(format!("Cannot encode {}: {}", path, e)))?;
        debug!("POST {} {}", path, payload);

        let Response { status, body } = self.transport.post_json(path, payload)?;
        if status == STATUS_OK {
            Ok(true)
        } else {
            error!("POST {} returned an error ({}): {}", path, status, body);
            Ok(false)
        }
    }
}
