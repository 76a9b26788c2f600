//! Wire protocol and data model for ColorWall devices.
//!
//! This module contains the effect registry, the typed effect parameters,
//! the panel model and the JSON payloads exchanged with the firmware.

pub mod commands;
pub mod effects;
pub mod panel;
pub mod registry;

pub use commands::*;
pub use effects::*;
pub use panel::Panel;
pub use registry::*;
