//! Light adapters for home-automation hosts.
//!
//! A host shows one master light for the whole wall and one light per panel.
//! The adapters keep the values the host displays and borrow the device
//! client for every call, so one client can serve all of them.

mod panel;
mod wall;

pub use panel::PanelLight;
pub use wall::{TurnOn, WallLight};
