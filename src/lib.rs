//! ColorWall Library
//!
//! A Rust control client for ColorWall networked RGB light-panel walls.
//!
//! # Features
//!
//! - Switch the wall on/off and set master brightness
//! - Read and write per-panel hue, saturation and brightness
//! - Start any of the six firmware effects with typed parameters
//! - Keep a local snapshot of the device state, refreshed by `update()`
//!
//! # Example
//!
//! ```no_run
//! use color_wall::ColorWall;
//! use color_wall::protocol::{Effect, Wash};
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     ColorWall::validate_connection("192.168.1.50")?;
//!
//!     let mut wall = ColorWall::new("192.168.1.50")?;
//!     wall.update()?;
//!     println!("{}", wall.state());
//!
//!     let wash = Effect::Wash(Wash { speed: 3, base_hue: 160, delta_hue: 24 });
//!     if !wall.set_effect(&wash)? {
//!         eprintln!("device rejected the effect");
//!     }
//!
//!     Ok(())
//! }
//! ```

pub mod config;
pub mod device;
pub mod error;
pub mod light;
pub mod protocol;
pub mod storage;
pub mod utils;

#[cfg(test)]
mod log_capture;

// Re-exports for convenience
pub use config::{AppConfig, EffectOptions};
pub use device::{ColorWall, DeviceState};
pub use error::{ColorWallError, Result};
pub use light::{PanelLight, TurnOn, WallLight};
pub use protocol::{Effect, EffectKind, Panel};
