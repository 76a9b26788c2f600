//! Device abstraction layer for ColorWall walls.
//!
//! Provides the transport seam and the synchronizing device client.

pub mod color_wall;
pub mod transport;

pub use color_wall::{ColorWall, DeviceState};
pub use transport::{HttpTransport, Response, Transport};
