//! Configuration persistence module.
//!
//! Handles saving and loading the host configuration to/from disk.

pub mod config_file;

pub use config_file::*;
