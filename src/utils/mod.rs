pub mod parsing;

// Re-export commonly used items
pub use parsing::{device_to_hs, hs_to_device, remap};
