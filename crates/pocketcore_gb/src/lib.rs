pub mod cpu;
pub mod error;
pub mod machine;

pub use error::{CartridgeError, EmulationError};
pub use machine::{Button, CartridgeHeader, CartridgeType, GameBoy};

/// Logical screen width in pixels for the Game Boy DMG.
pub const SCREEN_WIDTH: usize = 160;
/// Logical screen height in pixels.
pub const SCREEN_HEIGHT: usize = 144;
