mod apu;
mod bus;
mod cartridge;
mod gameboy;
pub mod io;
mod joypad;
mod serial;
mod timer;
mod video;

pub use bus::MemoryBus;
pub use cartridge::{CartridgeHeader, CartridgeType};
pub use gameboy::GameBoy;
pub use joypad::Button;
pub use video::{LcdControl, Mode, StatSelect, VideoBus, VideoController};

/// Total addressable memory for the Game Boy (64 KiB).
///
/// The bus keeps a flat backing array for everything that is plain memory
/// (VRAM, WRAM, OAM, IO, HRAM). Cartridge ROM and external RAM live in the
/// cartridge controller and are routed there by address.
const MEMORY_SIZE: usize = 0x10000;

/// Dots (pixel clocks) per CPU machine cycle.
pub const DOTS_PER_MCYCLE: u32 = 4;
/// Dots in one full frame: 154 scanlines of 456 dots.
pub const DOTS_PER_FRAME: u32 = 70_224;

#[cfg(test)]
mod tests;
