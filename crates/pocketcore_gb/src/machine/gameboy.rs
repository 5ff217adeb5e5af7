use std::path::Path;

use crate::cpu::Cpu;
use crate::error::{CartridgeError, EmulationError};

use super::{
    cartridge::{Cartridge, CartridgeHeader},
    joypad::Button,
    video::VideoController,
    MemoryBus, DOTS_PER_FRAME, DOTS_PER_MCYCLE,
};

/// High-level Game Boy machine.
///
/// Owns the CPU, the bus (with the cartridge, timer, joypad, serial and
/// audio state hanging off it) and the video controller. One call to
/// [`GameBoy::step`] runs one CPU instruction and advances everything else
/// by the same amount of time.
pub struct GameBoy {
    pub cpu: Cpu,
    pub(crate) bus: MemoryBus,
    pub(crate) video: VideoController,
}

impl Default for GameBoy {
    fn default() -> Self {
        Self::new()
    }
}

impl GameBoy {
    pub fn new() -> Self {
        Self {
            cpu: Cpu::new(),
            bus: MemoryBus::new(),
            video: VideoController::new(),
        }
    }

    /// Back to the post-boot state. The cartridge stays inserted, but its
    /// bank registers and RAM are left as they were.
    pub fn reset(&mut self) {
        self.cpu.reset();
        self.bus.reset();
        self.video = VideoController::new();
    }

    /// Validate a cartridge image and insert it.
    ///
    /// On failure the previously inserted cartridge (if any) stays in place.
    pub fn load_rom(&mut self, rom: Vec<u8>) -> Result<CartridgeHeader, CartridgeError> {
        let cartridge = Cartridge::from_rom(rom).inspect_err(|err| {
            log::error!("GB cartridge rejected: {err}");
        })?;

        let header = cartridge.header().clone();
        log::info!(
            "GB cartridge: title={:?} type={} rom={}KiB ram={}KiB",
            header.title,
            header.cartridge_type.name(),
            header.rom_size / 1024,
            header.ram_size / 1024,
        );
        self.bus.insert_cartridge(cartridge);
        Ok(header)
    }

    /// Read a cartridge image from disk and insert it.
    pub fn load_rom_file(&mut self, path: impl AsRef<Path>) -> Result<CartridgeHeader, CartridgeError> {
        let path = path.as_ref();
        let rom = std::fs::read(path).inspect_err(|err| {
            log::error!("GB cartridge: cannot read {}: {err}", path.display());
        })?;
        self.load_rom(rom)
    }

    pub fn cartridge_header(&self) -> Option<&CartridgeHeader> {
        self.bus.cartridge_header()
    }

    /// Run one CPU instruction (or one halted/stopped tick, or one interrupt
    /// dispatch) and advance video, timer and audio by the same time.
    ///
    /// Returns the machine cycles consumed.
    pub fn step(&mut self) -> Result<u32, EmulationError> {
        self.step_inner().map(|(cycles, _)| cycles)
    }

    fn step_inner(&mut self) -> Result<(u32, bool), EmulationError> {
        let cycles = self.cpu.step(&mut self.bus)?;
        let clocks = cycles * DOTS_PER_MCYCLE;
        let frame_done = self.video.step(&mut self.bus, clocks);
        self.bus.tick_timer(clocks);
        self.bus.tick_apu(clocks);
        Ok((cycles, frame_done))
    }

    /// Step until the video controller finishes a frame.
    ///
    /// With the LCD off no frame boundary ever arrives, so the loop also
    /// stops after one frame's worth of dots.
    pub fn run_frame(&mut self) -> Result<(), EmulationError> {
        let mut dots = 0u32;
        loop {
            let (cycles, frame_done) = self.step_inner()?;
            dots += cycles * DOTS_PER_MCYCLE;
            if frame_done || dots >= DOTS_PER_FRAME {
                return Ok(());
            }
        }
    }

    /// Row-major 160x144 buffer of shades 0-3 (0 is the lightest).
    ///
    /// BGP, OBP0 and OBP1 are already applied; the host only maps each
    /// shade to a display color.
    pub fn frame_buffer(&self) -> &[u8] {
        self.video.frame_buffer()
    }

    pub fn frame_count(&self) -> u64 {
        self.video.frame_count()
    }

    pub fn key_pressed(&mut self, button: Button) {
        if self.bus.press_button(button) {
            log::trace!("GB joypad: {button:?} pressed, interrupt requested");
        }
        self.cpu.wake_from_stop();
    }

    pub fn key_released(&mut self, button: Button) {
        self.bus.release_button(button);
    }

    /// Diagnostic line for the instruction about to execute.
    pub fn trace_line(&mut self) -> String {
        self.cpu.trace_line(&mut self.bus)
    }

    /// Bytes the program has sent over the serial port.
    pub fn serial_output(&self) -> &[u8] {
        self.bus.serial_output()
    }

    pub fn bus(&self) -> &MemoryBus {
        &self.bus
    }

    pub fn bus_mut(&mut self) -> &mut MemoryBus {
        &mut self.bus
    }
}
