use crate::cpu::Interrupt;

use super::{
    apu::Apu,
    cartridge::{Cartridge, CartridgeHeader},
    joypad::{Button, Joypad},
    serial::Serial,
    timer::Timer,
    MEMORY_SIZE,
};

mod dma;
mod init;
mod lcd;
mod mmio;
mod timer_io;
mod traits;

/// Memory bus: address routing plus the side effects of the IO registers.
///
/// Plain memory regions (VRAM, WRAM, OAM, the IO register file and HRAM)
/// share one flat backing array indexed by address. Cartridge ROM and
/// external RAM are routed to the cartridge controller; IF/IE, the joypad,
/// serial, timer and sound registers have their own state.
pub struct MemoryBus {
    memory: Box<[u8]>,
    if_reg: u8,
    ie_reg: u8,
    cartridge: Option<Cartridge>,
    timer: Timer,
    serial: Serial,
    joypad: Joypad,
    apu: Apu,
}

impl Default for MemoryBus {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryBus {
    pub fn new() -> Self {
        let mut bus = Self {
            memory: vec![0; MEMORY_SIZE].into_boxed_slice(),
            if_reg: 0,
            ie_reg: 0,
            cartridge: None,
            timer: Timer::new(),
            serial: Serial::default(),
            joypad: Joypad::new(),
            apu: Apu::new(),
        };
        bus.apply_dmg_initial_io_state();
        bus
    }

    /// Return every register and RAM region to the power-on state while
    /// keeping the inserted cartridge.
    pub fn reset(&mut self) {
        let cartridge = self.cartridge.take();
        *self = Self::new();
        self.cartridge = cartridge;
    }

    pub(super) fn insert_cartridge(&mut self, cartridge: Cartridge) {
        self.cartridge = Some(cartridge);
    }

    pub fn cartridge_header(&self) -> Option<&CartridgeHeader> {
        self.cartridge.as_ref().map(Cartridge::header)
    }

    #[cfg(test)]
    pub(super) fn cartridge(&self) -> Option<&Cartridge> {
        self.cartridge.as_ref()
    }

    /// Read one byte as the CPU would see it.
    pub fn read_byte(&self, addr: u16) -> u8 {
        self.read8_mmio(addr)
    }

    /// Write one byte.
    ///
    /// `direct` marks an internal write from the video controller: DIV, LY
    /// and STAT then store the raw value instead of applying their CPU-side
    /// write semantics. Every other address behaves the same either way.
    pub fn write_byte(&mut self, addr: u16, value: u8, direct: bool) {
        self.write8_mmio(addr, value, direct);
    }

    pub fn read_short(&self, addr: u16) -> u16 {
        let lo = self.read_byte(addr);
        let hi = self.read_byte(addr.wrapping_add(1));
        u16::from_le_bytes([lo, hi])
    }

    pub fn write_short(&mut self, addr: u16, value: u16) {
        let [lo, hi] = value.to_le_bytes();
        self.write_byte(addr, lo, false);
        self.write_byte(addr.wrapping_add(1), hi, false);
    }

    pub fn request_interrupt(&mut self, interrupt: Interrupt) {
        self.if_reg |= interrupt.mask();
    }

    /// Returns `true` if the press raised the Joypad interrupt.
    pub(super) fn press_button(&mut self, button: Button) -> bool {
        let raise = self.joypad.press(button);
        if raise {
            self.request_interrupt(Interrupt::Joypad);
        }
        raise
    }

    pub(super) fn release_button(&mut self, button: Button) {
        self.joypad.release(button);
    }

    pub(super) fn serial_output(&self) -> &[u8] {
        &self.serial.output
    }

    /// Feed elapsed clock ticks to the audio placeholder.
    pub(super) fn tick_apu(&mut self, clocks: u32) {
        self.apu.tick(clocks);
    }

    #[cfg(test)]
    pub(super) fn apu_clocks(&self) -> u64 {
        self.apu.clocks()
    }
}
