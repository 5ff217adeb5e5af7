use crate::cpu::{Bus, Interrupt};

use super::super::video::VideoBus;
use super::MemoryBus;

impl Bus for MemoryBus {
    fn read8(&mut self, addr: u16) -> u8 {
        self.read8_mmio(addr)
    }

    fn write8(&mut self, addr: u16, value: u8) {
        self.write8_mmio(addr, value, false)
    }
}

impl VideoBus for MemoryBus {
    fn lcd_register(&self, addr: u16) -> u8 {
        self.memory[addr as usize]
    }

    fn set_lcd_register(&mut self, addr: u16, value: u8) {
        self.write8_mmio(addr, value, true)
    }

    fn vram(&self) -> &[u8] {
        &self.memory[0x8000..0xA000]
    }

    fn oam(&self) -> &[u8] {
        &self.memory[0xFE00..0xFEA0]
    }

    fn request_interrupt(&mut self, interrupt: Interrupt) {
        MemoryBus::request_interrupt(self, interrupt)
    }

    fn update_coincidence(&mut self) {
        MemoryBus::update_coincidence(self)
    }
}
