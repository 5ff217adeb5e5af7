use crate::cpu::Interrupt;

use super::super::super::io;
use super::super::MemoryBus;

impl MemoryBus {
    pub(super) fn write8_mmio_impl(&mut self, addr: u16, value: u8, direct: bool) {
        match addr {
            // Writes to the ROM window drive the bank controller.
            0x0000..=0x7FFF | 0xA000..=0xBFFF => {
                if let Some(cart) = self.cartridge.as_mut() {
                    cart.write(addr, value);
                }
            }

            0x8000..=0x9FFF | 0xC000..=0xDFFF | 0xFE00..=0xFE9F | 0xFF80..=0xFFFE => {
                self.memory[addr as usize] = value;
            }

            0xE000..=0xFDFF => self.memory[(addr - 0x2000) as usize] = value,

            0xFEA0..=0xFEFF => {}

            io::P1 => self.joypad.write(value),
            io::SB => self.serial.write_sb(value),
            io::SC => {
                if self.serial.write_sc(value) {
                    self.request_interrupt(Interrupt::Serial);
                }
            }

            io::DIV => self.write_div(value, direct),
            io::TAC => self.write_tac(value),

            // Only the five request bits exist.
            io::IF => self.if_reg = value & 0x1F,

            0xFF10..=0xFF3F => self.apu.write(addr, value),

            io::LCDC => self.write_lcdc(value),
            io::STAT => self.write_stat(value, direct),
            // LY belongs to the video controller; CPU writes are dropped.
            io::LY => {
                if direct {
                    self.memory[addr as usize] = value;
                }
            }
            io::LYC => self.write_lyc(value),
            io::DMA => self.do_oam_dma(value),

            0xFF00..=0xFF7F => self.memory[addr as usize] = value,

            io::IE => self.ie_reg = value,
        }
    }
}
