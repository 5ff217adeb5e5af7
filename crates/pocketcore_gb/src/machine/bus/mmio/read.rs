use super::super::super::io;
use super::super::MemoryBus;

impl MemoryBus {
    pub(super) fn read8_mmio_impl(&self, addr: u16) -> u8 {
        match addr {
            // Cartridge ROM and external RAM go through the controller. With
            // no cartridge inserted the bus floats high.
            0x0000..=0x7FFF | 0xA000..=0xBFFF => {
                self.cartridge.as_ref().map_or(0xFF, |cart| cart.read(addr))
            }

            // VRAM, WRAM, OAM and HRAM are plain memory.
            0x8000..=0x9FFF | 0xC000..=0xDFFF | 0xFE00..=0xFE9F | 0xFF80..=0xFFFE => {
                self.memory[addr as usize]
            }

            // Echo RAM: 0xE000..0xFDFF mirrors 0xC000..0xDDFF.
            0xE000..=0xFDFF => self.memory[(addr - 0x2000) as usize],

            // Unusable area.
            0xFEA0..=0xFEFF => 0xFF,

            io::P1 => self.joypad.read(),
            io::SB => self.serial.sb,
            io::SC => self.serial.read_sc(),
            io::TAC => self.memory[addr as usize] | 0xF8,
            io::IF => self.if_reg | 0xE0,
            0xFF10..=0xFF3F => self.apu.read(addr),
            io::STAT => self.memory[addr as usize] | 0x80,

            0xFF00..=0xFF7F => self.memory[addr as usize],

            io::IE => self.ie_reg,
        }
    }
}
