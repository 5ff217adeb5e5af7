/// Cartridge without a bank controller.
///
/// The whole 32 KiB ROM is mapped at 0x0000-0x7FFF and never changes.
/// External RAM, when the header declares any, is a flat array behind
/// 0xA000-0xBFFF.
pub(in super::super) struct PlainCartridge {
    rom: Vec<u8>,
    ram: Vec<u8>,
}

impl PlainCartridge {
    pub(super) fn new(rom: Vec<u8>, ram_size: usize) -> Self {
        Self {
            rom,
            ram: vec![0; ram_size],
        }
    }

    pub(super) fn rom_read(&self, addr: u16) -> u8 {
        self.rom.get(addr as usize).copied().unwrap_or(0xFF)
    }

    pub(super) fn ram_read(&self, addr: u16) -> u8 {
        let offset = (addr as usize).wrapping_sub(0xA000);
        self.ram.get(offset).copied().unwrap_or(0xFF)
    }

    pub(super) fn ram_write(&mut self, addr: u16, value: u8) {
        let offset = (addr as usize).wrapping_sub(0xA000);
        if let Some(byte) = self.ram.get_mut(offset) {
            *byte = value;
        }
    }
}
