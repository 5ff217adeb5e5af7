use super::header::{RAM_BANK_SIZE, ROM_BANK_SIZE};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(super) enum BankingMode {
    /// The 2-bit secondary register supplies ROM bank bits 5-6.
    Simple,
    /// The 2-bit secondary register selects the RAM bank.
    Advanced,
}

/// MBC1 cartridge state.
///
/// ROM bank 0 is fixed at 0x0000-0x3FFF and 0x4000-0x7FFF shows a
/// switchable bank built from the 5-bit low register and the 2-bit
/// secondary register. External RAM is gated by the enable latch.
/// Battery persistence is not modelled.
pub(in super::super) struct Mbc1Cartridge {
    rom: Vec<u8>,
    ram: Vec<u8>,
    num_rom_banks: usize,
    rom_bank_low5: u8,
    secondary: u8,
    ram_enabled: bool,
    banking_mode: BankingMode,
}

impl Mbc1Cartridge {
    pub(super) fn new(rom: Vec<u8>, ram_size: usize) -> Self {
        let num_rom_banks = (rom.len() / ROM_BANK_SIZE).max(1);
        Self {
            rom,
            ram: vec![0; ram_size],
            num_rom_banks,
            rom_bank_low5: 1,
            secondary: 0,
            ram_enabled: false,
            banking_mode: BankingMode::Simple,
        }
    }

    /// Bank currently visible at 0x4000-0x7FFF.
    ///
    /// A low register of 0 selects bank 1, which is why banks 0x20, 0x40
    /// and 0x60 can never be mapped here. The number wraps to the ROM size,
    /// and a wrap onto bank 0 also selects bank 1.
    pub(super) fn rom_bank(&self) -> usize {
        let mut bank = match self.rom_bank_low5 & 0x1F {
            0 => 1,
            low => low as usize,
        };
        if self.banking_mode == BankingMode::Simple {
            bank |= (self.secondary as usize & 0x03) << 5;
        }
        match bank % self.num_rom_banks {
            0 => 1,
            wrapped => wrapped,
        }
    }

    pub(super) fn ram_bank(&self) -> usize {
        match self.banking_mode {
            BankingMode::Simple => 0,
            BankingMode::Advanced => self.secondary as usize & 0x03,
        }
    }

    #[cfg(test)]
    pub(super) fn ram_enabled(&self) -> bool {
        self.ram_enabled
    }

    #[cfg(test)]
    pub(super) fn banking_mode(&self) -> BankingMode {
        self.banking_mode
    }

    pub(super) fn rom_read(&self, addr: u16) -> u8 {
        let index = match addr {
            0x0000..=0x3FFF => addr as usize,
            _ => self.rom_bank() * ROM_BANK_SIZE + (addr as usize & 0x3FFF),
        };
        self.rom.get(index).copied().unwrap_or(0xFF)
    }

    fn ram_index(&self, addr: u16) -> Option<usize> {
        if !self.ram_enabled || self.ram.is_empty() {
            return None;
        }
        let index = self.ram_bank() * RAM_BANK_SIZE + (addr as usize - 0xA000);
        (index < self.ram.len()).then_some(index)
    }

    pub(super) fn ram_read(&self, addr: u16) -> u8 {
        self.ram_index(addr).map_or(0xFF, |i| self.ram[i])
    }

    pub(super) fn ram_write(&mut self, addr: u16, value: u8) {
        if let Some(i) = self.ram_index(addr) {
            self.ram[i] = value;
        }
    }

    pub(super) fn rom_write(&mut self, addr: u16, value: u8) {
        match addr {
            0x0000..=0x1FFF => {
                // Any non-zero low nibble enables RAM.
                self.ram_enabled = (value & 0x0F) != 0;
            }
            0x2000..=0x3FFF => {
                self.rom_bank_low5 = value & 0x1F;
                log::trace!("GB MBC1: ROM bank -> {}", self.rom_bank());
            }
            0x4000..=0x5FFF => {
                self.secondary = value & 0x03;
                log::trace!(
                    "GB MBC1: secondary bank register=0x{:02X} (ROM bank {}, RAM bank {})",
                    self.secondary,
                    self.rom_bank(),
                    self.ram_bank()
                );
            }
            0x6000..=0x7FFF => {
                self.banking_mode = if value & 0x01 != 0 {
                    BankingMode::Advanced
                } else {
                    BankingMode::Simple
                };
                log::debug!("GB MBC1: banking mode {:?}", self.banking_mode);
            }
            _ => {}
        }
    }
}
