mod header;
mod mbc1;
mod plain;

pub use header::{CartridgeHeader, CartridgeType};
use mbc1::Mbc1Cartridge;
use plain::PlainCartridge;

#[cfg(test)]
pub(super) use header::build_test_rom;

use crate::error::CartridgeError;

/// Cartridge controller: the header plus the mapper it selects.
pub(super) struct Cartridge {
    header: CartridgeHeader,
    mapper: Mapper,
}

pub(super) enum Mapper {
    Plain(PlainCartridge),
    Mbc1(Mbc1Cartridge),
}

impl Cartridge {
    /// Validate the header and build the matching mapper.
    ///
    /// ROM storage takes ownership of the image; RAM is zero-filled to the
    /// declared size.
    pub(super) fn from_rom(rom: Vec<u8>) -> Result<Self, CartridgeError> {
        let header = CartridgeHeader::parse(&rom)?;
        let mapper = match header.cartridge_type {
            CartridgeType::RomOnly => Mapper::Plain(PlainCartridge::new(rom, header.ram_size)),
            _ => Mapper::Mbc1(Mbc1Cartridge::new(rom, header.ram_size)),
        };
        Ok(Self { header, mapper })
    }

    pub(super) fn header(&self) -> &CartridgeHeader {
        &self.header
    }

    #[cfg(test)]
    pub(super) fn mapper(&self) -> &Mapper {
        &self.mapper
    }

    /// Read from the ROM window (0x0000-0x7FFF) or the RAM window
    /// (0xA000-0xBFFF). Anything else reads as open bus.
    pub(super) fn read(&self, addr: u16) -> u8 {
        match (addr, &self.mapper) {
            (0x0000..=0x7FFF, Mapper::Plain(m)) => m.rom_read(addr),
            (0x0000..=0x7FFF, Mapper::Mbc1(m)) => m.rom_read(addr),
            (0xA000..=0xBFFF, Mapper::Plain(m)) => m.ram_read(addr),
            (0xA000..=0xBFFF, Mapper::Mbc1(m)) => m.ram_read(addr),
            _ => 0xFF,
        }
    }

    /// Writes to the ROM window drive the bank controller; writes to the RAM
    /// window go to external RAM when it is mapped.
    pub(super) fn write(&mut self, addr: u16, value: u8) {
        match (addr, &mut self.mapper) {
            (0x0000..=0x7FFF, Mapper::Plain(_)) => {}
            (0x0000..=0x7FFF, Mapper::Mbc1(m)) => m.rom_write(addr, value),
            (0xA000..=0xBFFF, Mapper::Plain(m)) => m.ram_write(addr, value),
            (0xA000..=0xBFFF, Mapper::Mbc1(m)) => m.ram_write(addr, value),
            _ => {}
        }
    }
}
