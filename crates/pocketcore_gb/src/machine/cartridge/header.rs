use crate::error::CartridgeError;

/// Offsets of the header fields the core cares about.
const TITLE_START: usize = 0x0134;
const TITLE_END: usize = 0x0144;
const TYPE_OFFSET: usize = 0x0147;
const ROM_SIZE_OFFSET: usize = 0x0148;
const RAM_SIZE_OFFSET: usize = 0x0149;

/// Smallest image that still contains the whole header region.
pub(super) const HEADER_REGION_LEN: usize = 0x0180;

pub(super) const ROM_BANK_SIZE: usize = 0x4000;
pub(super) const RAM_BANK_SIZE: usize = 0x2000;

/// Cartridge type byte at 0x0147.
///
/// Every code the header can legally carry is named so load failures can say
/// what the cartridge actually was; only the plain and MBC1 families are
/// emulated.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CartridgeType {
    RomOnly,
    Mbc1,
    Mbc1Ram,
    Mbc1RamBattery,
    Mbc2,
    Mbc2Battery,
    RomRam,
    RomRamBattery,
    Mmm01,
    Mmm01Ram,
    Mmm01RamBattery,
    Mbc3TimerBattery,
    Mbc3TimerRamBattery,
    Mbc3,
    Mbc3Ram,
    Mbc3RamBattery,
    Mbc5,
    Mbc5Ram,
    Mbc5RamBattery,
    Mbc5Rumble,
    Mbc5RumbleRam,
    Mbc5RumbleRamBattery,
    Mbc6,
    Mbc7SensorRumbleRamBattery,
    PocketCamera,
    BandaiTama5,
    HuC3,
    HuC1RamBattery,
}

impl CartridgeType {
    pub fn from_code(code: u8) -> Option<Self> {
        use CartridgeType::*;
        let kind = match code {
            0x00 => RomOnly,
            0x01 => Mbc1,
            0x02 => Mbc1Ram,
            0x03 => Mbc1RamBattery,
            0x05 => Mbc2,
            0x06 => Mbc2Battery,
            0x08 => RomRam,
            0x09 => RomRamBattery,
            0x0B => Mmm01,
            0x0C => Mmm01Ram,
            0x0D => Mmm01RamBattery,
            0x0F => Mbc3TimerBattery,
            0x10 => Mbc3TimerRamBattery,
            0x11 => Mbc3,
            0x12 => Mbc3Ram,
            0x13 => Mbc3RamBattery,
            0x19 => Mbc5,
            0x1A => Mbc5Ram,
            0x1B => Mbc5RamBattery,
            0x1C => Mbc5Rumble,
            0x1D => Mbc5RumbleRam,
            0x1E => Mbc5RumbleRamBattery,
            0x20 => Mbc6,
            0x22 => Mbc7SensorRumbleRamBattery,
            0xFC => PocketCamera,
            0xFD => BandaiTama5,
            0xFE => HuC3,
            0xFF => HuC1RamBattery,
            _ => return None,
        };
        Some(kind)
    }

    pub fn name(self) -> &'static str {
        use CartridgeType::*;
        match self {
            RomOnly => "ROM ONLY",
            Mbc1 => "MBC1",
            Mbc1Ram => "MBC1+RAM",
            Mbc1RamBattery => "MBC1+RAM+BATTERY",
            Mbc2 => "MBC2",
            Mbc2Battery => "MBC2+BATTERY",
            RomRam => "ROM+RAM",
            RomRamBattery => "ROM+RAM+BATTERY",
            Mmm01 => "MMM01",
            Mmm01Ram => "MMM01+RAM",
            Mmm01RamBattery => "MMM01+RAM+BATTERY",
            Mbc3TimerBattery => "MBC3+TIMER+BATTERY",
            Mbc3TimerRamBattery => "MBC3+TIMER+RAM+BATTERY",
            Mbc3 => "MBC3",
            Mbc3Ram => "MBC3+RAM",
            Mbc3RamBattery => "MBC3+RAM+BATTERY",
            Mbc5 => "MBC5",
            Mbc5Ram => "MBC5+RAM",
            Mbc5RamBattery => "MBC5+RAM+BATTERY",
            Mbc5Rumble => "MBC5+RUMBLE",
            Mbc5RumbleRam => "MBC5+RUMBLE+RAM",
            Mbc5RumbleRamBattery => "MBC5+RUMBLE+RAM+BATTERY",
            Mbc6 => "MBC6",
            Mbc7SensorRumbleRamBattery => "MBC7+SENSOR+RUMBLE+RAM+BATTERY",
            PocketCamera => "POCKET CAMERA",
            BandaiTama5 => "BANDAI TAMA5",
            HuC3 => "HuC3",
            HuC1RamBattery => "HuC1+RAM+BATTERY",
        }
    }

    /// Plain ROM and the MBC1 family are the only mappers emulated.
    pub fn is_supported(self) -> bool {
        matches!(
            self,
            CartridgeType::RomOnly
                | CartridgeType::Mbc1
                | CartridgeType::Mbc1Ram
                | CartridgeType::Mbc1RamBattery
        )
    }
}

/// Fields extracted from the cartridge header.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CartridgeHeader {
    /// Internal title with trailing NUL padding removed.
    pub title: String,
    pub cartridge_type: CartridgeType,
    /// Declared ROM size in bytes.
    pub rom_size: usize,
    /// Declared external RAM size in bytes (0 when the cartridge has none).
    pub ram_size: usize,
}

impl CartridgeHeader {
    /// Parse and validate the header of a raw cartridge image.
    ///
    /// Checks run in a fixed order so the first problem found is the one
    /// reported: header region present, type code known, type supported,
    /// size codes known, declared ROM size equal to the image length.
    pub fn parse(rom: &[u8]) -> Result<Self, CartridgeError> {
        if rom.len() < HEADER_REGION_LEN {
            return Err(CartridgeError::TooSmall { len: rom.len() });
        }

        let title = rom[TITLE_START..TITLE_END]
            .iter()
            .take_while(|&&b| b != 0)
            .map(|&b| if b.is_ascii_graphic() || b == b' ' { b as char } else { '?' })
            .collect::<String>()
            .trim_end()
            .to_string();

        let type_code = rom[TYPE_OFFSET];
        let cartridge_type = CartridgeType::from_code(type_code)
            .ok_or(CartridgeError::UnknownCartridgeType(type_code))?;
        if !cartridge_type.is_supported() {
            return Err(CartridgeError::UnsupportedCartridgeType {
                code: type_code,
                name: cartridge_type.name(),
            });
        }

        let rom_code = rom[ROM_SIZE_OFFSET];
        let rom_size = rom_size_from_code(rom_code).ok_or(CartridgeError::UnknownRomSize(rom_code))?;
        let ram_code = rom[RAM_SIZE_OFFSET];
        let ram_size = ram_size_from_code(ram_code).ok_or(CartridgeError::UnknownRamSize(ram_code))?;

        if rom_size != rom.len() {
            return Err(CartridgeError::RomSizeMismatch {
                declared: rom_size,
                actual: rom.len(),
            });
        }

        Ok(Self {
            title,
            cartridge_type,
            rom_size,
            ram_size,
        })
    }

    pub fn rom_banks(&self) -> usize {
        self.rom_size / ROM_BANK_SIZE
    }
}

/// Byte size declared by the ROM size code at 0x0148.
pub(super) fn rom_size_from_code(code: u8) -> Option<usize> {
    match code {
        0x00..=0x08 => Some((32 * 1024) << code),
        0x52 => Some(72 * ROM_BANK_SIZE),
        0x53 => Some(80 * ROM_BANK_SIZE),
        0x54 => Some(96 * ROM_BANK_SIZE),
        _ => None,
    }
}

/// Byte size declared by the RAM size code at 0x0149.
pub(super) fn ram_size_from_code(code: u8) -> Option<usize> {
    match code {
        0x00 => Some(0),
        0x01 => Some(2 * 1024),
        0x02 => Some(8 * 1024),
        0x03 => Some(32 * 1024),
        0x04 => Some(128 * 1024),
        0x05 => Some(64 * 1024),
        _ => None,
    }
}

#[cfg(test)]
pub(crate) fn build_test_rom(type_code: u8, rom_code: u8, ram_code: u8, title: &str) -> Vec<u8> {
    let size = rom_size_from_code(rom_code).unwrap_or(HEADER_REGION_LEN);
    let mut rom = vec![0u8; size];
    let bytes = title.as_bytes();
    let len = bytes.len().min(TITLE_END - TITLE_START);
    rom[TITLE_START..TITLE_START + len].copy_from_slice(&bytes[..len]);
    rom[TYPE_OFFSET] = type_code;
    rom[ROM_SIZE_OFFSET] = rom_code;
    rom[RAM_SIZE_OFFSET] = ram_code;
    rom
}
