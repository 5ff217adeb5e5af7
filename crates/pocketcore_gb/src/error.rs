use std::io;

use thiserror::Error;

/// Reasons a cartridge image can be rejected at load time.
///
/// All of these are recoverable: the machine keeps whatever cartridge it had
/// before the failed load (or none at all).
#[derive(Error, Debug)]
pub enum CartridgeError {
    #[error("failed to read cartridge image: {0}")]
    Io(#[from] io::Error),
    #[error("cartridge image is {len} bytes, smaller than the 0x180-byte header region")]
    TooSmall { len: usize },
    #[error("unknown cartridge type code 0x{0:02X}")]
    UnknownCartridgeType(u8),
    #[error("unsupported cartridge type 0x{code:02X} ({name})")]
    UnsupportedCartridgeType { code: u8, name: &'static str },
    #[error("unknown ROM size code 0x{0:02X}")]
    UnknownRomSize(u8),
    #[error("unknown RAM size code 0x{0:02X}")]
    UnknownRamSize(u8),
    #[error("header declares {declared} bytes of ROM but the image is {actual} bytes")]
    RomSizeMismatch { declared: usize, actual: usize },
}

/// Fatal conditions raised while executing instructions.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EmulationError {
    /// An opcode with no defined behaviour was fetched.
    ///
    /// Real silicon locks up on these; the core stops and reports instead.
    #[error(
        "undefined opcode {prefix}{opcode:02X} ({mnemonic}) at 0x{pc:04X}, operands [{operands}]; {registers}",
        prefix = table_prefix(.prefixed),
        operands = format_operands(.operands)
    )]
    UndefinedOpcode {
        pc: u16,
        opcode: u8,
        prefixed: bool,
        mnemonic: String,
        operands: Vec<u8>,
        registers: String,
    },
}

fn table_prefix(prefixed: &bool) -> &'static str {
    if *prefixed {
        "CB "
    } else {
        ""
    }
}

fn format_operands(bytes: &[u8]) -> String {
    bytes
        .iter()
        .map(|b| format!("{b:02X}"))
        .collect::<Vec<_>>()
        .join(" ")
}
