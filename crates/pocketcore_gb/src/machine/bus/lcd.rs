use crate::cpu::Interrupt;

use super::super::{io, video::Mode};
use super::MemoryBus;

/// STAT bits 0-1 hold the mode, bit 2 the coincidence flag.
const STAT_MODE_MASK: u8 = 0x03;
const STAT_COINCIDENCE: u8 = 0x04;
const STAT_LYC_SELECT: u8 = 0x40;
/// Bits 3-6 are the only ones the CPU can change.
const STAT_WRITABLE: u8 = 0x78;

impl MemoryBus {
    #[inline]
    pub(super) fn lcd_enabled(&self) -> bool {
        self.memory[io::LCDC as usize] & 0x80 != 0
    }

    pub(super) fn write_lcdc(&mut self, value: u8) {
        let was_enabled = self.lcd_enabled();
        self.memory[io::LCDC as usize] = value;
        let now_enabled = self.lcd_enabled();

        if was_enabled && !now_enabled {
            // LCD off: STAT reports mode 0 and LY restarts from the top.
            self.memory[io::STAT as usize] &= !STAT_MODE_MASK;
            self.memory[io::LY as usize] = 0;
            log::debug!("GB LCD: display disabled");
        } else if !was_enabled && now_enabled {
            let stat = self.memory[io::STAT as usize] & !STAT_MODE_MASK;
            self.memory[io::STAT as usize] = stat | Mode::OamScan as u8;
            self.update_coincidence();
            log::debug!("GB LCD: display enabled");
        }
    }

    pub(super) fn write_stat(&mut self, value: u8, direct: bool) {
        let current = self.memory[io::STAT as usize];
        self.memory[io::STAT as usize] = if direct {
            value
        } else {
            (current & !STAT_WRITABLE) | (value & STAT_WRITABLE)
        };
    }

    pub(super) fn write_lyc(&mut self, value: u8) {
        self.memory[io::LYC as usize] = value;
        self.update_coincidence();
    }

    /// Compare LY with LYC, update STAT's coincidence bit and request the
    /// STAT interrupt on a match when its select bit is set.
    pub(super) fn update_coincidence(&mut self) {
        let ly = self.memory[io::LY as usize];
        let lyc = self.memory[io::LYC as usize];
        let mut stat = self.memory[io::STAT as usize];
        if ly == lyc {
            stat |= STAT_COINCIDENCE;
            if stat & STAT_LYC_SELECT != 0 {
                log::trace!("GB LCD: LY=LYC={ly} STAT interrupt");
                self.request_interrupt(Interrupt::LcdStat);
            }
        } else {
            stat &= !STAT_COINCIDENCE;
        }
        self.memory[io::STAT as usize] = stat;
    }
}
