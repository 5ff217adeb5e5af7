use crate::cpu::Interrupt;

use super::super::io;
use super::MemoryBus;

impl MemoryBus {
    /// DIV write: any CPU write clears the divider. A direct write stores
    /// the value as-is.
    pub(super) fn write_div(&mut self, value: u8, direct: bool) {
        if direct {
            self.memory[io::DIV as usize] = value;
        } else {
            self.memory[io::DIV as usize] = 0;
            self.timer.reset_div();
        }
    }

    pub(super) fn write_tac(&mut self, value: u8) {
        self.memory[io::TAC as usize] = value & 0x07;
        self.timer.set_tac(value);
    }

    /// Advance DIV and TIMA by `clocks` clock ticks.
    pub(in super::super) fn tick_timer(&mut self, clocks: u32) {
        let tima_enabled = self.memory[io::TAC as usize] & 0x04 != 0;
        let ticks = self.timer.tick(clocks, tima_enabled);

        if ticks.div != 0 {
            let div = &mut self.memory[io::DIV as usize];
            *div = div.wrapping_add(ticks.div as u8);
        }
        for _ in 0..ticks.tima {
            self.increment_tima();
        }
    }

    /// TIMA overflow reloads from TMA and requests the Timer interrupt.
    fn increment_tima(&mut self) {
        let (next, overflow) = self.memory[io::TIMA as usize].overflowing_add(1);
        if overflow {
            let tma = self.memory[io::TMA as usize];
            self.memory[io::TIMA as usize] = tma;
            self.request_interrupt(Interrupt::Timer);
            log::trace!("GB timer: TIMA overflow, reload 0x{tma:02X}");
        } else {
            self.memory[io::TIMA as usize] = next;
        }
    }
}
