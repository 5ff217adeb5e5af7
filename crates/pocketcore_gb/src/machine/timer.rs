/// Timer / divider unit.
///
/// Time is counted in clock ticks (4 per machine cycle). DIV advances once
/// every 256 clocks; TIMA advances once per selected period while TAC bit 2
/// is set. The registers themselves live on the bus. This unit only turns
/// elapsed clocks into increment counts, and the bus applies them (see
/// `bus/timer_io.rs`).
pub(super) struct Timer {
    /// Clocks accumulated towards the next DIV increment.
    div_clocks: u32,
    /// Clocks accumulated towards the next TIMA increment.
    tima_clocks: u32,
    /// Clocks per TIMA increment, selected by TAC[1:0].
    period: u32,
}

/// Clocks per DIV increment (16384 Hz).
pub(super) const DIV_PERIOD: u32 = 256;

/// TIMA input clock periods indexed by TAC[1:0]:
/// 4096 Hz, 262144 Hz, 65536 Hz, 16384 Hz.
const TIMA_PERIODS: [u32; 4] = [1024, 16, 64, 256];

/// Increments produced by one call to [`Timer::tick`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub(super) struct TimerTicks {
    pub(super) div: u32,
    pub(super) tima: u32,
}

impl Timer {
    pub(super) fn new() -> Self {
        Self {
            div_clocks: 0,
            tima_clocks: 0,
            period: TIMA_PERIODS[0],
        }
    }

    /// Pick the TIMA period from a TAC value.
    ///
    /// Clocks accumulated under the old period are folded into the new one,
    /// so a switch to a faster period never releases a burst of increments.
    pub(super) fn set_tac(&mut self, tac: u8) {
        let period = TIMA_PERIODS[(tac & 0x03) as usize];
        if period != self.period {
            self.tima_clocks %= period;
            self.period = period;
        }
    }

    #[cfg(test)]
    pub(super) fn period(&self) -> u32 {
        self.period
    }

    /// Any DIV write clears the divider's accumulated phase.
    pub(super) fn reset_div(&mut self) {
        self.div_clocks = 0;
    }

    /// Advance by `clocks` clock ticks.
    pub(super) fn tick(&mut self, clocks: u32, tima_enabled: bool) -> TimerTicks {
        self.div_clocks += clocks;
        let div = self.div_clocks / DIV_PERIOD;
        self.div_clocks %= DIV_PERIOD;

        let mut tima = 0;
        if tima_enabled {
            self.tima_clocks += clocks;
            tima = self.tima_clocks / self.period;
            self.tima_clocks %= self.period;
        }

        TimerTicks { div, tima }
    }
}
