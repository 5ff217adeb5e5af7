use super::{Bus, Cpu, INTERRUPT_SERVICE_CYCLES};

/// Address of the interrupt-request register.
pub const IF_ADDR: u16 = 0xFF0F;
/// Address of the interrupt-enable register.
pub const IE_ADDR: u16 = 0xFFFF;

/// Interrupt sources in priority order (lowest bit wins).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Interrupt {
    VBlank = 0,
    LcdStat = 1,
    Timer = 2,
    Serial = 3,
    Joypad = 4,
}

impl Interrupt {
    pub const ALL: [Interrupt; 5] = [
        Interrupt::VBlank,
        Interrupt::LcdStat,
        Interrupt::Timer,
        Interrupt::Serial,
        Interrupt::Joypad,
    ];

    /// Bit mask of this source in IE/IF.
    #[inline]
    pub fn mask(self) -> u8 {
        1 << self as u8
    }

    #[inline]
    pub fn vector(self) -> u16 {
        0x0040 + (self as u16) * 8
    }

    /// Highest-priority source present in a pending mask.
    pub fn highest_pending(pending: u8) -> Option<Interrupt> {
        Interrupt::ALL
            .into_iter()
            .find(|interrupt| pending & interrupt.mask() != 0)
    }
}

impl Cpu {
    /// Check IE & IF and service at most one interrupt.
    ///
    /// Returns `Some(cycles)` if an interrupt was taken. A halted CPU with
    /// IME clear and something pending wakes up without servicing it.
    pub(super) fn handle_interrupts<B: Bus>(&mut self, bus: &mut B) -> Option<u32> {
        let ie = bus.read8(IE_ADDR);
        let iflags = bus.read8(IF_ADDR);
        let pending = ie & iflags & 0x1F;
        if pending == 0 {
            return None;
        }

        if !self.ime {
            if self.halted {
                log::trace!("GB CPU: HALT released by masked interrupt (IE&IF=0x{pending:02X})");
                self.halted = false;
            }
            return None;
        }

        let interrupt = Interrupt::highest_pending(pending)?;
        self.ime = false;
        self.halted = false;

        let pc = self.regs.pc;
        self.push_u16(bus, pc);
        bus.write8(IF_ADDR, iflags & !interrupt.mask());
        self.regs.pc = interrupt.vector();

        log::debug!(
            "GB CPU interrupt: {interrupt:?} vector=0x{:04X} pc=0x{pc:04X} sp=0x{:04X} IF=0x{:02X} IE=0x{ie:02X}",
            self.regs.pc,
            self.regs.sp,
            iflags & 0x1F,
        );

        Some(INTERRUPT_SERVICE_CYCLES)
    }

    /// Apply the delayed IME change requested by EI.
    #[inline]
    pub(super) fn apply_ime_delay(&mut self) {
        if self.ime_enable_delay {
            // Second step after EI: actually enable IME.
            self.ime = true;
            self.ime_enable_delay = false;
        } else if self.ime_enable_pending {
            // First step after EI: arm the delayed enable.
            self.ime_enable_pending = false;
            self.ime_enable_delay = true;
        }
    }
}
