mod alu;
mod bus;
mod cb;
pub mod decode;
mod exec;
mod helpers;
pub mod instruction;
mod interrupts;
mod regs;
mod step;
mod trace;

pub use bus::Bus;
pub use instruction::Instruction;
pub use interrupts::Interrupt;
pub use regs::{Flags, Registers};

/// Machine cycles charged for servicing an interrupt.
pub const INTERRUPT_SERVICE_CYCLES: u32 = 5;
/// Machine cycles charged for a step spent halted or stopped.
pub const IDLE_CYCLES: u32 = 1;

/// Game Boy CPU core (LR35902).
///
/// Holds the register file and the control flags that live inside the CPU
/// (`ime`, `halted`, `stopped`). Everything memory-mapped, IE and IF
/// included, is reached through a [`Bus`].
#[derive(Clone, Debug)]
pub struct Cpu {
    pub regs: Registers,
    pub ime: bool,
    pub halted: bool,
    /// STOP low-power state. Left only through [`Cpu::wake_from_stop`],
    /// which the machine calls on a joypad press.
    stopped: bool,
    ime_enable_pending: bool,
    ime_enable_delay: bool,
}

impl Default for Cpu {
    fn default() -> Self {
        Self::new()
    }
}

impl Cpu {
    pub fn new() -> Self {
        Self {
            regs: Registers::dmg_boot(),
            ime: false,
            halted: false,
            stopped: false,
            ime_enable_pending: false,
            ime_enable_delay: false,
        }
    }

    /// Reset the CPU to the state the DMG boot ROM leaves behind.
    ///
    /// IME is clear when control reaches 0x0100; cartridge code enables
    /// interrupts itself via EI/RETI.
    pub fn reset(&mut self) {
        *self = Self::new();
    }

    #[inline]
    pub fn flags(&self) -> Flags {
        self.regs.f
    }

    #[inline]
    pub fn is_stopped(&self) -> bool {
        self.stopped
    }

    pub fn wake_from_stop(&mut self) {
        if self.stopped {
            log::debug!("GB CPU: leaving STOP at PC=0x{:04X}", self.regs.pc);
        }
        self.stopped = false;
    }
}
