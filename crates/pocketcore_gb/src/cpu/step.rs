use crate::error::EmulationError;

use super::{Bus, Cpu, IDLE_CYCLES};

impl Cpu {
    /// Execute one instruction, or service one interrupt, and return the
    /// number of machine cycles consumed.
    ///
    /// Order within a step:
    /// 1. a pending interrupt is serviced when IME is set (or, with IME
    ///    clear, only releases HALT);
    /// 2. a halted or stopped CPU idles for one cycle without fetching;
    /// 3. otherwise one opcode is fetched and executed.
    ///
    /// An undefined opcode is the only error; nothing is retried.
    pub fn step<B: Bus>(&mut self, bus: &mut B) -> Result<u32, EmulationError> {
        if self.stopped {
            return Ok(IDLE_CYCLES);
        }

        if let Some(cycles) = self.handle_interrupts(bus) {
            return Ok(cycles);
        }

        if self.halted {
            return Ok(IDLE_CYCLES);
        }

        let opcode_pc = self.regs.pc;
        let opcode = self.fetch8(bus);
        let cycles = self.exec_opcode(bus, opcode_pc, opcode)?;

        self.apply_ime_delay();
        Ok(cycles)
    }
}
