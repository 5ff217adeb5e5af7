use crate::error::EmulationError;

use super::decode::cb_entry;
use super::instruction::{Instruction, R8};
use super::{Bus, Cpu};

impl Cpu {
    /// Handle CB-prefixed instructions (bit operations, shifts, and rotates).
    ///
    /// The returned cost includes the prefix byte.
    pub(super) fn step_cb<B: Bus>(&mut self, bus: &mut B) -> Result<u32, EmulationError> {
        let prefix_pc = self.regs.pc.wrapping_sub(1);
        let opcode = self.fetch8(bus);
        let entry = cb_entry(opcode);
        let Some(instr) = entry.instruction else {
            return Err(self.undefined_opcode(bus, prefix_pc, opcode, true));
        };

        let cycles = match instr {
            Instruction::Rot(op, reg) => {
                let value = self.read_r8(bus, reg);
                let result = self.alu_rotate(op, value);
                self.write_r8(bus, reg, result);
                read_modify_write_cost(reg)
            }
            Instruction::Bit(bit, reg) => {
                let value = self.read_r8(bus, reg);
                // C is preserved.
                self.regs.f.set_zero(value & (1 << bit) == 0);
                self.regs.f.set_negative(false);
                self.regs.f.set_half_carry(true);
                if reg.is_memory() {
                    3
                } else {
                    2
                }
            }
            Instruction::Res(bit, reg) => {
                let value = self.read_r8(bus, reg) & !(1 << bit);
                self.write_r8(bus, reg, value);
                read_modify_write_cost(reg)
            }
            Instruction::Set(bit, reg) => {
                let value = self.read_r8(bus, reg) | (1 << bit);
                self.write_r8(bus, reg, value);
                read_modify_write_cost(reg)
            }
            _ => return Err(self.undefined_opcode(bus, prefix_pc, opcode, true)),
        };
        Ok(cycles)
    }
}

#[inline]
fn read_modify_write_cost(reg: R8) -> u32 {
    if reg.is_memory() {
        4
    } else {
        2
    }
}
