mod control;
mod ld;
mod system;

use crate::error::EmulationError;

use super::decode::{base_entry, cb_entry};
use super::instruction::Instruction;
use super::{Bus, Cpu};

impl Cpu {
    /// Decode and execute a single fetched opcode and return its cost in
    /// machine cycles.
    ///
    /// `opcode_pc` is the address the opcode was fetched from; PC already
    /// points past it.
    pub(super) fn exec_opcode<B: Bus>(
        &mut self,
        bus: &mut B,
        opcode_pc: u16,
        opcode: u8,
    ) -> Result<u32, EmulationError> {
        let Some(instr) = base_entry(opcode).instruction else {
            return Err(self.undefined_opcode(bus, opcode_pc, opcode, false));
        };

        let cycles = match instr {
            Instruction::Nop => 1,
            Instruction::Stop => self.exec_stop(bus),
            Instruction::Halt => self.exec_halt(),
            Instruction::Di => self.exec_di(),
            Instruction::Ei => self.exec_ei(),

            Instruction::LdR16Imm(rr) => {
                let value = self.fetch16(bus);
                self.write_r16(rr, value);
                3
            }
            Instruction::LdR16MemA(mem) => self.exec_ld_mem_a(bus, mem),
            Instruction::LdAR16Mem(mem) => self.exec_ld_a_mem(bus, mem),
            Instruction::LdImm16Sp => self.exec_ld_a16_sp(bus),
            Instruction::IncR16(rr) => {
                let value = self.read_r16(rr).wrapping_add(1);
                self.write_r16(rr, value);
                2
            }
            Instruction::DecR16(rr) => {
                let value = self.read_r16(rr).wrapping_sub(1);
                self.write_r16(rr, value);
                2
            }
            Instruction::AddHlR16(rr) => {
                let value = self.read_r16(rr);
                self.alu_add16_hl(value);
                2
            }

            Instruction::IncR8(reg) => {
                let value = self.read_r8(bus, reg);
                let result = self.alu_inc8(value);
                self.write_r8(bus, reg, result);
                if reg.is_memory() {
                    3
                } else {
                    1
                }
            }
            Instruction::DecR8(reg) => {
                let value = self.read_r8(bus, reg);
                let result = self.alu_dec8(value);
                self.write_r8(bus, reg, result);
                if reg.is_memory() {
                    3
                } else {
                    1
                }
            }
            Instruction::LdR8Imm(reg) => {
                let value = self.fetch8(bus);
                self.write_r8(bus, reg, value);
                if reg.is_memory() {
                    3
                } else {
                    2
                }
            }
            Instruction::LdR8R8(dst, src) => {
                let value = self.read_r8(bus, src);
                self.write_r8(bus, dst, value);
                if dst.is_memory() || src.is_memory() {
                    2
                } else {
                    1
                }
            }

            Instruction::Rlca | Instruction::Rrca | Instruction::Rla | Instruction::Rra => {
                self.exec_rotate_a(instr)
            }
            Instruction::Daa => {
                self.alu_daa();
                1
            }
            Instruction::Cpl => self.exec_cpl(),
            Instruction::Scf => self.exec_scf(),
            Instruction::Ccf => self.exec_ccf(),

            Instruction::AluR8(op, reg) => {
                let value = self.read_r8(bus, reg);
                self.exec_alu(op, value);
                if reg.is_memory() {
                    2
                } else {
                    1
                }
            }
            Instruction::AluImm(op) => {
                let value = self.fetch8(bus);
                self.exec_alu(op, value);
                2
            }

            Instruction::Jr => self.jr(bus, true),
            Instruction::JrCond(cc) => self.jr(bus, self.condition(cc)),
            Instruction::Jp => self.jp_cond(bus, true),
            Instruction::JpCond(cc) => self.jp_cond(bus, self.condition(cc)),
            Instruction::JpHl => {
                self.regs.pc = self.regs.hl();
                1
            }
            Instruction::Call => self.call_cond(bus, true),
            Instruction::CallCond(cc) => self.call_cond(bus, self.condition(cc)),
            Instruction::Ret => self.exec_ret(bus),
            Instruction::RetCond(cc) => self.ret_cond(bus, self.condition(cc)),
            Instruction::Reti => self.exec_reti(bus),
            Instruction::Rst(vector) => self.exec_rst(bus, vector),
            Instruction::Push(rr) => {
                let value = self.read_r16_stack(rr);
                self.push_u16(bus, value);
                4
            }
            Instruction::Pop(rr) => {
                let value = self.pop_u16(bus);
                self.write_r16_stack(rr, value);
                3
            }

            Instruction::LdhImmA => {
                let addr = Cpu::high_page(self.fetch8(bus));
                self.exec_store_a(bus, addr, 3)
            }
            Instruction::LdhAImm => {
                let addr = Cpu::high_page(self.fetch8(bus));
                self.exec_load_a(bus, addr, 3)
            }
            Instruction::LdhCA => self.exec_store_a(bus, Cpu::high_page(self.regs.c), 2),
            Instruction::LdhAC => self.exec_load_a(bus, Cpu::high_page(self.regs.c), 2),
            Instruction::LdImm16A => {
                let addr = self.fetch16(bus);
                self.exec_store_a(bus, addr, 4)
            }
            Instruction::LdAImm16 => {
                let addr = self.fetch16(bus);
                self.exec_load_a(bus, addr, 4)
            }
            Instruction::AddSpImm => {
                let imm = self.fetch8(bus);
                self.regs.sp = self.alu_add16_signed(self.regs.sp, imm);
                4
            }
            Instruction::LdHlSpImm => {
                let imm = self.fetch8(bus);
                let value = self.alu_add16_signed(self.regs.sp, imm);
                self.regs.set_hl(value);
                3
            }
            Instruction::LdSpHl => {
                self.regs.sp = self.regs.hl();
                2
            }

            Instruction::Prefix => self.step_cb(bus)?,

            // CB-table descriptors never appear in the base table.
            Instruction::Rot(..)
            | Instruction::Bit(..)
            | Instruction::Res(..)
            | Instruction::Set(..) => {
                return Err(self.undefined_opcode(bus, opcode_pc, opcode, false));
            }
        };
        Ok(cycles)
    }

    /// Build the diagnostic for an opcode with no defined behaviour and log
    /// it.
    pub(super) fn undefined_opcode<B: Bus>(
        &self,
        bus: &mut B,
        pc: u16,
        opcode: u8,
        prefixed: bool,
    ) -> EmulationError {
        let entry = if prefixed {
            cb_entry(opcode)
        } else {
            base_entry(opcode)
        };
        let first_operand = pc.wrapping_add(if prefixed { 2 } else { 1 });
        let operands = (0..2u16)
            .map(|i| bus.read8(first_operand.wrapping_add(i)))
            .collect::<Vec<_>>();
        let registers = self.register_dump();

        log::error!(
            "GB CPU stopped: undefined opcode 0x{opcode:02X} ({mnemonic}) at PC=0x{pc:04X} ({registers})",
            mnemonic = entry.mnemonic,
        );

        EmulationError::UndefinedOpcode {
            pc,
            opcode,
            prefixed,
            mnemonic: entry.mnemonic.clone(),
            operands,
            registers,
        }
    }
}
