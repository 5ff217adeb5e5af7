use crate::cpu::instruction::{AluOp, Instruction, RotOp};
use crate::cpu::{Bus, Cpu, Flags};

impl Cpu {
    pub(super) fn exec_stop<B: Bus>(&mut self, bus: &mut B) -> u32 {
        // STOP is a 2-byte instruction; the padding byte is ignored but
        // still consumed so PC matches hardware.
        let _padding = self.fetch8(bus);
        log::debug!("GB CPU: entering STOP at PC=0x{:04X}", self.regs.pc);
        self.stopped = true;
        self.halted = false;
        1
    }

    pub(super) fn exec_halt(&mut self) -> u32 {
        self.halted = true;
        1
    }

    pub(super) fn exec_di(&mut self) -> u32 {
        self.ime = false;
        self.ime_enable_pending = false;
        self.ime_enable_delay = false;
        1
    }

    pub(super) fn exec_ei(&mut self) -> u32 {
        // IME becomes 1 after the *next* instruction completes.
        self.ime_enable_pending = true;
        1
    }

    pub(super) fn exec_alu(&mut self, op: AluOp, value: u8) {
        match op {
            AluOp::Add => self.alu_add(value, false),
            AluOp::Adc => self.alu_add(value, true),
            AluOp::Sub => self.alu_sub(value, false),
            AluOp::Sbc => self.alu_sub(value, true),
            AluOp::And => self.alu_and(value),
            AluOp::Xor => self.alu_xor(value),
            AluOp::Or => self.alu_or(value),
            AluOp::Cp => self.alu_cp(value),
        }
    }

    /// RLCA/RRCA/RLA/RRA: the CB rotates applied to A, except Z is always
    /// cleared.
    pub(super) fn exec_rotate_a(&mut self, instr: Instruction) -> u32 {
        let op = match instr {
            Instruction::Rlca => RotOp::Rlc,
            Instruction::Rrca => RotOp::Rrc,
            Instruction::Rla => RotOp::Rl,
            _ => RotOp::Rr,
        };
        self.regs.a = self.alu_rotate(op, self.regs.a);
        self.regs.f.set_zero(false);
        1
    }

    pub(super) fn exec_cpl(&mut self) -> u32 {
        self.regs.a = !self.regs.a;
        self.regs.f.insert(Flags::NEGATIVE | Flags::HALF_CARRY);
        1
    }

    pub(super) fn exec_scf(&mut self) -> u32 {
        self.regs.f.set_negative(false);
        self.regs.f.set_half_carry(false);
        self.regs.f.set_carry(true);
        1
    }

    pub(super) fn exec_ccf(&mut self) -> u32 {
        let carry = self.regs.f.carry();
        self.regs.f.set_negative(false);
        self.regs.f.set_half_carry(false);
        self.regs.f.set_carry(!carry);
        1
    }
}
