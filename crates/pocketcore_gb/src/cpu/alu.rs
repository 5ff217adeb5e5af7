use super::instruction::RotOp;
use super::{Cpu, Flags};

impl Cpu {
    /// Core 8-bit ADD/ADC operation on A.
    ///
    /// `use_carry` selects between ADD (false) and ADC (true).
    pub(super) fn alu_add(&mut self, value: u8, use_carry: bool) {
        let a = self.regs.a;
        let carry_in = u8::from(use_carry && self.regs.f.carry());

        let half = (a & 0x0F) + (value & 0x0F) + carry_in;
        let full = a as u16 + value as u16 + carry_in as u16;
        let result = full as u8;

        self.regs.a = result;
        self.regs.f = Flags::empty();
        self.regs.f.set_zero(result == 0);
        self.regs.f.set_half_carry(half & 0x10 != 0);
        self.regs.f.set_carry(full > 0xFF);
    }

    /// Core 8-bit SUB/SBC operation on A.
    ///
    /// `use_carry` selects between SUB (false) and SBC (true).
    pub(super) fn alu_sub(&mut self, value: u8, use_carry: bool) {
        let result = self.sub_flags(value, use_carry);
        self.regs.a = result;
    }

    /// Compare A with `value`, setting flags as if `A - value` was performed.
    /// A itself is not modified.
    #[inline]
    pub(super) fn alu_cp(&mut self, value: u8) {
        self.sub_flags(value, false);
    }

    fn sub_flags(&mut self, value: u8, use_carry: bool) -> u8 {
        let a = self.regs.a;
        let carry_in = i16::from(use_carry && self.regs.f.carry());

        let half = (a & 0x0F) as i16 - (value & 0x0F) as i16 - carry_in;
        let full = a as i16 - value as i16 - carry_in;
        let result = full as u8;

        self.regs.f = Flags::NEGATIVE;
        self.regs.f.set_zero(result == 0);
        self.regs.f.set_half_carry(half < 0);
        self.regs.f.set_carry(full < 0);
        result
    }

    #[inline]
    pub(super) fn alu_and(&mut self, value: u8) {
        let result = self.regs.a & value;
        self.regs.a = result;
        self.regs.f = Flags::HALF_CARRY;
        self.regs.f.set_zero(result == 0);
    }

    #[inline]
    pub(super) fn alu_or(&mut self, value: u8) {
        let result = self.regs.a | value;
        self.regs.a = result;
        self.regs.f = Flags::empty();
        self.regs.f.set_zero(result == 0);
    }

    #[inline]
    pub(super) fn alu_xor(&mut self, value: u8) {
        let result = self.regs.a ^ value;
        self.regs.a = result;
        self.regs.f = Flags::empty();
        self.regs.f.set_zero(result == 0);
    }

    /// Decimal adjust accumulator after BCD addition/subtraction.
    ///
    /// Uses C, H and N from the previous arithmetic op to pick the
    /// correction. Updates A, Z, H, C; leaves N unchanged.
    pub(super) fn alu_daa(&mut self) {
        let flags = self.regs.f;
        let mut a = self.regs.a;
        let mut adjust: u8 = if flags.carry() { 0x60 } else { 0x00 };
        if flags.half_carry() {
            adjust |= 0x06;
        }

        if !flags.negative() {
            if a & 0x0F > 0x09 {
                adjust |= 0x06;
            }
            if a > 0x99 {
                adjust |= 0x60;
            }
            a = a.wrapping_add(adjust);
        } else {
            a = a.wrapping_sub(adjust);
        }

        self.regs.f.set_carry(adjust >= 0x60);
        self.regs.f.set_half_carry(false);
        self.regs.f.set_zero(a == 0);
        self.regs.a = a;
    }

    /// 8-bit increment used by INC r and INC (HL). C is left unchanged.
    #[inline]
    pub(super) fn alu_inc8(&mut self, value: u8) -> u8 {
        let result = value.wrapping_add(1);
        self.regs.f.set_zero(result == 0);
        self.regs.f.set_negative(false);
        self.regs.f.set_half_carry(value & 0x0F == 0x0F);
        result
    }

    /// 8-bit decrement used by DEC r and DEC (HL). C is left unchanged.
    #[inline]
    pub(super) fn alu_dec8(&mut self, value: u8) -> u8 {
        let result = value.wrapping_sub(1);
        self.regs.f.set_zero(result == 0);
        self.regs.f.set_negative(true);
        self.regs.f.set_half_carry(value & 0x0F == 0);
        result
    }

    /// `ADD HL,rr`: Z unaffected, N cleared, H from bit 11, C from bit 15.
    #[inline]
    pub(super) fn alu_add16_hl(&mut self, value: u16) {
        let hl = self.regs.hl();
        let result = hl.wrapping_add(value);

        self.regs.f.set_negative(false);
        self.regs.f.set_half_carry((hl & 0x0FFF) + (value & 0x0FFF) > 0x0FFF);
        self.regs.f.set_carry(hl as u32 + value as u32 > 0xFFFF);

        self.regs.set_hl(result);
    }

    /// Signed 8-bit offset added to a 16-bit base, as used by ADD SP,r8
    /// and LD HL,SP+r8.
    ///
    /// Z and N are cleared; H and C are computed from the low byte.
    #[inline]
    pub(super) fn alu_add16_signed(&mut self, base: u16, imm8: u8) -> u16 {
        let offset = imm8 as i8 as i16 as u16;
        self.regs.f = Flags::empty();
        self.regs.f.set_half_carry((base & 0x000F) + (offset & 0x000F) > 0x000F);
        self.regs.f.set_carry((base & 0x00FF) + (offset & 0x00FF) > 0x00FF);
        base.wrapping_add(offset)
    }

    /// Rotate/shift group shared by the CB table and the accumulator
    /// rotates. Z is set from the result; N and H are cleared.
    pub(super) fn alu_rotate(&mut self, op: RotOp, value: u8) -> u8 {
        let carry_in = self.regs.f.carry();
        let (result, carry) = match op {
            RotOp::Rlc => (value.rotate_left(1), value & 0x80 != 0),
            RotOp::Rrc => (value.rotate_right(1), value & 0x01 != 0),
            RotOp::Rl => ((value << 1) | u8::from(carry_in), value & 0x80 != 0),
            RotOp::Rr => ((value >> 1) | (u8::from(carry_in) << 7), value & 0x01 != 0),
            RotOp::Sla => (value << 1, value & 0x80 != 0),
            RotOp::Sra => ((value >> 1) | (value & 0x80), value & 0x01 != 0),
            RotOp::Swap => (value.rotate_left(4), false),
            RotOp::Srl => (value >> 1, value & 0x01 != 0),
        };

        self.regs.f = Flags::empty();
        self.regs.f.set_zero(result == 0);
        self.regs.f.set_carry(carry);
        result
    }
}
