use std::fmt;

/// 8-bit operand in opcode encoding order: B, C, D, E, H, L, (HL), A.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum R8 {
    B,
    C,
    D,
    E,
    H,
    L,
    HlInd,
    A,
}

impl R8 {
    const ALL: [R8; 8] = [R8::B, R8::C, R8::D, R8::E, R8::H, R8::L, R8::HlInd, R8::A];

    #[inline]
    pub fn from_index(index: u8) -> Self {
        Self::ALL[(index & 0x07) as usize]
    }

    #[inline]
    pub fn is_memory(self) -> bool {
        self == R8::HlInd
    }
}

impl fmt::Display for R8 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            R8::B => "B",
            R8::C => "C",
            R8::D => "D",
            R8::E => "E",
            R8::H => "H",
            R8::L => "L",
            R8::HlInd => "(HL)",
            R8::A => "A",
        };
        f.write_str(name)
    }
}

/// 16-bit register pair used by loads and 16-bit arithmetic.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum R16 {
    Bc,
    De,
    Hl,
    Sp,
}

impl R16 {
    #[inline]
    pub fn from_index(index: u8) -> Self {
        match index & 0x03 {
            0 => R16::Bc,
            1 => R16::De,
            2 => R16::Hl,
            _ => R16::Sp,
        }
    }
}

impl fmt::Display for R16 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            R16::Bc => "BC",
            R16::De => "DE",
            R16::Hl => "HL",
            R16::Sp => "SP",
        })
    }
}

/// Register pair as addressed by PUSH/POP, where AF replaces SP.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum R16Stack {
    Bc,
    De,
    Hl,
    Af,
}

impl R16Stack {
    #[inline]
    pub fn from_index(index: u8) -> Self {
        match index & 0x03 {
            0 => R16Stack::Bc,
            1 => R16Stack::De,
            2 => R16Stack::Hl,
            _ => R16Stack::Af,
        }
    }
}

impl fmt::Display for R16Stack {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            R16Stack::Bc => "BC",
            R16Stack::De => "DE",
            R16Stack::Hl => "HL",
            R16Stack::Af => "AF",
        })
    }
}

/// Indirect address operand for `LD (rr),A` / `LD A,(rr)`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum R16Mem {
    Bc,
    De,
    HlInc,
    HlDec,
}

impl R16Mem {
    #[inline]
    pub fn from_index(index: u8) -> Self {
        match index & 0x03 {
            0 => R16Mem::Bc,
            1 => R16Mem::De,
            2 => R16Mem::HlInc,
            _ => R16Mem::HlDec,
        }
    }
}

impl fmt::Display for R16Mem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            R16Mem::Bc => "(BC)",
            R16Mem::De => "(DE)",
            R16Mem::HlInc => "(HL+)",
            R16Mem::HlDec => "(HL-)",
        })
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Cond {
    Nz,
    Z,
    Nc,
    C,
}

impl Cond {
    #[inline]
    pub fn from_index(index: u8) -> Self {
        match index & 0x03 {
            0 => Cond::Nz,
            1 => Cond::Z,
            2 => Cond::Nc,
            _ => Cond::C,
        }
    }
}

impl fmt::Display for Cond {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Cond::Nz => "NZ",
            Cond::Z => "Z",
            Cond::Nc => "NC",
            Cond::C => "C",
        })
    }
}

/// The eight accumulator operations of the 0x80..=0xBF block and their
/// immediate forms.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AluOp {
    Add,
    Adc,
    Sub,
    Sbc,
    And,
    Xor,
    Or,
    Cp,
}

impl AluOp {
    #[inline]
    pub fn from_index(index: u8) -> Self {
        match index & 0x07 {
            0 => AluOp::Add,
            1 => AluOp::Adc,
            2 => AluOp::Sub,
            3 => AluOp::Sbc,
            4 => AluOp::And,
            5 => AluOp::Xor,
            6 => AluOp::Or,
            _ => AluOp::Cp,
        }
    }

    /// Mnemonic prefix including the implicit `A,` operand where the
    /// conventional disassembly shows it.
    fn prefix(self) -> &'static str {
        match self {
            AluOp::Add => "ADD A,",
            AluOp::Adc => "ADC A,",
            AluOp::Sub => "SUB ",
            AluOp::Sbc => "SBC A,",
            AluOp::And => "AND ",
            AluOp::Xor => "XOR ",
            AluOp::Or => "OR ",
            AluOp::Cp => "CP ",
        }
    }
}

/// CB-prefixed rotate/shift group.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RotOp {
    Rlc,
    Rrc,
    Rl,
    Rr,
    Sla,
    Sra,
    Swap,
    Srl,
}

impl RotOp {
    #[inline]
    pub fn from_index(index: u8) -> Self {
        match index & 0x07 {
            0 => RotOp::Rlc,
            1 => RotOp::Rrc,
            2 => RotOp::Rl,
            3 => RotOp::Rr,
            4 => RotOp::Sla,
            5 => RotOp::Sra,
            6 => RotOp::Swap,
            _ => RotOp::Srl,
        }
    }
}

impl fmt::Display for RotOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            RotOp::Rlc => "RLC",
            RotOp::Rrc => "RRC",
            RotOp::Rl => "RL",
            RotOp::Rr => "RR",
            RotOp::Sla => "SLA",
            RotOp::Sra => "SRA",
            RotOp::Swap => "SWAP",
            RotOp::Srl => "SRL",
        })
    }
}

/// A decoded LR35902 instruction.
///
/// Immediate operands are not part of the descriptor; they are fetched from
/// the instruction stream while executing.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Instruction {
    Nop,
    Stop,
    Halt,
    Di,
    Ei,

    LdR16Imm(R16),
    LdR16MemA(R16Mem),
    LdAR16Mem(R16Mem),
    LdImm16Sp,
    IncR16(R16),
    DecR16(R16),
    AddHlR16(R16),

    IncR8(R8),
    DecR8(R8),
    LdR8Imm(R8),
    LdR8R8(R8, R8),

    Rlca,
    Rrca,
    Rla,
    Rra,
    Daa,
    Cpl,
    Scf,
    Ccf,

    AluR8(AluOp, R8),
    AluImm(AluOp),

    Jr,
    JrCond(Cond),
    Jp,
    JpCond(Cond),
    JpHl,
    Call,
    CallCond(Cond),
    Ret,
    RetCond(Cond),
    Reti,
    Rst(u8),
    Push(R16Stack),
    Pop(R16Stack),

    LdhImmA,
    LdhAImm,
    LdhCA,
    LdhAC,
    LdImm16A,
    LdAImm16,
    AddSpImm,
    LdHlSpImm,
    LdSpHl,

    /// The 0xCB prefix byte; the actual operation comes from the CB table.
    Prefix,
    Rot(RotOp, R8),
    Bit(u8, R8),
    Res(u8, R8),
    Set(u8, R8),
}

impl Instruction {
    /// Encoded length in bytes, opcode included.
    ///
    /// CB-table instructions report 1: the prefix byte is accounted for by
    /// `Prefix` itself.
    pub fn length(self) -> u8 {
        use Instruction::*;
        match self {
            LdR16Imm(_) | LdImm16Sp | Jp | JpCond(_) | Call | CallCond(_) | LdImm16A
            | LdAImm16 => 3,
            Stop | LdR8Imm(_) | AluImm(_) | Jr | JrCond(_) | LdhImmA | LdhAImm | AddSpImm
            | LdHlSpImm => 2,
            _ => 1,
        }
    }
}

impl fmt::Display for Instruction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        use Instruction::*;
        match *self {
            Nop => write!(f, "NOP"),
            Stop => write!(f, "STOP 0"),
            Halt => write!(f, "HALT"),
            Di => write!(f, "DI"),
            Ei => write!(f, "EI"),
            LdR16Imm(rr) => write!(f, "LD {rr},d16"),
            LdR16MemA(mem) => write!(f, "LD {mem},A"),
            LdAR16Mem(mem) => write!(f, "LD A,{mem}"),
            LdImm16Sp => write!(f, "LD (a16),SP"),
            IncR16(rr) => write!(f, "INC {rr}"),
            DecR16(rr) => write!(f, "DEC {rr}"),
            AddHlR16(rr) => write!(f, "ADD HL,{rr}"),
            IncR8(r) => write!(f, "INC {r}"),
            DecR8(r) => write!(f, "DEC {r}"),
            LdR8Imm(r) => write!(f, "LD {r},d8"),
            LdR8R8(dst, src) => write!(f, "LD {dst},{src}"),
            Rlca => write!(f, "RLCA"),
            Rrca => write!(f, "RRCA"),
            Rla => write!(f, "RLA"),
            Rra => write!(f, "RRA"),
            Daa => write!(f, "DAA"),
            Cpl => write!(f, "CPL"),
            Scf => write!(f, "SCF"),
            Ccf => write!(f, "CCF"),
            AluR8(op, r) => write!(f, "{}{r}", op.prefix()),
            AluImm(op) => write!(f, "{}d8", op.prefix()),
            Jr => write!(f, "JR r8"),
            JrCond(cc) => write!(f, "JR {cc},r8"),
            Jp => write!(f, "JP a16"),
            JpCond(cc) => write!(f, "JP {cc},a16"),
            JpHl => write!(f, "JP (HL)"),
            Call => write!(f, "CALL a16"),
            CallCond(cc) => write!(f, "CALL {cc},a16"),
            Ret => write!(f, "RET"),
            RetCond(cc) => write!(f, "RET {cc}"),
            Reti => write!(f, "RETI"),
            Rst(vector) => write!(f, "RST {vector:02X}H"),
            Push(rr) => write!(f, "PUSH {rr}"),
            Pop(rr) => write!(f, "POP {rr}"),
            LdhImmA => write!(f, "LDH (a8),A"),
            LdhAImm => write!(f, "LDH A,(a8)"),
            LdhCA => write!(f, "LD (C),A"),
            LdhAC => write!(f, "LD A,(C)"),
            LdImm16A => write!(f, "LD (a16),A"),
            LdAImm16 => write!(f, "LD A,(a16)"),
            AddSpImm => write!(f, "ADD SP,r8"),
            LdHlSpImm => write!(f, "LD HL,SP+r8"),
            LdSpHl => write!(f, "LD SP,HL"),
            Prefix => write!(f, "PREFIX CB"),
            Rot(op, r) => write!(f, "{op} {r}"),
            Bit(bit, r) => write!(f, "BIT {bit},{r}"),
            Res(bit, r) => write!(f, "RES {bit},{r}"),
            Set(bit, r) => write!(f, "SET {bit},{r}"),
        }
    }
}
