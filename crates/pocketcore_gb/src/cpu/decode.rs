use lazy_static::lazy_static;

use super::instruction::{AluOp, Cond, Instruction, R16Mem, R16Stack, RotOp, R16, R8};

/// One row of an opcode table.
#[derive(Clone, Debug)]
pub struct OpcodeEntry {
    /// Disassembly text; diagnostic only.
    pub mnemonic: String,
    /// Encoded length in bytes, opcode included.
    pub length: u8,
    /// `None` for opcodes with no defined behaviour.
    pub instruction: Option<Instruction>,
}

impl OpcodeEntry {
    fn new(instruction: Option<Instruction>) -> Self {
        match instruction {
            Some(instr) => Self {
                mnemonic: instr.to_string(),
                length: instr.length(),
                instruction: Some(instr),
            },
            None => Self {
                mnemonic: "??".to_string(),
                length: 1,
                instruction: None,
            },
        }
    }
}

lazy_static! {
    /// Unprefixed opcode table.
    pub static ref BASE_TABLE: Vec<OpcodeEntry> =
        (0..=0xFFu8).map(|op| OpcodeEntry::new(decode_base(op))).collect();

    /// 0xCB-prefixed opcode table.
    pub static ref CB_TABLE: Vec<OpcodeEntry> =
        (0..=0xFFu8).map(|op| OpcodeEntry::new(Some(decode_cb(op)))).collect();
}

/// Look up an unprefixed opcode.
#[inline]
pub fn base_entry(opcode: u8) -> &'static OpcodeEntry {
    &BASE_TABLE[opcode as usize]
}

/// Look up a CB-prefixed opcode.
#[inline]
pub fn cb_entry(opcode: u8) -> &'static OpcodeEntry {
    &CB_TABLE[opcode as usize]
}

/// Decode an unprefixed opcode byte.
///
/// Uses the usual x/y/z/p/q split of the opcode:
/// `x = op[7:6]`, `y = op[5:3]`, `z = op[2:0]`, `p = y >> 1`, `q = y & 1`.
/// Returns `None` for the eleven opcode holes
/// (D3, DB, DD, E3, E4, EB, EC, ED, F4, FC, FD).
pub fn decode_base(opcode: u8) -> Option<Instruction> {
    let x = opcode >> 6;
    let y = (opcode >> 3) & 0x07;
    let z = opcode & 0x07;
    let p = y >> 1;
    let q = y & 0x01;

    let instr = match x {
        0 => match z {
            0 => match y {
                0 => Instruction::Nop,
                1 => Instruction::LdImm16Sp,
                2 => Instruction::Stop,
                3 => Instruction::Jr,
                _ => Instruction::JrCond(Cond::from_index(y - 4)),
            },
            1 if q == 0 => Instruction::LdR16Imm(R16::from_index(p)),
            1 => Instruction::AddHlR16(R16::from_index(p)),
            2 if q == 0 => Instruction::LdR16MemA(R16Mem::from_index(p)),
            2 => Instruction::LdAR16Mem(R16Mem::from_index(p)),
            3 if q == 0 => Instruction::IncR16(R16::from_index(p)),
            3 => Instruction::DecR16(R16::from_index(p)),
            4 => Instruction::IncR8(R8::from_index(y)),
            5 => Instruction::DecR8(R8::from_index(y)),
            6 => Instruction::LdR8Imm(R8::from_index(y)),
            _ => match y {
                0 => Instruction::Rlca,
                1 => Instruction::Rrca,
                2 => Instruction::Rla,
                3 => Instruction::Rra,
                4 => Instruction::Daa,
                5 => Instruction::Cpl,
                6 => Instruction::Scf,
                _ => Instruction::Ccf,
            },
        },
        1 => {
            // LD (HL),(HL) is where HALT lives.
            if y == 6 && z == 6 {
                Instruction::Halt
            } else {
                Instruction::LdR8R8(R8::from_index(y), R8::from_index(z))
            }
        }
        2 => Instruction::AluR8(AluOp::from_index(y), R8::from_index(z)),
        _ => match z {
            0 => match y {
                0..=3 => Instruction::RetCond(Cond::from_index(y)),
                4 => Instruction::LdhImmA,
                5 => Instruction::AddSpImm,
                6 => Instruction::LdhAImm,
                _ => Instruction::LdHlSpImm,
            },
            1 if q == 0 => Instruction::Pop(R16Stack::from_index(p)),
            1 => match p {
                0 => Instruction::Ret,
                1 => Instruction::Reti,
                2 => Instruction::JpHl,
                _ => Instruction::LdSpHl,
            },
            2 => match y {
                0..=3 => Instruction::JpCond(Cond::from_index(y)),
                4 => Instruction::LdhCA,
                5 => Instruction::LdImm16A,
                6 => Instruction::LdhAC,
                _ => Instruction::LdAImm16,
            },
            3 => match y {
                0 => Instruction::Jp,
                1 => Instruction::Prefix,
                6 => Instruction::Di,
                7 => Instruction::Ei,
                _ => return None,
            },
            4 => match y {
                0..=3 => Instruction::CallCond(Cond::from_index(y)),
                _ => return None,
            },
            5 if q == 0 => Instruction::Push(R16Stack::from_index(p)),
            5 if p == 0 => Instruction::Call,
            5 => return None,
            6 => Instruction::AluImm(AluOp::from_index(y)),
            _ => Instruction::Rst(y * 8),
        },
    };
    Some(instr)
}

/// Decode the byte following a 0xCB prefix. Every value is defined.
pub fn decode_cb(opcode: u8) -> Instruction {
    let x = opcode >> 6;
    let y = (opcode >> 3) & 0x07;
    let r = R8::from_index(opcode & 0x07);

    match x {
        0 => Instruction::Rot(RotOp::from_index(y), r),
        1 => Instruction::Bit(y, r),
        2 => Instruction::Res(y, r),
        _ => Instruction::Set(y, r),
    }
}
