use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::RangeInclusive;

use crate::error::CodecError;

/// Mask for the 3-bit opcode tag in the low bits of the first byte.
pub const TAG_MASK: u8 = 0x7;

/// Highest register index the 3-bit register field can express.
pub const MAX_REGISTER: u8 = 7;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(u8)]
pub enum Opcode {
    Mod = 0,
    StoreMem = 2,
    LoadMem = 4,
    LoadConst = 5,
}

impl Opcode {
    pub fn from_mnemonic(s: &str) -> Option<Self> {
        match s {
            "LOAD_CONST" => Some(Opcode::LoadConst),
            "LOAD_MEM" => Some(Opcode::LoadMem),
            "STORE_MEM" => Some(Opcode::StoreMem),
            "MOD" => Some(Opcode::Mod),
            _ => None,
        }
    }

    pub fn from_tag(value: u8) -> Option<Self> {
        match value {
            5 => Some(Opcode::LoadConst),
            4 => Some(Opcode::LoadMem),
            2 => Some(Opcode::StoreMem),
            0 => Some(Opcode::Mod),
            _ => None,
        }
    }

    pub fn tag(&self) -> u8 {
        *self as u8
    }

    pub fn mnemonic(&self) -> &'static str {
        match self {
            Opcode::LoadConst => "LOAD_CONST",
            Opcode::LoadMem => "LOAD_MEM",
            Opcode::StoreMem => "STORE_MEM",
            Opcode::Mod => "MOD",
        }
    }

    pub fn all() -> [Opcode; 4] {
        [Opcode::LoadConst, Opcode::LoadMem, Opcode::StoreMem, Opcode::Mod]
    }

    pub fn format(&self) -> OperandFormat {
        match self {
            Opcode::LoadConst => OperandFormat::Constant,
            Opcode::LoadMem | Opcode::StoreMem | Opcode::Mod => OperandFormat::Address,
        }
    }

    /// Number of bytes an instruction with this opcode occupies in the stream.
    pub fn encoded_len(&self) -> usize {
        self.format().encoded_len()
    }

    /// Values accepted for the operand at assembly time.
    pub fn operand_range(&self) -> RangeInclusive<i64> {
        self.format().operand_range()
    }
}

impl fmt::Display for Opcode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.mnemonic())
    }
}

/// Bit-width policy for the operand field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OperandFormat {
    /// 15-bit two's-complement constant, packed into three bytes.
    Constant,
    /// 3-bit memory address, packed into two bytes.
    Address,
}

impl OperandFormat {
    pub fn operand_bits(&self) -> u32 {
        match self {
            OperandFormat::Constant => 15,
            OperandFormat::Address => 3,
        }
    }

    pub fn encoded_len(&self) -> usize {
        match self {
            OperandFormat::Constant => 3,
            OperandFormat::Address => 2,
        }
    }

    pub fn operand_range(&self) -> RangeInclusive<i64> {
        match self {
            OperandFormat::Constant => {
                let half = 1i64 << (self.operand_bits() - 1);
                -half..=half - 1
            }
            OperandFormat::Address => 0..=(1i64 << self.operand_bits()) - 1,
        }
    }
}

/// Register index as carried by the 3-bit register field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Register(u8);

impl Register {
    pub fn new(index: i64) -> Option<Self> {
        if (0..=MAX_REGISTER as i64).contains(&index) {
            Some(Register(index as u8))
        } else {
            None
        }
    }

    /// Builds a register from a raw field, keeping only the low 3 bits.
    pub fn from_field(bits: u8) -> Self {
        Register(bits & MAX_REGISTER)
    }

    pub fn index(&self) -> usize {
        self.0 as usize
    }

    pub fn bits(&self) -> u8 {
        self.0
    }
}

impl fmt::Display for Register {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "R{}", self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Instruction {
    pub opcode: Opcode,
    pub reg: Register,
    pub operand: i32,
}

impl Instruction {
    pub fn new(opcode: Opcode, reg: Register, operand: i32) -> Self {
        Self { opcode, reg, operand }
    }

    /// Builds an instruction from raw integers, rejecting a register outside
    /// 0..=7 or an operand outside the opcode's range.
    pub fn checked(opcode: Opcode, reg: i64, operand: i64) -> Result<Self, CodecError> {
        let reg = Register::new(reg).ok_or(CodecError::RegisterOutOfRange(reg))?;
        check_operand(opcode, operand)?;
        Ok(Self::new(opcode, reg, operand as i32))
    }

    pub fn encoded_len(&self) -> usize {
        self.opcode.encoded_len()
    }
}

impl fmt::Display for Instruction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} {}", self.opcode, self.reg.bits(), self.operand)
    }
}

pub(crate) fn check_operand(opcode: Opcode, operand: i64) -> Result<(), CodecError> {
    let range = opcode.operand_range();
    if range.contains(&operand) {
        Ok(())
    } else {
        Err(CodecError::OperandOutOfRange {
            opcode,
            value: operand,
            min: *range.start(),
            max: *range.end(),
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedLine {
    pub mnemonic: String,
    pub operands: Vec<String>,
    pub line_number: usize,
    pub raw: String,
}
