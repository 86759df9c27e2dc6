use log::debug;
use serde::{Deserialize, Serialize};

use crate::codec;
use crate::error::ValidationError;
use crate::types::{Instruction, Opcode, ParsedLine};

/// One source line together with the bytes it assembled to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EncodedLine {
    pub source: String,
    pub instruction: Instruction,
    pub bytes: Vec<u8>,
}

impl EncodedLine {
    pub fn hex_bytes(&self) -> Vec<String> {
        codec::hex_bytes(&self.bytes)
    }
}

#[derive(Debug, Default)]
pub struct InstructionEncoder;

impl InstructionEncoder {
    pub fn new() -> Self {
        Self
    }

    pub fn encode_line(&self, line: &ParsedLine) -> Result<EncodedLine, ValidationError> {
        let opcode = Opcode::from_mnemonic(&line.mnemonic)
            .ok_or_else(|| ValidationError::UnknownMnemonic(line.mnemonic.clone()))?;

        if line.operands.len() < 2 {
            return Err(ValidationError::MissingOperands {
                found: line.operands.len() + 1,
            });
        }

        let reg = self.parse_integer(&line.operands[0])?;
        let operand = self.parse_integer(&line.operands[1])?;

        let instruction = Instruction::checked(opcode, reg, operand)?;
        let bytes = self.encode(&instruction)?;

        debug!("Line {}: {} -> {:02x?}", line.line_number, instruction, bytes);

        Ok(EncodedLine {
            source: line.raw.clone(),
            instruction,
            bytes,
        })
    }

    pub fn encode(&self, instruction: &Instruction) -> Result<Vec<u8>, ValidationError> {
        Ok(codec::encode(instruction)?)
    }

    pub fn parse_integer(&self, operand: &str) -> Result<i64, ValidationError> {
        operand
            .parse::<i64>()
            .map_err(|_| ValidationError::InvalidOperand(operand.to_string()))
    }
}
