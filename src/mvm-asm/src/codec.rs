//! Bit-field codec shared by the assembler and the VM.
//!
//! Every instruction starts with the same byte:
//!
//! ```text
//!   7 6 | 5 4 3 | 2 1 0
//!   op  |  reg  |  tag
//! ```
//!
//! where `op` holds the low two bits of the operand field. The remaining
//! operand bits follow in one extra byte (`LOAD_MEM`, `STORE_MEM`, `MOD`,
//! 3-bit address) or two extra bytes (`LOAD_CONST`, 15-bit constant):
//!
//! ```text
//!   LOAD_CONST  [op1..0|reg|101] [op9..op2] [000|op14..op10]
//!   others      [op1..0|reg|tag] [0000000|op2]
//! ```
//!
//! # Limitation
//!
//! [`decode`] only looks at the first two bytes of an instruction, so a
//! `LOAD_CONST` operand comes back as its low [`LOADCONST_RECOVERABLE_BITS`]
//! bits. The high five bits written to the third byte are never read back,
//! and negative constants decode as their truncated two's-complement pattern.
//! The third byte still counts towards the instruction length.

use log::trace;

use crate::error::CodecError;
use crate::types::{check_operand, Instruction, Opcode, OperandFormat, Register, TAG_MASK};

/// Operand bits a `LOAD_CONST` keeps through an encode/decode round trip.
pub const LOADCONST_RECOVERABLE_BITS: u32 = 10;

/// Minimum number of bytes needed to decode any instruction.
pub const MIN_INSTRUCTION_LEN: usize = 2;

/// Maps a signed operand to its unsigned field value, two's complement
/// within `bits` for negative inputs.
fn to_field(operand: i64, bits: u32) -> u16 {
    if operand < 0 {
        ((1i64 << bits) + operand) as u16
    } else {
        operand as u16
    }
}

fn head_byte(opcode: Opcode, reg: Register, field: u16) -> u8 {
    (((field & 0x3) as u8) << 6) | (reg.bits() << 3) | opcode.tag()
}

pub fn encode(instruction: &Instruction) -> Result<Vec<u8>, CodecError> {
    let opcode = instruction.opcode;
    check_operand(opcode, instruction.operand as i64)?;

    let format = opcode.format();
    let field = to_field(instruction.operand as i64, format.operand_bits());
    let head = head_byte(opcode, instruction.reg, field);

    let bytes = match format {
        OperandFormat::Constant => vec![
            head,
            ((field >> 2) & 0xFF) as u8,
            ((field >> 10) & 0x1F) as u8,
        ],
        OperandFormat::Address => vec![head, ((field >> 2) & 0x1) as u8],
    };

    trace!("encode {} -> {:02x?}", instruction, bytes);
    Ok(bytes)
}

/// Decodes the instruction starting at `offset`, returning it together with
/// its length in bytes.
pub fn decode(bytes: &[u8], offset: usize) -> Result<(Instruction, usize), CodecError> {
    let available = bytes.len().saturating_sub(offset);
    if available < MIN_INSTRUCTION_LEN {
        return Err(CodecError::Truncated { offset, available });
    }

    let byte0 = bytes[offset];
    let byte1 = bytes[offset + 1];

    let tag = byte0 & TAG_MASK;
    let opcode = Opcode::from_tag(tag).ok_or(CodecError::InvalidOpcodeTag { tag, offset })?;
    let length = opcode.encoded_len();

    let operand = ((byte1 as u16) << 2) | ((byte0 >> 6) & 0x3) as u16;
    let reg = Register::from_field(byte0 >> 3);

    let instruction = Instruction::new(opcode, reg, operand as i32);
    trace!("decode @{}: {:02x} {:02x} -> {} (len {})", offset, byte0, byte1, instruction, length);
    Ok((instruction, length))
}

/// Lower-case two-digit hex rendering of each byte.
pub fn hex_bytes(bytes: &[u8]) -> Vec<String> {
    bytes.iter().map(|b| format!("{b:02x}")).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::MAX_REGISTER;
    use pretty_assertions::assert_eq;

    fn inst(opcode: Opcode, reg: i64, operand: i64) -> Instruction {
        Instruction::checked(opcode, reg, operand).unwrap()
    }

    #[test]
    fn test_encode_load_const_fixture() {
        let bytes = encode(&inst(Opcode::LoadConst, 0, 765)).unwrap();
        assert_eq!(bytes, vec![0x45, 0xBF, 0x00]);
    }

    #[test]
    fn test_decode_load_const_fixture() {
        let (decoded, len) = decode(&[0x45, 0xBF, 0x00], 0).unwrap();
        assert_eq!(decoded.opcode, Opcode::LoadConst);
        assert_eq!(decoded.reg.index(), 0);
        assert_eq!(decoded.operand, 765);
        assert_eq!(len, 3);
    }

    #[test]
    fn test_load_mem_fixture() {
        let bytes = encode(&inst(Opcode::LoadMem, 2, 3)).unwrap();
        assert_eq!(bytes, vec![0xD4, 0x00]);

        let (decoded, len) = decode(&bytes, 0).unwrap();
        assert_eq!(decoded, inst(Opcode::LoadMem, 2, 3));
        assert_eq!(len, 2);
    }

    #[test]
    fn test_address_operand_top_bit_in_second_byte() {
        assert_eq!(encode(&inst(Opcode::StoreMem, 0, 4)).unwrap(), vec![0x02, 0x01]);
        assert_eq!(encode(&inst(Opcode::Mod, 7, 6)).unwrap(), vec![0xB8, 0x01]);
    }

    #[test]
    fn test_load_const_extremes() {
        assert_eq!(encode(&inst(Opcode::LoadConst, 0, 16383)).unwrap(), vec![0xC5, 0xFF, 0x0F]);
        assert_eq!(encode(&inst(Opcode::LoadConst, 0, -16384)).unwrap(), vec![0x05, 0x00, 0x10]);
        assert_eq!(encode(&inst(Opcode::LoadConst, 0, -1)).unwrap(), vec![0xC5, 0xFF, 0x1F]);
    }

    #[test]
    fn test_round_trip_within_recoverable_bits() {
        let recoverable = (1i64 << LOADCONST_RECOVERABLE_BITS) - 1;
        for opcode in Opcode::all() {
            let range = opcode.operand_range();
            let max = (*range.end()).min(recoverable);
            for reg in 0..=MAX_REGISTER as i64 {
                for operand in (*range.start()).max(0)..=max {
                    let case = inst(opcode, reg, operand);
                    let bytes = encode(&case).unwrap();
                    let (decoded, len) = decode(&bytes, 0).unwrap();
                    assert_eq!(decoded, case);
                    assert_eq!(len, opcode.encoded_len());
                }
            }
        }
    }

    #[test]
    fn test_load_const_outside_recoverable_bits_truncates() {
        let recoverable = (1i64 << LOADCONST_RECOVERABLE_BITS) - 1;
        for reg in 0..=MAX_REGISTER as i64 {
            for operand in Opcode::LoadConst.operand_range() {
                if (0..=recoverable).contains(&operand) {
                    continue;
                }
                let bytes = encode(&inst(Opcode::LoadConst, reg, operand)).unwrap();
                let (decoded, len) = decode(&bytes, 0).unwrap();
                assert_eq!(decoded.reg, Register::from_field(reg as u8));
                assert_eq!(decoded.operand as i64, operand & recoverable);
                assert_eq!(len, 3);
            }
        }
    }

    #[test]
    fn test_wide_load_const_is_truncated_on_decode() {
        let original = inst(Opcode::LoadConst, 2, 1029);
        let bytes = encode(&original).unwrap();
        let (decoded, _) = decode(&bytes, 0).unwrap();
        assert_eq!(decoded.operand, 1029 & ((1 << LOADCONST_RECOVERABLE_BITS) - 1));
        assert_eq!(decoded.operand, 5);
        assert_ne!(decoded, original);
    }

    #[test]
    fn test_negative_load_const_decodes_low_bits() {
        let bytes = encode(&inst(Opcode::LoadConst, 0, -1)).unwrap();
        let (decoded, _) = decode(&bytes, 0).unwrap();
        assert_eq!(decoded.operand, 1023);
    }

    #[test]
    fn test_encode_rejects_out_of_range_operands() {
        let too_big = Instruction::new(Opcode::LoadConst, Register::from_field(0), 16384);
        assert!(matches!(encode(&too_big), Err(CodecError::OperandOutOfRange { .. })));

        let negative_addr = Instruction::new(Opcode::LoadMem, Register::from_field(0), -1);
        assert!(matches!(encode(&negative_addr), Err(CodecError::OperandOutOfRange { .. })));

        let wide_addr = Instruction::new(Opcode::Mod, Register::from_field(0), 8);
        assert!(matches!(encode(&wide_addr), Err(CodecError::OperandOutOfRange { .. })));
    }

    #[test]
    fn test_decode_at_offset() {
        let program = [0x45, 0xBF, 0x00, 0xB8, 0x01];
        let (decoded, len) = decode(&program, 3).unwrap();
        assert_eq!(decoded, inst(Opcode::Mod, 7, 6));
        assert_eq!(len, 2);
    }

    #[test]
    fn test_decode_errors() {
        assert_eq!(
            decode(&[0x45], 0),
            Err(CodecError::Truncated { offset: 0, available: 1 })
        );
        assert_eq!(
            decode(&[0x45, 0x00], 4),
            Err(CodecError::Truncated { offset: 4, available: 0 })
        );
        assert_eq!(
            decode(&[0x07, 0x00], 0),
            Err(CodecError::InvalidOpcodeTag { tag: 7, offset: 0 })
        );
    }

    #[test]
    fn test_load_const_missing_third_byte_still_decodes() {
        let (decoded, len) = decode(&[0x45, 0xBF], 0).unwrap();
        assert_eq!(decoded.operand, 765);
        assert_eq!(len, 3);
    }

    #[test]
    fn test_hex_bytes() {
        assert_eq!(hex_bytes(&[0x45, 0xBF, 0x00]), vec!["45", "bf", "00"]);
    }
}
