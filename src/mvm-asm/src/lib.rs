pub mod types;
pub mod error;
pub mod codec;
pub mod parser;
pub mod encoder;
pub mod assembler;

pub use types::{Instruction, Opcode, OperandFormat, ParsedLine, Register, MAX_REGISTER};
pub use error::{AssembleError, CodecError, ValidationError};
pub use codec::{decode, encode, LOADCONST_RECOVERABLE_BITS};
pub use parser::Parser;
pub use encoder::{EncodedLine, InstructionEncoder};
pub use assembler::{assemble_file, Assembler, AssemblyOutput, LineError, LogEntry};

/// Assembles `source` with a default [`Assembler`].
pub fn assemble(source: &str) -> AssemblyOutput {
    Assembler::new().assemble(source)
}
