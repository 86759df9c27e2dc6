use log::{info, warn};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::encoder::{EncodedLine, InstructionEncoder};
use crate::error::{AssembleError, ValidationError};
use crate::parser::Parser;

/// Required extension for assembled binaries.
pub const BINARY_EXTENSION: &str = "bin";

/// Entry of the assembly log: a source line and the hex bytes it produced.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LogEntry {
    pub instruction: String,
    pub bytes: Vec<String>,
}

impl From<&EncodedLine> for LogEntry {
    fn from(line: &EncodedLine) -> Self {
        Self {
            instruction: line.source.clone(),
            bytes: line.hex_bytes(),
        }
    }
}

/// A line that was reported and skipped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LineError {
    pub line_number: usize,
    pub line: String,
    pub error: ValidationError,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AssemblyOutput {
    pub bytes: Vec<u8>,
    pub lines: Vec<EncodedLine>,
    pub errors: Vec<LineError>,
}

impl AssemblyOutput {
    pub fn log(&self) -> Vec<LogEntry> {
        self.lines.iter().map(LogEntry::from).collect()
    }

    pub fn log_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(&self.log())
    }

    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }
}

#[derive(Debug, Default)]
pub struct Assembler {
    parser: Parser,
    encoder: InstructionEncoder,
}

impl Assembler {
    pub fn new() -> Self {
        Self {
            parser: Parser::new(),
            encoder: InstructionEncoder::new(),
        }
    }

    /// Assembles every non-empty line of `source`. Lines that fail validation
    /// are recorded in [`AssemblyOutput::errors`] and skipped.
    pub fn assemble(&self, source: &str) -> AssemblyOutput {
        let mut output = AssemblyOutput::default();

        for (line_number, line) in self.parser.source_lines(source) {
            let result = self
                .parser
                .parse_line(line, line_number)
                .and_then(|parsed| self.encoder.encode_line(&parsed));

            match result {
                Ok(encoded) => {
                    output.bytes.extend_from_slice(&encoded.bytes);
                    output.lines.push(encoded);
                }
                Err(error) => {
                    warn!("Error in instruction on line {}: {} - {}", line_number, line, error);
                    output.errors.push(LineError {
                        line_number,
                        line: line.to_string(),
                        error,
                    });
                }
            }
        }

        info!(
            "Assembled {} instruction(s) into {} byte(s), {} line(s) skipped",
            output.lines.len(),
            output.bytes.len(),
            output.errors.len()
        );
        output
    }
}

/// Assembles `source_path`, writing raw bytes to `bin_path` and the JSON log
/// to `log_path`.
pub fn assemble_file(
    source_path: &Path,
    bin_path: &Path,
    log_path: &Path,
) -> Result<AssemblyOutput, AssembleError> {
    if !source_path.exists() {
        return Err(AssembleError::MissingSource(source_path.to_path_buf()));
    }
    if bin_path.extension().and_then(|e| e.to_str()) != Some(BINARY_EXTENSION) {
        return Err(AssembleError::NotABinFile(bin_path.to_path_buf()));
    }

    let source = fs::read_to_string(source_path).map_err(|e| AssembleError::io(source_path, e))?;
    let output = Assembler::new().assemble(&source);

    fs::write(bin_path, &output.bytes).map_err(|e| AssembleError::io(bin_path, e))?;
    fs::write(log_path, output.log_json()?).map_err(|e| AssembleError::io(log_path, e))?;

    Ok(output)
}
