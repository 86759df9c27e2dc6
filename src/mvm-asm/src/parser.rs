use log::warn;

use crate::error::ValidationError;
use crate::types::ParsedLine;

/// Number of tokens in a source line: mnemonic plus two operands.
pub const LINE_TOKENS: usize = 3;

#[derive(Debug, Default)]
pub struct Parser;

impl Parser {
    pub fn new() -> Self {
        Self
    }

    /// Trimmed, non-empty lines of `source` paired with their 1-based line numbers.
    pub fn source_lines<'a>(&self, source: &'a str) -> impl Iterator<Item = (usize, &'a str)> + 'a {
        source
            .lines()
            .enumerate()
            .map(|(i, line)| (i + 1, line.trim()))
            .filter(|(_, line)| !line.is_empty())
    }

    pub fn parse_line(&self, line: &str, line_number: usize) -> Result<ParsedLine, ValidationError> {
        let tokens: Vec<&str> = line.split_whitespace().collect();

        if tokens.len() < LINE_TOKENS {
            return Err(ValidationError::MissingOperands { found: tokens.len() });
        }
        if tokens.len() > LINE_TOKENS {
            warn!(
                "Line {}: ignoring {} trailing token(s) after '{}'",
                line_number,
                tokens.len() - LINE_TOKENS,
                tokens[..LINE_TOKENS].join(" ")
            );
        }

        Ok(ParsedLine {
            mnemonic: tokens[0].to_string(),
            operands: tokens[1..LINE_TOKENS].iter().map(|t| t.to_string()).collect(),
            line_number,
            raw: line.to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_simple_instruction() {
        let parser = Parser::new();
        let line = parser.parse_line("LOAD_CONST 1 100", 1).unwrap();

        assert_eq!(line.mnemonic, "LOAD_CONST");
        assert_eq!(line.operands, vec!["1", "100"]);
        assert_eq!(line.line_number, 1);
    }

    #[test]
    fn test_parse_extra_whitespace() {
        let parser = Parser::new();
        let line = parser.parse_line("MOD\t 3    -4", 2).unwrap();

        assert_eq!(line.mnemonic, "MOD");
        assert_eq!(line.operands, vec!["3", "-4"]);
    }

    #[test]
    fn test_trailing_tokens_ignored() {
        let parser = Parser::new();
        let line = parser.parse_line("STORE_MEM 2 3 9", 1).unwrap();

        assert_eq!(line.operands, vec!["2", "3"]);
        assert_eq!(line.raw, "STORE_MEM 2 3 9");
    }

    #[test]
    fn test_missing_operands() {
        let parser = Parser::new();
        assert_eq!(
            parser.parse_line("LOAD_MEM 2", 1),
            Err(ValidationError::MissingOperands { found: 2 })
        );
    }

    #[test]
    fn test_source_lines_skip_blank() {
        let parser = Parser::new();
        let lines: Vec<_> = parser.source_lines("  LOAD_CONST 0 1 \n\n   \nMOD 0 1\n").collect();

        assert_eq!(lines, vec![(1, "LOAD_CONST 0 1"), (4, "MOD 0 1")]);
    }
}
