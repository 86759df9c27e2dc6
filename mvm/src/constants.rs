//! Central configuration and constants for the Mini VM

// Machine state
pub const REGISTER_COUNT: usize = 16; // Only R0-R7 are addressable through the 3-bit register field
pub const MEMORY_SIZE: usize = 1024;  // Data memory cells

// Execution window
pub const WINDOW_SEPARATOR: char = ','; // CLI form is "low,high"

// Trace output
pub const TRACE_JSON_INDENT: &[u8] = b"    ";
