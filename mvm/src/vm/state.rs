use crate::error::VmError;

/// VM execution states
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VMState {
    Running,
    /// The program counter left the byte stream or passed the window's upper bound.
    Halted,
    Error(VmError),
}
