pub mod constants;
pub mod error;
pub mod trace;
pub mod vm;
pub mod runner;

// Re-export commonly used types
pub use error::{RunError, VmError};
pub use trace::{Trace, TraceEntry, TraceStep};
pub use vm::{execute, ExecutionReport, ExecutionWindow, Machine, VMState, VM};
pub use runner::{run_file, write_trace, TraceFormat};
