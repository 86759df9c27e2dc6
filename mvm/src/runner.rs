//! Running a binary file and persisting its trace.

use log::info;
use serde::Serialize;
use serde_json::ser::PrettyFormatter;
use std::fs;
use std::path::Path;

use crate::constants::TRACE_JSON_INDENT;
use crate::error::RunError;
use crate::trace::Trace;
use crate::vm::{ExecutionReport, ExecutionWindow, VM};

/// Shape of the result file.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum TraceFormat {
    /// `[["LOAD_CONST: R0 <- 765"], ...]`, one group per step.
    #[default]
    Rendered,
    /// Full [`TraceStep`](crate::trace::TraceStep) records.
    Structured,
}

fn to_pretty_json<T: Serialize>(value: &T) -> Result<Vec<u8>, serde_json::Error> {
    let mut out = Vec::new();
    let mut serializer =
        serde_json::Serializer::with_formatter(&mut out, PrettyFormatter::with_indent(TRACE_JSON_INDENT));
    value.serialize(&mut serializer)?;
    Ok(out)
}

pub fn write_trace(path: &Path, trace: &Trace, format: TraceFormat) -> Result<(), RunError> {
    let json = match format {
        TraceFormat::Rendered => to_pretty_json(&trace.rendered())?,
        TraceFormat::Structured => to_pretty_json(trace)?,
    };
    fs::write(path, json).map_err(|e| RunError::io(path, e))
}

/// Executes the binary at `bin_path` and writes its trace to `result_path`.
///
/// The trace is written even when execution stops on a fatal error, so the
/// steps leading up to it can be inspected; the error is returned afterwards.
pub fn run_file(
    bin_path: &Path,
    result_path: &Path,
    window: ExecutionWindow,
    format: TraceFormat,
) -> Result<ExecutionReport, RunError> {
    if !bin_path.exists() {
        return Err(RunError::MissingBinary(bin_path.to_path_buf()));
    }
    let program = fs::read(bin_path).map_err(|e| RunError::io(bin_path, e))?;
    info!("Loaded {} byte(s) from {}, window {}", program.len(), bin_path.display(), window);

    let mut vm = VM::new(program, window);
    let outcome = vm.run();
    write_trace(result_path, vm.trace(), format)?;
    outcome?;

    Ok(vm.into_report())
}
