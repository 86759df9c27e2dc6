use clap::Parser;
use mvm::{ExecutionWindow, TraceFormat};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    name = "mvm",
    about = "Mini Virtual Machine - Run mvm-asm binary programs",
    long_about = "The Mini Virtual Machine executes binaries produced by masm inside an execution window\n\
                  and writes a step-by-step execution trace as JSON.",
    version
)]
pub struct Cli {
    /// Binary file to execute
    pub binary_file: PathBuf,

    /// Output JSON file for the execution trace
    pub result_file: PathBuf,

    /// Execution window as "low,high" (inclusive)
    pub window: ExecutionWindow,

    /// Write structured trace records instead of rendered lines
    #[arg(short = 's', long)]
    pub structured: bool,

    /// Print the rendered trace to stdout
    #[arg(short = 'p', long)]
    pub print: bool,

    /// Show VM state during execution
    #[arg(short = 'v', long)]
    pub verbose: bool,
}

impl Cli {
    pub fn trace_format(&self) -> TraceFormat {
        if self.structured {
            TraceFormat::Structured
        } else {
            TraceFormat::Rendered
        }
    }
}
