mod cli;

use anyhow::{Context, Result};
use clap::Parser;
use cli::Cli;
use mvm::run_file;

fn main() -> Result<()> {
    // Parse command line arguments
    let cli = Cli::parse();

    let default_filter = if cli.verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter)).init();

    let report = run_file(&cli.binary_file, &cli.result_file, cli.window, cli.trace_format())
        .with_context(|| format!("Failed to run {}", cli.binary_file.display()))?;

    if cli.print {
        for step in report.trace.steps() {
            println!("[{:04}] {}", step.pc, step.entry);
        }
    }

    if cli.verbose {
        for (i, value) in report.machine.registers().iter().enumerate() {
            println!("R{i:<2} = {value}");
        }
    }

    println!(
        "Executed {} instruction(s), results saved to {}",
        report.trace.len(),
        cli.result_file.display()
    );

    Ok(())
}
