use anyhow::{Context, Result};
use clap::Parser;
use mvm_asm::assemble_file;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "masm")]
#[command(about = "Mini VM Assembler - Assembles LOAD_CONST/LOAD_MEM/STORE_MEM/MOD programs")]
#[command(version)]
struct Cli {
    /// Input assembly file, one `MNEMONIC reg operand` per line
    source: PathBuf,

    /// Output binary file (.bin)
    binary: PathBuf,

    /// Output JSON log mapping each instruction to its bytes
    log: PathBuf,

    /// Show per-instruction encoding details
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let default_filter = if cli.verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter)).init();

    let output = assemble_file(&cli.source, &cli.binary, &cli.log)
        .with_context(|| format!("Failed to assemble {}", cli.source.display()))?;

    // Skipped lines are already reported through the logger
    println!(
        "Wrote {} byte(s) to {} ({} instruction(s), {} skipped, log in {})",
        output.bytes.len(),
        cli.binary.display(),
        output.lines.len(),
        output.errors.len(),
        cli.log.display()
    );

    Ok(())
}
