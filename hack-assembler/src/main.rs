//! Hack Assembler CLI - assembles Hack symbolic assembly into binary machine code.

use clap::Parser as ClapParser;
use hack_assembler::assemble;
use std::fs;
use std::path::PathBuf;
use std::process::ExitCode;
use std::time::Instant;

#[derive(ClapParser, Debug)]
#[command(name = "assembler")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Two-pass assembler for the Hack machine language")]
#[command(author = "nand2tetris")]
struct Args {
    /// Input .asm file
    #[arg(value_name = "FILE")]
    input: PathBuf,

    /// Output file (defaults to FILE with a .hack extension)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Enable verbose (debug-level) logging
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> ExitCode {
    let args = Args::parse();

    let level = if args.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level)).init();

    let output_path = args
        .output
        .clone()
        .unwrap_or_else(|| args.input.with_extension("hack"));

    let source = match fs::read_to_string(&args.input) {
        Ok(s) => s,
        Err(e) => {
            eprintln!("error: cannot read {}: {}", args.input.display(), e);
            return ExitCode::from(2);
        }
    };

    log::info!("assembling {}", args.input.display());
    let start = Instant::now();

    let output = match assemble(&source) {
        Ok(o) => o,
        Err(e) => {
            eprintln!("error: {}", e);
            return ExitCode::FAILURE;
        }
    };

    if let Err(e) = fs::write(&output_path, format!("{output}\n")) {
        eprintln!("error: cannot write {}: {}", output_path.display(), e);
        return ExitCode::FAILURE;
    }

    log::debug!(
        "{} lines assembled in {:.2}ms",
        source.lines().count(),
        start.elapsed().as_secs_f64() * 1000.0
    );
    log::info!("wrote {}", output_path.display());
    println!("{} -> {}", args.input.display(), output_path.display());

    ExitCode::SUCCESS
}
