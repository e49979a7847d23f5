//! VM Translator CLI
//!
//! Translates VM bytecode to Hack assembly.
//!
//! # Usage
//!
//! ```bash
//! # Single file, no bootstrap
//! vmtranslator SimpleAdd.vm
//!
//! # Directory, with bootstrap
//! vmtranslator FibonacciElement/ -b
//! ```

use clap::Parser as ClapParser;
use std::fs;
use std::path::PathBuf;
use std::process::ExitCode;
use std::time::Instant;

use vm_translator::{VMError, output_path, translate_directory_with_debug, translate_file_with_debug};

#[derive(ClapParser, Debug)]
#[command(name = "vmtranslator")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Translates VM bytecode to Hack assembly")]
#[command(author = "nand2tetris")]
struct Args {
    /// Input .vm file or directory of .vm files
    #[arg(value_name = "SOURCE")]
    source: PathBuf,

    /// Output file (defaults to SOURCE with a .asm extension, or SOURCE/SOURCE.asm for a directory)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Emit the bootstrap preamble (SP init + sentinel frame + call Sys.init 0)
    #[arg(short = 'b', long = "bootstrap")]
    bootstrap: bool,

    /// Interleave `// <source line>` comments before each generated block
    #[arg(short = 'd', long = "debug-comments")]
    debug_comments: bool,

    /// Enable verbose (debug-level) logging
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> ExitCode {
    let args = Args::parse();

    let level = if args.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level)).init();

    if !args.source.exists() {
        eprintln!("error: path not found: {}", args.source.display());
        return ExitCode::from(2);
    }

    let output_file = args
        .output
        .clone()
        .unwrap_or_else(|| output_path(&args.source));

    let start = Instant::now();

    let result = if args.source.is_dir() {
        log::info!("translating directory {}", args.source.display());
        translate_directory_with_debug(&args.source, args.bootstrap, args.debug_comments)
    } else if args.source.extension().is_some_and(|ext| ext == "vm") {
        log::info!("translating file {}", args.source.display());
        translate_file_with_debug(&args.source, args.debug_comments)
    } else {
        Err(VMError::InvalidPath {
            path: args.source.display().to_string(),
        })
    };

    let asm = match result {
        Ok(asm) => asm,
        Err(e) => {
            eprintln!("error: {}", e);
            return ExitCode::FAILURE;
        }
    };

    if let Err(e) = fs::write(&output_file, &asm) {
        eprintln!("error: cannot write {}: {}", output_file.display(), e);
        return ExitCode::FAILURE;
    }

    log::debug!(
        "{} lines of assembly generated in {:.2}ms",
        asm.lines().count(),
        start.elapsed().as_secs_f64() * 1000.0
    );
    if args.bootstrap {
        log::info!("bootstrap preamble emitted");
    }
    log::info!("wrote {}", output_file.display());
    println!("{} -> {}", args.source.display(), output_file.display());

    ExitCode::SUCCESS
}
