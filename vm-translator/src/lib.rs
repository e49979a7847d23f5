//! VM Translator - Full Stack VM to Hack Assembly Translator
//!
//! Translates VM bytecode (.vm) to Hack assembly (.asm) for the nand2tetris computer.
//! Supports all 20 VM commands including branching and function calls.
//!
//! # Usage Modes
//!
//! - Single file: `translate("source", "filename")` - no bootstrap
//! - Directory: `translate_directory(path, bootstrap)` - combines every `.vm`
//!   file into one `.asm` output, emitting the bootstrap preamble only when
//!   explicitly requested

pub mod bootstrap;
pub mod codegen;
pub mod error;
pub mod memory;
pub mod parser;

use std::fs;
use std::path::Path;

use crate::bootstrap::generate_bootstrap;
use crate::codegen::CodeGenerator;
pub use crate::error::{Result, VMError};
use crate::parser::parse_line;

/// Translate a single VM source string to Hack assembly.
pub fn translate(source: &str, filename: &str) -> Result<String> {
    translate_with_debug(source, filename, false)
}

/// Translate a single VM source string to Hack assembly, optionally
/// interleaving `// <source line>` comments before each generated block.
pub fn translate_with_debug(source: &str, filename: &str, debug_comments: bool) -> Result<String> {
    let mut codegen = CodeGenerator::new();
    codegen.set_filename(filename);

    let estimated_size = source.lines().count() * 50;
    let mut output = String::with_capacity(estimated_size);

    translate_lines(source, filename, &mut codegen, debug_comments, &mut output)?;

    Ok(output)
}

/// Translate a single .vm file to Hack assembly.
pub fn translate_file(path: &Path) -> Result<String> {
    translate_file_with_debug(path, false)
}

/// Translate a single .vm file to Hack assembly with optional debug comments.
pub fn translate_file_with_debug(path: &Path, debug_comments: bool) -> Result<String> {
    let filename = path
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("Unknown");

    let source = fs::read_to_string(path).map_err(|e| VMError::FileRead {
        path: path.display().to_string(),
        source: e,
    })?;

    translate_with_debug(&source, filename, debug_comments)
}

/// Translate a .vm file using the given code generator, appending into `output`.
///
/// This allows sharing state across multiple files (e.g., the comparison
/// label counter, which is process-global within one translation run).
fn translate_file_with_codegen(
    path: &Path,
    codegen: &mut CodeGenerator,
    debug_comments: bool,
    output: &mut String,
) -> Result<()> {
    let filename = path
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("Unknown");

    codegen.set_filename(filename);

    let source = fs::read_to_string(path).map_err(|e| VMError::FileRead {
        path: path.display().to_string(),
        source: e,
    })?;

    translate_lines(&source, filename, codegen, debug_comments, output)
}

fn translate_lines(
    source: &str,
    filename: &str,
    codegen: &mut CodeGenerator,
    debug_comments: bool,
    output: &mut String,
) -> Result<()> {
    for (line_num, line) in source.lines().enumerate() {
        if let Some(cmd) = parse_line(line, line_num + 1, filename)? {
            if debug_comments {
                codegen.translate_annotated(&cmd, line.trim(), output);
            } else {
                codegen.translate(&cmd, output);
            }
        }
    }
    Ok(())
}

/// Order .vm files within a directory: `Sys.vm` first, `Main.vm` second,
/// everything else in its original listing order.
fn directory_sort_key(path: &Path) -> u8 {
    match path.file_name().and_then(|s| s.to_str()) {
        Some("Sys.vm") => 0,
        Some("Main.vm") => 1,
        _ => 2,
    }
}

/// Translate all .vm files in a directory to a single .asm file.
///
/// - Generates the bootstrap preamble when `bootstrap` is true.
/// - Processes `Sys.vm` first, then `Main.vm`, then the rest in their
///   original directory-listing order.
pub fn translate_directory(dir_path: &Path, bootstrap: bool) -> Result<String> {
    translate_directory_with_debug(dir_path, bootstrap, false)
}

/// Translate a directory with optional bootstrap and debug-comment emission.
pub fn translate_directory_with_debug(
    dir_path: &Path,
    bootstrap: bool,
    debug_comments: bool,
) -> Result<String> {
    // Find all .vm files, preserving directory-listing order as the tiebreaker.
    let mut vm_files: Vec<_> = fs::read_dir(dir_path)
        .map_err(|e| VMError::FileRead {
            path: dir_path.display().to_string(),
            source: e,
        })?
        .filter_map(|entry| entry.ok())
        .map(|entry| entry.path())
        .filter(|path| path.extension().is_some_and(|ext| ext == "vm"))
        .collect();

    if vm_files.is_empty() {
        return Err(VMError::NoVmFiles {
            path: dir_path.display().to_string(),
        });
    }

    vm_files.sort_by_key(|path| directory_sort_key(path));

    let total_lines: usize = vm_files
        .iter()
        .map(|f| {
            fs::read_to_string(f)
                .map(|s| s.lines().count())
                .unwrap_or(0)
        })
        .sum();
    let mut output = String::with_capacity(total_lines * 50 + 512);

    let mut codegen = CodeGenerator::new();

    if bootstrap {
        output.push_str(&generate_bootstrap());
    }

    for vm_file in &vm_files {
        translate_file_with_codegen(vm_file, &mut codegen, debug_comments, &mut output)?;
    }

    Ok(output)
}

/// Determine the output filename for a given input.
///
/// - Single file: Input.vm -> Input.asm
/// - Directory: dir/ -> dir/dir.asm
pub fn output_path(input: &Path) -> std::path::PathBuf {
    if input.is_dir() {
        let dir_name = input
            .file_name()
            .and_then(|s| s.to_str())
            .unwrap_or("output");
        input.join(format!("{}.asm", dir_name))
    } else {
        input.with_extension("asm")
    }
}
