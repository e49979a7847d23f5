//! Jack Compiler - Full Jack to VM code compiler.
//!
//! This crate compiles Jack source code to VM code for the nand2tetris
//! virtual machine: tokenize, parse into an AST (via `jack_analyzer`), then
//! generate VM code in a single pass with no optimization stage.
//!
//! # Usage
//!
//! ```no_run
//! use jack_compiler::{compile_file, compile_directory};
//! use std::path::Path;
//!
//! // Compile a single file
//! let result = compile_file(Path::new("Main.jack"));
//!
//! // Compile every .jack file in a directory
//! let results = compile_directory(Path::new("Square/"));
//! ```

pub mod codegen;
pub mod error;
pub mod symbol_table;
pub mod vm_writer;

use rayon::prelude::*;
use std::fs;
use std::path::Path;

// Re-export key types
pub use codegen::CodeGenerator;
pub use error::CompileError;
pub use symbol_table::{Symbol, SymbolKind, SymbolTable};
pub use vm_writer::VMWriter;

/// Result of compiling a single Jack file.
#[derive(Debug)]
pub struct CompileResult {
    /// The filename that was compiled.
    pub filename: String,
    /// The generated VM code (empty if errors occurred).
    pub vm_code: String,
    /// Any errors encountered during compilation.
    pub errors: Vec<CompileError>,
}

impl CompileResult {
    /// Check if the compilation was successful (no errors).
    pub fn is_ok(&self) -> bool {
        self.errors.is_empty()
    }
}

/// Compile a single Jack file.
pub fn compile_file(path: &Path) -> CompileResult {
    let filename = path
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("unknown")
        .to_string();

    let source = match fs::read_to_string(path) {
        Ok(s) => s,
        Err(e) => {
            return CompileResult {
                filename,
                vm_code: String::new(),
                errors: vec![CompileError::io(path, e)],
            };
        }
    };

    compile_source(&source, &filename)
}

/// Compile Jack source code directly.
pub fn compile_source(source: &str, filename: &str) -> CompileResult {
    // Tokenize
    let tokenizer = jack_analyzer::tokenizer::JackTokenizer::new(source);
    let tokens = match tokenizer.tokenize() {
        Ok(tokens) => tokens,
        Err(errors) => {
            return CompileResult {
                filename: filename.to_string(),
                vm_code: String::new(),
                errors: errors.into_iter().map(CompileError::from).collect(),
            };
        }
    };

    // Parse
    let parser = jack_analyzer::parser::Parser::new(&tokens);
    let class = match parser.parse() {
        Ok(class) => class,
        Err(errors) => {
            return CompileResult {
                filename: filename.to_string(),
                vm_code: String::new(),
                errors: errors.into_iter().map(CompileError::from).collect(),
            };
        }
    };

    // Generate VM code
    match CodeGenerator::compile(&class) {
        Ok(vm_code) => CompileResult {
            filename: filename.to_string(),
            vm_code,
            errors: Vec::new(),
        },
        Err(errors) => CompileResult {
            filename: filename.to_string(),
            vm_code: String::new(),
            errors,
        },
    }
}

/// Compile all Jack files in a directory.
///
/// Each file is compiled independently; one file's errors do not prevent
/// its siblings from compiling.
pub fn compile_directory(dir: &Path) -> Vec<CompileResult> {
    let jack_files: Vec<_> = match fs::read_dir(dir) {
        Ok(entries) => entries
            .filter_map(|e| e.ok())
            .map(|e| e.path())
            .filter(|p| p.extension().is_some_and(|ext| ext == "jack"))
            .collect(),
        Err(e) => {
            return vec![CompileResult {
                filename: dir.to_string_lossy().to_string(),
                vm_code: String::new(),
                errors: vec![CompileError::io(dir, e)],
            }];
        }
    };

    if jack_files.is_empty() {
        return Vec::new();
    }

    // Parallel compilation
    jack_files
        .par_iter()
        .map(|path| compile_file(path))
        .collect()
}

/// Write a compile result to an output file.
pub fn write_result(result: &CompileResult, output_dir: &Path) -> Result<(), CompileError> {
    let vm_path = output_dir.join(format!("{}.vm", result.filename));
    fs::write(&vm_path, &result.vm_code).map_err(|e| CompileError::io(&vm_path, e))
}
