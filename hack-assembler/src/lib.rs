pub mod codegen;
pub mod error;
pub mod parser;
pub mod symbols;

use codegen::HackCodeGen;
use error::{AsmError, Result};
use parser::{Instruction, Line, parse_line};
use symbols::SymbolTable;

/// Assemble Hack assembly source to binary
pub fn assemble(source: &str) -> Result<String> {
    let lines: Vec<&str> = source.lines().collect();

    // Pre-allocate output (estimate ~16 chars per line)
    let mut output = String::with_capacity(lines.len() * 17);

    // Pass 1: Parse and build symbol table
    let mut symbol_table = SymbolTable::new();
    let mut parsed_lines = Vec::with_capacity(lines.len());
    let mut rom_address = 0u16;

    for (line_num, line) in lines.iter().enumerate() {
        let parsed = parse_line(line, line_num + 1)?;

        match &parsed {
            Line::Label(label) => {
                symbol_table
                    .add_label(label.clone(), rom_address)
                    .map_err(|dup| AsmError::DuplicateLabel {
                        line: line_num + 1,
                        label: dup,
                    })?;
            }
            Line::Instruction(_) => {
                rom_address += 1;
            }
            Line::Empty => {}
        }

        parsed_lines.push(parsed);
    }

    // Pass 2: Resolve symbols and generate code
    let codegen = HackCodeGen::hack();

    for parsed in parsed_lines.iter() {
        match parsed {
            Line::Instruction(inst) => {
                // Resolve symbols to addresses
                let resolved = match inst {
                    Instruction::ASymbol(symbol) => {
                        let addr = symbol_table.get_or_allocate(symbol);
                        inst.clone().resolve(addr)
                    }
                    Instruction::AValue(v) => inst.clone().resolve(*v),
                    Instruction::CInstruction { .. } => inst.clone().resolve(0), // addr unused for C-instructions
                };

                // Zero-allocation encoding: write directly to output buffer
                codegen.encode(&resolved, &mut output);
                output.push('\n');
            }
            Line::Label(_) | Line::Empty => {}
        }
    }

    Ok(output.trim_end().to_string())
}
