//! Two-level symbol table for the Jack compiler.
//!
//! The symbol table maintains two scopes:
//! - **Class scope**: `static` and `field` variables, persists across subroutines
//! - **Subroutine scope**: `argument` and `local` variables, reset per subroutine
//!
//! Lookup is subroutine-first, allowing local variables to shadow class-level ones.

use crate::error::CompileError;
use jack_analyzer::ast::{SubroutineKind, Type};
use jack_analyzer::token::Span;
use std::collections::HashMap;

/// The kind of symbol, determining its VM segment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SymbolKind {
    /// Class-level static variable → `static` segment
    Static,
    /// Class-level field variable → `this` segment
    Field,
    /// Subroutine argument → `argument` segment
    Argument,
    /// Subroutine local variable → `local` segment
    Local,
}

impl SymbolKind {
    /// Convert to VM segment name.
    #[inline]
    pub fn to_segment(self) -> &'static str {
        match self {
            SymbolKind::Static => "static",
            SymbolKind::Field => "this",
            SymbolKind::Argument => "argument",
            SymbolKind::Local => "local",
        }
    }

    /// Check if this is a class-level symbol.
    #[inline]
    pub fn is_class_level(self) -> bool {
        matches!(self, SymbolKind::Static | SymbolKind::Field)
    }
}

/// A symbol entry in the symbol table.
#[derive(Debug, Clone)]
pub struct Symbol {
    /// The symbol name.
    pub name: String,
    /// The symbol's type (int, char, boolean, or class name).
    pub symbol_type: Type,
    /// The kind of symbol (determines VM segment).
    pub kind: SymbolKind,
    /// The index within its segment.
    pub index: u16,
}

impl Symbol {
    /// Get the VM segment for this symbol.
    #[inline]
    pub fn segment(&self) -> &'static str {
        self.kind.to_segment()
    }
}

/// Two-level symbol table for Jack compilation.
///
/// Manages class-scope (static, field) and subroutine-scope (argument, local) symbols
/// with proper index counting per kind.
#[derive(Debug)]
pub struct SymbolTable {
    /// Class-level symbols (static and field).
    class_scope: HashMap<String, Symbol>,
    /// Subroutine-level symbols (argument and local).
    subroutine_scope: HashMap<String, Symbol>,
    /// Count of static variables.
    static_count: u16,
    /// Count of field variables.
    field_count: u16,
    /// Count of argument variables.
    argument_count: u16,
    /// Count of local variables.
    local_count: u16,
    /// Current class name.
    class_name: String,
    /// Whether `FIELD` entries resolve from the current subroutine.
    /// False while compiling a plain `function` (fields are not implicitly in scope).
    fields_visible: bool,
}

impl SymbolTable {
    /// Create a new empty symbol table.
    pub fn new() -> Self {
        Self {
            class_scope: HashMap::new(),
            subroutine_scope: HashMap::new(),
            static_count: 0,
            field_count: 0,
            argument_count: 0,
            local_count: 0,
            class_name: String::new(),
            fields_visible: true,
        }
    }

    /// Start compiling a new class.
    ///
    /// Clears class-level symbols and resets static/field counters.
    pub fn start_class(&mut self, name: &str) {
        self.class_scope.clear();
        self.subroutine_scope.clear();
        self.static_count = 0;
        self.field_count = 0;
        self.argument_count = 0;
        self.local_count = 0;
        self.class_name = name.to_string();
        self.fields_visible = true;
    }

    /// Start compiling a new subroutine.
    ///
    /// Clears subroutine-level symbols and resets argument/local counters.
    /// Class-level symbols remain accessible, except that a plain `function`
    /// hides `FIELD` entries — only `method` and `constructor` subroutines
    /// may resolve them.
    pub fn start_subroutine(&mut self, kind: SubroutineKind) {
        self.subroutine_scope.clear();
        self.argument_count = 0;
        self.local_count = 0;
        self.fields_visible = kind != SubroutineKind::Function;
    }

    /// Define a new symbol in the appropriate scope.
    ///
    /// Returns an error if the symbol is already defined in the same scope.
    pub fn define(
        &mut self,
        name: &str,
        symbol_type: Type,
        kind: SymbolKind,
        span: Span,
    ) -> Result<(), CompileError> {
        // Check for duplicates in the appropriate scope
        let scope = if kind.is_class_level() {
            &self.class_scope
        } else {
            &self.subroutine_scope
        };

        if scope.contains_key(name) {
            return Err(CompileError::duplicate_definition(name, span));
        }

        // Get and increment the appropriate counter
        let index = match kind {
            SymbolKind::Static => {
                let idx = self.static_count;
                self.static_count += 1;
                idx
            }
            SymbolKind::Field => {
                let idx = self.field_count;
                self.field_count += 1;
                idx
            }
            SymbolKind::Argument => {
                let idx = self.argument_count;
                self.argument_count += 1;
                idx
            }
            SymbolKind::Local => {
                let idx = self.local_count;
                self.local_count += 1;
                idx
            }
        };

        let symbol = Symbol {
            name: name.to_string(),
            symbol_type,
            kind,
            index,
        };

        // Insert into appropriate scope
        if kind.is_class_level() {
            self.class_scope.insert(name.to_string(), symbol);
        } else {
            self.subroutine_scope.insert(name.to_string(), symbol);
        }

        Ok(())
    }

    /// Look up a symbol by name.
    ///
    /// Searches subroutine scope first, then class scope (allowing shadowing).
    /// A `FIELD` entry is invisible while compiling a plain `function`.
    pub fn lookup(&self, name: &str) -> Option<&Symbol> {
        if let Some(sym) = self.subroutine_scope.get(name) {
            return Some(sym);
        }
        match self.class_scope.get(name) {
            Some(sym) if sym.kind == SymbolKind::Field && !self.fields_visible => None,
            other => other,
        }
    }

    /// Get the count of symbols of a given kind.
    pub fn var_count(&self, kind: SymbolKind) -> u16 {
        match kind {
            SymbolKind::Static => self.static_count,
            SymbolKind::Field => self.field_count,
            SymbolKind::Argument => self.argument_count,
            SymbolKind::Local => self.local_count,
        }
    }

    /// Get the number of field variables (needed for Memory.alloc in constructors).
    #[inline]
    pub fn field_count(&self) -> u16 {
        self.field_count
    }

    /// Get the current class name.
    #[inline]
    pub fn class_name(&self) -> &str {
        &self.class_name
    }
}

impl Default for SymbolTable {
    fn default() -> Self {
        Self::new()
    }
}
