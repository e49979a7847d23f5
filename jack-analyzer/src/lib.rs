//! Jack Analyzer - lexical and syntactic analysis for the Jack programming language.
//!
//! Provides a tokenizer and a recursive-descent parser producing a typed AST.
//! Consumed by the Jack Compiler's code generator; exposes no standalone
//! binary or output format of its own.

pub mod ast;
pub mod error;
pub mod parser;
pub mod token;
pub mod tokenizer;
