//! Lexical analysis module for the compiler.
//!
//! This module contains the lexer (tokenizer) that converts source code
//! into a stream of tokens for parsing. It handles:
//!
//! - Tokenization of source code using anchored regex patterns
//! - Recognition of keywords, primitive type names, literals and operators
//! - Row/column tracking for error reporting
//! - Line and block comments

pub mod lexer;
pub mod tokens;

#[cfg(test)]
mod tests;
