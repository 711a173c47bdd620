//! Parser module for building an Abstract Syntax Tree (AST).
//!
//! This module contains the parser that transforms a stream of tokens
//! into a list of top-level declarations. It handles:
//!
//! - Declarations (`fn`, methods with receivers, `type`)
//! - Statement parsing (variable declarations, returns, nested blocks)
//! - Expression parsing by precedence climbing, with postfix calls
//! - Type parsing (primitives, pointers, structs, interfaces, named types)
//! - Error collection across the whole file

pub mod expr;
pub mod lookups;
pub mod parser;
pub mod stmt;
pub mod types;
