//! Code generation module for the compiler.
//!
//! This module contains the LLVM-based code generator that lowers the
//! parsed declarations into an LLVM module in a single pass. It handles:
//!
//! - Lowering of type expressions, including struct layouts
//! - Interface vtable synthesis and method conformance
//! - Function, statement and expression code generation
//! - Block scoping of variable bindings

pub mod compiler;
pub mod expr;
pub mod stmt;
pub mod types;

#[cfg(test)]
mod tests;
