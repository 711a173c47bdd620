use crate::{lexer::tokens::Token, Span};

use super::ast::{Expr, TypeExpr};

// LITERALS

/// Number Expression
///
/// The literal text is kept as written; it is parsed into a constant only
/// once the code generator knows which numeric type it has to produce.
#[derive(Debug, Clone, PartialEq)]
pub struct NumberExpr {
    pub value: String,
    /// Declared type, when the literal initializes a declaration or is returned directly.
    pub ty: Option<TypeExpr>,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq)]
pub struct StringExpr {
    pub value: String,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq)]
pub struct BooleanExpr {
    pub value: bool,
    pub span: Span,
}

/// Null placeholder for a declared name without an initializer.
#[derive(Debug, Clone, PartialEq)]
pub struct NullExpr {
    pub ty: TypeExpr,
    pub span: Span,
}

/// Marks the absence of a value, e.g. a bare `return`.
#[derive(Debug, Clone, PartialEq)]
pub struct VoidExpr {
    pub span: Span,
}

// COMPLEX

/// Reference to a variable or function by name.
#[derive(Debug, Clone, PartialEq)]
pub struct SymbolExpr {
    pub value: String,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq)]
pub struct BinaryExpr {
    pub left: Box<Expr>,
    pub operator: Token,
    pub right: Box<Expr>,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq)]
pub struct UnaryExpr {
    pub operator: Token,
    pub operand: Box<Expr>,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq)]
pub struct CallExpr {
    pub callee: Box<Expr>,
    pub arguments: Vec<Expr>,
    pub span: Span,
}
