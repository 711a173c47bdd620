use std::slice::Iter;

use crate::Span;

use super::{
    ast::{Decl, Expr, Stmt, TypeExpr},
    types::Param,
};

#[derive(Debug, Clone, PartialEq)]
pub struct BlockStmt {
    pub body: Vec<Stmt>,
    /// Unique per parse; the code generator keys its scopes on it.
    pub id: i32,
    pub name: String,
    pub span: Span,
}

impl BlockStmt {
    pub fn iter(&self) -> Iter<'_, Stmt> {
        self.body.iter()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ExpressionStmt {
    pub expression: Expr,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq)]
pub struct DeclStmt {
    pub decl: Box<Decl>,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq)]
pub struct EmptyStmt {
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ReturnStmt {
    pub value: Expr,
    /// Return type of the enclosing function.
    pub return_type: TypeExpr,
    pub span: Span,
}

/// `mut i32 a, b = 1, 2`
///
/// `names` and `values` always have the same length; missing initializers
/// are filled with `NullExpr`s of the declared type by the parser.
#[derive(Debug, Clone, PartialEq)]
pub struct VarDecl {
    pub mutable: bool,
    pub ty: TypeExpr,
    pub names: Vec<String>,
    pub values: Vec<Expr>,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TypeDecl {
    pub name: String,
    pub ty: TypeExpr,
    pub span: Span,
}

/// The `(s Shape)` in `fn (s Shape) area() -> f64`.
#[derive(Debug, Clone, PartialEq)]
pub struct Receiver {
    pub name: String,
    pub ty: TypeExpr,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq)]
pub struct FnDecl {
    pub receiver: Option<Receiver>,
    pub name: String,
    pub parameters: Vec<Param>,
    pub return_type: TypeExpr,
    pub body: BlockStmt,
    pub span: Span,
}
