use std::fmt::Display;

use crate::Span;

use super::{
    expressions::{
        BinaryExpr, BooleanExpr, CallExpr, NullExpr, NumberExpr, StringExpr, SymbolExpr,
        UnaryExpr, VoidExpr,
    },
    statements::{
        BlockStmt, DeclStmt, EmptyStmt, ExpressionStmt, FnDecl, ReturnStmt, TypeDecl, VarDecl,
    },
    types::{InterfaceTypeExpr, NamedTypeExpr, PointerTypeExpr, PrimitiveTypeExpr, StructTypeExpr},
};

/// Statement Types
#[derive(PartialEq, Eq, Debug, Clone, Copy)]
pub enum StmtType {
    ExpressionStmt,
    DeclStmt,
    EmptyStmt,
    BlockStmt,
    ReturnStmt,
}

/// A statement inside a block.
#[derive(Debug, Clone, PartialEq)]
pub enum Stmt {
    Expression(ExpressionStmt),
    Decl(DeclStmt),
    Empty(EmptyStmt),
    Block(BlockStmt),
    Return(ReturnStmt),
}

impl Stmt {
    pub fn get_stmt_type(&self) -> StmtType {
        match self {
            Stmt::Expression(_) => StmtType::ExpressionStmt,
            Stmt::Decl(_) => StmtType::DeclStmt,
            Stmt::Empty(_) => StmtType::EmptyStmt,
            Stmt::Block(_) => StmtType::BlockStmt,
            Stmt::Return(_) => StmtType::ReturnStmt,
        }
    }

    pub fn get_span(&self) -> &Span {
        match self {
            Stmt::Expression(stmt) => &stmt.span,
            Stmt::Decl(stmt) => &stmt.span,
            Stmt::Empty(stmt) => &stmt.span,
            Stmt::Block(stmt) => &stmt.span,
            Stmt::Return(stmt) => &stmt.span,
        }
    }
}

/// Declaration Types
#[derive(PartialEq, Eq, Debug, Clone, Copy)]
pub enum DeclType {
    VarDecl,
    TypeDecl,
    FnDecl,
}

/// A declaration, either top-level (`fn`, `type`) or inside a block (`mut`, `const`).
#[derive(Debug, Clone, PartialEq)]
pub enum Decl {
    Var(VarDecl),
    Type(TypeDecl),
    Fn(FnDecl),
}

impl Decl {
    pub fn get_decl_type(&self) -> DeclType {
        match self {
            Decl::Var(_) => DeclType::VarDecl,
            Decl::Type(_) => DeclType::TypeDecl,
            Decl::Fn(_) => DeclType::FnDecl,
        }
    }

    pub fn get_span(&self) -> &Span {
        match self {
            Decl::Var(decl) => &decl.span,
            Decl::Type(decl) => &decl.span,
            Decl::Fn(decl) => &decl.span,
        }
    }
}

/// Expression Types
///
/// Defines the various kinds of expressions in the AST.
#[derive(PartialEq, Eq, Clone, Copy, Debug)]
pub enum ExprType {
    Symbol,
    Number,
    String,
    Boolean,
    Binary,
    Unary,
    Call,
    Null,
    Void,
}

impl Display for ExprType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:?}Expr", self)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    Symbol(SymbolExpr),
    Number(NumberExpr),
    String(StringExpr),
    Boolean(BooleanExpr),
    Binary(BinaryExpr),
    Unary(UnaryExpr),
    Call(CallExpr),
    Null(NullExpr),
    Void(VoidExpr),
}

impl Expr {
    pub fn get_expr_type(&self) -> ExprType {
        match self {
            Expr::Symbol(_) => ExprType::Symbol,
            Expr::Number(_) => ExprType::Number,
            Expr::String(_) => ExprType::String,
            Expr::Boolean(_) => ExprType::Boolean,
            Expr::Binary(_) => ExprType::Binary,
            Expr::Unary(_) => ExprType::Unary,
            Expr::Call(_) => ExprType::Call,
            Expr::Null(_) => ExprType::Null,
            Expr::Void(_) => ExprType::Void,
        }
    }

    pub fn get_span(&self) -> &Span {
        match self {
            Expr::Symbol(expr) => &expr.span,
            Expr::Number(expr) => &expr.span,
            Expr::String(expr) => &expr.span,
            Expr::Boolean(expr) => &expr.span,
            Expr::Binary(expr) => &expr.span,
            Expr::Unary(expr) => &expr.span,
            Expr::Call(expr) => &expr.span,
            Expr::Null(expr) => &expr.span,
            Expr::Void(expr) => &expr.span,
        }
    }
}

/// A type as written in source.
///
/// Named types refer to an earlier `type` declaration by name; the code
/// generator resolves them against the types it has already lowered.
#[derive(Debug, Clone, PartialEq)]
pub enum TypeExpr {
    Primitive(PrimitiveTypeExpr),
    Pointer(PointerTypeExpr),
    Struct(StructTypeExpr),
    Interface(InterfaceTypeExpr),
    Named(NamedTypeExpr),
}

impl TypeExpr {
    pub fn get_span(&self) -> &Span {
        match self {
            TypeExpr::Primitive(ty) => &ty.span,
            TypeExpr::Pointer(ty) => &ty.span,
            TypeExpr::Struct(ty) => &ty.span,
            TypeExpr::Interface(ty) => &ty.span,
            TypeExpr::Named(ty) => &ty.span,
        }
    }

    /// Number of pointer levels wrapped around the innermost type.
    pub fn pointer_depth(&self) -> usize {
        match self {
            TypeExpr::Pointer(pointer) => 1 + pointer.pointee.pointer_depth(),
            _ => 0,
        }
    }
}

impl Display for TypeExpr {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TypeExpr::Primitive(ty) => write!(f, "{}", ty.kind),
            TypeExpr::Pointer(ty) => write!(f, "{}*", ty.pointee),
            TypeExpr::Struct(ty) => write!(f, "struct({} properties)", ty.properties.len()),
            TypeExpr::Interface(ty) => write!(f, "interface({} methods)", ty.methods.len()),
            TypeExpr::Named(ty) => write!(f, "{}", ty.name),
        }
    }
}
