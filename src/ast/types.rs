//! Type expressions as they appear in source.
//!
//! This module defines:
//!
//! - Primitive types (fixed-width integers, floats, `bool`, `void`)
//! - Pointer types, nested once per `*`
//! - Struct types with their property lists
//! - Interface types with their method signatures
//! - References to previously declared named types

use std::fmt::Display;

use crate::{lexer::tokens::TokenKind, Span};

use super::ast::TypeExpr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PrimitiveKind {
    I64,
    U64,
    I32,
    U32,
    I16,
    U16,
    I8,
    U8,
    F64,
    F32,
    Bool,
    Void,
}

impl PrimitiveKind {
    pub fn from_token(kind: TokenKind) -> Option<PrimitiveKind> {
        match kind {
            TokenKind::I64 => Some(PrimitiveKind::I64),
            TokenKind::U64 => Some(PrimitiveKind::U64),
            TokenKind::I32 => Some(PrimitiveKind::I32),
            TokenKind::U32 => Some(PrimitiveKind::U32),
            TokenKind::I16 => Some(PrimitiveKind::I16),
            TokenKind::U16 => Some(PrimitiveKind::U16),
            TokenKind::I8 => Some(PrimitiveKind::I8),
            TokenKind::U8 => Some(PrimitiveKind::U8),
            TokenKind::F64 => Some(PrimitiveKind::F64),
            TokenKind::F32 => Some(PrimitiveKind::F32),
            TokenKind::Bool => Some(PrimitiveKind::Bool),
            TokenKind::Void => Some(PrimitiveKind::Void),
            _ => None,
        }
    }
}

impl Display for PrimitiveKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            PrimitiveKind::I64 => "i64",
            PrimitiveKind::U64 => "u64",
            PrimitiveKind::I32 => "i32",
            PrimitiveKind::U32 => "u32",
            PrimitiveKind::I16 => "i16",
            PrimitiveKind::U16 => "u16",
            PrimitiveKind::I8 => "i8",
            PrimitiveKind::U8 => "u8",
            PrimitiveKind::F64 => "f64",
            PrimitiveKind::F32 => "f32",
            PrimitiveKind::Bool => "bool",
            PrimitiveKind::Void => "void",
        };

        write!(f, "{}", name)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct PrimitiveTypeExpr {
    pub kind: PrimitiveKind,
    pub span: Span,
}

/// `T*`; `T**` is a pointer whose pointee is again a pointer.
#[derive(Debug, Clone, PartialEq)]
pub struct PointerTypeExpr {
    pub pointee: Box<TypeExpr>,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq)]
pub struct NamedTypeExpr {
    pub name: String,
    pub span: Span,
}

/// `pub mut i32 x, y` declares two properties sharing type and flags.
#[derive(Debug, Clone, PartialEq)]
pub struct Property {
    pub public: bool,
    pub mutable: bool,
    pub ty: TypeExpr,
    pub names: Vec<String>,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq)]
pub struct StructTypeExpr {
    pub properties: Vec<Property>,
    pub span: Span,
}

impl StructTypeExpr {
    /// Property names in field order, one entry per declared name.
    pub fn field_names(&self) -> Vec<&str> {
        self.properties
            .iter()
            .flat_map(|property| property.names.iter().map(String::as_str))
            .collect()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Param {
    pub mutable: bool,
    pub ty: TypeExpr,
    pub name: String,
    pub span: Span,
}

/// Method signature inside an interface body.
#[derive(Debug, Clone, PartialEq)]
pub struct Method {
    pub name: String,
    pub parameters: Vec<Param>,
    pub return_type: TypeExpr,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq)]
pub struct InterfaceTypeExpr {
    pub methods: Vec<Method>,
    pub span: Span,
}
