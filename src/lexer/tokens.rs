use lazy_static::lazy_static;
use std::{collections::HashMap, fmt::Display};

use crate::Span;

lazy_static! {
    pub static ref RESERVED_LOOKUP: HashMap<&'static str, TokenKind> = {
        let mut map = HashMap::new();
        map.insert("fn", TokenKind::Fn);
        map.insert("return", TokenKind::Return);
        map.insert("pub", TokenKind::Pub);
        map.insert("mut", TokenKind::Mut);
        map.insert("const", TokenKind::Const);
        map.insert("type", TokenKind::Type);
        map.insert("struct", TokenKind::Struct);
        map.insert("interface", TokenKind::Interface);
        map.insert("true", TokenKind::True);
        map.insert("false", TokenKind::False);
        map.insert("i64", TokenKind::I64);
        map.insert("u64", TokenKind::U64);
        map.insert("i32", TokenKind::I32);
        map.insert("u32", TokenKind::U32);
        map.insert("i16", TokenKind::I16);
        map.insert("u16", TokenKind::U16);
        map.insert("i8", TokenKind::I8);
        map.insert("u8", TokenKind::U8);
        map.insert("f64", TokenKind::F64);
        map.insert("f32", TokenKind::F32);
        map.insert("bool", TokenKind::Bool);
        map.insert("void", TokenKind::Void);
        map
    };
}

#[derive(Debug, PartialEq, Eq, Clone, Copy, Hash)]
pub enum TokenKind {
    EOF,
    Number,
    String,
    Identifier,

    OpenCurly,
    CloseCurly,
    OpenParen,
    CloseParen,

    Assignment, // =
    Equals,     // ==
    NotEquals,  // !=

    Less,
    LessEquals,
    Greater,
    GreaterEquals,

    Or,
    And,
    Ampersand,

    Dot,
    Semicolon,
    Comma,
    Arrow,

    Plus,
    Dash,
    Slash,
    Star,

    // Reserved
    Fn,
    Return,
    Pub,
    Mut,
    Const,
    Type,
    Struct,
    Interface,
    True,
    False,

    // Primitive types
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

impl TokenKind {
    pub fn is_primitive_type(&self) -> bool {
        matches!(
            self,
            TokenKind::I64
                | TokenKind::U64
                | TokenKind::I32
                | TokenKind::U32
                | TokenKind::I16
                | TokenKind::U16
                | TokenKind::I8
                | TokenKind::U8
                | TokenKind::F64
                | TokenKind::F32
                | TokenKind::Bool
                | TokenKind::Void
        )
    }

    /// Tokens after which a `-` is a binary minus rather than a sign.
    pub fn ends_operand(&self) -> bool {
        matches!(
            self,
            TokenKind::Number
                | TokenKind::String
                | TokenKind::Identifier
                | TokenKind::CloseParen
                | TokenKind::True
                | TokenKind::False
        )
    }
}

impl Display for TokenKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:?}", self)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    pub kind: TokenKind,
    pub value: String,
    pub span: Span,
}

impl Display for Token {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.kind {
            TokenKind::String | TokenKind::Identifier | TokenKind::Number => write!(
                f,
                "{} ({}) at {}:{}",
                self.kind, self.value, self.span.start.row, self.span.start.col
            ),
            _ => write!(
                f,
                "{} at {}:{}",
                self.kind, self.span.start.row, self.span.start.col
            ),
        }
    }
}
