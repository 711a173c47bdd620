use std::collections::HashMap;

use crate::{
    ast::ast::{Expr, Stmt},
    errors::errors::Error,
    lexer::tokens::TokenKind,
};

use super::{expr::*, parser::Parser, stmt::*};

/// Binary operator precedences; higher binds tighter.
///
/// `&&` binds weaker than `||`. Programs written against this table rely on
/// it, so it stays as is.
pub mod precedence {
    pub const ASSIGNMENT: i32 = 2;
    pub const LOGICAL_AND: i32 = 3;
    pub const LOGICAL_OR: i32 = 5;
    pub const RELATIONAL: i32 = 10;
    pub const ADDITIVE: i32 = 20;
    pub const MULTIPLICATIVE: i32 = 40;
    pub const MEMBER: i32 = 50;
}

/// Returned for tokens that are not binary operators.
pub const NO_PRECEDENCE: i32 = -1;

pub type StmtHandler = fn(&mut Parser) -> Result<Stmt, Error>;
pub type NUDHandler = fn(&mut Parser) -> Result<Expr, Error>;

pub fn create_token_lookups(parser: &mut Parser) {
    parser.binary(TokenKind::Assignment, precedence::ASSIGNMENT);

    // Logical
    parser.binary(TokenKind::And, precedence::LOGICAL_AND);
    parser.binary(TokenKind::Or, precedence::LOGICAL_OR);

    // Relational
    parser.binary(TokenKind::Less, precedence::RELATIONAL);
    parser.binary(TokenKind::LessEquals, precedence::RELATIONAL);
    parser.binary(TokenKind::Greater, precedence::RELATIONAL);
    parser.binary(TokenKind::GreaterEquals, precedence::RELATIONAL);
    parser.binary(TokenKind::Equals, precedence::RELATIONAL);
    parser.binary(TokenKind::NotEquals, precedence::RELATIONAL);

    // Additive and multiplicative
    parser.binary(TokenKind::Plus, precedence::ADDITIVE);
    parser.binary(TokenKind::Dash, precedence::ADDITIVE);
    parser.binary(TokenKind::Star, precedence::MULTIPLICATIVE);
    parser.binary(TokenKind::Slash, precedence::MULTIPLICATIVE);

    // Member
    parser.binary(TokenKind::Dot, precedence::MEMBER);
    parser.binary(TokenKind::Arrow, precedence::MEMBER);

    // Literals and symbols
    parser.nud(TokenKind::Number, parse_primary_expr);
    parser.nud(TokenKind::Identifier, parse_primary_expr);
    parser.nud(TokenKind::String, parse_primary_expr);
    parser.nud(TokenKind::True, parse_primary_expr);
    parser.nud(TokenKind::False, parse_primary_expr);
    parser.nud(TokenKind::OpenParen, parse_grouping_expr);
    parser.nud(TokenKind::Dash, parse_prefix_expr);
    parser.nud(TokenKind::Ampersand, parse_prefix_expr);
    parser.nud(TokenKind::Star, parse_prefix_expr);

    // Statements
    parser.stmt(TokenKind::Mut, parse_var_decl_stmt);
    parser.stmt(TokenKind::Const, parse_var_decl_stmt);
    parser.stmt(TokenKind::Return, parse_return_stmt);
    parser.stmt(TokenKind::OpenCurly, parse_nested_block_stmt);
    parser.stmt(TokenKind::Semicolon, parse_empty_stmt);
}

// Lookup tables inside parser struct, so it's easier
pub type StmtLookup = HashMap<TokenKind, StmtHandler>;
pub type NUDLookup = HashMap<TokenKind, NUDHandler>;
pub type PrecedenceLookup = HashMap<TokenKind, i32>;
