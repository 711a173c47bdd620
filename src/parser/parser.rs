//! Parser implementation for building the Abstract Syntax Tree.
//!
//! This module contains the main Parser struct and the `parse` entry point.
//! Expressions are parsed by precedence climbing over a per-parser
//! precedence table; statements, primaries and types dispatch through
//! lookup tables keyed on the current token kind.
//!
//! The parser also owns the table of declared type names, so a `type`
//! declaration is visible to every type expression parsed after it.

use std::{collections::HashMap, rc::Rc};

use crate::{
    ast::{ast::{Decl, TypeExpr}, statements::TypeDecl},
    errors::errors::{Error, ErrorImpl},
    lexer::tokens::{Token, TokenKind},
    Position, Span, MK_TOKEN,
};

use super::{
    lookups::{
        create_token_lookups, NUDHandler, NUDLookup, PrecedenceLookup, StmtHandler, StmtLookup,
        NO_PRECEDENCE,
    },
    stmt::parse_top_level_decl,
    types::{create_token_type_lookups, TypeNUDHandler, TypeNUDLookup},
};

/// The main parser structure that maintains parsing state.
pub struct Parser {
    /// The list of tokens to parse, always terminated by `EOF`
    tokens: Vec<Token>,
    /// Current position in the token stream
    pos: usize,
    /// The name of the source file being parsed
    file: Rc<String>,
    /// Lookup table for statement parsing handlers
    stmt_lookup: StmtLookup,
    /// Lookup table for primary and prefix expression handlers
    nud_lookup: NUDLookup,
    /// Lookup table for binary operator precedence
    precedence_lookup: PrecedenceLookup,
    /// Lookup table for type handlers
    type_nud_lookup: TypeNUDLookup,
    /// Type declarations parsed so far, by name
    known_types: HashMap<String, TypeDecl>,
    /// Return type of the function whose body is being parsed
    current_return_type: Option<TypeExpr>,
    /// Counter for generating unique block IDs
    current_id: i32,
}

impl Parser {
    pub fn new(mut tokens: Vec<Token>, file: Rc<String>) -> Self {
        if tokens.last().map(|token| token.kind) != Some(TokenKind::EOF) {
            let end = tokens
                .last()
                .map(|token| token.span.end.clone())
                .unwrap_or_else(|| Position::new(1, 1, Rc::clone(&file)));

            tokens.push(MK_TOKEN!(
                TokenKind::EOF,
                String::from("EOF"),
                Span { start: end.clone(), end }
            ));
        }

        Parser {
            tokens,
            pos: 0,
            file,
            stmt_lookup: HashMap::new(),
            nud_lookup: HashMap::new(),
            precedence_lookup: HashMap::new(),
            type_nud_lookup: HashMap::new(),
            known_types: HashMap::new(),
            current_return_type: None,
            current_id: 1024, // Give some space for reserved ids
        }
    }

    /// Returns the current token without advancing.
    pub fn current_token(&self) -> &Token {
        &self.tokens[self.pos.min(self.tokens.len() - 1)]
    }

    /// Returns the kind of the current token.
    pub fn current_token_kind(&self) -> TokenKind {
        self.current_token().kind
    }

    /// Advances to the next token and returns the previous token.
    ///
    /// The cursor never moves past `EOF`.
    pub fn advance(&mut self) -> &Token {
        let previous = self.pos.min(self.tokens.len() - 1);
        if self.pos < self.tokens.len() - 1 {
            self.pos += 1;
        }
        &self.tokens[previous]
    }

    /// Expects a token of the specified kind, with optional custom error.
    pub fn expect_error(
        &mut self,
        expected_kind: TokenKind,
        error: Option<Error>,
    ) -> Result<Token, Error> {
        let token = self.current_token();
        if token.kind != expected_kind {
            return Err(error.unwrap_or_else(|| {
                Error::new(
                    ErrorImpl::UnexpectedToken {
                        token: token.value.clone(),
                    },
                    token.span.start.clone(),
                )
            }));
        }

        Ok(self.advance().clone())
    }

    /// Expects a token of the specified kind with default error message.
    pub fn expect(&mut self, expected_kind: TokenKind) -> Result<Token, Error> {
        self.expect_error(expected_kind, None)
    }

    /// Builds an `UnexpectedTokenDetailed` error at the current token.
    pub fn unexpected(&self, message: &str) -> Error {
        Error::new(
            ErrorImpl::UnexpectedTokenDetailed {
                token: self.current_token().value.clone(),
                message: String::from(message),
            },
            self.get_position(),
        )
    }

    /// Checks if there are more tokens to parse.
    pub fn has_tokens(&self) -> bool {
        self.current_token_kind() != TokenKind::EOF
    }

    pub fn get_stmt_lookup(&self) -> &StmtLookup {
        &self.stmt_lookup
    }

    pub fn get_nud_lookup(&self) -> &NUDLookup {
        &self.nud_lookup
    }

    pub fn get_type_nud_lookup(&self) -> &TypeNUDLookup {
        &self.type_nud_lookup
    }

    /// Precedence of `kind` as a binary operator, or `NO_PRECEDENCE`.
    pub fn token_precedence(&self, kind: TokenKind) -> i32 {
        match self.precedence_lookup.get(&kind) {
            Some(precedence) if *precedence > 0 => *precedence,
            _ => NO_PRECEDENCE,
        }
    }

    /// Registers a binary operator with its precedence.
    pub fn binary(&mut self, kind: TokenKind, precedence: i32) {
        self.precedence_lookup.insert(kind, precedence);
    }

    /// Registers a primary (prefix) expression handler for a token.
    pub fn nud(&mut self, kind: TokenKind, nud_fn: NUDHandler) {
        self.nud_lookup.insert(kind, nud_fn);
    }

    /// Registers a statement handler for a token.
    pub fn stmt(&mut self, kind: TokenKind, stmt_fn: StmtHandler) {
        self.stmt_lookup.insert(kind, stmt_fn);
    }

    /// Registers a type handler for a token.
    pub fn type_nud(&mut self, kind: TokenKind, nud_fn: TypeNUDHandler) {
        self.type_nud_lookup.insert(kind, nud_fn);
    }

    pub fn register_type(&mut self, decl: TypeDecl) {
        self.known_types.insert(decl.name.clone(), decl);
    }

    pub fn get_known_type(&self, name: &str) -> Option<&TypeDecl> {
        self.known_types.get(name)
    }

    pub fn get_current_return_type(&self) -> Option<&TypeExpr> {
        self.current_return_type.as_ref()
    }

    /// Sets the return type of the function being parsed, returning the old one.
    pub fn set_current_return_type(&mut self, return_type: Option<TypeExpr>) -> Option<TypeExpr> {
        std::mem::replace(&mut self.current_return_type, return_type)
    }

    /// Advances the internal ID counter and returns the previous value.
    pub fn advance_id(&mut self) -> i32 {
        let id = self.current_id;
        self.current_id += 1;
        id
    }

    /// Returns the source position of the current token.
    pub fn get_position(&self) -> Position {
        self.current_token().span.start.clone()
    }

    pub fn get_file(&self) -> Rc<String> {
        Rc::clone(&self.file)
    }

    /// Skips to the next token that can start a top-level declaration.
    fn synchronize(&mut self, start: usize) {
        if self.pos == start {
            self.advance();
        }

        while !matches!(
            self.current_token_kind(),
            TokenKind::Fn | TokenKind::Type | TokenKind::EOF
        ) {
            self.advance();
        }
    }
}

/// Parses a stream of tokens into a list of top-level declarations.
///
/// A declaration that fails to parse records its error and the parser
/// resumes at the next `fn` or `type`, so every error in the file is
/// reported in source order.
///
/// # Returns
///
/// A tuple containing:
/// - The Parser instance (with state after parsing)
/// - Either every declaration, or every error encountered
pub fn parse(tokens: Vec<Token>, file: Rc<String>) -> (Parser, Result<Vec<Decl>, Vec<Error>>) {
    let mut parser = Parser::new(tokens, file);
    create_token_lookups(&mut parser);
    create_token_type_lookups(&mut parser);

    let mut decls = vec![];
    let mut errors = vec![];

    while parser.has_tokens() {
        let start = parser.pos;

        match parse_top_level_decl(&mut parser) {
            Ok(decl) => decls.push(decl),
            Err(error) => {
                errors.push(error);
                parser.set_current_return_type(None);
                parser.synchronize(start);
            }
        }
    }

    if errors.is_empty() {
        (parser, Ok(decls))
    } else {
        (parser, Err(errors))
    }
}
