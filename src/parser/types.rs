//! Type parsing implementation.
//!
//! This module handles parsing of type expressions:
//!
//! - Primitive types (`i32`, `f64`, `bool`, `void`, ...)
//! - Named types declared earlier with `type`
//! - Struct and interface bodies
//! - Pointer suffixes, one nesting level per `*`
//!
//! Like expressions, the leading token selects a handler from a lookup
//! table; pointer suffixes are folded on afterwards.

use std::collections::HashMap;

use crate::{
    ast::{
        ast::TypeExpr,
        types::{
            InterfaceTypeExpr, Method, NamedTypeExpr, Param, PointerTypeExpr, PrimitiveKind,
            PrimitiveTypeExpr, Property, StructTypeExpr,
        },
    },
    errors::errors::{Error, ErrorImpl},
    lexer::tokens::TokenKind,
    Span,
};

use super::{parser::Parser, stmt::parse_ident_list};

/// Type alias for type handler functions.
pub type TypeNUDHandler = fn(&mut Parser) -> Result<TypeExpr, Error>;

/// Type alias for type lookup table.
pub type TypeNUDLookup = HashMap<TokenKind, TypeNUDHandler>;

/// Initializes the type parsing lookup table.
pub fn create_token_type_lookups(parser: &mut Parser) {
    for kind in [
        TokenKind::I64,
        TokenKind::U64,
        TokenKind::I32,
        TokenKind::U32,
        TokenKind::I16,
        TokenKind::U16,
        TokenKind::I8,
        TokenKind::U8,
        TokenKind::F64,
        TokenKind::F32,
        TokenKind::Bool,
        TokenKind::Void,
    ] {
        parser.type_nud(kind, parse_primitive_type);
    }

    parser.type_nud(TokenKind::Identifier, parse_named_type);
    parser.type_nud(TokenKind::Struct, parse_struct_type);
    parser.type_nud(TokenKind::Interface, parse_interface_type);
}

pub fn parse_type(parser: &mut Parser) -> Result<TypeExpr, Error> {
    let token_kind = parser.current_token_kind();
    let Some(handler) = parser.get_type_nud_lookup().get(&token_kind).copied() else {
        return Err(parser.unexpected("expected a type"));
    };

    let mut ty = handler(parser)?;

    // T*** becomes Pointer(Pointer(Pointer(T)))
    while parser.current_token_kind() == TokenKind::Star {
        let star = parser.advance().clone();
        ty = TypeExpr::Pointer(PointerTypeExpr {
            span: Span {
                start: ty.get_span().start.clone(),
                end: star.span.end,
            },
            pointee: Box::new(ty),
        });
    }

    Ok(ty)
}

pub fn parse_primitive_type(parser: &mut Parser) -> Result<TypeExpr, Error> {
    let token = parser.advance().clone();

    match PrimitiveKind::from_token(token.kind) {
        Some(kind) => Ok(TypeExpr::Primitive(PrimitiveTypeExpr {
            kind,
            span: token.span,
        })),
        None => Err(Error::new(
            ErrorImpl::UnexpectedToken { token: token.value },
            token.span.start,
        )),
    }
}

pub fn parse_named_type(parser: &mut Parser) -> Result<TypeExpr, Error> {
    let token = parser.expect(TokenKind::Identifier)?;

    if parser.get_known_type(&token.value).is_none() {
        return Err(Error::new(
            ErrorImpl::UnknownType { type_: token.value },
            token.span.start,
        ));
    }

    Ok(TypeExpr::Named(NamedTypeExpr {
        name: token.value,
        span: token.span,
    }))
}

/// `struct { [pub] (mut|const) Type a[, b...] ... }`
pub fn parse_struct_type(parser: &mut Parser) -> Result<TypeExpr, Error> {
    let start = parser.advance().span.start.clone();

    let error = parser.unexpected("expected `{` in struct type declaration");
    parser.expect_error(TokenKind::OpenCurly, Some(error))?;

    let mut properties = vec![];
    while parser.current_token_kind() != TokenKind::CloseCurly {
        properties.push(parse_property(parser)?);
    }

    let end = parser.expect(TokenKind::CloseCurly)?.span.end;

    Ok(TypeExpr::Struct(StructTypeExpr {
        properties,
        span: Span { start, end },
    }))
}

pub fn parse_property(parser: &mut Parser) -> Result<Property, Error> {
    let start = parser.get_position();

    let public = parser.current_token_kind() == TokenKind::Pub;
    if public {
        parser.advance();
    }

    let mutable = match parser.current_token_kind() {
        TokenKind::Mut => true,
        TokenKind::Const => false,
        _ => return Err(parser.unexpected("expected either `mut` or `const` in property")),
    };
    parser.advance();

    let ty = parse_type(parser)?;
    let names = parse_ident_list(parser, "expected property name")?;

    Ok(Property {
        public,
        mutable,
        ty,
        names,
        span: Span {
            start,
            end: parser.get_position(),
        },
    })
}

/// `interface { name(params) [-> Type] ... }`
pub fn parse_interface_type(parser: &mut Parser) -> Result<TypeExpr, Error> {
    let start = parser.advance().span.start.clone();

    let error = parser.unexpected("expected `{` in interface type declaration");
    parser.expect_error(TokenKind::OpenCurly, Some(error))?;

    let mut methods = vec![];
    while parser.current_token_kind() != TokenKind::CloseCurly {
        methods.push(parse_method(parser)?);
    }

    let end = parser.expect(TokenKind::CloseCurly)?.span.end;

    Ok(TypeExpr::Interface(InterfaceTypeExpr {
        methods,
        span: Span { start, end },
    }))
}

pub fn parse_method(parser: &mut Parser) -> Result<Method, Error> {
    let error = parser.unexpected("expected identifier in method declaration");
    let name_token = parser.expect_error(TokenKind::Identifier, Some(error))?;

    let parameters = parse_param_list(parser)?;

    let return_type = if parser.current_token_kind() == TokenKind::Arrow {
        parser.advance();
        parse_type(parser)?
    } else {
        TypeExpr::Primitive(PrimitiveTypeExpr {
            kind: PrimitiveKind::Void,
            span: name_token.span.clone(),
        })
    };

    Ok(Method {
        span: Span {
            start: name_token.span.start.clone(),
            end: return_type.get_span().end.clone(),
        },
        name: name_token.value,
        parameters,
        return_type,
    })
}

/// `([mut] Type name, ...)`
pub fn parse_param_list(parser: &mut Parser) -> Result<Vec<Param>, Error> {
    let error = parser.unexpected("expected `(` before parameter list");
    parser.expect_error(TokenKind::OpenParen, Some(error))?;

    let mut params = vec![];

    if parser.current_token_kind() != TokenKind::CloseParen {
        loop {
            let start = parser.get_position();

            let mutable = parser.current_token_kind() == TokenKind::Mut;
            if mutable {
                parser.advance();
            }

            let ty = parse_type(parser)?;
            let error = parser.unexpected("expected parameter name");
            let name = parser.expect_error(TokenKind::Identifier, Some(error))?;

            params.push(Param {
                mutable,
                ty,
                name: name.value,
                span: Span {
                    start,
                    end: name.span.end,
                },
            });

            match parser.current_token_kind() {
                TokenKind::CloseParen => break,
                TokenKind::Comma => {
                    parser.advance();
                }
                _ => return Err(parser.unexpected("expected `,` or `)` in parameter list")),
            }
        }
    }

    parser.expect(TokenKind::CloseParen)?;
    Ok(params)
}
