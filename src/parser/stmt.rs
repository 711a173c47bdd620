use crate::{
    ast::{
        ast::{Decl, Expr, Stmt, TypeExpr},
        expressions::{NullExpr, VoidExpr},
        statements::{
            BlockStmt, DeclStmt, EmptyStmt, ExpressionStmt, FnDecl, Receiver, ReturnStmt,
            TypeDecl, VarDecl,
        },
        types::{PrimitiveKind, PrimitiveTypeExpr},
    },
    errors::errors::{Error, ErrorImpl},
    lexer::tokens::TokenKind,
    parser::expr::parse_expr,
    Span,
};

use super::{
    parser::Parser,
    types::{parse_param_list, parse_type},
};

pub fn parse_top_level_decl(parser: &mut Parser) -> Result<Decl, Error> {
    match parser.current_token_kind() {
        TokenKind::Fn => parse_fn_decl(parser),
        TokenKind::Type => parse_type_decl(parser),
        _ => Err(parser.unexpected("expected `fn` or `type` declaration")),
    }
}

pub fn parse_stmt(parser: &mut Parser) -> Result<Stmt, Error> {
    let handler = parser
        .get_stmt_lookup()
        .get(&parser.current_token_kind())
        .copied();

    if let Some(handler) = handler {
        return handler(parser);
    }

    let expression = parse_expr(parser)?;

    Ok(Stmt::Expression(ExpressionStmt {
        span: expression.get_span().clone(),
        expression,
    }))
}

pub fn parse_empty_stmt(parser: &mut Parser) -> Result<Stmt, Error> {
    let token = parser.advance();

    Ok(Stmt::Empty(EmptyStmt {
        span: token.span.clone(),
    }))
}

/// `(mut|const) Type a, b [= x, y]`
pub fn parse_var_decl_stmt(parser: &mut Parser) -> Result<Stmt, Error> {
    let start_token = parser.advance().clone();
    let mutable = start_token.kind == TokenKind::Mut;

    let ty = parse_type(parser)?;
    let names = parse_ident_list(parser, "expected identifier in variable declaration")?;

    let values: Vec<Expr> = if parser.current_token_kind() == TokenKind::Assignment {
        parser.advance();

        let mut values = vec![parse_expr(parser)?];
        while parser.current_token_kind() == TokenKind::Comma {
            parser.advance();
            values.push(parse_expr(parser)?);
        }

        if values.len() != names.len() {
            return Err(Error::new(
                ErrorImpl::MismatchedInitializers {
                    names: names.len(),
                    values: values.len(),
                },
                start_token.span.start.clone(),
            ));
        }

        values
            .into_iter()
            .map(|value| with_literal_type(value, &ty))
            .collect()
    } else {
        // Without an initializer every name starts out as null
        let span = parser.current_token().span.clone();
        names
            .iter()
            .map(|_| {
                Expr::Null(NullExpr {
                    ty: ty.clone(),
                    span: span.clone(),
                })
            })
            .collect()
    };

    let end = values
        .last()
        .map(|value| value.get_span().end.clone())
        .unwrap_or_else(|| parser.get_position());

    let span = Span {
        start: start_token.span.start.clone(),
        end,
    };

    Ok(Stmt::Decl(DeclStmt {
        decl: Box::new(Decl::Var(VarDecl {
            mutable,
            ty,
            names,
            values,
            span: span.clone(),
        })),
        span,
    }))
}

pub fn parse_return_stmt(parser: &mut Parser) -> Result<Stmt, Error> {
    let start_token = parser.advance().clone();

    let return_type = parser
        .get_current_return_type()
        .cloned()
        .unwrap_or_else(|| void_type(start_token.span.clone()));

    let value = match parser.current_token_kind() {
        TokenKind::CloseCurly | TokenKind::Semicolon | TokenKind::EOF => Expr::Void(VoidExpr {
            span: start_token.span.clone(),
        }),
        _ => with_literal_type(parse_expr(parser)?, &return_type),
    };

    Ok(Stmt::Return(ReturnStmt {
        span: Span {
            start: start_token.span.start.clone(),
            end: value.get_span().end.clone(),
        },
        value,
        return_type,
    }))
}

pub fn parse_nested_block_stmt(parser: &mut Parser) -> Result<Stmt, Error> {
    Ok(Stmt::Block(parse_block_stmt(parser, "block")?))
}

pub fn parse_block_stmt(parser: &mut Parser, name: &str) -> Result<BlockStmt, Error> {
    let start = parser.expect(TokenKind::OpenCurly)?.span.start;

    let mut statements = Vec::new();
    while parser.current_token_kind() != TokenKind::CloseCurly {
        if !parser.has_tokens() {
            return Err(parser.unexpected("expected `}` to close the block"));
        }

        statements.push(parse_stmt(parser)?);
    }

    let end = parser.expect(TokenKind::CloseCurly)?.span.end;

    Ok(BlockStmt {
        body: statements,
        id: parser.advance_id(),
        name: String::from(name),
        span: Span { start, end },
    })
}

/// `fn [(recv Type)] name(params) [-> Type] { ... }`
pub fn parse_fn_decl(parser: &mut Parser) -> Result<Decl, Error> {
    let start = parser.advance().span.start.clone();

    let receiver = if parser.current_token_kind() == TokenKind::OpenParen {
        let receiver_start = parser.advance().span.start.clone();
        let error = parser.unexpected("expected receiver name");
        let name = parser.expect_error(TokenKind::Identifier, Some(error))?.value;
        let ty = parse_type(parser)?;
        let end = parser.expect(TokenKind::CloseParen)?.span.end;

        Some(Receiver {
            name,
            ty,
            span: Span {
                start: receiver_start,
                end,
            },
        })
    } else {
        None
    };

    let error = parser.unexpected("expected function name");
    let name_token = parser.expect_error(TokenKind::Identifier, Some(error))?;

    let parameters = parse_param_list(parser)?;

    let return_type = if parser.current_token_kind() == TokenKind::Arrow {
        parser.advance();
        parse_type(parser)?
    } else {
        void_type(name_token.span.clone())
    };

    let enclosing = parser.set_current_return_type(Some(return_type.clone()));
    let body = parse_block_stmt(parser, "entry");
    parser.set_current_return_type(enclosing);
    let body = body?;

    Ok(Decl::Fn(FnDecl {
        span: Span {
            start,
            end: body.span.end.clone(),
        },
        receiver,
        name: name_token.value,
        parameters,
        return_type,
        body,
    }))
}

/// `type Name <type>`; the name is usable by every later type expression,
/// and by its own body so that `type Node struct { mut Node* next }` parses.
pub fn parse_type_decl(parser: &mut Parser) -> Result<Decl, Error> {
    let start = parser.advance().span.start.clone();

    let error = parser.unexpected("expected identifier following `type`");
    let name_token = parser.expect_error(TokenKind::Identifier, Some(error))?;
    let name = name_token.value;

    parser.register_type(TypeDecl {
        span: name_token.span.clone(),
        name: name.clone(),
        ty: TypeExpr::Primitive(PrimitiveTypeExpr {
            kind: PrimitiveKind::Void,
            span: name_token.span,
        }),
    });

    let ty = parse_type(parser)?;

    let decl = TypeDecl {
        span: Span {
            start,
            end: ty.get_span().end.clone(),
        },
        name,
        ty,
    };

    parser.register_type(decl.clone());
    Ok(Decl::Type(decl))
}

/// Parses the `x, y, z` in `mut i32 x, y, z = 10, 2, 5`.
pub fn parse_ident_list(parser: &mut Parser, message: &str) -> Result<Vec<String>, Error> {
    let mut idents = vec![];

    loop {
        let error = parser.unexpected(message);
        idents.push(parser.expect_error(TokenKind::Identifier, Some(error))?.value);

        if parser.current_token_kind() != TokenKind::Comma {
            return Ok(idents);
        }
        parser.advance();
    }
}

/// Attaches the declared type to a literal used directly as a value.
fn with_literal_type(value: Expr, ty: &TypeExpr) -> Expr {
    match value {
        Expr::Number(mut number) if number.ty.is_none() => {
            number.ty = Some(ty.clone());
            Expr::Number(number)
        }
        other => other,
    }
}

fn void_type(span: Span) -> TypeExpr {
    TypeExpr::Primitive(PrimitiveTypeExpr {
        kind: PrimitiveKind::Void,
        span,
    })
}
