use crate::{
    ast::{
        ast::Expr,
        expressions::{
            BinaryExpr, BooleanExpr, CallExpr, NumberExpr, StringExpr, SymbolExpr, UnaryExpr,
        },
    },
    errors::errors::{Error, ErrorImpl},
    lexer::tokens::TokenKind,
    Span,
};

use super::parser::Parser;

/// Lowest precedence accepted at the top of an expression.
const MIN_PRECEDENCE: i32 = 1;

pub fn parse_expr(parser: &mut Parser) -> Result<Expr, Error> {
    parse_binary_expr(parser, MIN_PRECEDENCE)
}

/// Precedence climbing.
///
/// The right operand is parsed one level tighter than the operator, so
/// operators of equal precedence associate to the left. Every folded node
/// gets another chance at postfix calls, which is what makes `(a + b)(c)`
/// and `f()(x)` parse as calls.
pub fn parse_binary_expr(parser: &mut Parser, min_precedence: i32) -> Result<Expr, Error> {
    let mut left = parse_unary_expr(parser)?;

    loop {
        let precedence = parser.token_precedence(parser.current_token_kind());
        if precedence < min_precedence {
            return Ok(left);
        }

        let operator = parser.advance().clone();
        let right = parse_binary_expr(parser, precedence + 1)?;

        left = Expr::Binary(BinaryExpr {
            span: Span {
                start: left.get_span().start.clone(),
                end: right.get_span().end.clone(),
            },
            left: Box::new(left),
            operator,
            right: Box::new(right),
        });
        left = parse_postfix_expr(parser, left)?;
    }
}

/// A primary or prefix expression followed by any call suffixes.
pub fn parse_unary_expr(parser: &mut Parser) -> Result<Expr, Error> {
    let token_kind = parser.current_token_kind();
    let Some(handler) = parser.get_nud_lookup().get(&token_kind).copied() else {
        return Err(Error::new(
            ErrorImpl::UnexpectedToken {
                token: parser.current_token().value.clone(),
            },
            parser.get_position(),
        ));
    };

    let expr = handler(parser)?;
    parse_postfix_expr(parser, expr)
}

pub fn parse_postfix_expr(parser: &mut Parser, mut expr: Expr) -> Result<Expr, Error> {
    while parser.current_token_kind() == TokenKind::OpenParen {
        expr = parse_call_expr(parser, expr)?;
    }

    Ok(expr)
}

pub fn parse_primary_expr(parser: &mut Parser) -> Result<Expr, Error> {
    let token = parser.advance().clone();

    match token.kind {
        TokenKind::Number => Ok(Expr::Number(NumberExpr {
            value: token.value,
            ty: None,
            span: token.span,
        })),
        TokenKind::Identifier => Ok(Expr::Symbol(SymbolExpr {
            value: token.value,
            span: token.span,
        })),
        TokenKind::String => Ok(Expr::String(StringExpr {
            value: token.value,
            span: token.span,
        })),
        TokenKind::True | TokenKind::False => Ok(Expr::Boolean(BooleanExpr {
            value: token.kind == TokenKind::True,
            span: token.span,
        })),
        _ => Err(Error::new(
            ErrorImpl::UnexpectedToken { token: token.value },
            token.span.start,
        )),
    }
}

/// `-x`, `&x`, `*x`; the operand binds tighter than any binary operator.
pub fn parse_prefix_expr(parser: &mut Parser) -> Result<Expr, Error> {
    let operator = parser.advance().clone();
    let operand = parse_unary_expr(parser)?;

    Ok(Expr::Unary(UnaryExpr {
        span: Span {
            start: operator.span.start.clone(),
            end: operand.get_span().end.clone(),
        },
        operator,
        operand: Box::new(operand),
    }))
}

pub fn parse_grouping_expr(parser: &mut Parser) -> Result<Expr, Error> {
    parser.advance();
    let expr = parse_expr(parser)?;

    let error = parser.unexpected("expected `)` to close the group");
    parser.expect_error(TokenKind::CloseParen, Some(error))?;

    Ok(expr)
}

/// Parses `(args...)` after `callee`.
pub fn parse_call_expr(parser: &mut Parser, callee: Expr) -> Result<Expr, Error> {
    parser.expect(TokenKind::OpenParen)?;

    let mut arguments = vec![];

    if parser.current_token_kind() != TokenKind::CloseParen {
        loop {
            arguments.push(parse_expr(parser)?);

            match parser.current_token_kind() {
                TokenKind::CloseParen => break,
                TokenKind::Comma => {
                    parser.advance();
                }
                _ => return Err(parser.unexpected("expected `,` or `)` in argument list")),
            }
        }
    }

    let close = parser.expect(TokenKind::CloseParen)?;

    Ok(Expr::Call(CallExpr {
        span: Span {
            start: callee.get_span().start.clone(),
            end: close.span.end,
        },
        callee: Box::new(callee),
        arguments,
    }))
}
