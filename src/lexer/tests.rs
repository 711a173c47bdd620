//! Unit tests for the lexer module.
//!
//! Covers keywords, literals, operators, comments, position tracking and
//! the negative-literal rule.

use super::{
    lexer::tokenize,
    tokens::{Token, TokenKind},
};
use crate::errors::errors::ErrorImpl;

fn lex(source: &str) -> Vec<Token> {
    tokenize(source.to_string(), Some("test.pi".to_string())).unwrap()
}

fn kinds(source: &str) -> Vec<TokenKind> {
    lex(source).iter().map(|token| token.kind).collect()
}

#[test]
fn test_tokenize_arithmetic_without_spaces() {
    assert_eq!(
        kinds("x+y*5.0/-1 - 9"),
        vec![
            TokenKind::Identifier,
            TokenKind::Plus,
            TokenKind::Identifier,
            TokenKind::Star,
            TokenKind::Number,
            TokenKind::Slash,
            TokenKind::Number,
            TokenKind::Dash,
            TokenKind::Number,
            TokenKind::EOF,
        ]
    );

    let tokens = lex("x+y*5.0/-1 - 9");
    assert_eq!(tokens[6].value, "-1");
    assert_eq!(tokens[8].value, "9");
}

#[test]
fn test_minus_after_operand_is_binary() {
    let tokens = lex("a -1");
    assert_eq!(tokens[1].kind, TokenKind::Dash);
    assert_eq!(tokens[2].kind, TokenKind::Number);
    assert_eq!(tokens[2].value, "1");

    let tokens = lex("(-2)");
    assert_eq!(tokens[1].kind, TokenKind::Number);
    assert_eq!(tokens[1].value, "-2");
}

#[test]
fn test_tokenize_function_without_spaces() {
    assert_eq!(
        kinds("fn main()->{\n\treturn\n}\n"),
        vec![
            TokenKind::Fn,
            TokenKind::Identifier,
            TokenKind::OpenParen,
            TokenKind::CloseParen,
            TokenKind::Arrow,
            TokenKind::OpenCurly,
            TokenKind::Return,
            TokenKind::CloseCurly,
            TokenKind::EOF,
        ]
    );
}

#[test]
fn test_tokenize_keywords() {
    assert_eq!(
        kinds("fn return pub mut const type struct interface true false"),
        vec![
            TokenKind::Fn,
            TokenKind::Return,
            TokenKind::Pub,
            TokenKind::Mut,
            TokenKind::Const,
            TokenKind::Type,
            TokenKind::Struct,
            TokenKind::Interface,
            TokenKind::True,
            TokenKind::False,
            TokenKind::EOF,
        ]
    );
}

#[test]
fn test_tokenize_primitive_types() {
    let tokens = lex("i64 u64 i32 u32 i16 u16 i8 u8 f64 f32 bool void");

    assert_eq!(tokens.len(), 13);
    assert!(tokens[..12].iter().all(|token| token.kind.is_primitive_type()));
    assert_eq!(tokens[12].kind, TokenKind::EOF);
}

#[test]
fn test_tokenize_identifiers() {
    let tokens = lex("foo baz_123 _underscore i32x");

    assert_eq!(tokens[0].value, "foo");
    assert_eq!(tokens[1].value, "baz_123");
    assert_eq!(tokens[2].value, "_underscore");
    // A keyword prefix does not make a keyword
    assert_eq!(tokens[3].kind, TokenKind::Identifier);
    assert_eq!(tokens[3].value, "i32x");
}

#[test]
fn test_tokenize_numbers() {
    let tokens = lex("42 3.14 0 100.5");

    assert!(tokens[..4].iter().all(|token| token.kind == TokenKind::Number));
    assert_eq!(tokens[1].value, "3.14");
    assert_eq!(tokens[3].value, "100.5");
}

#[test]
fn test_tokenize_strings() {
    let tokens = lex(r#""hello" "multiple words""#);

    assert_eq!(tokens[0].kind, TokenKind::String);
    assert_eq!(tokens[0].value, "hello");
    assert_eq!(tokens[1].value, "multiple words");
}

#[test]
fn test_tokenize_string_escapes() {
    let tokens = lex(r#""a\nb\t\"q\" \x41\\""#);

    assert_eq!(tokens[0].kind, TokenKind::String);
    assert_eq!(tokens[0].value, "a\nb\t\"q\" A\\");
    assert_eq!(tokens[1].kind, TokenKind::EOF);
}

#[test]
fn test_tokenize_operators() {
    assert_eq!(
        kinds("= == != < <= > >= && || & . -> + - * / ; ,"),
        vec![
            TokenKind::Assignment,
            TokenKind::Equals,
            TokenKind::NotEquals,
            TokenKind::Less,
            TokenKind::LessEquals,
            TokenKind::Greater,
            TokenKind::GreaterEquals,
            TokenKind::And,
            TokenKind::Or,
            TokenKind::Ampersand,
            TokenKind::Dot,
            TokenKind::Arrow,
            TokenKind::Plus,
            TokenKind::Dash,
            TokenKind::Star,
            TokenKind::Slash,
            TokenKind::Semicolon,
            TokenKind::Comma,
            TokenKind::EOF,
        ]
    );
}

#[test]
fn test_tokenize_comments() {
    let source = "a // line comment\n/* block\n comment */ b";
    let tokens = lex(source);

    assert_eq!(tokens.len(), 3);
    assert_eq!(tokens[0].value, "a");
    assert_eq!(tokens[1].value, "b");
    assert_eq!(tokens[1].span.start.row, 3);
    assert_eq!(tokens[1].span.start.col, 13);
}

#[test]
fn test_token_positions() {
    let tokens = lex("fn main() {\n    mut i32 a = 1\n}");

    assert_eq!(tokens[0].span.start.row, 1);
    assert_eq!(tokens[0].span.start.col, 1);
    assert_eq!(tokens[0].span.end.col, 3);

    // `mut` on the second line
    assert_eq!(tokens[5].kind, TokenKind::Mut);
    assert_eq!(tokens[5].span.start.row, 2);
    assert_eq!(tokens[5].span.start.col, 5);
    assert_eq!(tokens[5].span.start.file.as_str(), "test.pi");
}

#[test]
fn test_empty_source_yields_eof() {
    assert_eq!(kinds(""), vec![TokenKind::EOF]);
    assert_eq!(kinds("   \n\t"), vec![TokenKind::EOF]);
}

#[test]
fn test_unrecognised_token() {
    let error = tokenize("a @ b".to_string(), None).unwrap_err();

    assert_eq!(error.get_error_name(), "UnrecognisedToken");
    assert_eq!(error.get_position().col, 3);
}

#[test]
fn test_unterminated_block_comment() {
    let error = tokenize("a /* never closed".to_string(), None).unwrap_err();
    assert_eq!(error.get_error_name(), "UnexpectedTokenDetailed");
}

#[test]
fn test_hex_escape_above_ascii_is_rejected() {
    assert_eq!(lex(r#""\x41\x7f""#)[0].value, "A\u{7f}");

    let error = tokenize(r#"x = "\xff""#.to_string(), None).unwrap_err();
    assert_eq!(
        error.get_internal_error(),
        &ErrorImpl::UnexpectedTokenDetailed {
            token: String::from("\\xff"),
            message: String::from("hex escapes above \\x7f are not supported"),
        }
    );
    assert_eq!(error.get_position().col, 5);
}

#[test]
fn test_columns_count_characters_not_bytes() {
    let tokens = lex("\"é\" x");

    assert_eq!(tokens[0].span.end.col, 4);
    assert_eq!(tokens[1].value, "x");
    assert_eq!(tokens[1].span.start.col, 5);
}
