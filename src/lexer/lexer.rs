use std::rc::Rc;

use regex::Regex;

use crate::{
    errors::errors::{Error, ErrorImpl},
    Position, Span, MK_DEFAULT_HANDLER, MK_TOKEN,
};

use super::tokens::{Token, TokenKind, RESERVED_LOOKUP};

pub type RegexHandler = fn(&mut Lexer, &str) -> Result<(), Error>;

#[derive(Clone)]
pub struct RegexPattern {
    regex: Regex,
    handler: RegexHandler,
}

#[derive(Clone)]
pub struct Lexer {
    patterns: Vec<RegexPattern>,
    tokens: Vec<Token>,
    source: String,
    pos: usize,
    row: u32,
    line_start: usize,
    file: Rc<String>,
}

impl Lexer {
    pub fn new(source: String, file: Option<String>) -> Lexer {
        let file_name = if let Some(file) = file {
            Rc::new(file)
        } else {
            Rc::new(String::from("shell"))
        };

        // Every pattern is anchored; the first one matching at the cursor wins.
        Lexer {
            pos: 0,
            row: 1,
            line_start: 0,
            tokens: vec![],
            patterns: vec![
                RegexPattern { regex: Regex::new("^\\s+").unwrap(), handler: skip_handler },
                RegexPattern { regex: Regex::new("^/\\*(?s:.*?)\\*/").unwrap(), handler: skip_handler },
                RegexPattern { regex: Regex::new("^/\\*").unwrap(), handler: unterminated_handler },
                RegexPattern { regex: Regex::new("^//[^\\n]*").unwrap(), handler: skip_handler },
                RegexPattern { regex: Regex::new("^[a-zA-Z_][a-zA-Z0-9_]*").unwrap(), handler: symbol_handler },
                RegexPattern { regex: Regex::new("^-?[0-9]+(\\.[0-9]+)?").unwrap(), handler: number_handler },
                RegexPattern { regex: Regex::new("^\"(?:[^\"\\\\]|\\\\.)*\"").unwrap(), handler: string_handler },
                RegexPattern { regex: Regex::new("^\"").unwrap(), handler: unterminated_handler },
                RegexPattern { regex: Regex::new("^\\{").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::OpenCurly, "{") },
                RegexPattern { regex: Regex::new("^\\}").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::CloseCurly, "}") },
                RegexPattern { regex: Regex::new("^\\(").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::OpenParen, "(") },
                RegexPattern { regex: Regex::new("^\\)").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::CloseParen, ")") },
                RegexPattern { regex: Regex::new("^==").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::Equals, "==") },
                RegexPattern { regex: Regex::new("^!=").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::NotEquals, "!=") },
                RegexPattern { regex: Regex::new("^=").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::Assignment, "=") },
                RegexPattern { regex: Regex::new("^<=").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::LessEquals, "<=") },
                RegexPattern { regex: Regex::new("^<").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::Less, "<") },
                RegexPattern { regex: Regex::new("^>=").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::GreaterEquals, ">=") },
                RegexPattern { regex: Regex::new("^>").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::Greater, ">") },
                RegexPattern { regex: Regex::new("^\\|\\|").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::Or, "||") },
                RegexPattern { regex: Regex::new("^&&").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::And, "&&") },
                RegexPattern { regex: Regex::new("^&").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::Ampersand, "&") },
                RegexPattern { regex: Regex::new("^\\.").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::Dot, ".") },
                RegexPattern { regex: Regex::new("^;").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::Semicolon, ";") },
                RegexPattern { regex: Regex::new("^,").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::Comma, ",") },
                RegexPattern { regex: Regex::new("^->").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::Arrow, "->") },
                RegexPattern { regex: Regex::new("^\\+").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::Plus, "+") },
                RegexPattern { regex: Regex::new("^-").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::Dash, "-") },
                RegexPattern { regex: Regex::new("^/").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::Slash, "/") },
                RegexPattern { regex: Regex::new("^\\*").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::Star, "*") },
            ],
            source,
            file: file_name,
        }
    }

    /// Moves the cursor `n` bytes forward, keeping row and line start in step.
    pub fn advance_n(&mut self, n: usize) {
        let end = self.pos + n;

        for (offset, ch) in self.source[self.pos..end].char_indices() {
            if ch == '\n' {
                self.row += 1;
                self.line_start = self.pos + offset + 1;
            }
        }

        self.pos = end;
    }

    pub fn push(&mut self, token: Token) {
        self.tokens.push(token);
    }

    pub fn position(&self) -> Position {
        Position::new(
            self.row,
            (self.source[self.line_start..self.pos].chars().count() + 1) as u32,
            Rc::clone(&self.file),
        )
    }

    pub fn last_kind(&self) -> Option<TokenKind> {
        self.tokens.last().map(|token| token.kind)
    }

    pub fn remainder(&self) -> &str {
        &self.source[self.pos..]
    }

    pub fn at_eof(&self) -> bool {
        self.pos >= self.source.len()
    }
}

fn skip_handler(lexer: &mut Lexer, matched: &str) -> Result<(), Error> {
    lexer.advance_n(matched.len());
    Ok(())
}

fn unterminated_handler(lexer: &mut Lexer, matched: &str) -> Result<(), Error> {
    let message = if matched == "\"" {
        "unterminated string literal"
    } else {
        "unterminated block comment"
    };

    Err(Error::new(
        ErrorImpl::UnexpectedTokenDetailed {
            token: String::from(matched),
            message: String::from(message),
        },
        lexer.position(),
    ))
}

fn number_handler(lexer: &mut Lexer, matched: &str) -> Result<(), Error> {
    let start = lexer.position();

    // `a -1` is a subtraction, `(-1` or `/ -1` a negative literal.
    if matched.starts_with('-') && lexer.last_kind().is_some_and(|kind| kind.ends_operand()) {
        lexer.advance_n(1);
        let span = Span { start, end: lexer.position() };
        lexer.push(MK_TOKEN!(TokenKind::Dash, String::from("-"), span));
        return Ok(());
    }

    lexer.advance_n(matched.len());
    let span = Span { start, end: lexer.position() };
    lexer.push(MK_TOKEN!(TokenKind::Number, String::from(matched), span));
    Ok(())
}

fn string_handler(lexer: &mut Lexer, matched: &str) -> Result<(), Error> {
    let start = lexer.position();
    let string_literal = &matched[1..matched.len() - 1];

    let mut result = String::new();
    let mut chars = string_literal.chars().peekable();

    while let Some(ch) = chars.next() {
        if ch != '\\' {
            result.push(ch);
            continue;
        }

        match chars.next() {
            Some('n') => result.push('\n'),
            Some('t') => result.push('\t'),
            Some('r') => result.push('\r'),
            Some('\\') => result.push('\\'),
            Some('"') => result.push('"'),
            Some('0') => result.push('\0'),
            Some('x') => {
                let mut hex = String::new();

                while hex.len() < 2 {
                    match chars.peek() {
                        Some(digit) if digit.is_ascii_hexdigit() => {
                            hex.push(*digit);
                            chars.next();
                        }
                        _ => break,
                    }
                }

                let byte = u8::from_str_radix(&hex, 16).map_err(|_| {
                    Error::new(
                        ErrorImpl::UnexpectedTokenDetailed {
                            token: format!("\\x{}", hex),
                            message: String::from("expected two hex digits"),
                        },
                        start.clone(),
                    )
                })?;

                // A lone byte above 0x7f is not valid UTF-8
                if !byte.is_ascii() {
                    return Err(Error::new(
                        ErrorImpl::UnexpectedTokenDetailed {
                            token: format!("\\x{}", hex),
                            message: String::from("hex escapes above \\x7f are not supported"),
                        },
                        start.clone(),
                    ));
                }
                result.push(char::from(byte));
            }
            Some(other) => {
                // Unknown escapes are kept verbatim
                result.push('\\');
                result.push(other);
            }
            None => result.push('\\'),
        }
    }

    lexer.advance_n(matched.len());
    let span = Span { start, end: lexer.position() };
    lexer.push(MK_TOKEN!(TokenKind::String, result, span));
    Ok(())
}

fn symbol_handler(lexer: &mut Lexer, matched: &str) -> Result<(), Error> {
    let start = lexer.position();
    lexer.advance_n(matched.len());
    let span = Span { start, end: lexer.position() };

    if let Some(kind) = RESERVED_LOOKUP.get(matched) {
        lexer.push(MK_TOKEN!(*kind, String::from(matched), span));
    } else {
        lexer.push(MK_TOKEN!(TokenKind::Identifier, String::from(matched), span));
    }

    Ok(())
}

pub fn tokenize(source: String, file: Option<String>) -> Result<Vec<Token>, Error> {
    let mut lex = Lexer::new(source, file);

    while !lex.at_eof() {
        let found = lex.patterns.iter().find_map(|pattern| {
            pattern
                .regex
                .find(lex.remainder())
                .map(|matched| (pattern.handler, matched.as_str().to_string()))
        });

        match found {
            Some((handler, matched)) => handler(&mut lex, &matched)?,
            None => {
                let token = lex.remainder().chars().next().unwrap_or_default();
                return Err(Error::new(
                    ErrorImpl::UnrecognisedToken {
                        token: token.to_string(),
                    },
                    lex.position(),
                ));
            }
        }
    }

    let end = lex.position();
    lex.push(MK_TOKEN!(
        TokenKind::EOF,
        String::from("EOF"),
        Span { start: end.clone(), end }
    ));
    Ok(lex.tokens)
}
