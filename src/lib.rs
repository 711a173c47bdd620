#![allow(clippy::module_inception)]

use std::{fmt::Write, rc::Rc};

use crate::errors::errors::{Error, ErrorTip};

pub mod ast;
pub mod compiler;
pub mod errors;
pub mod lexer;
pub mod macros;
pub mod parser;

extern crate regex;

/// A 1-based row/column location inside a named source file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Position {
    pub row: u32,
    pub col: u32,
    pub file: Rc<String>,
}

impl Position {
    pub fn new(row: u32, col: u32, file: Rc<String>) -> Self {
        Position { row, col, file }
    }

    pub fn null() -> Self {
        Position::new(0, 0, Rc::new(String::from("<null>")))
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Span {
    pub start: Position,
    pub end: Position,
}

impl Span {
    pub fn null() -> Self {
        Span {
            start: Position::null(),
            end: Position::null(),
        }
    }
}

/// Returns the text of the given 1-based row, without its line terminator.
pub fn get_line_at_row(source: &str, row: u32) -> Option<&str> {
    if row == 0 {
        return None;
    }

    source
        .split('\n')
        .nth(row as usize - 1)
        .map(|line| line.trim_end_matches('\r'))
}

/// Renders an error the way the driver prints it:
///
/// ```text
/// Error: UnexpectedToken (Unexpected token: `}`)
/// -> main.pi
///   |
/// 3 | mut i32 a = }
///   | ------------^
/// ```
pub fn format_error(error: &Error, source: &str) -> String {
    let position = error.get_position();
    let mut out = String::new();

    if let ErrorTip::None = error.get_tip() {
        let _ = writeln!(out, "Error: {}", error.get_error_name());
    } else {
        let _ = writeln!(out, "Error: {} ({})", error.get_error_name(), error.get_tip());
    }
    let _ = writeln!(out, "-> {}", position.file);

    let Some(line_text) = get_line_at_row(source, position.row) else {
        return out;
    };

    let line_string = position.row.to_string();
    let padding = line_string.len() + 2;

    let (line_text_removed, removed_whitespace) = remove_starting_whitespace(line_text);
    let _ = writeln!(out, "{:>padding$}", "|");
    let _ = writeln!(out, "{} | {}", line_string, line_text_removed.trim_end());

    let arrows = (position.col as usize).saturating_sub(removed_whitespace).max(1);
    let _ = writeln!(out, "{:>padding$} {:->arrows$}", "|", "^");

    out
}

fn remove_starting_whitespace(string: &str) -> (&str, usize) {
    let start = string
        .chars()
        .take_while(|c| *c == ' ' || *c == '\t')
        .count();

    (&string[start..], start)
}
