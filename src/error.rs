//! Error types for both pipeline stages.
//!
//! Every error is raised at the point of detection with the line number
//! (where one exists) and enough context to pinpoint the offending input.
//! Neither stage catches or downgrades its own errors, and no partial
//! result is produced on failure.

use crate::token::TokenKind;
use std::error;
use std::fmt;

/// An error raised by the [`Lexer`](crate::Lexer) or by scalar extraction
/// from a completed token.
#[derive(Debug, PartialEq, Clone)]
pub enum LexError {
    /// A character that starts no valid token.
    UnexpectedCharacter { found: char, line: usize },
    /// End of input reached while scanning a string body.
    UnterminatedString { line: usize },
    /// End of input reached immediately after a trailing decimal point.
    UnterminatedNumber { line: usize },
    /// A `true`/`false`/`null` continuation did not match.
    LiteralMismatch {
        expected: char,
        found: Option<char>,
        keyword: &'static str,
        line: usize,
    },
    /// A backslash escape inside a string body is not one the grammar allows.
    InvalidEscape { found: char, line: usize },
    /// A number lexeme survived the scan loop but does not parse as `f64`.
    InvalidNumber { lexeme: String, line: usize },
}

impl fmt::Display for LexError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LexError::UnexpectedCharacter { found, line } => {
                write!(f, "Unexpected character '{}' at line {}", found, line)
            }
            LexError::UnterminatedString { line } => {
                write!(f, "Unterminated string at line {}", line)
            }
            LexError::UnterminatedNumber { line } => {
                write!(f, "Unterminated decimal number at line {}", line)
            }
            LexError::LiteralMismatch {
                expected,
                found,
                keyword,
                line,
            } => {
                write!(
                    f,
                    "Expected to find '{}' but found {} while lexing for '{}' at line {}",
                    expected,
                    match found {
                        Some(c) => format!("'{}'", c),
                        None => "none".to_string(),
                    },
                    keyword,
                    line
                )
            }
            LexError::InvalidEscape { found, line } => {
                write!(f, "Invalid escape sequence '\\{}' at line {}", found, line)
            }
            LexError::InvalidNumber { lexeme, line } => {
                write!(f, "Invalid number '{}' at line {}", lexeme, line)
            }
        }
    }
}

impl error::Error for LexError {}

/// An error raised by the [`Parser`](crate::Parser).
#[derive(Debug, PartialEq, Clone)]
pub enum ParseError {
    /// A separator was expected between object pairs or array elements.
    MissingComma { found: TokenKind, line: usize },
    /// An object key token was not a String primitive.
    InvalidKeyType { found: TokenKind, line: usize },
    /// A colon was expected after an object key.
    MissingColon { found: TokenKind, line: usize },
    /// A value-position token was neither a primitive nor a structural opener.
    InvalidValue { found: TokenKind, line: usize },
    /// Tokens remain after one complete top-level value.
    TrailingData { found: TokenKind, line: usize },
    /// The end marker was reached while a closing delimiter was still owed.
    UnexpectedEnd,
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParseError::MissingComma { found, line } => {
                write!(f, "Expected ',' but found {} at line {}", found, line)
            }
            ParseError::InvalidKeyType { found, line } => {
                write!(
                    f,
                    "Expected a string key but found {} at line {}",
                    found, line
                )
            }
            ParseError::MissingColon { found, line } => {
                write!(
                    f,
                    "Expected ':' after object key but found {} at line {}",
                    found, line
                )
            }
            ParseError::InvalidValue { found, line } => {
                write!(f, "Expected a value but found {} at line {}", found, line)
            }
            ParseError::TrailingData { found, line } => {
                write!(
                    f,
                    "Trailing {} after the top-level value at line {}",
                    found, line
                )
            }
            ParseError::UnexpectedEnd => {
                write!(f, "Unexpected end of input, unclosed structure")
            }
        }
    }
}

impl error::Error for ParseError {}

/// Either stage's failure, for callers driving the whole pipeline.
#[derive(Debug, PartialEq, Clone)]
pub enum Error {
    Lex(LexError),
    Parse(ParseError),
}

impl From<LexError> for Error {
    fn from(e: LexError) -> Self {
        Error::Lex(e)
    }
}

impl From<ParseError> for Error {
    fn from(e: ParseError) -> Self {
        Error::Parse(e)
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Lex(e) => e.fmt(f),
            Error::Parse(e) => e.fmt(f),
        }
    }
}

impl error::Error for Error {
    fn source(&self) -> Option<&(dyn error::Error + 'static)> {
        match self {
            Error::Lex(e) => Some(e),
            Error::Parse(e) => Some(e),
        }
    }
}
