//! The Token Model shared by the two pipeline stages.
//!
//! A [`Token`] carries its [`TokenKind`], the exact source slice backing it
//! (the lexeme), and the 1-based line it starts on. Tokens are created once
//! by the [`Lexer`](crate::Lexer) and never mutated; the parser consumes
//! them by read-only reference.

use crate::error::LexError;
use std::borrow::Cow;
use std::fmt;

/// The lexeme assigned to the end-of-input token, which has no source
/// slice to capture.
pub const EOF_LEXEME: &str = "EOF";

/// The specific kind of a [`Token`]: the smallest meaningful units of
/// the JSON grammar. Closed vocabulary, no other kinds are ever produced.
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum TokenKind {
    // Single character tokens
    Comma,
    Colon,
    LeftBrace,
    RightBrace,
    LeftSquareBracket,
    RightSquareBracket,

    // Simple values
    String,
    Number,
    True,
    False,
    Null,

    // Misc
    EndOfInput,
}

impl TokenKind {
    /// Whether this kind is one of the five primitive value kinds.
    pub fn is_primitive(self) -> bool {
        matches!(
            self,
            TokenKind::String
                | TokenKind::Number
                | TokenKind::True
                | TokenKind::False
                | TokenKind::Null
        )
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            TokenKind::Comma => "','",
            TokenKind::Colon => "':'",
            TokenKind::LeftBrace => "'{'",
            TokenKind::RightBrace => "'}'",
            TokenKind::LeftSquareBracket => "'['",
            TokenKind::RightSquareBracket => "']'",
            TokenKind::String => "a string",
            TokenKind::Number => "a number",
            TokenKind::True => "'true'",
            TokenKind::False => "'false'",
            TokenKind::Null => "'null'",
            TokenKind::EndOfInput => "end of input",
        };
        f.write_str(name)
    }
}

/// A classified slice of source text.
///
/// For `String` tokens the lexeme keeps both delimiting quotes and every
/// escape sequence verbatim; decoding happens in [`Token::to_scalar`],
/// not during lexing.
#[derive(Debug, PartialEq, Clone, Copy)]
pub struct Token<'a> {
    pub kind: TokenKind,
    pub lexeme: &'a str,
    /// The 1-based line the token starts on.
    pub line: usize,
}

/// The decoded scalar behind a primitive token.
#[derive(Debug, PartialEq, Clone)]
pub enum Scalar<'a> {
    Str(Cow<'a, str>),
    Num(f64),
    Bool(bool),
    Null,
}

impl<'a> Token<'a> {
    /// Maps a completed primitive token to its decoded scalar.
    ///
    /// String tokens strip the two surrounding quotes and decode escape
    /// sequences (borrowing from the lexeme when there are none). Number
    /// tokens parse as `f64`. `true`/`false`/`null` map to fixed constants.
    ///
    /// # Panics
    ///
    /// Panics when called on a structural token (brace, bracket, comma,
    /// colon, end of input). That is an internal contract violation, not
    /// malformed input.
    pub fn to_scalar(&self) -> Result<Scalar<'a>, LexError> {
        match self.kind {
            TokenKind::String => {
                let body = &self.lexeme[1..self.lexeme.len() - 1];
                Ok(Scalar::Str(decode_escapes(body, self.line)?))
            }
            TokenKind::Number => match self.lexeme.parse::<f64>() {
                Ok(n) => Ok(Scalar::Num(n)),
                Err(_) => Err(LexError::InvalidNumber {
                    lexeme: self.lexeme.to_string(),
                    line: self.line,
                }),
            },
            TokenKind::True => Ok(Scalar::Bool(true)),
            TokenKind::False => Ok(Scalar::Bool(false)),
            TokenKind::Null => Ok(Scalar::Null),
            kind => panic!("cannot extract a value from {} token", kind),
        }
    }
}

/// Decodes the escape sequences in a string body.
///
/// Borrows the body unchanged when it contains no backslash, which is the
/// common case.
fn decode_escapes(body: &str, line: usize) -> Result<Cow<'_, str>, LexError> {
    if !body.contains('\\') {
        return Ok(Cow::Borrowed(body));
    }

    let mut decoded = String::with_capacity(body.len());
    let mut chars = body.chars();
    while let Some(c) = chars.next() {
        if c != '\\' {
            decoded.push(c);
            continue;
        }
        // The lexer guarantees a backslash is never the last character of
        // a terminated string body.
        match chars.next() {
            Some(e @ ('"' | '\\' | '/')) => decoded.push(e),
            Some('b') => decoded.push('\u{0008}'),
            Some('f') => decoded.push('\u{000C}'),
            Some('n') => decoded.push('\n'),
            Some('r') => decoded.push('\r'),
            Some('t') => decoded.push('\t'),
            Some('u') => {
                let mut code = 0u32;
                for _ in 0..4 {
                    let hex = chars
                        .next()
                        .and_then(|h| h.to_digit(16))
                        .ok_or(LexError::InvalidEscape { found: 'u', line })?;
                    code = code * 16 + hex;
                }
                let c = char::from_u32(code)
                    .ok_or(LexError::InvalidEscape { found: 'u', line })?;
                decoded.push(c);
            }
            Some(other) => return Err(LexError::InvalidEscape { found: other, line }),
            None => return Err(LexError::InvalidEscape { found: '\\', line }),
        }
    }
    Ok(Cow::Owned(decoded))
}
