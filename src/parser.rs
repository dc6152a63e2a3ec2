//! The recursive-descent parser: token stream in, one [`Value`] tree out.
//!
//! One method per grammar non-terminal:
//!
//! - *value* → object | array | primitive
//! - *object* → `{` ( string `:` value ( `,` string `:` value )* )? `}`
//! - *array* → `[` ( value ( `,` value )* )? `]`
//! - *primitive* → String | Number | True | False | Null
//!
//! The parser owns only a cursor over the caller's token slice and is
//! discarded after one [`Parser::parse`] call. It never mutates its input.

use crate::error::{Error, ParseError};
use crate::token::{Scalar, Token, TokenKind};
use crate::value::Value;
use std::collections::BTreeMap;

/// The parser. Lives for the duration of one [`Parser::parse`] call.
pub struct Parser<'t, 'a> {
    tokens: &'t [Token<'a>],
    /// The current position in the token slice.
    index: usize,
}

impl<'t, 'a> Parser<'t, 'a> {
    pub fn new(tokens: &'t [Token<'a>]) -> Self {
        Parser { tokens, index: 0 }
    }

    /// Parses exactly one top-level value out of the token sequence.
    ///
    /// Everything except the trailing end marker must be consumed: any
    /// other token left over fails with
    /// [`ParseError::TrailingData`].
    pub fn parse(mut self) -> Result<Value, Error> {
        let value = self.parse_value()?;

        let token = *self.peek()?;
        if token.kind != TokenKind::EndOfInput {
            return Err(ParseError::TrailingData {
                found: token.kind,
                line: token.line,
            }
            .into());
        }

        Ok(value)
    }

    fn parse_value(&mut self) -> Result<Value, Error> {
        let token = *self.peek()?;
        match token.kind {
            TokenKind::LeftBrace => self.parse_object(),
            TokenKind::LeftSquareBracket => self.parse_array(),
            kind if kind.is_primitive() => self.parse_primitive(),
            kind => Err(ParseError::InvalidValue {
                found: kind,
                line: token.line,
            }
            .into()),
        }
    }

    fn parse_object(&mut self) -> Result<Value, Error> {
        self.advance()?; // '{'

        let mut object = BTreeMap::new();
        let mut expecting_comma = false;

        while !self.is_at_end() && !self.check(TokenKind::RightBrace) {
            if expecting_comma {
                let token = *self.peek()?;
                if token.kind != TokenKind::Comma {
                    return Err(ParseError::MissingComma {
                        found: token.kind,
                        line: token.line,
                    }
                    .into());
                }
                self.advance()?;
            }

            let key_token = *self.peek()?;
            if key_token.kind != TokenKind::String {
                return Err(ParseError::InvalidKeyType {
                    found: key_token.kind,
                    line: key_token.line,
                }
                .into());
            }
            self.advance()?;
            let key = match key_token.to_scalar()? {
                Scalar::Str(s) => s.into_owned(),
                _ => unreachable!(), // kind checked above
            };

            let colon = *self.peek()?;
            if colon.kind != TokenKind::Colon {
                return Err(ParseError::MissingColon {
                    found: colon.kind,
                    line: colon.line,
                }
                .into());
            }
            self.advance()?;

            let value = self.parse_value()?;
            // Duplicate keys are permitted syntactically: last write wins.
            object.insert(key, value);
            expecting_comma = true;
        }

        self.consume_closer()?;
        Ok(Value::Object(object))
    }

    fn parse_array(&mut self) -> Result<Value, Error> {
        self.advance()?; // '['

        let mut elements = Vec::new();
        let mut expecting_comma = false;

        while !self.is_at_end() && !self.check(TokenKind::RightSquareBracket) {
            if expecting_comma {
                let token = *self.peek()?;
                if token.kind != TokenKind::Comma {
                    return Err(ParseError::MissingComma {
                        found: token.kind,
                        line: token.line,
                    }
                    .into());
                }
                self.advance()?;
            }

            elements.push(self.parse_value()?);
            expecting_comma = true;
        }

        self.consume_closer()?;
        Ok(Value::Array(elements))
    }

    fn parse_primitive(&mut self) -> Result<Value, Error> {
        let token = *self.peek()?;
        if !token.kind.is_primitive() {
            return Err(ParseError::InvalidValue {
                found: token.kind,
                line: token.line,
            }
            .into());
        }
        self.advance()?;

        Ok(match token.to_scalar()? {
            Scalar::Str(s) => Value::String(s.into_owned()),
            Scalar::Num(n) => Value::Number(n),
            Scalar::Bool(b) => Value::Boolean(b),
            Scalar::Null => Value::Null,
        })
    }

    /// Whether the cursor sits on the end marker (or past the slice).
    fn is_at_end(&self) -> bool {
        match self.tokens.get(self.index) {
            Some(token) => token.kind == TokenKind::EndOfInput,
            None => true,
        }
    }

    fn check(&self, kind: TokenKind) -> bool {
        self.tokens.get(self.index).map(|t| t.kind) == Some(kind)
    }

    fn peek(&self) -> Result<&Token<'a>, ParseError> {
        self.tokens.get(self.index).ok_or(ParseError::UnexpectedEnd)
    }

    fn advance(&mut self) -> Result<&Token<'a>, ParseError> {
        let token = self
            .tokens
            .get(self.index)
            .ok_or(ParseError::UnexpectedEnd)?;
        self.index += 1;
        Ok(token)
    }

    /// Unconditionally consumes a closing delimiter after a container
    /// scan. The scan loop only stops on the closer or the end marker,
    /// so hitting the end here means the closer was never found.
    fn consume_closer(&mut self) -> Result<(), ParseError> {
        if self.is_at_end() {
            return Err(ParseError::UnexpectedEnd);
        }
        self.index += 1;
        Ok(())
    }
}
