//! The byte-based lexer: raw input text in, flat token stream out.
//!
//! One left-to-right pass over the full input. The lexer classifies bytes
//! with a 256-entry lookup table and uses `memchr` for the string hot
//! path. It records slices, never decoded values: a `String` token keeps
//! its quotes and escape sequences verbatim, and decoding is deferred to
//! [`Token::to_scalar`](crate::token::Token::to_scalar).

use crate::error::LexError;
use crate::token::{Token, TokenKind, EOF_LEXEME};
use memchr::{memchr, memchr_iter};

// --- The Lookup Table (LUT) ---
// A 256-entry array classifying every byte with a single lookup.
const W: u8 = 1; // Whitespace
const S: u8 = 2; // Structural
const L: u8 = 3; // Literal
const D: u8 = 4; // Digit (and '-')
const Q: u8 = 5; // Quote

static BYTE_PROPERTIES: [u8; 256] = {
    let mut table = [0; 256];
    table[b' ' as usize] = W;
    table[b'\n' as usize] = W;
    table[b'\r' as usize] = W;
    table[b'\t' as usize] = W;

    table[b'{' as usize] = S;
    table[b'}' as usize] = S;
    table[b'[' as usize] = S;
    table[b']' as usize] = S;
    table[b':' as usize] = S;
    table[b',' as usize] = S;

    table[b't' as usize] = L;
    table[b'f' as usize] = L;
    table[b'n' as usize] = L;

    table[b'"' as usize] = Q;

    table[b'-' as usize] = D;
    let mut digit = b'0';
    while digit <= b'9' {
        table[digit as usize] = D;
        digit += 1;
    }

    // 0: every other byte starts no valid token
    table
};

/// The lexer. Lives for the duration of one [`Lexer::lex`] call.
pub struct Lexer<'a> {
    /// The full document being lexed.
    input: &'a str,
    /// The same document as raw bytes, for LUT dispatch.
    bytes: &'a [u8],
    /// The current scan position.
    cursor: usize,
    /// Where the token currently being scanned starts.
    lexeme_start: usize,
    /// The current line number (1-based).
    line: usize,
}

impl<'a> Lexer<'a> {
    pub fn new(input: &'a str) -> Self {
        Lexer {
            input,
            bytes: input.as_bytes(),
            cursor: 0,
            lexeme_start: 0,
            line: 1,
        }
    }

    /// Lexes the whole input into an ordered token sequence.
    ///
    /// The returned sequence is never empty and always ends with exactly
    /// one `EndOfInput` token.
    pub fn lex(mut self) -> Result<Vec<Token<'a>>, LexError> {
        let mut tokens = Vec::new();

        loop {
            self.skip_whitespace();
            if self.cursor >= self.bytes.len() {
                break;
            }

            self.lexeme_start = self.cursor;
            let line = self.line;
            let kind = self.lex_token()?;
            tokens.push(Token {
                kind,
                lexeme: &self.input[self.lexeme_start..self.cursor],
                line,
            });
        }

        // The end marker is appended iff the last produced token is not
        // already the end marker.
        if tokens.last().map(|t| t.kind) != Some(TokenKind::EndOfInput) {
            tokens.push(Token {
                kind: TokenKind::EndOfInput,
                lexeme: EOF_LEXEME,
                line: self.line,
            });
        }

        Ok(tokens)
    }

    /// Skips insignificant whitespace, counting line terminators.
    #[inline]
    fn skip_whitespace(&mut self) {
        while let Some(&byte) = self.bytes.get(self.cursor) {
            if BYTE_PROPERTIES[byte as usize] != W {
                break;
            }
            if byte == b'\n' {
                self.line += 1;
            }
            self.cursor += 1;
        }
    }

    /// The character currently under the cursor, decoded.
    fn current_char(&self) -> Option<char> {
        self.input[self.cursor..].chars().next()
    }

    /// Dispatches on the byte that starts the next token.
    fn lex_token(&mut self) -> Result<TokenKind, LexError> {
        let byte = self.bytes[self.cursor];

        match BYTE_PROPERTIES[byte as usize] {
            S => {
                self.cursor += 1;
                Ok(match byte {
                    b',' => TokenKind::Comma,
                    b':' => TokenKind::Colon,
                    b'{' => TokenKind::LeftBrace,
                    b'}' => TokenKind::RightBrace,
                    b'[' => TokenKind::LeftSquareBracket,
                    b']' => TokenKind::RightSquareBracket,
                    _ => unreachable!(), // LUT guarantees this
                })
            }
            L => match byte {
                b't' => self.lex_keyword(TokenKind::True, "rue"),
                b'f' => self.lex_keyword(TokenKind::False, "alse"),
                b'n' => self.lex_keyword(TokenKind::Null, "ull"),
                _ => unreachable!(), // LUT guarantees this
            },
            D => self.lex_number(),
            Q => self.lex_string(),
            _ => Err(LexError::UnexpectedCharacter {
                found: self.current_char().unwrap_or('\u{FFFD}'),
                line: self.line,
            }),
        }
    }

    /// Expects the rest of a `true`/`false`/`null` keyword character by
    /// character after its leading letter.
    fn lex_keyword(
        &mut self,
        kind: TokenKind,
        continuation: &'static str,
    ) -> Result<TokenKind, LexError> {
        self.cursor += 1; // the leading letter
        for expected in continuation.chars() {
            match self.bytes.get(self.cursor) {
                Some(&b) if b == expected as u8 => self.cursor += 1,
                _ => {
                    return Err(LexError::LiteralMismatch {
                        expected,
                        found: self.current_char(),
                        keyword: continuation,
                        line: self.line,
                    });
                }
            }
        }
        Ok(kind)
    }

    /// Scans a string body, leaving quotes and escapes in the lexeme.
    ///
    /// A quote terminates the string unless it is preceded by an
    /// odd-length run of backslashes. `memchr` finds quote candidates;
    /// the run count decides whether each one is escaped.
    fn lex_string(&mut self) -> Result<TokenKind, LexError> {
        let start_line = self.line;
        self.cursor += 1; // opening '"'
        let body_start = self.cursor;

        let mut search = body_start;
        let closing = loop {
            match memchr(b'"', &self.bytes[search..]) {
                Some(i) => {
                    let quote = search + i;
                    let mut backslashes = 0;
                    while quote - backslashes > body_start
                        && self.bytes[quote - backslashes - 1] == b'\\'
                    {
                        backslashes += 1;
                    }
                    if backslashes % 2 == 0 {
                        break quote;
                    }
                    // Odd run: this quote is escaped, keep searching.
                    search = quote + 1;
                }
                None => return Err(LexError::UnterminatedString { line: start_line }),
            }
        };

        // Raw newlines in the body still advance the line counter so
        // later tokens report the right line.
        self.line += memchr_iter(b'\n', &self.bytes[body_start..closing]).count();
        self.cursor = closing + 1;
        Ok(TokenKind::String)
    }

    /// Eagerly scans a number lexeme.
    ///
    /// Consumes digits, the decimal point and exponent characters; any
    /// malformed tail that survives the scan still fails hard when the
    /// token's scalar is extracted, never by silent truncation.
    fn lex_number(&mut self) -> Result<TokenKind, LexError> {
        while let Some(&byte) = self.bytes.get(self.cursor) {
            match byte {
                b'0'..=b'9' | b'-' | b'.' | b'e' | b'E' | b'+' => self.cursor += 1,
                _ => break,
            }
        }

        if self.cursor == self.bytes.len() && self.bytes[self.cursor - 1] == b'.' {
            return Err(LexError::UnterminatedNumber { line: self.line });
        }

        Ok(TokenKind::Number)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lex(input: &str) -> Result<Vec<Token<'_>>, LexError> {
        Lexer::new(input).lex()
    }

    fn kinds(input: &str) -> Vec<TokenKind> {
        lex(input).unwrap().iter().map(|t| t.kind).collect()
    }

    #[test]
    fn test_single_structural_tokens() {
        assert_eq!(kinds(","), vec![TokenKind::Comma, TokenKind::EndOfInput]);
        assert_eq!(kinds(":"), vec![TokenKind::Colon, TokenKind::EndOfInput]);
        assert_eq!(
            kinds("{}[]"),
            vec![
                TokenKind::LeftBrace,
                TokenKind::RightBrace,
                TokenKind::LeftSquareBracket,
                TokenKind::RightSquareBracket,
                TokenKind::EndOfInput,
            ]
        );
    }

    #[test]
    fn test_end_marker_always_present() {
        let tokens = lex("").unwrap();
        assert_eq!(tokens.len(), 1);
        assert_eq!(tokens[0].kind, TokenKind::EndOfInput);
        assert_eq!(tokens[0].lexeme, "EOF");

        let tokens = lex("1 2 3").unwrap();
        assert_eq!(
            tokens.iter().filter(|t| t.kind == TokenKind::EndOfInput).count(),
            1
        );
        assert_eq!(tokens.last().unwrap().kind, TokenKind::EndOfInput);
    }

    #[test]
    fn test_valid_string_keeps_quotes() {
        let tokens = lex("\"abc\"").unwrap();
        assert_eq!(tokens[0].kind, TokenKind::String);
        assert_eq!(tokens[0].lexeme, "\"abc\"");
    }

    #[test]
    fn test_string_with_escaped_quote_is_verbatim() {
        let tokens = lex(r#""ab\"c""#).unwrap();
        assert_eq!(tokens[0].kind, TokenKind::String);
        assert_eq!(tokens[0].lexeme, r#""ab\"c""#);
    }

    #[test]
    fn test_escaped_backslash_before_closing_quote() {
        // The quote after '\\' terminates the string: the backslash run
        // before it has even length.
        let tokens = lex(r#""ab\\""#).unwrap();
        assert_eq!(tokens[0].kind, TokenKind::String);
        assert_eq!(tokens[0].lexeme, r#""ab\\""#);

        // Odd run: quote is part of the body.
        let tokens = lex(r#""ab\\\"c""#).unwrap();
        assert_eq!(tokens[0].lexeme, r#""ab\\\"c""#);
    }

    #[test]
    fn test_unterminated_string() {
        assert_eq!(
            lex("\"abc").unwrap_err(),
            LexError::UnterminatedString { line: 1 }
        );
    }

    #[test]
    fn test_numbers() {
        let tokens = lex("1").unwrap();
        assert_eq!(tokens[0].kind, TokenKind::Number);
        assert_eq!(tokens[0].lexeme, "1");

        let tokens = lex("1.23").unwrap();
        assert_eq!(tokens[0].lexeme, "1.23");

        let tokens = lex("-0.5 1e10 2E-3").unwrap();
        assert_eq!(tokens[0].lexeme, "-0.5");
        assert_eq!(tokens[1].lexeme, "1e10");
        assert_eq!(tokens[2].lexeme, "2E-3");
        assert!(tokens[..3].iter().all(|t| t.kind == TokenKind::Number));
    }

    #[test]
    fn test_unterminated_decimal_number() {
        assert_eq!(
            lex("1.").unwrap_err(),
            LexError::UnterminatedNumber { line: 1 }
        );
    }

    #[test]
    fn test_keywords() {
        let tokens = lex("true false null").unwrap();
        assert_eq!(tokens[0].kind, TokenKind::True);
        assert_eq!(tokens[0].lexeme, "true");
        assert_eq!(tokens[1].kind, TokenKind::False);
        assert_eq!(tokens[1].lexeme, "false");
        assert_eq!(tokens[2].kind, TokenKind::Null);
        assert_eq!(tokens[2].lexeme, "null");
    }

    #[test]
    fn test_keyword_mismatch() {
        assert_eq!(
            lex("tr").unwrap_err(),
            LexError::LiteralMismatch {
                expected: 'u',
                found: None,
                keyword: "rue",
                line: 1,
            }
        );

        assert_eq!(
            lex("nil").unwrap_err(),
            LexError::LiteralMismatch {
                expected: 'u',
                found: Some('i'),
                keyword: "ull",
                line: 1,
            }
        );
    }

    #[test]
    fn test_unexpected_character() {
        assert_eq!(
            lex("owo").unwrap_err(),
            LexError::UnexpectedCharacter {
                found: 'o',
                line: 1
            }
        );
        assert_eq!(
            lex("[1, 2, &]").unwrap_err(),
            LexError::UnexpectedCharacter {
                found: '&',
                line: 1
            }
        );
    }

    #[test]
    fn test_line_counting() {
        let tokens = lex("{\n  \"a\": 1,\n  \"b\": 2\n}").unwrap();
        let lines: Vec<usize> = tokens.iter().map(|t| t.line).collect();
        //                {  "a" :  1  ,  "b" :  2  }  EOF
        assert_eq!(lines, [1, 2, 2, 2, 2, 3, 3, 3, 4, 4]);
    }

    #[test]
    fn test_line_counting_across_string_bodies() {
        let tokens = lex("\"a\nb\" 1").unwrap();
        assert_eq!(tokens[0].kind, TokenKind::String);
        assert_eq!(tokens[0].line, 1);
        assert_eq!(tokens[1].kind, TokenKind::Number);
        assert_eq!(tokens[1].line, 2);
    }

    #[test]
    fn test_complex_structure() {
        let input = "{\n  \"a\": 1.23,\n  \"b\": {\n    \"c\": [2, 3]\n  }\n}";
        let tokens = lex(input).unwrap();

        assert_eq!(tokens.len(), 18);
        assert_eq!(tokens[0].kind, TokenKind::LeftBrace);
        assert_eq!(tokens[1].kind, TokenKind::String);
        assert_eq!(tokens[1].lexeme, "\"a\"");
        assert_eq!(tokens[2].kind, TokenKind::Colon);
        assert_eq!(tokens[3].kind, TokenKind::Number);
        assert_eq!(tokens[3].lexeme, "1.23");
        assert_eq!(tokens[4].kind, TokenKind::Comma);
        assert_eq!(tokens[5].lexeme, "\"b\"");
        assert_eq!(tokens[7].kind, TokenKind::LeftBrace);
        assert_eq!(tokens[10].kind, TokenKind::LeftSquareBracket);
        assert_eq!(tokens[14].kind, TokenKind::RightSquareBracket);
        assert_eq!(tokens[17].kind, TokenKind::EndOfInput);
    }

    #[test]
    fn test_relexing_a_lexeme_reproduces_its_kind() {
        let tokens = lex(r#"{ "a\"b": [1.5, true, null] }"#).unwrap();
        for token in tokens.iter().filter(|t| t.kind != TokenKind::EndOfInput) {
            let again = lex(token.lexeme).unwrap();
            assert_eq!(again[0].kind, token.kind, "lexeme {:?}", token.lexeme);
        }
    }

    #[test]
    fn test_failure_is_idempotent_across_instances() {
        for _ in 0..3 {
            assert_eq!(
                lex("\"abc").unwrap_err(),
                LexError::UnterminatedString { line: 1 }
            );
        }
    }
}
