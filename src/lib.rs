//! # jetjson
//!
//! A self-contained, two-stage JSON text-to-value pipeline built to be
//! benchmarked against `serde_json`.
//!
//! The pipeline is two pure, synchronous, single-pass transformations:
//!
//! ```text
//! input text --Lexer::lex()--> token sequence --Parser::parse()--> Value
//! ```
//!
//! * **[`Lexer`]** consumes the raw input once, left to right, and
//!   produces a flat token sequence terminated by exactly one
//!   end-of-input marker. String and number lexemes are kept verbatim;
//!   decoding happens at scalar extraction.
//! * **[`Parser`]** consumes that sequence by read-only reference and
//!   reconstructs one [`Value`] tree via recursive descent.
//!
//! Nothing is shared between calls: two lexers or parsers on independent
//! inputs never interact, so concurrent use from multiple threads is safe
//! as long as each instance owns its own input.
//!
//! ## Quick start
//!
//! ```
//! use jetjson::{parse_document, Value};
//!
//! let value = parse_document(r#"{ "a": 1, "b": [true, null] }"#).unwrap();
//! assert_eq!(value.get("a"), Some(&Value::Number(1.0)));
//! ```
//!
//! Timing wrappers ([`timing`]) and the synthetic sample generator
//! ([`generate`]) live outside the pipeline and never alter its
//! observable behavior.

/// Error types for both pipeline stages.
pub mod error;
/// Synthetic stress-input generation.
pub mod generate;
/// The lexer: text to token sequence.
pub mod lexer;
/// The recursive-descent parser: token sequence to value tree.
pub mod parser;
/// Wall-clock instrumentation for entry points.
pub mod timing;
/// The token model shared by both stages.
pub mod token;
/// The parsed value tree.
pub mod value;

pub use error::{Error, LexError, ParseError};
pub use lexer::Lexer;
pub use parser::Parser;
pub use timing::MetricRegistry;
pub use token::{Scalar, Token, TokenKind};
pub use value::Value;

/// Runs the whole pipeline over one document: lex, then parse.
pub fn parse_document(input: &str) -> Result<Value, Error> {
    let tokens = Lexer::new(input).lex()?;
    Parser::new(&tokens).parse()
}
