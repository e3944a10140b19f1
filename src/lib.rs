//! ComponentMarkup lexer and highlighting tokenizer.
//!
//! ComponentMarkup is an HTML-like template language with `{{ expr }}`
//! interpolation, directive attributes (`*if`, `[value]`, `let-item`) whose
//! values are expressions, and `{ markup }` subtrees as attribute values.
//! This crate turns source text into a lossless, fully classified token
//! stream for syntax highlighting, and reports the first lexical error.
//!
//! # Quick start
//!
//! ## Tokenize markup
//!
//! ```
//! use component_markup::{TokenKind, tokenize};
//!
//! let tokens = tokenize("<p *if=\"count > 0\">{{ count }} items</p>").unwrap();
//! assert_eq!(tokens[1].kind, TokenKind::TagName);
//! assert!(tokens.iter().any(|t| t.kind == TokenKind::Operator && t.text == ">"));
//! ```
//!
//! ## Keep the valid prefix of broken input
//!
//! ```
//! use component_markup::{LexErrorKind, TokenizeOptions, tokenize_with};
//!
//! let result = tokenize_with("<b>bold</b", &TokenizeOptions::default());
//! assert_eq!(result.error.map(|e| e.kind), Some(LexErrorKind::UnterminatedTag));
//! assert_eq!(result.tokens.len(), 4);
//! ```
//!
//! ## Map tokens to styles
//!
//! ```
//! use component_markup::{StyleKey, TokenizeOptions, highlight};
//!
//! let highlighted = highlight("<!-- hi -->", &TokenizeOptions::default());
//! assert_eq!(highlighted.ranges[0].style, Some(StyleKey::Comment));
//! ```

// Allow noisy pedantic lints that don't add value for
// a library crate.
#![allow(
    clippy::missing_errors_doc,
    clippy::missing_panics_doc,
    clippy::module_name_repetitions
)]

pub mod cursor;
pub mod expression;
pub mod lexer;
pub mod quotes;
pub mod sink;
pub mod span;
pub mod style;
pub mod token;

pub use expression::tokenize_expression;
pub use lexer::{
    Grammar, LexError, LexErrorKind, TokenizeOptions, Tokenized, tokenize, tokenize_with,
};
pub use quotes::{MAX_QUOTE_DEPTH, QuoteDepthExceeded};
pub use sink::TokenSink;
pub use span::SpanError;
pub use style::{Highlight, HighlightRange, StyleKey, highlight, style_for};
pub use token::{Span, Token, TokenKind};
