#![allow(dead_code)]

use component_markup::{Token, TokenKind};

/// Kind and text of every token that is not whitespace.
pub fn significant(tokens: &[Token]) -> Vec<(TokenKind, &str)> {
    tokens
        .iter()
        .filter(|t| !t.kind.is_whitespace())
        .map(|t| (t.kind, t.text.as_str()))
        .collect()
}

pub fn texts(tokens: &[Token]) -> Vec<&str> {
    tokens.iter().map(|t| t.text.as_str()).collect()
}

pub fn joined(tokens: &[Token]) -> String {
    tokens.iter().map(|t| t.text.as_str()).collect()
}

/// Assert that spans are non-empty and tile the input from offset 0.
pub fn assert_contiguous(tokens: &[Token]) {
    let mut expected_start = 0;
    for token in tokens {
        assert_eq!(
            token.span.start, expected_start,
            "gap or overlap before {token:?}"
        );
        assert!(!token.span.is_empty(), "empty token {token:?}");
        expected_start = token.span.end;
    }
}

/// The first `len` characters of `input`.
pub fn char_prefix(input: &str, len: usize) -> String {
    input.chars().take(len).collect()
}
