//! Property-based tests with proptest.
//!
//! Random inputs are drawn from the characters that drive the markup
//! grammar, so most of them hit error paths as well as success paths.

mod common;

use common::{assert_contiguous, char_prefix, joined};
use component_markup::{
    Grammar, LexErrorKind, TokenizeOptions, tokenize_expression, tokenize_with,
};
use proptest::prelude::*;

const ALPHABET: &[char] = &[
    'a', 'b', 'x', 'T', 'f', '1', '2', '.', '-', '*', '[', ']', '<', '>', '/', '!', '=', '"',
    '\'', '{', '}', ' ', '\t', '\n', '\\', '+', '~', '?', '|', '&',
];

fn markup_input() -> impl Strategy<Value = String> {
    prop::collection::vec(prop::sample::select(ALPHABET), 0..60)
        .prop_map(|chars| chars.into_iter().collect())
}

/// Inputs that lex successfully more often: small well-formed fragments.
fn fragment() -> impl Strategy<Value = String> {
    let fragments = prop::sample::select(vec![
        "text",
        " ",
        "\t",
        "\n",
        "<b>",
        "</b>",
        "<br/>",
        "<x a=1>",
        "<x a=-2.5>",
        "<x flag>",
        "<x v=true>",
        "<x *if=\"a > 1\">",
        "<x [v]=\"n..m\">",
        "<x title=\"hi there\">",
        "<x v={<y/>}>",
        "{{ a }}",
        "{{ 'x }}' }}",
        "<!-- note -->",
        r"\<",
        r"\}",
    ]);
    prop::collection::vec(fragments, 0..12).prop_map(|parts| parts.concat())
}

proptest! {
    #[test]
    fn spans_tile_the_consumed_prefix(input in markup_input(), lenient in any::<bool>()) {
        let result = tokenize_with(&input, &TokenizeOptions::new().lenient(lenient));
        assert_contiguous(&result.tokens);
        if result.is_ok() {
            prop_assert_eq!(result.consumed(), input.chars().count());
        }
    }

    #[test]
    fn text_reproduces_input_without_escapes(input in markup_input()) {
        prop_assume!(!input.contains('\\'));
        let result = tokenize_with(&input, &TokenizeOptions::new().lenient(true));
        prop_assert_eq!(joined(&result.tokens), char_prefix(&input, result.consumed()));
    }

    #[test]
    fn tokenizing_is_deterministic(input in markup_input()) {
        let options = TokenizeOptions::default();
        prop_assert_eq!(tokenize_with(&input, &options), tokenize_with(&input, &options));
    }

    #[test]
    fn lenient_never_reports_closing_curly(input in markup_input()) {
        let result = tokenize_with(&input, &TokenizeOptions::new().lenient(true));
        prop_assert_ne!(
            result.error.map(|e| e.kind),
            Some(LexErrorKind::UnescapedClosingCurly)
        );
    }

    #[test]
    fn well_formed_fragments_lex(input in fragment()) {
        let result = tokenize_with(&input, &TokenizeOptions::default());
        prop_assert!(result.error.is_none(), "{:?} on {:?}", result.error, input);
        assert_contiguous(&result.tokens);
    }

    #[test]
    fn expression_covers_any_input(input in markup_input()) {
        let tokens = tokenize_expression(&input);
        assert_contiguous(&tokens);
        prop_assert_eq!(joined(&tokens), input.clone());

        let result = tokenize_with(&input, &TokenizeOptions::new().grammar(Grammar::Expression));
        prop_assert!(result.is_ok());
    }
}
