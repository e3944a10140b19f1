//! Style table and highlight range tests.

use component_markup::{
    LexErrorKind, Span, StyleKey, TokenKind, TokenizeOptions, highlight, style_for,
};

#[test]
fn style_table_covers_markup_kinds() {
    assert_eq!(style_for(TokenKind::TagName, "div"), Some(StyleKey::TagName));
    assert_eq!(style_for(TokenKind::Comment, "<!-- -->"), Some(StyleKey::Comment));
    assert_eq!(style_for(TokenKind::Text, "hi"), Some(StyleKey::Content));
    assert_eq!(style_for(TokenKind::BindingName, "v"), Some(StyleKey::Variable));
    assert_eq!(style_for(TokenKind::Interpolation, "{{"), Some(StyleKey::Operator));
    assert_eq!(style_for(TokenKind::Tab, "\t"), Some(StyleKey::Tab));
}

#[test]
fn style_table_shares_keys_across_grammars() {
    assert_eq!(
        style_for(TokenKind::Identifier, "a"),
        style_for(TokenKind::BindingName, "a")
    );
    assert_eq!(
        style_for(TokenKind::Punctuation, "("),
        style_for(TokenKind::Equals, "=")
    );
}

#[test]
fn highlight_success_covers_input() {
    let input = "<b>bold</b>\n";
    let highlighted = highlight(input, &TokenizeOptions::default());
    assert!(highlighted.error.is_none());
    assert_eq!(
        highlighted.ranges.last().map(|r| r.span.end),
        Some(input.chars().count())
    );
    assert_eq!(highlighted.ranges.last().and_then(|r| r.style), None);
    assert_eq!(highlighted.ranges[1].style, Some(StyleKey::TagName));
}

#[test]
fn highlight_error_leaves_remainder_unstyled() {
    let input = "<b>ok</b> <x v=12.5.6>";
    let highlighted = highlight(input, &TokenizeOptions::default());
    assert_eq!(
        highlighted.error.map(|e| e.kind),
        Some(LexErrorKind::MalformedNumber)
    );

    let last = highlighted.ranges.last().expect("ranges");
    assert_eq!(last.style, None);
    assert_eq!(last.span.end, input.chars().count());
    assert!(
        highlighted
            .ranges
            .iter()
            .any(|r| r.style == Some(StyleKey::TagName))
    );
}

#[test]
fn highlight_lenient_mode() {
    let strict = highlight("a } b", &TokenizeOptions::new());
    let lenient = highlight("a } b", &TokenizeOptions::new().lenient(true));
    assert!(strict.error.is_some());
    assert_eq!(strict.ranges[0].style, Some(StyleKey::Content));
    assert_eq!(strict.ranges.last().map(|r| r.span), Some(Span::new(2, 5)));
    assert!(lenient.error.is_none());
    assert_eq!(lenient.ranges[2].span, Span::new(2, 3));
    assert_eq!(lenient.ranges[2].style, Some(StyleKey::Content));
}
