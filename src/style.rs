//! Presentation mapping from token kinds to highlight styles.
//!
//! Kept apart from the lexers: a host decides how a kind looks, the lexers
//! only decide what a piece of input is.

use crate::lexer::{LexError, TokenizeOptions, tokenize_with};
use crate::token::{Span, TokenKind};

/// Style a highlighting host applies to a token.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StyleKey {
    Whitespace,
    Tab,
    Comment,
    Content,
    TagName,
    TagPunctuation,
    Keyword,
    Variable,
    String,
    Number,
    Operator,
}

impl StyleKey {
    /// CSS class name of the style.
    #[must_use]
    pub const fn class(self) -> &'static str {
        match self {
            Self::Whitespace => "tk-whitespace",
            Self::Tab => "tk-tab",
            Self::Comment => "tk-comment",
            Self::Content => "tk-content",
            Self::TagName => "tk-class-name",
            Self::TagPunctuation => "tk-class-name-alt",
            Self::Keyword => "tk-keyword",
            Self::Variable => "tk-variable",
            Self::String => "tk-string",
            Self::Number => "tk-number",
            Self::Operator => "tk-operator",
        }
    }
}

/// Look up the style of a token. `None` means unstyled.
///
/// Newlines are whitespace tokens too, but marking them would make every
/// line break visible.
#[must_use]
pub fn style_for(kind: TokenKind, text: &str) -> Option<StyleKey> {
    let style = match kind {
        TokenKind::Whitespace if text == "\n" || text == "\r" => return None,
        TokenKind::Whitespace => StyleKey::Whitespace,
        TokenKind::Tab => StyleKey::Tab,
        TokenKind::Comment => StyleKey::Comment,
        TokenKind::Text => StyleKey::Content,
        TokenKind::TagName => StyleKey::TagName,
        TokenKind::TagPunctuation => StyleKey::TagPunctuation,
        TokenKind::Literal | TokenKind::AttributeName | TokenKind::DirectiveKeyword => {
            StyleKey::Keyword
        }
        TokenKind::BindingName | TokenKind::Identifier => StyleKey::Variable,
        TokenKind::String => StyleKey::String,
        TokenKind::Number => StyleKey::Number,
        TokenKind::Interpolation
        | TokenKind::SubtreeBrace
        | TokenKind::Equals
        | TokenKind::DirectivePunctuation
        | TokenKind::Operator
        | TokenKind::Punctuation => StyleKey::Operator,
        TokenKind::Plain => return None,
    };
    Some(style)
}

/// A styled range of input, in character offsets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HighlightRange {
    pub span: Span,
    pub style: Option<StyleKey>,
}

/// Everything a host needs to decorate an editor buffer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Highlight {
    pub ranges: Vec<HighlightRange>,
    pub error: Option<LexError>,
}

/// Tokenize `input` and map every token to its style.
///
/// When lexing fails, the valid prefix keeps its styles and the rest of the
/// input is covered by one unstyled range.
#[must_use]
pub fn highlight(input: &str, options: &TokenizeOptions) -> Highlight {
    let result = tokenize_with(input, options);
    let consumed = result.consumed();

    let mut ranges: Vec<HighlightRange> = result
        .tokens
        .iter()
        .map(|token| HighlightRange {
            span: token.span,
            style: style_for(token.kind, &token.text),
        })
        .collect();

    let total = input.chars().count();
    if consumed < total {
        ranges.push(HighlightRange {
            span: Span::new(consumed, total),
            style: None,
        });
    }

    Highlight {
        ranges,
        error: result.error,
    }
}
