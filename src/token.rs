/// Half-open range of character indices into the tokenized input.
///
/// Offsets count `char`s, not bytes, so they line up with what an editor
/// reports as a caret position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Span {
    pub start: usize,
    pub end: usize,
}

impl Span {
    #[must_use]
    pub const fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }

    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.start == self.end
    }
}

/// Token kinds produced by both the markup and the expression tokenizer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenKind {
    /// A single whitespace character other than a tab.
    Whitespace,
    /// A single tab character.
    Tab,
    /// A run of non-whitespace markup text.
    Text,
    /// `<!-- ... -->`, including the delimiters.
    Comment,
    /// Name of an opening or closing tag.
    TagName,
    /// `<`, `>` or `/` of a tag.
    TagPunctuation,
    /// `{{` or `}}` around an interpolation.
    Interpolation,
    /// `{` or `}` around an attribute subtree.
    SubtreeBrace,
    /// `=` between an attribute name and its value.
    Equals,
    /// Plain attribute name, or the remainder of a directive name.
    AttributeName,
    /// `*`, `[`, `]` and `-` separators inside directive names.
    DirectivePunctuation,
    /// `for` and `let` inside directive names.
    DirectiveKeyword,
    /// The inner name of a `[name]` binding.
    BindingName,
    /// String delimiters and opaque string contents.
    String,
    /// Numeric literal.
    Number,
    /// `true`, `false` and `null`.
    Literal,
    /// Expression identifier.
    Identifier,
    /// Expression operator.
    Operator,
    /// Expression punctuation: `[ ] ( ) . ,`.
    Punctuation,
    /// Anything the expression tokenizer could not classify.
    Plain,
}

impl TokenKind {
    /// Whether the kind is one of the per-character whitespace kinds.
    #[must_use]
    pub const fn is_whitespace(self) -> bool {
        matches!(self, Self::Whitespace | Self::Tab)
    }
}

/// A single token with its kind, text, and source location.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub kind: TokenKind,
    pub text: String,
    pub span: Span,
}

impl Token {
    #[must_use]
    pub fn new(kind: TokenKind, text: impl Into<String>, span: Span) -> Self {
        Self {
            kind,
            text: text.into(),
            span,
        }
    }
}
