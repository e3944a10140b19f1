use crate::token::{Span, Token, TokenKind};

/// Ordered, append-only token output shared by both tokenizers.
///
/// Tokens are appended strictly in source order and cover the input without
/// gaps, so the sink derives every span from a running character offset.
#[derive(Debug, Clone, Default)]
pub struct TokenSink {
    tokens: Vec<Token>,
    offset: usize,
}

impl TokenSink {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            tokens: Vec::new(),
            offset: 0,
        }
    }

    /// Character offset just past the last emitted token.
    #[must_use]
    pub const fn offset(&self) -> usize {
        self.offset
    }

    #[must_use]
    pub fn tokens(&self) -> &[Token] {
        &self.tokens
    }

    #[must_use]
    pub fn into_tokens(self) -> Vec<Token> {
        self.tokens
    }

    /// Append a token whose text is exactly the source it covers.
    pub fn push(&mut self, kind: TokenKind, text: impl Into<String>) {
        let text = text.into();
        let len = text.chars().count();
        self.push_covering(kind, text, len);
    }

    /// Append a token covering `source_len` characters of input, which may
    /// differ from its text when escapes were resolved.
    fn push_covering(&mut self, kind: TokenKind, text: String, source_len: usize) {
        if source_len == 0 {
            return;
        }
        let span = Span::new(self.offset, self.offset + source_len);
        self.offset = span.end;
        self.tokens.push(Token::new(kind, text, span));
    }

    /// Emit one whitespace token per character.
    pub fn whitespace(&mut self, run: &str) {
        for ch in run.chars() {
            let kind = if ch == '\t' {
                TokenKind::Tab
            } else {
                TokenKind::Whitespace
            };
            self.push(kind, ch);
        }
    }

    pub fn tag_name(&mut self, name: &str) {
        self.push(TokenKind::TagName, name);
    }

    pub fn tag_punctuation(&mut self, value: &str) {
        self.push(TokenKind::TagPunctuation, value);
    }

    pub fn comment(&mut self, value: &str) {
        self.push(TokenKind::Comment, value);
    }

    pub fn equals(&mut self) {
        self.push(TokenKind::Equals, "=");
    }

    pub fn subtree_brace(&mut self, brace: char) {
        self.push(TokenKind::SubtreeBrace, brace);
    }

    pub fn literal(&mut self, value: &str) {
        self.push(TokenKind::Literal, value);
    }

    pub fn number(&mut self, value: &str) {
        self.push(TokenKind::Number, value);
    }

    /// Emit an interpolation: `{{`, the body as expression tokens, `}}`.
    pub fn interpolation(&mut self, body: &str) {
        self.push(TokenKind::Interpolation, "{{");
        crate::expression::tokenize_into(body, self);
        self.push(TokenKind::Interpolation, "}}");
    }

    /// Emit a raw text run, split on whitespace.
    ///
    /// Every `\<` and `\}` pair in the run is an escape: the backslash is
    /// dropped from the token text while the span still covers it.
    pub fn text(&mut self, raw: &str) {
        let mut buffer = String::new();
        let mut covered = 0;
        let mut chars = raw.chars().peekable();

        while let Some(ch) = chars.next() {
            if ch.is_whitespace() {
                self.push_covering(TokenKind::Text, std::mem::take(&mut buffer), covered);
                covered = 0;
                self.whitespace(ch.encode_utf8(&mut [0; 4]));
                continue;
            }

            if ch == '\\' && matches!(chars.peek(), Some('<' | '}')) {
                buffer.extend(chars.next());
                covered += 2;
                continue;
            }

            buffer.push(ch);
            covered += 1;
        }

        self.push_covering(TokenKind::Text, buffer, covered);
    }

    /// Emit an attribute name, splitting off directive markers.
    ///
    /// Brackets only mark a binding on the whole name, so `*[a]` keeps
    /// `[a]` as its name.
    pub fn attribute_name(&mut self, name: &str) {
        if name.len() >= 2 && name.starts_with('[') && name.ends_with(']') {
            self.push(TokenKind::DirectivePunctuation, "[");
            self.push(TokenKind::BindingName, &name[1..name.len() - 1]);
            self.push(TokenKind::DirectivePunctuation, "]");
            return;
        }

        let mut rest = name;

        if let Some(stripped) = rest.strip_prefix('*') {
            self.push(TokenKind::DirectivePunctuation, "*");
            rest = stripped;
            if let Some(stripped) = rest.strip_prefix("for-") {
                self.push(TokenKind::DirectiveKeyword, "for");
                self.push(TokenKind::DirectivePunctuation, "-");
                rest = stripped;
            }
        }

        if let Some(stripped) = rest.strip_prefix("let-") {
            self.push(TokenKind::DirectiveKeyword, "let");
            self.push(TokenKind::DirectivePunctuation, "-");
            rest = stripped;
        }

        self.push(TokenKind::AttributeName, rest);
    }

    /// Emit a double-quoted attribute value. Directive attributes have their
    /// contents classified as an expression, all others as opaque string.
    pub fn string_value(&mut self, contents: &str, attribute_name: &str) {
        self.push(TokenKind::String, "\"");
        if is_directive(attribute_name) {
            crate::expression::tokenize_into(contents, self);
        } else {
            self.push(TokenKind::String, contents);
        }
        self.push(TokenKind::String, "\"");
    }
}

/// Whether an attribute name marks its value as an expression.
#[must_use]
pub fn is_directive(name: &str) -> bool {
    name.starts_with('*')
        || (name.len() >= 2 && name.starts_with('[') && name.ends_with(']'))
        || name.starts_with("let-")
}
