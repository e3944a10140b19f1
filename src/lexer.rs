use std::fmt;

use tracing::{debug, trace};

use crate::cursor::Cursor;
use crate::expression::tokenize_expression;
use crate::quotes::QuoteTracker;
use crate::sink::TokenSink;
use crate::span::{SpanBuilder, SpanError};
use crate::token::Token;

/// Classifies a lexer error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LexErrorKind {
    /// `<` not followed by a tag name.
    MissingTagName,
    /// Tag not closed by `>`.
    UnterminatedTag,
    /// Attribute subtree `{` without its matching `}`.
    UnterminatedSubtree,
    /// `{{` without a closing `}}`.
    UnterminatedInterpolation,
    /// Double-quoted attribute value without its closing quote.
    UnterminatedString,
    /// Something other than a valid key where an attribute was expected.
    ExpectedAttributeKey,
    /// Bare numeric attribute value that is not a number.
    MalformedNumber,
    /// Bare attribute value starting with `t` that is not `true`.
    MalformedLiteralTrue,
    /// Bare attribute value starting with `f` that is not `false`.
    MalformedLiteralFalse,
    /// Attribute value that starts with no known value syntax.
    UnsupportedAttributeValue,
    /// `}` outside of any subtree; tolerated in lenient mode.
    UnescapedClosingCurly,
    /// Interpolation body nesting quotes too deeply.
    QuoteDepthExceeded,
    /// Internal substring bookkeeping went wrong.
    InvalidSpan(SpanError),
}

impl LexErrorKind {
    /// Stable machine-readable name of the error.
    #[must_use]
    pub const fn code(&self) -> &'static str {
        match self {
            Self::MissingTagName => "MISSING_TAG_NAME",
            Self::UnterminatedTag => "UNTERMINATED_TAG",
            Self::UnterminatedSubtree => "UNTERMINATED_SUBTREE",
            Self::UnterminatedInterpolation => "UNTERMINATED_INTERPOLATION",
            Self::UnterminatedString => "UNTERMINATED_STRING",
            Self::ExpectedAttributeKey => "EXPECTED_ATTRIBUTE_KEY",
            Self::MalformedNumber => "MALFORMED_NUMBER",
            Self::MalformedLiteralTrue => "MALFORMED_LITERAL_TRUE",
            Self::MalformedLiteralFalse => "MALFORMED_LITERAL_FALSE",
            Self::UnsupportedAttributeValue => "UNSUPPORTED_ATTRIBUTE_VALUE",
            Self::UnescapedClosingCurly => "UNESCAPED_CLOSING_CURLY",
            Self::QuoteDepthExceeded => "QUOTE_DEPTH_EXCEEDED",
            Self::InvalidSpan(_) => "INVALID_SPAN",
        }
    }
}

impl fmt::Display for LexErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingTagName => write!(f, "missing tag name"),
            Self::UnterminatedTag => write!(f, "unterminated tag, expected '>'"),
            Self::UnterminatedSubtree => {
                write!(f, "unterminated subtree, expected '}}'")
            }
            Self::UnterminatedInterpolation => {
                write!(f, "unterminated interpolation, expected '}}}}'")
            }
            Self::UnterminatedString => write!(f, "unterminated string"),
            Self::ExpectedAttributeKey => write!(f, "expected an attribute key"),
            Self::MalformedNumber => write!(f, "malformed number"),
            Self::MalformedLiteralTrue => write!(f, "malformed literal, expected 'true'"),
            Self::MalformedLiteralFalse => {
                write!(f, "malformed literal, expected 'false'")
            }
            Self::UnsupportedAttributeValue => {
                write!(f, "unsupported attribute value")
            }
            Self::UnescapedClosingCurly => {
                write!(f, "unescaped closing curly bracket, write '\\}}'")
            }
            Self::QuoteDepthExceeded => {
                write!(f, "{}", crate::quotes::QuoteDepthExceeded)
            }
            Self::InvalidSpan(err) => write!(f, "internal lexer error: {err}"),
        }
    }
}

/// Error produced during lexing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("{kind} at position {position}")]
pub struct LexError {
    pub kind: LexErrorKind,
    /// Character index the error was detected at.
    pub position: usize,
}

/// Which grammar the input is lexed with.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Grammar {
    /// Tags, text, comments, and interpolations.
    #[default]
    Markup,
    /// A bare expression, as found inside `{{ ... }}`.
    Expression,
}

/// Knobs for a tokenizer run. The default is strict markup.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TokenizeOptions {
    /// Tolerate unescaped `}` in top-level text, so that previews of input
    /// being edited still highlight.
    pub lenient: bool,
    pub grammar: Grammar,
}

impl TokenizeOptions {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            lenient: false,
            grammar: Grammar::Markup,
        }
    }

    #[must_use]
    pub const fn lenient(mut self, lenient: bool) -> Self {
        self.lenient = lenient;
        self
    }

    #[must_use]
    pub const fn grammar(mut self, grammar: Grammar) -> Self {
        self.grammar = grammar;
        self
    }
}

/// Outcome of a tokenizer run.
///
/// On failure `tokens` still holds everything emitted before the error, so
/// the valid prefix can be highlighted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tokenized {
    pub tokens: Vec<Token>,
    pub error: Option<LexError>,
}

impl Tokenized {
    #[must_use]
    pub const fn is_ok(&self) -> bool {
        self.error.is_none()
    }

    /// Character offset just past the last token.
    #[must_use]
    pub fn consumed(&self) -> usize {
        self.tokens.last().map_or(0, |t| t.span.end)
    }

    pub fn into_result(self) -> Result<Vec<Token>, LexError> {
        match self.error {
            Some(err) => Err(err),
            None => Ok(self.tokens),
        }
    }
}

/// Tokenize ComponentMarkup source in strict mode.
///
/// # Errors
///
/// Returns `LexError` for the first malformed construct, such as an
/// unterminated tag, string, subtree, or interpolation.
pub fn tokenize(input: &str) -> Result<Vec<Token>, LexError> {
    tokenize_with(input, &TokenizeOptions::default()).into_result()
}

/// Tokenize with explicit options, keeping partial output on failure.
#[must_use]
pub fn tokenize_with(input: &str, options: &TokenizeOptions) -> Tokenized {
    debug!(
        len = input.len(),
        lenient = options.lenient,
        grammar = ?options.grammar,
        "tokenizing"
    );

    if options.grammar == Grammar::Expression {
        return Tokenized {
            tokens: tokenize_expression(input),
            error: None,
        };
    }

    let chars: Vec<char> = input.chars().collect();
    let mut sink = TokenSink::new();
    let result = Lexer::new(&chars, &mut sink, options.lenient).run();

    if let Err(err) = &result {
        debug!(
            code = err.kind.code(),
            position = err.position,
            "lexing stopped"
        );
    }

    Tokenized {
        tokens: sink.into_tokens(),
        error: result.err(),
    }
}

/// Printable ASCII except the characters with structural meaning in tags.
const fn is_identifier_char(c: char) -> bool {
    matches!(c, '!'..='~') && !matches!(c, '<' | '>' | '{' | '}' | '\\' | '/' | '\'' | '"' | '=')
}

struct Lexer<'a, 's> {
    cursor: Cursor<'a>,
    span: SpanBuilder,
    quotes: QuoteTracker,
    sink: &'s mut TokenSink,
    lenient: bool,
}

impl<'a, 's> Lexer<'a, 's> {
    const fn new(input: &'a [char], sink: &'s mut TokenSink, lenient: bool) -> Self {
        Self {
            cursor: Cursor::new(input),
            span: SpanBuilder::new(),
            quotes: QuoteTracker::new(),
            sink,
            lenient,
        }
    }

    fn run(mut self) -> Result<(), LexError> {
        self.content(false)
    }

    const fn error(&self, kind: LexErrorKind) -> LexError {
        Self::error_at(kind, self.cursor.position())
    }

    const fn error_at(kind: LexErrorKind, position: usize) -> LexError {
        LexError { kind, position }
    }

    fn end_span(&mut self, end: usize) -> Result<(), LexError> {
        self.span
            .set_end(end)
            .map_err(|err| Self::error_at(LexErrorKind::InvalidSpan(err), end))
    }

    fn cut(&mut self) -> Result<String, LexError> {
        let position = self.cursor.position();
        self.span
            .build(self.cursor.input())
            .map_err(|err| Self::error_at(LexErrorKind::InvalidSpan(err), position))
    }

    /// Emit the pending text run, if any, up to `end`.
    fn flush_text(&mut self, end: usize) -> Result<(), LexError> {
        if !self.span.has_start() {
            return Ok(());
        }
        self.end_span(end)?;
        let raw = self.cut()?;
        self.sink.text(&raw);
        Ok(())
    }

    /// Text, tags, and interpolations until end of input, or until the `}`
    /// closing the current subtree.
    fn content(&mut self, within_subtree: bool) -> Result<(), LexError> {
        while let Some(ch) = self.cursor.peek_char() {
            if ch == '}' {
                if within_subtree {
                    break;
                }
                if !self.lenient {
                    self.flush_text(self.cursor.position())?;
                    return Err(self.error(LexErrorKind::UnescapedClosingCurly));
                }
            }

            let before = self.cursor.position();

            if self.cursor.starts_with("{{") {
                self.flush_text(before)?;
                self.interpolation()?;
                continue;
            }

            let whitespace = self.cursor.consume_whitespace();
            if self.cursor.peek_char() == Some('<') {
                self.flush_text(before)?;
                self.sink.whitespace(&whitespace);
                self.tag()?;
                continue;
            }
            self.cursor.restore(before);

            if !self.span.has_start() {
                self.span.set_start(before);
            }

            let consumed = self.cursor.next_char();
            if consumed == Some('\\') && matches!(self.cursor.peek_char(), Some('<' | '}')) {
                self.cursor.next_char();
            }

            self.cursor.consume_whitespace();
        }

        self.flush_text(self.cursor.position())
    }

    fn interpolation(&mut self) -> Result<(), LexError> {
        let open = self.cursor.position();
        self.cursor.advance(2);
        self.span.set_start(self.cursor.position());
        self.quotes.reset();

        loop {
            let candidate_end = self.cursor.position();
            let Some(c) = self.cursor.next_char() else {
                return Err(Self::error_at(
                    LexErrorKind::UnterminatedInterpolation,
                    open,
                ));
            };

            self.quotes
                .on_encounter(c)
                .map_err(|_| Self::error_at(LexErrorKind::QuoteDepthExceeded, candidate_end))?;

            if self.quotes.is_in_string() {
                continue;
            }

            if c == '}' && self.cursor.peek_char() == Some('}') {
                self.cursor.next_char();
                self.end_span(candidate_end)?;
                break;
            }
        }

        let body = self.cut()?;
        self.sink.interpolation(&body);
        Ok(())
    }

    fn identifier(&mut self) -> Result<Option<String>, LexError> {
        if !self.cursor.peek_char().is_some_and(is_identifier_char) {
            return Ok(None);
        }

        self.span.set_start(self.cursor.position());
        self.cursor.eat_while(is_identifier_char);
        self.end_span(self.cursor.position())?;
        self.cut().map(Some)
    }

    fn tag(&mut self) -> Result<(), LexError> {
        let start = self.cursor.position();
        self.cursor.next_char(); // skip <

        let whitespace = self.cursor.consume_whitespace();

        let closing = self.cursor.peek_char() == Some('/');
        if closing {
            self.cursor.next_char();
        }

        let name = self.identifier()?;

        if closing {
            if self.cursor.peek_char() != Some('>') {
                return Err(self.error(LexErrorKind::UnterminatedTag));
            }
            self.cursor.next_char();

            self.sink.tag_punctuation("<");
            self.sink.whitespace(&whitespace);
            self.sink.tag_punctuation("/");
            if let Some(name) = &name {
                self.sink.tag_name(name);
            }
            self.sink.tag_punctuation(">");
            return Ok(());
        }

        let Some(name) = name else {
            return Err(self.error(LexErrorKind::MissingTagName));
        };

        if name == "!--" && self.try_comment_end() {
            let comment = self.cursor.slice(start, self.cursor.position());
            self.sink.comment(&comment);
            return Ok(());
        }

        self.sink.tag_punctuation("<");
        self.sink.whitespace(&whitespace);
        self.sink.tag_name(&name);

        while !self.cursor.is_at_end() {
            if !self.attribute()? {
                break;
            }
        }

        if self.cursor.peek_char() == Some('/') {
            self.cursor.next_char();
            self.sink.tag_punctuation("/");
        }

        let whitespace = self.cursor.consume_whitespace();
        self.sink.whitespace(&whitespace);

        if self.cursor.peek_char() != Some('>') {
            return Err(self.error(LexErrorKind::UnterminatedTag));
        }
        self.cursor.next_char();
        self.sink.tag_punctuation(">");
        Ok(())
    }

    /// Move past the first `-->`, or stay put if there is none.
    fn try_comment_end(&mut self) -> bool {
        let saved = self.cursor.save();

        while !self.cursor.is_at_end() {
            if self.cursor.starts_with("-->") {
                self.cursor.advance(3);
                return true;
            }
            self.cursor.next_char();
        }

        trace!(position = saved, "no comment terminator, lexing as a tag");
        self.cursor.restore(saved);
        false
    }

    /// Parse one attribute. Returns `false` when none starts here.
    fn attribute(&mut self) -> Result<bool, LexError> {
        let whitespace = self.cursor.consume_whitespace();
        self.sink.whitespace(&whitespace);

        let name_start = self.cursor.position();
        let Some(name) = self.identifier()? else {
            if self.cursor.peek_char() == Some('"') {
                return Err(self.error(LexErrorKind::ExpectedAttributeKey));
            }
            return Ok(false);
        };

        // A leading digit means a value without its key, as in `my-attr 53`.
        if name.starts_with(|c: char| c.is_ascii_digit()) {
            return Err(Self::error_at(LexErrorKind::ExpectedAttributeKey, name_start));
        }

        self.sink.attribute_name(&name);

        let whitespace = self.cursor.consume_whitespace();
        self.sink.whitespace(&whitespace);

        if self.cursor.peek_char() != Some('=') {
            // Flag attribute; `true` and `false` are reserved.
            if name.eq_ignore_ascii_case("true") || name.eq_ignore_ascii_case("false") {
                return Err(Self::error_at(LexErrorKind::ExpectedAttributeKey, name_start));
            }
            return Ok(true);
        }

        self.cursor.next_char();
        self.sink.equals();

        let whitespace = self.cursor.consume_whitespace();
        self.sink.whitespace(&whitespace);

        match self.cursor.peek_char() {
            Some('"') => self.string_value(&name)?,
            Some('{') => self.subtree()?,
            Some('t' | 'T') => self.bare_literal("true", LexErrorKind::MalformedLiteralTrue)?,
            Some('f' | 'F') => self.bare_literal("false", LexErrorKind::MalformedLiteralFalse)?,
            Some(c) if c.is_ascii_digit() || c == '.' || c == '-' => self.number_value()?,
            _ => return Err(self.error(LexErrorKind::UnsupportedAttributeValue)),
        }

        Ok(true)
    }

    fn string_value(&mut self, attribute_name: &str) -> Result<(), LexError> {
        let open = self.cursor.position();
        self.cursor.next_char(); // skip opening quote
        self.span.set_start(self.cursor.position());

        let mut prior = None;
        loop {
            let Some(c) = self.cursor.next_char() else {
                return Err(Self::error_at(LexErrorKind::UnterminatedString, open));
            };
            if c == '"' && prior != Some('\\') {
                break;
            }
            prior = Some(c);
        }

        self.end_span(self.cursor.position() - 1)?;
        let contents = self.cut()?;
        self.sink.string_value(&contents, attribute_name);
        Ok(())
    }

    fn subtree(&mut self) -> Result<(), LexError> {
        self.cursor.next_char(); // skip {
        self.sink.subtree_brace('{');

        self.content(true)?;

        if self.cursor.peek_char() != Some('}') {
            return Err(self.error(LexErrorKind::UnterminatedSubtree));
        }
        self.cursor.next_char();
        self.sink.subtree_brace('}');
        Ok(())
    }

    /// End of input, whitespace, or the end of the tag.
    fn at_value_boundary(&self) -> bool {
        match self.cursor.peek_char() {
            None => true,
            Some(c) => c.is_whitespace() || c == '>',
        }
    }

    fn bare_literal(&mut self, keyword: &str, kind: LexErrorKind) -> Result<(), LexError> {
        let start = self.cursor.position();

        for expected in keyword.chars() {
            let matches = self
                .cursor
                .peek_char()
                .is_some_and(|c| c.to_ascii_lowercase() == expected);
            if !matches {
                return Err(self.error(kind));
            }
            self.cursor.next_char();
        }

        if !self.at_value_boundary() {
            return Err(self.error(kind));
        }

        let literal = self.cursor.slice(start, self.cursor.position());
        self.sink.literal(&literal);
        Ok(())
    }

    fn number_value(&mut self) -> Result<(), LexError> {
        self.span.set_start(self.cursor.position());

        if self.cursor.peek_char() == Some('-') {
            self.cursor.next_char();
        }

        let mut had_decimal = false;
        let mut had_digit = false;

        loop {
            match self.cursor.peek_char() {
                Some(c) if c.is_ascii_digit() => had_digit = true,
                Some('.') if had_decimal => {
                    return Err(self.error(LexErrorKind::MalformedNumber));
                }
                Some('.') => had_decimal = true,
                _ => break,
            }
            self.cursor.next_char();
        }

        if !had_digit || !self.at_value_boundary() {
            return Err(self.error(LexErrorKind::MalformedNumber));
        }

        self.end_span(self.cursor.position())?;
        let number = self.cut()?;
        self.sink.number(&number);
        Ok(())
    }
}
