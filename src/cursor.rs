/// Character stream over an immutable input with one character of
/// lookahead.
///
/// The position only moves forward, except through [`Cursor::restore`]
/// which rewinds to a position previously returned by [`Cursor::save`].
#[derive(Debug, Clone)]
pub struct Cursor<'a> {
    input: &'a [char],
    pos: usize,
}

impl<'a> Cursor<'a> {
    #[must_use]
    pub const fn new(input: &'a [char]) -> Self {
        Self { input, pos: 0 }
    }

    #[must_use]
    pub const fn input(&self) -> &'a [char] {
        self.input
    }

    /// Index of the next unread character.
    #[must_use]
    pub const fn position(&self) -> usize {
        self.pos
    }

    #[must_use]
    pub const fn is_at_end(&self) -> bool {
        self.pos >= self.input.len()
    }

    pub fn next_char(&mut self) -> Option<char> {
        let ch = self.peek_char()?;
        self.pos += 1;
        Some(ch)
    }

    #[must_use]
    pub fn peek_char(&self) -> Option<char> {
        self.input.get(self.pos).copied()
    }

    #[must_use]
    pub fn peek_at(&self, offset: usize) -> Option<char> {
        self.input.get(self.pos + offset).copied()
    }

    /// Whether `literal` appears verbatim at the current position.
    #[must_use]
    pub fn starts_with(&self, literal: &str) -> bool {
        let mut index = self.pos;
        for expected in literal.chars() {
            if self.input.get(index) != Some(&expected) {
                return false;
            }
            index += 1;
        }
        true
    }

    /// Consume a maximal run of whitespace and return it.
    ///
    /// Emitting the run is left to the caller, since some productions only
    /// know whether the whitespace belongs to them after looking past it.
    pub fn consume_whitespace(&mut self) -> String {
        let start = self.pos;
        while self.peek_char().is_some_and(char::is_whitespace) {
            self.pos += 1;
        }
        self.slice(start, self.pos)
    }

    /// Skip up to `count` characters.
    pub fn advance(&mut self, count: usize) {
        self.pos = (self.pos + count).min(self.input.len());
    }

    pub fn eat_while(&mut self, predicate: impl Fn(char) -> bool) {
        while self.peek_char().is_some_and(&predicate) {
            self.pos += 1;
        }
    }

    /// Copy `input[start..end]`, clamped to the input.
    #[must_use]
    pub fn slice(&self, start: usize, end: usize) -> String {
        let end = end.min(self.input.len());
        let start = start.min(end);
        self.input[start..end].iter().collect()
    }

    #[must_use]
    pub const fn save(&self) -> usize {
        self.pos
    }

    pub const fn restore(&mut self, saved: usize) {
        debug_assert!(saved <= self.input.len());
        self.pos = saved;
    }
}
