/// Deepest quote nesting an interpolation body may reach.
pub const MAX_QUOTE_DEPTH: u32 = 64;

/// Raised when an interpolation body nests quotes deeper than
/// [`MAX_QUOTE_DEPTH`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("maximum quote-stack depth of {MAX_QUOTE_DEPTH} exceeded")]
pub struct QuoteDepthExceeded;

/// Tracks whether a scan position lies inside a (possibly nested) string
/// literal.
///
/// Nested strings alternate their delimiters, so a quote that differs from
/// the one that opened the innermost level opens a new level, and a quote
/// equal to it closes that level. Bit `n` of `bits` is set when level `n`
/// was opened by a single quote.
#[derive(Debug, Clone, Copy, Default)]
pub struct QuoteTracker {
    bits: u64,
    depth: u32,
}

impl QuoteTracker {
    #[must_use]
    pub const fn new() -> Self {
        Self { bits: 0, depth: 0 }
    }

    #[must_use]
    pub const fn depth(&self) -> u32 {
        self.depth
    }

    #[must_use]
    pub const fn is_in_string(&self) -> bool {
        self.depth != 0
    }

    pub const fn reset(&mut self) {
        self.bits = 0;
        self.depth = 0;
    }

    pub const fn on_encounter(&mut self, c: char) -> Result<(), QuoteDepthExceeded> {
        let is_single = c == '\'';
        if !is_single && c != '"' {
            return Ok(());
        }

        if self.depth > 0 {
            let top_is_single = self.bits & (1 << (self.depth - 1)) != 0;
            if top_is_single == is_single {
                self.depth -= 1;
                return Ok(());
            }
        }

        if self.depth == MAX_QUOTE_DEPTH {
            return Err(QuoteDepthExceeded);
        }

        let mask = 1 << self.depth;
        if is_single {
            self.bits |= mask;
        } else {
            self.bits &= !mask;
        }
        self.depth += 1;
        Ok(())
    }
}
