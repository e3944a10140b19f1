/// Misuse of a [`SpanBuilder`]. Always a lexer bug, never bad input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum SpanError {
    #[error("end-exclusive cannot be zero")]
    ZeroEnd,
    #[error("cannot build a substring without a determined start")]
    MissingStart,
    #[error("cannot build a substring without a determined end")]
    MissingEnd,
}

/// Defers cutting a substring until both of its boundaries are known.
///
/// Each start/end pair can be built exactly once; building resets the
/// builder.
#[derive(Debug, Clone, Default)]
pub struct SpanBuilder {
    start: Option<usize>,
    end: Option<usize>,
}

impl SpanBuilder {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            start: None,
            end: None,
        }
    }

    #[must_use]
    pub const fn has_start(&self) -> bool {
        self.start.is_some()
    }

    /// Record a start, discarding whatever span was pending.
    pub const fn set_start(&mut self, index: usize) {
        self.start = Some(index);
        self.end = None;
    }

    pub const fn set_end(&mut self, index: usize) -> Result<(), SpanError> {
        if index == 0 {
            return Err(SpanError::ZeroEnd);
        }
        self.end = Some(index);
        Ok(())
    }

    /// Cut the pending span out of `input` and clear it.
    pub fn build(&mut self, input: &[char]) -> Result<String, SpanError> {
        let start = self.start.ok_or(SpanError::MissingStart)?;
        let end = self.end.ok_or(SpanError::MissingEnd)?;
        self.start = None;
        self.end = None;
        Ok(input[start..end.max(start)].iter().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn chars(input: &str) -> Vec<char> {
        input.chars().collect()
    }

    #[test]
    fn builds_once() {
        let input = chars("hello world");
        let mut span = SpanBuilder::new();
        span.set_start(6);
        span.set_end(11).expect("non-zero end");
        assert_eq!(span.build(&input), Ok("world".to_string()));
        assert!(!span.has_start());
        assert_eq!(span.build(&input), Err(SpanError::MissingStart));
    }

    #[test]
    fn zero_end_rejected() {
        let mut span = SpanBuilder::new();
        span.set_start(0);
        assert_eq!(span.set_end(0), Err(SpanError::ZeroEnd));
    }

    #[test]
    fn end_required() {
        let input = chars("abc");
        let mut span = SpanBuilder::new();
        span.set_start(1);
        assert_eq!(span.build(&input), Err(SpanError::MissingEnd));
    }

    #[test]
    fn set_start_discards_pending_end() {
        let input = chars("abc");
        let mut span = SpanBuilder::new();
        span.set_start(0);
        span.set_end(2).expect("non-zero end");
        span.set_start(1);
        assert_eq!(span.build(&input), Err(SpanError::MissingEnd));
    }
}
