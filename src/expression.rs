//! Tokenizer for the expression language embedded in interpolations and
//! directive attribute values.
//!
//! The tokenizer only backs highlighting, so it never fails: every
//! character ends up in some token, falling back to [`TokenKind::Plain`].

use tracing::debug;

use crate::cursor::Cursor;
use crate::sink::TokenSink;
use crate::token::{Token, TokenKind};

const KEYWORDS: [&str; 3] = ["true", "false", "null"];

/// Characters that may follow `~` to form a two-character operator.
const TILDE_FOLLOWERS: [char; 8] = ['^', '_', '#', '!', '-', '?', '|', '<'];

/// Tokenize `input` purely as an expression.
#[must_use]
pub fn tokenize_expression(input: &str) -> Vec<Token> {
    debug!(len = input.len(), "tokenizing expression");
    let mut sink = TokenSink::new();
    tokenize_into(input, &mut sink);
    sink.into_tokens()
}

/// Tokenize `input` as an expression, appending to `sink`.
pub fn tokenize_into(input: &str, sink: &mut TokenSink) {
    let chars: Vec<char> = input.chars().collect();
    ExpressionLexer {
        cursor: Cursor::new(&chars),
        sink,
    }
    .run();
}

struct ExpressionLexer<'a, 's> {
    cursor: Cursor<'a>,
    sink: &'s mut TokenSink,
}

impl ExpressionLexer<'_, '_> {
    fn run(mut self) {
        while !self.cursor.is_at_end() {
            let whitespace = self.cursor.consume_whitespace();
            self.sink.whitespace(&whitespace);

            let Some(ch) = self.cursor.peek_char() else {
                break;
            };

            match ch {
                '\'' | '"' => self.string(ch),
                _ if self.try_keyword() => {}
                c if c.is_ascii_alphabetic() => self.identifier(),
                _ if self.starts_number() => self.number(),
                _ => self.operator_or_punctuation(ch),
            }
        }
    }

    fn emit_from(&mut self, start: usize, kind: TokenKind) {
        let text = self.cursor.slice(start, self.cursor.position());
        self.sink.push(kind, text);
    }

    fn string(&mut self, quote: char) {
        let start = self.cursor.position();
        self.cursor.next_char();

        while let Some(ch) = self.cursor.next_char() {
            if ch == '\\' {
                self.cursor.next_char();
                continue;
            }
            if ch == quote {
                break;
            }
        }

        self.emit_from(start, TokenKind::String);
    }

    fn try_keyword(&mut self) -> bool {
        let Some(keyword) = KEYWORDS.iter().find(|kw| self.cursor.starts_with(kw)) else {
            return false;
        };
        self.cursor.advance(keyword.len());
        self.sink.push(TokenKind::Literal, *keyword);
        true
    }

    fn identifier(&mut self) {
        let start = self.cursor.position();
        self.cursor.next_char();
        self.cursor.eat_while(|c| c.is_ascii_alphabetic() || c == '_');
        self.emit_from(start, TokenKind::Identifier);
    }

    fn starts_number(&self) -> bool {
        match self.cursor.peek_char() {
            Some(c) if c.is_ascii_digit() => true,
            Some('-' | '.') => self.cursor.peek_at(1).is_some_and(|c| c.is_ascii_digit()),
            _ => false,
        }
    }

    fn number(&mut self) {
        let start = self.cursor.position();
        let mut had_decimal = self.cursor.next_char() == Some('.');
        let mut range_follows = false;

        loop {
            match self.cursor.peek_char() {
                Some(c) if c.is_ascii_digit() => {}
                Some('.') if !had_decimal => had_decimal = true,
                Some('.') => {
                    // `1..5`: the decimal point just taken is half of a range
                    let previous = self.cursor.position() - 1;
                    range_follows = self.cursor.input()[previous] == '.';
                    break;
                }
                _ => break,
            }
            self.cursor.next_char();
        }

        if !range_follows {
            self.emit_from(start, TokenKind::Number);
            return;
        }

        let dot = self.cursor.position() - 1;
        let text = self.cursor.slice(start, dot);
        self.sink.push(TokenKind::Number, text);
        self.cursor.next_char();
        self.sink.push(TokenKind::Operator, "..");
    }

    fn operator_or_punctuation(&mut self, ch: char) {
        let start = self.cursor.position();
        let next = self.cursor.peek_at(1);

        let is_pair = match (ch, next) {
            ('|' | '&' | '?' | '=' | '.', Some(n)) if n == ch => true,
            ('<' | '>' | '!', Some('=')) => true,
            ('~', Some(n)) => TILDE_FOLLOWERS.contains(&n),
            _ => false,
        };

        if is_pair {
            self.cursor.advance(2);
            self.emit_from(start, TokenKind::Operator);
            return;
        }

        self.cursor.next_char();
        let kind = match ch {
            '+' | '-' | '*' | '/' | '%' | '^' | '&' | '?' | ':' | '@' | '<' | '>' | '!' => {
                TokenKind::Operator
            }
            '[' | ']' | '(' | ')' | '.' | ',' => TokenKind::Punctuation,
            _ => TokenKind::Plain,
        };
        self.emit_from(start, kind);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lex(input: &str) -> Vec<(TokenKind, String)> {
        tokenize_expression(input)
            .into_iter()
            .map(|t| (t.kind, t.text))
            .collect()
    }

    fn significant(input: &str) -> Vec<(TokenKind, String)> {
        lex(input)
            .into_iter()
            .filter(|(kind, _)| !kind.is_whitespace())
            .collect()
    }

    fn tok(kind: TokenKind, text: &str) -> (TokenKind, String) {
        (kind, text.to_string())
    }

    #[test]
    fn comparison() {
        assert_eq!(
            lex("a > 1"),
            vec![
                tok(TokenKind::Identifier, "a"),
                tok(TokenKind::Whitespace, " "),
                tok(TokenKind::Operator, ">"),
                tok(TokenKind::Whitespace, " "),
                tok(TokenKind::Number, "1"),
            ]
        );
    }

    #[test]
    fn tab_is_distinct() {
        assert_eq!(lex("\t")[0], tok(TokenKind::Tab, "\t"));
    }

    #[test]
    fn string_keeps_whitespace() {
        assert_eq!(lex("'a b'"), vec![tok(TokenKind::String, "'a b'")]);
    }

    #[test]
    fn string_with_escaped_quote() {
        assert_eq!(
            significant(r#""say \"hi\"" x"#),
            vec![
                tok(TokenKind::String, r#""say \"hi\"""#),
                tok(TokenKind::Identifier, "x"),
            ]
        );
    }

    #[test]
    fn unterminated_string_runs_to_end() {
        assert_eq!(lex("'abc"), vec![tok(TokenKind::String, "'abc")]);
    }

    #[test]
    fn keywords() {
        assert_eq!(
            significant("true false null"),
            vec![
                tok(TokenKind::Literal, "true"),
                tok(TokenKind::Literal, "false"),
                tok(TokenKind::Literal, "null"),
            ]
        );
    }

    #[test]
    fn keyword_needs_full_text() {
        assert_eq!(significant("tru"), vec![tok(TokenKind::Identifier, "tru")]);
        assert_eq!(significant("nul"), vec![tok(TokenKind::Identifier, "nul")]);
    }

    #[test]
    fn identifier_with_underscore() {
        assert_eq!(
            significant("user_Name"),
            vec![tok(TokenKind::Identifier, "user_Name")]
        );
    }

    #[test]
    fn decimal_number() {
        assert_eq!(significant("12.5"), vec![tok(TokenKind::Number, "12.5")]);
        assert_eq!(significant(".5"), vec![tok(TokenKind::Number, ".5")]);
        assert_eq!(significant("-3"), vec![tok(TokenKind::Number, "-3")]);
    }

    #[test]
    fn range_without_spaces() {
        assert_eq!(
            significant("1..5"),
            vec![
                tok(TokenKind::Number, "1"),
                tok(TokenKind::Operator, ".."),
                tok(TokenKind::Number, "5"),
            ]
        );
    }

    #[test]
    fn lone_minus_is_operator() {
        assert_eq!(
            significant("a - b"),
            vec![
                tok(TokenKind::Identifier, "a"),
                tok(TokenKind::Operator, "-"),
                tok(TokenKind::Identifier, "b"),
            ]
        );
    }

    #[test]
    fn doubled_operators() {
        assert_eq!(
            significant("a || b && c ?? d == e"),
            vec![
                tok(TokenKind::Identifier, "a"),
                tok(TokenKind::Operator, "||"),
                tok(TokenKind::Identifier, "b"),
                tok(TokenKind::Operator, "&&"),
                tok(TokenKind::Identifier, "c"),
                tok(TokenKind::Operator, "??"),
                tok(TokenKind::Identifier, "d"),
                tok(TokenKind::Operator, "=="),
                tok(TokenKind::Identifier, "e"),
            ]
        );
    }

    #[test]
    fn extended_comparisons() {
        assert_eq!(
            significant("<= >= != !"),
            vec![
                tok(TokenKind::Operator, "<="),
                tok(TokenKind::Operator, ">="),
                tok(TokenKind::Operator, "!="),
                tok(TokenKind::Operator, "!"),
            ]
        );
    }

    #[test]
    fn tilde_operators() {
        assert_eq!(significant("~^"), vec![tok(TokenKind::Operator, "~^")]);
        assert_eq!(significant("~<"), vec![tok(TokenKind::Operator, "~<")]);
        assert_eq!(
            significant("~x"),
            vec![tok(TokenKind::Plain, "~"), tok(TokenKind::Identifier, "x")]
        );
    }

    #[test]
    fn member_access_and_calls() {
        assert_eq!(
            significant("user.name(a, 2)"),
            vec![
                tok(TokenKind::Identifier, "user"),
                tok(TokenKind::Punctuation, "."),
                tok(TokenKind::Identifier, "name"),
                tok(TokenKind::Punctuation, "("),
                tok(TokenKind::Identifier, "a"),
                tok(TokenKind::Punctuation, ","),
                tok(TokenKind::Number, "2"),
                tok(TokenKind::Punctuation, ")"),
            ]
        );
    }

    #[test]
    fn unknown_characters_are_plain() {
        assert_eq!(
            significant("= | $"),
            vec![
                tok(TokenKind::Plain, "="),
                tok(TokenKind::Plain, "|"),
                tok(TokenKind::Plain, "$"),
            ]
        );
    }

    #[test]
    fn covers_whole_input() {
        let input = "items[0].price * 1.2 ~? 'x y' #";
        let joined: String = tokenize_expression(input)
            .iter()
            .map(|t| t.text.as_str())
            .collect();
        assert_eq!(joined, input);
    }
}
