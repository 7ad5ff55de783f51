// src/parser.rs
use std::borrow::Cow;

use crate::errors::{Diagnostic, QueryError};

/// Byte cursor over a query string.
///
/// Positions are byte offsets. Every byte at or above 0x80 counts as a name
/// character, so identifiers and quoted names always start and end on ASCII
/// delimiters and slices taken between them are valid UTF-8.
pub struct Parser<'q> {
    s: &'q str,
    i: usize,
    line: usize,
}

impl<'q> Parser<'q> {
    pub fn new(s: &'q str) -> Self {
        Self { s, i: 0, line: 1 }
    }

    pub fn pos(&self) -> usize {
        self.i
    }

    pub fn peek(&self) -> Option<u8> {
        self.s.as_bytes().get(self.i).copied()
    }

    pub fn peek_next(&self) -> Option<u8> {
        self.s.as_bytes().get(self.i + 1).copied()
    }

    /// Consumes and returns the current byte.
    pub fn advance(&mut self) -> Option<u8> {
        let c = self.peek()?;
        self.i += 1;
        Some(c)
    }

    /// Steps back over the byte consumed last, so a report can point at it.
    pub fn rewind(&mut self) {
        self.i = self.i.saturating_sub(1);
    }

    pub fn consume_char(&mut self, c: u8) -> bool {
        if self.peek() == Some(c) {
            self.i += 1;
            true
        } else {
            false
        }
    }

    pub fn eat_while(&mut self, pred: impl Fn(u8) -> bool) {
        while self.peek().is_some_and(&pred) {
            self.i += 1;
        }
    }

    pub fn skip_ws(&mut self) {
        while let Some(c) = self.peek() {
            if !is_whitespace(c) {
                break;
            }
            if c == b'\n' {
                self.line += 1;
            }
            self.i += 1;
        }
    }

    pub fn eof(&self) -> bool {
        self.i >= self.s.len()
    }

    /// Text between `start` and the cursor.
    pub fn lexeme(&self, start: usize) -> Cow<'q, str> {
        let bytes = self.s.as_bytes();
        String::from_utf8_lossy(&bytes[start.min(self.i)..self.i])
    }

    /// Consumes the longest numeral at the cursor.
    ///
    /// Accepts `-?(digits[.digits*]|.digits)([eE][+-]?digits)?`. Returns
    /// `Ok(None)` without moving when no numeral starts here; a literal whose
    /// magnitude overflows `f64` is a value error pointing at its first byte.
    pub fn match_number(&mut self) -> Result<Option<f64>, QueryError> {
        let bytes = self.s.as_bytes();
        let digits_from = |from: usize| bytes[from.min(bytes.len())..]
            .iter()
            .take_while(|b| b.is_ascii_digit())
            .count();

        let start = self.i;
        let mut end = start;
        if bytes.get(end) == Some(&b'-') {
            end += 1;
        }
        let int_digits = digits_from(end);
        end += int_digits;
        let mut frac_digits = 0;
        if bytes.get(end) == Some(&b'.') {
            frac_digits = digits_from(end + 1);
            if int_digits + frac_digits > 0 {
                end += 1 + frac_digits;
            }
        }
        if int_digits + frac_digits == 0 {
            return Ok(None);
        }
        if matches!(bytes.get(end), Some(b'e' | b'E')) {
            let mut exp = end + 1;
            if matches!(bytes.get(exp), Some(b'+' | b'-')) {
                exp += 1;
            }
            let exp_digits = digits_from(exp);
            if exp_digits > 0 {
                end = exp + exp_digits;
            }
        }

        let literal = std::str::from_utf8(&bytes[start..end])
            .map_err(|_| self.syntax_error("malformed number"))?;
        let number: f64 = literal
            .parse()
            .map_err(|_| self.syntax_error(format!("malformed number {literal}")))?;
        if number.is_infinite() {
            return Err(self.value_error("number out of range"));
        }
        self.i = end;
        Ok(Some(number))
    }

    pub fn syntax_error(&self, msg: impl Into<String>) -> QueryError {
        QueryError::Syntax(self.diagnostic(msg.into()))
    }

    pub fn value_error(&self, msg: impl Into<String>) -> QueryError {
        QueryError::Value(self.diagnostic(msg.into()))
    }

    /// Value error reported at an earlier byte than the cursor.
    pub fn value_error_at(&self, position: usize, msg: impl Into<String>) -> QueryError {
        let mut diagnostic = self.diagnostic(msg.into());
        diagnostic.position = position.min(self.i);
        QueryError::Value(diagnostic)
    }

    fn diagnostic(&self, message: String) -> Diagnostic {
        Diagnostic {
            message,
            position: self.i,
            line: self.line,
            query: self.s.to_string(),
        }
    }
}

pub fn is_whitespace(c: u8) -> bool {
    matches!(c, b' ' | b'\n' | b'\t' | b'\r')
}

/// First byte of a member name or function name.
pub fn is_name_first(c: u8) -> bool {
    c.is_ascii_alphabetic() || c == b'_' || c >= 0x80
}

pub fn is_name_char(c: u8) -> bool {
    is_name_first(c) || c.is_ascii_digit()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn number(src: &str) -> (Option<f64>, usize) {
        let mut p = Parser::new(src);
        let n = p.match_number().unwrap();
        (n, p.pos())
    }

    #[test]
    fn numerals_take_the_longest_prefix() {
        assert_eq!(number("12+3"), (Some(12.0), 2));
        assert_eq!(number("-4.5]"), (Some(-4.5), 4));
        assert_eq!(number(".25"), (Some(0.25), 3));
        assert_eq!(number("7."), (Some(7.0), 2));
        assert_eq!(number("1e3x"), (Some(1000.0), 3));
        assert_eq!(number("2E-2"), (Some(0.02), 4));
    }

    #[test]
    fn dangling_exponent_is_left_unconsumed() {
        assert_eq!(number("1e"), (Some(1.0), 1));
        assert_eq!(number("3e+"), (Some(3.0), 1));
    }

    #[test]
    fn non_numerals_leave_the_cursor_alone() {
        assert_eq!(number("- 10"), (None, 0));
        assert_eq!(number("-"), (None, 0));
        assert_eq!(number("."), (None, 0));
        assert_eq!(number("-.x"), (None, 0));
        assert_eq!(number("abc"), (None, 0));
        assert_eq!(number("inf"), (None, 0));
        assert_eq!(number(""), (None, 0));
    }

    #[test]
    fn overflowing_numeral_is_a_value_error() {
        let mut p = Parser::new("1e400");
        let err = p.match_number().unwrap_err();
        assert!(!err.is_syntax());
        assert_eq!(err.message(), "number out of range");
        assert_eq!(err.position(), 0);
    }

    #[test]
    fn skip_ws_counts_lines() {
        let mut p = Parser::new(" \n\t\r\n x");
        p.skip_ws();
        assert_eq!(p.peek(), Some(b'x'));
        assert_eq!(p.pos(), 6);
        assert_eq!(p.syntax_error("here").diagnostic().line, 3);
    }

    #[test]
    fn lookahead_and_rewind() {
        let mut p = Parser::new("ab");
        assert_eq!(p.peek_next(), Some(b'b'));
        assert_eq!(p.advance(), Some(b'a'));
        assert!(p.consume_char(b'b'));
        assert!(p.eof());
        assert_eq!(p.advance(), None);
        assert_eq!(p.peek_next(), None);
        p.rewind();
        assert_eq!(p.peek(), Some(b'b'));
    }

    #[test]
    fn lexeme_keeps_multibyte_names_whole() {
        let mut p = Parser::new("⭐.x");
        p.eat_while(is_name_char);
        assert_eq!(p.lexeme(0), "⭐");
        assert_eq!(p.peek(), Some(b'.'));
    }
}
