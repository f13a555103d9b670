//! Line splitter shared by every profile.
//!
//! All three parsers are single forward passes over lines, so the lexer is
//! just an iterator of [`Line`]s. Newlines are found with `memchr`, and each
//! line borrows straight from the input.
//!
//! The input is split on `\n` with a trailing `\r` removed. A final newline
//! does not produce an extra empty line, and empty input produces no lines.

use crate::span::Span;
use memchr::memchr;

/// A single line of input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Line<'a> {
    /// The line text, without its newline.
    pub text: &'a str,
    /// Byte span of `text` in the input.
    pub span: Span,
    /// Zero-based line number.
    pub number: usize,
}

impl<'a> Line<'a> {
    /// Check if this line is empty once trimmed.
    #[inline(always)]
    pub fn is_blank(&self) -> bool {
        self.trimmed().is_empty()
    }

    /// The line text with surrounding whitespace and byte-order marks removed.
    #[inline(always)]
    pub fn trimmed(&self) -> &'a str {
        self.text.trim_matches(is_trimmable)
    }

    /// Span of [`Line::trimmed`] in the input.
    pub fn trimmed_span(&self) -> Span {
        let trimmed = self.trimmed();
        if trimmed.is_empty() {
            return Span::new(self.span.start, self.span.start);
        }
        let lead = self.text.len() - self.text.trim_start_matches(is_trimmable).len();
        Span::new(0, trimmed.len() as u32).offset_by(self.span.start + lead as u32)
    }
}

#[inline(always)]
fn is_trimmable(c: char) -> bool {
    c.is_whitespace() || c == '\u{feff}'
}

/// Iterator over the lines of an input string.
pub struct Lexer<'a> {
    input: &'a str,
    bytes: &'a [u8],
    /// Current byte offset.
    offset: usize,
    /// Number of the next line to be read.
    number: usize,
}

impl<'a> Lexer<'a> {
    #[inline]
    pub fn new(input: &'a str) -> Self {
        Self {
            input,
            bytes: input.as_bytes(),
            offset: 0,
            number: 0,
        }
    }

    /// Check if all input has been consumed.
    #[inline(always)]
    pub fn is_eof(&self) -> bool {
        self.offset >= self.bytes.len()
    }

    /// Consume and return the next line, or `None` at end of input.
    #[inline]
    pub fn next_line(&mut self) -> Option<Line<'a>> {
        if self.is_eof() {
            return None;
        }

        let start = self.offset;
        let end = match memchr(b'\n', &self.bytes[start..]) {
            Some(pos) => start + pos,
            None => self.bytes.len(),
        };

        // CRLF: drop the carriage return as well
        let text_end = if end > start && self.bytes[end - 1] == b'\r' {
            end - 1
        } else {
            end
        };

        self.offset = if end < self.bytes.len() { end + 1 } else { end };

        let line = Line {
            // `\n` and `\r` are ASCII, so both ends sit on char boundaries.
            text: &self.input[start..text_end],
            span: Span::new(start as u32, text_end as u32),
            number: self.number,
        };
        self.number += 1;
        Some(line)
    }
}

impl<'a> Iterator for Lexer<'a> {
    type Item = Line<'a>;

    #[inline]
    fn next(&mut self) -> Option<Line<'a>> {
        self.next_line()
    }
}

/// Collect the lines of `input` that are not blank.
pub fn content_lines(input: &str) -> Vec<Line<'_>> {
    Lexer::new(input).filter(|line| !line.is_blank()).collect()
}
