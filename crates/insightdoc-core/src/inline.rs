//! Strong-emphasis splitting for display text.
//!
//! Assistant text only uses `**bold**` for emphasis, and bold spans carry
//! meaning (titles, key terms), so they are kept as separate runs instead of
//! being flattened. A strong run is `**` + one or more non-`*` bytes + `**`,
//! found leftmost-first; everything else is plain text.
//!
//! Runs carry spans relative to the string they were split from, so they
//! work for borrowed input lines and for owned, joined strings alike.

use std::borrow::Cow;

use memchr::memchr;

use crate::span::Span;

/// Kind of an inline run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InlineKind {
    /// Plain text.
    Text,
    /// `**strong**` text; the span includes both marker pairs.
    Strong,
}

/// A run of inline text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Inline {
    pub kind: InlineKind,
    /// Byte span in the source string, markers included.
    pub span: Span,
}

impl Inline {
    /// The display text of this run within `source`, without markers.
    pub fn content<'s>(&self, source: &'s str) -> &'s str {
        let raw = self.span.slice(source);
        match self.kind {
            InlineKind::Text => raw,
            InlineKind::Strong => raw
                .strip_prefix("**")
                .and_then(|s| s.strip_suffix("**"))
                .unwrap_or(raw),
        }
    }

    #[inline]
    pub fn is_strong(&self) -> bool {
        self.kind == InlineKind::Strong
    }
}

/// Split `text` into text and strong runs, in order.
///
/// Empty text yields no runs and text runs are never empty.
///
/// ```rust
/// use insightdoc_core::inline::{parse_inlines, InlineKind};
///
/// let text = "Focus on **mornings** first";
/// let runs = parse_inlines(text);
/// assert_eq!(runs.len(), 3);
/// assert_eq!(runs[1].kind, InlineKind::Strong);
/// assert_eq!(runs[1].content(text), "mornings");
/// ```
pub fn parse_inlines(text: &str) -> Vec<Inline> {
    if text.is_empty() {
        return Vec::new();
    }

    let mut parser = InlineParser::new(text);
    parser.parse()
}

/// Remove the markers of every strong run, keeping the inner text.
///
/// Borrows when `text` has no strong run.
pub fn strip_emphasis(text: &str) -> Cow<'_, str> {
    let runs = parse_inlines(text);
    if !runs.iter().any(Inline::is_strong) {
        return Cow::Borrowed(text);
    }

    let mut out = String::with_capacity(text.len());
    for run in &runs {
        out.push_str(run.content(text));
    }
    Cow::Owned(out)
}

struct InlineParser<'a> {
    bytes: &'a [u8],
    pos: usize,
}

impl<'a> InlineParser<'a> {
    #[inline]
    fn new(text: &'a str) -> Self {
        Self {
            bytes: text.as_bytes(),
            pos: 0,
        }
    }

    fn parse(&mut self) -> Vec<Inline> {
        let mut inlines = Vec::with_capacity(4);
        let mut text_start = 0;

        while self.pos < self.bytes.len() {
            let Some(offset) = memchr(b'*', &self.bytes[self.pos..]) else {
                break;
            };
            self.pos += offset;

            match self.strong_end() {
                Some(end) => {
                    if text_start < self.pos {
                        inlines.push(run(InlineKind::Text, text_start, self.pos));
                    }
                    inlines.push(run(InlineKind::Strong, self.pos, end));
                    self.pos = end;
                    text_start = end;
                }
                None => self.pos += 1,
            }
        }

        if text_start < self.bytes.len() {
            inlines.push(run(InlineKind::Text, text_start, self.bytes.len()));
        }

        inlines
    }

    /// End offset of a strong run opening at `self.pos`, if there is one.
    #[inline]
    fn strong_end(&self) -> Option<usize> {
        let open = self.pos;
        if self.bytes.get(open + 1) != Some(&b'*') {
            return None;
        }

        let content_start = open + 2;
        let close = content_start + memchr(b'*', self.bytes.get(content_start..)?)?;
        if close == content_start || self.bytes.get(close + 1) != Some(&b'*') {
            return None;
        }
        Some(close + 2)
    }
}

#[inline(always)]
fn run(kind: InlineKind, start: usize, end: usize) -> Inline {
    Inline {
        kind,
        span: Span::new(start as u32, end as u32),
    }
}
