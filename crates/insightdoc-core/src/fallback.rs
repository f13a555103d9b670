//! Line-by-line rendering for messages without anchor lines.
//!
//! Unlike the other profiles this pass keeps blank lines (as spacers) and
//! only coalesces consecutive list lines of the same kind:
//!
//! ```text
//! ### Update        -> Heading "Update"
//! - Did X           -> BulletList ["Did X", "Did Y"]
//! - Did Y
//!                   -> Spacer
//! All good.         -> Paragraph "All good."
//! ```

use crate::ast::{FallbackElement, HeadingElement, ListElement, RichText, TextElement};
use crate::classify::{bullet_body, enumeration, heading_level};
use crate::error::{Diagnostic, Diagnostics};
use crate::inline::strip_emphasis;
use crate::lexer::{Lexer, Line};
use crate::span::Span;

/// Leading glyphs that turn a line into a callout.
pub const CALLOUT_GLYPHS: &[char] = &['⚠', '💡', '✨', '🎯', '📌', '🔍'];

/// Render `input` as a flat list of elements.
pub fn parse(input: &str) -> Vec<FallbackElement<'_>> {
    parse_with(input, &mut Diagnostics::disabled())
}

/// Render `input`, recording diagnostics.
pub fn parse_with<'a>(input: &'a str, diagnostics: &mut Diagnostics) -> Vec<FallbackElement<'a>> {
    let mut state = FallbackState::default();
    for line in Lexer::new(input) {
        state.feed(line);
    }
    let elements = state.finish(diagnostics);
    tracing::debug!(elements = elements.len(), "rendered message line by line");
    elements
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ListKind {
    Bullet,
    Numbered,
}

struct OpenList<'a> {
    kind: ListKind,
    items: Vec<RichText<'a>>,
    span: Span,
}

#[derive(Default)]
struct FallbackState<'a> {
    elements: Vec<FallbackElement<'a>>,
    list: Option<OpenList<'a>>,
}

impl<'a> FallbackState<'a> {
    fn feed(&mut self, line: Line<'a>) {
        let text = line.trimmed();
        let span = line.trimmed_span();

        if text.is_empty() {
            self.flush();
            self.elements.push(FallbackElement::Spacer(line.span));
            return;
        }

        if let Some(heading) = heading_text(text) {
            self.flush();
            self.elements.push(FallbackElement::Heading(HeadingElement {
                text: strip_emphasis(heading),
                span,
            }));
            return;
        }

        if let Some(body) = bullet_body(text) {
            self.push_item(ListKind::Bullet, body, span);
            return;
        }

        if let Some((_, body)) = enumeration(text, true) {
            self.push_item(ListKind::Numbered, body, span);
            return;
        }

        self.flush();
        let content = TextElement {
            content: RichText::new(text),
            span,
        };
        if text.starts_with(CALLOUT_GLYPHS) {
            self.elements.push(FallbackElement::Callout(content));
        } else {
            self.elements.push(FallbackElement::Paragraph(content));
        }
    }

    /// Append to the open list, closing it first when its kind differs.
    fn push_item(&mut self, kind: ListKind, body: &'a str, span: Span) {
        if self.list.as_ref().is_some_and(|list| list.kind != kind) {
            self.flush();
        }
        match self.list.as_mut() {
            Some(list) => {
                list.items.push(RichText::new(body));
                list.span = list.span.merge(span);
            }
            None => {
                self.list = Some(OpenList {
                    kind,
                    items: vec![RichText::new(body)],
                    span,
                });
            }
        }
    }

    fn flush(&mut self) {
        let Some(list) = self.list.take() else {
            return;
        };
        let element = ListElement {
            items: list.items,
            span: list.span,
        };
        self.elements.push(match list.kind {
            ListKind::Bullet => FallbackElement::BulletList(element),
            ListKind::Numbered => FallbackElement::NumberedList(element),
        });
    }

    fn finish(mut self, diagnostics: &mut Diagnostics) -> Vec<FallbackElement<'a>> {
        if let Some(list) = &self.list {
            diagnostics.push(Diagnostic::unclosed_list(list.items.len(), list.span));
        }
        self.flush();
        self.elements
    }
}

/// Heading text of `#`..`###` lines and of lines that are a single bold run,
/// such as `**Next steps:**`.
fn heading_text(line: &str) -> Option<&str> {
    if let Some((_, text)) = heading_level(line, 3) {
        let text = unwrap_bold(text);
        return (!text.is_empty()).then_some(text);
    }

    let inner = line.trim_end_matches(':').strip_prefix("**")?.strip_suffix("**")?;
    let inner = inner.trim_end_matches(':').trim();
    if inner.is_empty() || inner.contains("**") {
        return None;
    }
    Some(inner)
}

/// Unwrap a heading that is one bold run, allowing up to two colons after it.
fn unwrap_bold(text: &str) -> &str {
    let text = text.trim_end();
    let closed = text
        .strip_suffix("::")
        .or_else(|| text.strip_suffix(':'))
        .unwrap_or(text);
    match closed.strip_prefix("**").and_then(|inner| inner.strip_suffix("**")) {
        Some(inner) if !inner.contains("**") => inner.trim(),
        _ => text,
    }
}
