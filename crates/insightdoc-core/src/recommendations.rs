//! Recommendations profile: numbered items with titled sub-sections.
//!
//! ```text
//! 1. **Improve Focus**                      -> item 1 "Improve Focus"
//! * **Action:** Block calendar mornings.    ->   section "Action"
//! Also silence notifications.               ->     appended to "Action"
//! 2. **Track Skills**                       -> item 2 "Track Skills"
//! Review weekly.                            ->   untitled section
//! ```
//!
//! An item starts at `n. **Title**` (a heading marker in front is allowed) or
//! at an enumerated heading such as `### 2. Title`. Only one item is open at a
//! time; starting the next one commits it.

use crate::ast::{CowStr, RecItemSection, RecommendationItem};
use crate::classify::{classify, is_separator, LineKind};
use crate::error::{Diagnostic, Diagnostics};
use crate::inline::strip_emphasis;
use crate::lexer::{Lexer, Line};

/// Parse recommendation text into items.
pub fn parse(input: &str) -> Vec<RecommendationItem<'_>> {
    parse_with(input, &mut Diagnostics::disabled())
}

/// Parse recommendation text, or `None` when no item was found.
///
/// Callers use `None` to fall back to showing the raw text.
///
/// ```rust
/// use insightdoc_core::recommendations;
///
/// assert!(recommendations::try_parse("Just rest this week.").is_none());
/// let items = recommendations::try_parse("1. **Rest**\nTake Friday off.").unwrap();
/// assert_eq!(items[0].title, "Rest");
/// ```
pub fn try_parse(input: &str) -> Option<Vec<RecommendationItem<'_>>> {
    let items = parse(input);
    (!items.is_empty()).then_some(items)
}

/// Parse recommendation text, recording diagnostics.
pub fn parse_with<'a>(
    input: &'a str,
    diagnostics: &mut Diagnostics,
) -> Vec<RecommendationItem<'a>> {
    let mut state = RecommendationsState::default();
    for line in Lexer::new(input) {
        state.feed(line, diagnostics);
    }
    let items = state.finish();
    tracing::debug!(items = items.len(), "parsed recommendations");
    items
}

#[derive(Default)]
struct RecommendationsState<'a> {
    items: Vec<RecommendationItem<'a>>,
    current_item: Option<RecommendationItem<'a>>,
    /// Index of the open titled section within `current_item.sections`.
    current_section: Option<usize>,
}

impl<'a> RecommendationsState<'a> {
    fn feed(&mut self, line: Line<'a>, diagnostics: &mut Diagnostics) {
        let text = line.trimmed();
        if text.is_empty() {
            return;
        }
        let span = line.trimmed_span();
        let kind = classify(text);

        match kind {
            LineKind::NumberedBoldHeading {
                number,
                title,
                rest,
            } => {
                self.open_item(CowStr::Borrowed(number), title, &line);
                if !rest.is_empty() {
                    self.push_untitled(strip_emphasis(rest), &line);
                }
                return;
            }
            LineKind::Heading {
                number: Some(number),
                text: title,
                ..
            } => {
                self.open_item(CowStr::Borrowed(number), title, &line);
                return;
            }
            _ => {}
        }

        let Some(item) = self.current_item.as_mut() else {
            if is_separator(text) {
                diagnostics.push(Diagnostic::separator_dropped(line.number, span));
            } else {
                diagnostics.push(Diagnostic::orphan_line(line.number, span));
            }
            return;
        };

        if let LineKind::BulletWithTitle { title, rest } = kind {
            let mut content = Vec::new();
            if !rest.is_empty() {
                content.push(strip_emphasis(rest));
            }
            item.sections.push(RecItemSection {
                title: Some(title),
                content,
                span,
            });
            item.span = item.span.merge(span);
            self.current_section = Some(item.sections.len() - 1);
            return;
        }

        if is_separator(text) {
            diagnostics.push(Diagnostic::separator_dropped(line.number, span));
            return;
        }

        let body = kind.body_text();
        match self.current_section.and_then(|idx| item.sections.get_mut(idx)) {
            Some(section) => {
                section.content.push(body);
                section.span = section.span.merge(span);
                item.span = item.span.merge(span);
            }
            None => self.push_untitled(body, &line),
        }
    }

    fn open_item(&mut self, number: CowStr<'a>, title: CowStr<'a>, line: &Line<'a>) {
        self.commit_item();
        self.current_item = Some(RecommendationItem {
            number,
            title,
            sections: Vec::new(),
            span: line.trimmed_span(),
        });
    }

    /// Add a one-line paragraph to the open item. It does not become the
    /// open section.
    fn push_untitled(&mut self, content: CowStr<'a>, line: &Line<'a>) {
        let span = line.trimmed_span();
        if let Some(item) = self.current_item.as_mut() {
            item.sections.push(RecItemSection {
                title: None,
                content: vec![content],
                span,
            });
            item.span = item.span.merge(span);
        }
    }

    fn commit_item(&mut self) {
        self.current_section = None;
        if let Some(item) = self.current_item.take() {
            self.items.push(item);
        }
    }

    fn finish(mut self) -> Vec<RecommendationItem<'a>> {
        self.commit_item();
        self.items
    }
}
