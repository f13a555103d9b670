//! Insights profile: heading-delimited analysis sections.
//!
//! ```text
//! #### 1. Productivity Patterns            -> Section "Productivity Patterns"
//! * **Morning Focus:** 70% before noon.    ->   BulletItem "Morning Focus"
//! Keep mornings meeting-free.              ->     appended to the bullet
//! ```
//!
//! Blank lines and `---` separators carry no structure here and are skipped.
//! Lines seen before any heading go into an implicit "Summary" section, and
//! sections that end up empty are removed.

use crate::ast::{BulletItem, CowStr, Section, SectionItem, TextItem};
use crate::classify::{classify, is_separator, LineKind};
use crate::error::{Diagnostic, Diagnostics};
use crate::inline::strip_emphasis;
use crate::lexer::{content_lines, Line};
use crate::span::Span;

/// Title of the section opened for content that precedes every heading.
pub const IMPLICIT_SECTION_TITLE: &str = "Summary";

/// Parse insight text into sections.
///
/// ```rust
/// use insightdoc_core::insights;
///
/// let sections = insights::parse("## Strengths\nConsistent daily hours.");
/// assert_eq!(sections.len(), 1);
/// assert_eq!(sections[0].title, "Strengths");
/// ```
pub fn parse(input: &str) -> Vec<Section<'_>> {
    parse_with(input, &mut Diagnostics::disabled())
}

/// Parse insight text, recording diagnostics.
pub fn parse_with<'a>(input: &'a str, diagnostics: &mut Diagnostics) -> Vec<Section<'a>> {
    let mut state = InsightsState::default();
    for line in content_lines(input) {
        state.feed(line, diagnostics);
    }
    let sections = state.finish(diagnostics);
    tracing::debug!(sections = sections.len(), "parsed insights");
    sections
}

#[derive(Default)]
struct InsightsState<'a> {
    sections: Vec<Section<'a>>,
    current_section: Option<Section<'a>>,
    current_subsection: Option<BulletItem<'a>>,
}

impl<'a> InsightsState<'a> {
    fn feed(&mut self, line: Line<'a>, diagnostics: &mut Diagnostics) {
        let text = line.trimmed();
        let span = line.trimmed_span();

        if is_separator(text) {
            diagnostics.push(Diagnostic::separator_dropped(line.number, span));
            return;
        }

        match classify(text) {
            LineKind::Heading { text: title, .. } => self.open_section(title, span),
            LineKind::NumberedBoldHeading { title, rest, .. } => {
                self.open_section(title, span);
                if !rest.is_empty() {
                    self.append(strip_emphasis(rest), &line, diagnostics);
                }
            }
            LineKind::BulletWithTitle { title, rest } => {
                self.ensure_open_section(&line, diagnostics);
                self.close_subsection();
                let mut content = Vec::new();
                if !rest.is_empty() {
                    content.push(strip_emphasis(rest));
                }
                self.current_subsection = Some(BulletItem {
                    title,
                    content,
                    span,
                });
            }
            other => self.append(other.body_text(), &line, diagnostics),
        }
    }

    /// Commit the open section and start a new one.
    fn open_section(&mut self, title: CowStr<'a>, span: Span) {
        self.close_section();
        self.current_section = Some(Section {
            title,
            items: Vec::new(),
            span,
        });
    }

    /// Open the implicit section when no section is open yet.
    fn ensure_open_section(&mut self, line: &Line<'a>, diagnostics: &mut Diagnostics) {
        if self.current_section.is_some() {
            return;
        }
        let span = line.trimmed_span();
        diagnostics.push(Diagnostic::implicit_section(
            IMPLICIT_SECTION_TITLE,
            line.number,
            span,
        ));
        self.current_section = Some(Section {
            title: CowStr::Borrowed(IMPLICIT_SECTION_TITLE),
            items: Vec::new(),
            span,
        });
    }

    /// Add body text to the open bullet, or as a text item of the section.
    fn append(&mut self, content: CowStr<'a>, line: &Line<'a>, diagnostics: &mut Diagnostics) {
        let span = line.trimmed_span();
        if let Some(bullet) = self.current_subsection.as_mut() {
            bullet.content.push(content);
            bullet.span = bullet.span.merge(span);
            return;
        }

        self.ensure_open_section(line, diagnostics);
        if let Some(section) = self.current_section.as_mut() {
            section.items.push(SectionItem::Text(TextItem { content, span }));
        }
    }

    fn close_subsection(&mut self) {
        let Some(bullet) = self.current_subsection.take() else {
            return;
        };
        if let Some(section) = self.current_section.as_mut() {
            section.items.push(SectionItem::Bullet(bullet));
        }
    }

    fn close_section(&mut self) {
        self.close_subsection();
        if let Some(section) = self.current_section.take() {
            self.sections.push(section);
        }
    }

    fn finish(mut self, diagnostics: &mut Diagnostics) -> Vec<Section<'a>> {
        self.close_section();
        self.sections.retain(|section| {
            if section.items.is_empty() {
                diagnostics.push(Diagnostic::empty_section_dropped(
                    &section.title,
                    section.span,
                ));
                return false;
            }
            true
        });
        self.sections
    }
}
