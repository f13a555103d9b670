use crate::span::Span;
use std::fmt;

/// Categories of soft failures noticed while parsing.
///
/// None of these stop a parse; they explain why the output differs from a
/// line-for-line reading of the input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DiagnosticKind {
    /// A `---` line was discarded.
    SeparatorDropped,
    /// Content arrived before any heading and an implicit section was opened.
    ImplicitSection,
    /// A section ended up with no items and was removed.
    EmptySectionDropped,
    /// A line outside any recommendation item was ignored.
    OrphanLine,
    /// No anchor line was found; the message was rendered line by line.
    NoAnchors,
    /// A list was still open at end of input and was closed there.
    UnclosedList,
}

impl DiagnosticKind {
    pub const fn as_str(self) -> &'static str {
        match self {
            DiagnosticKind::SeparatorDropped => "separator-dropped",
            DiagnosticKind::ImplicitSection => "implicit-section",
            DiagnosticKind::EmptySectionDropped => "empty-section-dropped",
            DiagnosticKind::OrphanLine => "orphan-line",
            DiagnosticKind::NoAnchors => "no-anchors",
            DiagnosticKind::UnclosedList => "unclosed-list",
        }
    }
}

/// A non-fatal note attached to a parse.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    pub kind: DiagnosticKind,
    /// Human-readable message.
    pub message: String,
    /// Zero-based line number, when the note is about one line.
    pub line: Option<usize>,
    /// Source location in the input.
    pub span: Option<Span>,
}

impl Diagnostic {
    pub fn new(kind: DiagnosticKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            line: None,
            span: None,
        }
    }

    /// Attach the line this note is about.
    pub fn at_line(mut self, line: usize, span: Span) -> Self {
        self.line = Some(line);
        self.span = Some(span);
        self
    }

    pub fn separator_dropped(line: usize, span: Span) -> Self {
        Self::new(DiagnosticKind::SeparatorDropped, "separator line dropped").at_line(line, span)
    }

    pub fn implicit_section(title: &str, line: usize, span: Span) -> Self {
        Self::new(
            DiagnosticKind::ImplicitSection,
            format!("content before first heading placed in implicit '{}' section", title),
        )
        .at_line(line, span)
    }

    pub fn empty_section_dropped(title: &str, span: Span) -> Self {
        Self {
            span: Some(span),
            ..Self::new(
                DiagnosticKind::EmptySectionDropped,
                format!("section '{}' has no items and was dropped", title),
            )
        }
    }

    pub fn orphan_line(line: usize, span: Span) -> Self {
        Self::new(
            DiagnosticKind::OrphanLine,
            "line outside any recommendation item ignored",
        )
        .at_line(line, span)
    }

    pub fn no_anchors() -> Self {
        Self::new(
            DiagnosticKind::NoAnchors,
            "no anchor lines found, rendered line by line",
        )
    }

    pub fn unclosed_list(items: usize, span: Span) -> Self {
        Self {
            span: Some(span),
            ..Self::new(
                DiagnosticKind::UnclosedList,
                format!("list of {} item(s) closed at end of input", items),
            )
        }
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.kind.as_str(), self.message)?;
        if let Some(line) = self.line {
            write!(f, " (line {})", line + 1)?;
        } else if let Some(span) = self.span {
            write!(f, " at bytes {}..{}", span.start, span.end)?;
        }
        Ok(())
    }
}

/// Diagnostics collected during one parse.
#[derive(Debug, Clone, Default)]
pub struct Diagnostics {
    diagnostics: Vec<Diagnostic>,
    /// When unset, `push` is a no-op.
    enabled: bool,
}

impl Diagnostics {
    /// Create an empty, recording collection.
    pub fn new() -> Self {
        Self {
            diagnostics: Vec::new(),
            enabled: true,
        }
    }

    /// A collection that drops everything pushed to it.
    pub fn disabled() -> Self {
        Self::default()
    }

    pub fn push(&mut self, diagnostic: Diagnostic) {
        if self.enabled {
            self.diagnostics.push(diagnostic);
        }
    }

    pub fn is_empty(&self) -> bool {
        self.diagnostics.is_empty()
    }

    pub fn len(&self) -> usize {
        self.diagnostics.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Diagnostic> {
        self.diagnostics.iter()
    }

    /// Count the diagnostics of one kind.
    pub fn count(&self, kind: DiagnosticKind) -> usize {
        self.diagnostics.iter().filter(|d| d.kind == kind).count()
    }
}

impl IntoIterator for Diagnostics {
    type Item = Diagnostic;
    type IntoIter = std::vec::IntoIter<Diagnostic>;

    fn into_iter(self) -> Self::IntoIter {
        self.diagnostics.into_iter()
    }
}

/// Error returned when a profile name is not recognized.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownProfile {
    pub name: String,
}

impl fmt::Display for UnknownProfile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "unknown profile '{}' (expected insights, recommendations or message)",
            self.name
        )
    }
}

impl std::error::Error for UnknownProfile {}
