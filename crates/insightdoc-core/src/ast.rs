//! Document types produced by the parsers.
//!
//! Each profile has its own tree:
//!
//! - **Insights**: [`Section`]s holding [`SectionItem`]s
//! - **Recommendations**: [`RecommendationItem`]s holding [`RecItemSection`]s
//! - **Message**: a [`Message`], which is either a [`StructuredMessage`] or a
//!   list of [`FallbackElement`]s, never both
//!
//! Text fields use [`CowStr`] and borrow from the input whenever the parser did
//! not have to rewrite the text (stripping emphasis, joining lines).

use crate::inline::Inline;
use crate::span::Span;

/// Borrowed or owned string type for zero-copy parsing.
pub type CowStr<'a> = std::borrow::Cow<'a, str>;

/// Parsing profile, one per kind of assistant response.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Profile {
    /// Heading-delimited analysis sections.
    Insights,
    /// Numbered recommendation items.
    Recommendations,
    /// Chat message: structured overview when anchors are present,
    /// generic line rendering otherwise.
    Message,
}

impl Profile {
    pub const ALL: [Profile; 3] = [Profile::Insights, Profile::Recommendations, Profile::Message];

    pub const fn as_str(self) -> &'static str {
        match self {
            Profile::Insights => "insights",
            Profile::Recommendations => "recommendations",
            Profile::Message => "message",
        }
    }
}

/// A parsed document, tagged by the profile that produced it.
#[derive(Debug, Clone, PartialEq)]
pub enum Document<'a> {
    Insights(Vec<Section<'a>>),
    Recommendations(Vec<RecommendationItem<'a>>),
    Message(Message<'a>),
}

impl<'a> Document<'a> {
    /// The profile that produced this document.
    pub fn profile(&self) -> Profile {
        match self {
            Document::Insights(_) => Profile::Insights,
            Document::Recommendations(_) => Profile::Recommendations,
            Document::Message(_) => Profile::Message,
        }
    }

    /// Check if nothing was parsed.
    ///
    /// A structured message is never empty: it only exists when an anchor
    /// line was found.
    pub fn is_empty(&self) -> bool {
        match self {
            Document::Insights(sections) => sections.is_empty(),
            Document::Recommendations(items) => items.is_empty(),
            Document::Message(Message::Structured(_)) => false,
            Document::Message(Message::Lines(elements)) => elements.is_empty(),
        }
    }
}

// ============================================================================
// Insights
// ============================================================================

/// A titled group of items. Never empty once parsing is done.
#[derive(Debug, Clone, PartialEq)]
pub struct Section<'a> {
    pub title: CowStr<'a>,
    pub items: Vec<SectionItem<'a>>,
    /// Span of the heading line, or of the first item for an implicit section.
    pub span: Span,
}

/// Content of a [`Section`].
#[derive(Debug, Clone, PartialEq)]
pub enum SectionItem<'a> {
    /// A bold-titled bullet and the lines that followed it.
    Bullet(BulletItem<'a>),
    /// A standalone line.
    Text(TextItem<'a>),
}

#[derive(Debug, Clone, PartialEq)]
pub struct BulletItem<'a> {
    pub title: CowStr<'a>,
    pub content: Vec<CowStr<'a>>,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TextItem<'a> {
    pub content: CowStr<'a>,
    pub span: Span,
}

// ============================================================================
// Recommendations
// ============================================================================

/// A numbered recommendation such as `1. **Improve Focus**`.
#[derive(Debug, Clone, PartialEq)]
pub struct RecommendationItem<'a> {
    pub number: CowStr<'a>,
    pub title: CowStr<'a>,
    pub sections: Vec<RecItemSection<'a>>,
    /// Span from the item line to its last body line.
    pub span: Span,
}

/// A run of body lines inside a recommendation.
#[derive(Debug, Clone, PartialEq)]
pub struct RecItemSection<'a> {
    /// `None` for a bare paragraph with no bold sub-heading.
    pub title: Option<CowStr<'a>>,
    pub content: Vec<CowStr<'a>>,
    pub span: Span,
}

// ============================================================================
// Message
// ============================================================================

/// Result of the message profile: exactly one of the two renderings.
#[derive(Debug, Clone, PartialEq)]
pub enum Message<'a> {
    Structured(StructuredMessage<'a>),
    Lines(Vec<FallbackElement<'a>>),
}

/// Overview message split around its anchor lines.
///
/// Observation and intro text keep their `**` markers; split them with
/// [`crate::inline::parse_inlines`] for display.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct StructuredMessage<'a> {
    pub intro: CowStr<'a>,
    pub observations: Vec<CowStr<'a>>,
    pub data_points: Vec<DataPoint<'a>>,
    pub summary: CowStr<'a>,
}

/// One metric line, e.g. `Hours: 40h (+10%)`.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct DataPoint<'a> {
    pub label: CowStr<'a>,
    /// Value with any trailing parenthetical removed.
    pub value: CowStr<'a>,
    /// First percentage token in the value, sign included.
    pub percent: Option<CowStr<'a>>,
    /// Inner text of the first parenthesized group in the value.
    pub extra: Option<CowStr<'a>>,
    /// The line as written, bullet glyph removed.
    pub raw: CowStr<'a>,
}

/// Display text together with its inline runs.
///
/// Run spans are relative to `text`.
#[derive(Debug, Clone, PartialEq)]
pub struct RichText<'a> {
    pub text: CowStr<'a>,
    pub inlines: Vec<Inline>,
}

impl<'a> RichText<'a> {
    pub fn new(text: impl Into<CowStr<'a>>) -> Self {
        let text = text.into();
        let inlines = crate::inline::parse_inlines(&text);
        Self { text, inlines }
    }

    /// Text with emphasis markers removed.
    pub fn plain(&self) -> String {
        self.inlines
            .iter()
            .map(|inline| inline.content(&self.text))
            .collect()
    }
}

/// Generic rendering of a message with no anchors.
#[derive(Debug, Clone, PartialEq)]
pub enum FallbackElement<'a> {
    Heading(HeadingElement<'a>),
    BulletList(ListElement<'a>),
    NumberedList(ListElement<'a>),
    /// Line opening with an attention glyph such as ⚠ or 💡.
    Callout(TextElement<'a>),
    Paragraph(TextElement<'a>),
    /// Blank line.
    Spacer(Span),
}

#[derive(Debug, Clone, PartialEq)]
pub struct HeadingElement<'a> {
    /// Heading text, emphasis markers removed.
    pub text: CowStr<'a>,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ListElement<'a> {
    pub items: Vec<RichText<'a>>,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TextElement<'a> {
    pub content: RichText<'a>,
    pub span: Span,
}
