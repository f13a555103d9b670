//! # InsightDoc Core
//!
//! Heuristic parsers that turn free-form assistant responses into structured
//! documents.
//!
//! Assistant output is markdown-like but loose: headings may be numbered,
//! bullets come with several glyphs, titles are bolded inline. The parsers
//! never reject input. Each is a single forward pass over lines that keeps a
//! little "current section" state and borrows from the input where it can.
//!
//! ## Quick Start
//!
//! ```rust
//! use insightdoc_core::{Document, Parser, Profile};
//!
//! let input = "## Strengths\n* **Consistency:** Logged hours every day.";
//! let doc = Parser::new(Profile::Insights).parse(input);
//!
//! if let Document::Insights(sections) = doc {
//!     assert_eq!(sections[0].title, "Strengths");
//! }
//! ```
//!
//! ## Diagnostics
//!
//! Lines the parsers skip or reinterpret are reported, not hidden:
//!
//! ```rust
//! use insightdoc_core::{DiagnosticKind, Parser, Profile};
//!
//! let input = "Intro line\n---\n## Focus\nMornings work best.";
//! let result = Parser::new(Profile::Insights).parse_with_diagnostics(input);
//!
//! assert_eq!(result.diagnostics.count(DiagnosticKind::SeparatorDropped), 1);
//! assert_eq!(result.diagnostics.count(DiagnosticKind::ImplicitSection), 1);
//! ```
//!
//! ## Profiles
//!
//! - `Profile::Insights` - heading-delimited analysis sections
//! - `Profile::Recommendations` - numbered items with titled sub-sections
//! - `Profile::Message` - structured overview, or line rendering as fallback

pub mod ast;
pub mod classify;
pub mod error;
pub mod fallback;
pub mod inline;
pub mod insights;
pub mod lexer;
pub mod message;
pub mod parser;
pub mod recommendations;
pub mod span;
pub mod structured;

pub use ast::{
    BulletItem, CowStr, DataPoint, Document, FallbackElement, HeadingElement, ListElement,
    Message, Profile, RecItemSection, RecommendationItem, RichText, Section, SectionItem,
    StructuredMessage, TextElement, TextItem,
};
pub use error::{Diagnostic, DiagnosticKind, Diagnostics, UnknownProfile};
pub use inline::{Inline, InlineKind};
pub use parser::{ParseResult, Parser};
pub use span::Span;
