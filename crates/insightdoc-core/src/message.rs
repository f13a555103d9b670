//! Message profile: structured overview or line-by-line fallback.

use crate::ast::Message;
use crate::error::{Diagnostic, Diagnostics};
use crate::{fallback, structured};

/// Parse a chat message.
///
/// Exactly one rendering is produced: [`Message::Structured`] when at least
/// one anchor line exists, [`Message::Lines`] otherwise.
///
/// ```rust
/// use insightdoc_core::{message, Message};
///
/// assert!(matches!(message::parse("Key Observations:\n* Busy week."), Message::Structured(_)));
/// assert!(matches!(message::parse("Busy week."), Message::Lines(_)));
/// ```
pub fn parse(input: &str) -> Message<'_> {
    parse_with(input, &mut Diagnostics::disabled())
}

/// Parse a chat message, recording diagnostics.
pub fn parse_with<'a>(input: &'a str, diagnostics: &mut Diagnostics) -> Message<'a> {
    if let Some(structured) = structured::try_parse(input) {
        tracing::debug!(
            observations = structured.observations.len(),
            data_points = structured.data_points.len(),
            "message parsed as structured overview"
        );
        return Message::Structured(structured);
    }

    tracing::debug!("no anchor lines, falling back to line rendering");
    diagnostics.push(Diagnostic::no_anchors());
    Message::Lines(fallback::parse_with(input, diagnostics))
}
