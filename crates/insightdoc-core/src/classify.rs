//! Line classification shared by the insight and recommendation parsers.
//!
//! A trimmed, non-empty line is matched against an ordered rule table. The
//! first rule that matches decides the [`LineKind`]; nothing matching means
//! [`LineKind::PlainText`], so classification never fails.
//!
//! | order | rule                    | shape                            |
//! |-------|-------------------------|----------------------------------|
//! | 1     | `heading`               | `#`..`####` `[n. ]text`          |
//! | 2     | `numbered_bold_heading` | `n. **Title**[:] [rest]`         |
//! | 3     | `bullet_with_title`     | `* **Title**[:] [rest]`          |
//! | 4     | `generic_bullet`        | `* text`                         |
//! | 5     | `numbered_line`         | `n. text`                        |
//!
//! Every glyph in [`BULLET_GLYPHS`] counts as a bullet marker. Besides `*`
//! and `-` that covers `•` and the shapes it takes after a bad re-encoding.

use std::borrow::Cow;

use crate::inline::strip_emphasis;

/// Leading glyphs treated as a `*` bullet marker.
pub const BULLET_GLYPHS: &[&str] = &["*", "-", "•", "∙", "●", "â€¢"];

/// Horizontal rule line, dropped by the insight and recommendation parsers.
pub const SEPARATOR: &str = "---";

/// Syntactic role of a single line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LineKind<'a> {
    /// `#`-prefixed heading, with its enumeration number when present.
    Heading {
        level: u8,
        number: Option<&'a str>,
        text: Cow<'a, str>,
    },
    /// `1. **Title**`, with anything trailing the bold title in `rest`.
    NumberedBoldHeading {
        number: &'a str,
        title: Cow<'a, str>,
        rest: &'a str,
    },
    /// `* **Title:** rest`
    BulletWithTitle { title: Cow<'a, str>, rest: &'a str },
    /// Bullet without a bold title.
    GenericBullet(&'a str),
    /// `1. text` without a bold title.
    NumberedLine { number: &'a str, text: &'a str },
    PlainText(&'a str),
}

impl<'a> LineKind<'a> {
    /// Text of the line as appended to a section body: markers removed and
    /// emphasis stripped.
    pub fn body_text(&self) -> Cow<'a, str> {
        match self {
            LineKind::Heading { text, .. } => text.clone(),
            LineKind::NumberedBoldHeading { title, rest, .. }
            | LineKind::BulletWithTitle { title, rest } => {
                if rest.is_empty() {
                    title.clone()
                } else {
                    Cow::Owned(format!("{}: {}", title, strip_emphasis(rest)))
                }
            }
            LineKind::GenericBullet(text)
            | LineKind::NumberedLine { text, .. }
            | LineKind::PlainText(text) => strip_emphasis(text),
        }
    }
}

type RuleFn = for<'a> fn(&'a str) -> Option<LineKind<'a>>;

/// A named classification rule.
pub struct Rule {
    pub name: &'static str,
    apply: RuleFn,
}

/// Classification rules in priority order.
pub static RULES: &[Rule] = &[
    Rule {
        name: "heading",
        apply: heading,
    },
    Rule {
        name: "numbered_bold_heading",
        apply: numbered_bold_heading,
    },
    Rule {
        name: "bullet_with_title",
        apply: bullet_with_title,
    },
    Rule {
        name: "generic_bullet",
        apply: generic_bullet,
    },
    Rule {
        name: "numbered_line",
        apply: numbered_line,
    },
];

/// Classify a trimmed, non-empty line.
///
/// ```rust
/// use insightdoc_core::classify::{classify, LineKind};
///
/// match classify("* **Morning Focus:** Deep work before noon.") {
///     LineKind::BulletWithTitle { title, rest } => {
///         assert_eq!(title, "Morning Focus");
///         assert_eq!(rest, "Deep work before noon.");
///     }
///     other => panic!("unexpected {:?}", other),
/// }
/// ```
pub fn classify(line: &str) -> LineKind<'_> {
    RULES
        .iter()
        .find_map(|rule| (rule.apply)(line))
        .unwrap_or(LineKind::PlainText(line))
}

/// Name of the first rule matching `line`, or `None` for plain text.
pub fn matching_rule(line: &str) -> Option<&'static str> {
    RULES
        .iter()
        .find(|rule| (rule.apply)(line).is_some())
        .map(|rule| rule.name)
}

/// Check for the `---` separator line.
#[inline]
pub fn is_separator(line: &str) -> bool {
    line == SEPARATOR
}

/// Text after a bullet marker and its whitespace.
///
/// `**bold**` is not a bullet: the marker must be followed by whitespace.
pub fn bullet_body(line: &str) -> Option<&str> {
    BULLET_GLYPHS.iter().find_map(|glyph| {
        let rest = line.strip_prefix(glyph)?;
        if !rest.starts_with(char::is_whitespace) {
            return None;
        }
        let body = rest.trim_start();
        (!body.is_empty()).then_some(body)
    })
}

/// Remove a leading bullet glyph, whitespace after it optional.
///
/// A line opening with `**` starts with emphasis, not a bullet.
pub fn strip_bullet_glyph(line: &str) -> &str {
    if line.starts_with("**") {
        return line;
    }
    BULLET_GLYPHS
        .iter()
        .find_map(|glyph| line.strip_prefix(glyph))
        .map(str::trim_start)
        .unwrap_or(line)
}

/// Split `12. rest` into its number and rest.
///
/// With `require_space` unset, `12.rest` is accepted too. The rest is
/// never empty.
pub fn enumeration(line: &str, require_space: bool) -> Option<(&str, &str)> {
    let digits = line.bytes().take_while(u8::is_ascii_digit).count();
    if digits == 0 {
        return None;
    }
    let after = line[digits..].strip_prefix('.')?;
    if require_space && !after.starts_with(char::is_whitespace) {
        return None;
    }
    let rest = after.trim_start();
    (!rest.is_empty()).then_some((&line[..digits], rest))
}

/// Split `**Title**[:] rest` into title and rest.
///
/// A colon just inside or just after the closing marker belongs to neither.
pub fn bold_title(text: &str) -> Option<(Cow<'_, str>, &str)> {
    let inner = text.strip_prefix("**")?;
    let close = inner.find("**")?;
    let title = inner[..close].trim().trim_end_matches(':').trim_end();
    if title.is_empty() {
        return None;
    }
    let rest = inner[close + 2..].trim_start();
    let rest = rest.strip_prefix(':').unwrap_or(rest).trim();
    Some((Cow::Borrowed(title), rest))
}

/// Count of leading `#` when followed by whitespace, within `1..=max`.
pub fn heading_level(line: &str, max: usize) -> Option<(u8, &str)> {
    let level = line.bytes().take_while(|&b| b == b'#').count();
    if level == 0 || level > max {
        return None;
    }
    let rest = &line[level..];
    if !rest.starts_with(char::is_whitespace) {
        return None;
    }
    Some((level as u8, rest.trim_start()))
}

fn heading(line: &str) -> Option<LineKind<'_>> {
    let (level, rest) = heading_level(line, 4)?;
    let (number, text) = match enumeration(rest, true) {
        Some((number, text)) => (Some(number), text),
        None => (None, rest),
    };

    let text = text.strip_prefix("**").unwrap_or(text);
    let text = text.strip_suffix("**").unwrap_or(text);
    let text = trim_cow(strip_emphasis(text));
    if text.is_empty() {
        return None;
    }

    Some(LineKind::Heading {
        level,
        number,
        text,
    })
}

fn numbered_bold_heading(line: &str) -> Option<LineKind<'_>> {
    let (number, rest) = enumeration(line, false)?;
    let (title, rest) = bold_title(rest)?;
    Some(LineKind::NumberedBoldHeading {
        number,
        title,
        rest,
    })
}

fn bullet_with_title(line: &str) -> Option<LineKind<'_>> {
    let (title, rest) = bold_title(bullet_body(line)?)?;
    Some(LineKind::BulletWithTitle { title, rest })
}

fn generic_bullet(line: &str) -> Option<LineKind<'_>> {
    bullet_body(line).map(LineKind::GenericBullet)
}

fn numbered_line(line: &str) -> Option<LineKind<'_>> {
    let (number, text) = enumeration(line, true)?;
    Some(LineKind::NumberedLine { number, text })
}

fn trim_cow(text: Cow<'_, str>) -> Cow<'_, str> {
    match text {
        Cow::Borrowed(s) => Cow::Borrowed(s.trim()),
        Cow::Owned(s) => Cow::Owned(s.trim().to_string()),
    }
}
