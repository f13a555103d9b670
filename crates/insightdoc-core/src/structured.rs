//! Structured overview messages.
//!
//! A message in the canonical overview shape is split around three anchor
//! lines:
//!
//! ```text
//! Hi! Based on your data, here is an overview.   intro (greeting removed)
//! Key Observations:                              anchor
//! * You worked 40 hours this week.               observation
//! Specific Data Points:                          anchor ("Key Metrics:" too)
//! Hours: 40h (+10%)                              data point
//! In summary: Great progress overall.            anchor + summary
//! ```
//!
//! Every anchor is optional. With none of them, [`try_parse`] returns `None`
//! and the message goes to the fallback renderer instead.

use std::borrow::Cow;
use std::sync::LazyLock;

use regex::Regex;

use crate::ast::{CowStr, DataPoint, StructuredMessage};
use crate::classify::strip_bullet_glyph;
use crate::inline::strip_emphasis;
use crate::lexer::content_lines;

static GREETING: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^(?:hi|hello|hey|hiya|greetings)\b\s*[,!]?\s*").expect("greeting pattern")
});

static OBSERVATIONS_ANCHOR: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^key observations?\b.*:$").expect("observations pattern")
});

static DATA_ANCHOR: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^(?:specific data points?|key metrics?)\b.*:$").expect("data pattern")
});

static SUMMARY_ANCHOR: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^(?:in summary|summary)\b").expect("summary pattern")
});

static SUMMARY_PREFIX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^[#*\s]*(?:in summary|summary)\b[*\s]*[:,]?[*\s]*")
        .expect("summary prefix pattern")
});

static PERCENT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[+-]?[0-9]+(?:\.[0-9]+)?%").expect("percent pattern"));

static PARENTHETICAL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\(([^)]+)\)").expect("parenthetical pattern"));

static TRAILING_PARENTHETICAL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s*\([^)]*\)\s*$").expect("trailing parenthetical pattern"));

/// Line indices of the three anchors.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Anchors {
    pub observations: Option<usize>,
    pub data: Option<usize>,
    pub summary: Option<usize>,
}

impl Anchors {
    /// Locate the first line matching each anchor.
    pub fn locate(lines: &[&str]) -> Self {
        let find = |re: &Regex| lines.iter().position(|line| re.is_match(&anchor_text(line)));
        Self {
            observations: find(&OBSERVATIONS_ANCHOR),
            data: find(&DATA_ANCHOR),
            summary: find(&SUMMARY_ANCHOR),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.observations.is_none() && self.data.is_none() && self.summary.is_none()
    }

    /// Index of the earliest anchor present.
    pub fn first(&self) -> Option<usize> {
        [self.observations, self.data, self.summary]
            .into_iter()
            .flatten()
            .min()
    }
}

/// Parse a message in the overview shape, or `None` when it has no anchor
/// line at all.
pub fn try_parse(input: &str) -> Option<StructuredMessage<'_>> {
    let mut lines: Vec<&str> = content_lines(input)
        .iter()
        .map(|line| line.trimmed())
        .collect();
    strip_greetings(&mut lines);

    let anchors = Anchors::locate(&lines);
    tracing::debug!(?anchors, lines = lines.len(), "located message anchors");
    let first = anchors.first()?;

    let observations_end = anchors.data.or(anchors.summary).unwrap_or(lines.len());
    let data_end = anchors.summary.unwrap_or(lines.len());

    let observations = anchors
        .observations
        .map(|idx| span_between(&lines, idx, observations_end))
        .unwrap_or_default()
        .iter()
        .copied()
        .map(strip_bullet_glyph)
        .filter(|line| !line.is_empty())
        .map(Cow::Borrowed)
        .collect();

    let data_points = anchors
        .data
        .map(|idx| span_between(&lines, idx, data_end))
        .unwrap_or_default()
        .iter()
        .copied()
        .map(strip_bullet_glyph)
        .filter(|line| !line.is_empty())
        .map(data_point)
        .collect();

    let summary = match anchors.summary {
        Some(idx) => {
            let joined = join_lines(&lines[idx..]);
            map_cow(joined, |text| match SUMMARY_PREFIX.find(text) {
                Some(prefix) => text[prefix.end()..].trim(),
                None => text.trim(),
            })
        }
        None => Cow::Borrowed(""),
    };

    Some(StructuredMessage {
        intro: intro(&lines[..first]),
        observations,
        data_points,
        summary,
    })
}

/// Split one metric line into label, value, percentage and note.
///
/// The percentage and the parenthetical are extracted independently, so a
/// value such as `40h (+10%)` reports `+10%` as both.
///
/// ```rust
/// use insightdoc_core::structured::data_point;
///
/// let point = data_point("Hours: 40h (+10%)");
/// assert_eq!(point.label, "Hours");
/// assert_eq!(point.value, "40h");
/// assert_eq!(point.percent.as_deref(), Some("+10%"));
/// assert_eq!(point.extra.as_deref(), Some("+10%"));
/// ```
pub fn data_point(raw: &str) -> DataPoint<'_> {
    match strip_emphasis(raw) {
        Cow::Borrowed(line) => split_data_point(line, raw, Cow::Borrowed),
        Cow::Owned(line) => split_data_point(&line, raw, |s| Cow::Owned(s.to_string())),
    }
}

fn split_data_point<'a, 's>(
    line: &'s str,
    raw: &'a str,
    own: impl Fn(&'s str) -> CowStr<'a>,
) -> DataPoint<'a> {
    let (label, value) = match line.split_once(": ") {
        Some((label, value)) => (label.trim(), value.trim()),
        None => ("", line.trim()),
    };

    let percent = PERCENT.find(value).map(|m| own(m.as_str()));
    let extra = PARENTHETICAL
        .captures(value)
        .and_then(|caps| caps.get(1))
        .map(|m| own(m.as_str().trim()));
    let primary = match TRAILING_PARENTHETICAL.replace(value, "") {
        Cow::Borrowed(primary) => own(primary.trim()),
        Cow::Owned(primary) => Cow::Owned(primary.trim().to_string()),
    };

    DataPoint {
        label: own(label),
        value: primary,
        percent,
        extra,
        raw: Cow::Borrowed(raw),
    }
}

/// Remove leading greeting fragments, dropping lines they empty out.
fn strip_greetings(lines: &mut Vec<&str>) {
    while let Some(&first) = lines.first() {
        let Some(greeting) = GREETING.find(first) else {
            break;
        };
        let rest = &first[greeting.end()..];
        if rest.is_empty() {
            lines.remove(0);
        } else {
            lines[0] = rest;
        }
    }
}

fn intro<'a>(lines: &[&'a str]) -> CowStr<'a> {
    let intro = map_cow(join_lines(lines), |text| {
        let text = text.trim_end();
        text.strip_suffix(':').unwrap_or(text).trim_end()
    });

    if intro.starts_with("based on") {
        return Cow::Owned(format!("B{}", &intro[1..]));
    }
    intro
}

/// Lines strictly between `anchor` and `end`.
fn span_between<'l, 'a>(lines: &'l [&'a str], anchor: usize, end: usize) -> &'l [&'a str] {
    let start = anchor + 1;
    if start >= end || start > lines.len() {
        return &[];
    }
    &lines[start..end.min(lines.len())]
}

fn join_lines<'a>(lines: &[&'a str]) -> CowStr<'a> {
    match lines {
        [] => Cow::Borrowed(""),
        [line] => Cow::Borrowed(line),
        _ => Cow::Owned(lines.join(" ")),
    }
}

fn map_cow<'a>(text: CowStr<'a>, f: impl Fn(&str) -> &str) -> CowStr<'a> {
    match text {
        Cow::Borrowed(text) => Cow::Borrowed(f(text)),
        Cow::Owned(text) => Cow::Owned(f(&text).to_string()),
    }
}

/// Line text without heading hashes and without a bold run opening the line.
///
/// `**Key Observations:**` and `**Summary**: ok` lose their markers, while a
/// bullet such as `* Summary report` is left alone and never anchors.
fn anchor_text(line: &str) -> Cow<'_, str> {
    let text = line.trim_start_matches('#').trim_start();
    let Some(rest) = text.strip_prefix("**") else {
        return Cow::Borrowed(text);
    };
    match rest.find("**") {
        Some(close) if rest[close + 2..].trim().is_empty() => Cow::Borrowed(rest[..close].trim()),
        Some(close) => Cow::Owned(format!("{}{}", rest[..close].trim_end(), &rest[close + 2..])),
        None => Cow::Borrowed(text),
    }
}
