//! Tests for line splitting, line classification and inline emphasis

use std::borrow::Cow;

use insightdoc_core::classify::{
    bold_title, bullet_body, classify, enumeration, heading_level, is_separator, matching_rule,
    strip_bullet_glyph, LineKind, RULES,
};
use insightdoc_core::inline::{parse_inlines, strip_emphasis};
use insightdoc_core::lexer::{content_lines, Lexer};
use insightdoc_core::{InlineKind, Span};
use pretty_assertions::assert_eq;

// ============================================================================
// Lexer Tests
// ============================================================================

#[test]
fn test_lexer_empty_input_has_no_lines() {
    assert_eq!(Lexer::new("").count(), 0);
}

#[test]
fn test_lexer_trailing_newline_adds_no_line() {
    let lines: Vec<_> = Lexer::new("a\n").map(|line| line.text).collect();
    assert_eq!(lines, vec!["a"]);
}

#[test]
fn test_lexer_crlf() {
    let lines: Vec<_> = Lexer::new("one\r\ntwo\r\n").map(|line| line.text).collect();
    assert_eq!(lines, vec!["one", "two"]);
}

#[test]
fn test_lexer_keeps_blank_lines() {
    let lines: Vec<_> = Lexer::new("a\n\n  \nb").map(|line| line.number).collect();
    assert_eq!(lines, vec![0, 1, 2, 3]);
}

#[test]
fn test_lexer_spans_point_into_input() {
    let input = "first\n  second  \nthird";
    let lines: Vec<_> = Lexer::new(input).collect();
    assert_eq!(lines[1].span, Span::new(6, 16));
    assert_eq!(lines[1].trimmed(), "second");
    assert_eq!(lines[1].trimmed_span().slice(input), "second");
    assert_eq!(lines[2].span.slice(input), "third");
}

#[test]
fn test_lexer_trims_byte_order_mark() {
    let input = "\u{feff}## Week\n\u{feff}";
    let lines: Vec<_> = Lexer::new(input).collect();
    assert_eq!(lines[0].trimmed(), "## Week");
    assert_eq!(lines[0].trimmed_span().slice(input), "## Week");
    assert!(lines[1].is_blank());
}

#[test]
fn test_content_lines_skip_blank() {
    let lines: Vec<_> = content_lines("\n a \n\n\t\nb\n")
        .iter()
        .map(|line| line.trimmed())
        .collect();
    assert_eq!(lines, vec!["a", "b"]);
}

// ============================================================================
// Classifier Tests
// ============================================================================

#[test]
fn test_classify_heading_levels() {
    for (line, level) in [("# A", 1), ("## A", 2), ("### A", 3), ("#### A", 4)] {
        match classify(line) {
            LineKind::Heading { level: got, text, .. } => {
                assert_eq!(got, level);
                assert_eq!(text, "A");
            }
            other => panic!("expected heading for {:?}, got {:?}", line, other),
        }
    }
}

#[test]
fn test_classify_five_hashes_is_plain_text() {
    assert_eq!(classify("##### Deep"), LineKind::PlainText("##### Deep"));
}

#[test]
fn test_classify_hash_without_space_is_plain_text() {
    assert_eq!(classify("#hashtag"), LineKind::PlainText("#hashtag"));
}

#[test]
fn test_classify_enumerated_bold_heading() {
    assert_eq!(
        classify("### 2. **Skill Growth**"),
        LineKind::Heading {
            level: 3,
            number: Some("2"),
            text: Cow::Borrowed("Skill Growth"),
        }
    );
}

#[test]
fn test_classify_empty_heading_falls_through() {
    assert_eq!(classify("## ****"), LineKind::PlainText("## ****"));
}

#[test]
fn test_classify_numbered_bold_heading() {
    assert_eq!(
        classify("1. **Key Productivity Pattern**: Most work happens on Tuesdays."),
        LineKind::NumberedBoldHeading {
            number: "1",
            title: Cow::Borrowed("Key Productivity Pattern"),
            rest: "Most work happens on Tuesdays.",
        }
    );
}

#[test]
fn test_classify_numbered_bold_heading_colon_inside() {
    assert_eq!(
        classify("3. **Rest:**"),
        LineKind::NumberedBoldHeading {
            number: "3",
            title: Cow::Borrowed("Rest"),
            rest: "",
        }
    );
}

#[test]
fn test_classify_bullet_with_title_glyphs() {
    for line in [
        "* **Action:** Block mornings.",
        "- **Action:** Block mornings.",
        "• **Action:** Block mornings.",
        "â€¢ **Action:** Block mornings.",
    ] {
        assert_eq!(
            classify(line),
            LineKind::BulletWithTitle {
                title: Cow::Borrowed("Action"),
                rest: "Block mornings.",
            },
            "line {:?}",
            line
        );
    }
}

#[test]
fn test_classify_bold_line_is_not_a_bullet() {
    assert_eq!(classify("**Bold** start"), LineKind::PlainText("**Bold** start"));
}

#[test]
fn test_classify_generic_bullet_and_numbered_line() {
    assert_eq!(classify("* Plain point"), LineKind::GenericBullet("Plain point"));
    assert_eq!(
        classify("12. Twelfth point"),
        LineKind::NumberedLine {
            number: "12",
            text: "Twelfth point",
        }
    );
}

#[test]
fn test_classify_decimal_is_plain_text() {
    assert_eq!(classify("3.5 hours logged"), LineKind::PlainText("3.5 hours logged"));
}

#[test]
fn test_rule_order() {
    let names: Vec<_> = RULES.iter().map(|rule| rule.name).collect();
    assert_eq!(
        names,
        vec![
            "heading",
            "numbered_bold_heading",
            "bullet_with_title",
            "generic_bullet",
            "numbered_line",
        ]
    );
    assert_eq!(matching_rule("### 1. **Title**"), Some("heading"));
    assert_eq!(matching_rule("just text"), None);
}

#[test]
fn test_body_text_strips_markers_and_emphasis() {
    assert_eq!(classify("* Use **time blocks**").body_text(), "Use time blocks");
    assert_eq!(classify("2. Review **weekly**").body_text(), "Review weekly");
    assert_eq!(
        classify("* **Tip:** Take breaks").body_text(),
        "Tip: Take breaks"
    );
}

#[test]
fn test_helpers() {
    assert!(is_separator("---"));
    assert!(!is_separator("----"));
    assert_eq!(bullet_body("*   spaced"), Some("spaced"));
    assert_eq!(bullet_body("*"), None);
    assert_eq!(strip_bullet_glyph("•Tight"), "Tight");
    assert_eq!(strip_bullet_glyph("**Hours:** 40h"), "**Hours:** 40h");
    assert_eq!(enumeration("7.Seven", false), Some(("7", "Seven")));
    assert_eq!(enumeration("7.Seven", true), None);
    assert_eq!(heading_level("### Title", 3), Some((3, "Title")));
    assert_eq!(heading_level("#### Title", 3), None);

    let (title, rest) = bold_title("**Focus**: mornings").unwrap();
    assert_eq!(title, "Focus");
    assert_eq!(rest, "mornings");
    assert!(bold_title("**:**").is_none());
}

// ============================================================================
// Inline Tests
// ============================================================================

#[test]
fn test_inlines_plain_text_is_one_run() {
    let runs = parse_inlines("nothing bold");
    assert_eq!(runs.len(), 1);
    assert_eq!(runs[0].kind, InlineKind::Text);
}

#[test]
fn test_inlines_keep_strong_boundaries() {
    let text = "**Hours** rose by **10%** this week";
    let runs = parse_inlines(text);
    let kinds: Vec<_> = runs.iter().map(|run| run.kind).collect();
    assert_eq!(
        kinds,
        vec![
            InlineKind::Strong,
            InlineKind::Text,
            InlineKind::Strong,
            InlineKind::Text,
        ]
    );
    let contents: Vec<_> = runs.iter().map(|run| run.content(text)).collect();
    assert_eq!(contents, vec!["Hours", " rose by ", "10%", " this week"]);
}

#[test]
fn test_inlines_unclosed_marker_is_text() {
    let text = "a **b";
    let runs = parse_inlines(text);
    assert_eq!(runs.len(), 1);
    assert_eq!(runs[0].content(text), "a **b");
}

#[test]
fn test_inlines_empty_strong_is_text() {
    let runs = parse_inlines("****");
    assert!(runs.iter().all(|run| run.kind == InlineKind::Text));
}

#[test]
fn test_strip_emphasis_borrows_when_unchanged() {
    assert!(matches!(strip_emphasis("plain"), Cow::Borrowed("plain")));
    assert_eq!(strip_emphasis("a **b** c"), "a b c");
}
