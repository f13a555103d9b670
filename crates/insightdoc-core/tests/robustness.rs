//! Property checks over mutated assistant responses.
//!
//! Each base response is mutated with a deterministic LCG, and every variant
//! is run through all three profiles.

use insightdoc_core::ast::FallbackElement;
use insightdoc_core::{
    fallback, insights, recommendations, structured, Document, Message, Parser, Profile,
    SectionItem,
};

const VARIANT_COUNT: usize = 200;
const MAX_MUTATION_STEPS: usize = 4;

type MutationList = &'static [&'static str];

const MUTATIONS: MutationList = &[
    "drop_line",
    "duplicate_line",
    "swap_bullet_glyph",
    "strip_bold_close",
    "insert_separator",
    "insert_blank",
    "truncate_tail",
    "crlf",
    "unicode_noise",
    "strip_hashes",
];

const INSIGHTS_SAMPLE: &str = "Here is a quick look at your week.

#### 1. Productivity Patterns
* **Morning Focus:** You complete 70% of tasks before noon.
Keep mornings meeting-free.
---
#### 2. **Skill Development**
* **SQL:** Practiced 3 times.
• **Design:** No sessions logged.
1. **Key Risk**: Overtime on Fridays.
- Late commits after 8pm.
";

const RECOMMENDATIONS_SAMPLE: &str = "Based on your schedule, try these:

1. **Improve Focus**
* **Action:** Block calendar mornings.
Also silence notifications.
---
2. **Track Skills**
Review weekly.
### 3. Protect Evenings
* Stop work at **6pm**.
";

const MESSAGE_SAMPLE: &str = "Hi! Based on your data, here is an overview.
Key Observations:
* You worked 40 hours this week.
* **Focus** peaked on Tuesday.
Specific Data Points:
Hours: 40h (+10%)
- Tasks: 12 (3 overdue)
In summary: Great progress overall.
";

const FALLBACK_SAMPLE: &str = "### Update
- Did X
- Did **Y**

1. First
2. Second
💡 Tip: batch your email.
**Next:**
All good.
";

struct Lcg {
    state: u64,
}

impl Lcg {
    fn new(seed: u64) -> Self {
        Self { state: seed }
    }

    fn next_u32(&mut self) -> u32 {
        self.state = self.state.wrapping_mul(6364136223846793005).wrapping_add(1);
        (self.state >> 32) as u32
    }

    fn choose(&mut self, max: usize) -> usize {
        if max == 0 {
            return 0;
        }
        (self.next_u32() as usize) % max
    }
}

/// Truncate to at most `len` bytes without splitting a character.
fn truncate_on_boundary(input: &mut String, mut len: usize) {
    while len > 0 && !input.is_char_boundary(len) {
        len -= 1;
    }
    input.truncate(len);
}

fn apply_mutations(input: &str, rng: &mut Lcg) -> String {
    let mut lines: Vec<String> = input.lines().map(str::to_string).collect();
    for _ in 0..MAX_MUTATION_STEPS {
        let at = rng.choose(lines.len());
        match MUTATIONS[rng.choose(MUTATIONS.len())] {
            "drop_line" => {
                if at < lines.len() {
                    lines.remove(at);
                }
            }
            "duplicate_line" => {
                if let Some(line) = lines.get(at).cloned() {
                    lines.insert(at, line);
                }
            }
            "swap_bullet_glyph" => {
                if let Some(line) = lines.get_mut(at) {
                    if let Some(rest) = line.strip_prefix("* ") {
                        *line = format!("• {}", rest);
                    }
                }
            }
            "strip_bold_close" => {
                if let Some(line) = lines.get_mut(at) {
                    if let Some(pos) = line.rfind("**") {
                        line.replace_range(pos..pos + 2, "");
                    }
                }
            }
            "insert_separator" => lines.insert(at.min(lines.len()), "---".to_string()),
            "insert_blank" => lines.insert(at.min(lines.len()), "   ".to_string()),
            "truncate_tail" => {
                if let Some(line) = lines.get_mut(at) {
                    let cut = rng.choose(line.len().max(1));
                    truncate_on_boundary(line, cut);
                }
            }
            "crlf" => {
                if let Some(line) = lines.get_mut(at) {
                    line.push('\r');
                }
            }
            "unicode_noise" => {
                if let Some(line) = lines.get_mut(at) {
                    line.insert_str(0, "\u{feff}🎯\0");
                }
            }
            "strip_hashes" => {
                if let Some(line) = lines.get_mut(at) {
                    *line = line.trim_start_matches('#').to_string();
                }
            }
            _ => {}
        }
    }
    lines.join("\n")
}

fn variants(base: &str, seed: u64) -> Vec<String> {
    let mut rng = Lcg::new(seed);
    let mut out = vec![base.to_string(), String::new(), " \n\t\n".to_string()];
    for _ in 0..VARIANT_COUNT {
        out.push(apply_mutations(base, &mut rng));
    }
    out
}

fn all_variants() -> Vec<String> {
    [
        INSIGHTS_SAMPLE,
        RECOMMENDATIONS_SAMPLE,
        MESSAGE_SAMPLE,
        FALLBACK_SAMPLE,
    ]
    .iter()
    .enumerate()
    .flat_map(|(i, base)| variants(base, 0x5eed + i as u64))
    .collect()
}

// ============================================================================
// Properties
// ============================================================================

#[test]
fn every_profile_is_total() {
    for input in all_variants() {
        for profile in Profile::ALL {
            let result = Parser::new(profile).parse_with_diagnostics(&input);
            assert_eq!(result.document.profile(), profile);
        }
    }
}

#[test]
fn insight_sections_are_never_empty() {
    for input in all_variants() {
        for section in insights::parse(&input) {
            assert!(!section.items.is_empty(), "empty section in {:?}", input);
        }
    }
}

#[test]
fn message_uses_exactly_one_mode() {
    for input in all_variants() {
        let structured = structured::try_parse(&input).is_some();
        match Parser::new(Profile::Message).parse(&input) {
            Document::Message(Message::Structured(_)) => assert!(structured, "{:?}", input),
            Document::Message(Message::Lines(_)) => assert!(!structured, "{:?}", input),
            other => panic!("unexpected document {:?}", other),
        }
    }
}

#[test]
fn separators_never_become_content() {
    for input in all_variants() {
        for section in insights::parse(&input) {
            assert_ne!(section.title, "---");
            for item in &section.items {
                match item {
                    SectionItem::Bullet(bullet) => {
                        assert_ne!(bullet.title, "---");
                        assert!(bullet.content.iter().all(|c| c != "---"), "{:?}", input);
                    }
                    SectionItem::Text(text) => assert_ne!(text.content, "---", "{:?}", input),
                }
            }
        }
        for item in recommendations::parse(&input) {
            for section in &item.sections {
                assert!(section.content.iter().all(|c| c != "---"), "{:?}", input);
            }
        }
    }
}

#[test]
fn two_bullets_and_a_blank_coalesce() {
    for (a, b) in [("* one", "* two"), ("- one", "- two"), ("• one", "- two")] {
        let input = format!("{}\n{}\n\n", a, b);
        let lists: Vec<_> = fallback::parse(&input)
            .into_iter()
            .filter_map(|element| match element {
                FallbackElement::BulletList(list) => Some(list.items.len()),
                _ => None,
            })
            .collect();
        assert_eq!(lists, vec![2], "{:?}", input);
    }
}

#[test]
fn output_follows_input_order() {
    for input in all_variants() {
        let starts: Vec<u32> = insights::parse(&input)
            .iter()
            .map(|section| section.span.start)
            .collect();
        assert!(starts.windows(2).all(|w| w[0] < w[1]), "{:?}", input);

        let starts: Vec<u32> = recommendations::parse(&input)
            .iter()
            .map(|item| item.span.start)
            .collect();
        assert!(starts.windows(2).all(|w| w[0] < w[1]), "{:?}", input);

        let starts: Vec<u32> = fallback::parse(&input)
            .iter()
            .map(|element| match element {
                FallbackElement::Heading(h) => h.span.start,
                FallbackElement::BulletList(l) | FallbackElement::NumberedList(l) => l.span.start,
                FallbackElement::Callout(t) | FallbackElement::Paragraph(t) => t.span.start,
                FallbackElement::Spacer(span) => span.start,
            })
            .collect();
        assert!(starts.windows(2).all(|w| w[0] <= w[1]), "{:?}", input);
    }
}

#[test]
fn spans_slice_their_source() {
    for input in all_variants() {
        for section in insights::parse(&input) {
            assert!(input.get(section.span.start as usize..section.span.end as usize).is_some());
        }
        for item in recommendations::parse(&input) {
            assert!(input.get(item.span.start as usize..item.span.end as usize).is_some());
        }
    }
}
