//! Benchmarks for each profile, plus line rendering vs pulldown-cmark
//!
//! Run with: cargo bench -p insightdoc-core

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use insightdoc_core::inline::parse_inlines;
use insightdoc_core::{fallback, Parser, Profile};
use pulldown_cmark::{Options, Parser as MdParser};

const INSIGHTS_SAMPLE: &str = r#"Here is a look at your last four weeks.

#### 1. Productivity Patterns
* **Morning Focus:** You complete 70% of tasks before noon.
Keep mornings meeting-free.
* **Afternoon Dip:** Output drops by 35% after 3pm.
---
#### 2. **Skill Development**
* **SQL:** Practiced 3 times, up from 1.
* **Design:** No sessions logged this month.
Consider a short weekly block.
---
#### 3. Work-Life Balance
1. **Overtime**: 6 hours over target on Fridays.
- Late commits after 8pm on 4 days.
- Weekends were fully off.
"#;

const RECOMMENDATIONS_SAMPLE: &str = r#"Based on your schedule, try these:

1. **Improve Focus**
* **Action:** Block calendar mornings from 9 to 11.
Also silence notifications.
* **Why:** Your best output happens before noon.
---
2. **Track Skills**
Review weekly.
* **How:** Log each practice session with a short note.
### 3. Protect Evenings
* Stop work at **6pm**.
* **Benefit:** Better sleep and steadier mornings.
"#;

const MESSAGE_SAMPLE: &str = r#"Hi! Based on your data, here is an overview.
Key Observations:
* You worked 40 hours this week.
* **Focus** peaked on Tuesday.
* Meetings took 12% of your time.
Specific Data Points:
Hours: 40h (+10%)
- Tasks: 12 (3 overdue)
- Focus time: 18h (-5%)
In summary: Great progress overall.
"#;

const FALLBACK_SAMPLE: &str = r#"### Weekly Update
- Finished the **quarterly report**
- Reviewed two pull requests

1. Plan next sprint
2. Book the team offsite

💡 Tip: batch your email into two slots a day.
**Next steps:**
All good, keep the momentum going.
"#;

fn bench_profiles(c: &mut Criterion) {
    let mut group = c.benchmark_group("parse");

    for (name, profile, sample) in [
        ("insights", Profile::Insights, INSIGHTS_SAMPLE),
        ("recommendations", Profile::Recommendations, RECOMMENDATIONS_SAMPLE),
        ("message_structured", Profile::Message, MESSAGE_SAMPLE),
        ("message_fallback", Profile::Message, FALLBACK_SAMPLE),
    ] {
        group.throughput(Throughput::Bytes(sample.len() as u64));
        group.bench_function(name, |b| {
            let parser = Parser::new(profile);
            b.iter(|| black_box(parser.parse(black_box(sample))))
        });
    }

    group.finish();
}

fn bench_fallback_vs_markdown(c: &mut Criterion) {
    let mut group = c.benchmark_group("fallback");
    group.throughput(Throughput::Bytes(FALLBACK_SAMPLE.len() as u64));

    group.bench_function("insightdoc", |b| {
        b.iter(|| {
            let elements = fallback::parse(black_box(FALLBACK_SAMPLE));
            black_box(elements.len())
        })
    });

    group.bench_function("markdown_pulldown", |b| {
        b.iter(|| {
            let parser = MdParser::new_ext(black_box(FALLBACK_SAMPLE), Options::all());
            let events: Vec<_> = parser.collect();
            black_box(events.len())
        })
    });

    group.finish();
}

fn bench_scaling(c: &mut Criterion) {
    let mut group = c.benchmark_group("scaling");

    for size in [1, 5, 10, 20].iter() {
        let content = INSIGHTS_SAMPLE.repeat(*size);
        group.throughput(Throughput::Bytes(content.len() as u64));

        group.bench_with_input(BenchmarkId::new("insights", size), &content, |b, content| {
            let parser = Parser::new(Profile::Insights);
            b.iter(|| black_box(parser.parse(black_box(content))))
        });

        let content = FALLBACK_SAMPLE.repeat(*size);
        group.throughput(Throughput::Bytes(content.len() as u64));

        group.bench_with_input(BenchmarkId::new("fallback", size), &content, |b, content| {
            b.iter(|| black_box(fallback::parse(black_box(content)).len()))
        });

        group.bench_with_input(BenchmarkId::new("markdown", size), &content, |b, content| {
            b.iter(|| {
                let parser = MdParser::new_ext(black_box(content), Options::all());
                black_box(parser.count())
            })
        });
    }

    group.finish();
}

fn bench_inline_parsing(c: &mut Criterion) {
    let mut group = c.benchmark_group("inline");

    let text = "You logged **42 hours** this week, **8%** above target, with **focus** \
                peaking on Tuesday and a dip on **Friday afternoon**. "
        .repeat(20);

    group.throughput(Throughput::Bytes(text.len() as u64));
    group.bench_function("parse_inlines", |b| {
        b.iter(|| black_box(parse_inlines(black_box(&text)).len()))
    });

    group.finish();
}

criterion_group!(
    benches,
    bench_profiles,
    bench_fallback_vs_markdown,
    bench_scaling,
    bench_inline_parsing
);
criterion_main!(benches);
