//! InsightDoc CLI - Parse and inspect assistant responses
//!
//! Usage:
//!   idoc [OPTIONS] [FILE]
//!   idoc <COMMAND> [OPTIONS] [FILE]
//!
//! Commands:
//!   parse     Parse and display document structure (default)
//!   validate  Report lines the parser skipped or reinterpreted
//!   stats     Show document statistics

mod json;

use std::fs;
use std::io::{self, Read};
use std::path::{Path, PathBuf};
use std::process;

use anyhow::{Context, Result};
use clap::{Args, Parser as ClapParser, Subcommand};
use insightdoc_core::{
    Document, FallbackElement, Message, ParseResult, Parser, Profile, RichText, SectionItem,
};
use tracing_subscriber::prelude::*;
use tracing_subscriber::EnvFilter;

#[derive(ClapParser, Debug)]
#[command(name = "idoc", version)]
#[command(about = "Parse free-form assistant responses into structured documents")]
#[command(args_conflicts_with_subcommands = true)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,

    #[command(flatten)]
    input: InputArgs,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Parse and display document structure
    Parse(InputArgs),
    /// Report lines the parser skipped or reinterpreted
    Validate(InputArgs),
    /// Show document statistics
    Stats(InputArgs),
}

#[derive(Args, Debug, Clone)]
struct InputArgs {
    /// Input file; `-` or no file reads stdin
    file: Option<PathBuf>,

    /// Parsing profile: insights, recommendations or message.
    /// Inferred from the file name when omitted.
    #[arg(short, long)]
    profile: Option<Profile>,

    /// Output in JSON format
    #[arg(short, long)]
    json: bool,

    /// Show the full document tree and debug logs
    #[arg(short, long)]
    verbose: bool,
}

fn main() {
    let cli = Cli::parse();

    if let Err(e) = run(cli) {
        eprintln!("error: {:#}", e);
        process::exit(1);
    }
}

fn run(cli: Cli) -> Result<()> {
    let command = cli.command.unwrap_or(Command::Parse(cli.input));
    let args = match &command {
        Command::Parse(args) | Command::Validate(args) | Command::Stats(args) => args,
    };
    init_tracing(args.verbose);

    let input = read_input(args.file.as_deref())?;
    let profile = args
        .profile
        .unwrap_or_else(|| infer_profile(args.file.as_deref()));
    tracing::debug!(%profile, bytes = input.len(), "read input");

    let parser = Parser::new(profile);

    match &command {
        Command::Parse(args) => cmd_parse(&parser, &input, args),
        Command::Validate(args) => cmd_validate(&parser, &input, args),
        Command::Stats(args) => cmd_stats(&parser, &input, args),
    }
}

fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(default_level))
        .unwrap_or_else(|_| EnvFilter::new(default_level));

    let fmt_layer = tracing_subscriber::fmt::layer()
        .with_writer(io::stderr)
        .with_target(false)
        .with_filter(env_filter);

    let _ = tracing_subscriber::registry().with(fmt_layer).try_init();
}

fn read_input(file: Option<&Path>) -> Result<String> {
    match file {
        Some(path) if path != Path::new("-") => fs::read_to_string(path)
            .with_context(|| format!("failed to read '{}'", path.display())),
        _ => {
            let mut input = String::new();
            io::stdin()
                .read_to_string(&mut input)
                .context("failed to read stdin")?;
            Ok(input)
        }
    }
}

/// Pick a profile from words in the file name, defaulting to `message`.
fn infer_profile(file: Option<&Path>) -> Profile {
    let stem = file
        .and_then(Path::file_stem)
        .map(|stem| stem.to_string_lossy().to_ascii_lowercase())
        .unwrap_or_default();

    if stem.contains("insight") {
        Profile::Insights
    } else if stem.contains("recommend") {
        Profile::Recommendations
    } else {
        Profile::Message
    }
}

// =============================================================================
// Parse Command
// =============================================================================

fn cmd_parse(parser: &Parser, input: &str, args: &InputArgs) -> Result<()> {
    let result = parser.parse_with_diagnostics(input);

    for diagnostic in result.diagnostics.iter() {
        tracing::info!(kind = diagnostic.kind.as_str(), "{}", diagnostic);
    }

    if args.json {
        let doc = json::convert_document(&result.document);
        println!(
            "{}",
            serde_json::to_string_pretty(&doc).context("failed to serialize document")?
        );
    } else if args.verbose {
        print_document_verbose(&result.document);
    } else {
        print_document_summary(&result.document);
    }

    Ok(())
}

// =============================================================================
// Validate Command
// =============================================================================

fn cmd_validate(parser: &Parser, input: &str, args: &InputArgs) -> Result<()> {
    let result = parser.parse_with_diagnostics(input);

    if args.json {
        let diagnostics: Vec<_> = result
            .diagnostics
            .iter()
            .map(json::convert_diagnostic)
            .collect();
        println!(
            "{}",
            serde_json::json!({
                "profile": parser.profile().as_str(),
                "clean": result.is_ok(),
                "diagnostics": diagnostics,
            })
        );
    } else if result.is_ok() {
        println!("Clean: every line was used as written");
    } else {
        eprintln!("{} diagnostic(s):", result.diagnostics.len());
        for diagnostic in result.diagnostics.iter() {
            eprintln!("  - {}", diagnostic);
        }
    }

    if result.is_ok() {
        Ok(())
    } else {
        anyhow::bail!("{} diagnostic(s) found", result.diagnostics.len())
    }
}

// =============================================================================
// Stats Command
// =============================================================================

fn cmd_stats(parser: &Parser, input: &str, args: &InputArgs) -> Result<()> {
    let result = parser.parse_with_diagnostics(input);
    let stats = DocumentStats::from_result(&result, input);

    if args.json {
        println!(
            "{}",
            serde_json::to_string_pretty(&stats).context("failed to serialize stats")?
        );
        return Ok(());
    }

    println!("Document Statistics");
    println!("-------------------");
    println!("Profile:      {}", stats.profile);
    if let Some(mode) = stats.mode {
        println!("Mode:         {}", mode);
    }
    println!();
    println!("Content:");
    for (label, count) in &stats.counts {
        println!("  {:<16}{}", format!("{}:", label), count);
    }
    println!();
    println!("Size:");
    println!("  Characters:     {}", stats.chars);
    println!("  Words (est.):   {}", stats.words);
    println!("  Lines:          {}", stats.lines);
    println!();
    println!("Diagnostics:    {}", stats.diagnostics);

    Ok(())
}

#[derive(serde::Serialize)]
struct DocumentStats {
    profile: &'static str,
    mode: Option<&'static str>,
    counts: Vec<(&'static str, usize)>,
    chars: usize,
    words: usize,
    lines: usize,
    diagnostics: usize,
}

impl DocumentStats {
    fn from_result(result: &ParseResult, input: &str) -> Self {
        let (mode, counts) = match &result.document {
            Document::Insights(sections) => {
                let bullets = sections
                    .iter()
                    .flat_map(|s| &s.items)
                    .filter(|item| matches!(item, SectionItem::Bullet(_)))
                    .count();
                let items: usize = sections.iter().map(|s| s.items.len()).sum();
                (
                    None,
                    vec![
                        ("Sections", sections.len()),
                        ("Bullet items", bullets),
                        ("Text items", items - bullets),
                    ],
                )
            }
            Document::Recommendations(items) => {
                let sections: Vec<_> = items.iter().flat_map(|i| &i.sections).collect();
                let titled = sections.iter().filter(|s| s.title.is_some()).count();
                (
                    None,
                    vec![
                        ("Items", items.len()),
                        ("Titled sections", titled),
                        ("Paragraphs", sections.len() - titled),
                    ],
                )
            }
            Document::Message(Message::Structured(message)) => (
                Some("structured"),
                vec![
                    ("Observations", message.observations.len()),
                    ("Data points", message.data_points.len()),
                    ("Has summary", usize::from(!message.summary.is_empty())),
                ],
            ),
            Document::Message(Message::Lines(elements)) => {
                let mut counts = vec![
                    ("Headings", 0),
                    ("Lists", 0),
                    ("List items", 0),
                    ("Callouts", 0),
                    ("Paragraphs", 0),
                ];
                for element in elements {
                    match element {
                        FallbackElement::Heading(_) => counts[0].1 += 1,
                        FallbackElement::BulletList(l) | FallbackElement::NumberedList(l) => {
                            counts[1].1 += 1;
                            counts[2].1 += l.items.len();
                        }
                        FallbackElement::Callout(_) => counts[3].1 += 1,
                        FallbackElement::Paragraph(_) => counts[4].1 += 1,
                        FallbackElement::Spacer(_) => {}
                    }
                }
                (Some("lines"), counts)
            }
        };

        Self {
            profile: result.document.profile().as_str(),
            mode,
            counts,
            chars: input.chars().count(),
            words: input.split_whitespace().count(),
            lines: input.lines().count(),
            diagnostics: result.diagnostics.len(),
        }
    }
}

// =============================================================================
// Text Output
// =============================================================================

fn print_document_summary(doc: &Document) {
    println!("Profile: {}", doc.profile());

    match doc {
        Document::Insights(sections) => {
            println!("Sections: {}", sections.len());
            for (i, section) in sections.iter().enumerate() {
                println!("  [{}] {} ({} items)", i, section.title, section.items.len());
            }
        }
        Document::Recommendations(items) => {
            println!("Items: {}", items.len());
            for item in items {
                println!(
                    "  {}. {} ({} sections)",
                    item.number,
                    item.title,
                    item.sections.len()
                );
            }
        }
        Document::Message(Message::Structured(message)) => {
            println!("Mode: structured");
            println!("  Observations: {}", message.observations.len());
            println!("  Data points:  {}", message.data_points.len());
        }
        Document::Message(Message::Lines(elements)) => {
            println!("Mode: lines");
            println!("Elements: {}", elements.len());
            for (i, element) in elements.iter().enumerate() {
                println!("  [{}] {}", i, element_name(element));
            }
        }
    }
}

fn print_document_verbose(doc: &Document) {
    println!("Document {{");
    println!("  profile: {}", doc.profile());

    match doc {
        Document::Insights(sections) => {
            for section in sections {
                println!(
                    "  Section \"{}\" @{}..{}",
                    section.title, section.span.start, section.span.end
                );
                for item in &section.items {
                    match item {
                        SectionItem::Bullet(b) => {
                            println!("    Bullet \"{}\"", b.title);
                            for line in &b.content {
                                println!("      {}", line);
                            }
                        }
                        SectionItem::Text(t) => println!("    Text {}", t.content),
                    }
                }
            }
        }
        Document::Recommendations(items) => {
            for item in items {
                println!("  Item {}. \"{}\"", item.number, item.title);
                for section in &item.sections {
                    match &section.title {
                        Some(title) => println!("    Section \"{}\"", title),
                        None => println!("    Paragraph"),
                    }
                    for line in &section.content {
                        println!("      {}", line);
                    }
                }
            }
        }
        Document::Message(Message::Structured(message)) => {
            println!("  Intro: {}", message.intro);
            println!("  Observations:");
            for observation in &message.observations {
                println!("    {}", observation);
            }
            println!("  Data points:");
            for point in &message.data_points {
                println!(
                    "    {} = {} (percent: {}, extra: {})",
                    point.label,
                    point.value,
                    point.percent.as_deref().unwrap_or("-"),
                    point.extra.as_deref().unwrap_or("-"),
                );
            }
            println!("  Summary: {}", message.summary);
        }
        Document::Message(Message::Lines(elements)) => {
            for element in elements {
                print_element_verbose(element);
            }
        }
    }

    println!("}}");
}

fn print_element_verbose(element: &FallbackElement) {
    match element {
        FallbackElement::Heading(h) => println!("  Heading {}", h.text),
        FallbackElement::BulletList(l) | FallbackElement::NumberedList(l) => {
            println!("  {} ({} items)", element_name(element), l.items.len());
            for (i, item) in l.items.iter().enumerate() {
                println!("    Item {}: {}", i + 1, format_rich(item));
            }
        }
        FallbackElement::Callout(t) | FallbackElement::Paragraph(t) => {
            println!("  {} {}", element_name(element), format_rich(&t.content));
        }
        FallbackElement::Spacer(_) => println!("  Spacer"),
    }
}

fn element_name(element: &FallbackElement) -> &'static str {
    match element {
        FallbackElement::Heading(_) => "Heading",
        FallbackElement::BulletList(_) => "BulletList",
        FallbackElement::NumberedList(_) => "NumberedList",
        FallbackElement::Callout(_) => "Callout",
        FallbackElement::Paragraph(_) => "Paragraph",
        FallbackElement::Spacer(_) => "Spacer",
    }
}

/// Render inline runs with strong text in brackets.
fn format_rich(rich: &RichText) -> String {
    let mut result = String::new();
    for inline in &rich.inlines {
        if inline.is_strong() {
            result.push('[');
            result.push_str(inline.content(&rich.text));
            result.push(']');
        } else {
            result.push_str(inline.content(&rich.text));
        }
    }
    result
}
