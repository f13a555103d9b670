//! Serializable mirror of the core document tree.

use insightdoc_core::inline::parse_inlines;
use insightdoc_core::{
    DataPoint, Diagnostic, Document, FallbackElement, Inline, InlineKind, Message,
    RecommendationItem, RichText, Section, SectionItem, Span, StructuredMessage,
};
use serde::Serialize;

#[derive(Serialize)]
#[serde(tag = "profile", rename_all = "lowercase")]
pub enum JsonDocument<'a> {
    Insights { sections: Vec<JsonSection<'a>> },
    Recommendations { items: Vec<JsonRecommendation<'a>> },
    Message { message: JsonMessage<'a> },
}

#[derive(Serialize)]
pub struct JsonSection<'a> {
    title: &'a str,
    items: Vec<JsonSectionItem<'a>>,
}

#[derive(Serialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum JsonSectionItem<'a> {
    Bullet { title: &'a str, content: Vec<&'a str> },
    Text { content: &'a str },
}

#[derive(Serialize)]
pub struct JsonRecommendation<'a> {
    number: &'a str,
    title: &'a str,
    sections: Vec<JsonRecSection<'a>>,
}

#[derive(Serialize)]
pub struct JsonRecSection<'a> {
    title: Option<&'a str>,
    content: Vec<&'a str>,
}

#[derive(Serialize)]
#[serde(tag = "mode", rename_all = "lowercase")]
pub enum JsonMessage<'a> {
    Structured {
        intro: Vec<JsonInline<'a>>,
        observations: Vec<Vec<JsonInline<'a>>>,
        data_points: Vec<JsonDataPoint<'a>>,
        summary: &'a str,
    },
    Lines {
        elements: Vec<JsonElement<'a>>,
    },
}

#[derive(Serialize)]
pub struct JsonDataPoint<'a> {
    label: &'a str,
    value: &'a str,
    percent: Option<&'a str>,
    extra: Option<&'a str>,
    raw: &'a str,
}

#[derive(Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum JsonElement<'a> {
    Heading { text: &'a str },
    BulletList { items: Vec<Vec<JsonInline<'a>>> },
    NumberedList { items: Vec<Vec<JsonInline<'a>>> },
    Callout { content: Vec<JsonInline<'a>> },
    Paragraph { content: Vec<JsonInline<'a>> },
    Spacer,
}

#[derive(Serialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum JsonInline<'a> {
    Text { content: &'a str },
    Strong { content: &'a str },
}

#[derive(Serialize)]
pub struct JsonDiagnostic<'a> {
    kind: &'static str,
    message: &'a str,
    line: Option<usize>,
    span: Option<JsonSpan>,
}

#[derive(Serialize)]
pub struct JsonSpan {
    start: u32,
    end: u32,
}

pub fn convert_document<'a>(doc: &'a Document) -> JsonDocument<'a> {
    match doc {
        Document::Insights(sections) => JsonDocument::Insights {
            sections: sections.iter().map(convert_section).collect(),
        },
        Document::Recommendations(items) => JsonDocument::Recommendations {
            items: items.iter().map(convert_recommendation).collect(),
        },
        Document::Message(message) => JsonDocument::Message {
            message: convert_message(message),
        },
    }
}

pub fn convert_diagnostic(diagnostic: &Diagnostic) -> JsonDiagnostic<'_> {
    JsonDiagnostic {
        kind: diagnostic.kind.as_str(),
        message: &diagnostic.message,
        line: diagnostic.line.map(|line| line + 1),
        span: diagnostic.span.map(convert_span),
    }
}

fn convert_span(span: Span) -> JsonSpan {
    JsonSpan {
        start: span.start,
        end: span.end,
    }
}

fn convert_section<'a>(section: &'a Section) -> JsonSection<'a> {
    JsonSection {
        title: &section.title,
        items: section
            .items
            .iter()
            .map(|item| match item {
                SectionItem::Bullet(b) => JsonSectionItem::Bullet {
                    title: &b.title,
                    content: b.content.iter().map(|c| &**c).collect(),
                },
                SectionItem::Text(t) => JsonSectionItem::Text {
                    content: &t.content,
                },
            })
            .collect(),
    }
}

fn convert_recommendation<'a>(item: &'a RecommendationItem) -> JsonRecommendation<'a> {
    JsonRecommendation {
        number: &item.number,
        title: &item.title,
        sections: item
            .sections
            .iter()
            .map(|section| JsonRecSection {
                title: section.title.as_deref(),
                content: section.content.iter().map(|c| &**c).collect(),
            })
            .collect(),
    }
}

fn convert_message<'a>(message: &'a Message) -> JsonMessage<'a> {
    match message {
        Message::Structured(s) => convert_structured(s),
        Message::Lines(elements) => JsonMessage::Lines {
            elements: elements.iter().map(convert_element).collect(),
        },
    }
}

fn convert_structured<'a>(message: &'a StructuredMessage) -> JsonMessage<'a> {
    JsonMessage::Structured {
        intro: split_emphasis(&message.intro),
        observations: message
            .observations
            .iter()
            .map(|o| split_emphasis(o))
            .collect(),
        data_points: message.data_points.iter().map(convert_data_point).collect(),
        summary: &message.summary,
    }
}

fn convert_data_point<'a>(point: &'a DataPoint) -> JsonDataPoint<'a> {
    JsonDataPoint {
        label: &point.label,
        value: &point.value,
        percent: point.percent.as_deref(),
        extra: point.extra.as_deref(),
        raw: &point.raw,
    }
}

fn convert_element<'a>(element: &'a FallbackElement) -> JsonElement<'a> {
    match element {
        FallbackElement::Heading(h) => JsonElement::Heading { text: &h.text },
        FallbackElement::BulletList(l) => JsonElement::BulletList {
            items: l.items.iter().map(convert_rich).collect(),
        },
        FallbackElement::NumberedList(l) => JsonElement::NumberedList {
            items: l.items.iter().map(convert_rich).collect(),
        },
        FallbackElement::Callout(t) => JsonElement::Callout {
            content: convert_rich(&t.content),
        },
        FallbackElement::Paragraph(t) => JsonElement::Paragraph {
            content: convert_rich(&t.content),
        },
        FallbackElement::Spacer(_) => JsonElement::Spacer,
    }
}

fn convert_rich<'a>(rich: &'a RichText) -> Vec<JsonInline<'a>> {
    convert_inlines(&rich.text, &rich.inlines)
}

fn split_emphasis(text: &str) -> Vec<JsonInline<'_>> {
    convert_inlines(text, &parse_inlines(text))
}

fn convert_inlines<'a>(text: &'a str, inlines: &[Inline]) -> Vec<JsonInline<'a>> {
    inlines
        .iter()
        .map(|inline| match inline.kind {
            InlineKind::Text => JsonInline::Text {
                content: inline.content(text),
            },
            InlineKind::Strong => JsonInline::Strong {
                content: inline.content(text),
            },
        })
        .collect()
}
