//! Python bindings for the insightdoc parsers.

use insightdoc_core::{
    inline::parse_inlines, BulletItem, DataPoint, Diagnostic, Document, FallbackElement, Inline,
    InlineKind, Message, ParseResult as CoreParseResult, Parser as CoreParser,
    Profile as CoreProfile, RecItemSection, RecommendationItem, RichText, Section, SectionItem,
    Span as CoreSpan, StructuredMessage, TextItem,
};
use pyo3::prelude::*;
use pyo3::types::PyList;

// ============================================================================
// Span and Profile
// ============================================================================

/// Source location in the input text (byte offsets).
#[pyclass(frozen, get_all, name = "Span")]
#[derive(Clone)]
pub struct PySpan {
    pub start: u32,
    pub end: u32,
}

#[pymethods]
impl PySpan {
    fn __repr__(&self) -> String {
        format!("Span({}, {})", self.start, self.end)
    }

    #[getter]
    fn len(&self) -> u32 {
        self.end.saturating_sub(self.start)
    }
}

impl From<CoreSpan> for PySpan {
    fn from(s: CoreSpan) -> Self {
        PySpan {
            start: s.start,
            end: s.end,
        }
    }
}

/// Parsing profile.
#[pyclass(frozen, eq, eq_int, name = "Profile")]
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum PyProfile {
    Insights,
    Recommendations,
    Message,
}

impl From<CoreProfile> for PyProfile {
    fn from(p: CoreProfile) -> Self {
        match p {
            CoreProfile::Insights => PyProfile::Insights,
            CoreProfile::Recommendations => PyProfile::Recommendations,
            CoreProfile::Message => PyProfile::Message,
        }
    }
}

impl From<PyProfile> for CoreProfile {
    fn from(p: PyProfile) -> Self {
        match p {
            PyProfile::Insights => CoreProfile::Insights,
            PyProfile::Recommendations => CoreProfile::Recommendations,
            PyProfile::Message => CoreProfile::Message,
        }
    }
}

// ============================================================================
// Inline text
// ============================================================================

/// A run of display text; `kind` is `"text"` or `"strong"`.
#[pyclass(frozen, get_all, name = "Inline")]
#[derive(Clone)]
pub struct PyInline {
    pub kind: &'static str,
    pub content: String,
}

#[pymethods]
impl PyInline {
    fn __repr__(&self) -> String {
        format!("Inline({}, {:?})", self.kind, self.content)
    }
}

/// Text together with its emphasis runs.
#[pyclass(frozen, get_all, name = "RichText")]
#[derive(Clone)]
pub struct PyRichText {
    pub text: String,
    pub inlines: Vec<PyInline>,
}

#[pymethods]
impl PyRichText {
    /// Text with emphasis markers removed.
    #[getter]
    fn plain(&self) -> String {
        self.inlines.iter().map(|i| i.content.as_str()).collect()
    }

    fn __repr__(&self) -> String {
        format!("RichText({:?})", self.text)
    }
}

fn convert_inlines(text: &str, inlines: &[Inline]) -> Vec<PyInline> {
    inlines
        .iter()
        .map(|inline| PyInline {
            kind: match inline.kind {
                InlineKind::Text => "text",
                InlineKind::Strong => "strong",
            },
            content: inline.content(text).to_string(),
        })
        .collect()
}

impl From<RichText<'_>> for PyRichText {
    fn from(rich: RichText<'_>) -> Self {
        PyRichText {
            inlines: convert_inlines(&rich.text, &rich.inlines),
            text: rich.text.into_owned(),
        }
    }
}

fn rich_from_str(text: &str) -> PyRichText {
    PyRichText {
        text: text.to_string(),
        inlines: convert_inlines(text, &parse_inlines(text)),
    }
}

// ============================================================================
// Insights
// ============================================================================

/// Titled group of items.
#[pyclass(frozen, get_all, name = "Section")]
pub struct PySection {
    pub title: String,
    /// List of `BulletItem` and `TextItem`.
    pub items: PyObject,
    pub span: PySpan,
}

/// Bold-titled bullet and the lines that followed it.
#[pyclass(frozen, get_all, name = "BulletItem")]
pub struct PyBulletItem {
    pub title: String,
    pub content: Vec<String>,
    pub span: PySpan,
}

/// Standalone line of a section.
#[pyclass(frozen, get_all, name = "TextItem")]
pub struct PyTextItem {
    pub content: String,
    pub span: PySpan,
}

fn convert_sections(py: Python<'_>, sections: Vec<Section>) -> PyResult<PyObject> {
    let list = PyList::empty(py);
    for section in sections {
        let items = PyList::empty(py);
        for item in section.items {
            match item {
                SectionItem::Bullet(BulletItem {
                    title,
                    content,
                    span,
                }) => items.append(Py::new(
                    py,
                    PyBulletItem {
                        title: title.into_owned(),
                        content: content.into_iter().map(|c| c.into_owned()).collect(),
                        span: span.into(),
                    },
                )?)?,
                SectionItem::Text(TextItem { content, span }) => items.append(Py::new(
                    py,
                    PyTextItem {
                        content: content.into_owned(),
                        span: span.into(),
                    },
                )?)?,
            }
        }
        list.append(Py::new(
            py,
            PySection {
                title: section.title.into_owned(),
                items: items.into_any().unbind(),
                span: section.span.into(),
            },
        )?)?;
    }
    Ok(list.into_any().unbind())
}

// ============================================================================
// Recommendations
// ============================================================================

/// Numbered recommendation.
#[pyclass(frozen, get_all, name = "RecommendationItem")]
pub struct PyRecommendationItem {
    pub number: String,
    pub title: String,
    pub sections: Vec<PyRecItemSection>,
    pub span: PySpan,
}

/// Run of body lines inside a recommendation; `title` is `None` for a bare
/// paragraph.
#[pyclass(frozen, get_all, name = "RecItemSection")]
#[derive(Clone)]
pub struct PyRecItemSection {
    pub title: Option<String>,
    pub content: Vec<String>,
    pub span: PySpan,
}

impl From<RecItemSection<'_>> for PyRecItemSection {
    fn from(section: RecItemSection<'_>) -> Self {
        PyRecItemSection {
            title: section.title.map(|t| t.into_owned()),
            content: section.content.into_iter().map(|c| c.into_owned()).collect(),
            span: section.span.into(),
        }
    }
}

fn convert_recommendations(py: Python<'_>, items: Vec<RecommendationItem>) -> PyResult<PyObject> {
    let list = PyList::empty(py);
    for item in items {
        list.append(Py::new(
            py,
            PyRecommendationItem {
                number: item.number.into_owned(),
                title: item.title.into_owned(),
                sections: item.sections.into_iter().map(PyRecItemSection::from).collect(),
                span: item.span.into(),
            },
        )?)?;
    }
    Ok(list.into_any().unbind())
}

// ============================================================================
// Message
// ============================================================================

/// Overview message split around its anchor lines.
#[pyclass(frozen, get_all, name = "StructuredMessage")]
pub struct PyStructuredMessage {
    pub intro: PyRichText,
    pub observations: Vec<PyRichText>,
    pub data_points: Vec<PyDataPoint>,
    pub summary: String,
}

/// One metric line such as `Hours: 40h (+10%)`.
#[pyclass(frozen, get_all, name = "DataPoint")]
#[derive(Clone)]
pub struct PyDataPoint {
    pub label: String,
    pub value: String,
    pub percent: Option<String>,
    pub extra: Option<String>,
    pub raw: String,
}

#[pymethods]
impl PyDataPoint {
    fn __repr__(&self) -> String {
        format!("DataPoint({:?}, {:?})", self.label, self.value)
    }
}

impl From<DataPoint<'_>> for PyDataPoint {
    fn from(point: DataPoint<'_>) -> Self {
        PyDataPoint {
            label: point.label.into_owned(),
            value: point.value.into_owned(),
            percent: point.percent.map(|p| p.into_owned()),
            extra: point.extra.map(|e| e.into_owned()),
            raw: point.raw.into_owned(),
        }
    }
}

impl From<StructuredMessage<'_>> for PyStructuredMessage {
    fn from(message: StructuredMessage<'_>) -> Self {
        PyStructuredMessage {
            intro: rich_from_str(&message.intro),
            observations: message.observations.iter().map(|o| rich_from_str(o)).collect(),
            data_points: message.data_points.into_iter().map(PyDataPoint::from).collect(),
            summary: message.summary.into_owned(),
        }
    }
}

/// `#`..`###` line or a line that is one bold run.
#[pyclass(frozen, get_all, name = "Heading")]
pub struct PyHeading {
    pub text: String,
    pub span: PySpan,
}

/// Consecutive `*`/`-` lines.
#[pyclass(frozen, get_all, name = "BulletList")]
pub struct PyBulletList {
    pub items: Vec<PyRichText>,
    pub span: PySpan,
}

/// Consecutive `n.` lines.
#[pyclass(frozen, get_all, name = "NumberedList")]
pub struct PyNumberedList {
    pub items: Vec<PyRichText>,
    pub span: PySpan,
}

/// Line opening with an attention glyph.
#[pyclass(frozen, get_all, name = "Callout")]
pub struct PyCallout {
    pub content: PyRichText,
    pub span: PySpan,
}

#[pyclass(frozen, get_all, name = "Paragraph")]
pub struct PyParagraph {
    pub content: PyRichText,
    pub span: PySpan,
}

/// Blank line.
#[pyclass(frozen, get_all, name = "Spacer")]
pub struct PySpacer {
    pub span: PySpan,
}

fn convert_elements(py: Python<'_>, elements: Vec<FallbackElement>) -> PyResult<PyObject> {
    let list = PyList::empty(py);
    for element in elements {
        let obj = match element {
            FallbackElement::Heading(h) => Py::new(
                py,
                PyHeading {
                    text: h.text.into_owned(),
                    span: h.span.into(),
                },
            )?
            .into_any(),
            FallbackElement::BulletList(l) => Py::new(
                py,
                PyBulletList {
                    items: l.items.into_iter().map(PyRichText::from).collect(),
                    span: l.span.into(),
                },
            )?
            .into_any(),
            FallbackElement::NumberedList(l) => Py::new(
                py,
                PyNumberedList {
                    items: l.items.into_iter().map(PyRichText::from).collect(),
                    span: l.span.into(),
                },
            )?
            .into_any(),
            FallbackElement::Callout(t) => Py::new(
                py,
                PyCallout {
                    content: t.content.into(),
                    span: t.span.into(),
                },
            )?
            .into_any(),
            FallbackElement::Paragraph(t) => Py::new(
                py,
                PyParagraph {
                    content: t.content.into(),
                    span: t.span.into(),
                },
            )?
            .into_any(),
            FallbackElement::Spacer(span) => Py::new(py, PySpacer { span: span.into() })?.into_any(),
        };
        list.append(obj)?;
    }
    Ok(list.into_any().unbind())
}

// ============================================================================
// Document
// ============================================================================

/// Parsed document.
///
/// `content` is a list of `Section` (insights), a list of
/// `RecommendationItem` (recommendations), a `StructuredMessage`, or a list
/// of line elements (message with no anchor lines). `mode` tells the two
/// message renderings apart.
#[pyclass(frozen, get_all, name = "Document")]
pub struct PyDocument {
    pub profile: PyProfile,
    pub mode: Option<&'static str>,
    pub content: PyObject,
}

#[pymethods]
impl PyDocument {
    fn __repr__(&self) -> String {
        match self.mode {
            Some(mode) => format!("Document(profile={:?}, mode={})", self.profile, mode),
            None => format!("Document(profile={:?})", self.profile),
        }
    }
}

fn convert_document(py: Python<'_>, doc: Document) -> PyResult<PyDocument> {
    let profile = doc.profile().into();
    let (mode, content) = match doc {
        Document::Insights(sections) => (None, convert_sections(py, sections)?),
        Document::Recommendations(items) => (None, convert_recommendations(py, items)?),
        Document::Message(Message::Structured(message)) => (
            Some("structured"),
            Py::new(py, PyStructuredMessage::from(message))?.into_any(),
        ),
        Document::Message(Message::Lines(elements)) => {
            (Some("lines"), convert_elements(py, elements)?)
        }
    };
    Ok(PyDocument {
        profile,
        mode,
        content,
    })
}

// ============================================================================
// Diagnostics and ParseResult
// ============================================================================

/// Non-fatal note about a skipped or reinterpreted line.
#[pyclass(frozen, get_all, name = "Diagnostic")]
#[derive(Clone)]
pub struct PyDiagnostic {
    pub kind: &'static str,
    pub message: String,
    /// One-based line number.
    pub line: Option<usize>,
    pub span: Option<PySpan>,
}

#[pymethods]
impl PyDiagnostic {
    fn __repr__(&self) -> String {
        format!("Diagnostic({}, {:?})", self.kind, self.message)
    }

    fn __str__(&self) -> String {
        match self.line {
            Some(line) => format!("{}: {} (line {})", self.kind, self.message, line),
            None => format!("{}: {}", self.kind, self.message),
        }
    }
}

impl From<Diagnostic> for PyDiagnostic {
    fn from(d: Diagnostic) -> Self {
        PyDiagnostic {
            kind: d.kind.as_str(),
            message: d.message,
            line: d.line.map(|line| line + 1),
            span: d.span.map(PySpan::from),
        }
    }
}

/// Document together with its diagnostics.
#[pyclass(frozen, name = "ParseResult")]
pub struct PyParseResult {
    #[pyo3(get)]
    pub document: Py<PyDocument>,
    #[pyo3(get)]
    pub diagnostics: Vec<PyDiagnostic>,
}

#[pymethods]
impl PyParseResult {
    #[getter]
    fn ok(&self) -> bool {
        self.diagnostics.is_empty()
    }

    fn __repr__(&self) -> String {
        format!(
            "ParseResult(ok={}, diagnostics={})",
            self.diagnostics.is_empty(),
            self.diagnostics.len()
        )
    }
}

// ============================================================================
// Parser
// ============================================================================

/// Assistant response parser.
///
/// Args:
///     profile: Profile.Message (default), Profile.Insights, or
///         Profile.Recommendations
#[pyclass(name = "Parser")]
pub struct PyParser {
    profile: CoreProfile,
}

#[pymethods]
impl PyParser {
    #[new]
    #[pyo3(signature = (profile=None), text_signature = "(profile=None)")]
    fn new(profile: Option<PyProfile>) -> Self {
        PyParser {
            profile: profile.unwrap_or(PyProfile::Message).into(),
        }
    }

    /// Parse a response. Never fails on any input.
    #[pyo3(text_signature = "(self, input)")]
    fn parse(&self, py: Python<'_>, input: &str) -> PyResult<PyDocument> {
        convert_document(py, CoreParser::new(self.profile).parse(input))
    }

    /// Parse a response, also returning diagnostics.
    #[pyo3(text_signature = "(self, input)")]
    fn parse_with_diagnostics(&self, py: Python<'_>, input: &str) -> PyResult<PyParseResult> {
        let CoreParseResult {
            document,
            diagnostics,
        } = CoreParser::new(self.profile).parse_with_diagnostics(input);
        Ok(PyParseResult {
            document: Py::new(py, convert_document(py, document)?)?,
            diagnostics: diagnostics.into_iter().map(PyDiagnostic::from).collect(),
        })
    }

    fn __repr__(&self) -> String {
        format!("Parser(profile={})", self.profile)
    }
}

// ============================================================================
// Module functions
// ============================================================================

/// Parse an assistant response.
///
/// Args:
///     input: Response text
///     profile: Parsing profile (default: Profile.Message)
///
/// Returns:
///     Document: Parsed document
#[pyfunction]
#[pyo3(signature = (input, profile=None), text_signature = "(input, profile=None)")]
fn parse(py: Python<'_>, input: &str, profile: Option<PyProfile>) -> PyResult<PyDocument> {
    PyParser::new(profile).parse(py, input)
}

/// Parse an assistant response, also returning diagnostics.
///
/// Args:
///     input: Response text
///     profile: Parsing profile (default: Profile.Message)
///
/// Returns:
///     ParseResult: Document and diagnostics
#[pyfunction]
#[pyo3(signature = (input, profile=None), text_signature = "(input, profile=None)")]
fn parse_with_diagnostics(
    py: Python<'_>,
    input: &str,
    profile: Option<PyProfile>,
) -> PyResult<PyParseResult> {
    PyParser::new(profile).parse_with_diagnostics(py, input)
}

// ============================================================================
// Module
// ============================================================================

/// Structured parsing of free-form assistant responses.
#[pymodule]
fn pyidoc(m: &Bound<'_, PyModule>) -> PyResult<()> {
    m.add_class::<PySpan>()?;
    m.add_class::<PyProfile>()?;
    m.add_class::<PyParser>()?;
    m.add_class::<PyDocument>()?;
    m.add_class::<PyParseResult>()?;
    m.add_class::<PyDiagnostic>()?;
    m.add_class::<PyInline>()?;
    m.add_class::<PyRichText>()?;
    m.add_class::<PySection>()?;
    m.add_class::<PyBulletItem>()?;
    m.add_class::<PyTextItem>()?;
    m.add_class::<PyRecommendationItem>()?;
    m.add_class::<PyRecItemSection>()?;
    m.add_class::<PyStructuredMessage>()?;
    m.add_class::<PyDataPoint>()?;
    m.add_class::<PyHeading>()?;
    m.add_class::<PyBulletList>()?;
    m.add_class::<PyNumberedList>()?;
    m.add_class::<PyCallout>()?;
    m.add_class::<PyParagraph>()?;
    m.add_class::<PySpacer>()?;
    m.add_function(wrap_pyfunction!(parse, m)?)?;
    m.add_function(wrap_pyfunction!(parse_with_diagnostics, m)?)?;
    Ok(())
}
