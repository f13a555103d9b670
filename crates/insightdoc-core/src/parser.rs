//! Profile dispatch.

use std::fmt;
use std::str::FromStr;

use crate::ast::{Document, Profile};
use crate::error::{Diagnostics, UnknownProfile};
use crate::{insights, message, recommendations};

/// Result of a parse together with the diagnostics it produced.
#[derive(Debug)]
pub struct ParseResult<'a> {
    pub document: Document<'a>,
    pub diagnostics: Diagnostics,
}

impl<'a> ParseResult<'a> {
    /// Check if the input was read without any soft failure.
    pub fn is_ok(&self) -> bool {
        self.diagnostics.is_empty()
    }
}

/// Parser for one profile.
///
/// Parsing is total: every input, including the empty string, yields a
/// document.
#[derive(Debug, Clone, Copy)]
pub struct Parser {
    profile: Profile,
    diagnostics: bool,
}

impl Parser {
    /// Create a new parser with the given profile.
    #[inline]
    pub fn new(profile: Profile) -> Self {
        Self {
            profile,
            diagnostics: true,
        }
    }

    /// Enable or disable diagnostic collection.
    ///
    /// When disabled, [`Parser::parse_with_diagnostics`] always returns an
    /// empty collection.
    pub fn with_diagnostics(mut self, enabled: bool) -> Self {
        self.diagnostics = enabled;
        self
    }

    pub fn profile(&self) -> Profile {
        self.profile
    }

    /// Parse `input` into a document, ignoring diagnostics.
    pub fn parse<'a>(&self, input: &'a str) -> Document<'a> {
        self.parse_into(input, &mut Diagnostics::disabled())
    }

    /// Parse `input`, returning the document and its diagnostics.
    pub fn parse_with_diagnostics<'a>(&self, input: &'a str) -> ParseResult<'a> {
        let mut diagnostics = if self.diagnostics {
            Diagnostics::new()
        } else {
            Diagnostics::disabled()
        };
        let document = self.parse_into(input, &mut diagnostics);
        ParseResult {
            document,
            diagnostics,
        }
    }

    fn parse_into<'a>(&self, input: &'a str, diagnostics: &mut Diagnostics) -> Document<'a> {
        tracing::trace!(profile = %self.profile, bytes = input.len(), "parsing");
        match self.profile {
            Profile::Insights => Document::Insights(insights::parse_with(input, diagnostics)),
            Profile::Recommendations => {
                Document::Recommendations(recommendations::parse_with(input, diagnostics))
            }
            Profile::Message => Document::Message(message::parse_with(input, diagnostics)),
        }
    }
}

impl FromStr for Profile {
    type Err = UnknownProfile;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Profile::ALL
            .into_iter()
            .find(|profile| profile.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| UnknownProfile {
                name: s.to_string(),
            })
    }
}

impl fmt::Display for Profile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

