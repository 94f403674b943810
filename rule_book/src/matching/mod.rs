//! Term matching - case-insensitive lookups over original text.
//!
//! Terms are compiled once into case-insensitive patterns and run against the
//! original (non-lowercased) text, so every reported offset is a valid byte offset
//! into that text and excerpts can be cut from it verbatim.

use regex::{Regex, RegexBuilder};
use serde::{Deserialize, Serialize};

use crate::error::{CatalogError, CatalogResult};

/// How a term must sit in the text to count as present.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum MatchMode {
    /// Plain containment: "gold" matches inside "goldfish".
    #[default]
    Substring,
    /// The term must start and end on word boundaries.
    WordBoundary,
}

/// A located occurrence of a term.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TermHit<'t> {
    /// The term as declared in the catalog.
    pub term: &'t str,
    /// Byte offset of the first matched byte.
    pub start: usize,
    /// Byte offset one past the last matched byte.
    pub end: usize,
}

#[derive(Debug, Clone)]
struct CompiledTerm {
    term: String,
    pattern: Regex,
}

/// An ordered list of compiled terms.
///
/// Declaration order is significant: every lookup reports the earliest-declared
/// term that matches, never the earliest position in the text.
#[derive(Debug, Clone)]
pub struct TermSet {
    terms: Vec<CompiledTerm>,
}

impl TermSet {
    /// Compile `terms` under the given match mode.
    pub fn compile<I, S>(terms: I, mode: MatchMode) -> CatalogResult<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let terms = terms
            .into_iter()
            .map(|term| compile_term(term.as_ref(), mode))
            .collect::<CatalogResult<Vec<_>>>()?;
        Ok(Self { terms })
    }

    /// Number of compiled terms.
    pub fn len(&self) -> usize {
        self.terms.len()
    }

    /// Whether the set holds no terms.
    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }

    /// All declared terms present in `text`, in declaration order.
    pub fn present_in<'a>(&'a self, text: &'a str) -> impl Iterator<Item = &'a str> + 'a {
        self.terms
            .iter()
            .filter(move |t| t.pattern.is_match(text))
            .map(|t| t.term.as_str())
    }

    /// The earliest-declared term present in `text`.
    pub fn first_present(&self, text: &str) -> Option<&str> {
        self.terms
            .iter()
            .find(|t| t.pattern.is_match(text))
            .map(|t| t.term.as_str())
    }

    /// Locate the earliest-declared term in `text`, at its earliest offset.
    pub fn find_in(&self, text: &str) -> Option<TermHit<'_>> {
        self.find_in_segments(&[text]).map(|(_, hit)| hit)
    }

    /// Locate the earliest-declared term across `segments`.
    ///
    /// Terms are tried in declaration order; for each term the segments are tried in
    /// order and the first occurrence wins. Returns the index of the segment the hit
    /// belongs to, with offsets relative to that segment.
    pub fn find_in_segments<S: AsRef<str>>(&self, segments: &[S]) -> Option<(usize, TermHit<'_>)> {
        for compiled in &self.terms {
            for (index, segment) in segments.iter().enumerate() {
                if let Some(m) = compiled.pattern.find(segment.as_ref()) {
                    return Some((
                        index,
                        TermHit {
                            term: &compiled.term,
                            start: m.start(),
                            end: m.end(),
                        },
                    ));
                }
            }
        }
        None
    }
}

fn compile_term(term: &str, mode: MatchMode) -> CatalogResult<CompiledTerm> {
    let trimmed = term.trim();
    let escaped = regex::escape(trimmed);
    let pattern = match mode {
        MatchMode::Substring => escaped,
        MatchMode::WordBoundary => {
            // `\b` next to a non-word edge would demand an adjacent word character.
            let lead = if starts_with_word_char(trimmed) { r"\b" } else { "" };
            let trail = if ends_with_word_char(trimmed) { r"\b" } else { "" };
            format!("{lead}{escaped}{trail}")
        }
    };

    let pattern = RegexBuilder::new(&pattern)
        .case_insensitive(true)
        .build()
        .map_err(|e| CatalogError::InvalidTerm {
            term: term.to_string(),
            reason: e.to_string(),
        })?;

    Ok(CompiledTerm {
        term: term.to_string(),
        pattern,
    })
}

fn is_word_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_'
}

fn starts_with_word_char(term: &str) -> bool {
    term.chars().next().is_some_and(is_word_char)
}

fn ends_with_word_char(term: &str) -> bool {
    term.chars().next_back().is_some_and(is_word_char)
}
