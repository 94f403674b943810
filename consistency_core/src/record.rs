//! Records in, verdicts out.

use rule_book::Severity;
use serde::{Deserialize, Serialize};

use crate::grounding::Grounding;

/// Identifier of an input row.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StoryId(pub String);

impl StoryId {
    /// Wrap a raw identifier as read from the input table.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// The identifier as written to the results table.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for StoryId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for StoryId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

/// One row of the input table. Missing cells are empty strings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Record {
    pub story_id: StoryId,
    pub backstory: String,
    pub narrative: String,
}

impl Record {
    /// Build a record from its three input columns.
    pub fn new(
        story_id: impl Into<String>,
        backstory: impl Into<String>,
        narrative: impl Into<String>,
    ) -> Self {
        Self {
            story_id: StoryId::new(story_id),
            backstory: backstory.into(),
            narrative: narrative.into(),
        }
    }
}

/// Binary label written to the results table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Prediction {
    Contradictory,
    Consistent,
}

impl Prediction {
    /// 0 = contradictory, 1 = consistent.
    pub fn label(&self) -> u8 {
        match self {
            Prediction::Contradictory => 0,
            Prediction::Consistent => 1,
        }
    }
}

/// Where an evidence excerpt was cut from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum EvidenceSource {
    Narrative,
    Corpus { document: String },
}

impl std::fmt::Display for EvidenceSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            EvidenceSource::Narrative => write!(f, "narrative"),
            EvidenceSource::Corpus { document } => write!(f, "corpus text '{}'", document),
        }
    }
}

/// A verbatim window of text around a matched term.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Evidence {
    pub source: EvidenceSource,
    /// The catalog term that matched.
    pub term: String,
    /// Byte offset of the match in the source text.
    pub offset: usize,
    pub excerpt: String,
}

/// The rule or gate a verdict rests on.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Basis {
    /// The grounding gate rejected the backstory.
    Grounding { grounding: Grounding },
    /// An invariant rule fired.
    Invariant { rule: String },
    /// A trait rule fired.
    Trait { rule: String, severity: Severity },
    /// Nothing fired; the grounding verdict stands.
    NoViolation { grounding: Grounding },
}

impl std::fmt::Display for Basis {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Basis::Grounding { grounding } => write!(f, "grounding:{}", grounding.name()),
            Basis::Invariant { rule } => write!(f, "invariant:{}", rule),
            Basis::Trait { rule, severity } => write!(f, "trait:{} ({})", rule, severity),
            Basis::NoViolation { grounding } => write!(f, "no-violation:{}", grounding.name()),
        }
    }
}

/// The judgement for one record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Verdict {
    pub story_id: StoryId,
    pub prediction: Prediction,
    pub rationale: String,
    pub basis: Basis,
    pub evidence: Option<Evidence>,
}
