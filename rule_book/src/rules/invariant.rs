//! Invariant rules - irreversible past states.

use serde::{Deserialize, Serialize};

use super::{owned_terms, Severity};

/// An irreversible-state class (death, imprisonment, binding commitment).
///
/// The rule fires when one of `backstory_terms` appears in the backstory and one of
/// `narrative_terms` appears in the searched text. A firing invariant always
/// produces a contradiction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InvariantRule {
    /// Short class name, e.g. "life-death".
    pub name: String,

    /// The paradox this rule detects, e.g. "death vs. survival".
    pub paradox: String,

    /// Sentence quoted in the rationale when the rule fires.
    #[serde(default)]
    pub explanation: String,

    /// Terms in a backstory that establish the irreversible state.
    pub backstory_terms: Vec<String>,

    /// Terms in a narrative describing behavior impossible under that state.
    pub narrative_terms: Vec<String>,

    #[serde(default)]
    pub severity: Severity,
}

impl InvariantRule {
    /// Create a new invariant rule with no terms.
    pub fn new(name: impl Into<String>, paradox: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            paradox: paradox.into(),
            explanation: String::new(),
            backstory_terms: Vec::new(),
            narrative_terms: Vec::new(),
            severity: Severity::Fatal,
        }
    }

    /// Set the rationale sentence.
    pub fn with_explanation(mut self, explanation: impl Into<String>) -> Self {
        self.explanation = explanation.into();
        self
    }

    /// Set the backstory terms, in priority order.
    pub fn with_backstory_terms<I, S>(mut self, terms: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.backstory_terms = owned_terms(terms);
        self
    }

    /// Set the narrative terms, in priority order.
    pub fn with_narrative_terms<I, S>(mut self, terms: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.narrative_terms = owned_terms(terms);
        self
    }
}
