//! Trait rules - soft character constraints.

use serde::{Deserialize, Serialize};

use super::owned_terms;

/// A character trait implied by the backstory and the narrative terms in tension with it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TraitRule {
    /// Trait name, e.g. "impoverished".
    pub name: String,

    /// What the violations have in common, e.g. "wealth".
    pub tension: String,

    /// Backstory terms implying the trait.
    pub signals: Vec<String>,

    /// Narrative terms incompatible with the trait, in priority order.
    pub violations: Vec<String>,
}

impl TraitRule {
    /// Create a new trait rule with no terms.
    pub fn new(name: impl Into<String>, tension: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            tension: tension.into(),
            signals: Vec::new(),
            violations: Vec::new(),
        }
    }

    /// Backstory terms that establish the trait.
    pub fn with_signals<I, S>(mut self, terms: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.signals = owned_terms(terms);
        self
    }

    /// Narrative terms that put the trait under tension.
    pub fn with_violations<I, S>(mut self, terms: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.violations = owned_terms(terms);
        self
    }
}
