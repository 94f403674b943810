//! Rule definitions for the catalog.

mod invariant;
mod trait_rule;

pub use invariant::*;
pub use trait_rule::*;

use serde::{Deserialize, Serialize};

/// How a finding affects the final verdict.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    /// Decides the verdict; never suppressed by later checks.
    #[default]
    Fatal,
    /// Reported in the rationale but does not flip the prediction.
    Advisory,
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Severity::Fatal => write!(f, "fatal"),
            Severity::Advisory => write!(f, "advisory"),
        }
    }
}

pub(crate) fn owned_terms<I, S>(terms: I) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    terms.into_iter().map(Into::into).collect()
}
