//! Rule catalog - the immutable rule set consulted by the judge.
//!
//! A catalog is described by a [`CatalogSpec`] (plain data, loadable from TOML),
//! validated, and then compiled into a [`RuleCatalog`] whose term matchers are
//! built once and shared read-only across every record of a run.

pub mod defaults;

use serde::{Deserialize, Serialize};
use std::collections::HashSet;

use crate::error::{CatalogError, CatalogResult};
use crate::matching::{MatchMode, TermSet};
use crate::rules::{InvariantRule, Severity, TraitRule};

/// Declarative description of a catalog.
///
/// Any list left out of a TOML document falls back to the built-in table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogSpec {
    /// Invariant rules, highest priority first.
    #[serde(default = "defaults::invariant_rules")]
    pub invariants: Vec<InvariantRule>,

    /// Trait rules, in evaluation order.
    #[serde(default = "defaults::trait_rules")]
    pub traits: Vec<TraitRule>,

    /// Vocabulary counted when judging whether a backstory is grounded.
    #[serde(default = "defaults::key_signals")]
    pub key_signals: Vec<String>,
}

impl Default for CatalogSpec {
    fn default() -> Self {
        Self::builtin()
    }
}

impl CatalogSpec {
    /// The built-in rule tables.
    pub fn builtin() -> Self {
        Self {
            invariants: defaults::invariant_rules(),
            traits: defaults::trait_rules(),
            key_signals: defaults::key_signals(),
        }
    }

    /// Parse a catalog from a TOML document.
    pub fn from_toml_str(source: &str) -> CatalogResult<Self> {
        Ok(toml::from_str(source)?)
    }

    /// Check the structural rules every catalog must satisfy.
    pub fn validate(&self) -> CatalogResult<()> {
        let mut names = HashSet::new();

        for rule in &self.invariants {
            check_name("invariant", &rule.name, &mut names)?;
            if rule.severity != Severity::Fatal {
                return Err(CatalogError::NonFatalInvariant {
                    rule: rule.name.clone(),
                });
            }
            check_terms(&rule.name, "backstory terms", &rule.backstory_terms)?;
            check_terms(&rule.name, "narrative terms", &rule.narrative_terms)?;
        }

        for rule in &self.traits {
            check_name("trait", &rule.name, &mut names)?;
            check_terms(&rule.name, "signals", &rule.signals)?;
            check_terms(&rule.name, "violations", &rule.violations)?;
        }

        check_terms("key_signals", "terms", &self.key_signals)?;

        // Invariants always win, but a term claimed by both kinds makes the
        // catalog's intent unreadable.
        for invariant in &self.invariants {
            for term in &invariant.backstory_terms {
                let folded = fold(term);
                if let Some(rule) = self
                    .traits
                    .iter()
                    .find(|t| t.signals.iter().any(|s| fold(s) == folded))
                {
                    return Err(CatalogError::AmbiguousPrecedence {
                        term: term.clone(),
                        invariant: invariant.name.clone(),
                        trait_name: rule.name.clone(),
                    });
                }
            }
        }

        Ok(())
    }

    /// Validate and compile this spec.
    pub fn compile(self, mode: MatchMode) -> CatalogResult<RuleCatalog> {
        RuleCatalog::from_spec(self, mode)
    }
}

fn fold(term: &str) -> String {
    term.trim().to_lowercase()
}

fn check_name(kind: &'static str, name: &str, seen: &mut HashSet<String>) -> CatalogResult<()> {
    if name.trim().is_empty() {
        return Err(CatalogError::EmptyRuleName { kind });
    }
    if !seen.insert(fold(name)) {
        return Err(CatalogError::DuplicateRule {
            name: name.to_string(),
        });
    }
    Ok(())
}

fn check_terms(rule: &str, field: &'static str, terms: &[String]) -> CatalogResult<()> {
    if terms.is_empty() {
        return Err(CatalogError::EmptyTerms {
            rule: rule.to_string(),
            field,
        });
    }

    let mut seen = HashSet::new();
    for term in terms {
        if term.trim().is_empty() {
            return Err(CatalogError::BlankTerm {
                rule: rule.to_string(),
                field,
            });
        }
        if !seen.insert(fold(term)) {
            return Err(CatalogError::DuplicateTerm {
                rule: rule.to_string(),
                term: term.clone(),
            });
        }
    }
    Ok(())
}

/// An invariant rule with its compiled matchers.
#[derive(Debug, Clone)]
pub struct InvariantEntry {
    pub rule: InvariantRule,
    pub backstory: TermSet,
    pub narrative: TermSet,
}

/// A trait rule with its compiled matchers.
#[derive(Debug, Clone)]
pub struct TraitEntry {
    pub rule: TraitRule,
    pub signals: TermSet,
    pub violations: TermSet,
}

/// The validated, compiled rule set.
///
/// Immutable once built; share it by reference (or `Arc`) across workers.
#[derive(Debug, Clone)]
pub struct RuleCatalog {
    invariants: Vec<InvariantEntry>,
    traits: Vec<TraitEntry>,
    key_signals: TermSet,
    mode: MatchMode,
}

impl RuleCatalog {
    /// Compile the built-in tables.
    pub fn builtin(mode: MatchMode) -> CatalogResult<Self> {
        Self::from_spec(CatalogSpec::builtin(), mode)
    }

    /// Validate and compile a catalog spec.
    pub fn from_spec(spec: CatalogSpec, mode: MatchMode) -> CatalogResult<Self> {
        spec.validate()?;

        let invariants = spec
            .invariants
            .into_iter()
            .map(|rule| -> CatalogResult<InvariantEntry> {
                Ok(InvariantEntry {
                    backstory: TermSet::compile(&rule.backstory_terms, mode)?,
                    narrative: TermSet::compile(&rule.narrative_terms, mode)?,
                    rule,
                })
            })
            .collect::<CatalogResult<Vec<_>>>()?;

        let traits = spec
            .traits
            .into_iter()
            .map(|rule| -> CatalogResult<TraitEntry> {
                Ok(TraitEntry {
                    signals: TermSet::compile(&rule.signals, mode)?,
                    violations: TermSet::compile(&rule.violations, mode)?,
                    rule,
                })
            })
            .collect::<CatalogResult<Vec<_>>>()?;

        let key_signals = TermSet::compile(&spec.key_signals, mode)?;

        tracing::debug!(
            invariants = invariants.len(),
            traits = traits.len(),
            key_signals = key_signals.len(),
            ?mode,
            "compiled rule catalog"
        );

        Ok(Self {
            invariants,
            traits,
            key_signals,
            mode,
        })
    }

    /// Invariant rules in priority order.
    pub fn invariants(&self) -> &[InvariantEntry] {
        &self.invariants
    }

    /// Trait rules in catalog order.
    pub fn traits(&self) -> &[TraitEntry] {
        &self.traits
    }

    /// Vocabulary used to grade backstory grounding.
    pub fn key_signals(&self) -> &TermSet {
        &self.key_signals
    }

    /// The mode every term set in this catalog was compiled with.
    pub fn match_mode(&self) -> MatchMode {
        self.mode
    }
}
