//! Contradiction scanner - looks for narrative behavior the backstory rules out.
//!
//! The scan is an ordered list of stages:
//! 1. **Invariants**: irreversible states, in catalog priority order
//! 2. **Traits**: soft character tension, in catalog order
//!
//! The first stage that produces a finding ends the scan. Inside a stage the
//! earliest-declared rule wins, inside a rule the earliest-declared term wins, and
//! for one term the narrative is searched before the corpus documents (in load
//! order), taking the earliest offset.

mod evidence;

pub use evidence::*;

use rule_book::{InvariantRule, RuleCatalog, TermHit, TraitRule};

use crate::config::EngineConfig;
use crate::corpus::Corpus;
use crate::record::{Evidence, EvidenceSource};

/// A contradiction with an irreversible backstory state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvariantFinding<'c> {
    pub rule: &'c InvariantRule,
    /// The backstory term that established the state.
    pub backstory_term: &'c str,
    pub evidence: Evidence,
}

/// Narrative behavior in tension with a backstory trait.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TraitFinding<'c> {
    pub rule: &'c TraitRule,
    /// The backstory signal that implied the trait.
    pub signal: &'c str,
    pub evidence: Evidence,
}

/// Result of scanning one record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScanOutcome<'c> {
    InvariantMatch(InvariantFinding<'c>),
    TraitMatch(TraitFinding<'c>),
    NoMatch,
}

#[derive(Debug, Clone, Copy)]
struct Segment<'t> {
    document: Option<&'t str>,
    text: &'t str,
}

impl AsRef<str> for Segment<'_> {
    fn as_ref(&self) -> &str {
        self.text
    }
}

/// The narrative followed by the corpus documents.
struct SearchText<'t> {
    segments: Vec<Segment<'t>>,
}

impl<'t> SearchText<'t> {
    fn new(narrative: &'t str, corpus: Option<&'t Corpus>) -> Self {
        let mut segments = vec![Segment {
            document: None,
            text: narrative,
        }];
        if let Some(corpus) = corpus {
            segments.extend(corpus.documents().iter().map(|d| Segment {
                document: Some(d.name.as_str()),
                text: d.text.as_str(),
            }));
        }
        Self { segments }
    }

    fn evidence(&self, index: usize, hit: TermHit<'_>, window: ExcerptWindow) -> Evidence {
        let segment = self.segments[index];
        let source = match segment.document {
            None => EvidenceSource::Narrative,
            Some(name) => EvidenceSource::Corpus {
                document: name.to_string(),
            },
        };
        Evidence {
            source,
            term: hit.term.to_string(),
            offset: hit.start,
            excerpt: excerpt(segment.text, hit.start, window).to_string(),
        }
    }
}

type Stage<'c> = fn(&ContradictionScanner<'c>, &str, &SearchText<'_>) -> ScanOutcome<'c>;

/// Scans a record against the catalog.
pub struct ContradictionScanner<'c> {
    catalog: &'c RuleCatalog,
    window: ExcerptWindow,
    scan_corpus: bool,
}

impl<'c> ContradictionScanner<'c> {
    /// Scan with `catalog`, cutting excerpts with the window from `config`.
    pub fn new(catalog: &'c RuleCatalog, config: &EngineConfig) -> Self {
        Self {
            catalog,
            window: ExcerptWindow {
                before: config.excerpt_before,
                after: config.excerpt_after,
            },
            scan_corpus: config.scan_corpus,
        }
    }

    /// Scan `narrative` (and `corpus`, when enabled) for contradictions with `backstory`.
    ///
    /// A blank backstory or narrative yields no finding; the grounding check owns
    /// those cases.
    pub fn scan(&self, backstory: &str, narrative: &str, corpus: Option<&Corpus>) -> ScanOutcome<'c> {
        if backstory.trim().is_empty() || narrative.trim().is_empty() {
            return ScanOutcome::NoMatch;
        }

        let corpus = corpus.filter(|_| self.scan_corpus);
        let search = SearchText::new(narrative, corpus);

        let stages: [Stage<'c>; 2] = [Self::scan_invariants, Self::scan_traits];
        for stage in stages {
            match stage(self, backstory, &search) {
                ScanOutcome::NoMatch => continue,
                finding => return finding,
            }
        }
        ScanOutcome::NoMatch
    }

    fn scan_invariants(&self, backstory: &str, search: &SearchText<'_>) -> ScanOutcome<'c> {
        let catalog: &'c RuleCatalog = self.catalog;

        for entry in catalog.invariants() {
            let Some(backstory_term) = entry.backstory.first_present(backstory) else {
                continue;
            };
            if let Some((index, hit)) = entry.narrative.find_in_segments(search.segments.as_slice()) {
                return ScanOutcome::InvariantMatch(InvariantFinding {
                    rule: &entry.rule,
                    backstory_term,
                    evidence: search.evidence(index, hit, self.window),
                });
            }
        }
        ScanOutcome::NoMatch
    }

    fn scan_traits(&self, backstory: &str, search: &SearchText<'_>) -> ScanOutcome<'c> {
        let catalog: &'c RuleCatalog = self.catalog;

        for entry in catalog.traits() {
            let Some(signal) = entry.signals.first_present(backstory) else {
                continue;
            };
            if let Some((index, hit)) = entry.violations.find_in_segments(search.segments.as_slice()) {
                return ScanOutcome::TraitMatch(TraitFinding {
                    rule: &entry.rule,
                    signal,
                    evidence: search.evidence(index, hit, self.window),
                });
            }
        }
        ScanOutcome::NoMatch
    }
}
