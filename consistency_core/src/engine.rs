//! Verdict aggregation - one verdict per record, in a fixed decision order.
//!
//! 1. **Grounding**: a rejected backstory is final; nothing else runs
//! 2. **Scan**: an invariant finding, or a trait finding under the fatal policy,
//!    overrides the provisional consistent verdict
//! 3. **Fallback**: with no finding the grounding verdict stands

use rayon::prelude::*;
use rule_book::{CatalogSpec, RuleCatalog, Severity};

use crate::config::{EngineConfig, TensionPolicy};
use crate::corpus::Corpus;
use crate::error::JudgeResult;
use crate::grounding::{BaselineCheck, Grounding};
use crate::record::{Basis, Prediction, Record, Verdict};
use crate::scanner::{single_line, ContradictionScanner, InvariantFinding, ScanOutcome, TraitFinding};

/// The consistency judge.
///
/// Holds the compiled catalog and configuration; both are read-only, so one engine
/// can judge any number of records from any number of threads.
#[derive(Debug, Clone)]
pub struct ConsistencyEngine {
    catalog: RuleCatalog,
    config: EngineConfig,
}

impl ConsistencyEngine {
    /// Compile `spec` under `config.match_mode` and build an engine around it.
    pub fn from_spec(spec: CatalogSpec, config: EngineConfig) -> JudgeResult<Self> {
        let catalog = RuleCatalog::from_spec(spec, config.match_mode)?;
        tracing::info!(
            invariants = catalog.invariants().len(),
            traits = catalog.traits().len(),
            policy = ?config.tension_policy,
            mode = ?config.match_mode,
            "consistency engine ready"
        );
        Ok(Self { catalog, config })
    }

    /// Built-in rules with the default configuration.
    pub fn with_defaults() -> JudgeResult<Self> {
        Self::from_spec(CatalogSpec::builtin(), EngineConfig::default())
    }

    /// The compiled rule catalog.
    pub fn catalog(&self) -> &RuleCatalog {
        &self.catalog
    }

    /// Engine settings the catalog was built with.
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Judge one record.
    pub fn judge(&self, record: &Record, corpus: Option<&Corpus>) -> Verdict {
        let grounding = BaselineCheck::new(self.catalog.key_signals(), &self.config)
            .evaluate(&record.backstory);

        let verdict = if grounding.prediction() == Prediction::Contradictory {
            Verdict {
                story_id: record.story_id.clone(),
                prediction: Prediction::Contradictory,
                rationale: grounding.rationale(),
                basis: Basis::Grounding { grounding },
                evidence: None,
            }
        } else {
            let outcome = ContradictionScanner::new(&self.catalog, &self.config).scan(
                &record.backstory,
                &record.narrative,
                corpus,
            );
            self.aggregate(record, grounding, outcome)
        };

        tracing::debug!(
            story_id = %verdict.story_id,
            prediction = verdict.prediction.label(),
            basis = %verdict.basis,
            "judged record"
        );
        verdict
    }

    /// Judge every record in parallel; verdicts come back in input order.
    pub fn judge_all(&self, records: &[Record], corpus: Option<&Corpus>) -> Vec<Verdict> {
        let verdicts: Vec<Verdict> = records
            .par_iter()
            .map(|record| self.judge(record, corpus))
            .collect();

        let contradictory = verdicts
            .iter()
            .filter(|v| v.prediction == Prediction::Contradictory)
            .count();
        tracing::info!(
            records = verdicts.len(),
            contradictory,
            consistent = verdicts.len() - contradictory,
            "judged batch"
        );
        verdicts
    }

    fn aggregate(&self, record: &Record, grounding: Grounding, outcome: ScanOutcome<'_>) -> Verdict {
        let story_id = record.story_id.clone();

        match outcome {
            ScanOutcome::InvariantMatch(finding) => Verdict {
                story_id,
                prediction: Prediction::Contradictory,
                rationale: invariant_rationale(&finding),
                basis: Basis::Invariant {
                    rule: finding.rule.name.clone(),
                },
                evidence: Some(finding.evidence),
            },
            ScanOutcome::TraitMatch(finding) => {
                let policy = self.config.tension_policy;
                let prediction = match policy {
                    TensionPolicy::Fatal => Prediction::Contradictory,
                    TensionPolicy::Advisory => Prediction::Consistent,
                };
                Verdict {
                    story_id,
                    prediction,
                    rationale: trait_rationale(&finding, policy.severity()),
                    basis: Basis::Trait {
                        rule: finding.rule.name.clone(),
                        severity: policy.severity(),
                    },
                    evidence: Some(finding.evidence),
                }
            }
            ScanOutcome::NoMatch => Verdict {
                story_id,
                prediction: grounding.prediction(),
                rationale: format!(
                    "No irreversible-state violation detected: narrative remains causally \
                     compatible with the backstory. {}",
                    grounding.rationale()
                ),
                basis: Basis::NoViolation { grounding },
                evidence: None,
            },
        }
    }
}

fn invariant_rationale(finding: &InvariantFinding<'_>) -> String {
    let rule = finding.rule;
    let mut rationale = format!(
        "Causal paradox ({}: {}): backstory establishes '{}' but the {} shows '{}'.",
        rule.name, rule.paradox, finding.backstory_term, finding.evidence.source, finding.evidence.term
    );
    if !rule.explanation.is_empty() {
        rationale.push(' ');
        rationale.push_str(&rule.explanation);
    }
    rationale.push_str(&format!(
        " Evidence: \"{}\"",
        single_line(&finding.evidence.excerpt)
    ));
    rationale
}

fn trait_rationale(finding: &TraitFinding<'_>, severity: Severity) -> String {
    let rule = finding.rule;
    let treatment = match severity {
        Severity::Fatal => "treated as a contradiction",
        Severity::Advisory => "treated as non-fatal",
    };
    format!(
        "Potential tension ({} vs. {}): backstory suggests '{}' via '{}', but the {} \
         includes '{}'; {}. Evidence: \"{}\"",
        rule.name,
        rule.tension,
        rule.name,
        finding.signal,
        finding.evidence.source,
        finding.evidence.term,
        treatment,
        single_line(&finding.evidence.excerpt)
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::corpus::Document;
    use crate::record::EvidenceSource;
    use rule_book::MatchMode;

    fn engine() -> ConsistencyEngine {
        ConsistencyEngine::with_defaults().unwrap()
    }

    fn judge(backstory: &str, narrative: &str) -> Verdict {
        engine().judge(&Record::new("1", backstory, narrative), None)
    }

    #[test]
    fn test_execution_then_survival_is_paradox() {
        let verdict = judge("He was executed for treason in 1820.", "He survived and fled to the coast.");

        assert_eq!(verdict.prediction.label(), 0);
        assert!(verdict.rationale.contains("life-death: death vs. survival"));
        assert!(verdict.rationale.contains("'executed'"));
        assert!(verdict.rationale.contains("'survived'"));
        assert_eq!(verdict.basis, Basis::Invariant { rule: "life-death".into() });
    }

    #[test]
    fn test_arrest_then_escape_is_paradox() {
        let verdict = judge("He was arrested and imprisoned for theft.", "He escaped at night.");

        assert_eq!(verdict.prediction, Prediction::Contradictory);
        assert_eq!(verdict.basis, Basis::Invariant { rule: "legal-constraint".into() });
        assert!(verdict.rationale.contains("imprisonment vs. escape"));
        assert!(verdict.rationale.contains("'arrested'"));
        assert_eq!(verdict.evidence.unwrap().term, "escaped");
    }

    #[test]
    fn test_vow_then_compliance_is_paradox() {
        let verdict = judge(
            "She vowed never to return to her village.",
            "She agreed to go back and joined the council.",
        );

        assert_eq!(verdict.prediction, Prediction::Contradictory);
        assert!(verdict.rationale.contains("commitment vs. compliance"));
    }

    #[test]
    fn test_poverty_then_wealth_is_tension_with_excerpt() {
        let verdict = judge("A poor, destitute farmer.", "He found a chest of gold and lived in luxury.");

        assert_eq!(verdict.prediction.label(), 0);
        assert!(verdict.rationale.contains("impoverished vs. wealth"));
        assert!(verdict.rationale.contains("'gold'"));
        assert!(verdict.rationale.contains("He found a chest of gold and lived in luxury."));
        let evidence = verdict.evidence.unwrap();
        assert_eq!(evidence.source, EvidenceSource::Narrative);
        assert_eq!(evidence.excerpt, "He found a chest of gold and lived in luxury.");
    }

    #[test]
    fn test_empty_backstory_is_ungrounded() {
        let verdict = judge("", "Anything.");

        assert_eq!(verdict.prediction.label(), 0);
        assert_eq!(verdict.rationale, "Ungrounded: no backstory.");
        assert!(verdict.evidence.is_none());
    }

    #[test]
    fn test_empty_backstory_ignores_narrative() {
        let a = judge("", "He was alive and rich with gold.");
        let b = judge("", "");
        assert_eq!(a.prediction, Prediction::Contradictory);
        assert_eq!(a.rationale, b.rationale);
    }

    #[test]
    fn test_vague_backstory_is_contradictory() {
        let verdict = judge("Tall and quiet.", "He died and yet he lived.");

        assert_eq!(verdict.prediction, Prediction::Contradictory);
        assert!(verdict.rationale.starts_with("Too vague to ground narrative"));
    }

    #[test]
    fn test_strong_grounding_is_consistent() {
        let verdict = judge(
            "A soldier who vowed to protect his family and always kept his word.",
            "He fought bravely and returned home.",
        );

        assert_eq!(verdict.prediction.label(), 1);
        assert!(verdict.rationale.starts_with("No irreversible-state violation detected"));
        assert!(verdict.rationale.contains("Strong grounding"));
        assert!(matches!(verdict.basis, Basis::NoViolation { .. }));
    }

    #[test]
    fn test_missing_narrative_keeps_grounding_verdict() {
        let verdict = judge("A soldier who died at Waterloo.", "");
        assert_eq!(verdict.prediction, Prediction::Consistent);
        assert!(verdict.evidence.is_none());
    }

    #[test]
    fn test_advisory_policy_keeps_consistent() {
        let config = EngineConfig {
            tension_policy: TensionPolicy::Advisory,
            ..Default::default()
        };
        let engine = ConsistencyEngine::from_spec(CatalogSpec::builtin(), config).unwrap();
        let record = Record::new("3", "A poor, destitute farmer.", "He found a chest of gold.");

        let verdict = engine.judge(&record, None);
        assert_eq!(verdict.prediction, Prediction::Consistent);
        assert!(verdict.rationale.contains("treated as non-fatal"));
        assert_eq!(
            verdict.basis,
            Basis::Trait {
                rule: "impoverished".into(),
                severity: Severity::Advisory
            }
        );
    }

    #[test]
    fn test_advisory_policy_never_softens_invariants() {
        let config = EngineConfig {
            tension_policy: TensionPolicy::Advisory,
            ..Default::default()
        };
        let engine = ConsistencyEngine::from_spec(CatalogSpec::builtin(), config).unwrap();
        let record = Record::new("9", "A poor man, executed at dawn.", "He was alive and rich with gold.");

        assert_eq!(engine.judge(&record, None).prediction, Prediction::Contradictory);
    }

    #[test]
    fn test_judging_is_deterministic() {
        let engine = engine();
        let record = Record::new(
            "5",
            "An orphan and a hermit who refused every favor.",
            "At the wedding his parents wept; he accepted the ring.",
        );

        let first = engine.judge(&record, None);
        for _ in 0..10 {
            assert_eq!(engine.judge(&record, None), first);
        }
    }

    #[test]
    fn test_judge_all_preserves_order() {
        let engine = engine();
        let records: Vec<Record> = (0..64)
            .map(|i| {
                if i % 2 == 0 {
                    Record::new(i.to_string(), "", "x")
                } else {
                    Record::new(i.to_string(), "A soldier who always kept his word.", "He marched.")
                }
            })
            .collect();

        let verdicts = engine.judge_all(&records, None);
        assert_eq!(verdicts.len(), 64);
        for (i, verdict) in verdicts.iter().enumerate() {
            assert_eq!(verdict.story_id.as_str(), i.to_string());
            assert_eq!(verdict.prediction.label(), (i % 2) as u8);
        }
    }

    #[test]
    fn test_corpus_evidence_is_named() {
        let engine = engine();
        let corpus = Corpus::from_documents([Document::new("novel.txt", "Long after, Dantès was alive.")]);
        let record = Record::new("11", "Dantès died in the Chateau d'If.", "The sea was calm.");

        let verdict = engine.judge(&record, Some(&corpus));
        assert_eq!(verdict.prediction, Prediction::Contradictory);
        assert!(verdict.rationale.contains("corpus text 'novel.txt'"));
    }

    #[test]
    fn test_word_boundary_config_reaches_catalog() {
        let config = EngineConfig {
            match_mode: MatchMode::WordBoundary,
            ..Default::default()
        };
        let engine = ConsistencyEngine::from_spec(CatalogSpec::builtin(), config).unwrap();
        assert_eq!(engine.catalog().match_mode(), MatchMode::WordBoundary);

        let record = Record::new("12", "A poor fisherman from the coast.", "He kept a goldfish.");
        assert_eq!(engine.judge(&record, None).prediction, Prediction::Consistent);
    }
}
