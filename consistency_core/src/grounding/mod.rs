//! Baseline grounding check - is the backstory enough to judge anything against?
//!
//! The check never looks at the narrative. It runs first for every record and a
//! rejection here is final.

use rule_book::TermSet;
use serde::{Deserialize, Serialize};

use crate::config::EngineConfig;
use crate::record::Prediction;

/// Outcome of the grounding gate.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "level", rename_all = "snake_case")]
pub enum Grounding {
    /// Missing or blank backstory.
    Ungrounded,
    /// Short backstory without a single key signal.
    TooVague { chars: usize, min_chars: usize },
    /// Usable, but fewer key signals than the strong threshold.
    Limited { signals: Vec<String> },
    /// At least the strong threshold of key signals.
    Strong { signals: Vec<String> },
}

impl Grounding {
    /// Short label for logs and evidence records.
    pub fn name(&self) -> &'static str {
        match self {
            Grounding::Ungrounded => "ungrounded",
            Grounding::TooVague { .. } => "too-vague",
            Grounding::Limited { .. } => "limited",
            Grounding::Strong { .. } => "strong",
        }
    }

    /// The provisional prediction this grounding level implies.
    pub fn prediction(&self) -> Prediction {
        match self {
            Grounding::Ungrounded | Grounding::TooVague { .. } => Prediction::Contradictory,
            Grounding::Limited { .. } | Grounding::Strong { .. } => Prediction::Consistent,
        }
    }

    /// Key signals found in the backstory, in catalog order.
    pub fn signals(&self) -> &[String] {
        match self {
            Grounding::Limited { signals } | Grounding::Strong { signals } => signals,
            _ => &[],
        }
    }

    /// Human-readable explanation of the grade.
    pub fn rationale(&self) -> String {
        match self {
            Grounding::Ungrounded => "Ungrounded: no backstory.".to_string(),
            Grounding::TooVague { chars, min_chars } => format!(
                "Too vague to ground narrative: backstory has {} characters \
                 (minimum {}) and no key signals.",
                chars, min_chars
            ),
            Grounding::Strong { signals } => format!(
                "Strong grounding: {} key signals ({}).",
                signals.len(),
                signals.join(", ")
            ),
            Grounding::Limited { signals } if signals.is_empty() => {
                "Acceptable but limited grounding: no key signals.".to_string()
            }
            Grounding::Limited { signals } => format!(
                "Acceptable but limited grounding: {} key signal{} ({}).",
                signals.len(),
                if signals.len() == 1 { "" } else { "s" },
                signals.join(", ")
            ),
        }
    }
}

/// The backstory sufficiency gate.
pub struct BaselineCheck<'a> {
    vocabulary: &'a TermSet,
    min_chars: usize,
    strong_at: usize,
}

impl<'a> BaselineCheck<'a> {
    /// Grade backstories against `vocabulary` with the thresholds in `config`.
    pub fn new(vocabulary: &'a TermSet, config: &EngineConfig) -> Self {
        Self {
            vocabulary,
            min_chars: config.min_backstory_chars,
            strong_at: config.strong_grounding_signals,
        }
    }

    /// Grade a backstory.
    pub fn evaluate(&self, backstory: &str) -> Grounding {
        let backstory = backstory.trim();
        if backstory.is_empty() {
            return Grounding::Ungrounded;
        }

        let signals: Vec<String> = self
            .vocabulary
            .present_in(backstory)
            .map(str::to_string)
            .collect();
        let chars = backstory.chars().count();

        if chars < self.min_chars && signals.is_empty() {
            Grounding::TooVague {
                chars,
                min_chars: self.min_chars,
            }
        } else if signals.len() >= self.strong_at {
            Grounding::Strong { signals }
        } else {
            Grounding::Limited { signals }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rule_book::{defaults, MatchMode};

    fn vocabulary() -> TermSet {
        TermSet::compile(defaults::key_signals(), MatchMode::Substring).unwrap()
    }

    #[test]
    fn test_missing_backstory_is_ungrounded() {
        let vocab = vocabulary();
        let check = BaselineCheck::new(&vocab, &EngineConfig::default());

        assert_eq!(check.evaluate(""), Grounding::Ungrounded);
        assert_eq!(check.evaluate("   \n\t"), Grounding::Ungrounded);
        assert_eq!(Grounding::Ungrounded.prediction(), Prediction::Contradictory);
    }

    #[test]
    fn test_short_backstory_without_signals_is_vague() {
        let vocab = vocabulary();
        let check = BaselineCheck::new(&vocab, &EngineConfig::default());

        let grounding = check.evaluate("A tall man.");
        assert_eq!(
            grounding,
            Grounding::TooVague {
                chars: 11,
                min_chars: 25
            }
        );
        assert!(grounding.rationale().starts_with("Too vague to ground narrative"));
    }

    #[test]
    fn test_short_backstory_with_signal_passes() {
        let vocab = vocabulary();
        let check = BaselineCheck::new(&vocab, &EngineConfig::default());

        let grounding = check.evaluate("A farmer.");
        assert_eq!(grounding.prediction(), Prediction::Consistent);
        assert_eq!(grounding.signals(), ["farmer"]);
    }

    #[test]
    fn test_long_backstory_without_signals_is_limited() {
        let vocab = vocabulary();
        let check = BaselineCheck::new(&vocab, &EngineConfig::default());

        let grounding = check.evaluate("He was executed for treason in 1820.");
        assert_eq!(grounding, Grounding::Limited { signals: vec![] });
        assert!(grounding.rationale().contains("limited grounding"));
    }

    #[test]
    fn test_two_signals_is_strong() {
        let vocab = vocabulary();
        let check = BaselineCheck::new(&vocab, &EngineConfig::default());

        let grounding =
            check.evaluate("A soldier who vowed to protect his family and always kept his word.");
        assert!(matches!(grounding, Grounding::Strong { .. }));
        assert_eq!(grounding.signals(), ["soldier", "vowed", "protect", "always"]);
        assert!(grounding.rationale().starts_with("Strong grounding: 4 key signals"));
    }

    #[test]
    fn test_thresholds_follow_config() {
        let vocab = vocabulary();
        let config = EngineConfig {
            min_backstory_chars: 5,
            strong_grounding_signals: 1,
            ..Default::default()
        };
        let check = BaselineCheck::new(&vocab, &config);

        assert_eq!(check.evaluate("A farmer.").name(), "strong");
        assert_eq!(check.evaluate("Tall.").name(), "limited");
    }
}
