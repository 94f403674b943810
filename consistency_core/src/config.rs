//! Engine configuration, optionally loaded from a TOML file.
//!
//! ```toml
//! [engine]
//! tension_policy = "advisory"
//! match_mode = "word_boundary"
//!
//! [[rules.traits]]
//! name = "coward"
//! tension = "bravery"
//! signals = ["coward"]
//! violations = ["fearless"]
//! ```

use rule_book::{CatalogSpec, MatchMode, Severity};
use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::engine::ConsistencyEngine;
use crate::error::{JudgeError, JudgeResult};

/// Whether a trait tension decides the verdict.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum TensionPolicy {
    /// Unresolved tension is a contradiction (prediction 0).
    #[default]
    Fatal,
    /// Tension is reported in the rationale; the prediction stays consistent.
    Advisory,
}

impl TensionPolicy {
    /// Severity assigned to trait findings under this policy.
    pub fn severity(&self) -> Severity {
        match self {
            TensionPolicy::Fatal => Severity::Fatal,
            TensionPolicy::Advisory => Severity::Advisory,
        }
    }
}

/// Tunables for grounding, scanning and evidence extraction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    pub tension_policy: TensionPolicy,

    /// Used when compiling the catalog's term matchers.
    pub match_mode: MatchMode,

    /// Backstories shorter than this (in characters) need at least one key signal.
    pub min_backstory_chars: usize,

    /// Key signals needed for "strong" grounding.
    pub strong_grounding_signals: usize,

    /// Characters of context kept before a matched term.
    pub excerpt_before: usize,

    /// Characters kept from the matched term onwards.
    pub excerpt_after: usize,

    /// Search the external corpus in addition to the narrative, when one is loaded.
    pub scan_corpus: bool,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            tension_policy: TensionPolicy::Fatal,
            match_mode: MatchMode::Substring,
            min_backstory_chars: 25,
            strong_grounding_signals: 2,
            excerpt_before: 60,
            excerpt_after: 120,
            scan_corpus: true,
        }
    }
}

/// Contents of a judge configuration file.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct JudgeConfig {
    pub engine: EngineConfig,
    pub rules: CatalogSpec,
}

impl JudgeConfig {
    /// Parse a configuration from TOML text.
    pub fn from_toml_str(source: &str) -> JudgeResult<Self> {
        Ok(toml::from_str(source)?)
    }

    /// Read a configuration file.
    pub fn load(path: &Path) -> JudgeResult<Self> {
        let source = std::fs::read_to_string(path).map_err(|source| JudgeError::Io {
            path: path.display().to_string(),
            source,
        })?;
        let config = Self::from_toml_str(&source)?;
        tracing::info!(path = %path.display(), "loaded judge configuration");
        Ok(config)
    }

    /// Compile the catalog and build the engine.
    pub fn build_engine(self) -> JudgeResult<ConsistencyEngine> {
        ConsistencyEngine::from_spec(self.rules, self.engine)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = EngineConfig::default();
        assert_eq!(config.tension_policy, TensionPolicy::Fatal);
        assert_eq!(config.match_mode, MatchMode::Substring);
        assert_eq!(config.min_backstory_chars, 25);
        assert_eq!((config.excerpt_before, config.excerpt_after), (60, 120));
        assert!(config.scan_corpus);
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let config = JudgeConfig::from_toml_str(
            r#"
            [engine]
            tension_policy = "advisory"
            match_mode = "word_boundary"
            "#,
        )
        .unwrap();

        assert_eq!(config.engine.tension_policy, TensionPolicy::Advisory);
        assert_eq!(config.engine.match_mode, MatchMode::WordBoundary);
        assert_eq!(config.engine.strong_grounding_signals, 2);
        assert_eq!(config.rules, CatalogSpec::builtin());
    }

    #[test]
    fn test_empty_toml_is_default() {
        let config = JudgeConfig::from_toml_str("").unwrap();
        assert_eq!(config.engine, EngineConfig::default());
    }

    #[test]
    fn test_rules_table_replaces_traits_only() {
        let config = JudgeConfig::from_toml_str(
            r#"
            [[rules.traits]]
            name = "coward"
            tension = "bravery"
            signals = ["coward"]
            violations = ["fearless"]
            "#,
        )
        .unwrap();

        assert_eq!(config.rules.traits.len(), 1);
        assert_eq!(config.rules.invariants.len(), 3);
        assert!(config.build_engine().is_ok());
    }

    #[test]
    fn test_unknown_policy_is_config_error() {
        let err = JudgeConfig::from_toml_str("[engine]\ntension_policy = \"maybe\"").unwrap_err();
        assert!(matches!(err, JudgeError::Config(_)));
    }

    #[test]
    fn test_policy_severity() {
        assert_eq!(TensionPolicy::Fatal.severity(), Severity::Fatal);
        assert_eq!(TensionPolicy::Advisory.severity(), Severity::Advisory);
    }
}
