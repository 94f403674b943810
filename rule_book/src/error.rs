//! Errors raised while building a rule catalog.

use miette::Diagnostic;
use thiserror::Error;

/// Result alias for catalog construction.
pub type CatalogResult<T> = std::result::Result<T, CatalogError>;

#[derive(Debug, Error, Diagnostic)]
pub enum CatalogError {
    #[error("{kind} rule has an empty name")]
    #[diagnostic(
        code(rule_book::catalog::empty_name),
        help("Every rule needs a name; it is quoted in the rationale of each verdict it produces.")
    )]
    EmptyRuleName { kind: &'static str },

    #[error("rule \"{name}\" is declared more than once")]
    #[diagnostic(
        code(rule_book::catalog::duplicate_rule),
        help("Rule names must be unique across invariant and trait rules.")
    )]
    DuplicateRule { name: String },

    #[error("rule \"{rule}\" has no {field}")]
    #[diagnostic(
        code(rule_book::catalog::empty_terms),
        help("A rule with an empty term list can never fire. Add terms or remove the rule.")
    )]
    EmptyTerms { rule: String, field: &'static str },

    #[error("rule \"{rule}\" has a blank entry in {field}")]
    #[diagnostic(
        code(rule_book::catalog::blank_term),
        help("Blank terms would match every text. Remove the empty string.")
    )]
    BlankTerm { rule: String, field: &'static str },

    #[error("rule \"{rule}\" lists term \"{term}\" twice")]
    #[diagnostic(
        code(rule_book::catalog::duplicate_term),
        help("Terms are compared case-insensitively; keep only the first declaration.")
    )]
    DuplicateTerm { rule: String, term: String },

    #[error("invariant rule \"{rule}\" is not fatal")]
    #[diagnostic(
        code(rule_book::catalog::non_fatal_invariant),
        help("Invariant rules describe irreversible states and are never overridable. \
              Declare the rule as a trait rule if the finding should be advisory.")
    )]
    NonFatalInvariant { rule: String },

    #[error("term \"{term}\" is both a backstory term of invariant \"{invariant}\" and a signal of trait \"{trait_name}\"")]
    #[diagnostic(
        code(rule_book::catalog::ambiguous_precedence),
        help("A backstory term may belong to an invariant rule or a trait rule, not both.")
    )]
    AmbiguousPrecedence {
        term: String,
        invariant: String,
        trait_name: String,
    },

    #[error("term \"{term}\" cannot be compiled: {reason}")]
    #[diagnostic(code(rule_book::matching::invalid_term))]
    InvalidTerm { term: String, reason: String },

    #[error("failed to parse rule catalog: {0}")]
    #[diagnostic(
        code(rule_book::catalog::parse),
        help("Rule catalogs are TOML documents with [[invariants]] and [[traits]] tables.")
    )]
    Parse(#[from] toml::de::Error),
}
