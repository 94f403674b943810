//! Errors that abort a judging run.
//!
//! Per-record problems (blank backstory, missing narrative) are never errors; they
//! are ordinary verdict paths.

use miette::Diagnostic;
use rule_book::CatalogError;
use thiserror::Error;

pub type JudgeResult<T> = std::result::Result<T, JudgeError>;

#[derive(Debug, Error, Diagnostic)]
pub enum JudgeError {
    #[error("input table not found (searched: {searched})")]
    #[diagnostic(
        code(judge::ingest::input_not_found),
        help("Pass the table explicitly with --test-csv <PATH>.")
    )]
    InputNotFound { searched: String },

    #[error("corpus directory not found: {path}")]
    #[diagnostic(
        code(judge::corpus::not_found),
        help("Omit --novels to judge against the narrative column only.")
    )]
    CorpusNotFound { path: String },

    #[error("required column '{column}' not found (headers: {headers})")]
    #[diagnostic(
        code(judge::ingest::missing_column),
        help("Column names are matched case-insensitively, ignoring separators: \
              an id column, a caption/backstory column and a content/story/narrative column are required.")
    )]
    MissingColumn {
        column: &'static str,
        headers: String,
    },

    #[error("i/o error on {path}")]
    #[diagnostic(code(judge::io))]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed table: {0}")]
    #[diagnostic(code(judge::ingest::csv))]
    Csv(#[from] csv::Error),

    #[error("invalid configuration: {0}")]
    #[diagnostic(
        code(judge::config),
        help("See the [engine] and [rules] tables documented in the config module.")
    )]
    Config(#[from] toml::de::Error),

    #[error("failed to serialize verdict: {0}")]
    #[diagnostic(code(judge::output::json))]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    #[diagnostic(transparent)]
    Catalog(#[from] CatalogError),
}
