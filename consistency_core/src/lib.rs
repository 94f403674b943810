//! # Consistency Core (The Judge)
//!
//! Decides whether a character's narrative is causally consistent with the
//! backstory stated for it. This crate consults the `rule_book` catalog, grounds
//! the backstory, scans the narrative (and optionally a corpus of source novels)
//! for contradictions and aggregates everything into one verdict per record.
//!
//! ## Core Components
//!
//! - **grounding**: Backstory sufficiency gate, always evaluated first
//! - **scanner**: Ordered invariant/trait evaluation with evidence excerpts
//! - **engine**: Verdict aggregation and batch judging
//! - **corpus**: Read-only external novel texts
//! - **ingest**: Input discovery, CSV records in, results table out
//!
//! ## Decision Order
//!
//! - A failed grounding gate is final
//! - Invariant rules beat trait rules; the first firing rule short-circuits the scan
//! - With no finding the provisional grounding verdict stands

pub mod config;
pub mod corpus;
pub mod engine;
pub mod error;
pub mod grounding;
pub mod ingest;
pub mod record;
pub mod scanner;

pub use config::*;
pub use corpus::*;
pub use engine::*;
pub use error::*;
pub use grounding::*;
pub use record::*;
pub use scanner::*;
