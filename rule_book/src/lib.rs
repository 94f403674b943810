//! # Rule Book
//!
//! The "rule bible" crate - holds every rule the judge is allowed to apply when
//! comparing a character's backstory with a narrative. This crate is the single
//! source of truth for rule data and term matching and does not contain any
//! verdict logic.
//!
//! ## Core Components
//!
//! - **rules**: Invariant rules (fatal, irreversible states) and trait rules (soft tension)
//! - **matching**: Precompiled case-insensitive term matchers
//! - **catalog**: The validated, immutable catalog consulted by the judge

pub mod catalog;
pub mod error;
pub mod matching;
pub mod rules;

pub use catalog::*;
pub use error::*;
pub use matching::*;
pub use rules::*;
