//! The rewrite engine.
//!
//! Encoding one word runs through these stages:
//!
//! 1. [`application`] scans the word once per language pass and records
//!    every rule choice in a [`BranchingExpression`]
//! 2. [`expand`] enumerates the language-consistent strings of that
//!    expression
//! 3. [`final_rules`] normalises each string (and, in approximate mode,
//!    runs the phonetic number pass)
//! 4. [`dedup`] removes repeats while keeping first-seen order
//!
//! All stages are pure functions of their inputs and the shared, read-only
//! [`RuleSet`](crate::rules::RuleSet).

pub mod application;
pub mod dedup;
pub mod expand;
pub mod expression;
pub mod final_rules;
pub mod matching;

pub use application::{RuleEngine, Scanner};
pub use dedup::{dedup, CandidateSet};
pub use expand::{expand, expand_sequence};
pub use expression::{Branch, BranchingExpression, CandidateKey, Segment, Sequence};
pub use final_rules::{apply_final_table, finalize, normalize_exact, phonetic_numbers};
