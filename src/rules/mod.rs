//! The rule table model.
//!
//! Rule tables are static data: one family per [`NameStyle`], each holding
//! a language-agnostic table, optional per-language tables, language guess
//! heuristics, name particles and two final-rule tables. They are parsed
//! once into typed values and never mutated afterwards.
//!
//! [`NameStyle`]: crate::options::NameStyle

mod data;
pub mod parser;
pub mod ruleset;
pub mod types;

pub use parser::{parse_discards, parse_language_rules, parse_phonetic, parse_rule_table};
pub use ruleset::{RuleSet, RuleSources};
pub use types::{Alternate, Context, LanguageRule, Rule, RuleTable, Side};
