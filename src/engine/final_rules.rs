//! Final rules: normalisation applied to each candidate after expansion.
//!
//! The `exact` table runs in both match modes and tidies the raw phonetic
//! output. In approximate mode the `approx` table then runs on its result
//! and folds phonetically close sounds together (the phonetic number pass),
//! which is why an approximate key is always reachable from an exact one.
//!
//! Final tables are scanned exactly like the main tables, but each
//! candidate is scanned under its own language set, so a tagged final rule
//! only fires on candidates that can still belong to that language.

use smallvec::smallvec;

use super::application::Scanner;
use super::dedup::CandidateSet;
use super::expand::expand_sequence;
use super::expression::CandidateKey;
use crate::error::Result;
use crate::options::MatchMode;
use crate::rules::{RuleSet, RuleTable};

/// Run `table` over every candidate.
///
/// An empty table returns the input unchanged.
pub fn apply_final_table(
    table: &RuleTable,
    candidates: Vec<CandidateKey>,
    mode: MatchMode,
    limit: usize,
) -> Result<Vec<CandidateKey>> {
    if table.is_empty() {
        return Ok(candidates);
    }

    let mut out = CandidateSet::new();
    for candidate in &candidates {
        let scanner = Scanner::new(smallvec![table], candidate.languages, mode);
        let sequence = scanner.scan(&candidate.phonetic);
        out.extend(expand_sequence(&sequence, candidate.languages, limit)?);
    }

    tracing::trace!(
        table = %table.name,
        before = candidates.len(),
        after = out.len(),
        "applied final rules"
    );
    Ok(out.into_vec())
}

/// Normalise raw candidates with the rule set's `exact` table.
pub fn normalize_exact(
    rules: &RuleSet,
    candidates: Vec<CandidateKey>,
    mode: MatchMode,
    limit: usize,
) -> Result<Vec<CandidateKey>> {
    apply_final_table(rules.exact(), candidates, mode, limit)
}

/// Fold exact candidates into approximate ones with the `approx` table.
pub fn phonetic_numbers(
    rules: &RuleSet,
    candidates: Vec<CandidateKey>,
    limit: usize,
) -> Result<Vec<CandidateKey>> {
    apply_final_table(rules.approx(), candidates, MatchMode::Approx, limit)
}

/// The full final stage for `mode`.
pub fn finalize(
    rules: &RuleSet,
    candidates: Vec<CandidateKey>,
    mode: MatchMode,
    limit: usize,
) -> Result<Vec<CandidateKey>> {
    let exact = normalize_exact(rules, candidates, mode, limit)?;
    match mode {
        MatchMode::Exact => Ok(exact),
        MatchMode::Approx => phonetic_numbers(rules, exact, limit),
    }
}
