//! Expansion of a branching expression into concrete candidate keys.
//!
//! Expansion walks each [`Sequence`] left to right keeping a list of
//! partial strings, each with the languages still consistent with the
//! branches it took. At an alternation every partial is extended by every
//! branch; the language sets intersect, and a partial whose set becomes
//! empty is dropped because no single language produces it. Partials that
//! spell the same string are merged on the spot, so the work stays bounded
//! by the number of distinct strings rather than the number of paths.

use super::dedup::CandidateSet;
use super::expression::{BranchingExpression, CandidateKey, Segment, Sequence};
use crate::error::{BeiderMorseError, Result};
use crate::language::LanguageSet;

/// Expand every sequence of `expr` and merge the results.
///
/// Fails with [`BeiderMorseError::ExpansionLimit`] if a sequence has more
/// than `limit` partial candidates at any point.
pub fn expand(expr: &BranchingExpression, limit: usize) -> Result<Vec<CandidateKey>> {
    let mut out = CandidateSet::new();
    for sequence in &expr.sequences {
        out.extend(expand_sequence(sequence, sequence.languages, limit)?);
    }
    Ok(out.into_vec())
}

/// Expand one sequence, starting from the language set `start`.
pub fn expand_sequence(sequence: &Sequence, start: LanguageSet, limit: usize) -> Result<Vec<CandidateKey>> {
    if start.is_empty() {
        return Ok(Vec::new());
    }

    let mut partials = CandidateSet::new();
    partials.insert("", start);

    for segment in &sequence.segments {
        match segment {
            Segment::Literal(text) => {
                let mut next = CandidateSet::new();
                for key in partials.into_vec() {
                    next.insert(&(key.phonetic + text), key.languages);
                }
                partials = next;
            }
            Segment::Alternation(branches) => {
                let mut next = CandidateSet::new();
                for key in partials.as_slice() {
                    for branch in branches {
                        let languages = key.languages & branch.languages;
                        if languages.is_empty() {
                            continue;
                        }
                        let mut text = String::with_capacity(key.phonetic.len() + branch.text.len());
                        text.push_str(&key.phonetic);
                        text.push_str(&branch.text);
                        next.insert(&text, languages);
                        if next.len() > limit {
                            tracing::warn!(limit, "alternate expansion limit exceeded");
                            return Err(BeiderMorseError::ExpansionLimit { limit });
                        }
                    }
                }
                partials = next;
            }
        }
        if partials.is_empty() {
            break;
        }
    }

    Ok(partials.into_vec())
}
