//! Pattern, context and language checks for rule selection.
//!
//! # Functions
//!
//! - [`pattern_matches_at`] - literal pattern at a byte position
//! - [`context_matches`] - left/right contexts around a match
//! - [`eligible_branches`] - a rule's alternates under a language filter and mode
//! - [`is_compatible`] / [`narrow`] - language reachability across the scan

use smallvec::SmallVec;

use super::expression::Branch;
use crate::language::LanguageSet;
use crate::options::MatchMode;
use crate::rules::Rule;

/// Check whether `pattern` occurs in `input` starting at byte `pos`.
///
/// `pos` must lie on a character boundary; positions past the end never match.
///
/// # Examples
///
/// ```rust
/// use bmpm::engine::matching::pattern_matches_at;
///
/// assert!(pattern_matches_at("sch", "schmidt", 0));
/// assert!(!pattern_matches_at("sch", "schmidt", 1));
/// assert!(!pattern_matches_at("dtx", "schmidt", 5));
/// ```
#[inline]
pub fn pattern_matches_at(pattern: &str, input: &str, pos: usize) -> bool {
    input
        .get(pos..)
        .is_some_and(|rest| rest.starts_with(pattern))
}

/// Check a rule's contexts for a match of its pattern at `pos`.
///
/// The left context sees `input[..pos]`, the right context sees the text
/// after the pattern. Absent contexts always hold.
pub fn context_matches(rule: &Rule, input: &str, pos: usize) -> bool {
    let end = pos + rule.pattern.len();

    if let Some(right) = &rule.right {
        match input.get(end..) {
            Some(after) if right.matches(after) => {}
            _ => return false,
        }
    }

    if let Some(left) = &rule.left {
        match input.get(..pos) {
            Some(before) if left.matches(before) => {}
            _ => return false,
        }
    }

    true
}

/// Check pattern and contexts together.
#[inline]
pub fn rule_matches_at(rule: &Rule, input: &str, pos: usize) -> bool {
    pattern_matches_at(&rule.pattern, input, pos) && context_matches(rule, input, pos)
}

/// The alternates of `rule` that are usable under `filter` in `mode`.
///
/// Each branch's languages are narrowed to `filter`; alternates left with no
/// language, or restricted to the other mode, are dropped. An empty result
/// means the rule does not apply.
pub fn eligible_branches(rule: &Rule, filter: LanguageSet, mode: MatchMode) -> SmallVec<[Branch; 2]> {
    if !rule.languages.intersects(filter) {
        return SmallVec::new();
    }
    rule.alternates
        .iter()
        .filter(|alt| alt.applies_in(mode))
        .filter_map(|alt| {
            let languages = alt.languages & filter;
            (!languages.is_empty()).then(|| Branch {
                text: alt.text.clone(),
                languages,
            })
        })
        .collect()
}

/// Returns true if at least one branch keeps at least one reachable
/// language set alive.
///
/// `reachable` holds the distinct language sets of the partial expansions
/// built so far; a rule whose every branch would empty all of them is
/// incompatible with what has already been emitted.
pub fn is_compatible(reachable: &[LanguageSet], branches: &[Branch]) -> bool {
    reachable
        .iter()
        .any(|r| branches.iter().any(|b| r.intersects(b.languages)))
}

/// Reachable language sets after appending `branches`.
pub fn narrow(reachable: &[LanguageSet], branches: &[Branch]) -> SmallVec<[LanguageSet; 4]> {
    let mut next: SmallVec<[LanguageSet; 4]> = SmallVec::new();
    for r in reachable {
        for b in branches {
            let set = *r & b.languages;
            if !set.is_empty() && !next.contains(&set) {
                next.push(set);
            }
        }
    }
    next
}
