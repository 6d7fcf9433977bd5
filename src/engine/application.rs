//! Rule application: scanning a name into a branching expression.
//!
//! # Algorithm
//!
//! A cursor starts at byte 0. At each position the tables are consulted in
//! order (the language table first, then the language-agnostic table) and,
//! within a table, rules are tried in table order. The first rule whose
//! pattern and contexts match, that has an alternate under the active
//! languages, and that is compatible with the languages reachable so far
//! wins; its alternates become one alternation and the cursor moves past
//! the pattern. When nothing matches, the character under the cursor is
//! copied through and the cursor moves by one character. There is no
//! backtracking, so a scan always terminates in one pass over the input.

use smallvec::{smallvec, SmallVec};

use super::expression::{Branch, BranchingExpression, Sequence};
use super::matching::{eligible_branches, is_compatible, narrow, rule_matches_at};
use crate::language::{Language, LanguageSet};
use crate::options::MatchMode;
use crate::rules::{Rule, RuleSet, RuleTable};

/// Scans input under one language filter with an ordered list of tables.
#[derive(Debug, Clone)]
pub struct Scanner<'r> {
    tables: SmallVec<[&'r RuleTable; 2]>,
    filter: LanguageSet,
    mode: MatchMode,
}

impl<'r> Scanner<'r> {
    /// Create a scanner. Tables earlier in `tables` take priority.
    pub fn new(tables: SmallVec<[&'r RuleTable; 2]>, filter: LanguageSet, mode: MatchMode) -> Self {
        Scanner { tables, filter, mode }
    }

    /// The language filter of this scanner.
    pub fn filter(&self) -> LanguageSet {
        self.filter
    }

    /// Scan `input` from left to right.
    pub fn scan(&self, input: &str) -> Sequence {
        let mut sequence = Sequence::new(self.filter);
        let mut reachable: SmallVec<[LanguageSet; 4]> = smallvec![self.filter];
        let mut pos = 0;

        while pos < input.len() {
            match self.select(input, pos, &reachable) {
                Some((rule, branches)) => {
                    tracing::trace!(pos, pattern = %rule.pattern, line = rule.line, "rule matched");
                    reachable = narrow(&reachable, &branches);
                    sequence.push_alternation(branches);
                    pos += rule.pattern.len();
                }
                None => {
                    let Some(ch) = input[pos..].chars().next() else { break };
                    let end = pos + ch.len_utf8();
                    sequence.push_literal(&input[pos..end]);
                    pos = end;
                }
            }
        }

        sequence
    }

    /// First applicable rule at `pos` and its eligible branches.
    fn select(
        &self,
        input: &str,
        pos: usize,
        reachable: &[LanguageSet],
    ) -> Option<(&'r Rule, SmallVec<[Branch; 2]>)> {
        for table in &self.tables {
            for rule in &table.rules {
                if !rule_matches_at(rule, input, pos) {
                    continue;
                }
                let branches = eligible_branches(rule, self.filter, self.mode);
                if branches.is_empty() || !is_compatible(reachable, &branches) {
                    continue;
                }
                return Some((rule, branches));
            }
        }
        None
    }
}

/// Applies a rule set's main tables to names.
#[derive(Debug, Clone, Copy)]
pub struct RuleEngine<'r> {
    rules: &'r RuleSet,
    mode: MatchMode,
}

impl<'r> RuleEngine<'r> {
    /// Create an engine over `rules`.
    pub fn new(rules: &'r RuleSet, mode: MatchMode) -> Self {
        RuleEngine { rules, mode }
    }

    /// One scanner per language pass for the active language set.
    ///
    /// Every specific language the style supports gets its own pass with
    /// its table (if any) ahead of the language-agnostic table, filtered to
    /// that language. With no specific language active, a single pass runs
    /// the language-agnostic table unfiltered.
    pub fn scanners(&self, active: LanguageSet) -> Vec<Scanner<'r>> {
        let specific = active.specific() & self.rules.languages();
        if specific.is_empty() {
            return vec![Scanner::new(
                smallvec![self.rules.any()],
                self.rules.languages(),
                self.mode,
            )];
        }

        specific
            .iter()
            .map(|language: Language| {
                let mut tables: SmallVec<[&'r RuleTable; 2]> = SmallVec::new();
                if let Some(table) = self.rules.table(language) {
                    tables.push(table);
                }
                tables.push(self.rules.any());
                Scanner::new(tables, LanguageSet::of(language), self.mode)
            })
            .collect()
    }

    /// Scan `input` once per language pass.
    pub fn apply(&self, input: &str, active: LanguageSet) -> BranchingExpression {
        let sequences: Vec<Sequence> = self
            .scanners(active)
            .iter()
            .map(|scanner| scanner.scan(input))
            .collect();

        tracing::debug!(
            input,
            active = %active,
            passes = sequences.len(),
            alternations = sequences.iter().map(Sequence::alternation_count).sum::<usize>(),
            "applied rules"
        );

        BranchingExpression { sequences }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::expression::Segment;
    use crate::options::NameStyle;
    use crate::rules::{parse_rule_table, RuleSources};

    fn any_table(text: &str) -> RuleTable {
        parse_rule_table("test", text, Language::Any).unwrap()
    }

    fn scan_all(table: &RuleTable, input: &str) -> Sequence {
        Scanner::new(smallvec![table], LanguageSet::ALL, MatchMode::Approx).scan(input)
    }

    #[test]
    fn test_first_match_wins_and_cursor_skips_pattern() {
        let table = any_table(
            r#"
"sch" "" "" "S"
"s" "" "" "s"
"c" "" "" "k"
"h" "" "" "h"
"#,
        );
        let seq = scan_all(&table, "schach");
        assert_eq!(seq.segments, vec![Segment::Literal("Sakh".to_string())]);
    }

    #[test]
    fn test_unmatched_characters_copy_through() {
        let table = any_table(r#""a" "" "" "o""#);
        let seq = scan_all(&table, "xa☃a");
        assert_eq!(seq.segments, vec![Segment::Literal("xo☃o".to_string())]);
    }

    #[test]
    fn test_empty_input() {
        let table = any_table(r#""a" "" "" "o""#);
        assert!(scan_all(&table, "").is_empty());
    }

    #[test]
    fn test_deletion() {
        let table = any_table(r#""h" "" "$" """#);
        let seq = scan_all(&table, "noah");
        assert_eq!(seq.segments, vec![Segment::Literal("noa".to_string())]);
    }

    #[test]
    fn test_rule_with_no_eligible_alternate_falls_through() {
        let table = any_table(
            r#"
"sz" "" "" "S[polish]"
"s" "" "" "s"
"z" "" "" "z"
"#,
        );
        let english = Scanner::new(smallvec![&table], LanguageSet::of(Language::English), MatchMode::Approx);
        let seq = english.scan("szabo");
        assert_eq!(seq.segments, vec![Segment::Literal("szabo".to_string())]);

        let polish = Scanner::new(smallvec![&table], LanguageSet::of(Language::Polish), MatchMode::Approx);
        let seq = polish.scan("szabo");
        assert_eq!(seq.segments, vec![Segment::Literal("Sabo".to_string())]);
    }

    #[test]
    fn test_incompatible_rule_is_skipped() {
        // After "w" commits to German, a Polish-only reading of "sz" is dead.
        let table = any_table(
            r#"
"w" "" "" "v[german]"
"sz" "" "" "S[polish]"
"s" "" "" "s"
"#,
        );
        let filter = LanguageSet::of(Language::German) | LanguageSet::of(Language::Polish);
        let scanner = Scanner::new(smallvec![&table], filter, MatchMode::Approx);
        let seq = scanner.scan("wsz");
        assert_eq!(seq.alternation_count(), 1);
        assert_eq!(seq.segments.last(), Some(&Segment::Literal("sz".to_string())));
    }

    #[test]
    fn test_alternation_is_recorded() {
        let table = any_table(r#""ch" "" "" "(x[german]|tS)""#);
        let seq = scan_all(&table, "bach");
        assert_eq!(seq.alternation_count(), 1);
        match &seq.segments[1] {
            Segment::Alternation(branches) => {
                assert_eq!(branches.len(), 2);
                assert_eq!(branches[0].text, "x");
                assert_eq!(branches[1].text, "tS");
            }
            other => panic!("expected alternation, got {other:?}"),
        }
    }

    #[test]
    fn test_language_table_takes_priority() {
        let sources = RuleSources {
            languages: "",
            discards: "",
            any: "\"w\" \"\" \"\" \"w\"\n",
            specific: vec![(Language::German, "\"w\" \"\" \"\" \"v\"\n")],
            exact: "",
            approx: "",
        };
        let rules = RuleSet::from_sources(NameStyle::Generic, &sources).unwrap();
        let engine = RuleEngine::new(&rules, MatchMode::Exact);

        let active = LanguageSet::ANY | LanguageSet::of(Language::German) | LanguageSet::of(Language::English);
        let expr = engine.apply("wolf", active);
        assert_eq!(expr.sequences.len(), 2);
        // English pass first (bit order), then German.
        assert_eq!(expr.sequences[0].to_string(), "wolf");
        assert_eq!(expr.sequences[1].to_string(), "volf");
        assert_eq!(expr.sequences[1].languages, LanguageSet::of(Language::German));
    }

    #[test]
    fn test_any_only_runs_single_unfiltered_pass() {
        let rules = RuleSet::bundled(NameStyle::Sephardic).unwrap();
        let engine = RuleEngine::new(&rules, MatchMode::Approx);
        let scanners = engine.scanners(LanguageSet::ANY);
        assert_eq!(scanners.len(), 1);
        assert_eq!(scanners[0].filter(), NameStyle::Sephardic.languages());
    }

    #[test]
    fn test_unsupported_languages_are_ignored_by_passes() {
        let rules = RuleSet::bundled(NameStyle::Sephardic).unwrap();
        let engine = RuleEngine::new(&rules, MatchMode::Approx);
        let active = LanguageSet::of(Language::German) | LanguageSet::of(Language::Spanish);
        let scanners = engine.scanners(active);
        assert_eq!(scanners.len(), 1);
        assert_eq!(scanners[0].filter(), LanguageSet::of(Language::Spanish));
    }
}
