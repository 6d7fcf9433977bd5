//! Parser for the text rule-table format.
//!
//! Rule lines hold four double-quoted fields:
//!
//! ```text
//! "pattern" "left-context" "right-context" "phonetic"
//! ```
//!
//! The phonetic field is a single alternate or a parenthesised,
//! `|`-separated list of them. Each alternate is literal text optionally
//! followed by a language tag (`[german+polish]`) and a mode tag
//! (`{exact}` or `{approx}`). Blank lines and lines starting with `#` or
//! `//` are ignored, as is a trailing comment after the last field.
//!
//! Language guess lines are `"regex" languages accept` and discard lines
//! hold a single quoted particle.
//!
//! Alternation syntax is resolved here, once, into typed [`Alternate`]s so
//! that the engine never re-parses text at encode time.

use regex::Regex;
use smallvec::SmallVec;

use super::types::{Alternate, Context, LanguageRule, Rule, RuleTable, Side};
use crate::error::{BeiderMorseError, Result};
use crate::language::{Language, LanguageSet};
use crate::options::MatchMode;

/// Characters that cannot appear inside alternate text.
const RESERVED: &[char] = &['(', ')', '[', ']', '{', '}', '|'];

/// Parse a rule table.
///
/// `language` is the table's own language. Alternates in a language table
/// are restricted to that language; alternates in the [`Language::Any`]
/// table default to every language unless tagged.
pub fn parse_rule_table(source_name: &str, text: &str, language: Language) -> Result<RuleTable> {
    let scope = table_scope(language);
    let mut rules = Vec::new();

    for (idx, raw) in text.lines().enumerate() {
        let line = idx + 1;
        let Some(body) = content(raw) else { continue };
        let err = |message: String| BeiderMorseError::RuleParse {
            source_name: source_name.to_string(),
            line,
            message,
        };

        let fields = quoted_fields(body).map_err(err)?;
        if fields.len() != 4 {
            return Err(err(format!(
                "expected 4 quoted fields, found {}",
                fields.len()
            )));
        }
        let (pattern, left, right, phonetic) = (fields[0], fields[1], fields[2], fields[3]);

        if pattern.is_empty() {
            return Err(err("empty pattern".to_string()));
        }

        let left = compile_context(source_name, line, left, Side::Left)?;
        let right = compile_context(source_name, line, right, Side::Right)?;
        let alternates = parse_phonetic(phonetic, scope).map_err(err)?;
        let languages = alternates
            .iter()
            .fold(LanguageSet::NONE, |acc, alt| acc | alt.languages);

        rules.push(Rule {
            pattern: pattern.to_string(),
            left,
            right,
            alternates,
            languages,
            line,
        });
    }

    Ok(RuleTable {
        name: source_name.to_string(),
        language,
        rules,
    })
}

/// Parse language-guessing heuristics.
pub fn parse_language_rules(source_name: &str, text: &str) -> Result<Vec<LanguageRule>> {
    let mut rules = Vec::new();

    for (idx, raw) in text.lines().enumerate() {
        let line = idx + 1;
        let Some(body) = content(raw) else { continue };
        let err = |message: String| BeiderMorseError::RuleParse {
            source_name: source_name.to_string(),
            line,
            message,
        };

        let (fields, rest) = leading_quoted(body).map_err(err)?;
        let [pattern] = fields[..] else {
            return Err(err("expected a quoted pattern".to_string()));
        };
        let mut words = rest.split_whitespace();
        let (Some(langs), Some(accept), None) = (words.next(), words.next(), words.next()) else {
            return Err(err("expected: \"pattern\" languages true|false".to_string()));
        };

        let languages = LanguageSet::parse_list(langs).map_err(|e| err(e.to_string()))?;
        let accept = match accept {
            "true" => true,
            "false" => false,
            other => return Err(err(format!("expected true or false, found {:?}", other))),
        };
        let pattern = Regex::new(pattern).map_err(|e| BeiderMorseError::InvalidContext {
            source_name: source_name.to_string(),
            line,
            context: pattern.to_string(),
            err: e,
        })?;

        rules.push(LanguageRule {
            pattern,
            languages,
            accept,
        });
    }

    Ok(rules)
}

/// Parse a list of discardable name particles.
pub fn parse_discards(source_name: &str, text: &str) -> Result<Vec<String>> {
    let mut discards = Vec::new();

    for (idx, raw) in text.lines().enumerate() {
        let Some(body) = content(raw) else { continue };
        let fields = quoted_fields(body).map_err(|message| BeiderMorseError::RuleParse {
            source_name: source_name.to_string(),
            line: idx + 1,
            message,
        })?;
        match fields[..] {
            [particle] if !particle.is_empty() => discards.push(particle.to_string()),
            _ => {
                return Err(BeiderMorseError::RuleParse {
                    source_name: source_name.to_string(),
                    line: idx + 1,
                    message: "expected one non-empty quoted particle".to_string(),
                })
            }
        }
    }

    Ok(discards)
}

/// Parse the phonetic field of a rule into alternates.
///
/// `scope` is the widest language set an alternate may claim. Tags are
/// intersected with it; a tag that leaves nothing is an error.
pub fn parse_phonetic(
    phonetic: &str,
    scope: LanguageSet,
) -> std::result::Result<SmallVec<[Alternate; 2]>, String> {
    let body = if let Some(inner) = phonetic.strip_prefix('(') {
        inner
            .strip_suffix(')')
            .ok_or_else(|| format!("unbalanced alternation: {:?}", phonetic))?
    } else {
        if phonetic.contains('|') {
            return Err(format!("alternation outside parentheses: {:?}", phonetic));
        }
        phonetic
    };

    body.split('|')
        .map(|alt| parse_alternate(alt, scope))
        .collect()
}

fn parse_alternate(text: &str, scope: LanguageSet) -> std::result::Result<Alternate, String> {
    let end = text.find(['[', '{']).unwrap_or(text.len());
    let (literal, mut tags) = text.split_at(end);
    if let Some(c) = literal.chars().find(|c| RESERVED.contains(c)) {
        return Err(format!("unexpected {:?} in alternate {:?}", c, text));
    }

    let mut languages = scope;
    let mut mode = None;

    if let Some(rest) = tags.strip_prefix('[') {
        let close = rest
            .find(']')
            .ok_or_else(|| format!("no closing square bracket in {:?}", text))?;
        let tag = LanguageSet::parse_list(&rest[..close]).map_err(|e| e.to_string())?;
        languages = scope & tag;
        if languages.is_empty() {
            return Err(format!(
                "alternate {:?} is tagged for {} which the table does not cover",
                text, tag
            ));
        }
        tags = &rest[close + 1..];
    }

    if let Some(rest) = tags.strip_prefix('{') {
        let close = rest
            .find('}')
            .ok_or_else(|| format!("no closing brace in {:?}", text))?;
        mode = Some(rest[..close].parse::<MatchMode>().map_err(|e| e.to_string())?);
        tags = &rest[close + 1..];
    }

    if !tags.is_empty() {
        return Err(format!("trailing text {:?} after tags in {:?}", tags, text));
    }

    Ok(Alternate {
        text: literal.to_string(),
        languages,
        mode,
    })
}

/// Languages an untagged alternate in a table for `language` applies to.
fn table_scope(language: Language) -> LanguageSet {
    match language {
        Language::Any => LanguageSet::ALL,
        other => LanguageSet::of(other),
    }
}

fn compile_context(
    source_name: &str,
    line: usize,
    source: &str,
    side: Side,
) -> Result<Option<Context>> {
    if source.is_empty() {
        return Ok(None);
    }
    Context::new(source, side)
        .map(Some)
        .map_err(|err| BeiderMorseError::InvalidContext {
            source_name: source_name.to_string(),
            line,
            context: source.to_string(),
            err,
        })
}

/// Strip comments; `None` for lines with no content.
fn content(line: &str) -> Option<&str> {
    let trimmed = line.trim();
    if trimmed.is_empty() || trimmed.starts_with('#') || trimmed.starts_with("//") {
        None
    } else {
        Some(trimmed)
    }
}

/// Split a line made only of quoted fields (plus an optional trailing comment).
fn quoted_fields(line: &str) -> std::result::Result<Vec<&str>, String> {
    let (fields, rest) = leading_quoted(line)?;
    let rest = rest.trim();
    if !(rest.is_empty() || rest.starts_with('#') || rest.starts_with("//")) {
        return Err(format!("unexpected text after fields: {:?}", rest));
    }
    Ok(fields)
}

/// Read consecutive quoted fields from the start of a line.
///
/// Returns the fields and whatever follows the last one.
fn leading_quoted(line: &str) -> std::result::Result<(Vec<&str>, &str), String> {
    let mut fields = Vec::new();
    let mut rest = line.trim_start();

    while let Some(after_quote) = rest.strip_prefix('"') {
        let close = after_quote
            .find('"')
            .ok_or_else(|| "unterminated quoted field".to_string())?;
        fields.push(&after_quote[..close]);
        rest = after_quote[close + 1..].trim_start();
    }

    Ok((fields, rest))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_simple_table() {
        let text = r#"
# comment
"sch" "" "" "S"
"c" "" "[ei]" "(ts[polish]|s)"   // trailing comment
"h" "" "$" ""
"#;
        let table = parse_rule_table("test", text, Language::Any).unwrap();
        assert_eq!(table.len(), 3);

        let sch = &table.rules[0];
        assert_eq!(sch.pattern, "sch");
        assert!(sch.left.is_none() && sch.right.is_none());
        assert_eq!(sch.alternates.len(), 1);
        assert_eq!(sch.alternates[0].languages, LanguageSet::ALL);
        assert_eq!(sch.line, 3);

        let c = &table.rules[1];
        assert_eq!(c.alternates.len(), 2);
        assert_eq!(c.alternates[0].text, "ts");
        assert_eq!(c.alternates[0].languages, LanguageSet::of(Language::Polish));
        assert_eq!(c.alternates[1].languages, LanguageSet::ALL);
        assert_eq!(c.right.as_ref().unwrap().as_str(), "[ei]");

        let h = &table.rules[2];
        assert_eq!(h.alternates[0].text, "");
    }

    #[test]
    fn test_language_table_scopes_alternates() {
        let table = parse_rule_table("gen/german", r#""w" "" "" "v""#, Language::German).unwrap();
        assert_eq!(
            table.rules[0].alternates[0].languages,
            LanguageSet::of(Language::German)
        );
        assert_eq!(table.rules[0].languages, LanguageSet::of(Language::German));
    }

    #[test]
    fn test_foreign_tag_in_language_table_is_rejected() {
        let err = parse_rule_table("gen/german", r#""w" "" "" "v[polish]""#, Language::German)
            .unwrap_err();
        assert!(matches!(err, BeiderMorseError::RuleParse { line: 1, .. }));
    }

    #[test]
    fn test_empty_pattern_is_rejected() {
        let err = parse_rule_table("t", r#""" "" "" "a""#, Language::Any).unwrap_err();
        match err {
            BeiderMorseError::RuleParse { message, .. } => assert_eq!(message, "empty pattern"),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_malformed_alternation_is_rejected() {
        for bad in [
            r#""a" "" "" "(a|b""#,
            r#""a" "" "" "a|b""#,
            r#""a" "" "" "(a[german|b)""#,
            r#""a" "" "" "a[klingon]""#,
            r#""a" "" "" "a{fuzzy}""#,
            r#""a" "" "" "a[german]x""#,
            r#""a" "" """#,
        ] {
            assert!(
                parse_rule_table("t", bad, Language::Any).is_err(),
                "accepted {bad}"
            );
        }
    }

    #[test]
    fn test_invalid_context_regex() {
        let err = parse_rule_table("t", r#""a" "[" "" "a""#, Language::Any).unwrap_err();
        assert!(matches!(err, BeiderMorseError::InvalidContext { line: 1, .. }));
    }

    #[test]
    fn test_mode_tags() {
        let alts = parse_phonetic("(a{exact}|o[french]{approx}|e)", LanguageSet::ALL).unwrap();
        assert_eq!(alts[0].mode, Some(MatchMode::Exact));
        assert_eq!(alts[1].mode, Some(MatchMode::Approx));
        assert_eq!(alts[1].languages, LanguageSet::of(Language::French));
        assert_eq!(alts[2].mode, None);
    }

    #[test]
    fn test_empty_alternates_are_deletions() {
        let alts = parse_phonetic("(|h)", LanguageSet::ALL).unwrap();
        assert_eq!(alts.len(), 2);
        assert_eq!(alts[0].text, "");
        assert_eq!(alts[1].text, "h");
    }

    #[test]
    fn test_parse_language_rules() {
        let text = r#"
"sz" polish+hungarian true
"^o'" english true
"q" polish false
"#;
        let rules = parse_language_rules("gen/languages", text).unwrap();
        assert_eq!(rules.len(), 3);
        assert!(rules[0].accept);
        assert_eq!(rules[0].languages.len(), 2);
        assert!(!rules[2].accept);
        assert!(rules[1].pattern.is_match("o'brien"));
    }

    #[test]
    fn test_parse_language_rules_errors() {
        assert!(parse_language_rules("t", r#""sz" polish maybe"#).is_err());
        assert!(parse_language_rules("t", r#""sz" polish"#).is_err());
        assert!(parse_language_rules("t", r#""sz" bogus true"#).is_err());
        assert!(parse_language_rules("t", r#""(" polish true"#).is_err());
    }

    #[test]
    fn test_parse_discards() {
        let discards = parse_discards("gen/discards", "\"van \"\n\"d'\"\n# note\n").unwrap();
        assert_eq!(discards, vec!["van ".to_string(), "d'".to_string()]);
        assert!(parse_discards("t", "\"\"").is_err());
        assert!(parse_discards("t", "\"a\" \"b\"").is_err());
    }
}
