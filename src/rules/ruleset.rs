//! All rule tables for one name style.
//!
//! A [`RuleSet`] is built once, from the bundled data asset or from a
//! directory with the same layout, and is read-only afterwards. Encoders
//! share it through an `Arc`.

use std::fs;
use std::path::{Path, PathBuf};

use rustc_hash::FxHashMap;

use super::data;
use super::parser::{parse_discards, parse_language_rules, parse_rule_table};
use super::types::{LanguageRule, RuleTable};
use crate::error::{BeiderMorseError, Result};
use crate::language::{Language, LanguageSet};
use crate::options::NameStyle;

/// Raw text of every table of one name style.
#[derive(Debug, Clone, Default)]
pub struct RuleSources<'a> {
    /// Language guess heuristics (`languages.txt`)
    pub languages: &'a str,
    /// Discardable particles (`discards.txt`)
    pub discards: &'a str,
    /// Language-agnostic rules (`any.txt`)
    pub any: &'a str,
    /// Language-specific rules (`<language>.txt`)
    pub specific: Vec<(Language, &'a str)>,
    /// Final rules applied in both modes (`exact.txt`)
    pub exact: &'a str,
    /// Phonetic number rules, approximate mode only (`approx.txt`)
    pub approx: &'a str,
}

/// Parsed, immutable rule tables for one name style.
#[derive(Debug, Clone)]
pub struct RuleSet {
    style: NameStyle,
    language_rules: Vec<LanguageRule>,
    discards: Vec<String>,
    any: RuleTable,
    specific: FxHashMap<Language, RuleTable>,
    exact: RuleTable,
    approx: RuleTable,
}

impl RuleSet {
    /// Parse the tables compiled into the crate.
    pub fn bundled(style: NameStyle) -> Result<Self> {
        Self::from_sources(style, &data::sources(style))
    }

    /// Parse tables from already-loaded text.
    pub fn from_sources(style: NameStyle, sources: &RuleSources<'_>) -> Result<Self> {
        let prefix = style.name();
        let supported = style.languages();

        let mut specific = FxHashMap::default();
        for &(language, text) in &sources.specific {
            if language == Language::Any || !supported.contains(language) {
                return Err(BeiderMorseError::UnsupportedLanguage {
                    language: language.to_string(),
                    style,
                });
            }
            let name = format!("{}/{}", prefix, language);
            specific.insert(language, parse_rule_table(&name, text, language)?);
        }

        let language_rules = parse_language_rules(&format!("{}/languages", prefix), sources.languages)?;
        for rule in &language_rules {
            let outside = rule.languages.difference(supported);
            if let Some(language) = outside.iter().next() {
                return Err(BeiderMorseError::UnsupportedLanguage {
                    language: language.to_string(),
                    style,
                });
            }
        }

        let set = RuleSet {
            style,
            language_rules,
            discards: parse_discards(&format!("{}/discards", prefix), sources.discards)?,
            any: parse_rule_table(&format!("{}/any", prefix), sources.any, Language::Any)?,
            specific,
            exact: parse_rule_table(&format!("{}/exact", prefix), sources.exact, Language::Any)?,
            approx: parse_rule_table(&format!("{}/approx", prefix), sources.approx, Language::Any)?,
        };

        tracing::debug!(
            style = %style,
            any_rules = set.any.len(),
            specific_tables = set.specific.len(),
            "loaded rule set"
        );

        Ok(set)
    }

    /// Load tables from `dir`, laid out like the bundled `data/<style>/`.
    ///
    /// `languages.txt`, `discards.txt`, `any.txt`, `exact.txt` and
    /// `approx.txt` are required; `<language>.txt` is read for each language
    /// of the style when present.
    pub fn from_dir(style: NameStyle, dir: impl AsRef<Path>) -> Result<Self> {
        let dir = dir.as_ref();
        let read = |file: &str| -> Result<String> {
            let path = dir.join(file);
            fs::read_to_string(&path).map_err(|err| BeiderMorseError::Io { path, err })
        };

        let languages = read("languages.txt")?;
        let discards = read("discards.txt")?;
        let any = read("any.txt")?;
        let exact = read("exact.txt")?;
        let approx = read("approx.txt")?;

        let mut specific_text: Vec<(Language, String)> = Vec::new();
        for language in style.languages().specific().iter() {
            let path: PathBuf = dir.join(format!("{}.txt", language));
            if path.is_file() {
                specific_text.push((language, read(&format!("{}.txt", language))?));
            }
        }

        let sources = RuleSources {
            languages: &languages,
            discards: &discards,
            any: &any,
            specific: specific_text
                .iter()
                .map(|(lang, text)| (*lang, text.as_str()))
                .collect(),
            exact: &exact,
            approx: &approx,
        };
        Self::from_sources(style, &sources)
    }

    /// The name style these tables belong to.
    pub fn style(&self) -> NameStyle {
        self.style
    }

    /// Languages the style supports, [`Language::Any`] included.
    pub fn languages(&self) -> LanguageSet {
        self.style.languages()
    }

    /// Language guess heuristics in evaluation order.
    pub fn language_rules(&self) -> &[LanguageRule] {
        &self.language_rules
    }

    /// Particles that are dropped or fused with the following word.
    pub fn discards(&self) -> &[String] {
        &self.discards
    }

    /// The language-agnostic table.
    pub fn any(&self) -> &RuleTable {
        &self.any
    }

    /// The table for one language, if the style has one.
    pub fn table(&self, language: Language) -> Option<&RuleTable> {
        self.specific.get(&language)
    }

    /// Final rules applied in both match modes.
    pub fn exact(&self) -> &RuleTable {
        &self.exact
    }

    /// Phonetic number rules (approximate mode).
    pub fn approx(&self) -> &RuleTable {
        &self.approx
    }
}
