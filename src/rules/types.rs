//! Type definitions for Beider-Morse rewrite rules.
//!
//! A [`Rule`] rewrites a literal pattern found at the scan cursor into one
//! or more phonetic alternates, subject to regular-expression contexts on
//! either side of the match. Rules are grouped into ordered [`RuleTable`]s;
//! order within a table is significant because the first applicable rule
//! wins.

use std::fmt;

use regex::Regex;
use smallvec::SmallVec;

use crate::language::{Language, LanguageSet};
use crate::options::MatchMode;

/// Which side of the pattern a [`Context`] constrains.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Side {
    /// Text before the pattern; the context must match at its end.
    Left,
    /// Text after the pattern; the context must match at its start.
    Right,
}

/// A compiled left or right context.
///
/// Contexts are regular expressions anchored at the match point: `^` in a
/// left context means "start of word" and `$` in a right context means
/// "end of word".
#[derive(Clone)]
pub struct Context {
    source: String,
    side: Side,
    regex: Regex,
}

impl Context {
    /// Compile a context for the given side.
    pub fn new(source: &str, side: Side) -> Result<Self, regex::Error> {
        let anchored = match side {
            Side::Left => format!("(?:{})$", source),
            Side::Right => format!("^(?:{})", source),
        };
        Ok(Context {
            source: source.to_string(),
            side,
            regex: Regex::new(&anchored)?,
        })
    }

    /// The context as written in the rule table.
    pub fn as_str(&self) -> &str {
        &self.source
    }

    /// Which side this context constrains.
    pub fn side(&self) -> Side {
        self.side
    }

    /// Test the context against the text on its side of the match.
    #[inline]
    pub fn matches(&self, text: &str) -> bool {
        self.regex.is_match(text)
    }
}

impl PartialEq for Context {
    fn eq(&self, other: &Self) -> bool {
        self.side == other.side && self.source == other.source
    }
}

impl fmt::Debug for Context {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Context({:?}, {:?})", self.side, self.source)
    }
}

/// One possible output of a rule.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Alternate {
    /// Phonetic text; empty means the pattern is deleted.
    pub text: String,
    /// Languages under which this output applies.
    pub languages: LanguageSet,
    /// Restricts the alternate to one match mode; `None` applies in both.
    pub mode: Option<MatchMode>,
}

impl Alternate {
    /// An alternate valid for every language and mode.
    pub fn new(text: impl Into<String>) -> Self {
        Alternate {
            text: text.into(),
            languages: LanguageSet::ALL,
            mode: None,
        }
    }

    /// Returns true if the alternate is eligible in `mode`.
    #[inline]
    pub fn applies_in(&self, mode: MatchMode) -> bool {
        self.mode.map_or(true, |m| m == mode)
    }
}

/// A context-sensitive rewrite rule.
///
/// # Invariants
///
/// - `pattern` is non-empty
/// - `alternates` is non-empty and every alternate has a non-empty language set
/// - `languages` is the union of the alternates' language sets
#[derive(Debug, Clone, PartialEq)]
pub struct Rule {
    /// Literal text that must appear at the cursor.
    pub pattern: String,
    /// Constraint on the text before the pattern.
    pub left: Option<Context>,
    /// Constraint on the text after the pattern.
    pub right: Option<Context>,
    /// Outputs, in table order.
    pub alternates: SmallVec<[Alternate; 2]>,
    /// Union of the alternates' languages.
    pub languages: LanguageSet,
    /// 1-based line in the source table, for diagnostics.
    pub line: usize,
}

/// An ordered list of rules for one language (or for [`Language::Any`]).
#[derive(Debug, Clone, PartialEq)]
pub struct RuleTable {
    /// Name of the source the table was parsed from.
    pub name: String,
    /// The language the table belongs to.
    pub language: Language,
    /// Rules in priority order.
    pub rules: Vec<Rule>,
}

impl RuleTable {
    /// An empty table.
    pub fn empty(name: impl Into<String>, language: Language) -> Self {
        RuleTable {
            name: name.into(),
            language,
            rules: Vec::new(),
        }
    }

    /// Number of rules.
    pub fn len(&self) -> usize {
        self.rules.len()
    }

    /// Returns true if the table has no rules.
    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}

/// A language-guessing heuristic.
#[derive(Clone)]
pub struct LanguageRule {
    /// Pattern searched for anywhere in the name.
    pub pattern: Regex,
    /// Languages the heuristic speaks for.
    pub languages: LanguageSet,
    /// `true` keeps only `languages`; `false` removes them.
    pub accept: bool,
}

impl fmt::Debug for LanguageRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LanguageRule")
            .field("pattern", &self.pattern.as_str())
            .field("languages", &self.languages)
            .field("accept", &self.accept)
            .finish()
    }
}

// ============================================================================
// Display implementations
// ============================================================================

impl fmt::Display for Alternate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text)?;
        if self.languages != LanguageSet::ALL {
            write!(f, "[{}]", self.languages)?;
        }
        if let Some(mode) = self.mode {
            write!(f, "{{{}}}", mode)?;
        }
        Ok(())
    }
}

impl fmt::Display for Rule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let left = self.left.as_ref().map_or("", Context::as_str);
        let right = self.right.as_ref().map_or("", Context::as_str);
        write!(f, "\"{}\" \"{}\" \"{}\" \"", self.pattern, left, right)?;
        if self.alternates.len() == 1 {
            write!(f, "{}", self.alternates[0])?;
        } else {
            f.write_str("(")?;
            for (i, alt) in self.alternates.iter().enumerate() {
                if i > 0 {
                    f.write_str("|")?;
                }
                write!(f, "{}", alt)?;
            }
            f.write_str(")")?;
        }
        f.write_str("\"")
    }
}
