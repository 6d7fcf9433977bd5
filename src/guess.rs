//! Language guessing from the spelling of a name.
//!
//! The guesser starts from every specific language of the name style and
//! applies the style's heuristics in order. A heuristic whose pattern occurs
//! in the name either keeps only its languages (an accept rule) or removes
//! them (a reject rule). If nothing is left the name is treated as
//! language-neutral. [`Language::Any`] is always part of the result.

use crate::language::{Language, LanguageSet};
use crate::rules::{LanguageRule, RuleSet};

/// Guesses the languages a name may come from.
#[derive(Debug, Clone, Copy)]
pub struct LanguageGuesser<'r> {
    rules: &'r [LanguageRule],
    languages: LanguageSet,
}

impl<'r> LanguageGuesser<'r> {
    /// A guesser for the heuristics and languages of `rules`.
    pub fn new(rules: &'r RuleSet) -> Self {
        LanguageGuesser {
            rules: rules.language_rules(),
            languages: rules.languages(),
        }
    }

    /// A guesser over explicit heuristics and a language universe.
    pub fn with_rules(rules: &'r [LanguageRule], languages: LanguageSet) -> Self {
        LanguageGuesser { rules, languages }
    }

    /// Guess the languages of `name`.
    ///
    /// `name` should already be case-folded the way the heuristics expect.
    /// The result is never empty.
    pub fn guess(&self, name: &str) -> LanguageSet {
        let mut choices = self.languages.specific();

        for rule in self.rules {
            if !rule.pattern.is_match(name) {
                continue;
            }
            if rule.accept {
                choices &= rule.languages;
            } else {
                choices = choices.difference(rule.languages);
            }
        }

        let guessed = choices | LanguageSet::of(Language::Any);
        tracing::debug!(name, languages = %guessed, "guessed languages");
        guessed
    }
}
