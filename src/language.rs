//! The closed language enumeration and language bitmasks.
//!
//! Bit values follow the reference Beider-Morse numbering so that masks
//! printed in diagnostics line up with the published rule tables.

use std::fmt;
use std::ops::{BitAnd, BitAndAssign, BitOr, BitOrAssign};
use std::str::FromStr;

use crate::error::{BeiderMorseError, Result};

/// A language the rule tables know about.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(
    feature = "serialization",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "lowercase")
)]
pub enum Language {
    /// Language-agnostic rules; always a valid fallback.
    Any,
    /// Arabic
    Arabic,
    /// Cyrillic transliterations
    Cyrillic,
    /// Czech
    Czech,
    /// Dutch
    Dutch,
    /// English
    English,
    /// French
    French,
    /// German
    German,
    /// Greek script
    Greek,
    /// Greek transliterated to Latin script
    GreekLatin,
    /// Hebrew
    Hebrew,
    /// Hungarian
    Hungarian,
    /// Italian
    Italian,
    /// Latvian
    Latvian,
    /// Polish
    Polish,
    /// Portuguese
    Portuguese,
    /// Romanian
    Romanian,
    /// Russian
    Russian,
    /// Spanish
    Spanish,
    /// Turkish
    Turkish,
}

impl Language {
    /// Every language, in bit order.
    pub const ALL: [Language; 20] = [
        Language::Any,
        Language::Arabic,
        Language::Cyrillic,
        Language::Czech,
        Language::Dutch,
        Language::English,
        Language::French,
        Language::German,
        Language::Greek,
        Language::GreekLatin,
        Language::Hebrew,
        Language::Hungarian,
        Language::Italian,
        Language::Latvian,
        Language::Polish,
        Language::Portuguese,
        Language::Romanian,
        Language::Russian,
        Language::Spanish,
        Language::Turkish,
    ];

    /// The single bit representing this language.
    #[inline]
    pub const fn bit(self) -> u32 {
        1 << (self as u32)
    }

    /// The lowercase name used in rule tables and options.
    pub fn name(&self) -> &'static str {
        match self {
            Language::Any => "any",
            Language::Arabic => "arabic",
            Language::Cyrillic => "cyrillic",
            Language::Czech => "czech",
            Language::Dutch => "dutch",
            Language::English => "english",
            Language::French => "french",
            Language::German => "german",
            Language::Greek => "greek",
            Language::GreekLatin => "greeklatin",
            Language::Hebrew => "hebrew",
            Language::Hungarian => "hungarian",
            Language::Italian => "italian",
            Language::Latvian => "latvian",
            Language::Polish => "polish",
            Language::Portuguese => "portuguese",
            Language::Romanian => "romanian",
            Language::Russian => "russian",
            Language::Spanish => "spanish",
            Language::Turkish => "turkish",
        }
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Language {
    type Err = BeiderMorseError;

    fn from_str(s: &str) -> Result<Self> {
        let lowered = s.trim().to_lowercase();
        Language::ALL
            .iter()
            .copied()
            .find(|lang| lang.name() == lowered)
            .ok_or_else(|| BeiderMorseError::UnknownLanguage(s.to_string()))
    }
}

/// A set of languages stored as a bitmask.
///
/// Intersection narrows the languages under which a phonetic string is
/// valid; union merges the languages of identical strings.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default, PartialOrd, Ord)]
pub struct LanguageSet(u32);

impl LanguageSet {
    /// The empty set.
    pub const NONE: LanguageSet = LanguageSet(0);

    /// The set containing only [`Language::Any`].
    pub const ANY: LanguageSet = LanguageSet(Language::Any.bit());

    /// Every language in the enumeration.
    pub const ALL: LanguageSet = LanguageSet((1 << Language::ALL.len()) - 1);

    /// Build a set from a raw bitmask, dropping bits outside the enumeration.
    #[inline]
    pub const fn from_bits(bits: u32) -> Self {
        LanguageSet(bits & Self::ALL.0)
    }

    /// The raw bitmask.
    #[inline]
    pub const fn bits(self) -> u32 {
        self.0
    }

    /// A set holding one language.
    #[inline]
    pub const fn of(language: Language) -> Self {
        LanguageSet(language.bit())
    }

    /// Returns true if no language is present.
    #[inline]
    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    /// Returns true if `language` is in the set.
    #[inline]
    pub const fn contains(self, language: Language) -> bool {
        self.0 & language.bit() != 0
    }

    /// Returns true if the two sets share at least one language.
    #[inline]
    pub const fn intersects(self, other: LanguageSet) -> bool {
        self.0 & other.0 != 0
    }

    /// Set intersection.
    #[inline]
    pub const fn intersection(self, other: LanguageSet) -> LanguageSet {
        LanguageSet(self.0 & other.0)
    }

    /// Set union.
    #[inline]
    pub const fn union(self, other: LanguageSet) -> LanguageSet {
        LanguageSet(self.0 | other.0)
    }

    /// Set difference.
    #[inline]
    pub const fn difference(self, other: LanguageSet) -> LanguageSet {
        LanguageSet(self.0 & !other.0)
    }

    /// Add a language to the set.
    #[inline]
    pub fn insert(&mut self, language: Language) {
        self.0 |= language.bit();
    }

    /// The set without [`Language::Any`].
    #[inline]
    pub const fn specific(self) -> LanguageSet {
        self.difference(Self::ANY)
    }

    /// Number of languages in the set.
    #[inline]
    pub const fn len(self) -> usize {
        self.0.count_ones() as usize
    }

    /// The only language in the set, if it holds exactly one.
    pub fn single(self) -> Option<Language> {
        if self.len() == 1 {
            self.iter().next()
        } else {
            None
        }
    }

    /// Iterate the languages in bit order.
    pub fn iter(self) -> impl Iterator<Item = Language> {
        Language::ALL
            .into_iter()
            .filter(move |lang| self.contains(*lang))
    }

    /// Parse a `+`- or `,`-separated list of language names.
    ///
    /// An empty list is rejected as an unknown language.
    pub fn parse_list(s: &str) -> Result<LanguageSet> {
        let mut set = LanguageSet::NONE;
        for part in s.split(['+', ',']).map(str::trim) {
            if part.is_empty() {
                continue;
            }
            set.insert(part.parse()?);
        }
        if set.is_empty() {
            return Err(BeiderMorseError::UnknownLanguage(s.to_string()));
        }
        Ok(set)
    }
}

impl From<Language> for LanguageSet {
    fn from(language: Language) -> Self {
        LanguageSet::of(language)
    }
}

impl FromIterator<Language> for LanguageSet {
    fn from_iter<I: IntoIterator<Item = Language>>(iter: I) -> Self {
        let mut set = LanguageSet::NONE;
        for lang in iter {
            set.insert(lang);
        }
        set
    }
}

impl BitAnd for LanguageSet {
    type Output = LanguageSet;

    fn bitand(self, rhs: LanguageSet) -> LanguageSet {
        self.intersection(rhs)
    }
}

impl BitAndAssign for LanguageSet {
    fn bitand_assign(&mut self, rhs: LanguageSet) {
        self.0 &= rhs.0;
    }
}

impl BitOr for LanguageSet {
    type Output = LanguageSet;

    fn bitor(self, rhs: LanguageSet) -> LanguageSet {
        self.union(rhs)
    }
}

impl BitOrAssign for LanguageSet {
    fn bitor_assign(&mut self, rhs: LanguageSet) {
        self.0 |= rhs.0;
    }
}

impl fmt::Display for LanguageSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_empty() {
            return f.write_str("none");
        }
        let mut first = true;
        for lang in self.iter() {
            if !first {
                f.write_str("+")?;
            }
            f.write_str(lang.name())?;
            first = false;
        }
        Ok(())
    }
}

impl fmt::Debug for LanguageSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "LanguageSet({})", self)
    }
}

/// The language argument of an encode call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LanguageArg {
    /// Guess the languages from the name.
    #[default]
    Auto,
    /// Use exactly these languages (plus [`Language::Any`]).
    Fixed(LanguageSet),
}

impl LanguageArg {
    /// Pin a single language.
    pub fn fixed(language: Language) -> Self {
        LanguageArg::Fixed(LanguageSet::of(language))
    }
}

impl fmt::Display for LanguageArg {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LanguageArg::Auto => f.write_str("auto"),
            LanguageArg::Fixed(set) => write!(f, "{}", set),
        }
    }
}

impl FromStr for LanguageArg {
    type Err = BeiderMorseError;

    fn from_str(s: &str) -> Result<Self> {
        if s.trim().eq_ignore_ascii_case("auto") {
            return Ok(LanguageArg::Auto);
        }
        LanguageSet::parse_list(s).map(LanguageArg::Fixed)
    }
}

#[cfg(feature = "serialization")]
impl serde::Serialize for LanguageArg {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

#[cfg(feature = "serialization")]
impl<'de> serde::Deserialize<'de> for LanguageArg {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let text = String::deserialize(deserializer)?;
        text.parse().map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bits_match_reference_numbering() {
        assert_eq!(Language::Any.bit(), 1);
        assert_eq!(Language::English.bit(), 32);
        assert_eq!(Language::German.bit(), 128);
        assert_eq!(Language::Polish.bit(), 16384);
        assert_eq!(Language::Turkish.bit(), 524288);
    }

    #[test]
    fn test_language_from_str() {
        assert_eq!("German".parse::<Language>().unwrap(), Language::German);
        assert_eq!(" greeklatin ".parse::<Language>().unwrap(), Language::GreekLatin);
        assert!(matches!(
            "klingon".parse::<Language>(),
            Err(BeiderMorseError::UnknownLanguage(_))
        ));
    }

    #[test]
    fn test_set_operations() {
        let a = LanguageSet::of(Language::German) | LanguageSet::of(Language::Polish);
        let b = LanguageSet::of(Language::Polish) | LanguageSet::of(Language::Russian);
        assert_eq!(a & b, LanguageSet::of(Language::Polish));
        assert_eq!((a | b).len(), 3);
        assert!(a.intersects(b));
        assert!(!(a & b).contains(Language::German));
        assert_eq!(a.single(), None);
        assert_eq!((a & b).single(), Some(Language::Polish));
    }

    #[test]
    fn test_specific_drops_any() {
        let set = LanguageSet::ANY | LanguageSet::of(Language::French);
        assert_eq!(set.specific(), LanguageSet::of(Language::French));
        assert!(LanguageSet::ANY.specific().is_empty());
    }

    #[test]
    fn test_parse_list_and_display() {
        let set = LanguageSet::parse_list("polish+german").unwrap();
        assert_eq!(set.to_string(), "german+polish");
        assert_eq!(LanguageSet::parse_list("english, french").unwrap().len(), 2);
        assert!(LanguageSet::parse_list("").is_err());
        assert!(LanguageSet::parse_list("german+bogus").is_err());
        assert_eq!(LanguageSet::NONE.to_string(), "none");
    }

    #[test]
    fn test_all_covers_enumeration() {
        assert_eq!(LanguageSet::ALL.len(), Language::ALL.len());
        assert_eq!(LanguageSet::from_bits(u32::MAX), LanguageSet::ALL);
    }

    #[test]
    fn test_language_arg_from_str() {
        assert_eq!("auto".parse::<LanguageArg>().unwrap(), LanguageArg::Auto);
        assert_eq!(
            "english".parse::<LanguageArg>().unwrap(),
            LanguageArg::fixed(Language::English)
        );
        assert!("bogus".parse::<LanguageArg>().is_err());
    }
}
