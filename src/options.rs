//! Name style and match mode selectors.

use std::fmt;
use std::str::FromStr;

use crate::error::{BeiderMorseError, Result};
use crate::language::{Language, LanguageSet};

/// Which family of rule tables is used.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(
    feature = "serialization",
    derive(serde::Serialize, serde::Deserialize)
)]
#[cfg_attr(feature = "cli", derive(clap::ValueEnum))]
pub enum NameStyle {
    /// Names of any origin.
    #[default]
    #[cfg_attr(feature = "serialization", serde(rename = "gen", alias = "generic"))]
    #[cfg_attr(feature = "cli", value(name = "gen", alias = "generic"))]
    Generic,
    /// Ashkenazi Jewish names.
    #[cfg_attr(feature = "serialization", serde(rename = "ash", alias = "ashkenazi"))]
    #[cfg_attr(feature = "cli", value(name = "ash", alias = "ashkenazi"))]
    Ashkenazi,
    /// Sephardic Jewish names.
    #[cfg_attr(feature = "serialization", serde(rename = "sep", alias = "sephardic"))]
    #[cfg_attr(feature = "cli", value(name = "sep", alias = "sephardic"))]
    Sephardic,
}

impl NameStyle {
    /// Every name style.
    pub const ALL: [NameStyle; 3] = [NameStyle::Generic, NameStyle::Ashkenazi, NameStyle::Sephardic];

    /// Short name, also the data directory name.
    pub fn name(&self) -> &'static str {
        match self {
            NameStyle::Generic => "gen",
            NameStyle::Ashkenazi => "ash",
            NameStyle::Sephardic => "sep",
        }
    }

    /// The languages this style has rule tables for, [`Language::Any`] included.
    pub fn languages(&self) -> LanguageSet {
        use Language::*;
        let list: &[Language] = match self {
            NameStyle::Generic => &Language::ALL,
            NameStyle::Ashkenazi => &[
                Any, Cyrillic, English, French, German, Hebrew, Hungarian, Polish, Romanian,
                Russian, Spanish,
            ],
            NameStyle::Sephardic => &[Any, French, Hebrew, Italian, Portuguese, Spanish],
        };
        list.iter().copied().collect()
    }
}

impl fmt::Display for NameStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for NameStyle {
    type Err = BeiderMorseError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "gen" | "generic" => Ok(NameStyle::Generic),
            "ash" | "ashkenazi" => Ok(NameStyle::Ashkenazi),
            "sep" | "sephardic" => Ok(NameStyle::Sephardic),
            _ => Err(BeiderMorseError::UnknownNameStyle(s.to_string())),
        }
    }
}

/// Whether keys keep full phonetic detail or are collapsed for fuzzy matching.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(
    feature = "serialization",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "lowercase")
)]
#[cfg_attr(feature = "cli", derive(clap::ValueEnum))]
pub enum MatchMode {
    /// Collapse acoustically close spellings with the phonetic number pass.
    #[default]
    #[cfg_attr(feature = "serialization", serde(alias = "approximate"))]
    #[cfg_attr(feature = "cli", value(alias = "approximate"))]
    Approx,
    /// Keep full phonetic strings.
    Exact,
}

impl MatchMode {
    /// Short name used in options and rule tags.
    pub fn name(&self) -> &'static str {
        match self {
            MatchMode::Approx => "approx",
            MatchMode::Exact => "exact",
        }
    }
}

impl fmt::Display for MatchMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for MatchMode {
    type Err = BeiderMorseError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "approx" | "approximate" => Ok(MatchMode::Approx),
            "exact" => Ok(MatchMode::Exact),
            _ => Err(BeiderMorseError::UnknownMatchMode(s.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_name_style_from_str() {
        assert_eq!("gen".parse::<NameStyle>().unwrap(), NameStyle::Generic);
        assert_eq!("Ashkenazi".parse::<NameStyle>().unwrap(), NameStyle::Ashkenazi);
        assert_eq!("sep".parse::<NameStyle>().unwrap(), NameStyle::Sephardic);
        assert!(matches!(
            "celtic".parse::<NameStyle>(),
            Err(BeiderMorseError::UnknownNameStyle(_))
        ));
    }

    #[test]
    fn test_match_mode_from_str() {
        assert_eq!("approx".parse::<MatchMode>().unwrap(), MatchMode::Approx);
        assert_eq!("EXACT".parse::<MatchMode>().unwrap(), MatchMode::Exact);
        assert!(matches!(
            "fuzzy".parse::<MatchMode>(),
            Err(BeiderMorseError::UnknownMatchMode(_))
        ));
    }

    #[test]
    fn test_style_languages() {
        assert_eq!(NameStyle::Generic.languages(), LanguageSet::ALL);
        let sep = NameStyle::Sephardic.languages();
        assert_eq!(sep.len(), 6);
        assert!(sep.contains(Language::Any));
        assert!(!sep.contains(Language::German));
        assert!(NameStyle::Ashkenazi.languages().contains(Language::Hebrew));
    }

    #[test]
    fn test_display_round_trips_through_from_str() {
        for style in NameStyle::ALL {
            assert_eq!(style.to_string().parse::<NameStyle>().unwrap(), style);
        }
    }
}
