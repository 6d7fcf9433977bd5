//! Rule tables compiled into the crate.
//!
//! The text lives under `data/<style>/` at the crate root and can be
//! versioned (or replaced at runtime through [`RuleSet::from_dir`]) without
//! touching the engine.
//!
//! [`RuleSet::from_dir`]: super::RuleSet::from_dir

use super::ruleset::RuleSources;
use crate::language::Language;
use crate::options::NameStyle;

macro_rules! table {
    ($style:literal, $file:literal) => {
        include_str!(concat!("../../data/", $style, "/", $file, ".txt"))
    };
}

/// Bundled sources for a name style.
pub(crate) fn sources(style: NameStyle) -> RuleSources<'static> {
    match style {
        NameStyle::Generic => RuleSources {
            languages: table!("gen", "languages"),
            discards: table!("gen", "discards"),
            any: table!("gen", "any"),
            specific: vec![
                (Language::Dutch, table!("gen", "dutch")),
                (Language::English, table!("gen", "english")),
                (Language::French, table!("gen", "french")),
                (Language::German, table!("gen", "german")),
                (Language::Hungarian, table!("gen", "hungarian")),
                (Language::Italian, table!("gen", "italian")),
                (Language::Polish, table!("gen", "polish")),
                (Language::Portuguese, table!("gen", "portuguese")),
                (Language::Russian, table!("gen", "russian")),
                (Language::Spanish, table!("gen", "spanish")),
            ],
            exact: table!("gen", "exact"),
            approx: table!("gen", "approx"),
        },
        NameStyle::Ashkenazi => RuleSources {
            languages: table!("ash", "languages"),
            discards: table!("ash", "discards"),
            any: table!("ash", "any"),
            specific: vec![
                (Language::English, table!("ash", "english")),
                (Language::German, table!("ash", "german")),
                (Language::Hungarian, table!("ash", "hungarian")),
                (Language::Polish, table!("ash", "polish")),
                (Language::Romanian, table!("ash", "romanian")),
                (Language::Russian, table!("ash", "russian")),
            ],
            exact: table!("ash", "exact"),
            approx: table!("ash", "approx"),
        },
        NameStyle::Sephardic => RuleSources {
            languages: table!("sep", "languages"),
            discards: table!("sep", "discards"),
            any: table!("sep", "any"),
            specific: vec![
                (Language::French, table!("sep", "french")),
                (Language::Hebrew, table!("sep", "hebrew")),
                (Language::Italian, table!("sep", "italian")),
                (Language::Portuguese, table!("sep", "portuguese")),
                (Language::Spanish, table!("sep", "spanish")),
            ],
            exact: table!("sep", "exact"),
            approx: table!("sep", "approx"),
        },
    }
}
