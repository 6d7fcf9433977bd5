//! # bmpm
//!
//! Beider-Morse Phonetic Matching: multi-language, rule-based phonetic keys
//! for personal names.
//!
//! A name is rewritten by ordered, context-sensitive rules into a set of
//! phonetic keys. Rules are grouped by name style (generic, Ashkenazi,
//! Sephardic) and by language; the language of a name is guessed from its
//! spelling unless the caller pins it. Spellings that sound alike in some
//! language end up sharing at least one key, which makes the keys usable for
//! fuzzy matching across languages:
//!
//! > Beider, Alexander, and Stephen P. Morse. "Phonetic Matching: A Better
//! > Soundex." Association of Professional Genealogists Quarterly (2010).
//!
//! ## Example
//!
//! ```rust
//! use bmpm::prelude::*;
//!
//! let encoder = BeiderMorse::new(EncoderConfig::default())?;
//! for key in encoder.encode("Schwarzenegger")? {
//!     println!("{}", key);
//! }
//! # Ok::<(), bmpm::BeiderMorseError>(())
//! ```
//!
//! ## Pipeline
//!
//! 1. [`guess`] picks the candidate languages of the name
//! 2. [`engine::application`] scans the name once per language and records
//!    every rule choice
//! 3. [`engine::expand`] turns those choices into language-consistent keys
//! 4. [`engine::final_rules`] normalises the keys and, in approximate mode,
//!    collapses close sounds
//! 5. [`engine::dedup`] removes repeats in a stable order

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod encoder;
pub mod engine;
pub mod error;
pub mod guess;
pub mod language;
pub mod options;
pub mod rules;

/// Command-line front end
#[cfg(feature = "cli")]
pub mod cli;

pub use encoder::{encode, BeiderMorse, BeiderMorseBuilder, EncoderConfig, DEFAULT_MAX_EXPANSIONS};
pub use error::{BeiderMorseError, Result};

/// Common imports for convenient usage
pub mod prelude {
    pub use crate::encoder::{BeiderMorse, BeiderMorseBuilder, EncoderConfig};
    pub use crate::engine::CandidateKey;
    pub use crate::error::{BeiderMorseError, Result};
    pub use crate::guess::LanguageGuesser;
    pub use crate::language::{Language, LanguageArg, LanguageSet};
    pub use crate::options::{MatchMode, NameStyle};
    pub use crate::rules::RuleSet;
}
