//! Error types for Beider-Morse encoding.
//!
//! Every variant except [`BeiderMorseError::ExpansionLimit`] is a
//! configuration error: it is raised while options are parsed or rule tables
//! are loaded, before any rule is applied to a name.

use std::path::PathBuf;
use thiserror::Error;

use crate::options::NameStyle;

/// Errors that can occur while configuring an encoder or loading rule tables.
#[derive(Debug, Error)]
pub enum BeiderMorseError {
    /// A language name that is not part of the language enumeration.
    #[error("Unknown language: {0}")]
    UnknownLanguage(String),

    /// A known language that the selected name style has no rules for.
    #[error("Language {language} is not supported by the {style} name style")]
    UnsupportedLanguage {
        /// The rejected language
        language: String,
        /// The name style that was active
        style: NameStyle,
    },

    /// A name style other than `gen`, `ash` or `sep`.
    #[error("Unknown name style: {0}. Valid options: gen, ash, sep")]
    UnknownNameStyle(String),

    /// A match mode other than `approx` or `exact`.
    #[error("Unknown match mode: {0}. Valid options: approx, exact")]
    UnknownMatchMode(String),

    /// A malformed line in a rule-table data file.
    #[error("{source_name}:{line}: {message}")]
    RuleParse {
        /// Name of the table the line came from
        source_name: String,
        /// 1-based line number
        line: usize,
        /// What is wrong with the line
        message: String,
    },

    /// A rule set handed to an encoder configured for another name style.
    #[error("Rule set is for the {found} name style, but the encoder is configured for {expected}")]
    StyleMismatch {
        /// Style from the encoder configuration
        expected: NameStyle,
        /// Style of the supplied rule set
        found: NameStyle,
    },

    /// A left or right context that is not a valid regular expression.
    #[error("{source_name}:{line}: invalid context {context:?}: {err}")]
    InvalidContext {
        /// Name of the table the line came from
        source_name: String,
        /// 1-based line number
        line: usize,
        /// The offending context text
        context: String,
        /// Regex compilation error
        #[source]
        err: regex::Error,
    },

    /// Expanding a name produced more partial candidates than allowed.
    #[error("Alternate expansion exceeded the limit of {limit} candidates")]
    ExpansionLimit {
        /// The configured `max_expansions`
        limit: usize,
    },

    /// Reading a rule table from disk failed.
    #[error("I/O error for {path}: {err}")]
    Io {
        /// File that could not be read
        path: PathBuf,
        /// Underlying error
        #[source]
        err: std::io::Error,
    },
}

impl BeiderMorseError {
    /// Returns true for errors caused by options or rule data rather than by
    /// the name being encoded.
    pub fn is_configuration_error(&self) -> bool {
        !matches!(self, BeiderMorseError::ExpansionLimit { .. })
    }
}

/// A specialized `Result` type for Beider-Morse operations.
pub type Result<T> = std::result::Result<T, BeiderMorseError>;
