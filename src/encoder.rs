//! The Beider-Morse encoder.
//!
//! [`BeiderMorse`] ties the pieces together: it prepares the name for its
//! name style, guesses (or pins) the languages, runs the rule engine,
//! expands and finalises the candidates and returns the keys in a stable
//! order.
//!
//! # Example
//!
//! ```rust
//! use bmpm::prelude::*;
//!
//! let encoder = BeiderMorse::builder()
//!     .name_style(NameStyle::Generic)
//!     .match_mode(MatchMode::Approx)
//!     .build()?;
//!
//! let keys = encoder.encode("Martin")?;
//! assert!(!keys.is_empty());
//! # Ok::<(), bmpm::BeiderMorseError>(())
//! ```
//!
//! An encoder holds only immutable data and can be shared between threads
//! behind an `Arc` or simply cloned (the rule tables are reference-counted).

use std::path::PathBuf;
use std::sync::Arc;

use unicode_normalization::UnicodeNormalization;

use crate::engine::{dedup, expand, finalize, CandidateKey, CandidateSet, RuleEngine};
use crate::error::{BeiderMorseError, Result};
use crate::guess::LanguageGuesser;
use crate::language::{LanguageArg, LanguageSet};
use crate::options::{MatchMode, NameStyle};
use crate::rules::RuleSet;

/// Default bound on partial candidates during expansion.
pub const DEFAULT_MAX_EXPANSIONS: usize = 1 << 16;

/// Options of an encoder.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(
    feature = "serialization",
    derive(serde::Serialize, serde::Deserialize),
    serde(default)
)]
pub struct EncoderConfig {
    /// `auto` or the languages to pin.
    pub language: LanguageArg,
    /// Rule table family.
    pub name_style: NameStyle,
    /// Approximate or exact keys.
    pub match_mode: MatchMode,
    /// Encode multi-word names as one combined name.
    pub concat: bool,
    /// Drop pinned languages the name style does not support instead of failing.
    pub filter_langs: bool,
    /// NFC-normalise and lower-case names before encoding.
    pub fold_case: bool,
    /// Upper bound on partial candidates while expanding one word.
    pub max_expansions: usize,
}

impl Default for EncoderConfig {
    fn default() -> Self {
        EncoderConfig {
            language: LanguageArg::Auto,
            name_style: NameStyle::Generic,
            match_mode: MatchMode::Approx,
            concat: false,
            filter_langs: false,
            fold_case: true,
            max_expansions: DEFAULT_MAX_EXPANSIONS,
        }
    }
}

/// A configured Beider-Morse encoder.
#[derive(Debug, Clone)]
pub struct BeiderMorse {
    config: EncoderConfig,
    rules: Arc<RuleSet>,
    pinned: Option<LanguageSet>,
}

impl BeiderMorse {
    /// Create an encoder with the bundled rule tables for the configured style.
    pub fn new(config: EncoderConfig) -> Result<Self> {
        let rules = Arc::new(RuleSet::bundled(config.name_style)?);
        Self::with_rules(config, rules)
    }

    /// Create an encoder over an already loaded rule set.
    ///
    /// The rule set must belong to the configured name style.
    pub fn with_rules(config: EncoderConfig, rules: Arc<RuleSet>) -> Result<Self> {
        if rules.style() != config.name_style {
            return Err(BeiderMorseError::StyleMismatch {
                expected: config.name_style,
                found: rules.style(),
            });
        }
        let pinned = resolve_language(&config)?;
        Ok(BeiderMorse {
            config,
            rules,
            pinned,
        })
    }

    /// Start building an encoder.
    pub fn builder() -> BeiderMorseBuilder {
        BeiderMorseBuilder::new()
    }

    /// The encoder's options.
    pub fn config(&self) -> &EncoderConfig {
        &self.config
    }

    /// The rule tables in use.
    pub fn rules(&self) -> &Arc<RuleSet> {
        &self.rules
    }

    /// Languages the encoder would use for `name`.
    ///
    /// This is the pinned set when a language was configured, otherwise
    /// the guess for the prepared name.
    pub fn languages_for(&self, name: &str) -> LanguageSet {
        self.pinned
            .unwrap_or_else(|| self.guess_languages(name))
    }

    /// Guess the languages of `name`, ignoring any pinned language.
    pub fn guess_languages(&self, name: &str) -> LanguageSet {
        LanguageGuesser::new(&self.rules).guess(&self.prepare(name))
    }

    /// Encode a name into phonetic keys.
    ///
    /// Empty (or whitespace-only) names produce no keys.
    pub fn encode(&self, name: &str) -> Result<Vec<String>> {
        Ok(self
            .encode_keys(name)?
            .into_iter()
            .map(|key| key.phonetic)
            .collect())
    }

    /// Encode a name into keys joined by a single space.
    pub fn encode_to_string(&self, name: &str) -> Result<String> {
        Ok(self.encode(name)?.join(" "))
    }

    /// Encode a name, keeping each key's language set.
    pub fn encode_keys(&self, name: &str) -> Result<Vec<CandidateKey>> {
        let term = self.prepare(name);
        let mut out = CandidateSet::new();
        if !term.is_empty() {
            self.encode_term(&term, None, &mut out)?;
        }
        Ok(out.into_vec())
    }

    /// Encode a first and last name as one combined name.
    ///
    /// Languages are guessed once from both names together; the keys of the
    /// two names are then combined pairwise.
    pub fn encode_pair(&self, first: &str, last: &str) -> Result<Vec<String>> {
        let first = self.prepare(first);
        let last = self.prepare(last);
        let whole = format!("{} {}", first, last);
        let languages = self.languages_in(whole.trim());

        let mut keys: Vec<CandidateKey> = Vec::new();
        for part in [&first, &last] {
            if part.is_empty() {
                continue;
            }
            let mut set = CandidateSet::new();
            self.encode_term(part, Some(languages), &mut set)?;
            keys = combine(&keys, set.as_slice(), self.config.max_expansions)?;
        }

        Ok(keys.into_iter().map(|key| key.phonetic).collect())
    }

    // ========================================================================
    // Name preparation
    // ========================================================================

    /// Normalise case and whitespace; hyphens separate words.
    fn prepare(&self, name: &str) -> String {
        let folded: String = if self.config.fold_case {
            name.nfc().collect::<String>().to_lowercase()
        } else {
            name.to_string()
        };
        folded
            .replace('-', " ")
            .split_whitespace()
            .collect::<Vec<_>>()
            .join(" ")
    }

    /// Split a prepared term into the words to encode for the name style.
    fn words<'t>(&self, term: &'t str) -> Vec<&'t str> {
        let words: Vec<&str> = term.split(' ').filter(|w| !w.is_empty()).collect();
        let is_particle = |word: &str| self.rules.discards().iter().any(|d| d.trim() == word);

        match self.config.name_style {
            NameStyle::Generic => words,
            NameStyle::Ashkenazi => {
                if words.len() > 1 && is_particle(words[0]) {
                    words[1..].to_vec()
                } else {
                    words
                }
            }
            NameStyle::Sephardic => {
                let cut: Vec<&str> = words
                    .iter()
                    .map(|word| word.rsplit('\'').next().unwrap_or(word))
                    .filter(|word| !word.is_empty())
                    .collect();
                let kept: Vec<&str> = cut.iter().copied().filter(|word| !is_particle(*word)).collect();
                // A name made only of particles is encoded as written.
                if !kept.is_empty() {
                    kept
                } else if !cut.is_empty() {
                    cut
                } else {
                    // Every word ends in an apostrophe ("d'"); the rules drop it.
                    words
                }
            }
        }
    }

    // ========================================================================
    // Encoding
    // ========================================================================

    fn encode_term(&self, term: &str, languages: Option<LanguageSet>, out: &mut CandidateSet) -> Result<()> {
        if self.config.name_style == NameStyle::Generic {
            for particle in self.rules.discards() {
                let Some(remainder) = term.strip_prefix(particle.as_str()) else { continue };
                let remainder = remainder.trim();
                if remainder.is_empty() {
                    continue;
                }
                // "van helsing" yields the keys of "helsing", then of "vanhelsing".
                let mut fused = particle.clone();
                fused.pop();
                fused.push_str(remainder);
                self.encode_term(remainder, languages, out)?;
                return self.encode_term(&fused, languages, out);
            }
        }

        let words = self.words(term);
        match words.as_slice() {
            [] => {}
            [word] => {
                let languages = languages.unwrap_or_else(|| self.languages_in(word));
                out.extend(self.encode_word(word, languages)?);
            }
            _ if self.config.concat => {
                let languages = languages.unwrap_or_else(|| self.languages_in(&words.join(" ")));
                let mut keys: Vec<CandidateKey> = Vec::new();
                for word in &words {
                    keys = combine(&keys, &self.encode_word(word, languages)?, self.config.max_expansions)?;
                }
                out.extend(keys);
            }
            _ => {
                for word in &words {
                    let languages = languages.unwrap_or_else(|| self.languages_in(word));
                    out.extend(self.encode_word(word, languages)?);
                }
            }
        }
        Ok(())
    }

    /// Pinned languages, or a guess for an already prepared term.
    fn languages_in(&self, term: &str) -> LanguageSet {
        self.pinned
            .unwrap_or_else(|| LanguageGuesser::new(&self.rules).guess(term))
    }

    /// Run one word through the rule engine and the final passes.
    fn encode_word(&self, word: &str, languages: LanguageSet) -> Result<Vec<CandidateKey>> {
        let mode = self.config.match_mode;
        let limit = self.config.max_expansions;

        let expression = RuleEngine::new(&self.rules, mode).apply(word, languages);
        let raw = expand(&expression, limit)?;
        let finals: Vec<CandidateKey> = finalize(&self.rules, raw, mode, limit)?
            .into_iter()
            .filter(|key| !key.phonetic.is_empty())
            .collect();

        // Deletion rules can erase a whole word; keep its spelling instead.
        if finals.is_empty() {
            tracing::debug!(word, "every key was empty, using the spelling");
            return Ok(vec![CandidateKey::new(word, languages)]);
        }
        Ok(dedup(finals))
    }
}

/// One-shot encoding with string options.
///
/// Options are parsed up front, so a bad `language`, `name_style` or
/// `match_mode` fails before any rule runs. This loads the rule tables on
/// every call; hold a [`BeiderMorse`] to encode many names.
///
/// ```rust
/// let keys = bmpm::encode("Martin", "auto", "gen", "approx", false)?;
/// assert!(!keys.is_empty());
/// assert!(bmpm::encode("Martin", "bogus", "gen", "approx", false).is_err());
/// # Ok::<(), bmpm::BeiderMorseError>(())
/// ```
pub fn encode(
    name: &str,
    language: &str,
    name_style: &str,
    match_mode: &str,
    concat: bool,
) -> Result<Vec<String>> {
    let config = EncoderConfig {
        language: language.parse()?,
        name_style: name_style.parse()?,
        match_mode: match_mode.parse()?,
        concat,
        ..EncoderConfig::default()
    };
    BeiderMorse::new(config)?.encode(name)
}

/// Resolve the configured language argument against the name style.
fn resolve_language(config: &EncoderConfig) -> Result<Option<LanguageSet>> {
    let LanguageArg::Fixed(requested) = config.language else {
        return Ok(None);
    };
    let supported = config.name_style.languages();

    let mut kept = LanguageSet::NONE;
    for language in requested.specific().iter() {
        if supported.contains(language) {
            kept.insert(language);
        } else if config.filter_langs {
            tracing::warn!(
                language = %language,
                style = %config.name_style,
                "language not supported by name style, ignoring"
            );
        } else {
            return Err(BeiderMorseError::UnsupportedLanguage {
                language: language.to_string(),
                style: config.name_style,
            });
        }
    }

    if kept.is_empty() && !requested.specific().is_empty() {
        tracing::warn!(style = %config.name_style, "no pinned language left, guessing instead");
        return Ok(None);
    }
    Ok(Some(kept | LanguageSet::ANY))
}

/// Pairwise concatenation of two key lists.
///
/// Pairs whose language sets are disjoint are skipped; when that leaves
/// nothing, every pair is kept with the union of its languages.
fn combine(left: &[CandidateKey], right: &[CandidateKey], limit: usize) -> Result<Vec<CandidateKey>> {
    if left.is_empty() {
        return Ok(right.to_vec());
    }
    if right.is_empty() {
        return Ok(left.to_vec());
    }
    if left.len().saturating_mul(right.len()) > limit {
        return Err(BeiderMorseError::ExpansionLimit { limit });
    }

    let pairs = |strict: bool| -> CandidateSet {
        let mut set = CandidateSet::new();
        for a in left {
            for b in right {
                let languages = if strict {
                    a.languages & b.languages
                } else {
                    a.languages | b.languages
                };
                if !languages.is_empty() {
                    set.insert(&format!("{}{}", a.phonetic, b.phonetic), languages);
                }
            }
        }
        set
    };

    let strict = pairs(true);
    let set = if strict.is_empty() { pairs(false) } else { strict };
    Ok(set.into_vec())
}

// ============================================================================
// Builder
// ============================================================================

/// Builder for [`BeiderMorse`] with a fluent API.
///
/// # Example
///
/// ```rust
/// use bmpm::prelude::*;
///
/// let encoder = BeiderMorse::builder()
///     .name_style(NameStyle::Sephardic)
///     .language("spanish".parse()?)
///     .match_mode(MatchMode::Exact)
///     .build()?;
/// assert_eq!(encoder.config().match_mode, MatchMode::Exact);
/// # Ok::<(), bmpm::BeiderMorseError>(())
/// ```
#[derive(Debug, Clone, Default)]
pub struct BeiderMorseBuilder {
    config: EncoderConfig,
    rules: Option<Arc<RuleSet>>,
    rules_dir: Option<PathBuf>,
}

impl BeiderMorseBuilder {
    /// A builder with default options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace every option at once.
    pub fn config(mut self, config: EncoderConfig) -> Self {
        self.config = config;
        self
    }

    /// Set the language argument.
    pub fn language(mut self, language: LanguageArg) -> Self {
        self.config.language = language;
        self
    }

    /// Set the name style.
    pub fn name_style(mut self, style: NameStyle) -> Self {
        self.config.name_style = style;
        self
    }

    /// Set the match mode.
    pub fn match_mode(mut self, mode: MatchMode) -> Self {
        self.config.match_mode = mode;
        self
    }

    /// Encode multi-word names as one combined name.
    pub fn concat(mut self, concat: bool) -> Self {
        self.config.concat = concat;
        self
    }

    /// Drop unsupported pinned languages instead of failing.
    pub fn filter_langs(mut self, filter: bool) -> Self {
        self.config.filter_langs = filter;
        self
    }

    /// Enable or disable case folding.
    pub fn fold_case(mut self, fold: bool) -> Self {
        self.config.fold_case = fold;
        self
    }

    /// Bound the number of partial candidates per word.
    pub fn max_expansions(mut self, limit: usize) -> Self {
        self.config.max_expansions = limit;
        self
    }

    /// Use an already loaded rule set.
    pub fn rules(mut self, rules: Arc<RuleSet>) -> Self {
        self.rules = Some(rules);
        self
    }

    /// Load rule tables from a directory instead of the bundled ones.
    pub fn rules_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.rules_dir = Some(dir.into());
        self
    }

    /// Validate the options, load the rule tables and build the encoder.
    ///
    /// # Errors
    ///
    /// - [`BeiderMorseError::UnsupportedLanguage`] for a pinned language the
    ///   style lacks (unless `filter_langs` is set)
    /// - [`BeiderMorseError::StyleMismatch`] for a rule set of another style
    /// - rule table parse and I/O errors
    pub fn build(self) -> Result<BeiderMorse> {
        let rules = match (self.rules, self.rules_dir) {
            (Some(rules), _) => rules,
            (None, Some(dir)) => Arc::new(RuleSet::from_dir(self.config.name_style, dir)?),
            (None, None) => Arc::new(RuleSet::bundled(self.config.name_style)?),
        };
        BeiderMorse::with_rules(self.config, rules)
    }
}
