//! Configuration directory and persistent settings

use anyhow::{bail, Context, Result};
use std::path::{Path, PathBuf};

use super::args::EncodeOptions;
use crate::encoder::{EncoderConfig, DEFAULT_MAX_EXPANSIONS};
use crate::language::LanguageArg;
use crate::options::{MatchMode, NameStyle};

/// Get the configuration directory for bmpm
pub fn config_dir() -> Result<PathBuf> {
    let base = dirs::config_dir().context("Could not determine configuration directory")?;
    Ok(base.join("bmpm"))
}

/// Get the default config file path
pub fn default_config_path() -> Result<PathBuf> {
    Ok(config_dir()?.join("config.json"))
}

/// Validate that a config file path has .json extension
pub fn validate_config_path(path: &Path) -> Result<()> {
    match path.extension().and_then(|s| s.to_str()) {
        Some("json") => Ok(()),
        Some(ext) => Err(anyhow::anyhow!(
            "Config file must have .json extension, got .{}. Please use a .json file.",
            ext
        )),
        None => Err(anyhow::anyhow!(
            "Config file must have .json extension. Please add .json to the filename."
        )),
    }
}

/// User configuration stored in the config file
#[derive(Debug, Clone, Default, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct PersistentConfig {
    /// Default name style
    pub name_style: Option<NameStyle>,
    /// Default match mode
    pub match_mode: Option<MatchMode>,
    /// Default language argument
    pub language: Option<LanguageArg>,
    /// Combine multi-word names
    pub concat: Option<bool>,
    /// Ignore unsupported pinned languages
    pub filter_langs: Option<bool>,
    /// NFC-normalise and lower-case names
    pub fold_case: Option<bool>,
    /// Directory with replacement rule tables
    pub rules_dir: Option<PathBuf>,
    /// Expansion bound
    pub max_expansions: Option<usize>,
}

impl PersistentConfig {
    /// Load configuration from the default location, or from `custom_path`.
    ///
    /// A missing default file yields the defaults; a missing custom file is
    /// an error.
    pub fn load_from(custom_path: Option<&Path>) -> Result<Self> {
        let path = match custom_path {
            Some(path) => {
                validate_config_path(path)?;
                if !path.exists() {
                    bail!("Config file not found: {}", path.display());
                }
                path.to_path_buf()
            }
            None => {
                let path = default_config_path()?;
                if !path.exists() {
                    return Ok(Self::default());
                }
                path
            }
        };

        let contents = std::fs::read_to_string(&path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        serde_json::from_str(&contents)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))
    }

    /// Save configuration to the default location, or to `custom_path`.
    pub fn save_to(&self, custom_path: Option<&Path>) -> Result<PathBuf> {
        let path = match custom_path {
            Some(path) => {
                validate_config_path(path)?;
                path.to_path_buf()
            }
            None => default_config_path()?,
        };
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
        }

        let contents = serde_json::to_string_pretty(self)?;
        std::fs::write(&path, contents)
            .with_context(|| format!("Failed to write config file: {}", path.display()))?;
        Ok(path)
    }

    /// Merge with command-line options (CLI options take precedence)
    pub fn merge_with_cli(&self, options: &EncodeOptions) -> Self {
        Self {
            name_style: options.style.or(self.name_style),
            match_mode: options.mode.or(self.match_mode),
            language: options.language.or(self.language),
            concat: options.concat.then_some(true).or(self.concat),
            filter_langs: options.filter_langs.then_some(true).or(self.filter_langs),
            fold_case: options.no_fold_case.then_some(false).or(self.fold_case),
            rules_dir: options.rules_dir.clone().or_else(|| self.rules_dir.clone()),
            max_expansions: self.max_expansions,
        }
    }

    /// The encoder options these settings describe.
    pub fn encoder_config(&self) -> EncoderConfig {
        EncoderConfig {
            language: self.language.unwrap_or(LanguageArg::Auto),
            name_style: self.name_style.unwrap_or_default(),
            match_mode: self.match_mode.unwrap_or_default(),
            concat: self.concat.unwrap_or(false),
            filter_langs: self.filter_langs.unwrap_or(false),
            fold_case: self.fold_case.unwrap_or(true),
            max_expansions: self.max_expansions.unwrap_or(DEFAULT_MAX_EXPANSIONS),
        }
    }
}
