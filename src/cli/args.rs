//! CLI argument definitions

use clap::{ArgAction, Args, Parser, Subcommand};
use std::path::PathBuf;

use crate::language::LanguageArg;
use crate::options::{MatchMode, NameStyle};

#[derive(Parser, Debug)]
#[command(name = "bmpm")]
#[command(about = "Beider-Morse phonetic keys for personal names")]
#[command(version)]
pub struct Cli {
    /// Custom configuration file path
    #[arg(short = 'c', long, global = true)]
    pub config: Option<PathBuf>,

    /// Log more (-v debug, -vv trace); RUST_LOG takes precedence
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Commands,
}

/// Encoder options shared by the encoding commands.
///
/// Unset options fall back to the configuration file, then to the
/// library defaults.
#[derive(Args, Debug, Clone, Default)]
pub struct EncodeOptions {
    /// Name style (rule table family)
    #[arg(short, long)]
    pub style: Option<NameStyle>,

    /// Match mode
    #[arg(short, long)]
    pub mode: Option<MatchMode>,

    /// Language: "auto" or names joined by '+' (e.g. german+polish)
    #[arg(short, long)]
    pub language: Option<LanguageArg>,

    /// Encode multi-word names as one combined name
    #[arg(long)]
    pub concat: bool,

    /// Ignore pinned languages the name style does not support
    #[arg(long)]
    pub filter_langs: bool,

    /// Encode names as given, without case folding or NFC normalisation
    #[arg(long)]
    pub no_fold_case: bool,

    /// Load rule tables from this directory instead of the bundled ones
    #[arg(long)]
    pub rules_dir: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Encode names given on the command line
    Encode {
        /// Names to encode
        #[arg(required = true)]
        names: Vec<String>,

        /// Show the languages of every key
        #[arg(long)]
        show_languages: bool,

        #[command(flatten)]
        options: EncodeOptions,
    },

    /// Encode a file of names, one per line
    Batch {
        /// Input file
        #[arg(short, long)]
        input: PathBuf,

        /// Output file (standard output if omitted)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// The first input line is a header and is copied through
        #[arg(long)]
        header: bool,

        #[command(flatten)]
        options: EncodeOptions,
    },

    /// List the languages a name style supports
    Languages {
        /// Name style
        #[arg(short, long)]
        style: Option<NameStyle>,
    },

    /// Show the languages guessed for a name
    Guess {
        /// Name to inspect
        name: String,

        /// Name style
        #[arg(short, long)]
        style: Option<NameStyle>,
    },

    /// Show or save the effective configuration
    Config {
        /// Write the effective configuration to the config file
        #[arg(long)]
        save: bool,

        #[command(flatten)]
        options: EncodeOptions,
    },
}
