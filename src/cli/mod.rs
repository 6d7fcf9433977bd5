//! CLI interface for bmpm
//!
//! Encodes names from the command line or from files.

pub mod args;
pub mod commands;
pub mod paths;

pub use args::{Cli, Commands, EncodeOptions};
pub use paths::{config_dir, default_config_path, PersistentConfig};
