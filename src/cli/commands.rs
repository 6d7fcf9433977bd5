//! CLI command implementations

use anyhow::{Context, Result};
use colored::Colorize;
use rayon::prelude::*;
use std::fs::File;
use std::io::{self, BufRead, BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};
use std::time::Instant;

use crate::encoder::BeiderMorse;
use crate::options::NameStyle;
use crate::rules::RuleSet;

use super::args::{Commands, EncodeOptions};
use super::paths::PersistentConfig;

/// Execute a CLI command
pub fn execute(command: Commands, config_path: Option<&Path>) -> Result<()> {
    let stored = PersistentConfig::load_from(config_path)?;

    match command {
        Commands::Encode {
            names,
            show_languages,
            options,
        } => cmd_encode(&stored, &options, &names, show_languages),
        Commands::Batch {
            input,
            output,
            header,
            options,
        } => cmd_batch(&stored, &options, &input, output, header),
        Commands::Languages { style } => cmd_languages(style.or(stored.name_style)),
        Commands::Guess { name, style } => {
            let options = EncodeOptions {
                style,
                ..EncodeOptions::default()
            };
            cmd_guess(&stored, &options, &name)
        }
        Commands::Config { save, options } => cmd_config(&stored, &options, save, config_path),
    }
}

/// Build an encoder from merged settings.
pub fn build_encoder(settings: &PersistentConfig) -> Result<BeiderMorse> {
    let mut builder = BeiderMorse::builder().config(settings.encoder_config());
    if let Some(dir) = &settings.rules_dir {
        builder = builder.rules_dir(dir.clone());
    }
    builder.build().context("Failed to configure encoder")
}

fn cmd_encode(
    stored: &PersistentConfig,
    options: &EncodeOptions,
    names: &[String],
    show_languages: bool,
) -> Result<()> {
    let encoder = build_encoder(&stored.merge_with_cli(options))?;

    for name in names {
        let rendered = if show_languages {
            encoder
                .encode_keys(name)?
                .iter()
                .map(|key| format!("{}[{}]", key.phonetic, key.languages))
                .collect::<Vec<_>>()
                .join(" ")
        } else {
            encoder.encode_to_string(name)?
        };
        println!("{}\t{}", name.bold(), rendered.green());
    }
    Ok(())
}

fn cmd_batch(
    stored: &PersistentConfig,
    options: &EncodeOptions,
    input: &Path,
    output: Option<PathBuf>,
    header: bool,
) -> Result<()> {
    let encoder = build_encoder(&stored.merge_with_cli(options))?;

    let reader = BufReader::new(
        File::open(input).with_context(|| format!("Failed to open {}", input.display()))?,
    );

    let start = Instant::now();
    let count = match &output {
        Some(path) => {
            let file = File::create(path)
                .with_context(|| format!("Failed to create {}", path.display()))?;
            let mut writer = BufWriter::new(file);
            encode_batch(&encoder, reader, &mut writer, header)?
        }
        None => {
            let stdout = io::stdout();
            let mut writer = stdout.lock();
            encode_batch(&encoder, reader, &mut writer, header)?
        }
    };

    eprintln!(
        "{} {} names in {:.2?}",
        "Encoded".green().bold(),
        count,
        start.elapsed()
    );
    if let Some(path) = output {
        eprintln!("Output written to {}", path.display());
    }
    Ok(())
}

/// Encode every line of `input` and write `name<TAB>keys` lines to `output`.
///
/// Names are encoded in parallel; output lines keep input order. With
/// `header`, the first line is copied through unchanged. Returns the number
/// of names encoded.
pub fn encode_batch<R: BufRead, W: Write>(
    encoder: &BeiderMorse,
    input: R,
    output: &mut W,
    header: bool,
) -> Result<usize> {
    let mut lines = input.lines();
    let mut first_line = 1;
    if header {
        if let Some(line) = lines.next() {
            writeln!(output, "{}", line.context("Failed to read header")?)?;
        }
        first_line = 2;
    }

    let names = lines
        .collect::<io::Result<Vec<String>>>()
        .context("Failed to read input")?;

    let encoded = names
        .par_iter()
        .enumerate()
        .map(|(i, name)| {
            encoder
                .encode_to_string(name)
                .with_context(|| format!("line {}: failed to encode {:?}", first_line + i, name))
        })
        .collect::<Result<Vec<String>>>()?;

    for (name, keys) in names.iter().zip(&encoded) {
        writeln!(output, "{}\t{}", name, keys)?;
    }
    output.flush()?;
    Ok(names.len())
}

fn cmd_languages(style: Option<NameStyle>) -> Result<()> {
    let style = style.unwrap_or_default();
    let rules = RuleSet::bundled(style)
        .with_context(|| format!("Failed to load bundled {} rules", style))?;

    println!("{} ({})", "Languages".bold(), style);
    for language in rules.languages().iter() {
        let table = if rules.table(language).is_some() {
            "own rules".green()
        } else {
            "shared rules".dimmed()
        };
        println!("  {:<12} {}", language.name(), table);
    }
    Ok(())
}

fn cmd_guess(stored: &PersistentConfig, options: &EncodeOptions, name: &str) -> Result<()> {
    let encoder = build_encoder(&stored.merge_with_cli(options))?;
    let guessed = encoder.guess_languages(name);

    println!("{}\t{}", name.bold(), guessed.to_string().cyan());
    Ok(())
}

fn cmd_config(
    stored: &PersistentConfig,
    options: &EncodeOptions,
    save: bool,
    config_path: Option<&Path>,
) -> Result<()> {
    let merged = stored.merge_with_cli(options);

    if save {
        let path = merged.save_to(config_path)?;
        println!("{} {}", "Saved configuration to".green(), path.display());
    } else {
        println!("{}", serde_json::to_string_pretty(&merged)?);
    }
    Ok(())
}
