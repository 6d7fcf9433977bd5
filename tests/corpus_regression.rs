//! Regression against a recorded corpus of encoded names.
//!
//! Needs the published rule tables and the recorded outputs, neither of
//! which ships with the crate:
//!
//! - `BMPM_RULES_DIR`: a directory with `gen/`, `ash/` and `sep/` table
//!   directories laid out like `data/`
//! - `BMPM_CORPUS_DIR`: `regtest_names.csv` (a header line, then one name
//!   per line) and one `<configuration>.csv` per configuration below (a
//!   header line, then the space-joined keys of each name)
//!
//! Run with `cargo test --test corpus_regression -- --ignored`.

use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use bmpm::prelude::*;

struct Configuration {
    name: &'static str,
    style: NameStyle,
    mode: MatchMode,
    language: Option<Language>,
}

const CONFIGURATIONS: [Configuration; 8] = [
    Configuration { name: "bmpm", style: NameStyle::Generic, mode: MatchMode::Approx, language: None },
    Configuration { name: "bmpm_german", style: NameStyle::Generic, mode: MatchMode::Approx, language: Some(Language::German) },
    Configuration { name: "bmpm_french", style: NameStyle::Generic, mode: MatchMode::Approx, language: Some(Language::French) },
    Configuration { name: "bmpm_gen_exact", style: NameStyle::Generic, mode: MatchMode::Exact, language: None },
    Configuration { name: "bmpm_ash_approx", style: NameStyle::Ashkenazi, mode: MatchMode::Approx, language: None },
    Configuration { name: "bmpm_ash_exact", style: NameStyle::Ashkenazi, mode: MatchMode::Exact, language: None },
    Configuration { name: "bmpm_sep_approx", style: NameStyle::Sephardic, mode: MatchMode::Approx, language: None },
    Configuration { name: "bmpm_sep_exact", style: NameStyle::Sephardic, mode: MatchMode::Exact, language: None },
];

fn env_dir(var: &str) -> PathBuf {
    PathBuf::from(env::var(var).unwrap_or_else(|_| panic!("{} is not set", var)))
}

/// Lines of a corpus file after its header.
fn corpus_lines(path: &Path) -> Vec<String> {
    let text = fs::read_to_string(path).unwrap_or_else(|e| panic!("{}: {}", path.display(), e));
    text.lines().skip(1).map(str::to_string).collect()
}

#[test]
#[ignore = "needs the published rule tables and a recorded corpus"]
fn test_recorded_corpus() {
    let rules_dir = env_dir("BMPM_RULES_DIR");
    let corpus_dir = env_dir("BMPM_CORPUS_DIR");
    let names = corpus_lines(&corpus_dir.join("regtest_names.csv"));

    let mut failures = Vec::new();
    for configuration in &CONFIGURATIONS {
        let rules = Arc::new(
            RuleSet::from_dir(configuration.style, rules_dir.join(configuration.style.name())).unwrap(),
        );
        let mut builder = BeiderMorse::builder()
            .name_style(configuration.style)
            .match_mode(configuration.mode)
            .rules(rules);
        if let Some(language) = configuration.language {
            builder = builder.language(LanguageArg::fixed(language));
        }
        let encoder = builder.build().unwrap();

        let expected = corpus_lines(&corpus_dir.join(format!("{}.csv", configuration.name)));
        assert_eq!(expected.len(), names.len(), "{}: line count", configuration.name);

        for (name, want) in names.iter().zip(&expected) {
            let got = encoder.encode_to_string(name.trim()).unwrap();
            if &got != want {
                failures.push(format!("{} {:?}: got {:?}, want {:?}", configuration.name, name, got, want));
            }
        }
    }

    assert!(
        failures.is_empty(),
        "{} mismatches, first: {:?}",
        failures.len(),
        failures.first()
    );
}
