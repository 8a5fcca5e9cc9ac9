//! Configuration and lexicon loading tests
//!
//! Tests that touch RR_LEXICON are marked #[serial] so they do not race on
//! the process environment.

use rr_common::config::{
    load_lexicon, load_toml_config, load_toml_config_or_default, resolve_lexicon_path,
    write_toml_config, LoggingConfig, TomlConfig, LEXICON_ENV_VAR,
};
use rr_common::{Error, GameScorer, Lexicon};
use serial_test::serial;
use std::env;
use std::path::PathBuf;
use tempfile::TempDir;

const CUSTOM_LEXICON: &str = r#"
[rhyme]
positive_cues = ["shine"]
negative_cues = []
buckets = [
    { ending = "ine", words = ["shine", "line", "mine"] },
]

[tone]
categories = [
    { name = "bright", words = ["shine", "glow"] },
]
fallbacks = []
compatible = []
"#;

#[test]
fn test_write_then_load_config() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("nested").join("config.toml");

    let config = TomlConfig {
        lexicon_path: Some(PathBuf::from("/srv/lexicon.toml")),
        logging: LoggingConfig {
            level: "debug".to_string(),
        },
    };
    write_toml_config(&config, &path).unwrap();

    assert!(path.exists());
    assert!(!path.with_extension("toml.tmp").exists());
    assert_eq!(load_toml_config(&path).unwrap(), config);
}

#[test]
fn test_missing_config_uses_defaults() {
    let temp_dir = TempDir::new().unwrap();
    let config = load_toml_config_or_default(Some(&temp_dir.path().join("absent.toml")));
    assert_eq!(config, TomlConfig::default());
}

#[test]
fn test_invalid_config_uses_defaults() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("config.toml");
    std::fs::write(&path, "logging = [").unwrap();

    assert!(matches!(load_toml_config(&path), Err(Error::Config(_))));
    assert_eq!(load_toml_config_or_default(Some(&path)), TomlConfig::default());
}

#[test]
#[serial]
fn test_env_var_beats_toml() {
    env::set_var(LEXICON_ENV_VAR, "/from/env.toml");
    let config = TomlConfig {
        lexicon_path: Some(PathBuf::from("/from/toml.toml")),
        logging: LoggingConfig::default(),
    };

    assert_eq!(resolve_lexicon_path(None, &config), Some(PathBuf::from("/from/env.toml")));

    env::remove_var(LEXICON_ENV_VAR);
    assert_eq!(resolve_lexicon_path(None, &config), Some(PathBuf::from("/from/toml.toml")));
}

#[test]
#[serial]
fn test_no_source_loads_default_lexicon() {
    env::remove_var(LEXICON_ENV_VAR);
    let lexicon = load_lexicon(None, &TomlConfig::default()).unwrap();
    assert_eq!(lexicon, Lexicon::default());
}

#[test]
#[serial]
fn test_custom_lexicon_drives_scoring() {
    env::remove_var(LEXICON_ENV_VAR);
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("lexicon.toml");
    std::fs::write(&path, CUSTOM_LEXICON).unwrap();

    let lexicon = load_lexicon(Some(&path), &TomlConfig::default()).unwrap();
    assert_eq!(lexicon.rhyme.buckets.len(), 1);

    let scorer = GameScorer::new(lexicon);
    // same bucket (0.9); "mine" is not a cue word, so contextual fit stays neutral (0.5)
    let rhyme = scorer.rhyme_scorer().score("mine", "let it shine");
    assert!((rhyme - (0.7 * 0.9 + 0.3 * 0.5)).abs() < 1e-9);
    assert_eq!(scorer.tone_matcher().context_tone("let it shine"), "bright");
    assert_eq!(scorer.tone_matcher().score("glow", "let it shine"), 1.0);
}

#[test]
fn test_shipped_lexicon_matches_compiled_defaults() {
    let (lexicon, warnings) = Lexicon::from_toml_str(include_str!("../data/lexicon.toml")).unwrap();
    assert_eq!(lexicon, Lexicon::default());
    assert_eq!(warnings.len(), Lexicon::default().validate().unwrap().len());
}

#[test]
fn test_missing_lexicon_file_is_error() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("missing.toml");
    let result = load_lexicon(Some(&path), &TomlConfig::default());
    assert!(matches!(result, Err(Error::Config(_))));
}
