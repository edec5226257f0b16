//! Tests for CLI parsing and configuration resolution

use std::collections::HashMap;
use std::io::Write;
use std::path::PathBuf;
use std::time::Duration;

use clap::Parser;
use persona_hearing::hearing::config::{API_KEY_VAR, BASE_URL_VAR, MODEL_VAR};
use persona_hearing::hearing::{Args, ConfigError, WorkflowConfig};
use tempfile::NamedTempFile;

fn args(extra: &[&str]) -> Args {
    let mut argv = vec!["persona-hearing"];
    argv.extend_from_slice(extra);
    Args::try_parse_from(argv).unwrap()
}

fn env_with(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
    let vars: HashMap<String, String> = vars
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();
    move |key| vars.get(key).cloned()
}

fn with_key() -> impl Fn(&str) -> Option<String> {
    env_with(&[(API_KEY_VAR, "sk-test")])
}

#[test]
fn test_defaults() {
    let config = WorkflowConfig::resolve(&args(&["--theme", "Remote work"]), with_key()).unwrap();

    assert_eq!(config.theme, "Remote work");
    assert_eq!(config.num_personas, 15);
    assert!(config.verbose);
    assert_eq!(config.output_dir, PathBuf::from("outputs"));
    assert_eq!(config.interview_concurrency, 1);
    assert_eq!(config.model.model, "gpt-4.1");
    assert_eq!(config.model.base_url, "https://api.openai.com/v1");
    assert_eq!(config.model.request_timeout, Duration::from_secs(300));
}

#[test]
fn test_flags_override_defaults() {
    let parsed = args(&[
        "--theme",
        "Remote work",
        "--num-personas",
        "4",
        "--output-dir",
        "out/remote",
        "--quiet",
        "--interview-concurrency",
        "3",
        "--request-timeout",
        "30",
    ]);
    let config = WorkflowConfig::resolve(&parsed, with_key()).unwrap();

    assert_eq!(config.num_personas, 4);
    assert_eq!(config.output_dir, PathBuf::from("out/remote"));
    assert!(!config.verbose);
    assert_eq!(config.interview_concurrency, 3);
    assert_eq!(config.model.request_timeout, Duration::from_secs(30));
}

#[test]
fn test_model_and_base_url_from_environment() {
    let env = env_with(&[
        (API_KEY_VAR, "sk-test"),
        (MODEL_VAR, "gpt-4o"),
        (BASE_URL_VAR, "http://localhost:8080/v1/"),
    ]);

    let config = WorkflowConfig::resolve(&args(&["--theme", "x"]), &env).unwrap();
    assert_eq!(config.model.model, "gpt-4o");
    assert_eq!(config.model.base_url, "http://localhost:8080/v1");

    let overridden =
        WorkflowConfig::resolve(&args(&["--theme", "x", "--model", "gpt-4.1-mini"]), &env).unwrap();
    assert_eq!(overridden.model.model, "gpt-4.1-mini");
}

#[test]
fn test_missing_credential() {
    let err = WorkflowConfig::resolve(&args(&["--theme", "x"]), env_with(&[])).unwrap_err();
    assert!(matches!(err, ConfigError::MissingCredential { var } if var == API_KEY_VAR));

    let blank = env_with(&[(API_KEY_VAR, "  ")]);
    assert!(WorkflowConfig::resolve(&args(&["--theme", "x"]), blank).is_err());
}

#[test]
fn test_theme_from_input_file() {
    let mut file = NamedTempFile::new().unwrap();
    writeln!(file, "\n# Theme\nA marketplace for used lab equipment\n").unwrap();
    let path = file.path().to_str().unwrap().to_string();

    let config = WorkflowConfig::resolve(&args(&["--input", &path]), with_key()).unwrap();
    assert_eq!(config.theme, "# Theme\nA marketplace for used lab equipment");
}

#[test]
fn test_missing_input_file() {
    let err = WorkflowConfig::resolve(
        &args(&["--input", "/nonexistent/persona-hearing/theme.md"]),
        with_key(),
    )
    .unwrap_err();

    assert!(matches!(err, ConfigError::InputNotFound { .. }));
    assert!(err.to_string().contains("theme.md"));
}

#[test]
fn test_empty_theme() {
    let err = WorkflowConfig::resolve(&args(&["--theme", "   "]), with_key()).unwrap_err();
    assert!(matches!(err, ConfigError::EmptyTheme));

    let file = NamedTempFile::new().unwrap();
    let path = file.path().to_str().unwrap().to_string();
    let err = WorkflowConfig::resolve(&args(&["--input", &path]), with_key()).unwrap_err();
    assert!(matches!(err, ConfigError::EmptyTheme));
}

#[test]
fn test_zero_counts_are_rejected() {
    let err = WorkflowConfig::resolve(&args(&["--theme", "x", "--num-personas", "0"]), with_key())
        .unwrap_err();
    assert!(matches!(err, ConfigError::ZeroPersonas));

    let err = WorkflowConfig::resolve(
        &args(&["--theme", "x", "--interview-concurrency", "0"]),
        with_key(),
    )
    .unwrap_err();
    assert!(matches!(err, ConfigError::ZeroConcurrency));
}

#[test]
fn test_theme_source_is_required_and_exclusive() {
    assert!(Args::try_parse_from(["persona-hearing"]).is_err());
    assert!(Args::try_parse_from(["persona-hearing", "--theme", "x", "--input", "theme.md"]).is_err());
}
