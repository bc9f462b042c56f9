use essay_metrics::config::{CliArgs, ServerConfig};
use std::fs;
use std::path::PathBuf;

#[test]
fn defaults_apply_when_nothing_is_provided() {
    let config = ServerConfig::from_args(CliArgs::default()).expect("config");
    assert_eq!(config.data_file, PathBuf::from("data/essays.jsonl"));
    assert_eq!(config.http_bind_address.port(), 8087);
    assert_eq!(config.history_limit, 50);
    assert_eq!(config.history_preview_chars, 800);
}

#[test]
fn yaml_config_file_overrides_defaults() {
    let dir = tempfile::tempdir().expect("tempdir");
    let config_path = dir.path().join("service.yaml");
    fs::write(
        &config_path,
        "data_file: /tmp/essays-test.jsonl\nhistory_limit: 10\n",
    )
    .expect("write config");

    let args = CliArgs {
        config: Some(config_path),
        ..CliArgs::default()
    };
    let config = ServerConfig::from_args(args).expect("config");
    assert_eq!(config.data_file, PathBuf::from("/tmp/essays-test.jsonl"));
    assert_eq!(config.history_limit, 10);
    // Untouched settings keep their defaults.
    assert_eq!(config.history_preview_chars, 800);
}

#[test]
fn cli_flags_win_over_config_file() {
    let dir = tempfile::tempdir().expect("tempdir");
    let config_path = dir.path().join("service.json");
    fs::write(&config_path, r#"{"history_limit": 10}"#).expect("write config");

    let args = CliArgs {
        config: Some(config_path),
        history_limit: Some(25),
        ..CliArgs::default()
    };
    let config = ServerConfig::from_args(args).expect("config");
    assert_eq!(config.history_limit, 25);
}

#[test]
fn unknown_config_extension_is_rejected() {
    let dir = tempfile::tempdir().expect("tempdir");
    let config_path = dir.path().join("service.toml");
    fs::write(&config_path, "history_limit = 10").expect("write config");

    let args = CliArgs {
        config: Some(config_path),
        ..CliArgs::default()
    };
    assert!(ServerConfig::from_args(args).is_err());
}

#[test]
fn history_limit_floors_at_one() {
    let args = CliArgs {
        history_limit: Some(0),
        ..CliArgs::default()
    };
    let config = ServerConfig::from_args(args).expect("config");
    assert_eq!(config.history_limit, 1);
}

#[test]
fn validate_creates_missing_data_directory() {
    let dir = tempfile::tempdir().expect("tempdir");
    let args = CliArgs {
        data_file: Some(dir.path().join("nested/deep/essays.jsonl")),
        ..CliArgs::default()
    };
    let config = ServerConfig::from_args(args).expect("config");
    config.validate().expect("validate");
    assert!(dir.path().join("nested/deep").is_dir());
}
