#![allow(clippy::unwrap_used)]
//! Config priority contract tests.
//!
//! These tests verify that CLI options take priority over config file settings.
//! Priority order (highest to lowest):
//! 1. CLI arguments
//! 2. Config file defaults
//! 3. Built-in defaults

use std::collections::HashMap;
use std::path::PathBuf;

use parley_cli::config::{
    BotSettings, ConfigError, ConfigFile, DEFAULT_GREETING, ParleyConfig, ProviderConfig,
    ResolveOptions, resolve_config,
};

fn provider(endpoint: &str, model: &str) -> ProviderConfig {
    ProviderConfig {
        endpoint: endpoint.to_string(),
        api_key: Some("test_key".to_string()),
        api_key_env: None,
        models: vec![model.to_string()],
    }
}

fn make_config_with_defaults() -> ConfigFile {
    let mut providers = HashMap::new();
    providers.insert(
        "test_provider".to_string(),
        provider("http://test.local", "config_model"),
    );
    providers.insert(
        "other_provider".to_string(),
        provider("http://other.local", "other_model"),
    );

    ConfigFile {
        parley: ParleyConfig {
            provider: Some("test_provider".to_string()),
            model: Some("config_model".to_string()),
            greeting: Some("Hi from config".to_string()),
            candidates_file: Some(PathBuf::from("config_cands.txt")),
            id_file_path: Some(PathBuf::from("config_dict.json")),
            ..ParleyConfig::default()
        },
        providers,
        ..ConfigFile::default()
    }
}

fn chat_parts(bot: &BotSettings) -> (&str, &str, &str) {
    match bot {
        BotSettings::Chat {
            provider_name,
            endpoint,
            model,
            ..
        } => (provider_name, endpoint, model),
        BotSettings::Echo => panic!("expected a chat bot"),
    }
}

#[test]
fn test_config_defaults_used_when_cli_not_specified() {
    let config = make_config_with_defaults();

    let resolved = resolve_config(&ResolveOptions::default(), &config).unwrap();

    assert_eq!(
        chat_parts(&resolved.bot),
        ("test_provider", "http://test.local", "config_model")
    );
    assert_eq!(resolved.greeting, "Hi from config");
    assert_eq!(resolved.candidates_file, Some(PathBuf::from("config_cands.txt")));
    assert!(!resolved.translate);
    assert!(!resolved.single_turn);
}

#[test]
fn test_built_in_defaults_without_config() {
    let options = ResolveOptions {
        provider: Some("echo".to_string()),
        ..ResolveOptions::default()
    };

    let resolved = resolve_config(&options, &ConfigFile::default()).unwrap();

    assert_eq!(resolved.bot, BotSettings::Echo);
    assert_eq!(resolved.greeting, DEFAULT_GREETING);
    assert!(resolved.candidates_file.is_none());
    assert!(resolved.id_file_path.is_none());
    assert_eq!(resolved.translator.from, "zh-cn");
    assert_eq!(resolved.translator.to, "en");
}

#[test]
fn test_cli_model_overrides_config_model() {
    let config = make_config_with_defaults();
    let options = ResolveOptions {
        model: Some("cli_model".to_string()),
        ..ResolveOptions::default()
    };

    let resolved = resolve_config(&options, &config).unwrap();

    assert_eq!(chat_parts(&resolved.bot).2, "cli_model");
}

#[test]
fn test_cli_provider_overrides_config_provider() {
    let config = make_config_with_defaults();
    let options = ResolveOptions {
        provider: Some("other_provider".to_string()),
        ..ResolveOptions::default()
    };

    let resolved = resolve_config(&options, &config).unwrap();

    let (name, endpoint, _) = chat_parts(&resolved.bot);
    assert_eq!(name, "other_provider");
    assert_eq!(endpoint, "http://other.local");
}

#[test]
fn test_cli_echo_overrides_config_provider() {
    let config = make_config_with_defaults();
    let options = ResolveOptions {
        provider: Some("echo".to_string()),
        ..ResolveOptions::default()
    };

    let resolved = resolve_config(&options, &config).unwrap();

    assert_eq!(resolved.bot, BotSettings::Echo);
}

#[test]
fn test_cli_paths_override_config_paths() {
    let config = make_config_with_defaults();
    let options = ResolveOptions {
        candidates_file: Some(PathBuf::from("cli_cands.txt")),
        id_file_path: Some(PathBuf::from("cli_dict.json")),
        translate: true,
        single_turn: true,
        ..ResolveOptions::default()
    };

    let resolved = resolve_config(&options, &config).unwrap();

    assert_eq!(resolved.candidates_file, Some(PathBuf::from("cli_cands.txt")));
    assert_eq!(resolved.id_file_path, Some(PathBuf::from("cli_dict.json")));
    assert!(resolved.translate);
    assert!(resolved.single_turn);
}

#[test]
fn test_translate_uses_config_dictionary() {
    let config = make_config_with_defaults();
    let options = ResolveOptions {
        translate: true,
        ..ResolveOptions::default()
    };

    let resolved = resolve_config(&options, &config).unwrap();

    assert_eq!(resolved.id_file_path, Some(PathBuf::from("config_dict.json")));
}

#[test]
fn test_translate_without_dictionary_is_config_error() {
    let options = ResolveOptions {
        provider: Some("echo".to_string()),
        translate: true,
        ..ResolveOptions::default()
    };

    let err = resolve_config(&options, &ConfigFile::default()).unwrap_err();

    assert!(err.downcast_ref::<ConfigError>().is_some());
    assert!(err.to_string().contains("--id-file-path"));
}

#[test]
fn test_unknown_provider_returns_error() {
    let config = make_config_with_defaults();
    let options = ResolveOptions {
        provider: Some("nonexistent".to_string()),
        ..ResolveOptions::default()
    };

    let err = resolve_config(&options, &config).unwrap_err();
    assert!(err.to_string().contains("not found"));
}
