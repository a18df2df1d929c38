use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use super::error::ConfigError;
use crate::paths;
use crate::ui::Style;

/// Built-in bot provider that needs no endpoint.
pub const ECHO_PROVIDER: &str = "echo";

pub const DEFAULT_GREETING: &str =
    "Hello! This is Doctor bot to help you with your depression problem. Can you describe your situation?";

pub const DEFAULT_SYSTEM_PROMPT: &str = "You are Doctor bot, a patient and supportive assistant. \
     Listen carefully, answer briefly and kindly, and ask one follow-up question at a time.";

/// Default settings in the `[parley]` section of config.toml.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ParleyConfig {
    /// Default bot provider name (`echo` or a key of `[providers]`).
    pub provider: Option<String>,
    /// Default model name for chat providers.
    pub model: Option<String>,
    /// Message the human sees before the first turn.
    pub greeting: Option<String>,
    /// System prompt sent to chat providers.
    pub system_prompt: Option<String>,
    /// End every episode after a single human turn.
    pub single_turn: Option<bool>,
    /// Translate typed input and render replies through the personal dictionary.
    pub translate: Option<bool>,
    /// File of label candidates attached to every human reply.
    pub candidates_file: Option<PathBuf>,
    /// JSON phrase dictionary used for offline substitution.
    pub id_file_path: Option<PathBuf>,
}

/// Settings for the remote translation API.
///
/// Every field has a default so a bare `[translator]` section (or none at
/// all) talks to the stock endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TranslatorConfig {
    /// Endpoint that exchanges credentials for an access token.
    pub auth_endpoint: String,
    /// Endpoint that translates text with a token.
    pub translate_endpoint: String,
    pub username: String,
    /// Password stored directly in config.
    pub password: Option<String>,
    /// Environment variable name containing the password.
    pub password_env: Option<String>,
    /// Source language code of typed input.
    pub from: String,
    /// Target language code sent to the bot.
    pub to: String,
    /// Translation model selector understood by the API.
    pub model: String,
    /// Skip TLS certificate verification.
    pub accept_invalid_certs: bool,
}

impl Default for TranslatorConfig {
    fn default() -> Self {
        Self {
            auth_endpoint: "https://api.alefcloud.cn/api/auth/jwt/apiToken".to_string(),
            translate_endpoint: "https://api.alefcloud.cn/api/translate/getTranslateResultPost"
                .to_string(),
            username: "admin".to_string(),
            password: Some("admin".to_string()),
            password_env: None,
            from: "zh-cn".to_string(),
            to: "en".to_string(),
            model: "0".to_string(),
            accept_invalid_certs: true,
        }
    }
}

impl TranslatorConfig {
    /// Gets the password, preferring environment variable over config file.
    pub fn get_password(&self) -> Option<String> {
        if let Some(env_var) = &self.password_env
            && let Ok(password) = std::env::var(env_var)
            && !password.is_empty()
        {
            return Some(password);
        }
        self.password.clone()
    }
}

/// Configuration for a chat-completions bot provider.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProviderConfig {
    /// The OpenAI-compatible API endpoint URL.
    pub endpoint: String,
    /// API key stored directly in config (not recommended).
    #[serde(default)]
    pub api_key: Option<String>,
    /// Environment variable name containing the API key.
    #[serde(default)]
    pub api_key_env: Option<String>,
    /// List of available models for this provider.
    #[serde(default)]
    pub models: Vec<String>,
}

impl ProviderConfig {
    /// Gets the API key, preferring environment variable over config file.
    pub fn get_api_key(&self) -> Option<String> {
        if let Some(env_var) = &self.api_key_env
            && let Ok(key) = std::env::var(env_var)
            && !key.is_empty()
        {
            return Some(key);
        }
        self.api_key.clone()
    }

    /// Returns `true` if this provider requires an API key.
    pub const fn requires_api_key(&self) -> bool {
        self.api_key.is_some() || self.api_key_env.is_some()
    }
}

/// The complete configuration file structure.
///
/// Corresponds to `~/.config/parley/config.toml`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ConfigFile {
    #[serde(default)]
    pub parley: ParleyConfig,
    #[serde(default)]
    pub translator: TranslatorConfig,
    /// Chat provider configurations keyed by name.
    #[serde(default)]
    pub providers: HashMap<String, ProviderConfig>,
}

/// Which bot answers the human.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BotSettings {
    /// Offline bot that repeats the human's text.
    Echo,
    /// Chat-completions endpoint.
    Chat {
        provider_name: String,
        endpoint: String,
        model: String,
        api_key: Option<String>,
        system_prompt: String,
    },
}

/// Resolved configuration after merging CLI arguments and config file.
#[derive(Debug, Clone)]
pub struct ResolvedConfig {
    pub bot: BotSettings,
    pub greeting: String,
    pub single_turn: bool,
    pub translate: bool,
    pub candidates_file: Option<PathBuf>,
    pub id_file_path: Option<PathBuf>,
    pub translator: TranslatorConfig,
}

/// Options for resolving configuration.
///
/// Contains CLI overrides that take precedence over config file values.
/// Boolean flags can only switch a setting on.
#[derive(Debug, Clone, Default)]
pub struct ResolveOptions {
    pub provider: Option<String>,
    pub model: Option<String>,
    pub candidates_file: Option<PathBuf>,
    pub id_file_path: Option<PathBuf>,
    pub single_turn: bool,
    pub translate: bool,
}

/// Resolves configuration by merging CLI options with config file settings.
///
/// # Errors
///
/// Returns a [`ConfigError`] if the bot provider or model is missing, the
/// provider is unknown or lacks its API key, or translation is enabled
/// without a dictionary file.
pub fn resolve_config(
    options: &ResolveOptions,
    config_file: &ConfigFile,
) -> Result<ResolvedConfig> {
    let defaults = &config_file.parley;

    let bot = resolve_bot(options, config_file)?;

    let translate = options.translate || defaults.translate.unwrap_or(false);
    let id_file_path = options
        .id_file_path
        .clone()
        .or_else(|| defaults.id_file_path.clone());

    if translate && id_file_path.is_none() {
        return Err(ConfigError::new(
            "Have to set --id-file-path\n\n\
             Translation substitutes phrases from a personal dictionary first.\n\
             Provide it via --id-file-path <file> or id_file_path in config.toml",
        )
        .into());
    }

    Ok(ResolvedConfig {
        bot,
        greeting: defaults
            .greeting
            .clone()
            .unwrap_or_else(|| DEFAULT_GREETING.to_string()),
        single_turn: options.single_turn || defaults.single_turn.unwrap_or(false),
        translate,
        candidates_file: options
            .candidates_file
            .clone()
            .or_else(|| defaults.candidates_file.clone()),
        id_file_path,
        translator: config_file.translator.clone(),
    })
}

fn resolve_bot(options: &ResolveOptions, config_file: &ConfigFile) -> Result<BotSettings> {
    let defaults = &config_file.parley;

    let provider_name = options
        .provider
        .as_ref()
        .or(defaults.provider.as_ref())
        .cloned()
        .ok_or_else(|| ConfigError::missing("provider", "--provider <name|echo>"))?;

    if provider_name == ECHO_PROVIDER {
        return Ok(BotSettings::Echo);
    }

    let provider_config = config_file.providers.get(&provider_name).ok_or_else(|| {
        let mut available: Vec<_> = config_file.providers.keys().map(String::as_str).collect();
        available.sort_unstable();
        available.push(ECHO_PROVIDER);
        ConfigError::new(format!(
            "Provider '{provider_name}' not found\n\n\
             Available providers:\n  \
             - {}\n\n\
             Add providers to ~/.config/parley/config.toml",
            available.join("\n  - ")
        ))
    })?;

    let model = options
        .model
        .as_ref()
        .or(defaults.model.as_ref())
        .cloned()
        .ok_or_else(|| ConfigError::missing("model", "--model <name>"))?;

    if !provider_config.models.is_empty() && !provider_config.models.contains(&model) {
        crate::warn!(
            "Model '{}' is not in the configured models list for '{}'\n\
             Configured models: {}\n\
             Proceeding anyway...\n",
            model,
            provider_name,
            provider_config.models.join(", ")
        );
    }

    let api_key = provider_config.get_api_key();

    if provider_config.requires_api_key() && api_key.is_none() {
        let env_var = provider_config.api_key_env.as_deref().unwrap_or("API_KEY");
        return Err(ConfigError::new(format!(
            "Provider '{provider_name}' requires an API key\n\n\
             Set the {env_var} environment variable:\n  \
             export {env_var}=\"your-api-key\"\n\n\
             Or set api_key in ~/.config/parley/config.toml"
        ))
        .into());
    }

    Ok(BotSettings::Chat {
        provider_name,
        endpoint: provider_config.endpoint.clone(),
        model,
        api_key,
        system_prompt: defaults
            .system_prompt
            .clone()
            .unwrap_or_else(|| DEFAULT_SYSTEM_PROMPT.to_string()),
    })
}

/// Commented starting point written by `parley config --init`.
pub const CONFIG_TEMPLATE: &str = r#"[parley]
# Bot that answers you: "echo" or a name from [providers]
provider = "echo"
# model = "llama3.2"
# greeting = "Hello! How can I help you today?"
# single_turn = false
# translate = false
# candidates_file = "/path/to/candidates.txt"
# id_file_path = "/path/to/dictionary.json"

[translator]
# auth_endpoint = "https://api.alefcloud.cn/api/auth/jwt/apiToken"
# translate_endpoint = "https://api.alefcloud.cn/api/translate/getTranslateResultPost"
# username = "admin"
# password_env = "PARLEY_TRANSLATOR_PASSWORD"
# from = "zh-cn"
# to = "en"

# [providers.ollama]
# endpoint = "http://localhost:11434"
# models = ["llama3.2"]
"#;

/// Manages loading configuration files.
pub struct ConfigManager {
    config_path: PathBuf,
}

impl ConfigManager {
    /// Creates a new config manager.
    ///
    /// Configuration is stored at `$XDG_CONFIG_HOME/parley/config.toml`
    /// or `~/.config/parley/config.toml` if `XDG_CONFIG_HOME` is not set.
    pub fn new() -> Result<Self> {
        Ok(Self {
            config_path: paths::config_dir()?.join("config.toml"),
        })
    }

    /// Creates a manager for an explicit config file (`--config`).
    pub fn with_path(config_path: impl Into<PathBuf>) -> Self {
        Self {
            config_path: config_path.into(),
        }
    }

    pub fn config_path(&self) -> &Path {
        &self.config_path
    }

    pub fn exists(&self) -> bool {
        self.config_path.exists()
    }

    pub fn load(&self) -> Result<ConfigFile> {
        let contents = fs::read_to_string(&self.config_path).with_context(|| {
            format!("Failed to read config file: {}", self.config_path.display())
        })?;

        let config_file: ConfigFile = toml::from_str(&contents).with_context(|| {
            format!("Failed to parse config file: {}", self.config_path.display())
        })?;

        Ok(config_file)
    }

    /// Loads the config file, treating a missing file as defaults.
    ///
    /// A file that exists but does not parse is still an error.
    pub fn load_or_default(&self) -> Result<ConfigFile> {
        if self.exists() {
            self.load()
        } else {
            Ok(ConfigFile::default())
        }
    }

    /// Writes [`CONFIG_TEMPLATE`] unless a config file already exists.
    pub fn init(&self) -> Result<bool> {
        if self.exists() {
            return Ok(false);
        }
        crate::fs::atomic_write(&self.config_path, CONFIG_TEMPLATE)?;
        Ok(true)
    }
}

/// Renders the effective configuration as TOML with secrets masked.
pub fn render_effective(config: &ConfigFile) -> Result<String> {
    const MASK: &str = "(set)";

    let mut masked = config.clone();
    if masked.translator.password.is_some() {
        masked.translator.password = Some(MASK.to_string());
    }
    for provider in masked.providers.values_mut() {
        if provider.api_key.is_some() {
            provider.api_key = Some(MASK.to_string());
        }
    }

    toml::to_string_pretty(&masked).context("Failed to serialize config")
}

/// Prints a one-line summary of the resolved bot.
pub fn describe_bot(bot: &BotSettings) -> String {
    match bot {
        BotSettings::Echo => format!("{} {}", Style::label("bot"), Style::value(ECHO_PROVIDER)),
        BotSettings::Chat {
            provider_name,
            model,
            ..
        } => format!(
            "{} {} {}",
            Style::label("bot"),
            Style::value(provider_name),
            Style::secondary(model)
        ),
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use serial_test::serial;
    use tempfile::TempDir;

    fn create_test_config() -> ConfigFile {
        let mut providers = HashMap::new();
        providers.insert(
            "ollama".to_string(),
            ProviderConfig {
                endpoint: "http://localhost:11434".to_string(),
                api_key: None,
                api_key_env: None,
                models: vec!["llama3.2".to_string()],
            },
        );
        providers.insert(
            "openrouter".to_string(),
            ProviderConfig {
                endpoint: "https://openrouter.ai/api".to_string(),
                api_key: None,
                api_key_env: Some("PARLEY_TEST_NONEXISTENT_API_KEY".to_string()),
                models: vec!["gpt-4o".to_string()],
            },
        );

        ConfigFile {
            parley: ParleyConfig {
                provider: Some("ollama".to_string()),
                model: Some("llama3.2".to_string()),
                ..ParleyConfig::default()
            },
            translator: TranslatorConfig::default(),
            providers,
        }
    }

    #[test]
    fn test_template_parses() {
        let config: ConfigFile = toml::from_str(CONFIG_TEMPLATE).unwrap();
        assert_eq!(config.parley.provider.as_deref(), Some(ECHO_PROVIDER));
        assert_eq!(config.translator.from, "zh-cn");
        assert!(config.providers.is_empty());
    }

    #[test]
    fn test_partial_translator_section_keeps_defaults() {
        let config: ConfigFile = toml::from_str(
            r#"
            [translator]
            to = "ja"
            "#,
        )
        .unwrap();
        assert_eq!(config.translator.to, "ja");
        assert_eq!(config.translator.from, "zh-cn");
        assert!(config.translator.accept_invalid_certs);
        assert_eq!(config.translator.username, "admin");
    }

    #[test]
    fn test_init_writes_template_once() {
        let temp_dir = TempDir::new().unwrap();
        let manager = ConfigManager::with_path(temp_dir.path().join("parley").join("config.toml"));

        assert!(manager.init().unwrap());
        assert!(!manager.init().unwrap());
        assert_eq!(
            manager.load().unwrap().parley.provider.as_deref(),
            Some(ECHO_PROVIDER)
        );
    }

    #[test]
    fn test_load_or_default_missing_file() {
        let temp_dir = TempDir::new().unwrap();
        let manager = ConfigManager::with_path(temp_dir.path().join("config.toml"));

        assert!(manager.load().is_err());
        assert!(manager.load_or_default().unwrap().providers.is_empty());
    }

    #[test]
    fn test_load_or_default_rejects_broken_file() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("config.toml");
        fs::write(&path, "[parley\nprovider=").unwrap();

        let manager = ConfigManager::with_path(path);
        assert!(manager.load_or_default().is_err());
    }

    #[test]
    #[serial]
    fn test_translator_password_from_env() {
        // SAFETY: serialized test touching a test-specific env var
        unsafe {
            std::env::set_var("PARLEY_TEST_PASSWORD", "from-env");
        }

        let translator = TranslatorConfig {
            password_env: Some("PARLEY_TEST_PASSWORD".to_string()),
            ..TranslatorConfig::default()
        };
        assert_eq!(translator.get_password(), Some("from-env".to_string()));

        unsafe {
            std::env::remove_var("PARLEY_TEST_PASSWORD");
        }
        assert_eq!(translator.get_password(), Some("admin".to_string()));
    }

    #[test]
    fn test_resolve_echo_needs_no_model() {
        let options = ResolveOptions {
            provider: Some(ECHO_PROVIDER.to_string()),
            ..ResolveOptions::default()
        };

        let resolved = resolve_config(&options, &ConfigFile::default()).unwrap();

        assert_eq!(resolved.bot, BotSettings::Echo);
        assert_eq!(resolved.greeting, DEFAULT_GREETING);
        assert!(!resolved.single_turn);
        assert!(!resolved.translate);
    }

    #[test]
    fn test_resolve_chat_provider_from_file() {
        let resolved = resolve_config(&ResolveOptions::default(), &create_test_config()).unwrap();

        let BotSettings::Chat {
            provider_name,
            endpoint,
            model,
            api_key,
            system_prompt,
        } = resolved.bot
        else {
            panic!("expected a chat bot");
        };
        assert_eq!(provider_name, "ollama");
        assert_eq!(endpoint, "http://localhost:11434");
        assert_eq!(model, "llama3.2");
        assert!(api_key.is_none());
        assert_eq!(system_prompt, DEFAULT_SYSTEM_PROMPT);
    }

    #[test]
    fn test_resolve_missing_provider_is_config_error() {
        let err = resolve_config(&ResolveOptions::default(), &ConfigFile::default()).unwrap_err();

        assert!(err.downcast_ref::<ConfigError>().is_some());
        assert!(err.to_string().contains("provider"));
    }

    #[test]
    fn test_resolve_unknown_provider_lists_available() {
        let options = ResolveOptions {
            provider: Some("nonexistent".to_string()),
            ..ResolveOptions::default()
        };

        let err = resolve_config(&options, &create_test_config()).unwrap_err();
        let text = err.to_string();

        assert!(text.contains("not found"));
        assert!(text.contains("ollama"));
        assert!(text.contains(ECHO_PROVIDER));
    }

    #[test]
    fn test_resolve_missing_model() {
        let mut config = create_test_config();
        config.parley.model = None;

        let err = resolve_config(&ResolveOptions::default(), &config).unwrap_err();
        assert!(err.to_string().contains("model"));
    }

    #[test]
    fn test_resolve_api_key_required_but_missing() {
        let options = ResolveOptions {
            provider: Some("openrouter".to_string()),
            model: Some("gpt-4o".to_string()),
            ..ResolveOptions::default()
        };

        let err = resolve_config(&options, &create_test_config()).unwrap_err();
        assert!(err.to_string().contains("API key"));
    }

    #[test]
    fn test_resolve_translate_without_dictionary() {
        let options = ResolveOptions {
            translate: true,
            ..ResolveOptions::default()
        };

        let err = resolve_config(&options, &create_test_config()).unwrap_err();

        assert!(err.downcast_ref::<ConfigError>().is_some());
        assert!(err.to_string().contains("--id-file-path"));
    }

    #[test]
    fn test_resolve_flags_enable_but_never_disable() {
        let mut config = create_test_config();
        config.parley.single_turn = Some(true);

        let resolved = resolve_config(&ResolveOptions::default(), &config).unwrap();
        assert!(resolved.single_turn);

        config.parley.single_turn = None;
        let options = ResolveOptions {
            single_turn: true,
            ..ResolveOptions::default()
        };
        let resolved = resolve_config(&options, &config).unwrap();
        assert!(resolved.single_turn);
    }

    #[test]
    fn test_render_effective_masks_secrets() {
        let mut config = create_test_config();
        config
            .providers
            .get_mut("ollama")
            .unwrap()
            .api_key = Some("sk-secret".to_string());

        let rendered = render_effective(&config).unwrap();

        assert!(!rendered.contains("sk-secret"));
        assert!(!rendered.contains("password = \"admin\""));
        assert!(rendered.contains("(set)"));
    }
}
