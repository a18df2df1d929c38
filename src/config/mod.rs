//! Configuration file management and CLI/config merging.

mod error;
mod manager;

pub use error::ConfigError;
pub use manager::{
    BotSettings, CONFIG_TEMPLATE, ConfigFile, ConfigManager, DEFAULT_GREETING,
    DEFAULT_SYSTEM_PROMPT, ECHO_PROVIDER, ParleyConfig, ProviderConfig, ResolveOptions,
    ResolvedConfig, TranslatorConfig, describe_bot, render_effective, resolve_config,
};
