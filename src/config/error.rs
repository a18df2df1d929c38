use std::fmt;

/// A configuration problem the operator must fix before the chat can start.
///
/// Kept as a distinct type so the binary can exit with `exitcode::CONFIG`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigError {
    message: String,
}

impl ConfigError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    /// A required setting that neither the CLI nor the config file provided.
    pub fn missing(key: &str, cli_hint: &str) -> Self {
        Self::new(format!(
            "Missing required configuration: '{key}'\n\n\
             Please provide it via:\n  \
             - CLI option: parley {cli_hint}\n  \
             - Config file: ~/.config/parley/config.toml"
        ))
    }
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

impl std::error::Error for ConfigError {}
