//! Subcommand implementations.

use anyhow::Result;

use crate::cli::GlobalArgs;
use crate::config::ConfigManager;

/// Chat session command handler.
pub mod chat;

/// Effective configuration display and `--init`.
pub mod config;

/// Provider listing command handler.
pub mod providers;

/// One-shot translation command handler.
pub mod translate;

/// Config manager for `--config`, or the default location.
fn config_manager(global: &GlobalArgs) -> Result<ConfigManager> {
    global
        .config
        .as_ref()
        .map_or_else(ConfigManager::new, |path| Ok(ConfigManager::with_path(path)))
}
