//! Provider listing command handler.

use anyhow::{Result, bail};

use super::config_manager;
use crate::cli::GlobalArgs;
use crate::config::ECHO_PROVIDER;
use crate::ui::Style;

/// Prints configured bot providers to stdout.
///
/// With `specific_provider`, shows details for that provider only.
pub fn print_providers(specific_provider: Option<&str>, global: &GlobalArgs) -> Result<()> {
    let config = config_manager(global)?.load_or_default()?;
    let default_provider = config.parley.provider.as_deref();
    let marker = |name: &str| {
        if default_provider == Some(name) {
            format!(" {}", Style::default_marker())
        } else {
            String::new()
        }
    };

    if let Some(provider_name) = specific_provider {
        if provider_name == ECHO_PROVIDER {
            println!("Provider: {}{}", Style::value(ECHO_PROVIDER), marker(ECHO_PROVIDER));
            println!("  built-in, repeats what you type");
            return Ok(());
        }

        let Some(provider) = config.providers.get(provider_name) else {
            bail!("Provider '{provider_name}' not found");
        };

        println!("Provider: {}{}", Style::value(provider_name), marker(provider_name));
        println!("  endpoint = {}", provider.endpoint);
        if provider.requires_api_key() {
            let has_key = provider.get_api_key().is_some();
            println!(
                "  api_key  = {}",
                if has_key { "(set)" } else { "(not set)" }
            );
        }
        if provider.models.is_empty() {
            println!("  models   = (none configured)");
        } else {
            println!("  models:");
            for model in &provider.models {
                println!("    - {model}");
            }
        }
        return Ok(());
    }

    println!("{}\n", Style::header("Bot providers"));
    println!(
        "  {}{}",
        Style::value(ECHO_PROVIDER),
        marker(ECHO_PROVIDER)
    );
    println!("    {}", Style::secondary("built-in"));

    let mut names: Vec<_> = config.providers.keys().collect();
    names.sort();
    for name in names {
        let provider = &config.providers[name];
        println!("  {}{}", Style::value(name), marker(name));
        println!("    endpoint: {}", Style::secondary(&provider.endpoint));
        if !provider.models.is_empty() {
            println!("    models: {}", provider.models.join(", "));
        }
    }

    if config.providers.is_empty() {
        println!("\nAdd chat providers to ~/.config/parley/config.toml");
    }

    Ok(())
}
