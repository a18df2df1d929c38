use anyhow::{Result, bail};
use std::path::PathBuf;

use super::config_manager;
use crate::cache::CacheManager;
use crate::cli::GlobalArgs;
use crate::config::TranslatorConfig;
use crate::dictionary::{Dictionary, Direction};
use crate::input::InputSource;
use crate::translation::{CachedTranslator, RemoteTranslator, Translator};
use crate::ui::Spinner;

pub struct TranslateOptions {
    pub text: Option<String>,
    pub file: Option<PathBuf>,
    pub id_file_path: Option<PathBuf>,
    pub offline: bool,
    pub no_cache: bool,
}

pub async fn run_translate(options: TranslateOptions, global: &GlobalArgs) -> Result<()> {
    let config_file = config_manager(global)?.load_or_default()?;

    let id_file_path = options
        .id_file_path
        .or_else(|| config_file.parley.id_file_path.clone());
    let dictionary = Dictionary::load(id_file_path.as_deref())?;

    let source_text =
        InputSource::pick(options.text.as_deref(), options.file.as_deref()).read()?;
    if source_text.trim().is_empty() {
        bail!("Input is empty");
    }

    let direction = Direction::for_source_language(&config_file.translator.from);
    let substituted = dictionary.substitute(&source_text, direction);

    if options.offline {
        println!("{substituted}");
        return Ok(());
    }

    let translator = build_translator(&config_file.translator, options.no_cache)?;

    let translated = Spinner::wait("Translating...", translator.translate(&substituted)).await?;

    println!("{translated}");
    Ok(())
}

/// Remote translator with the on-disk cache unless `no_cache` is set.
pub fn build_translator(
    config: &TranslatorConfig,
    no_cache: bool,
) -> Result<CachedTranslator<RemoteTranslator>> {
    let remote = RemoteTranslator::new(config)?;
    if no_cache {
        return Ok(CachedTranslator::uncached(remote));
    }
    Ok(CachedTranslator::new(remote, Some(CacheManager::new()?)))
}
