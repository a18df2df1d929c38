//! Remote translation of operator input.

mod cached;
mod remote;

use anyhow::Result;
use serde::Serialize;

pub use cached::CachedTranslator;
pub use remote::RemoteTranslator;

/// Where and how a translator sends text; part of every cache key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TranslationRoute {
    pub endpoint: String,
    pub from_lang: String,
    pub to_lang: String,
    pub model: String,
}

#[allow(async_fn_in_trait)]
pub trait Translator {
    fn route(&self) -> &TranslationRoute;

    async fn translate(&self, text: &str) -> Result<String>;
}
