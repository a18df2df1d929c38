use anyhow::Result;

use super::{TranslationRoute, Translator};
use crate::cache::CacheManager;

/// Wraps a translator with the SQLite translation cache.
///
/// With no cache attached every call goes straight to the inner translator.
pub struct CachedTranslator<T> {
    inner: T,
    cache: Option<CacheManager>,
}

impl<T: Translator> CachedTranslator<T> {
    pub const fn new(inner: T, cache: Option<CacheManager>) -> Self {
        Self { inner, cache }
    }

    pub const fn uncached(inner: T) -> Self {
        Self::new(inner, None)
    }
}

impl<T: Translator> Translator for CachedTranslator<T> {
    fn route(&self) -> &TranslationRoute {
        self.inner.route()
    }

    async fn translate(&self, text: &str) -> Result<String> {
        let Some(cache) = &self.cache else {
            return self.inner.translate(text).await;
        };

        if let Some(cached) = cache.get(self.route(), text)? {
            crate::debug!("translation cache hit");
            return Ok(cached);
        }

        let translated = self.inner.translate(text).await?;
        if !translated.is_empty() {
            cache.put(self.route(), text, &translated)?;
        }
        Ok(translated)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use std::cell::Cell;
    use tempfile::TempDir;

    struct CountingTranslator {
        route: TranslationRoute,
        calls: Cell<usize>,
    }

    impl CountingTranslator {
        fn new() -> Self {
            Self {
                route: TranslationRoute {
                    endpoint: "https://t.local".to_string(),
                    from_lang: "zh-cn".to_string(),
                    to_lang: "en".to_string(),
                    model: "0".to_string(),
                },
                calls: Cell::new(0),
            }
        }
    }

    impl Translator for CountingTranslator {
        fn route(&self) -> &TranslationRoute {
            &self.route
        }

        async fn translate(&self, text: &str) -> Result<String> {
            self.calls.set(self.calls.get() + 1);
            Ok(format!("en({text})"))
        }
    }

    #[tokio::test]
    async fn test_second_lookup_hits_cache() {
        let temp_dir = TempDir::new().unwrap();
        let cache = CacheManager::open(temp_dir.path().join("translations.db")).unwrap();
        let translator = CachedTranslator::new(CountingTranslator::new(), Some(cache));

        assert_eq!(translator.translate("你好").await.unwrap(), "en(你好)");
        assert_eq!(translator.translate("你好").await.unwrap(), "en(你好)");
        assert_eq!(translator.inner.calls.get(), 1);
    }

    #[tokio::test]
    async fn test_uncached_always_calls_inner() {
        let translator = CachedTranslator::uncached(CountingTranslator::new());

        translator.translate("你好").await.unwrap();
        translator.translate("你好").await.unwrap();
        assert_eq!(translator.inner.calls.get(), 2);
    }
}
