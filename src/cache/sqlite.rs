use anyhow::{Context, Result};
use rusqlite::{Connection, OptionalExtension};
use sha2::{Digest, Sha256};
use std::path::PathBuf;

use crate::paths;
use crate::translation::TranslationRoute;

/// Remembers remote translations so repeated phrases skip the network.
pub struct CacheManager {
    db_path: PathBuf,
}

impl CacheManager {
    pub fn new() -> Result<Self> {
        let cache_dir = paths::cache_dir()?;

        std::fs::create_dir_all(&cache_dir).with_context(|| {
            format!("Failed to create cache directory: {}", cache_dir.display())
        })?;

        Self::open(cache_dir.join("translations.db"))
    }

    /// Opens (and if needed creates) a cache database at `db_path`.
    pub fn open(db_path: impl Into<PathBuf>) -> Result<Self> {
        let manager = Self {
            db_path: db_path.into(),
        };
        manager.init_db()?;
        Ok(manager)
    }

    fn init_db(&self) -> Result<()> {
        let conn = self.connect()?;

        conn.execute(
            "CREATE TABLE IF NOT EXISTS translations (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                cache_key TEXT UNIQUE NOT NULL,
                source_text TEXT NOT NULL,
                translated_text TEXT NOT NULL,
                from_lang TEXT NOT NULL,
                to_lang TEXT NOT NULL,
                endpoint TEXT NOT NULL,
                created_at TIMESTAMP DEFAULT CURRENT_TIMESTAMP,
                accessed_at TIMESTAMP DEFAULT CURRENT_TIMESTAMP
            )",
            [],
        )
        .context("Failed to create translations table")?;

        conn.execute(
            "CREATE INDEX IF NOT EXISTS idx_cache_key ON translations(cache_key)",
            [],
        )
        .context("Failed to create index")?;

        Ok(())
    }

    fn connect(&self) -> Result<Connection> {
        Connection::open(&self.db_path)
            .with_context(|| format!("Failed to open cache database: {}", self.db_path.display()))
    }

    pub fn get(&self, route: &TranslationRoute, source_text: &str) -> Result<Option<String>> {
        let cache_key = cache_key(route, source_text);
        let conn = self.connect()?;

        let result: Option<String> = conn
            .query_row(
                "SELECT translated_text FROM translations WHERE cache_key = ?1",
                [&cache_key],
                |row| row.get(0),
            )
            .optional()
            .context("Failed to query translation cache")?;

        if result.is_some() {
            conn.execute(
                "UPDATE translations SET accessed_at = CURRENT_TIMESTAMP WHERE cache_key = ?1",
                [&cache_key],
            )?;
        }

        Ok(result)
    }

    pub fn put(
        &self,
        route: &TranslationRoute,
        source_text: &str,
        translated_text: &str,
    ) -> Result<()> {
        let cache_key = cache_key(route, source_text);
        let conn = self.connect()?;

        conn.execute(
            "INSERT OR REPLACE INTO translations
             (cache_key, source_text, translated_text, from_lang, to_lang, endpoint)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
            [
                cache_key.as_str(),
                source_text,
                translated_text,
                route.from_lang.as_str(),
                route.to_lang.as_str(),
                route.endpoint.as_str(),
            ],
        )
        .context("Failed to insert translation into cache")?;

        Ok(())
    }
}

fn cache_key(route: &TranslationRoute, source_text: &str) -> String {
    let cache_input = serde_json::json!({
        "source_text": source_text,
        "from_lang": route.from_lang,
        "to_lang": route.to_lang,
        "model": route.model,
        "endpoint": route.endpoint,
    });

    let mut hasher = Sha256::new();
    hasher.update(cache_input.to_string().as_bytes());
    hex::encode(hasher.finalize())
}
