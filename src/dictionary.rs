//! Personal phrase dictionary for offline substitution.
//!
//! The dictionary file is a JSON object mapping phrases in the source
//! language to phrases in the target language:
//!
//! ```json
//! { "抑郁": "depression", "失眠": "insomnia" }
//! ```

use anyhow::{Context, Result};
use std::collections::{BTreeMap, HashMap};
use std::fs;
use std::path::Path;

use crate::config::ConfigError;

/// Which side of the mapping is searched for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    /// Replace keys with values.
    Forward,
    /// Replace values with keys.
    Reverse,
}

impl Direction {
    /// Picks the direction for text written in `source_lang`.
    ///
    /// Dictionary keys are in the operator's language, so English input is
    /// mapped backwards.
    pub fn for_source_language(source_lang: &str) -> Self {
        if source_lang.eq_ignore_ascii_case("en") || source_lang.starts_with("en-") {
            Self::Reverse
        } else {
            Self::Forward
        }
    }

    pub const fn inverse(self) -> Self {
        match self {
            Self::Forward => Self::Reverse,
            Self::Reverse => Self::Forward,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct Dictionary {
    forward: HashMap<String, String>,
    reverse: HashMap<String, String>,
}

impl Dictionary {
    /// Loads the dictionary configured by `--id-file-path`.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let path = path.ok_or_else(|| ConfigError::new("Have to set --id-file-path"))?;

        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read dictionary file: {}", path.display()))?;

        let entries: BTreeMap<String, String> = serde_json::from_str(&contents).with_context(
            || {
                format!(
                    "Dictionary file must be a JSON object of strings: {}",
                    path.display()
                )
            },
        )?;

        Ok(Self::from_entries(entries))
    }

    /// Builds a dictionary from phrase pairs. Empty phrases are dropped.
    ///
    /// When several keys share a value, the reverse mapping keeps the one
    /// that comes last.
    pub fn from_entries<I, K, V>(entries: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let mut forward = HashMap::new();
        let mut reverse = HashMap::new();

        for (key, value) in entries {
            let (key, value) = (key.into(), value.into());
            if key.is_empty() || value.is_empty() {
                continue;
            }
            reverse.insert(value.clone(), key.clone());
            forward.insert(key, value);
        }

        Self { forward, reverse }
    }

    pub fn len(&self) -> usize {
        self.forward.len()
    }

    pub fn is_empty(&self) -> bool {
        self.forward.is_empty()
    }

    /// Replaces every dictionary phrase found in `input`.
    ///
    /// Single left-to-right pass: at each position the longest matching
    /// phrase wins, and replaced text is never scanned again.
    pub fn substitute(&self, input: &str, direction: Direction) -> String {
        let table = match direction {
            Direction::Forward => &self.forward,
            Direction::Reverse => &self.reverse,
        };
        if table.is_empty() {
            return input.to_string();
        }

        let mut output = String::with_capacity(input.len());
        let mut rest = input;

        while let Some(ch) = rest.chars().next() {
            let longest = table
                .iter()
                .filter(|(phrase, _)| rest.starts_with(phrase.as_str()))
                .max_by_key(|(phrase, _)| phrase.len());

            if let Some((phrase, replacement)) = longest {
                output.push_str(replacement);
                rest = &rest[phrase.len()..];
            } else {
                output.push(ch);
                rest = &rest[ch.len_utf8()..];
            }
        }

        output
    }
}
