//! Messages exchanged between the two participants and their rendering.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;

use crate::ui::Style;

/// Ends the current episode when typed by the human.
pub const DONE_SENTINEL: &str = "[DONE]";

/// Ends the whole session when typed by the human.
pub const EXIT_SENTINEL: &str = "[EXIT]";

const END_OF_EPISODE: &str = "- - - - - - - END OF EPISODE - - - - - - - - - -";

/// Candidates shown in full before the list is abbreviated.
const MAX_SHOWN_CANDIDATES: usize = 10;

/// One utterance in the dialogue.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Message {
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    #[serde(default)]
    pub episode_done: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label_candidates: Option<Vec<String>>,
    /// Participant-specific extras, shown with `--display-field`.
    #[serde(flatten)]
    pub fields: BTreeMap<String, Value>,
}

impl Message {
    pub fn new(id: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            text: Some(text.into()),
            ..Self::default()
        }
    }

    #[must_use]
    pub const fn with_episode_done(mut self, episode_done: bool) -> Self {
        self.episode_done = episode_done;
        self
    }

    #[must_use]
    pub fn with_field(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.fields.insert(key.into(), value.into());
        self
    }

    pub fn text(&self) -> &str {
        self.text.as_deref().unwrap_or("")
    }

    /// True if the text carries the end-of-episode sentinel.
    pub fn requests_episode_end(&self) -> bool {
        self.text().contains(DONE_SENTINEL)
    }
}

/// What to show when rendering a message.
#[derive(Debug, Clone, Default)]
pub struct DisplayOptions {
    /// Extra message fields to print, in order.
    pub add_fields: Vec<String>,
    /// Also print label candidates.
    pub verbose: bool,
}

/// Renders a message for the console, one line per entry.
///
/// `text` overrides the message text (used when the display language
/// differs from the message language).
pub fn render(message: &Message, text: Option<&str>, options: &DisplayOptions) -> Vec<String> {
    let mut lines = Vec::new();

    if let Some(text) = text.or(message.text.as_deref()) {
        lines.push(format!(
            "{} {}",
            Style::speaker(format!("[{}]:", message.id)),
            Style::text(text)
        ));
    }

    for field in &options.add_fields {
        if let Some(value) = message.fields.get(field) {
            let value = value
                .as_str()
                .map_or_else(|| value.to_string(), str::to_string);
            lines.push(format!("[{field}]: {value}"));
        }
    }

    if options.verbose
        && let Some(candidates) = &message.label_candidates
        && !candidates.is_empty()
    {
        lines.push(format!(
            "[label_candidates: {}]",
            abbreviate_candidates(candidates)
        ));
    }

    if message.episode_done {
        lines.push(Style::secondary(END_OF_EPISODE));
    }

    lines
}

fn abbreviate_candidates(candidates: &[String]) -> String {
    if candidates.len() <= MAX_SHOWN_CANDIDATES {
        return candidates.join("|");
    }
    let head = &candidates[..5];
    let tail = &candidates[candidates.len() - 5..];
    format!(
        "{}| ...and {} more | {}",
        head.join("|"),
        candidates.len() - MAX_SHOWN_CANDIDATES,
        tail.join("|")
    )
}
