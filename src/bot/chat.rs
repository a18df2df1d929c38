use anyhow::Result;
use futures_util::StreamExt;

use super::Bot;
use super::client::{ChatClient, ChatMessage, Role};
use crate::message::Message;
use crate::ui::Spinner;

/// Bot backed by a chat-completions endpoint.
///
/// Keeps the running episode as conversation history and forgets it when
/// the episode ends.
pub struct ChatBot {
    id: String,
    client: ChatClient,
    model: String,
    system_prompt: String,
    history: Vec<ChatMessage>,
    episode_ending: bool,
}

impl ChatBot {
    pub fn new(
        id: impl Into<String>,
        client: ChatClient,
        model: impl Into<String>,
        system_prompt: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            client,
            model: model.into(),
            system_prompt: system_prompt.into(),
            history: Vec::new(),
            episode_ending: false,
        }
    }

    /// The messages sent with the next request, system prompt first.
    fn conversation(&self) -> Vec<ChatMessage> {
        let mut messages = Vec::with_capacity(self.history.len() + 1);
        if !self.system_prompt.is_empty() {
            messages.push(ChatMessage::new(Role::System, self.system_prompt.clone()));
        }
        messages.extend(self.history.iter().cloned());
        messages
    }
}

impl Bot for ChatBot {
    fn id(&self) -> &str {
        &self.id
    }

    fn observe(&mut self, message: &Message) {
        if let Some(text) = message.text.as_deref()
            && !text.is_empty()
        {
            self.history.push(ChatMessage::new(Role::User, text));
        }
        self.episode_ending = message.episode_done;
    }

    async fn act(&mut self) -> Result<Message> {
        let spinner = Spinner::new("Thinking...");
        let mut stream = self
            .client
            .complete_stream(&self.model, &self.conversation())
            .await?;

        let mut reply = String::new();
        while let Some(chunk) = stream.next().await {
            reply.push_str(&chunk?);
        }
        spinner.stop();

        let reply = reply.trim().to_string();
        self.history
            .push(ChatMessage::new(Role::Assistant, reply.clone()));

        if self.episode_ending {
            self.reset();
        }

        Ok(Message::new(self.id.clone(), reply).with_field("model", self.model.clone()))
    }

    fn reset(&mut self) {
        self.history.clear();
        self.episode_ending = false;
    }
}
