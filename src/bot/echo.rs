use anyhow::Result;

use super::Bot;
use crate::message::Message;

/// Offline bot that answers with whatever it last observed.
#[derive(Debug, Default)]
pub struct EchoBot {
    last_text: Option<String>,
    episode_ending: bool,
}

impl EchoBot {
    pub const ID: &'static str = "echo";

    pub fn new() -> Self {
        Self::default()
    }
}

impl Bot for EchoBot {
    fn id(&self) -> &str {
        Self::ID
    }

    fn observe(&mut self, message: &Message) {
        self.last_text = message.text.clone();
        self.episode_ending = message.episode_done;
    }

    async fn act(&mut self) -> Result<Message> {
        let reply = Message::new(Self::ID, self.last_text.take().unwrap_or_default());
        if self.episode_ending {
            self.reset();
        }
        Ok(reply)
    }

    fn reset(&mut self) {
        self.last_text = None;
        self.episode_ending = false;
    }
}
