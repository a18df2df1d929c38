//! The bot side of the dialogue.

mod chat;
mod client;
mod echo;
mod sse_parser;

use anyhow::Result;

pub use chat::ChatBot;
pub use client::ChatClient;
pub use echo::EchoBot;

use crate::config::BotSettings;
use crate::message::Message;

#[allow(async_fn_in_trait)]
pub trait Bot {
    fn id(&self) -> &str;

    fn observe(&mut self, message: &Message);

    async fn act(&mut self) -> Result<Message>;

    /// Forgets the current episode.
    fn reset(&mut self);
}

/// The bot selected by configuration.
pub enum ConfiguredBot {
    Echo(EchoBot),
    Chat(ChatBot),
}

impl ConfiguredBot {
    pub fn from_settings(settings: &BotSettings) -> Self {
        match settings {
            BotSettings::Echo => Self::Echo(EchoBot::new()),
            BotSettings::Chat {
                provider_name,
                endpoint,
                model,
                api_key,
                system_prompt,
            } => Self::Chat(ChatBot::new(
                provider_name.clone(),
                ChatClient::new(endpoint.clone(), api_key.clone()),
                model.clone(),
                system_prompt.clone(),
            )),
        }
    }
}

impl Bot for ConfiguredBot {
    fn id(&self) -> &str {
        match self {
            Self::Echo(bot) => bot.id(),
            Self::Chat(bot) => bot.id(),
        }
    }

    fn observe(&mut self, message: &Message) {
        match self {
            Self::Echo(bot) => bot.observe(message),
            Self::Chat(bot) => bot.observe(message),
        }
    }

    async fn act(&mut self) -> Result<Message> {
        match self {
            Self::Echo(bot) => bot.act().await,
            Self::Chat(bot) => bot.act().await,
        }
    }

    fn reset(&mut self) {
        match self {
            Self::Echo(bot) => bot.reset(),
            Self::Chat(bot) => bot.reset(),
        }
    }
}
