//! The human side of the dialogue.

mod human;

use anyhow::Result;

pub use human::{HumanAgent, HumanOptions, InputTranslation};

use crate::message::Message;

/// Outcome of asking the human for a turn.
#[derive(Debug, Clone, PartialEq)]
pub enum HumanAct {
    /// An ordinary reply for the bot.
    Continue(Message),
    /// The human asked to end the current episode.
    ResetEpisode,
    /// The human asked to end the whole session.
    Terminate,
    /// Input is exhausted; the human is finished.
    EndOfInput,
}

#[allow(async_fn_in_trait)]
pub trait Human {
    fn observe(&mut self, message: &Message) -> Result<()>;

    async fn act(&mut self) -> Result<HumanAct>;

    /// Forgets the current episode.
    fn reset(&mut self);

    /// True once the human has quit or run out of input.
    fn is_finished(&self) -> bool;

    /// Prints a loop notice (episode finished, new chat starting).
    fn notify(&mut self, line: &str) -> Result<()>;
}
