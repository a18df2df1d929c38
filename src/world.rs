//! Two-party dialogue loop: the bot greets first, then human and bot take
//! alternating turns until the human is finished.

use anyhow::Result;

use crate::agent::{Human, HumanAct};
use crate::bot::Bot;
use crate::message::Message;
use crate::ui::Style;

const WORLD_ID: &str = "World";

pub struct DialogueWorld<H, B> {
    human: H,
    bot: B,
    greeting: String,
    first_time: bool,
    turn_count: usize,
    total_turns: usize,
    episodes: usize,
}

impl<H: Human, B: Bot> DialogueWorld<H, B> {
    pub fn new(human: H, bot: B, greeting: impl Into<String>) -> Self {
        Self {
            human,
            bot,
            greeting: greeting.into(),
            first_time: true,
            turn_count: 0,
            total_turns: 0,
            episodes: 0,
        }
    }

    /// Runs one step of the dialogue.
    ///
    /// The first call only shows the greeting; it never waits for input.
    pub async fn parley(&mut self) -> Result<()> {
        if self.first_time {
            self.human
                .observe(&Message::new(WORLD_ID, self.greeting.clone()))?;
            self.first_time = false;
            return Ok(());
        }

        let act = match self.human.act().await? {
            HumanAct::Continue(act) => act,
            HumanAct::ResetEpisode | HumanAct::Terminate => {
                self.reset();
                self.finalize_episode()?;
                self.turn_count = 0;
                return Ok(());
            }
            HumanAct::EndOfInput => return Ok(()),
        };

        if act.requests_episode_end() {
            self.bot
                .observe(&Message::new(WORLD_ID, "Goodbye!").with_episode_done(true));
            self.reset();
            return Ok(());
        }

        self.bot.observe(&act);
        let reply = self.bot.act().await?;
        crate::debug!(
            "{} replied: {}",
            self.bot.id(),
            serde_json::to_string(&reply)?
        );
        self.human.observe(&reply)?;

        self.turn_count += 1;
        self.total_turns += 1;

        if act.episode_done {
            self.finalize_episode()?;
            self.turn_count = 0;
        }

        Ok(())
    }

    /// Parleys until the human is finished.
    pub async fn run(&mut self) -> Result<()> {
        while !self.epoch_done() {
            self.parley().await?;
        }
        Ok(())
    }

    pub fn epoch_done(&self) -> bool {
        self.human.is_finished()
    }

    /// Resets both participants for a new episode.
    pub fn reset(&mut self) {
        self.human.reset();
        self.bot.reset();
    }

    fn finalize_episode(&mut self) -> Result<()> {
        self.episodes += 1;
        self.human.notify(&Style::header("CHAT DONE"))?;
        if !self.epoch_done() {
            self.human.notify(&Style::secondary("\n... preparing new chat... \n"))?;
        }
        Ok(())
    }

    /// Turns taken in the current episode.
    pub const fn turn_count(&self) -> usize {
        self.turn_count
    }

    /// Turns taken since the world was created.
    pub const fn total_turns(&self) -> usize {
        self.total_turns
    }

    /// Episodes finalized so far.
    pub const fn episodes(&self) -> usize {
        self.episodes
    }

    pub const fn bot(&self) -> &B {
        &self.bot
    }
}
