use anyhow::Result;

use super::{Human, HumanAct};
use crate::console::Console;
use crate::dictionary::{Dictionary, Direction};
use crate::message::{self, DONE_SENTINEL, DisplayOptions, EXIT_SENTINEL, Message};
use crate::translation::Translator;
use crate::ui::{Spinner, Style};

const PROMPT: &str = "Enter Your Message:";

const INSTRUCTIONS: &str = "Enter [DONE] if you want to end the episode, [EXIT] to quit.";

/// Settings for the human agent.
#[derive(Debug, Clone, Default)]
pub struct HumanOptions {
    /// Mark every reply as the end of its episode.
    pub single_turn: bool,
    /// Label candidates attached to every reply.
    pub candidates: Option<Vec<String>>,
    pub display: DisplayOptions,
}

/// Translation applied to typed input: dictionary first, then the remote
/// translator.
///
/// The same dictionary maps observed replies back into the operator's
/// language for display.
pub struct InputTranslation<T> {
    dictionary: Dictionary,
    translator: T,
    direction: Direction,
}

impl<T: Translator> InputTranslation<T> {
    pub fn new(dictionary: Dictionary, translator: T) -> Self {
        let direction = Direction::for_source_language(&translator.route().from_lang);
        Self {
            dictionary,
            translator,
            direction,
        }
    }

    async fn translate(&self, text: &str) -> Result<String> {
        let substituted = self.dictionary.substitute(text, self.direction);
        Spinner::wait("Translating...", self.translator.translate(&substituted)).await
    }

    fn localize(&self, text: &str) -> String {
        self.dictionary.substitute(text, self.direction.inverse())
    }
}

/// Agent that takes its turns from an operator at a console.
pub struct HumanAgent<C, T> {
    console: C,
    options: HumanOptions,
    translation: Option<InputTranslation<T>>,
    finished: bool,
    episode_done: bool,
}

impl<C: Console, T: Translator> HumanAgent<C, T> {
    pub const ID: &'static str = "localHuman";

    pub const fn new(console: C, options: HumanOptions) -> Self {
        Self {
            console,
            options,
            translation: None,
            finished: false,
            episode_done: false,
        }
    }

    #[must_use]
    pub fn with_translation(mut self, translation: InputTranslation<T>) -> Self {
        self.translation = Some(translation);
        self
    }

    pub fn print_instructions(&mut self) -> Result<()> {
        self.console.write_line(&Style::highlight(INSTRUCTIONS))
    }

    pub const fn episode_done(&self) -> bool {
        self.episode_done
    }

    fn reply(&self, text: String) -> Message {
        Message {
            id: Self::ID.to_string(),
            text: Some(text),
            episode_done: self.options.single_turn,
            label_candidates: self.options.candidates.clone(),
            ..Message::default()
        }
    }
}

impl<C: Console, T: Translator> Human for HumanAgent<C, T> {
    fn observe(&mut self, message: &Message) -> Result<()> {
        let localized = self
            .translation
            .as_ref()
            .zip(message.text.as_deref())
            .map(|(translation, text)| translation.localize(text));

        for line in message::render(message, localized.as_deref(), &self.options.display) {
            self.console.write_line(&line)?;
        }
        Ok(())
    }

    async fn act(&mut self) -> Result<HumanAct> {
        let Some(input) = self.console.read_line(PROMPT)? else {
            self.finished = true;
            return Ok(HumanAct::EndOfInput);
        };

        let text = match &self.translation {
            Some(translation) => {
                let translated = translation.translate(&input).await?;
                self.console.write_line(&Style::secondary(&translated))?;
                translated
            }
            None => input,
        };

        let text = text.replace("\\n", "\n");

        if text.contains(DONE_SENTINEL) {
            return Ok(HumanAct::ResetEpisode);
        }
        if text.contains(EXIT_SENTINEL) {
            self.finished = true;
            return Ok(HumanAct::Terminate);
        }

        let reply = self.reply(text);
        self.episode_done = reply.episode_done;
        Ok(HumanAct::Continue(reply))
    }

    fn reset(&mut self) {
        self.episode_done = false;
    }

    fn is_finished(&self) -> bool {
        self.finished
    }

    fn notify(&mut self, line: &str) -> Result<()> {
        self.console.write_line(line)
    }
}
