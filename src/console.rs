//! Line-based console I/O used by the human agent and the dialogue loop.
//!
//! Everything that talks to the operator goes through [`Console`], so the
//! loop can be driven by [`MemoryConsole`] in tests.

use anyhow::{Context, Result};
use inquire::Text;
use inquire::ui::{Attributes, Color, RenderConfig, Styled};
use std::cell::RefCell;
use std::collections::VecDeque;
use std::io::{self, BufRead, IsTerminal, Write};
use std::rc::Rc;

use crate::ui::{Style, is_prompt_cancelled};

pub trait Console {
    /// Prompts and reads one line without its line terminator.
    ///
    /// Returns `Ok(None)` at end of input.
    fn read_line(&mut self, prompt: &str) -> Result<Option<String>>;

    fn write_line(&mut self, line: &str) -> Result<()>;
}

impl<C: Console + ?Sized> Console for Box<C> {
    fn read_line(&mut self, prompt: &str) -> Result<Option<String>> {
        (**self).read_line(prompt)
    }

    fn write_line(&mut self, line: &str) -> Result<()> {
        (**self).write_line(line)
    }
}

/// Picks the interactive prompt for a terminal and plain line reads for
/// piped input.
pub fn terminal() -> Box<dyn Console> {
    if io::stdin().is_terminal() {
        Box::new(InteractiveConsole::new())
    } else {
        Box::new(StdConsole)
    }
}

/// Reads lines from stdin and writes to stdout.
#[derive(Debug, Default, Clone, Copy)]
pub struct StdConsole;

impl Console for StdConsole {
    fn read_line(&mut self, prompt: &str) -> Result<Option<String>> {
        let mut stdout = io::stdout().lock();
        write!(stdout, "{} ", Style::highlight(prompt))?;
        stdout.flush()?;
        drop(stdout);

        let mut line = String::new();
        let bytes_read = io::stdin()
            .lock()
            .read_line(&mut line)
            .context("Failed to read from stdin")?;

        if bytes_read == 0 {
            return Ok(None);
        }

        Ok(Some(strip_line_ending(line)))
    }

    fn write_line(&mut self, line: &str) -> Result<()> {
        writeln!(io::stdout().lock(), "{line}").context("Failed to write to stdout")
    }
}

/// Terminal prompt with line editing and history-friendly rendering.
pub struct InteractiveConsole {
    render_config: RenderConfig<'static>,
}

impl InteractiveConsole {
    pub fn new() -> Self {
        let prompt_style = Styled::new("❯")
            .with_fg(Color::LightBlue)
            .with_attr(Attributes::BOLD);
        let render_config = RenderConfig::default()
            .with_prompt_prefix(prompt_style)
            .with_answered_prompt_prefix(prompt_style);

        Self { render_config }
    }
}

impl Default for InteractiveConsole {
    fn default() -> Self {
        Self::new()
    }
}

impl Console for InteractiveConsole {
    fn read_line(&mut self, prompt: &str) -> Result<Option<String>> {
        let input = Text::new(prompt)
            .with_render_config(self.render_config)
            .with_help_message("[DONE] ends the episode, [EXIT] quits, Ctrl+D or Ctrl+C also quits")
            .prompt();

        match input {
            Ok(line) => Ok(Some(line)),
            Err(e) if is_prompt_cancelled(&e) => Ok(None),
            Err(e) => Err(e).context("Failed to read from terminal"),
        }
    }

    fn write_line(&mut self, line: &str) -> Result<()> {
        StdConsole.write_line(line)
    }
}

/// In-memory console fed from a script of input lines.
///
/// Clones share the same input queue and output buffer, so a test can keep
/// one handle while the agent and the loop own theirs.
#[derive(Debug, Default, Clone)]
pub struct MemoryConsole {
    input: Rc<RefCell<VecDeque<String>>>,
    output: Rc<RefCell<Vec<String>>>,
}

impl MemoryConsole {
    pub fn new<I, S>(lines: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            input: Rc::new(RefCell::new(lines.into_iter().map(Into::into).collect())),
            output: Rc::default(),
        }
    }

    /// Everything written so far, one entry per written line.
    pub fn output(&self) -> Vec<String> {
        self.output.borrow().clone()
    }

    /// Input lines not yet consumed.
    pub fn remaining_input(&self) -> usize {
        self.input.borrow().len()
    }
}

impl Console for MemoryConsole {
    fn read_line(&mut self, _prompt: &str) -> Result<Option<String>> {
        Ok(self.input.borrow_mut().pop_front())
    }

    fn write_line(&mut self, line: &str) -> Result<()> {
        self.output.borrow_mut().push(line.to_string());
        Ok(())
    }
}

fn strip_line_ending(mut line: String) -> String {
    if line.ends_with('\n') {
        line.pop();
        if line.ends_with('\r') {
            line.pop();
        }
    }
    line
}
