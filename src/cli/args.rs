use clap::{Args as ClapArgs, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "parley")]
#[command(about = "Console chat between you and a bot, with optional input translation")]
#[command(version)]
pub struct Args {
    #[command(flatten)]
    pub chat: ChatArgs,

    #[command(flatten)]
    pub global: GlobalArgs,

    #[command(subcommand)]
    pub command: Option<Command>,
}

/// Flags accepted by every subcommand.
#[derive(ClapArgs, Debug, Clone, Default)]
pub struct GlobalArgs {
    /// Config file (defaults to ~/.config/parley/config.toml)
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Suppress status output
    #[arg(short = 'q', long, global = true)]
    pub quiet: bool,

    /// Print debug traces to stderr
    #[arg(short = 'v', long, global = true, conflicts_with = "quiet")]
    pub verbose: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,
}

/// Options for a chat session.
#[derive(ClapArgs, Debug, Clone, Default)]
pub struct ChatArgs {
    /// Bot provider ("echo" or a name from [providers])
    #[arg(short = 'p', long)]
    pub provider: Option<String>,

    /// Model name for chat providers
    #[arg(short = 'm', long)]
    pub model: Option<String>,

    /// File of label candidates to send to the bot
    #[arg(
        short = 'c',
        long,
        visible_alias = "fixed-cands",
        alias = "local-human-candidates-file",
        value_name = "PATH"
    )]
    pub candidates_file: Option<PathBuf>,

    /// Treat every episode as a single turn
    #[arg(long)]
    pub single_turn: bool,

    /// Translate your input before the bot sees it, and show replies in your language
    #[arg(short = 'T', long)]
    pub translate: bool,

    /// JSON phrase dictionary used for offline substitution
    #[arg(short = 'i', long, value_name = "PATH")]
    pub id_file_path: Option<PathBuf>,

    /// Disable the translation cache
    #[arg(short = 'n', long)]
    pub no_cache: bool,

    /// Extra message fields to display (comma separated)
    #[arg(long = "display-field", value_delimiter = ',', value_name = "FIELD")]
    pub display_fields: Vec<String>,
}

impl ChatArgs {
    /// Combines flags given before `chat` with those given after it.
    ///
    /// Values after the subcommand win; switches are on if either side set
    /// them and display fields accumulate.
    #[must_use]
    pub fn merge(self, sub: Self) -> Self {
        let mut display_fields = self.display_fields;
        display_fields.extend(sub.display_fields);

        Self {
            provider: sub.provider.or(self.provider),
            model: sub.model.or(self.model),
            candidates_file: sub.candidates_file.or(self.candidates_file),
            single_turn: self.single_turn || sub.single_turn,
            translate: self.translate || sub.translate,
            id_file_path: sub.id_file_path.or(self.id_file_path),
            no_cache: self.no_cache || sub.no_cache,
            display_fields,
        }
    }
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Start a chat session (the default)
    Chat(ChatArgs),
    /// Translate text once: dictionary substitution, then the remote API
    Translate {
        /// Text to translate (reads --file or stdin if omitted)
        text: Option<String>,

        /// File to translate
        #[arg(short = 'f', long, value_name = "PATH")]
        file: Option<PathBuf>,

        /// JSON phrase dictionary used for offline substitution
        #[arg(short = 'i', long, value_name = "PATH")]
        id_file_path: Option<PathBuf>,

        /// Only apply the dictionary, skip the remote API
        #[arg(long)]
        offline: bool,

        /// Disable the translation cache
        #[arg(short = 'n', long)]
        no_cache: bool,
    },
    /// List configured bot providers
    Providers {
        /// Show details for one provider
        name: Option<String>,
    },
    /// Show the effective configuration
    Config {
        /// Write a starter config file if none exists
        #[arg(long)]
        init: bool,
    },
}
