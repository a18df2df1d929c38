//! # parley - console chat between an operator and a bot
//!
//! `parley` puts a human at the terminal in a turn-by-turn conversation with
//! a bot. Typed input can be translated before the bot sees it: phrases from
//! a personal dictionary are substituted first, then the text goes through a
//! remote translation API.
//!
//! ## Quick Start
//!
//! ```bash
//! # Talk to the built-in echo bot
//! parley --provider echo
//!
//! # Talk to a chat-completions endpoint, typing in Chinese
//! parley --provider ollama --model llama3.2 --translate --id-file-path dict.json
//!
//! # One-shot translation
//! echo "我最近总是失眠" | parley translate --id-file-path dict.json
//! ```
//!
//! While chatting, `[DONE]` ends the current episode and `[EXIT]` quits.
//!
//! ## Configuration
//!
//! Settings are stored in `~/.config/parley/config.toml`:
//!
//! ```toml
//! [parley]
//! provider = "ollama"
//! model = "llama3.2"
//! id_file_path = "/home/me/dict.json"
//!
//! [providers.ollama]
//! endpoint = "http://localhost:11434"
//! models = ["llama3.2"]
//! ```

/// The human agent and its turn outcomes.
pub mod agent;

/// Bots that answer the human.
pub mod bot;

/// Translation cache management using `SQLite`.
pub mod cache;

/// Label candidate loading.
pub mod candidates;

/// Command-line interface definitions and handlers.
pub mod cli;

/// Configuration file management and CLI/config merging.
pub mod config;

/// Console I/O abstraction.
pub mod console;

/// Personal phrase dictionary.
pub mod dictionary;

/// File system utilities.
pub mod fs;

/// HTTP errors shared by the remote clients.
pub mod http;

/// Input reading from files and stdin.
pub mod input;

/// Dialogue messages and their rendering.
pub mod message;

/// Global output configuration (quiet, verbose, colors).
pub mod output;

/// XDG-style path utilities for configuration and cache.
pub mod paths;

/// Remote translation client.
pub mod translation;

/// Terminal UI components (spinner, colors).
pub mod ui;

/// The turn-alternation loop.
pub mod world;
