use anyhow::{Context, Result, bail};
use std::fs;
use std::io::{self, Read};
use std::path::Path;

/// Upper bound for one-shot translation input.
const MAX_INPUT_SIZE: usize = 64 * 1024;

/// Where one-shot translation text comes from.
#[derive(Debug, Clone, Copy)]
pub enum InputSource<'a> {
    Text(&'a str),
    File(&'a Path),
    Stdin,
}

impl<'a> InputSource<'a> {
    /// Positional text wins over `--file`, which wins over stdin.
    pub fn pick(text: Option<&'a str>, file: Option<&'a Path>) -> Self {
        match (text, file) {
            (Some(text), _) => Self::Text(text),
            (None, Some(file)) => Self::File(file),
            (None, None) => Self::Stdin,
        }
    }

    /// Reads the input with its trailing line break removed.
    pub fn read(self) -> Result<String> {
        let raw = match self {
            Self::Text(text) => text.to_string(),
            Self::File(path) => read_file(path)?,
            Self::Stdin => read_stdin()?,
        };

        check_size(raw.len())?;
        Ok(raw.trim_end_matches(['\n', '\r']).to_string())
    }
}

fn read_file(path: &Path) -> Result<String> {
    let metadata = fs::metadata(path)
        .with_context(|| format!("Failed to access file: {}", path.display()))?;
    check_size(metadata.len() as usize)?;

    fs::read_to_string(path).with_context(|| format!("Failed to read file: {}", path.display()))
}

fn read_stdin() -> Result<String> {
    let mut buffer = Vec::new();
    io::stdin()
        .lock()
        .take(MAX_INPUT_SIZE as u64 + 1)
        .read_to_end(&mut buffer)
        .context("Failed to read from stdin")?;
    check_size(buffer.len())?;

    String::from_utf8(buffer).context("Input is not valid UTF-8")
}

fn check_size(size: usize) -> Result<()> {
    if size > MAX_INPUT_SIZE {
        bail!(
            "Input size ({:.1} KB) exceeds maximum allowed size (64 KB).\n\n\
             Translate long documents in smaller parts.",
            size as f64 / 1024.0
        );
    }
    Ok(())
}
