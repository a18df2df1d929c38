//! Fixed label candidates attached to every human reply.

use anyhow::{Context, Result};
use std::fs;
use std::path::Path;

/// Loads label candidates from `path`, one per non-blank line.
///
/// Lines are trimmed and literal `\n` sequences expanded. A first line
/// starting with `1 ` marks the file as numbered, and the leading number is
/// stripped from every line. As soon as a tab appears the file is read as a
/// dialogue file: anything collected so far is dropped and only the reply
/// column of each numbered line is kept.
pub fn load_candidates(path: Option<&Path>) -> Result<Option<Vec<String>>> {
    let Some(path) = path else {
        return Ok(None);
    };

    let contents = fs::read_to_string(path)
        .with_context(|| format!("Failed to read candidates file: {}", path.display()))?;

    Ok(Some(parse_candidates(&contents)))
}

fn parse_candidates(contents: &str) -> Vec<String> {
    let mut candidates = Vec::new();
    let mut numbered = false;
    let mut replies_only = false;
    let mut seen = 0usize;

    for raw in contents.lines() {
        let line = raw.trim().replace("\\n", "\n");
        if line.is_empty() {
            continue;
        }
        seen += 1;

        if seen == 1 && line.starts_with("1 ") {
            numbered = true;
        }
        if line.contains('\t') && !replies_only {
            replies_only = true;
            candidates.clear();
        }

        if !numbered {
            candidates.push(line);
            continue;
        }

        let body = line.split_once(' ').map_or("", |(_, rest)| rest);
        if replies_only {
            if let Some(reply) = body.split('\t').nth(1)
                && !reply.is_empty()
            {
                candidates.push(reply.to_string());
            }
        } else {
            candidates.push(body.to_string());
        }
    }

    candidates
}
