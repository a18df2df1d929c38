//! Server-Sent Events parsing for streamed chat completions.

use anyhow::Result;
use bytes::Bytes;
use futures_util::Stream;
use serde::Deserialize;

#[derive(Debug, Deserialize)]
struct StreamResponse {
    #[serde(default)]
    choices: Vec<StreamChoice>,
    error: Option<StreamError>,
}

#[derive(Debug, Deserialize)]
struct StreamChoice {
    delta: Delta,
}

#[derive(Debug, Deserialize)]
struct Delta {
    content: Option<String>,
}

#[derive(Debug, Deserialize)]
struct StreamError {
    message: String,
}

/// One parsed `data:` event.
#[derive(Debug, PartialEq, Eq)]
enum Event {
    Content(String),
    Error(String),
    Done,
}

/// Converts a raw SSE byte stream into a stream of reply fragments.
///
/// Ends at `data: [DONE]`; an `error` payload from the server ends the
/// stream with an error.
pub fn sse_to_text_stream(
    byte_stream: impl Stream<Item = reqwest::Result<Bytes>> + Send + 'static,
) -> impl Stream<Item = Result<String>> + Send {
    async_stream::stream! {
        use futures_util::StreamExt;

        let mut byte_stream = std::pin::pin!(byte_stream);
        // Raw bytes: a multi-byte character may be split across chunks.
        let mut buffer: Vec<u8> = Vec::new();

        while let Some(chunk_result) = byte_stream.next().await {
            let chunk = match chunk_result {
                Ok(c) => c,
                Err(e) => {
                    yield Err(anyhow::Error::new(e).context("Stream error"));
                    return;
                }
            };

            buffer.extend_from_slice(&chunk);

            while let Some(line_end) = buffer.iter().position(|&b| b == b'\n') {
                let line: Vec<u8> = buffer.drain(..=line_end).collect();
                let line = String::from_utf8_lossy(&line);

                match parse_sse_line(line.trim()) {
                    Some(Event::Content(content)) => yield Ok(content),
                    Some(Event::Error(message)) => {
                        yield Err(anyhow::anyhow!("Chat endpoint reported an error: {message}"));
                        return;
                    }
                    Some(Event::Done) => return,
                    None => {}
                }
            }
        }
    }
}

/// Parses a single trimmed SSE line.
///
/// Returns `None` for comments, blank lines, non-data fields, unparsable
/// payloads and deltas without text.
fn parse_sse_line(line: &str) -> Option<Event> {
    let payload = line.strip_prefix("data:")?.trim_start();

    if payload == "[DONE]" {
        return Some(Event::Done);
    }

    let response = serde_json::from_str::<StreamResponse>(payload).ok()?;

    if let Some(error) = response.error {
        return Some(Event::Error(error.message));
    }

    let content: String = response
        .choices
        .into_iter()
        .filter_map(|c| c.delta.content)
        .collect();

    if content.is_empty() {
        None
    } else {
        Some(Event::Content(content))
    }
}
