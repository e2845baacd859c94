//! The `/events` push channel.
//!
//! A single long-lived text stream of `data:` lines. Messages are observed
//! and surfaced, never parsed into the view-models; parsing stops at the
//! SSE framing.

use futures_util::StreamExt;

use crate::api::client::ApiClient;

/// What the reader reports back to its consumer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StreamEvent {
    Message(String),
    Closed,
}

/// Reads `/events` until the connection drops, handing each data payload to
/// `sink`. Always reports `Closed` last, including when the open itself
/// fails (which has already been notified by the interception layer).
pub async fn read_events(api: ApiClient, mut sink: impl FnMut(StreamEvent)) {
    let response = match api.open_events().await {
        Ok(response) => response,
        Err(_) => {
            sink(StreamEvent::Closed);
            return;
        }
    };

    let mut body = response.bytes_stream();
    let mut buffer = String::new();

    while let Some(chunk) = body.next().await {
        let chunk = match chunk {
            Ok(chunk) => chunk,
            Err(error) => {
                tracing::warn!("event stream read failed: {error}");
                break;
            }
        };
        buffer.push_str(&String::from_utf8_lossy(&chunk));

        while let Some(newline) = buffer.find('\n') {
            let line: String = buffer.drain(..=newline).collect();
            if let Some(data) = parse_data_line(line.trim_end()) {
                sink(StreamEvent::Message(data.to_string()));
            }
        }
    }

    sink(StreamEvent::Closed);
}

/// Extracts the payload of an SSE data line.
///
/// Handles `data: {...}` and the compact `data:{...}`; comments, `event:`
/// and `id:` lines, blanks, and `[DONE]` markers yield nothing.
fn parse_data_line(line: &str) -> Option<&str> {
    let rest = line.strip_prefix("data:")?;
    let rest = rest.strip_prefix(' ').unwrap_or(rest);
    if rest.is_empty() || rest == "[DONE]" {
        return None;
    }
    Some(rest)
}
