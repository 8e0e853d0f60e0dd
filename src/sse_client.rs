use anyhow::Result;
use futures_util::StreamExt;
use log::*;
use serde_json::Value;
use std::sync::Arc;
use tokio_util::sync::CancellationToken;

use crate::counter::EventCounter;

/// Terminal state of one connection's read loop.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// The server closed the stream.
    Completed,
    /// The harness requested cancellation mid-stream.
    Cancelled,
}

/// Classification of one line of the response body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParsedLine {
    /// A `data:` line whose payload parsed as JSON. Carries the number of
    /// top-level object fields (zero for non-object JSON values); the
    /// count is for display only and is never retained.
    Event { fields: usize },
    /// A `data:` line whose payload is not valid JSON.
    NonJson,
    /// Anything else: comments, `event:` lines, empty lines.
    Ignored,
}

/// Classify a single line. Lines without the `data:` prefix never affect
/// any counter.
pub fn parse_line(line: &str) -> ParsedLine {
    let Some(payload) = line.trim_end().strip_prefix("data:") else {
        return ParsedLine::Ignored;
    };

    match serde_json::from_str::<Value>(payload.trim()) {
        Ok(value) => ParsedLine::Event {
            fields: value.as_object().map(|obj| obj.len()).unwrap_or(0),
        },
        Err(_) => ParsedLine::NonJson,
    }
}

/// Reassembles newline-delimited lines from arbitrary byte chunks.
///
/// A trailing partial line stays buffered until the next chunk delivers
/// its newline; trailing `\r` is stripped along with other whitespace.
#[derive(Debug, Default)]
pub struct LineBuffer {
    pending: String,
}

impl LineBuffer {
    pub fn push(&mut self, chunk: &[u8]) -> Vec<String> {
        self.pending.push_str(&String::from_utf8_lossy(chunk));

        let mut lines = Vec::new();
        while let Some(pos) = self.pending.find('\n') {
            let line: String = self.pending.drain(..=pos).collect();
            lines.push(line.trim_end().to_string());
        }
        lines
    }
}

/// One long-lived streaming GET against the shared URL.
///
/// State machine: Connecting -> Streaming -> Terminated, where Terminated
/// is reached via server close (`Outcome::Completed`), cancellation
/// (`Outcome::Cancelled`), or a transport error (`Err`).
pub struct StreamReader {
    conn_id: u32,
    url: String,
    client: reqwest::Client,
    counter: Arc<EventCounter>,
}

impl StreamReader {
    pub fn new(
        conn_id: u32,
        url: String,
        client: reqwest::Client,
        counter: Arc<EventCounter>,
    ) -> Self {
        Self {
            conn_id,
            url,
            client,
            counter,
        }
    }

    /// Connect and consume the stream until the server closes it,
    /// cancellation is requested, or an I/O error occurs. Cancellation is
    /// observed at every suspension point; dropping the response stream
    /// releases the underlying connection.
    pub async fn run(&self, cancel: CancellationToken) -> Result<Outcome> {
        let response = tokio::select! {
            _ = cancel.cancelled() => return Ok(Outcome::Cancelled),
            response = self
                .client
                .get(&self.url)
                .header(reqwest::header::ACCEPT, "text/event-stream")
                .send() => response?,
        };

        let response = response.error_for_status()?;
        debug!("Connection {} streaming", self.conn_id);

        let mut stream = response.bytes_stream();
        let mut buffer = LineBuffer::default();

        loop {
            let chunk = tokio::select! {
                _ = cancel.cancelled() => {
                    debug!("Connection {} cancelled", self.conn_id);
                    return Ok(Outcome::Cancelled);
                }
                chunk = stream.next() => chunk,
            };

            match chunk {
                Some(Ok(bytes)) => {
                    for line in buffer.push(&bytes) {
                        self.handle_line(&line);
                    }
                }
                Some(Err(e)) => return Err(e.into()),
                None => {
                    debug!("Connection {} stream ended", self.conn_id);
                    return Ok(Outcome::Completed);
                }
            }
        }
    }

    fn handle_line(&self, line: &str) {
        match parse_line(line) {
            ParsedLine::Event { fields } => {
                self.counter.increment(self.conn_id);
                let timestamp = chrono::Local::now().format("%H:%M:%S%.3f");
                println!(
                    "[{timestamp}] Connection {} received data: {fields} fields",
                    self.conn_id
                );
            }
            ParsedLine::NonJson => {
                println!("Connection {} received non-JSON data", self.conn_id);
            }
            ParsedLine::Ignored => {}
        }
    }
}
