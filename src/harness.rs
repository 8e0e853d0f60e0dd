use log::*;
use std::sync::Arc;
use std::time::Duration;
use tokio::task::JoinSet;
use tokio_util::sync::CancellationToken;

use crate::counter::EventCounter;
use crate::output::Report;
use crate::sse_client::{Outcome, StreamReader};

/// Fan-out of N concurrent stream readers bounded by a fixed running time.
pub struct Harness {
    url: String,
    connections: u32,
    duration: Duration,
}

impl Harness {
    pub fn new(url: impl Into<String>, connections: u32, duration: Duration) -> Self {
        Self {
            url: url.into(),
            connections,
            duration,
        }
    }

    /// Run all readers for the configured duration, cancel the stragglers,
    /// and aggregate per-connection counts.
    ///
    /// Every spawned task is observed to a terminal state before the
    /// counter map is read. Per-connection failures are logged with the
    /// connection id and swallowed so the aggregation step always runs.
    pub async fn run(&self) -> Report {
        let counter = Arc::new(EventCounter::new());
        let cancel = CancellationToken::new();
        let client = reqwest::Client::new();

        let mut tasks = JoinSet::new();
        for conn_id in 1..=self.connections {
            let reader = StreamReader::new(
                conn_id,
                self.url.clone(),
                client.clone(),
                counter.clone(),
            );
            let cancel = cancel.clone();

            tasks.spawn(async move { (conn_id, reader.run(cancel).await) });
            info!("Started connection {conn_id}");
        }

        tokio::time::sleep(self.duration).await;
        cancel.cancel();

        while let Some(joined) = tasks.join_next().await {
            match joined {
                Ok((conn_id, Ok(Outcome::Completed))) => {
                    debug!("Connection {conn_id} finished naturally");
                }
                Ok((conn_id, Ok(Outcome::Cancelled))) => {
                    debug!("Connection {conn_id} stopped on request");
                }
                Ok((conn_id, Err(e))) => {
                    warn!("Connection {conn_id} error: {e}");
                }
                Err(e) => {
                    error!("Connection task panicked: {e}");
                }
            }
        }

        Report::new(counter.snapshot(), self.connections)
    }
}
