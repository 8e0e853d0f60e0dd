//! Concurrent SSE load client.
//!
//! Opens many Server-Sent Events (SSE) connections against a single
//! endpoint, counts the `data:` events each connection receives over a
//! fixed wall-clock window, then cancels the stragglers and reports
//! aggregated per-connection counts.
//!
//! # Architecture
//!
//! - **One task per connection**: each connection is an independent tokio
//!   task holding a long-lived streaming GET. A failure in one connection
//!   never aborts the others.
//! - **Timed run with cooperative cancellation**: the harness sleeps for
//!   the configured duration, then cancels a shared token. Every reader
//!   races its next network read against the token, so cancellation is
//!   observed at the next suspension point and the connection is released.
//! - **Join before read**: per-connection counts live in a shared map
//!   written by at most one reader per key; the harness snapshots the map
//!   only after every task has reached a terminal state.
//! - **Errors stay local**: transport failures and unparseable payloads
//!   are logged with the connection id and swallowed, so the aggregation
//!   step always runs.
//!
//! # Modules
//!
//! - `counter`: lazily-populated per-connection event counts
//! - `sse_client`: StreamReader, line reassembly, and `data:` line parsing
//! - `harness`: fan-out, timed cancellation, and aggregation
//! - `output`: the run report and its console rendering

pub mod counter;
pub mod harness;
pub mod output;
pub mod sse_client;

pub use harness::Harness;
pub use output::Report;
