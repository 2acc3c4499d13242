// ABOUTME: Streamer trait for drivers that alternate collecting and publishing.
// ABOUTME: Lets a polling loop be written once for any kind of progress streamer.

use super::done::DoneSignal;
use super::error::StreamError;
use async_trait::async_trait;
use chrono::{DateTime, Utc};

/// A source of progress snapshots driven by an external polling loop.
///
/// Drivers call `collect` then `publish`, sleep until the returned instant,
/// and stop once `done()` is signaled, finishing with `close`.
#[async_trait]
pub trait Streamer: Send {
    /// Fetch and buffer one observation. Returns when the next collect should run.
    async fn collect(&mut self) -> Result<DateTime<Utc>, StreamError>;

    /// Deliver buffered observations to listeners.
    async fn publish(&mut self);

    /// Tell listeners nothing more will arrive.
    fn close(&mut self);

    /// Gate signaled once there is nothing left to collect.
    fn done(&self) -> DoneSignal;
}
