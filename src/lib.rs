// ABOUTME: Library root for rollout-stream.
// ABOUTME: Polls a service's rolling deployment and fans snapshots out to listeners.

pub mod config;
pub mod describe;
pub mod diagnostics;
pub mod error;
pub mod stream;
pub mod types;

pub use config::{StreamTarget, StreamerConfig};
pub use describe::{DescribeError, ServiceDescriber, ServiceDescription};
pub use stream::{DeploymentStreamer, DoneSignal, Listener, Snapshot, StreamError, Streamer};
