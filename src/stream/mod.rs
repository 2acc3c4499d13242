// ABOUTME: Rollout progress streaming: collect, deduplicate, and fan out snapshots.
// ABOUTME: Exports the deployment streamer, its snapshot types, and the Streamer trait.

mod done;
mod error;
mod keywords;
mod ledger;
mod snapshot;
mod streamer;
mod traits;

pub use done::DoneSignal;
pub use error::{StreamError, StreamErrorKind};
pub use keywords::FailureKeywords;
pub use ledger::EventLedger;
pub use snapshot::{Deployment, PRIMARY_STATUS, Snapshot};
pub use streamer::{DeploymentStreamer, Listener};
pub use traits::Streamer;
