// ABOUTME: Deployment streamer that polls a service until its primary rollout is steady.
// ABOUTME: Collects deduplicated snapshots and fans them out to subscribed listeners.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use snafu::ResultExt;
use std::collections::VecDeque;
use std::time::Duration;
use tokio::sync::mpsc;

use super::done::{CompletionGate, DoneSignal};
use super::error::{FetchSnafu, StreamError};
use super::keywords::FailureKeywords;
use super::ledger::EventLedger;
use super::snapshot::{Deployment, Snapshot};
use super::traits::Streamer;
use crate::config::{StreamTarget, StreamerConfig};
use crate::describe::{ServiceDescriber, ServiceEvent};
use crate::diagnostics::{Diagnostics, Warning};

/// Receiving end handed out by [`DeploymentStreamer::subscribe`].
///
/// Yields `None` once the streamer is closed and every delivered snapshot
/// has been read.
pub type Listener = mpsc::Receiver<Snapshot>;

#[derive(Debug)]
struct Subscriber {
    index: usize,
    tx: mpsc::Sender<Snapshot>,
}

/// Streams snapshots of a rolling deployment until the primary rollout has
/// every desired task running.
///
/// The streamer starts no tasks of its own. A driver alternates [`collect`]
/// and [`publish`], waits until the instant `collect` returned, and stops
/// once [`done`] is signaled.
///
/// [`collect`]: DeploymentStreamer::collect
/// [`publish`]: DeploymentStreamer::publish
/// [`done`]: DeploymentStreamer::done
pub struct DeploymentStreamer<D> {
    describer: D,
    target: StreamTarget,
    keywords: FailureKeywords,
    fetch_interval: Duration,
    listener_capacity: usize,

    subscribers: Vec<Subscriber>,
    next_index: usize,
    closed: bool,
    gate: CompletionGate,
    ledger: EventLedger,
    pending: VecDeque<Snapshot>,
    // Listeners that already hold the front snapshot of `pending`.
    delivered: usize,
    diagnostics: Diagnostics,
}

impl<D: ServiceDescriber> DeploymentStreamer<D> {
    /// Create a streamer with the default configuration.
    pub fn new(describer: D, target: StreamTarget) -> Self {
        Self::with_config(describer, target, &StreamerConfig::default())
    }

    pub fn with_config(describer: D, target: StreamTarget, config: &StreamerConfig) -> Self {
        Self {
            describer,
            target,
            keywords: FailureKeywords::new(config.failure_keywords.clone()),
            fetch_interval: config.fetch_interval,
            listener_capacity: config.listener_capacity.max(1),
            subscribers: Vec::new(),
            next_index: 0,
            closed: false,
            gate: CompletionGate::new(),
            ledger: EventLedger::new(),
            pending: VecDeque::new(),
            delivered: 0,
            diagnostics: Diagnostics::default(),
        }
    }

    /// Register a new listener.
    ///
    /// The listener receives every snapshot published after this call. A
    /// listener registered after [`close`](Self::close) is returned already
    /// closed.
    pub fn subscribe(&mut self) -> Listener {
        let (tx, rx) = mpsc::channel(self.listener_capacity);
        if self.closed {
            tracing::debug!("subscribe after close, returning a closed listener");
            return rx;
        }

        self.subscribers.push(Subscriber {
            index: self.next_index,
            tx,
        });
        self.next_index += 1;
        rx
    }

    /// Describe the service once and buffer a snapshot of it.
    ///
    /// Returns the advisory instant for the next collect. If the describe call
    /// fails, nothing is recorded and the error is returned wrapped.
    ///
    /// # Panics
    ///
    /// Panics if the describer returns a malformed task definition identifier.
    pub async fn collect(&mut self) -> Result<DateTime<Utc>, StreamError> {
        let description = match self
            .describer
            .describe(&self.target.cluster, &self.target.service)
            .await
            .context(FetchSnafu {
                cluster: self.target.cluster.clone(),
                service: self.target.service.clone(),
            }) {
            Ok(description) => description,
            Err(e) => {
                tracing::warn!(error = %e, kind = ?e.kind(), "collect failed");
                return Err(e);
            }
        };

        let deployments: Vec<Deployment> = description
            .deployments
            .iter()
            .map(Deployment::from_description)
            .collect();

        if deployments.iter().any(|d| d.is_primary() && d.is_steady())
            && self.gate.signal()
        {
            tracing::info!(
                "Primary deployment of {} in {} reached its desired count",
                self.target.service,
                self.target.cluster
            );
        }

        let failure_events = self.record_new_events(&description.events);

        tracing::debug!(
            deployments = deployments.len(),
            failures = failure_events.len(),
            seen_events = self.ledger.len(),
            "collected service description"
        );

        self.pending.push_back(Snapshot::new(deployments, failure_events));
        Ok(self.next_collect_at())
    }

    /// Deliver buffered snapshots to every listener, in buffer order.
    ///
    /// Each send waits until that listener's channel has room. A listener that
    /// is not being read therefore holds up every listener registered after
    /// it; drivers using the default capacity of 1 must keep reading.
    ///
    /// A snapshot leaves the buffer only once every listener has accepted it.
    /// If the returned future is dropped part way, undelivered snapshots stay
    /// buffered and the next call resumes with the listeners that have not yet
    /// received the front snapshot. Listeners whose receiver was dropped are
    /// unregistered and reported in [`diagnostics`](Self::diagnostics).
    pub async fn publish(&mut self) {
        if self.pending.is_empty() {
            return;
        }

        loop {
            if self.delivered == 0 {
                self.prune_dropped();
            }
            let Some(snapshot) = self.pending.front() else {
                break;
            };

            while let Some(subscriber) = self.subscribers.get(self.delivered) {
                // A send only fails once the receiver is gone; it is pruned before the next snapshot.
                let _ = subscriber.tx.send(snapshot.clone()).await;
                self.delivered += 1;
            }

            self.pending.pop_front();
            self.delivered = 0;
        }
    }

    /// Close every listener. Snapshots already delivered stay readable.
    pub fn close(&mut self) {
        if self.closed {
            return;
        }
        if !self.pending.is_empty() {
            tracing::debug!(
                "closing with {} unpublished snapshot(s)",
                self.pending.len()
            );
        }
        self.subscribers.clear();
        self.delivered = 0;
        self.closed = true;
    }

    /// Gate signaled once the primary rollout is steady.
    pub fn done(&self) -> DoneSignal {
        self.gate.watch()
    }

    pub fn target(&self) -> &StreamTarget {
        &self.target
    }

    pub fn ledger(&self) -> &EventLedger {
        &self.ledger
    }

    /// Snapshots collected but not yet published.
    pub fn pending(&self) -> &VecDeque<Snapshot> {
        &self.pending
    }

    pub fn subscriber_count(&self) -> usize {
        self.subscribers.len()
    }

    pub fn diagnostics(&self) -> &Diagnostics {
        &self.diagnostics
    }

    fn prune_dropped(&mut self) {
        let diagnostics = &mut self.diagnostics;
        self.subscribers.retain(|subscriber| {
            let open = !subscriber.tx.is_closed();
            if !open {
                diagnostics.warn(Warning::listener_dropped(subscriber.index));
            }
            open
        });
    }

    // Events arrive newest first. Scanning stops at the first event older
    // than the deployment or already in the ledger; nothing past that point
    // is recorded.
    fn record_new_events(&mut self, events: &[ServiceEvent]) -> Vec<String> {
        let mut failures = Vec::new();
        for event in events {
            if event.created_at < self.target.deployment_created_at {
                break;
            }
            if self.ledger.contains(event.id.as_str()) {
                break;
            }
            if self.keywords.matches(&event.message) {
                failures.push(event.message.clone());
            }
            self.ledger.insert(event.id.clone());
        }
        failures
    }

    fn next_collect_at(&self) -> DateTime<Utc> {
        let now = Utc::now();
        chrono::Duration::from_std(self.fetch_interval)
            .ok()
            .and_then(|interval| now.checked_add_signed(interval))
            .unwrap_or(DateTime::<Utc>::MAX_UTC)
    }
}

#[async_trait]
impl<D: ServiceDescriber> Streamer for DeploymentStreamer<D> {
    async fn collect(&mut self) -> Result<DateTime<Utc>, StreamError> {
        DeploymentStreamer::collect(self).await
    }

    async fn publish(&mut self) {
        DeploymentStreamer::publish(self).await
    }

    fn close(&mut self) {
        DeploymentStreamer::close(self)
    }

    fn done(&self) -> DoneSignal {
        DeploymentStreamer::done(self)
    }
}
