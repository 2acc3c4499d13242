// ABOUTME: One-shot completion gate for a rollout.
// ABOUTME: Built on a watch channel so any number of tasks can observe the transition.

use tokio::sync::watch;

/// Write side of the gate, owned by the streamer.
#[derive(Debug)]
pub(crate) struct CompletionGate {
    tx: watch::Sender<bool>,
}

impl CompletionGate {
    pub(crate) fn new() -> Self {
        let (tx, _rx) = watch::channel(false);
        Self { tx }
    }

    /// Move the gate to signaled. Returns `true` only for the call that
    /// performed the transition; later calls leave it untouched.
    pub(crate) fn signal(&self) -> bool {
        self.tx.send_if_modified(|done| {
            if *done {
                false
            } else {
                *done = true;
                true
            }
        })
    }

    #[cfg(test)]
    pub(crate) fn is_signaled(&self) -> bool {
        *self.tx.borrow()
    }

    pub(crate) fn watch(&self) -> DoneSignal {
        DoneSignal {
            rx: self.tx.subscribe(),
        }
    }
}

/// Read side of the completion gate, returned by `done()`.
///
/// Once signaled it stays signaled. Cheap to clone and safe to await from a
/// task other than the one driving collects.
#[derive(Debug, Clone)]
pub struct DoneSignal {
    rx: watch::Receiver<bool>,
}

impl DoneSignal {
    /// Non-blocking check.
    pub fn is_done(&self) -> bool {
        *self.rx.borrow()
    }

    /// Wait until the rollout is complete.
    ///
    /// Returns `false` if the streamer was dropped without ever signaling.
    pub async fn wait(&self) -> bool {
        let mut rx = self.rx.clone();
        rx.wait_for(|done| *done).await.is_ok()
    }
}
