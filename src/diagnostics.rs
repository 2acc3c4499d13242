// ABOUTME: Diagnostics accumulator for non-fatal warnings while streaming.
// ABOUTME: Collects problems that must not fail a publish but should be visible to callers.

/// Collects non-fatal warnings raised while streaming a rollout.
#[derive(Debug, Default)]
pub struct Diagnostics {
    warnings: Vec<Warning>,
}

impl Diagnostics {
    /// Record a warning, auto-logging it via tracing.
    pub fn warn(&mut self, warning: Warning) {
        tracing::warn!("{}", warning.message);
        self.warnings.push(warning);
    }

    /// Get all collected warnings.
    pub fn warnings(&self) -> &[Warning] {
        &self.warnings
    }

    /// Check if any warnings were collected.
    pub fn has_warnings(&self) -> bool {
        !self.warnings.is_empty()
    }
}

/// A non-fatal warning collected while streaming.
#[derive(Debug, Clone)]
pub struct Warning {
    pub kind: WarningKind,
    pub message: String,
}

impl Warning {
    /// Create a warning for a listener whose receiving end went away.
    pub fn listener_dropped(index: usize) -> Self {
        Self {
            kind: WarningKind::ListenerDropped,
            message: format!("listener #{index} was dropped before receiving a snapshot"),
        }
    }
}

/// Categories of warnings that can occur while streaming.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WarningKind {
    /// A listener's receiver was dropped; snapshots for it were discarded.
    ListenerDropped,
}
