// ABOUTME: The deployment a streamer watches.
// ABOUTME: Cluster, service, and the instant the deployment was created.

use crate::types::{ClusterId, ServiceId};
use chrono::{DateTime, Utc};
use serde::Deserialize;

/// Identifies a single rollout. Fixed for the lifetime of a streamer.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct StreamTarget {
    pub cluster: ClusterId,
    pub service: ServiceId,
    /// Events created strictly before this instant belong to earlier rollouts.
    pub deployment_created_at: DateTime<Utc>,
}

impl StreamTarget {
    pub fn new(
        cluster: impl Into<String>,
        service: impl Into<String>,
        deployment_created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            cluster: ClusterId::new(cluster),
            service: ServiceId::new(service),
            deployment_created_at,
        }
    }
}
