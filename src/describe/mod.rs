// ABOUTME: Describe-service collaborator trait and the raw description it returns.
// ABOUTME: Clients for the orchestrator API implement ServiceDescriber.

use crate::types::{ClusterId, EventId, ServiceId};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use thiserror::Error;

/// Retrieves the current state of a managed service.
///
/// Implemented outside this crate by whatever client talks to the
/// orchestrator. The streamer calls it once per collect and never retries.
#[async_trait]
pub trait ServiceDescriber: Send + Sync {
    /// Describe `service` running in `cluster`.
    async fn describe(
        &self,
        cluster: &ClusterId,
        service: &ServiceId,
    ) -> Result<ServiceDescription, DescribeError>;
}

#[async_trait]
impl<D: ServiceDescriber + ?Sized> ServiceDescriber for std::sync::Arc<D> {
    async fn describe(
        &self,
        cluster: &ClusterId,
        service: &ServiceId,
    ) -> Result<ServiceDescription, DescribeError> {
        (**self).describe(cluster, service).await
    }
}

/// Raw service description as handed back by the describer.
#[derive(Debug, Clone, Default)]
pub struct ServiceDescription {
    /// Active rollouts, in the order the describer returned them.
    pub deployments: Vec<DeploymentDescription>,
    /// Service events, newest first.
    pub events: Vec<ServiceEvent>,
}

/// One rollout in the service's active deployment set.
#[derive(Debug, Clone)]
pub struct DeploymentDescription {
    pub status: String,
    /// Full task definition identifier, e.g.
    /// `arn:aws:ecs:us-west-2:1111:task-definition/webapp:3`.
    pub task_definition: String,
    pub desired_count: u32,
    pub running_count: u32,
    pub pending_count: u32,
    pub failed_tasks: u32,
    pub rollout_state: String,
}

/// A service event message.
#[derive(Debug, Clone)]
pub struct ServiceEvent {
    pub id: EventId,
    pub message: String,
    pub created_at: DateTime<Utc>,
}

/// Errors surfaced by a describer.
#[derive(Debug, Error)]
pub enum DescribeError {
    #[error("service {service} not found in cluster {cluster}")]
    ServiceNotFound { cluster: String, service: String },

    #[error("request throttled: {0}")]
    Throttled(String),

    #[error("access denied: {0}")]
    AccessDenied(String),

    #[error("describe request failed: {0}")]
    Request(String),

    #[error(transparent)]
    Other(#[from] Box<dyn std::error::Error + Send + Sync>),
}
