// ABOUTME: Normalized rollout snapshots handed to listeners.
// ABOUTME: Converts raw deployment descriptions into Deployment records.

use crate::describe::DeploymentDescription;
use crate::types::parse_revision;
use serde::Serialize;

/// Status label carried by the rollout the service is converging towards.
pub const PRIMARY_STATUS: &str = "PRIMARY";

/// One rollout in a service's active deployment set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Deployment {
    pub status: String,
    pub task_def_revision: String,
    pub desired_count: u32,
    pub running_count: u32,
    pub failed_count: u32,
    pub pending_count: u32,
    pub rollout_state: String,
}

impl Deployment {
    /// Normalize a raw description.
    ///
    /// # Panics
    ///
    /// Panics if the task definition identifier is malformed; see [`parse_revision`].
    pub fn from_description(raw: &DeploymentDescription) -> Self {
        Self {
            status: raw.status.clone(),
            task_def_revision: parse_revision(&raw.task_definition).to_string(),
            desired_count: raw.desired_count,
            running_count: raw.running_count,
            failed_count: raw.failed_tasks,
            pending_count: raw.pending_count,
            rollout_state: raw.rollout_state.clone(),
        }
    }

    pub fn is_primary(&self) -> bool {
        self.status == PRIMARY_STATUS
    }

    /// All desired tasks are running.
    pub fn is_steady(&self) -> bool {
        self.desired_count == self.running_count
    }
}

/// One observation of a rollout.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Snapshot {
    deployments: Vec<Deployment>,
    failure_events: Vec<String>,
}

impl Snapshot {
    pub fn new(deployments: Vec<Deployment>, failure_events: Vec<String>) -> Self {
        Self {
            deployments,
            failure_events,
        }
    }

    /// Deployments in the order the describer returned them.
    pub fn deployments(&self) -> &[Deployment] {
        &self.deployments
    }

    /// Failure messages first seen in this poll, newest first.
    pub fn failure_events(&self) -> &[String] {
        &self.failure_events
    }

    pub fn primary(&self) -> Option<&Deployment> {
        self.deployments.iter().find(|d| d.is_primary())
    }

    /// The primary rollout has every desired task running.
    pub fn is_complete(&self) -> bool {
        self.deployments
            .iter()
            .any(|d| d.is_primary() && d.is_steady())
    }
}
