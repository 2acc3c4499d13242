// ABOUTME: Task definition resource identifier parsing.
// ABOUTME: Extracts family and revision from arn:...:task-definition/<family>:<revision>.

use std::fmt;
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum TaskDefinitionArnError {
    #[error("task definition identifier has no '/' separated family segment: {0}")]
    MissingFamily(String),

    #[error("task definition identifier has no ':' separated revision: {0}")]
    MissingRevision(String),
}

/// A task definition identifier split into its family and revision parts.
///
/// Splitting follows the describer's shape exactly: the second `/` segment
/// holds `<family>:<revision>`, and the revision is the second `:` component
/// of that segment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskDefinitionArn {
    raw: String,
    family: String,
    revision: String,
}

impl TaskDefinitionArn {
    pub fn parse(input: &str) -> Result<Self, TaskDefinitionArnError> {
        let (family, revision) = split_family_revision(input)?;
        Ok(Self {
            raw: input.to_string(),
            family: family.to_string(),
            revision: revision.to_string(),
        })
    }

    pub fn family(&self) -> &str {
        &self.family
    }

    pub fn revision(&self) -> &str {
        &self.revision
    }

    pub fn as_str(&self) -> &str {
        &self.raw
    }
}

impl fmt::Display for TaskDefinitionArn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.raw)
    }
}

/// Returns the revision of a task definition identifier.
///
/// For example, `"arn:aws:ecs:us-west-2:1111:task-definition/webapp-test-frontend:3"`
/// yields `"3"`.
///
/// # Panics
///
/// Panics if the identifier lacks a `/` separated family segment or that
/// segment lacks a `:` separated revision. Describers must hand back well-formed
/// identifiers; continuing with a corrupted revision would misreport the rollout.
pub fn parse_revision(arn: &str) -> &str {
    match split_family_revision(arn) {
        Ok((_, revision)) => revision,
        Err(e) => panic!("describer returned a malformed task definition: {e}"),
    }
}

fn split_family_revision(input: &str) -> Result<(&str, &str), TaskDefinitionArnError> {
    let segment = input
        .split('/')
        .nth(1)
        .ok_or_else(|| TaskDefinitionArnError::MissingFamily(input.to_string()))?;

    let mut parts = segment.split(':');
    let family = parts.next().unwrap_or_default();
    let revision = parts
        .next()
        .ok_or_else(|| TaskDefinitionArnError::MissingRevision(input.to_string()))?;

    Ok((family, revision))
}
