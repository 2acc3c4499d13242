// ABOUTME: Type-safe identifiers and parsed resource identifiers.
// ABOUTME: Uses phantom types to keep cluster, service, and event IDs apart.

mod id;
mod task_definition;

pub use id::{ClusterId, EventId, Id, ServiceId};
pub use task_definition::{TaskDefinitionArn, TaskDefinitionArnError, parse_revision};
