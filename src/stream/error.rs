// ABOUTME: Streamer error types with SNAFU pattern.
// ABOUTME: Wraps describe failures and exposes a kind for programmatic handling.

use snafu::Snafu;

use crate::describe::DescribeError;
use crate::types::{ClusterId, ServiceId};

/// Errors returned by a collect.
#[derive(Debug, Snafu)]
#[snafu(visibility(pub(crate)))]
pub enum StreamError {
    #[snafu(display("fetch service description for {service} in {cluster}: {source}"))]
    Fetch {
        cluster: ClusterId,
        service: ServiceId,
        source: DescribeError,
    },
}

/// Error kind for programmatic handling.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StreamErrorKind {
    /// The service or cluster does not exist.
    NotFound,
    /// The describer was rate limited.
    Throttled,
    /// Credentials were rejected.
    AccessDenied,
    /// Any other describe failure.
    Request,
}

impl StreamError {
    /// Returns the error kind for programmatic handling.
    pub fn kind(&self) -> StreamErrorKind {
        match self {
            StreamError::Fetch { source, .. } => match source {
                DescribeError::ServiceNotFound { .. } => StreamErrorKind::NotFound,
                DescribeError::Throttled(_) => StreamErrorKind::Throttled,
                DescribeError::AccessDenied(_) => StreamErrorKind::AccessDenied,
                DescribeError::Request(_) | DescribeError::Other(_) => StreamErrorKind::Request,
            },
        }
    }
}
