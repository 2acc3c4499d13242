// ABOUTME: Test support utilities.
// ABOUTME: Provides a scripted describer and tracing setup for integration tests.

#![allow(dead_code)]

use async_trait::async_trait;
use chrono::{DateTime, Duration, TimeZone, Utc};
use rollout_stream::describe::{DeploymentDescription, ServiceEvent};
use rollout_stream::types::{ClusterId, EventId, ServiceId};
use rollout_stream::{DescribeError, ServiceDescriber, ServiceDescription};
use std::collections::VecDeque;
use std::io::Write;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex, Once};

static TRACING_INIT: Once = Once::new();

/// Initialize tracing for tests. Safe to call multiple times.
pub fn init_tracing() {
    TRACING_INIT.call_once(|| {
        use tracing_subscriber::EnvFilter;
        let filter =
            EnvFilter::from_default_env().add_directive("rollout_stream=debug".parse().unwrap());
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_test_writer()
            .try_init()
            .ok();
    });
}

/// Log output captured on the current thread until dropped.
pub struct CapturedLogs {
    buffer: SharedBuffer,
    _guard: tracing::subscriber::DefaultGuard,
}

impl CapturedLogs {
    pub fn contents(&self) -> String {
        String::from_utf8_lossy(&self.buffer.0.lock().unwrap()).into_owned()
    }
}

#[derive(Clone, Default)]
struct SharedBuffer(Arc<Mutex<Vec<u8>>>);

impl Write for SharedBuffer {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> std::io::Result<()> {
        Ok(())
    }
}

/// Route this thread's tracing events into a buffer. Requires the
/// current-thread runtime that `#[tokio::test]` uses by default.
pub fn capture_logs() -> CapturedLogs {
    let buffer = SharedBuffer::default();
    let writer = buffer.clone();
    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::new("rollout_stream=debug"))
        .with_ansi(false)
        .with_writer(move || writer.clone())
        .finish();
    CapturedLogs {
        buffer,
        _guard: tracing::subscriber::set_default(subscriber),
    }
}

/// Describer that replays queued responses in order and counts calls.
#[derive(Clone, Default)]
pub struct ScriptedDescriber {
    responses: Arc<Mutex<VecDeque<Result<ServiceDescription, DescribeError>>>>,
    calls: Arc<AtomicUsize>,
}

impl ScriptedDescriber {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn respond(self, deployments: Vec<DeploymentDescription>, events: Vec<ServiceEvent>) -> Self {
        self.push(Ok(ServiceDescription {
            deployments,
            events,
        }))
    }

    pub fn fail(self, err: DescribeError) -> Self {
        self.push(Err(err))
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    fn push(self, response: Result<ServiceDescription, DescribeError>) -> Self {
        self.responses.lock().unwrap().push_back(response);
        self
    }
}

#[async_trait]
impl ServiceDescriber for ScriptedDescriber {
    async fn describe(
        &self,
        _cluster: &ClusterId,
        _service: &ServiceId,
    ) -> Result<ServiceDescription, DescribeError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.responses
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Err(DescribeError::Request("no scripted response left".into())))
    }
}

pub const TASK_DEF: &str = "arn:aws:ecs:us-west-2:1111:task-definition/webapp-test-frontend:3";

pub fn created_at() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap()
}

pub fn deployment(status: &str, desired: u32, running: u32) -> DeploymentDescription {
    DeploymentDescription {
        status: status.to_string(),
        task_definition: TASK_DEF.to_string(),
        desired_count: desired,
        running_count: running,
        pending_count: desired.saturating_sub(running),
        failed_tasks: 0,
        rollout_state: if desired == running {
            "COMPLETED".to_string()
        } else {
            "IN_PROGRESS".to_string()
        },
    }
}

/// An event created `minutes` after the deployment (negative for before).
pub fn event(id: &str, message: &str, minutes: i64) -> ServiceEvent {
    ServiceEvent {
        id: EventId::new(id),
        message: message.to_string(),
        created_at: created_at() + Duration::minutes(minutes),
    }
}
