//! Test support: scripted tool handlers and a mock language model.
//!
//! Used by the unit and integration suites to exercise the dispatcher and
//! orchestrator without synthetic-data randomness or a network call.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use tassist_models::ToolArgs;

use crate::error::ToolError;
use crate::llm::{ChatRequest, LlmClient};
use crate::registry::{AgentTool, ToolSpec};

/// Returns a fixed payload on every call.
pub struct StaticTool {
    payload: serde_json::Value,
}

impl StaticTool {
    pub fn spec(name: &str, keywords: &[&str], payload: serde_json::Value) -> ToolSpec {
        ToolSpec::new(
            name,
            format!("{name} (static test tool)"),
            keywords,
            vec![],
            Arc::new(Self { payload }),
        )
    }
}

#[async_trait]
impl AgentTool for StaticTool {
    async fn call(&self, _args: &ToolArgs) -> Result<serde_json::Value, ToolError> {
        Ok(self.payload.clone())
    }
}

/// Echoes its arguments back as the payload.
pub struct EchoTool;

impl EchoTool {
    pub fn spec(name: &str) -> ToolSpec {
        ToolSpec::new(
            name,
            format!("{name} (echo test tool)"),
            &["echo"],
            vec![],
            Arc::new(Self),
        )
    }
}

#[async_trait]
impl AgentTool for EchoTool {
    async fn call(&self, args: &ToolArgs) -> Result<serde_json::Value, ToolError> {
        Ok(serde_json::json!({ "echo": args }))
    }
}

/// Always fails with an execution error.
pub struct FailingTool;

impl FailingTool {
    pub fn spec(name: &str) -> ToolSpec {
        ToolSpec::new(
            name,
            format!("{name} (failing test tool)"),
            &["fail"],
            vec![],
            Arc::new(Self),
        )
    }
}

#[async_trait]
impl AgentTool for FailingTool {
    async fn call(&self, _args: &ToolArgs) -> Result<serde_json::Value, ToolError> {
        Err(ToolError::Execution("synthetic failure".to_string()))
    }
}

/// Sleeps for a fixed duration before answering; used for deadline tests.
pub struct SleepyTool {
    duration: Duration,
}

impl SleepyTool {
    pub fn spec(name: &str, duration: Duration) -> ToolSpec {
        ToolSpec::new(
            name,
            format!("{name} (slow test tool)"),
            &["slow"],
            vec![],
            Arc::new(Self { duration }),
        )
    }
}

#[async_trait]
impl AgentTool for SleepyTool {
    async fn call(&self, _args: &ToolArgs) -> Result<serde_json::Value, ToolError> {
        tokio::time::sleep(self.duration).await;
        Ok(serde_json::json!({ "slept_ms": self.duration.as_millis() as u64 }))
    }
}

/// Panics on every call; used to verify the dispatcher survives a
/// crashing handler task.
pub struct PanickingTool;

impl PanickingTool {
    pub fn spec(name: &str) -> ToolSpec {
        ToolSpec::new(
            name,
            format!("{name} (panicking test tool)"),
            &["panic"],
            vec![],
            Arc::new(Self),
        )
    }
}

#[async_trait]
impl AgentTool for PanickingTool {
    async fn call(&self, _args: &ToolArgs) -> Result<serde_json::Value, ToolError> {
        panic!("synthetic panic");
    }
}

/// Counts its invocations; used to observe cache short-circuiting.
pub struct CountingTool {
    counter: Arc<AtomicUsize>,
}

impl CountingTool {
    #[allow(clippy::new_without_default)]
    pub fn new() -> Self {
        Self {
            counter: Arc::new(AtomicUsize::new(0)),
        }
    }

    pub fn counter(&self) -> Arc<AtomicUsize> {
        Arc::clone(&self.counter)
    }

    pub fn spec(self, name: &str) -> ToolSpec {
        ToolSpec::new(
            name,
            format!("{name} (counting test tool)"),
            &["count"],
            vec![],
            Arc::new(self),
        )
    }
}

#[async_trait]
impl AgentTool for CountingTool {
    async fn call(&self, _args: &ToolArgs) -> Result<serde_json::Value, ToolError> {
        let n = self.counter.fetch_add(1, Ordering::SeqCst) + 1;
        Ok(serde_json::json!({ "invocation": n }))
    }
}

/// Mock language model that records the last request and returns a canned
/// reply.
pub struct MockLlm {
    reply: String,
    last_request: Mutex<Option<ChatRequest>>,
}

impl MockLlm {
    pub fn new(reply: impl Into<String>) -> Self {
        Self {
            reply: reply.into(),
            last_request: Mutex::new(None),
        }
    }

    /// The most recent request, if any.
    pub fn last_request(&self) -> Option<ChatRequest> {
        self.last_request.lock().ok().and_then(|g| g.clone())
    }
}

#[async_trait]
impl LlmClient for MockLlm {
    async fn complete(&self, request: &ChatRequest) -> Result<String, ToolError> {
        if let Ok(mut guard) = self.last_request.lock() {
            *guard = Some(request.clone());
        }
        Ok(self.reply.clone())
    }
}

/// Mock language model that always fails, for ExternalService propagation
/// tests.
pub struct FailingLlm;

#[async_trait]
impl LlmClient for FailingLlm {
    async fn complete(&self, _request: &ChatRequest) -> Result<String, ToolError> {
        Err(ToolError::ExternalService("model unavailable".to_string()))
    }
}
