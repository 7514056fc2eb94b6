use std::collections::BTreeMap;
use std::sync::Arc;
use std::time::Duration;

use tassist_cache::{cache_key, ToolCache};
use tassist_models::config::DispatchConfig;
use tassist_models::{ToolCall, ToolResult};
use tokio::sync::Semaphore;
use tokio::time::{timeout, timeout_at, Instant};
use tracing::{debug, info, warn};

use crate::error::ToolError;
use crate::registry::{AgentTool, ToolRegistry};

/// Executes a batch of tool calls concurrently with cache short-circuiting.
///
/// Concurrency is bounded by `max_in_flight` permits; each call gets its own
/// deadline and the whole batch gets another. Per-call failures and timeouts
/// are captured as `ToolResult`s, never propagated - one bad tool must not
/// abort its siblings.
pub struct Dispatcher {
    registry: Arc<ToolRegistry>,
    cache: Arc<ToolCache>,
    max_in_flight: usize,
    call_timeout: Duration,
    batch_timeout: Duration,
}

impl Dispatcher {
    pub fn new(registry: Arc<ToolRegistry>, cache: Arc<ToolCache>, config: &DispatchConfig) -> Self {
        Self {
            registry,
            cache,
            max_in_flight: config.max_in_flight.max(1),
            call_timeout: Duration::from_secs(config.call_timeout_seconds),
            batch_timeout: Duration::from_secs(config.batch_timeout_seconds),
        }
    }

    /// Run every call and return one result per call, keyed by tool name.
    ///
    /// Referencing an unregistered tool is a programming error and fails the
    /// whole batch; everything else becomes per-tool result data.
    pub async fn dispatch(
        &self,
        calls: &[ToolCall],
    ) -> Result<BTreeMap<String, ToolResult>, ToolError> {
        let mut results = BTreeMap::new();

        // Resolve handlers up front so an unknown name surfaces before any
        // handler runs.
        let mut to_execute: Vec<(ToolCall, String, Arc<dyn AgentTool>)> = Vec::new();
        for call in calls {
            let spec = self.registry.lookup(&call.tool)?;
            to_execute.push((call.clone(), cache_key(&call.tool, &call.args), Arc::clone(&spec.handler)));
        }

        // Partition into cache hits and misses.
        let mut misses = Vec::new();
        for (call, key, handler) in to_execute {
            match self.cache.get(&key).await {
                Some(payload) => {
                    debug!(tool = %call.tool, "Cache hit");
                    results.insert(call.tool.clone(), ToolResult::cached(&call.tool, payload));
                }
                None => misses.push((call, key, handler)),
            }
        }

        if misses.is_empty() {
            return Ok(results);
        }

        info!(
            total = calls.len(),
            hits = results.len(),
            executing = misses.len(),
            "Dispatching tool batch"
        );

        let semaphore = Arc::new(Semaphore::new(self.max_in_flight));
        let deadline = Instant::now() + self.batch_timeout;

        let mut handles = Vec::new();
        for (call, key, handler) in misses {
            let semaphore = Arc::clone(&semaphore);
            let cache = Arc::clone(&self.cache);
            let call_timeout = self.call_timeout;
            let tool = call.tool.clone();

            let handle = tokio::spawn(async move {
                let permit = match semaphore.acquire_owned().await {
                    Ok(permit) => permit,
                    Err(_) => {
                        return ToolResult::failed(&call.tool, "dispatcher shut down", 0);
                    }
                };

                let start = Instant::now();
                let result = match timeout(call_timeout, handler.call(&call.args)).await {
                    Ok(Ok(payload)) => {
                        cache.insert(key, &payload).await;
                        ToolResult::ok(&call.tool, payload, start.elapsed().as_millis() as u64)
                    }
                    Ok(Err(e)) => {
                        warn!(tool = %call.tool, error = %e, "Tool handler failed");
                        ToolResult::failed(&call.tool, e.to_string(), start.elapsed().as_millis() as u64)
                    }
                    Err(_) => {
                        warn!(tool = %call.tool, timeout_s = call_timeout.as_secs(), "Tool call timed out");
                        ToolResult::timed_out(&call.tool, start.elapsed().as_millis() as u64)
                    }
                };

                drop(permit);
                result
            });
            handles.push((tool, handle));
        }

        // Collect under the batch deadline. Tasks still pending when it
        // expires are aborted and reported as timeouts so the batch never
        // blocks indefinitely.
        for (tool, mut handle) in handles {
            match timeout_at(deadline, &mut handle).await {
                Ok(Ok(result)) => {
                    results.insert(tool, result);
                }
                Ok(Err(join_err)) => {
                    warn!(tool = %tool, error = %join_err, "Tool task panicked");
                    results.insert(
                        tool.clone(),
                        ToolResult::failed(&tool, format!("tool task panicked: {join_err}"), 0),
                    );
                }
                Err(_) => {
                    handle.abort();
                    warn!(tool = %tool, "Batch deadline reached before tool settled");
                    results.insert(
                        tool.clone(),
                        ToolResult::timed_out(&tool, self.batch_timeout.as_millis() as u64),
                    );
                }
            }
        }

        Ok(results)
    }
}
