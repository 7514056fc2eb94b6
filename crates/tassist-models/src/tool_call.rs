use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Arguments passed to a tool handler.
///
/// Backed by serde_json's default map, which iterates keys in sorted order.
/// The cache layer depends on that ordering to build canonical keys.
pub type ToolArgs = serde_json::Map<String, serde_json::Value>;

/// A single tool invocation issued by the orchestrator.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ToolCall {
    pub tool: String,
    pub args: ToolArgs,
    pub request_id: Option<Uuid>,
}

impl ToolCall {
    pub fn new(tool: impl Into<String>, args: ToolArgs) -> Self {
        Self {
            tool: tool.into(),
            args,
            request_id: Some(Uuid::new_v4()),
        }
    }
}

/// Outcome category for a dispatched tool call.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum ToolStatus {
    Ok,
    Error,
    Timeout,
}

/// Result of one dispatched tool call. Every issued ToolCall produces
/// exactly one of these - success, typed error, or timeout.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ToolResult {
    pub tool: String,
    pub status: ToolStatus,
    pub payload: Option<serde_json::Value>,
    pub error: Option<String>,
    pub elapsed_ms: u64,
    pub from_cache: bool,
}

impl ToolResult {
    pub fn ok(tool: impl Into<String>, payload: serde_json::Value, elapsed_ms: u64) -> Self {
        Self {
            tool: tool.into(),
            status: ToolStatus::Ok,
            payload: Some(payload),
            error: None,
            elapsed_ms,
            from_cache: false,
        }
    }

    pub fn cached(tool: impl Into<String>, payload: serde_json::Value) -> Self {
        Self {
            tool: tool.into(),
            status: ToolStatus::Ok,
            payload: Some(payload),
            error: None,
            elapsed_ms: 0,
            from_cache: true,
        }
    }

    pub fn failed(tool: impl Into<String>, message: impl Into<String>, elapsed_ms: u64) -> Self {
        Self {
            tool: tool.into(),
            status: ToolStatus::Error,
            payload: None,
            error: Some(message.into()),
            elapsed_ms,
            from_cache: false,
        }
    }

    pub fn timed_out(tool: impl Into<String>, elapsed_ms: u64) -> Self {
        Self {
            tool: tool.into(),
            status: ToolStatus::Timeout,
            payload: None,
            error: Some("tool call exceeded its deadline".to_string()),
            elapsed_ms,
            from_cache: false,
        }
    }

    pub fn is_ok(&self) -> bool {
        self.status == ToolStatus::Ok
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_args() -> ToolArgs {
        let mut args = ToolArgs::new();
        args.insert(
            "symbols".to_string(),
            serde_json::json!(["AAPL", "SPY"]),
        );
        args.insert(
            "analysis_type".to_string(),
            serde_json::json!("technical"),
        );
        args
    }

    #[test]
    fn roundtrip_tool_call() {
        let call = ToolCall::new("get_market_data", sample_args());
        let json = serde_json::to_string(&call).unwrap();
        let deserialized: ToolCall = serde_json::from_str(&json).unwrap();
        assert_eq!(call, deserialized);
    }

    #[test]
    fn roundtrip_tool_result() {
        let result = ToolResult::ok(
            "check_market_news",
            serde_json::json!({"stories_found": 4}),
            120,
        );
        let json = serde_json::to_string(&result).unwrap();
        let deserialized: ToolResult = serde_json::from_str(&json).unwrap();
        assert_eq!(result, deserialized);
    }

    #[test]
    fn status_serialization() {
        assert_eq!(serde_json::to_string(&ToolStatus::Ok).unwrap(), "\"ok\"");
        assert_eq!(
            serde_json::to_string(&ToolStatus::Timeout).unwrap(),
            "\"timeout\""
        );
    }

    #[test]
    fn args_serialize_with_sorted_keys() {
        let json = serde_json::to_string(&sample_args()).unwrap();
        let analysis = json.find("analysis_type").unwrap();
        let symbols = json.find("symbols").unwrap();
        assert!(analysis < symbols);
    }

    #[test]
    fn failed_result_carries_message() {
        let result = ToolResult::failed("assess_portfolio_risk", "handler exploded", 10);
        assert_eq!(result.status, ToolStatus::Error);
        assert!(result.payload.is_none());
        assert_eq!(result.error.as_deref(), Some("handler exploded"));
        assert!(!result.is_ok());
    }

    #[test]
    fn cached_result_is_marked() {
        let result = ToolResult::cached("check_market_conditions", serde_json::json!({}));
        assert!(result.from_cache);
        assert!(result.is_ok());
    }
}
