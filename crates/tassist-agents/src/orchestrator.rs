use std::collections::BTreeMap;
use std::sync::Arc;
use std::time::Instant;

use serde_json::json;
use tassist_models::{ToolArgs, ToolCall, ToolResult, ToolStatus};
use tracing::info;

use crate::dispatcher::Dispatcher;
use crate::error::ToolError;
use crate::llm::{ChatMessage, ChatRequest, LlmClient};
use crate::prompts;
use crate::registry::ToolRegistry;
use crate::selector::{extract_symbols, Selector};

/// Composes the pipeline: select tools, dispatch them, fold the results into
/// a context block, and make the single external language-model call.
///
/// All collaborators are injected at construction so tests can run isolated
/// instances with mock tools and a mock model.
pub struct Orchestrator {
    registry: Arc<ToolRegistry>,
    selector: Selector,
    dispatcher: Dispatcher,
    llm: Arc<dyn LlmClient>,
}

impl Orchestrator {
    pub fn new(
        registry: Arc<ToolRegistry>,
        selector: Selector,
        dispatcher: Dispatcher,
        llm: Arc<dyn LlmClient>,
    ) -> Self {
        Self {
            registry,
            selector,
            dispatcher,
            llm,
        }
    }

    pub fn registry(&self) -> &ToolRegistry {
        &self.registry
    }

    /// Answer a user query, given the prior conversation turns.
    /// Returns the model's text verbatim.
    pub async fn answer(
        &self,
        query: &str,
        history: &[ChatMessage],
    ) -> Result<String, ToolError> {
        let start = Instant::now();

        let selected = self.selector.select(query, &self.registry);
        let calls = self.build_calls(query, &selected);
        info!(query, tools = ?selected, "Starting analysis");

        let results = self.dispatcher.dispatch(&calls).await?;
        let context = self.format_context(&results);

        let mut messages = history.to_vec();
        messages.push(ChatMessage::user(format!("{query}\n\n{context}")));
        let request = ChatRequest {
            system: prompts::system_prompt().to_string(),
            messages,
        };

        let answer = self.llm.complete(&request).await?;

        info!(
            tools = calls.len(),
            elapsed_ms = start.elapsed().as_millis(),
            "Analysis complete"
        );
        Ok(answer)
    }

    /// Build concrete calls for the selected tools, deriving arguments from
    /// the query heuristically (mentioned tickers, default analysis modes).
    pub fn build_calls(&self, query: &str, selected: &[String]) -> Vec<ToolCall> {
        let symbols = extract_symbols(query);

        selected
            .iter()
            .map(|name| ToolCall::new(name.clone(), default_args(name, &symbols)))
            .collect()
    }

    /// Render every result (including failures, labeled as such) into one
    /// deterministic context block, ordered by tool registration.
    pub fn format_context(&self, results: &BTreeMap<String, ToolResult>) -> String {
        let mut block = String::from("## TOOL RESULTS\n");

        for spec in self.registry.all() {
            let Some(result) = results.get(&spec.name) else {
                continue;
            };

            match result.status {
                ToolStatus::Ok => {
                    let label = if result.from_cache { "ok, cached" } else { "ok" };
                    let payload = result
                        .payload
                        .as_ref()
                        .map(|p| serde_json::to_string_pretty(p).unwrap_or_else(|_| p.to_string()))
                        .unwrap_or_else(|| "null".to_string());
                    block.push_str(&format!("\n### {} ({label})\n{payload}\n", spec.name));
                }
                ToolStatus::Error => {
                    let message = result.error.as_deref().unwrap_or("unknown error");
                    block.push_str(&format!("\n### {} (error)\n{message}\n", spec.name));
                }
                ToolStatus::Timeout => {
                    block.push_str(&format!(
                        "\n### {} (timeout)\ntool did not respond before its deadline\n",
                        spec.name
                    ));
                }
            }
        }

        block
    }
}

/// Default arguments for one of the built-in tools. Custom tools (and
/// check_market_conditions) take none.
pub fn default_args(tool: &str, symbols: &[String]) -> ToolArgs {
    let mut args = ToolArgs::new();
    match tool {
        "check_market_news" => {
            args.insert("query".to_string(), json!("latest"));
        }
        "get_market_data" => {
            args.insert("symbols".to_string(), json!(symbols));
            args.insert("analysis_type".to_string(), json!("technical"));
        }
        "analyze_market_sentiment" => {
            args.insert("symbols".to_string(), json!(symbols));
            args.insert("sentiment_type".to_string(), json!("comprehensive"));
        }
        "assess_portfolio_risk" => {
            args.insert("analysis_focus".to_string(), json!("portfolio"));
        }
        "detect_trading_patterns" => {
            args.insert("analysis_type".to_string(), json!("comprehensive"));
        }
        "get_comprehensive_analysis" => {
            args.insert("symbols".to_string(), json!(symbols));
        }
        _ => {}
    }
    args
}
