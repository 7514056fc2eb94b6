//! End-to-end orchestration over scripted tools and a mock language model:
//! selection feeds dispatch, tool output lands in the model prompt, and a
//! warm cache replays the same context bit for bit.

use std::sync::Arc;
use std::time::Duration;

use tassist_agents::test_support::{FailingLlm, MockLlm, StaticTool};
use tassist_agents::{
    ChatMessage, Dispatcher, Orchestrator, Selector, ToolError, ToolRegistry, ToolSpec,
};
use tassist_cache::ToolCache;
use tassist_models::config::DispatchConfig;

fn build(specs: Vec<ToolSpec>, llm: Arc<dyn tassist_agents::LlmClient>) -> Orchestrator {
    let mut registry = ToolRegistry::new();
    for spec in specs {
        registry.register(spec).unwrap();
    }
    let registry = Arc::new(registry);
    let cache = Arc::new(ToolCache::new(100, Duration::from_secs(600)));
    let dispatcher = Dispatcher::new(Arc::clone(&registry), cache, &DispatchConfig::default());
    Orchestrator::new(registry, Selector::default(), dispatcher, llm)
}

fn market_specs() -> Vec<ToolSpec> {
    vec![
        StaticTool::spec(
            "check_market_news",
            &["news", "market"],
            serde_json::json!({"marker": "NEWS_PAYLOAD", "stories_found": 4}),
        ),
        StaticTool::spec(
            "get_market_data",
            &["price", "market"],
            serde_json::json!({"marker": "DATA_PAYLOAD", "trend": "bullish"}),
        ),
        StaticTool::spec(
            "check_market_conditions",
            &["condition"],
            serde_json::json!({"marker": "CONDITIONS_PAYLOAD"}),
        ),
        StaticTool::spec(
            "detect_trading_patterns",
            &["pattern"],
            serde_json::json!({"marker": "PATTERNS_PAYLOAD"}),
        ),
    ]
}

/// The user turn sent to the model: query, blank line, tool context.
fn prompt_of(llm: &MockLlm) -> String {
    let request = llm.last_request().expect("model was called");
    request.messages.last().expect("has a user turn").content.clone()
}

#[tokio::test]
async fn tool_payloads_reach_the_model_prompt() {
    let llm = Arc::new(MockLlm::new("Markets look steady."));
    let orchestrator = build(market_specs(), Arc::clone(&llm) as Arc<dyn tassist_agents::LlmClient>);

    let answer = orchestrator
        .answer("What's the market doing for AAPL today?", &[])
        .await
        .unwrap();
    assert_eq!(answer, "Markets look steady.");

    // "market" matches both the news and data tools; their payloads must
    // both appear in the prompt, and unselected tools must not.
    let prompt = prompt_of(&llm);
    assert!(prompt.starts_with("What's the market doing for AAPL today?"));
    assert!(prompt.contains("## TOOL RESULTS"));
    assert!(prompt.contains("NEWS_PAYLOAD"));
    assert!(prompt.contains("DATA_PAYLOAD"));
    assert!(!prompt.contains("PATTERNS_PAYLOAD"));
}

#[tokio::test]
async fn nonsense_query_runs_the_default_tools() {
    let llm = Arc::new(MockLlm::new("ok"));
    let orchestrator = build(market_specs(), Arc::clone(&llm) as Arc<dyn tassist_agents::LlmClient>);

    orchestrator.answer("asdfqwerty", &[]).await.unwrap();

    let prompt = prompt_of(&llm);
    assert!(prompt.contains("CONDITIONS_PAYLOAD"));
    assert!(prompt.contains("PATTERNS_PAYLOAD"));
    assert!(!prompt.contains("NEWS_PAYLOAD"));
}

#[tokio::test]
async fn warm_cache_replays_identical_context() {
    let llm = Arc::new(MockLlm::new("ok"));
    let orchestrator = build(market_specs(), Arc::clone(&llm) as Arc<dyn tassist_agents::LlmClient>);

    let query = "Any news on the market and AAPL price?";

    // First call populates the cache; its context carries plain "ok" labels.
    orchestrator.answer(query, &[]).await.unwrap();
    let cold = prompt_of(&llm);

    // Second and third calls replay cached payloads.
    orchestrator.answer(query, &[]).await.unwrap();
    let warm_first = prompt_of(&llm);
    orchestrator.answer(query, &[]).await.unwrap();
    let warm_second = prompt_of(&llm);

    assert!(warm_first.contains("(ok, cached)"));
    assert_eq!(warm_first, warm_second);
    assert_ne!(cold, warm_first, "labels distinguish fresh from cached");
}

#[tokio::test]
async fn history_precedes_the_current_turn() {
    let llm = Arc::new(MockLlm::new("ok"));
    let orchestrator = build(market_specs(), Arc::clone(&llm) as Arc<dyn tassist_agents::LlmClient>);

    let history = vec![
        ChatMessage::user("What about TSLA?"),
        ChatMessage::assistant("TSLA is volatile this week."),
    ];
    orchestrator
        .answer("And market conditions now?", &history)
        .await
        .unwrap();

    let request = llm.last_request().unwrap();
    assert_eq!(request.messages.len(), 3);
    assert_eq!(request.messages[0].content, "What about TSLA?");
    assert_eq!(request.messages[1].content, "TSLA is volatile this week.");
    assert!(request.messages[2].content.starts_with("And market conditions now?"));
}

#[tokio::test]
async fn model_failure_propagates_as_external_service_error() {
    let orchestrator = build(market_specs(), Arc::new(FailingLlm));

    let err = orchestrator
        .answer("market check", &[])
        .await
        .unwrap_err();
    assert!(matches!(err, ToolError::ExternalService(_)));
}
