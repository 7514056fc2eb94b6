//! Synthetic agent tools.
//!
//! Each tool fabricates fixed-shape market data for one topic. Handlers are
//! stateless; the only variation comes from a per-call RNG, which is seeded
//! from `AgentsConfig::seed` when deterministic output is wanted.

pub mod comprehensive;
pub mod conditions;
pub mod market_data;
pub mod news;
pub mod patterns;
pub mod risk;
pub mod sentiment;

use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};

use rand::rngs::StdRng;
use rand::SeedableRng;
use tassist_models::ToolArgs;

use crate::error::ToolError;
use crate::registry::ToolRegistry;

/// Build an RNG for one tool invocation. A configured seed is mixed with the
/// tool name so different tools still produce different data.
pub(crate) fn rng_for(seed: Option<u64>, tool: &str) -> StdRng {
    match seed {
        Some(seed) => {
            let mut hasher = DefaultHasher::new();
            tool.hash(&mut hasher);
            StdRng::seed_from_u64(seed ^ hasher.finish())
        }
        None => StdRng::from_entropy(),
    }
}

pub(crate) fn string_arg<'a>(args: &'a ToolArgs, name: &str) -> Option<&'a str> {
    args.get(name).and_then(|v| v.as_str())
}

/// The `symbols` argument, falling back to the broad-market defaults.
pub(crate) fn symbols_arg(args: &ToolArgs) -> Vec<String> {
    let symbols: Vec<String> = args
        .get("symbols")
        .and_then(|v| v.as_array())
        .map(|arr| {
            arr.iter()
                .filter_map(|v| v.as_str())
                .map(|s| s.to_uppercase())
                .collect()
        })
        .unwrap_or_default();

    if symbols.is_empty() {
        vec!["SPY".to_string(), "QQQ".to_string(), "AAPL".to_string()]
    } else {
        symbols
    }
}

pub(crate) fn round2(x: f64) -> f64 {
    (x * 100.0).round() / 100.0
}

/// Register all seven synthetic tools in their fixed order.
pub fn default_registry(seed: Option<u64>) -> Result<ToolRegistry, ToolError> {
    let mut registry = ToolRegistry::new();
    registry.register(news::NewsTool::spec(seed))?;
    registry.register(market_data::MarketDataTool::spec(seed))?;
    registry.register(sentiment::SentimentTool::spec(seed))?;
    registry.register(risk::RiskTool::spec(seed))?;
    registry.register(patterns::PatternTool::spec(seed))?;
    registry.register(comprehensive::ComprehensiveTool::spec(seed))?;
    registry.register(conditions::ConditionsTool::spec(seed))?;
    Ok(registry)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_registry_has_seven_tools() {
        let registry = default_registry(None).unwrap();
        assert_eq!(registry.len(), 7);

        let names: Vec<&str> = registry.all().iter().map(|s| s.name.as_str()).collect();
        assert_eq!(
            names,
            vec![
                "check_market_news",
                "get_market_data",
                "analyze_market_sentiment",
                "assess_portfolio_risk",
                "detect_trading_patterns",
                "get_comprehensive_analysis",
                "check_market_conditions",
            ]
        );
    }

    #[test]
    fn every_tool_has_keywords() {
        let registry = default_registry(None).unwrap();
        for spec in registry.all() {
            assert!(!spec.keywords.is_empty(), "{} has no keywords", spec.name);
        }
    }

    #[test]
    fn seeded_rng_is_reproducible() {
        use rand::Rng;
        let a: u64 = rng_for(Some(7), "check_market_news").gen();
        let b: u64 = rng_for(Some(7), "check_market_news").gen();
        let c: u64 = rng_for(Some(7), "get_market_data").gen();
        assert_eq!(a, b);
        assert_ne!(a, c);
    }

    #[test]
    fn symbols_arg_defaults() {
        let args = ToolArgs::new();
        assert_eq!(symbols_arg(&args), vec!["SPY", "QQQ", "AAPL"]);
    }

    #[test]
    fn symbols_arg_uppercases() {
        let mut args = ToolArgs::new();
        args.insert("symbols".to_string(), serde_json::json!(["aapl", "Tsla"]));
        assert_eq!(symbols_arg(&args), vec!["AAPL", "TSLA"]);
    }
}
