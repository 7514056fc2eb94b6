use async_trait::async_trait;
use serde_json::json;
use tassist_models::ToolArgs;

use crate::error::ToolError;
use crate::registry::{AgentTool, ParamKind, ParamSpec, ToolSpec};

use super::{market_data, news, rng_for, risk, sentiment, symbols_arg};

/// Multi-topic synthesis built from the sibling generators in-process, so
/// the dispatcher never re-enters itself for a nested batch.
pub fn generate(symbols: &[String], seed: Option<u64>) -> serde_json::Value {
    let news_part = news::generate(None, &mut rng_for(seed, "comprehensive/news"));
    let market_part = market_data::generate(
        symbols,
        "overview",
        &mut rng_for(seed, "comprehensive/market_data"),
    );
    let sentiment_part = sentiment::generate(
        symbols,
        "comprehensive",
        &mut rng_for(seed, "comprehensive/sentiment"),
    );
    let risk_part = risk::generate("portfolio", &mut rng_for(seed, "comprehensive/risk"));

    let overall_sentiment = sentiment_part["market_regime"]["regime"]
        .as_str()
        .unwrap_or("neutral")
        .to_string();

    let mut key_insights = Vec::new();
    if let Some(stories) = news_part["stories_found"].as_u64() {
        key_insights.push(format!("{stories} relevant news stories in play"));
    }
    if let Some(level) = risk_part["risk_level"].as_str() {
        key_insights.push(format!("portfolio risk currently reads {level}"));
    }

    json!({
        "symbols": symbols,
        "news": news_part,
        "market_data": market_part,
        "sentiment": sentiment_part,
        "risk": risk_part,
        "synthesis": {
            "overall_sentiment": overall_sentiment,
            "key_insights": key_insights,
        },
    })
}

pub struct ComprehensiveTool {
    seed: Option<u64>,
}

impl ComprehensiveTool {
    pub const NAME: &'static str = "get_comprehensive_analysis";

    pub fn spec(seed: Option<u64>) -> ToolSpec {
        ToolSpec::new(
            Self::NAME,
            "Run comprehensive analysis combining news, market data, sentiment, and risk",
            &["comprehensive", "complete", "detailed"],
            vec![ParamSpec::required(
                "symbols",
                ParamKind::StringArray,
                "Symbols to analyze comprehensively",
            )],
            std::sync::Arc::new(Self { seed }),
        )
    }
}

#[async_trait]
impl AgentTool for ComprehensiveTool {
    async fn call(&self, args: &ToolArgs) -> Result<serde_json::Value, ToolError> {
        let symbols = symbols_arg(args);
        Ok(generate(&symbols, self.seed))
    }
}
