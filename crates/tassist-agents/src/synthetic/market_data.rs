use async_trait::async_trait;
use rand::rngs::StdRng;
use rand::Rng;
use serde_json::json;
use tassist_models::ToolArgs;

use crate::error::ToolError;
use crate::registry::{AgentTool, ParamKind, ParamSpec, ToolSpec};

use super::{rng_for, round2, string_arg, symbols_arg};

/// Reference prices the jitter is applied around.
fn base_price(symbol: &str) -> f64 {
    match symbol {
        "AAPL" => 178.0,
        "MSFT" => 412.0,
        "GOOGL" => 141.0,
        "TSLA" => 248.0,
        "NVDA" => 122.0,
        "META" => 510.0,
        "AMZN" => 186.0,
        "SPY" => 545.0,
        "QQQ" => 470.0,
        "IWM" => 215.0,
        _ => 100.0,
    }
}

fn quote(symbol: &str, rng: &mut StdRng) -> serde_json::Value {
    let change_percent = round2(rng.gen_range(-3.0..3.0));
    let price = round2(base_price(symbol) * (1.0 + change_percent / 100.0));
    let rsi_14 = round2(rng.gen_range(25.0..75.0));
    let sma_20 = round2(price * rng.gen_range(0.96..1.04));
    let volume: u64 = rng.gen_range(5_000_000..80_000_000);

    let trend = if change_percent > 0.5 && price > sma_20 {
        "uptrend"
    } else if change_percent < -0.5 && price < sma_20 {
        "downtrend"
    } else {
        "sideways"
    };

    let mut signals = Vec::new();
    if rsi_14 < 30.0 {
        signals.push(format!("{symbol} RSI {rsi_14} is oversold"));
    } else if rsi_14 > 70.0 {
        signals.push(format!("{symbol} RSI {rsi_14} is overbought"));
    }
    if price > sma_20 {
        signals.push(format!("{symbol} trading above its 20-day average"));
    } else {
        signals.push(format!("{symbol} trading below its 20-day average"));
    }

    let recommendation = if rsi_14 < 30.0 {
        "BUY"
    } else if rsi_14 > 70.0 {
        "SELL"
    } else {
        "HOLD"
    };

    json!({
        "price": price,
        "change_percent": change_percent,
        "volume": volume,
        "rsi_14": rsi_14,
        "sma_20": sma_20,
        "trend": trend,
        "signals": signals,
        "recommendation": recommendation,
    })
}

pub fn generate(symbols: &[String], analysis_type: &str, rng: &mut StdRng) -> serde_json::Value {
    let mut quotes = serde_json::Map::new();
    for symbol in symbols {
        quotes.insert(symbol.clone(), quote(symbol, rng));
    }

    json!({
        "analysis_type": analysis_type,
        "quotes": quotes,
    })
}

pub struct MarketDataTool {
    seed: Option<u64>,
}

impl MarketDataTool {
    pub const NAME: &'static str = "get_market_data";

    pub fn spec(seed: Option<u64>) -> ToolSpec {
        ToolSpec::new(
            Self::NAME,
            "Retrieve current market data, prices, and technical indicators",
            &["price", "data", "technical", "chart"],
            vec![
                ParamSpec::required(
                    "symbols",
                    ParamKind::StringArray,
                    "List of symbols to analyze (e.g. ['AAPL', 'SPY'])",
                ),
                ParamSpec::optional(
                    "analysis_type",
                    ParamKind::String,
                    "'prices', 'technical', or 'overview'",
                ),
            ],
            std::sync::Arc::new(Self { seed }),
        )
    }
}

#[async_trait]
impl AgentTool for MarketDataTool {
    async fn call(&self, args: &ToolArgs) -> Result<serde_json::Value, ToolError> {
        let symbols = symbols_arg(args);
        let analysis_type = string_arg(args, "analysis_type").unwrap_or("prices");
        let mut rng = rng_for(self.seed, Self::NAME);
        Ok(generate(&symbols, analysis_type, &mut rng))
    }
}
