use async_trait::async_trait;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::Rng;
use serde_json::json;
use tassist_models::ToolArgs;

use crate::error::ToolError;
use crate::registry::{AgentTool, ParamKind, ParamSpec, ToolSpec};

use super::{rng_for, round2, string_arg};

struct Story {
    headline: &'static str,
    source: &'static str,
    impact: &'static str,
    confidence: f64,
    summary: &'static str,
}

const STORIES: [Story; 6] = [
    Story {
        headline: "Fed Signals Rate Cut by Year-End Amid Economic Cooling",
        source: "Financial Times",
        impact: "bullish",
        confidence: 0.85,
        summary: "Federal Reserve officials indicate potential rate cuts as inflation cools.",
    },
    Story {
        headline: "Tech Giants Report Strong Q3 Earnings Beat Expectations",
        source: "Reuters",
        impact: "bullish",
        confidence: 0.92,
        summary: "Major tech companies exceed analyst expectations across the board.",
    },
    Story {
        headline: "Oil Prices Surge on OPEC+ Production Cut Announcement",
        source: "Bloomberg",
        impact: "mixed",
        confidence: 0.78,
        summary: "Unexpected production cuts push oil higher while raising recession fears.",
    },
    Story {
        headline: "China Manufacturing PMI Falls Below 50, Signals Contraction",
        source: "Wall Street Journal",
        impact: "bearish",
        confidence: 0.88,
        summary: "Chinese manufacturing contracts for a third month, pressuring global growth.",
    },
    Story {
        headline: "Breakthrough in AI Chips Announced by Major Semiconductor Firm",
        source: "TechCrunch",
        impact: "bullish",
        confidence: 0.72,
        summary: "New AI processor promises large efficiency gains, sparking a sector rally.",
    },
    Story {
        headline: "European Central Bank Holds Rates Steady, Dovish on Future Policy",
        source: "Financial Times",
        impact: "neutral",
        confidence: 0.65,
        summary: "ECB keeps rates unchanged but signals openness to cuts on weak data.",
    },
];

fn matches_focus(story: &Story, focus: &str) -> bool {
    let headline = story.headline.to_lowercase();
    match focus {
        "tech" | "technology" => headline.contains("tech") || headline.contains("ai"),
        "fed" | "rates" => headline.contains("fed") || headline.contains("rate"),
        "oil" | "energy" => headline.contains("oil") || headline.contains("opec"),
        "china" | "manufacturing" => {
            headline.contains("china") || headline.contains("manufacturing")
        }
        _ => false,
    }
}

/// Build the news payload: matching (or randomly sampled) stories plus an
/// aggregate sentiment read and recommendations.
pub fn generate(focus: Option<&str>, rng: &mut StdRng) -> serde_json::Value {
    let matched: Vec<&Story> = match focus {
        Some(f) => STORIES.iter().filter(|s| matches_focus(s, f)).collect(),
        None => vec![],
    };

    let stories: Vec<&Story> = if matched.is_empty() {
        let count = rng.gen_range(3..=5);
        let mut indices: Vec<usize> = (0..STORIES.len()).collect();
        indices.shuffle(rng);
        indices.truncate(count);
        indices.sort_unstable();
        indices.into_iter().map(|i| &STORIES[i]).collect()
    } else {
        matched
    };

    let bullish = stories.iter().filter(|s| s.impact == "bullish").count();
    let bearish = stories.iter().filter(|s| s.impact == "bearish").count();
    let neutral = stories.len() - bullish - bearish;

    let overall = if bullish > bearish + neutral {
        "bullish"
    } else if bearish > bullish {
        "bearish"
    } else {
        "neutral"
    };
    let confidence = if stories.is_empty() {
        0.5
    } else {
        round2(stories.iter().map(|s| s.confidence).sum::<f64>() / stories.len() as f64)
    };

    let recommendations = match overall {
        "bullish" => vec![
            "News flow is supportive; avoid chasing extended moves on headlines alone",
            "Watch for confirmation in price before adding exposure",
        ],
        "bearish" => vec![
            "Headline risk is elevated; tighten stops on open positions",
            "Avoid initiating new positions right before scheduled announcements",
        ],
        _ => vec![
            "No dominant news driver; let your trading plan lead, not headlines",
            "Keep position sizes normal until a clearer catalyst emerges",
        ],
    };

    json!({
        "stories_found": stories.len(),
        "market_sentiment": {
            "overall": overall,
            "confidence": confidence,
            "bullish_count": bullish,
            "bearish_count": bearish,
            "neutral_count": neutral,
        },
        "news_stories": stories.iter().map(|s| json!({
            "headline": s.headline,
            "source": s.source,
            "impact": s.impact,
            "confidence": s.confidence,
            "summary": s.summary,
        })).collect::<Vec<_>>(),
        "recommendations": recommendations,
    })
}

pub struct NewsTool {
    seed: Option<u64>,
}

impl NewsTool {
    pub const NAME: &'static str = "check_market_news";

    pub fn spec(seed: Option<u64>) -> ToolSpec {
        ToolSpec::new(
            Self::NAME,
            "Get latest market news and headlines that could affect trading decisions",
            &["news", "headlines", "announcement"],
            vec![
                ParamSpec::required(
                    "query",
                    ParamKind::String,
                    "Specific news query or 'latest' for general news",
                ),
                ParamSpec::optional(
                    "focus",
                    ParamKind::String,
                    "Optional focus area like 'tech', 'fed', 'oil'",
                ),
            ],
            std::sync::Arc::new(Self { seed }),
        )
    }
}

#[async_trait]
impl AgentTool for NewsTool {
    async fn call(&self, args: &ToolArgs) -> Result<serde_json::Value, ToolError> {
        let focus = string_arg(args, "focus");
        let mut rng = rng_for(self.seed, Self::NAME);
        Ok(generate(focus, &mut rng))
    }
}
