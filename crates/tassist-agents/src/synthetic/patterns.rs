use async_trait::async_trait;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::Rng;
use serde_json::json;
use tassist_models::ToolArgs;

use crate::error::ToolError;
use crate::registry::{AgentTool, ParamKind, ParamSpec, ToolSpec};

use super::{rng_for, round2, string_arg};

struct Pattern {
    name: &'static str,
    severity: &'static str,
    description: &'static str,
}

const PATTERNS: [Pattern; 6] = [
    Pattern {
        name: "revenge_trading",
        severity: "critical",
        description: "Re-entering immediately after a loss with increased size",
    },
    Pattern {
        name: "fomo_entries",
        severity: "high",
        description: "Buying into extended moves after the bulk of the run",
    },
    Pattern {
        name: "cutting_winners_early",
        severity: "medium",
        description: "Closing profitable trades well before the planned target",
    },
    Pattern {
        name: "averaging_down",
        severity: "high",
        description: "Adding to losing positions without a thesis change",
    },
    Pattern {
        name: "overtrading",
        severity: "medium",
        description: "Frequency of entries rises with volatility, not with edge",
    },
    Pattern {
        name: "position_size_creep",
        severity: "low",
        description: "Gradual unplanned increase in average position size",
    },
];

/// Synthetic behavioral-pattern report: a sample of detected anti-patterns
/// with severities, plus a discipline score and recommendations.
pub fn generate(analysis_type: &str, rng: &mut StdRng) -> serde_json::Value {
    let count = rng.gen_range(2..=4);
    let mut indices: Vec<usize> = (0..PATTERNS.len()).collect();
    indices.shuffle(rng);
    indices.truncate(count);
    indices.sort_unstable();

    let detected: Vec<serde_json::Value> = indices
        .iter()
        .map(|&i| {
            let p = &PATTERNS[i];
            json!({
                "name": p.name,
                "severity": p.severity,
                "description": p.description,
                "occurrences": rng.gen_range(1..8),
            })
        })
        .collect();

    let critical = detected
        .iter()
        .filter(|p| p["severity"] == "critical")
        .count();
    let discipline_score = round2(rng.gen_range(0.3..0.9));

    let mut recommendations = vec![
        "Write the exit plan before entry and log deviations".to_string(),
        "Review the last ten trades against your written rules weekly".to_string(),
    ];
    if critical > 0 {
        recommendations.insert(
            0,
            "A critical pattern was detected; pause live trading until it is addressed".to_string(),
        );
    }

    json!({
        "analysis_type": analysis_type,
        "detected_patterns": detected,
        "critical_patterns": critical,
        "discipline_score": discipline_score,
        "recommendations": recommendations,
    })
}

pub struct PatternTool {
    seed: Option<u64>,
}

impl PatternTool {
    pub const NAME: &'static str = "detect_trading_patterns";

    pub fn spec(seed: Option<u64>) -> ToolSpec {
        ToolSpec::new(
            Self::NAME,
            "Analyze trading behavior for psychological patterns and anti-patterns",
            &["pattern", "psychology", "bias", "fomo"],
            vec![
                ParamSpec::required(
                    "analysis_type",
                    ParamKind::String,
                    "'comprehensive', 'behavioral', or 'specific'",
                ),
                ParamSpec::optional(
                    "pattern_focus",
                    ParamKind::String,
                    "Specific pattern name or 'all'",
                ),
            ],
            std::sync::Arc::new(Self { seed }),
        )
    }
}

#[async_trait]
impl AgentTool for PatternTool {
    async fn call(&self, args: &ToolArgs) -> Result<serde_json::Value, ToolError> {
        let analysis_type = string_arg(args, "analysis_type").unwrap_or("comprehensive");
        let mut rng = rng_for(self.seed, Self::NAME);
        Ok(generate(analysis_type, &mut rng))
    }
}
