use async_trait::async_trait;
use rand::rngs::StdRng;
use rand::Rng;
use serde_json::json;
use tassist_models::ToolArgs;

use crate::error::ToolError;
use crate::registry::{AgentTool, ParamKind, ParamSpec, ToolSpec};

use super::{rng_for, round2, string_arg};

/// Synthetic portfolio-risk assessment: an overall score, VaR and drawdown
/// estimates, and position-sizing guidance.
pub fn generate(analysis_focus: &str, rng: &mut StdRng) -> serde_json::Value {
    let risk_score = rng.gen_range(20..85);
    let value_at_risk_95_pct = round2(rng.gen_range(1.5..6.0));
    let max_drawdown_estimate_pct = round2(rng.gen_range(5.0..25.0));
    let max_position_pct = round2(rng.gen_range(3.0..10.0));
    let suggested_stop_loss_pct = round2(rng.gen_range(2.0..8.0));

    let risk_level = if risk_score >= 70 {
        "high"
    } else if risk_score >= 40 {
        "moderate"
    } else {
        "low"
    };

    let mut recommendations = vec![
        format!("Keep single positions under {max_position_pct}% of the portfolio"),
        format!("Place stops within {suggested_stop_loss_pct}% of entry"),
    ];
    if risk_level == "high" {
        recommendations.insert(
            0,
            "Overall exposure is elevated; reduce size before adding new positions".to_string(),
        );
    }

    json!({
        "analysis_focus": analysis_focus,
        "risk_score": risk_score,
        "risk_level": risk_level,
        "value_at_risk_95_pct": value_at_risk_95_pct,
        "max_drawdown_estimate_pct": max_drawdown_estimate_pct,
        "position_sizing": {
            "max_position_pct": max_position_pct,
            "suggested_stop_loss_pct": suggested_stop_loss_pct,
        },
        "recommendations": recommendations,
    })
}

pub struct RiskTool {
    seed: Option<u64>,
}

impl RiskTool {
    pub const NAME: &'static str = "assess_portfolio_risk";

    pub fn spec(seed: Option<u64>) -> ToolSpec {
        ToolSpec::new(
            Self::NAME,
            "Analyze portfolio risk, position sizing, and risk management recommendations",
            &["risk", "portfolio", "var", "drawdown"],
            vec![
                ParamSpec::required(
                    "analysis_focus",
                    ParamKind::String,
                    "'portfolio', 'position_sizing', 'var', or 'correlation'",
                ),
                ParamSpec::optional(
                    "portfolio_data",
                    ParamKind::Object,
                    "Optional portfolio positions data",
                ),
            ],
            std::sync::Arc::new(Self { seed }),
        )
    }
}

#[async_trait]
impl AgentTool for RiskTool {
    async fn call(&self, args: &ToolArgs) -> Result<serde_json::Value, ToolError> {
        let focus = string_arg(args, "analysis_focus").unwrap_or("portfolio");
        let mut rng = rng_for(self.seed, Self::NAME);
        Ok(generate(focus, &mut rng))
    }
}
