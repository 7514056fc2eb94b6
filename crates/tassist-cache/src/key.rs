use tassist_models::ToolArgs;

/// Build the canonical cache key for a (tool, arguments) pair.
///
/// `ToolArgs` is serde_json's default map, which serializes keys in sorted
/// order at every nesting level, so the same arguments produce the same key
/// regardless of construction order.
pub fn cache_key(tool: &str, args: &ToolArgs) -> String {
    let canonical =
        serde_json::to_string(args).unwrap_or_else(|_| "{}".to_string());
    format!("{tool}:{canonical}")
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn insertion_order_does_not_change_key() {
        let mut a = ToolArgs::new();
        a.insert("symbols".to_string(), json!(["AAPL"]));
        a.insert("analysis_type".to_string(), json!("technical"));

        let mut b = ToolArgs::new();
        b.insert("analysis_type".to_string(), json!("technical"));
        b.insert("symbols".to_string(), json!(["AAPL"]));

        assert_eq!(cache_key("get_market_data", &a), cache_key("get_market_data", &b));
    }

    #[test]
    fn nested_objects_are_canonical() {
        let mut a = ToolArgs::new();
        a.insert("portfolio_data".to_string(), json!({"b": 2, "a": 1}));

        let mut b = ToolArgs::new();
        b.insert("portfolio_data".to_string(), json!({"a": 1, "b": 2}));

        assert_eq!(
            cache_key("assess_portfolio_risk", &a),
            cache_key("assess_portfolio_risk", &b)
        );
    }

    #[test]
    fn different_tools_never_collide() {
        let args = ToolArgs::new();
        assert_ne!(
            cache_key("check_market_news", &args),
            cache_key("check_market_conditions", &args)
        );
    }

    #[test]
    fn key_embeds_tool_name_prefix() {
        let args = ToolArgs::new();
        assert_eq!(cache_key("check_market_news", &args), "check_market_news:{}");
    }
}
