use tracing::debug;

use crate::registry::ToolRegistry;

/// Tickers the argument builder recognizes in query text.
pub const COMMON_SYMBOLS: [&str; 10] = [
    "AAPL", "MSFT", "GOOGL", "TSLA", "NVDA", "META", "AMZN", "SPY", "QQQ", "IWM",
];

const DEFAULT_SYMBOLS: [&str; 3] = ["SPY", "QQQ", "AAPL"];
const MAX_SYMBOLS: usize = 5;

/// Picks the subset of registered tools relevant to a free-text query.
///
/// Matching is a coarse keyword-substring test over the lowercased query;
/// false positives and negatives are acceptable by design. Against a
/// non-empty registry, a query always selects at least one tool: the default
/// subset when no keyword matches, or the first registered tool when the
/// defaults are not registered either.
pub struct Selector {
    default_tools: Vec<String>,
}

impl Default for Selector {
    fn default() -> Self {
        Self {
            default_tools: vec![
                "check_market_conditions".to_string(),
                "detect_trading_patterns".to_string(),
            ],
        }
    }
}

impl Selector {
    pub fn new(default_tools: Vec<String>) -> Self {
        Self { default_tools }
    }

    /// Returns selected tool names in registry order, without duplicates.
    pub fn select(&self, query: &str, registry: &ToolRegistry) -> Vec<String> {
        let query_lower = query.to_lowercase();

        let mut selected: Vec<String> = registry
            .all()
            .iter()
            .filter(|spec| spec.keywords.iter().any(|kw| query_lower.contains(kw.as_str())))
            .map(|spec| spec.name.clone())
            .collect();

        if selected.is_empty() {
            selected = self
                .default_tools
                .iter()
                .filter(|name| registry.contains(name))
                .cloned()
                .collect();
            debug!(query, "No keyword match, falling back to default tools");
        }

        // A registry without any of the default tools still gets one call.
        if selected.is_empty() {
            if let Some(first) = registry.all().first() {
                selected.push(first.name.clone());
            }
        }

        debug!(query, tools = ?selected, "Selected tools");
        selected
    }
}

/// Extract ticker symbols mentioned in the query, capped at five.
/// Falls back to a broad-market default set when none are mentioned.
pub fn extract_symbols(query: &str) -> Vec<String> {
    let query_upper = query.to_uppercase();

    let mut symbols: Vec<String> = COMMON_SYMBOLS
        .iter()
        .filter(|sym| query_upper.contains(*sym))
        .map(|sym| sym.to_string())
        .collect();

    if symbols.is_empty() {
        symbols = DEFAULT_SYMBOLS.iter().map(|s| s.to_string()).collect();
    }

    symbols.truncate(MAX_SYMBOLS);
    symbols
}
