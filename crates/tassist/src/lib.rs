//! tassist - Trading Assistant
//!
//! A CLI trading assistant that answers free-text market questions. A
//! keyword selector picks relevant synthetic agent tools, a bounded
//! dispatcher runs them concurrently behind a TTL cache, and the folded
//! tool output goes to an OpenAI-compatible model as one chat request.
//!
//! # Library Usage
//!
//! ```rust,no_run
//! use tassist::models::config::TassistConfig;
//!
//! # async fn run() -> anyhow::Result<()> {
//! let config = TassistConfig::default();
//! let orchestrator = tassist::build_orchestrator(&config, None)?;
//! let answer = orchestrator.answer("How is AAPL doing?", &[]).await?;
//! println!("{answer}");
//! # Ok(())
//! # }
//! ```

pub use tassist_agents as agents;
pub use tassist_cache as cache;
pub use tassist_models as models;

pub mod profiles;

use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use tassist_agents::{default_registry, Dispatcher, OpenAiClient, Orchestrator, Selector};
use tassist_cache::ToolCache;
use tassist_models::config::TassistConfig;

/// Build an Orchestrator from configuration.
///
/// The API key falls back to `OPENAI_API_KEY`; having neither is a setup
/// error.
pub fn build_orchestrator(
    config: &TassistConfig,
    api_key: Option<String>,
) -> Result<Orchestrator, anyhow::Error> {
    let api_key = match api_key {
        Some(key) => key,
        None => std::env::var("OPENAI_API_KEY")
            .context("no API key given and OPENAI_API_KEY is not set")?,
    };

    let registry = Arc::new(
        default_registry(config.agents.seed).context("failed to build tool registry")?,
    );
    let cache = Arc::new(ToolCache::new(
        config.cache.max_capacity,
        Duration::from_secs(config.cache.ttl_seconds),
    ));
    let dispatcher = Dispatcher::new(Arc::clone(&registry), cache, &config.dispatch);
    let llm = Arc::new(
        OpenAiClient::new(api_key, config.llm.clone())
            .context("failed to build language-model client")?,
    );

    Ok(Orchestrator::new(
        registry,
        Selector::default(),
        dispatcher,
        llm,
    ))
}

/// Load configuration from a TOML file, or defaults when the file is absent.
/// A file that exists but does not parse is an error, not a silent default.
pub fn load_config(path: &str) -> Result<TassistConfig, anyhow::Error> {
    match std::fs::read_to_string(path) {
        Ok(text) => {
            toml::from_str(&text).with_context(|| format!("failed to parse config: {path}"))
        }
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(TassistConfig::default()),
        Err(e) => Err(e).with_context(|| format!("failed to read config: {path}")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_config_file_uses_defaults() {
        let config = load_config("/nonexistent/tassist.toml").unwrap();
        assert_eq!(config, TassistConfig::default());
    }

    #[test]
    fn unparseable_config_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("tassist.toml");
        std::fs::write(&path, "[llm\nmodel =").unwrap();

        let err = load_config(path.to_str().unwrap()).unwrap_err();
        assert!(err.to_string().contains("failed to parse config"));
    }

    #[test]
    fn config_file_overrides_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("tassist.toml");
        std::fs::write(&path, "[dispatch]\nmax_in_flight = 2\n").unwrap();

        let config = load_config(path.to_str().unwrap()).unwrap();
        assert_eq!(config.dispatch.max_in_flight, 2);
        assert_eq!(config.cache.ttl_seconds, 600);
    }
}
