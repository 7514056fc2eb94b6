use std::io::Write;
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tassist::profiles::ProfileStore;
use tassist_agents::{default_args, default_registry, ChatMessage, Dispatcher};
use tassist_cache::ToolCache;
use tassist_models::ToolCall;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "tassist", about = "AI trading assistant with synthetic agent tools")]
struct Cli {
    /// Path to configuration file
    #[arg(short, long, default_value = "config/tassist.toml")]
    config: String,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Interactive chat session with the assistant
    Interactive {
        /// User id for profile persistence
        #[arg(long, default_value = "default")]
        user: String,

        /// OpenAI API key (falls back to OPENAI_API_KEY)
        #[arg(long)]
        api_key: Option<String>,
    },

    /// Analyze a trading scenario directory containing sample_trades.csv
    Analyze {
        /// Scenario directory
        scenario: String,

        /// OpenAI API key
        api_key: String,

        /// User id for profile persistence
        #[arg(long, default_value = "default")]
        user: String,
    },

    /// One-shot query through the full tool pipeline
    OpenaiTools {
        /// OpenAI API key
        api_key: String,

        /// The question to ask
        query: String,
    },

    /// Run every registered tool with sample arguments and print the payloads
    DemoAgents,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing (respects RUST_LOG env var)
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let config = tassist::load_config(&cli.config)?;

    match cli.command {
        Command::Interactive { user, api_key } => interactive(&config, &user, api_key).await,
        Command::Analyze {
            scenario,
            api_key,
            user,
        } => analyze(&config, &scenario, api_key, &user).await,
        Command::OpenaiTools { api_key, query } => {
            let orchestrator = tassist::build_orchestrator(&config, Some(api_key))?;
            let answer = orchestrator.answer(&query, &[]).await?;
            println!("{answer}");
            Ok(())
        }
        Command::DemoAgents => demo_agents(&config).await,
    }
}

async fn interactive(
    config: &tassist_models::TassistConfig,
    user: &str,
    api_key: Option<String>,
) -> Result<()> {
    let orchestrator = tassist::build_orchestrator(config, api_key)?;
    let profiles = ProfileStore::new(&config.profiles.dir);
    let profile = profiles.load_or_create(user)?;

    println!("tassist interactive session (user: {})", profile.user_id);
    println!("Type a question, or 'quit' to exit.\n");

    let mut history: Vec<ChatMessage> = Vec::new();
    let mut turns = 0usize;
    let stdin = std::io::stdin();

    loop {
        print!("you> ");
        std::io::stdout().flush()?;

        let mut line = String::new();
        if stdin.read_line(&mut line)? == 0 {
            break;
        }
        let query = line.trim();
        if query.is_empty() {
            continue;
        }
        if query.eq_ignore_ascii_case("quit") || query.eq_ignore_ascii_case("exit") {
            break;
        }

        match orchestrator.answer(query, &history).await {
            Ok(answer) => {
                println!("\n{answer}\n");
                history.push(ChatMessage::user(query));
                history.push(ChatMessage::assistant(answer));
                turns += 1;
            }
            Err(e) => eprintln!("error: {e}"),
        }
    }

    if turns > 0 {
        profiles.record_session(user, &format!("Interactive session, {turns} questions"))?;
    }
    println!("Goodbye.");
    Ok(())
}

async fn analyze(
    config: &tassist_models::TassistConfig,
    scenario: &str,
    api_key: String,
    user: &str,
) -> Result<()> {
    let trades_path = std::path::Path::new(scenario).join("sample_trades.csv");
    let trades = std::fs::read_to_string(&trades_path)
        .with_context(|| format!("failed to read trade log: {}", trades_path.display()))?;

    let orchestrator = tassist::build_orchestrator(config, Some(api_key))?;
    let profiles = ProfileStore::new(&config.profiles.dir);
    profiles.load_or_create(user)?;

    let query = format!(
        "Analyze this trading history and point out risks, behavioral patterns, \
         and concrete improvements.\n\nTRADE LOG (CSV):\n{trades}"
    );
    let answer = orchestrator.answer(&query, &[]).await?;
    println!("{answer}");

    profiles.record_session(user, &format!("Analyzed scenario '{scenario}'"))?;
    Ok(())
}

/// Exercise every registered tool once, no model call and no key needed.
async fn demo_agents(config: &tassist_models::TassistConfig) -> Result<()> {
    let registry = Arc::new(default_registry(config.agents.seed)?);
    let cache = Arc::new(ToolCache::new(
        config.cache.max_capacity,
        Duration::from_secs(config.cache.ttl_seconds),
    ));
    let dispatcher = Dispatcher::new(Arc::clone(&registry), cache, &config.dispatch);

    let symbols = vec!["AAPL".to_string(), "SPY".to_string()];
    let calls: Vec<ToolCall> = registry
        .all()
        .iter()
        .map(|spec| ToolCall::new(spec.name.clone(), default_args(&spec.name, &symbols)))
        .collect();

    let results = dispatcher
        .dispatch(&calls)
        .await
        .map_err(|e| anyhow::anyhow!("dispatch failed: {e}"))?;

    for spec in registry.all() {
        let Some(result) = results.get(&spec.name) else {
            continue;
        };
        println!("=== {} ({:?}, {}ms)", spec.name, result.status, result.elapsed_ms);
        match &result.payload {
            Some(payload) => println!("{}\n", serde_json::to_string_pretty(payload)?),
            None => println!("{}\n", result.error.as_deref().unwrap_or("no payload")),
        }
    }
    Ok(())
}
