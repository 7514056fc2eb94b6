use serde::{Deserialize, Serialize};

/// Top-level configuration for tassist.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct TassistConfig {
    pub llm: LlmConfig,
    pub dispatch: DispatchConfig,
    pub cache: CacheConfig,
    pub profiles: ProfileConfig,
    pub agents: AgentsConfig,
}

/// Configuration for the external chat-completions call.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct LlmConfig {
    pub model: String,
    /// Base URL of an OpenAI-compatible API.
    pub api_base: String,
    pub max_completion_tokens: u32,
    pub temperature: f64,
    pub request_timeout_seconds: u64,
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            model: "gpt-4.1".to_string(),
            api_base: "https://api.openai.com/v1".to_string(),
            max_completion_tokens: 1500,
            temperature: 1.0,
            request_timeout_seconds: 60,
        }
    }
}

/// Configuration for the concurrent tool dispatcher.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct DispatchConfig {
    /// Maximum number of tool handlers running at once.
    pub max_in_flight: usize,
    /// Per-call deadline in seconds.
    pub call_timeout_seconds: u64,
    /// Deadline for the whole dispatch batch in seconds.
    pub batch_timeout_seconds: u64,
}

impl Default for DispatchConfig {
    fn default() -> Self {
        Self {
            max_in_flight: 4,
            call_timeout_seconds: 8,
            batch_timeout_seconds: 20,
        }
    }
}

/// Configuration for the tool-result cache.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct CacheConfig {
    /// Maximum number of cached tool results.
    pub max_capacity: u64,
    /// How long a cached result stays valid, in seconds.
    pub ttl_seconds: u64,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            max_capacity: 10_000,
            ttl_seconds: 600,
        }
    }
}

/// Where per-user profile JSON files live.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct ProfileConfig {
    pub dir: String,
}

impl Default for ProfileConfig {
    fn default() -> Self {
        Self {
            dir: "data/user_profiles".to_string(),
        }
    }
}

/// Configuration for the synthetic agent tools.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct AgentsConfig {
    /// Seed for the synthetic data generators. None = fresh entropy per call.
    pub seed: Option<u64>,
}
