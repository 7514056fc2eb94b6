pub mod config;
pub mod profile;
pub mod tool_call;
pub mod trade_log;

pub use config::{
    AgentsConfig, CacheConfig, DispatchConfig, LlmConfig, ProfileConfig, TassistConfig,
};
pub use profile::{SessionRecord, UserProfile};
pub use tool_call::{ToolArgs, ToolCall, ToolResult, ToolStatus};
pub use trade_log::{TradeAction, TradeRecord};
