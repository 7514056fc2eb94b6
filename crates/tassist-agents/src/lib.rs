pub mod dispatcher;
pub mod error;
pub mod llm;
pub mod orchestrator;
pub mod prompts;
pub mod registry;
pub mod selector;
pub mod synthetic;

pub mod test_support;

pub use dispatcher::Dispatcher;
pub use error::ToolError;
pub use llm::{ChatMessage, ChatRequest, ChatRole, LlmClient, OpenAiClient};
pub use orchestrator::{default_args, Orchestrator};
pub use registry::{AgentTool, ParamKind, ParamSpec, ToolRegistry, ToolSpec};
pub use selector::Selector;
pub use synthetic::default_registry;
