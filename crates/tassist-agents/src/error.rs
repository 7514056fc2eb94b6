use thiserror::Error;

#[derive(Error, Debug)]
pub enum ToolError {
    #[error("duplicate tool name: {0}")]
    DuplicateName(String),

    #[error("unknown tool: {0}")]
    UnknownTool(String),

    #[error("tool execution failed: {0}")]
    Execution(String),

    #[error("language model request failed: {0}")]
    ExternalService(String),
}
