use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use tassist_models::ToolArgs;

use crate::error::ToolError;

/// A tool handler. Implementations are stateless; any randomness comes from
/// an explicit seed supplied at construction.
#[async_trait]
pub trait AgentTool: Send + Sync {
    async fn call(&self, args: &ToolArgs) -> Result<serde_json::Value, ToolError>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParamKind {
    String,
    StringArray,
    Object,
}

/// One parameter in a tool's schema.
#[derive(Clone)]
pub struct ParamSpec {
    pub name: &'static str,
    pub kind: ParamKind,
    pub required: bool,
    pub description: &'static str,
}

impl ParamSpec {
    pub fn required(name: &'static str, kind: ParamKind, description: &'static str) -> Self {
        Self {
            name,
            kind,
            required: true,
            description,
        }
    }

    pub fn optional(name: &'static str, kind: ParamKind, description: &'static str) -> Self {
        Self {
            name,
            kind,
            required: false,
            description,
        }
    }
}

/// A registered tool: name, human description, declarative trigger keywords,
/// parameter schema, and handler. Immutable after registration.
#[derive(Clone)]
pub struct ToolSpec {
    pub name: String,
    pub description: String,
    /// Trigger keywords the selector matches against the query text,
    /// kept separate from the description so selection is a pure set test.
    pub keywords: Vec<String>,
    pub params: Vec<ParamSpec>,
    pub handler: Arc<dyn AgentTool>,
}

impl ToolSpec {
    pub fn new(
        name: impl Into<String>,
        description: impl Into<String>,
        keywords: &[&str],
        params: Vec<ParamSpec>,
        handler: Arc<dyn AgentTool>,
    ) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            keywords: keywords.iter().map(|k| k.to_string()).collect(),
            params,
            handler,
        }
    }
}

impl std::fmt::Debug for ToolSpec {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ToolSpec")
            .field("name", &self.name)
            .field("keywords", &self.keywords)
            .finish_non_exhaustive()
    }
}

/// Static mapping from tool name to spec, built once at startup.
///
/// Iteration follows registration order so selection tie-breaks and context
/// formatting are deterministic.
#[derive(Default)]
pub struct ToolRegistry {
    specs: Vec<ToolSpec>,
    index: HashMap<String, usize>,
}

impl ToolRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&mut self, spec: ToolSpec) -> Result<(), ToolError> {
        if self.index.contains_key(&spec.name) {
            return Err(ToolError::DuplicateName(spec.name));
        }
        self.index.insert(spec.name.clone(), self.specs.len());
        self.specs.push(spec);
        Ok(())
    }

    pub fn lookup(&self, name: &str) -> Result<&ToolSpec, ToolError> {
        self.index
            .get(name)
            .map(|&i| &self.specs[i])
            .ok_or_else(|| ToolError::UnknownTool(name.to_string()))
    }

    pub fn contains(&self, name: &str) -> bool {
        self.index.contains_key(name)
    }

    /// All specs in registration order.
    pub fn all(&self) -> &[ToolSpec] {
        &self.specs
    }

    pub fn len(&self) -> usize {
        self.specs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.specs.is_empty()
    }
}
