//! Schema-bound agent execution on top of a pluggable text generator
//!
//! An [`Agent`] is a name, an instruction text and a set of tool grants, bound to one
//! [`StructuredOutput`] type. Running it sends the prompt to a [`TextGenerator`],
//! then validates the raw reply against the output type's JSON Schema and its own
//! field rules before handing back the typed value.

use std::marker::PhantomData;
use std::time::Instant;

use async_trait::async_trait;
use jsonschema::JSONSchema;
use serde::de::DeserializeOwned;
use serde_json::Value;
use thiserror::Error;

use persona_hearing_sdk::{log_agent_complete, log_agent_failed, log_agent_start};

use crate::workflow_utils::json::{extract_json, preview};
use crate::workflow_utils::validation::ValidationError;

/// Errors produced while invoking an agent
#[derive(Debug, Clone, PartialEq, Error)]
pub enum AgentError {
    /// The remote capability could not be reached or reported a failure
    #[error("{agent} invocation failed: {message}")]
    Invocation { agent: String, message: String },

    /// The remote capability replied, but not with a value of the expected shape
    #[error("{agent} returned output that does not match `{schema}`: {details}")]
    SchemaValidation {
        agent: String,
        schema: String,
        details: String,
    },
}

impl AgentError {
    pub fn invocation(agent: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Invocation {
            agent: agent.into(),
            message: message.into(),
        }
    }

    fn schema(agent: &str, schema: &str, details: impl Into<String>) -> Self {
        Self::SchemaValidation {
            agent: agent.to_string(),
            schema: schema.to_string(),
            details: details.into(),
        }
    }
}

/// Side capabilities an agent may expose to the model
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToolGrant {
    /// Hosted web search. Best effort: the model may or may not use it.
    WebSearch,
}

/// Target structured-output format for one request
#[derive(Debug, Clone, Copy)]
pub struct OutputFormat<'a> {
    pub name: &'a str,
    pub schema: &'a Value,
    pub strict: bool,
}

/// Everything a backend needs to perform one generation
#[derive(Debug, Clone, Copy)]
pub struct GenerationRequest<'a> {
    pub agent_name: &'a str,
    pub instructions: &'a str,
    pub prompt: &'a str,
    pub output: OutputFormat<'a>,
    pub tools: &'a [ToolGrant],
}

/// Remote text-generation capability
///
/// Implementations return the model's raw reply text. Validation of that text is
/// done by [`Agent::run`], never by the backend.
#[async_trait]
pub trait TextGenerator: Send + Sync {
    async fn generate(&self, request: &GenerationRequest<'_>) -> Result<String, AgentError>;
}

/// A typed value an agent can be asked to produce
pub trait StructuredOutput: DeserializeOwned + Send {
    /// Schema name sent with structured-output requests
    const NAME: &'static str;

    /// Whether the backend should ask for strict schema enforcement.
    /// Schemas with optional fields or free-form maps must opt out.
    const STRICT: bool = true;

    /// JSON Schema document describing the wire shape
    fn json_schema() -> Value;

    /// Rules the JSON Schema cannot express
    fn validate(&self) -> Result<(), ValidationError> {
        Ok(())
    }
}

/// Parameters for a single agent run
#[derive(Debug, Clone)]
pub struct AgentInvocation {
    /// Task ID this invocation belongs to
    pub task_id: String,
    /// Description of what the agent is doing (for logging)
    pub description: String,
    /// Prompt to send to the agent
    pub prompt: String,
}

impl AgentInvocation {
    pub fn new(
        task_id: impl Into<String>,
        description: impl Into<String>,
        prompt: impl Into<String>,
    ) -> Self {
        Self {
            task_id: task_id.into(),
            description: description.into(),
            prompt: prompt.into(),
        }
    }
}

/// A named, instructed, schema-bound capability
pub struct Agent<T> {
    name: String,
    instructions: String,
    tools: Vec<ToolGrant>,
    _output: PhantomData<fn() -> T>,
}

impl<T: StructuredOutput> Agent<T> {
    pub fn new(name: impl Into<String>, instructions: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            instructions: instructions.into(),
            tools: Vec::new(),
            _output: PhantomData,
        }
    }

    /// Grant a side capability to the model
    pub fn with_tool(mut self, tool: ToolGrant) -> Self {
        if !self.tools.contains(&tool) {
            self.tools.push(tool);
        }
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn instructions(&self) -> &str {
        &self.instructions
    }

    pub fn tools(&self) -> &[ToolGrant] {
        &self.tools
    }

    /// Invoke the agent and return a validated value
    ///
    /// Handles agent start/complete/failed logging. Transport and remote failures
    /// surface as [`AgentError::Invocation`]; anything wrong with the reply itself
    /// surfaces as [`AgentError::SchemaValidation`].
    pub async fn run(
        &self,
        generator: &dyn TextGenerator,
        invocation: AgentInvocation,
    ) -> Result<T, AgentError> {
        log_agent_start!(&invocation.task_id, &self.name, &invocation.description);

        let started = Instant::now();
        let schema = T::json_schema();
        let request = GenerationRequest {
            agent_name: &self.name,
            instructions: &self.instructions,
            prompt: &invocation.prompt,
            output: OutputFormat {
                name: T::NAME,
                schema: &schema,
                strict: T::STRICT,
            },
            tools: &self.tools,
        };

        tracing::debug!(
            agent = %self.name,
            task_id = %invocation.task_id,
            prompt_chars = invocation.prompt.chars().count(),
            "invoking agent"
        );

        let result = match generator.generate(&request).await {
            Ok(raw) => parse_structured::<T>(&self.name, &raw),
            Err(e) => Err(e),
        };

        let elapsed = started.elapsed().as_secs_f64();
        match &result {
            Ok(_) => {
                tracing::debug!(agent = %self.name, elapsed_secs = elapsed, "agent completed");
                log_agent_complete!(
                    &invocation.task_id,
                    &self.name,
                    format!("Completed in {:.1}s", elapsed)
                );
            }
            Err(e) => {
                tracing::warn!(agent = %self.name, error = %e, "agent failed");
                log_agent_failed!(&invocation.task_id, &self.name, e.to_string());
            }
        }

        result
    }
}

/// Validate a raw model reply and convert it into `T`
///
/// Steps: parse JSON (stripping code fences only when the reply is not plain
/// JSON), check against `T::json_schema()`, deserialize, then apply `T::validate()`.
pub fn parse_structured<T: StructuredOutput>(agent_name: &str, raw: &str) -> Result<T, AgentError> {
    let instance: Value = match serde_json::from_str(raw.trim()) {
        Ok(instance) => instance,
        Err(_) => {
            let text = extract_json(raw);
            serde_json::from_str(&text).map_err(|e| {
                AgentError::schema(
                    agent_name,
                    T::NAME,
                    format!("reply is not valid JSON ({}): {}", e, preview(&text, 200)),
                )
            })?
        }
    };

    let schema = T::json_schema();
    let compiled = JSONSchema::compile(&schema).map_err(|e| {
        AgentError::schema(agent_name, T::NAME, format!("schema does not compile: {}", e))
    })?;

    let violations: Vec<String> = match compiled.validate(&instance) {
        Ok(()) => Vec::new(),
        Err(errors) => errors
            .map(|e| {
                let path = e.instance_path.to_string();
                if path.is_empty() {
                    e.to_string()
                } else {
                    format!("{}: {}", path, e)
                }
            })
            .collect(),
    };
    if !violations.is_empty() {
        return Err(AgentError::schema(agent_name, T::NAME, violations.join("; ")));
    }

    let value: T = serde_json::from_value(instance)
        .map_err(|e| AgentError::schema(agent_name, T::NAME, e.to_string()))?;

    value
        .validate()
        .map_err(|e| AgentError::schema(agent_name, T::NAME, e.to_string()))?;

    Ok(value)
}
