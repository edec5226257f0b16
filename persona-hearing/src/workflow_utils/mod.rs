//! Workflow utilities for standardized batch/task/agent execution
//!
//! This module provides reusable components for workflow phases:
//! - **agent**: Schema-bound agents on top of a pluggable text generator
//! - **batch**: Ordered execution with optional concurrency control
//! - **task**: Task- and phase-level logging around async work
//! - **json**: JSON extraction from model output
//! - **validation**: Field-level validation errors shared by output types

pub mod agent;
pub mod batch;
pub mod json;
pub mod task;
pub mod validation;

// Re-export commonly used types and functions
pub use agent::{
    parse_structured, Agent, AgentError, AgentInvocation, GenerationRequest, OutputFormat,
    StructuredOutput, TextGenerator, ToolGrant,
};
pub use batch::{execute_batch, TaskContext};
pub use json::extract_json;
pub use task::{execute_phase, execute_task};
pub use validation::ValidationError;
