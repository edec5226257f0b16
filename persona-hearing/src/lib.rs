// Persona hearing workflow module
pub mod hearing;

// Remote text-generation backends
pub mod llm;

// Agent, batch and task execution utilities
pub mod workflow_utils;
