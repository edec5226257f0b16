//! Remote text-generation backends
//!
//! Each backend implements [`TextGenerator`](crate::workflow_utils::TextGenerator)
//! and returns raw reply text; schema validation happens in the agent layer.

pub mod openai;

pub use openai::OpenAiGenerator;
