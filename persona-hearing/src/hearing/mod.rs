//! Persona hearing workflow module
//!
//! Simulates a customer-discovery study with a text-generation model. Five phases
//! run in sequence: persona generation, initial question design, per-persona
//! interviews, hypothesis building and validation question design. A separate
//! evaluation stage compares the two question sets, and every output is written
//! as a Markdown report.

pub mod agents;
pub mod cli;
pub mod config;
pub mod evaluation;
pub mod evaluation_types;
pub mod phase1_personas;
pub mod phase2_questions;
pub mod phase3_interviews;
pub mod phase4_hypotheses;
pub mod phase5_validation;
pub mod prompts;
pub mod report;
pub mod types;
pub mod workflow;

// Re-export commonly used types
pub use cli::Args;
pub use config::{ConfigError, ModelConfig, WorkflowConfig};
pub use evaluation_types::{DepthLevel, EvaluationReport, Score};
pub use report::save_results;
pub use types::{
    Age, Confidence, HypothesisItem, HypothesisSet, InterviewQuestion, InterviewResponse, Persona,
    PersonaSet, QuestionSet, ValidationQuestionSet,
};
pub use workflow::{HearingOutcome, HearingResults, HearingWorkflow};
