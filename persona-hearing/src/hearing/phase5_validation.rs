//! Phase 5: Validation question design

use anyhow::{Context, Result};
use persona_hearing_sdk::{log_info, log_phase_start_console, log_task_complete, log_task_start};

use crate::hearing::agents;
use crate::hearing::prompts::{PromptContext, ValidationPrompt};
use crate::hearing::types::{HypothesisSet, ValidationQuestionSet};
use crate::workflow_utils::agent::{AgentInvocation, TextGenerator};

/// Design prioritized, falsifiable questions that test the hypotheses
///
/// Only hypothesis statements and confidence levels are forwarded; evidence stays out
/// of the prompt.
pub async fn design_validation_questions(
    generator: &dyn TextGenerator,
    theme: &str,
    hypotheses: &HypothesisSet,
    verbose: bool,
) -> Result<ValidationQuestionSet> {
    let task_id = "design_validation_questions";

    if verbose {
        log_phase_start_console!(
            5,
            "Validation Question Design",
            format!("Designing questions to validate {} hypotheses", hypotheses.total())
        );
    }
    log_task_start!(5, task_id, "Designing hypothesis validation questions");

    let prompt = ValidationPrompt::new(theme, hypotheses).render();

    let validation = agents::validation_question_designer()
        .run(
            generator,
            AgentInvocation::new(task_id, "Designing validation questions", prompt),
        )
        .await
        .context("Validation question design failed")?;

    if verbose {
        log_info!("Designed {} validation questions", validation.questions.len());
        println!();
    }

    log_task_complete!(
        task_id,
        format!("Designed {} validation questions", validation.questions.len())
    );

    Ok(validation)
}
