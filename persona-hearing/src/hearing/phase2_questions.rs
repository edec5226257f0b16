//! Phase 2: Initial question design

use anyhow::{Context, Result};
use persona_hearing_sdk::{log_info, log_phase_start_console, log_task_complete, log_task_start};

use crate::hearing::agents;
use crate::hearing::prompts::{PromptContext, QuestionPrompt};
use crate::hearing::types::{PersonaSet, QuestionSet};
use crate::workflow_utils::agent::{AgentInvocation, TextGenerator};

/// Design the first-round interview questions
///
/// Only the persona generation rationale is forwarded to the model, which keeps
/// the prompt size independent of the persona count.
pub async fn design_questions(
    generator: &dyn TextGenerator,
    theme: &str,
    personas: &PersonaSet,
    verbose: bool,
) -> Result<QuestionSet> {
    let task_id = "design_questions";

    if verbose {
        log_phase_start_console!(
            2,
            "Question Design",
            "Designing the initial interview questions"
        );
    }
    log_task_start!(2, task_id, "Designing initial interview questions");

    let prompt = QuestionPrompt {
        theme,
        persona_rationale: &personas.generation_rationale,
    }
    .render();

    let questions = agents::question_designer()
        .run(
            generator,
            AgentInvocation::new(task_id, "Designing interview questions", prompt),
        )
        .await
        .context("Question design failed")?;

    if verbose {
        log_info!("Designed {} questions", questions.questions.len());
        println!();
    }

    log_task_complete!(
        task_id,
        format!("Designed {} questions", questions.questions.len())
    );

    Ok(questions)
}
