//! Phase 4: Hypothesis building
//!
//! Condenses every interview into a digest (name, first answers, all insights,
//! first evidence items) and asks the model for problem and insight hypotheses.

use anyhow::{Context, Result};
use persona_hearing_sdk::{log_info, log_phase_start_console, log_task_complete, log_task_start};

use crate::hearing::agents;
use crate::hearing::prompts::{HypothesisPrompt, PromptContext};
use crate::hearing::types::{HypothesisSet, InterviewResponse};
use crate::workflow_utils::agent::{AgentInvocation, TextGenerator};

/// Derive problem and insight hypotheses from the interviews
pub async fn build_hypotheses(
    generator: &dyn TextGenerator,
    theme: &str,
    interviews: &[InterviewResponse],
    verbose: bool,
) -> Result<HypothesisSet> {
    let task_id = "build_hypotheses";

    if verbose {
        log_phase_start_console!(
            4,
            "Hypothesis Building",
            format!("Synthesizing hypotheses from {} interviews", interviews.len())
        );
    }
    log_task_start!(4, task_id, "Building problem and insight hypotheses");

    let prompt = HypothesisPrompt::new(theme, interviews).render();

    let hypotheses = agents::hypothesis_builder()
        .run(
            generator,
            AgentInvocation::new(task_id, "Building hypotheses", prompt),
        )
        .await
        .context("Hypothesis building failed")?;

    let summary = format!(
        "{} problem hypotheses, {} insight hypotheses",
        hypotheses.problem_hypotheses.len(),
        hypotheses.insight_hypotheses.len()
    );

    if verbose {
        log_info!("Generated {}", summary);
        println!();
    }

    log_task_complete!(task_id, summary);

    Ok(hypotheses)
}
