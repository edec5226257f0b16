//! Question-set evaluation
//!
//! Scores the initial and validation question sets against each other on a fixed
//! seven-dimension rubric. Runs after the main pipeline and only reads its outputs.

use anyhow::{Context, Result};
use persona_hearing_sdk::{log_info, log_phase_start_console, log_task_complete, log_task_start};

use crate::hearing::agents;
use crate::hearing::evaluation_types::EvaluationReport;
use crate::hearing::prompts::{EvaluationPrompt, PromptContext};
use crate::hearing::types::{HypothesisSet, QuestionSet, ValidationQuestionSet};
use crate::workflow_utils::agent::{AgentInvocation, TextGenerator};

/// Number of key improvements narrated on the console
const NARRATED_IMPROVEMENTS: usize = 3;

/// Inputs of the evaluation stage, all produced by the main pipeline
#[derive(Debug, Clone, Copy)]
pub struct EvaluationInput<'a> {
    pub theme: &'a str,
    pub evaluation_date: &'a str,
    pub initial: &'a QuestionSet,
    pub validation: &'a ValidationQuestionSet,
    pub hypotheses: &'a HypothesisSet,
}

/// Compare both question sets and produce an evaluation report
pub async fn evaluate_questions(
    generator: &dyn TextGenerator,
    input: EvaluationInput<'_>,
    phase: usize,
    verbose: bool,
) -> Result<EvaluationReport> {
    let task_id = "evaluate_questions";

    if verbose {
        log_phase_start_console!(
            phase,
            "Question Evaluation",
            "Comparing the initial and validation question sets"
        );
    }
    log_task_start!(phase, task_id, "Evaluating question sets");

    let prompt = EvaluationPrompt {
        theme: input.theme,
        evaluation_date: input.evaluation_date,
        initial: input.initial,
        validation: input.validation,
        hypotheses: input.hypotheses,
    }
    .render();

    let report = agents::question_evaluator()
        .run(
            generator,
            AgentInvocation::new(task_id, "Evaluating question sets", prompt),
        )
        .await
        .context("Question evaluation failed")?;

    if verbose {
        narrate(&report);
    }

    log_task_complete!(
        task_id,
        format!("{} dimensions scored", report.evaluation_dimensions.len())
    );

    Ok(report)
}

fn narrate(report: &EvaluationReport) {
    log_info!("Evaluation report generated");
    println!();
    println!("Key results:");
    println!(
        "  - Initial questions: {}",
        report.comparison.question_count_initial
    );
    println!(
        "  - Validation questions: {}",
        report.comparison.question_count_validation
    );
    println!(
        "  - Question count change: {:+.1}%",
        report.comparison.count_change_percent
    );
    println!();
    println!("Top improvements:");
    for (i, improvement) in report
        .key_improvements
        .iter()
        .take(NARRATED_IMPROVEMENTS)
        .enumerate()
    {
        println!("  {}. {}", i + 1, improvement);
    }
    println!();
}
