//! Phase 3: Interview simulation
//!
//! Interviews every persona with the full question list. Interviews run one at a
//! time in persona order by default; with `concurrency > 1` they run concurrently,
//! bounded by a semaphore. Either way the returned responses follow persona order,
//! and a single failed interview fails the whole phase.

use anyhow::{Context, Result};
use persona_hearing_sdk::{log_info, log_phase_start_console, log_progress};

use crate::hearing::agents;
use crate::hearing::prompts::{InterviewPrompt, PromptContext};
use crate::hearing::types::{InterviewQuestion, InterviewResponse, Persona, PersonaSet, QuestionSet};
use crate::workflow_utils::agent::{Agent, AgentInvocation, TextGenerator};
use crate::workflow_utils::batch::{execute_batch, TaskContext};
use crate::workflow_utils::task::execute_task;

/// Interview every persona, returning one response per persona in list order
pub async fn conduct_interviews(
    generator: &dyn TextGenerator,
    personas: &PersonaSet,
    questions: &QuestionSet,
    concurrency: usize,
    verbose: bool,
) -> Result<Vec<InterviewResponse>> {
    let total = personas.personas.len();

    if verbose {
        log_phase_start_console!(
            3,
            "Interview Simulation",
            format!(
                "Interviewing {} personas (concurrency: {})",
                total,
                concurrency.max(1)
            )
        );
    }

    let interviewer = agents::interviewer();
    let interviewer = &interviewer;
    let question_list = questions.questions.as_slice();

    let interviews = execute_batch(
        3,
        personas.personas.iter().collect(),
        concurrency,
        move |persona, ctx| async move {
            interview_persona(generator, interviewer, persona, question_list, ctx, verbose).await
        },
    )
    .await?;

    if verbose {
        println!();
        log_info!("Completed {} interviews", interviews.len());
        println!();
    }

    Ok(interviews)
}

/// Interview a single persona
async fn interview_persona(
    generator: &dyn TextGenerator,
    interviewer: &Agent<InterviewResponse>,
    persona: &Persona,
    questions: &[InterviewQuestion],
    ctx: TaskContext,
    verbose: bool,
) -> Result<InterviewResponse> {
    let task_id = format!("interview_{}", ctx.task_number);
    let description = format!(
        "Interview {}/{}: {}",
        ctx.task_number, ctx.total_tasks, persona.name
    );

    if verbose {
        println!(
            "   [{}/{}] Interviewing {}...",
            ctx.task_number, ctx.total_tasks, persona.name
        );
    }

    let prompt = InterviewPrompt { persona, questions }.render();

    execute_task(task_id.clone(), description.clone(), ctx, || async {
        let response = interviewer
            .run(
                generator,
                AgentInvocation::new(&task_id, &description, prompt),
            )
            .await
            .with_context(|| format!("Interview with {} failed", persona.name))?;

        if response.answers.len() != questions.len() {
            tracing::warn!(
                persona = %persona.name,
                questions = questions.len(),
                answers = response.answers.len(),
                "answer count does not match question count"
            );
        }

        if verbose {
            println!(
                "      ✓ {} done ({} insights)",
                persona.name,
                response.key_insights.len()
            );
            log_progress!(ctx.task_number, ctx.total_tasks, "interviews");
        }

        let summary = format!("{} insights", response.key_insights.len());
        Ok((response, summary))
    })
    .await
}
