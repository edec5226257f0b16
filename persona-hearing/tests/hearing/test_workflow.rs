//! Tests for pipeline orchestration against a scripted generator

use std::sync::Arc;
use std::time::Duration;

use persona_hearing::hearing::agents::{
    HYPOTHESIS_BUILDER, INTERVIEWER, PERSONA_GENERATOR, QUESTION_DESIGNER, QUESTION_EVALUATOR,
    VALIDATION_QUESTION_DESIGNER,
};
use serde_json::json;

use super::common::{workflow, ScriptedGenerator, THEME};

async fn response_names(generator: &Arc<ScriptedGenerator>, concurrency: usize) -> Vec<String> {
    let results = workflow(generator, 3, concurrency).run().await.unwrap();
    results
        .interviews
        .into_iter()
        .map(|response| response.persona_name)
        .collect()
}

#[tokio::test]
async fn test_end_to_end_single_persona() {
    let generator = Arc::new(ScriptedGenerator::new(&["Aiko"]));

    let results = workflow(&generator, 1, 1).run().await.unwrap();

    assert_eq!(results.personas.personas.len(), 1);
    assert_eq!(results.interviews.len(), 1);
    assert_eq!(results.interviews[0].persona_name, results.personas.personas[0].name);
    assert!(!results.hypotheses.synthesis_summary.is_empty());
    assert!(!results.validation.questions.is_empty());

    let agents: Vec<String> = generator.calls().into_iter().map(|call| call.agent).collect();
    assert_eq!(
        agents,
        vec![
            PERSONA_GENERATOR,
            QUESTION_DESIGNER,
            INTERVIEWER,
            HYPOTHESIS_BUILDER,
            VALIDATION_QUESTION_DESIGNER,
        ]
    );
}

#[tokio::test]
async fn test_sequential_interviews_keep_persona_order() {
    let generator = Arc::new(ScriptedGenerator::new(&["A", "B", "C"]));

    assert_eq!(response_names(&generator, 1).await, vec!["A", "B", "C"]);
    assert_eq!(generator.finished_interviews(), vec!["A", "B", "C"]);
}

#[tokio::test]
async fn test_concurrent_interviews_keep_persona_order() {
    let generator = Arc::new(
        ScriptedGenerator::new(&["A", "B", "C"])
            .with_delay("A", Duration::from_millis(150))
            .with_delay("B", Duration::from_millis(75)),
    );

    assert_eq!(response_names(&generator, 3).await, vec!["A", "B", "C"]);
    // The slowest persona finished last, so the calls really overlapped
    assert_eq!(generator.finished_interviews().last().map(String::as_str), Some("A"));
}

#[tokio::test]
async fn test_phase_prompts_carry_previous_outputs() {
    let generator = Arc::new(ScriptedGenerator::new(&["Aiko", "Ben"]));

    workflow(&generator, 2, 1).run().await.unwrap();

    let persona_prompt = &generator.calls_to(PERSONA_GENERATOR)[0].prompt;
    assert!(persona_prompt.contains(THEME));
    assert!(persona_prompt.contains("Generate 2 diverse personas"));

    let question_prompt = &generator.calls_to(QUESTION_DESIGNER)[0].prompt;
    assert!(question_prompt.contains("Cover managers, individual contributors and skeptics"));
    assert!(!question_prompt.contains("Aiko"));

    let interviews = generator.calls_to(INTERVIEWER);
    assert_eq!(interviews.len(), 2);
    assert!(interviews[0].prompt.contains("How do you schedule meetings today?"));

    let hypothesis_prompt = &generator.calls_to(HYPOTHESIS_BUILDER)[0].prompt;
    assert!(hypothesis_prompt.contains("Persona: Aiko"));
    assert!(hypothesis_prompt.contains("Persona: Ben"));

    let validation_prompt = &generator.calls_to(VALIDATION_QUESTION_DESIGNER)[0].prompt;
    assert!(validation_prompt.contains("Time zone conversion causes missed meetings (confidence: 8/10)"));
}

#[tokio::test]
async fn test_phase_failure_aborts_run() {
    let generator = Arc::new(ScriptedGenerator::new(&["Aiko"]).failing(HYPOTHESIS_BUILDER));

    let err = workflow(&generator, 1, 1).run().await.unwrap_err();

    let message = format!("{:#}", err);
    assert!(message.contains("Phase 4 (Hypothesis Building) failed"), "{}", message);
    assert!(message.contains("scripted failure"));
    assert!(generator.calls_to(VALIDATION_QUESTION_DESIGNER).is_empty());
}

#[tokio::test]
async fn test_interview_failure_fails_phase() {
    let generator = Arc::new(ScriptedGenerator::new(&["A", "B"]).failing(INTERVIEWER));

    let err = workflow(&generator, 2, 2).run().await.unwrap_err();

    assert!(format!("{:#}", err).contains("Phase 3 (Interview Simulation) failed"));
    assert!(generator.calls_to(HYPOTHESIS_BUILDER).is_empty());
}

#[tokio::test]
async fn test_invalid_reply_is_schema_error() {
    let generator = Arc::new(
        ScriptedGenerator::new(&["Aiko"])
            .with_reply(QUESTION_DESIGNER, json!({ "questions": [], "design_rationale": 3 })),
    );

    let err = workflow(&generator, 1, 1).run().await.unwrap_err();

    let message = format!("{:#}", err);
    assert!(message.contains("Phase 2 (Question Design) failed"));
    assert!(message.contains("question_set"));
}

#[tokio::test]
async fn test_evaluation_report() {
    let generator = Arc::new(ScriptedGenerator::new(&["Aiko"]));

    let outcome = workflow(&generator, 1, 1).run_with_evaluation().await.unwrap();

    let report = outcome.evaluation.unwrap();
    assert_eq!(report.comparison.question_count_validation, 2);

    let prompt = &generator.calls_to(QUESTION_EVALUATOR)[0].prompt;
    assert!(prompt.contains("When did a time zone mistake last cost you a meeting?"));
    assert!(prompt.contains("Coordination across time zones is the core problem"));
}

#[tokio::test]
async fn test_failed_evaluation_keeps_results() {
    let generator = Arc::new(ScriptedGenerator::new(&["Aiko"]).failing(QUESTION_EVALUATOR));

    let outcome = workflow(&generator, 1, 1).run_with_evaluation().await.unwrap();

    assert!(outcome.evaluation.is_none());
    assert_eq!(outcome.results.interviews.len(), 1);
}

#[tokio::test]
async fn test_into_parts() {
    let generator = Arc::new(ScriptedGenerator::new(&["Aiko"]));
    let results = workflow(&generator, 1, 1).run().await.unwrap();

    let (personas, questions, interviews, hypotheses, validation) = results.into_parts();
    assert_eq!(personas.personas.len(), 1);
    assert_eq!(questions.questions.len(), 2);
    assert_eq!(interviews.len(), 1);
    assert_eq!(hypotheses.total(), 2);
    assert_eq!(validation.priority_order.len(), 2);
}
