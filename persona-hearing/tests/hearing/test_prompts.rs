//! Tests for prompt contexts

use persona_hearing::hearing::prompts::{
    EvaluationPrompt, HypothesisPrompt, InterviewPrompt, PersonaPrompt, PromptContext,
    QuestionPrompt, ValidationPrompt, EVALUATION_DIMENSIONS,
};
use persona_hearing::hearing::{
    HypothesisSet, InterviewResponse, Persona, QuestionSet, ValidationQuestionSet,
};
use serde_json::json;

use super::common::{hypothesis_set_json, persona_json, question_set_json, validation_set_json};

fn interview(name: &str) -> InterviewResponse {
    serde_json::from_value(json!({
        "persona_name": name,
        "answers": ["answer one", "answer two", "answer three", "answer four", "answer five"],
        "key_insights": ["insight alpha", "insight beta"],
        "supporting_evidence": ["evidence one", "evidence two", "evidence three"]
    }))
    .unwrap()
}

#[test]
fn test_persona_prompt_states_count_and_theme() {
    let prompt = PersonaPrompt {
        theme: "Meal planning app",
        num_personas: 7,
    }
    .render();

    assert!(prompt.contains("Generate 7 diverse personas"));
    assert!(prompt.contains("Meal planning app"));
}

#[test]
fn test_question_prompt_forwards_only_rationale() {
    let prompt = QuestionPrompt {
        theme: "Meal planning app",
        persona_rationale: "Busy parents and students",
    }
    .render();

    assert!(prompt.contains("Busy parents and students"));
    assert!(prompt.contains("10-15 questions"));
}

#[test]
fn test_interview_prompt_includes_persona_and_numbered_questions() {
    let persona: Persona = serde_json::from_value(persona_json("Carmen", 51)).unwrap();
    let questions: QuestionSet = serde_json::from_value(question_set_json()).unwrap();

    let prompt = InterviewPrompt {
        persona: &persona,
        questions: &questions.questions,
    }
    .render();

    assert!(prompt.contains("- Name: Carmen"));
    assert!(prompt.contains("- Age: 51"));
    assert!(prompt.contains("1. How do you schedule meetings today?\n   Intent: Map the current workflow"));
    assert!(prompt.contains("2. What went wrong last time?"));
    assert!(prompt.contains("Set persona_name to \"Carmen\""));
}

#[test]
fn test_hypothesis_prompt_truncates_digests() {
    let interviews = vec![interview("Aiko"), interview("Ben")];
    let context = HypothesisPrompt::new("Meal planning app", &interviews);

    assert_eq!(context.digests.len(), 2);
    assert_eq!(context.digests[0].answers.len(), 3);
    assert_eq!(context.digests[0].evidence.len(), 2);

    let prompt = context.render();
    assert!(prompt.contains("Persona: Aiko"));
    assert!(prompt.contains("Persona: Ben"));
    assert!(prompt.contains("answer three"));
    assert!(!prompt.contains("answer four"));
    assert!(prompt.contains("evidence two"));
    assert!(!prompt.contains("evidence three"));
    assert!(prompt.contains("insight beta"));
}

#[test]
fn test_validation_prompt_omits_evidence() {
    let hypotheses: HypothesisSet = serde_json::from_value(hypothesis_set_json()).unwrap();
    let prompt = ValidationPrompt::new("Meal planning app", &hypotheses).render();

    assert!(prompt.contains("- Time zone conversion causes missed meetings (confidence: 8/10)"));
    assert!(prompt.contains("- Weekly planning rituals anchor scheduling (confidence: 5/10)"));
    assert!(!prompt.contains("Every persona mentioned a missed call"));
}

#[test]
fn test_evaluation_prompt_forwards_top_five_priorities() {
    let initial: QuestionSet = serde_json::from_value(question_set_json()).unwrap();
    let hypotheses: HypothesisSet = serde_json::from_value(hypothesis_set_json()).unwrap();
    let mut validation: ValidationQuestionSet =
        serde_json::from_value(validation_set_json()).unwrap();
    validation.priority_order = (1..=7).map(|i| format!("priority item {}", i)).collect();

    let prompt = EvaluationPrompt {
        theme: "Meal planning app",
        evaluation_date: "2026-10-17",
        initial: &initial,
        validation: &validation,
        hypotheses: &hypotheses,
    }
    .render();

    assert!(prompt.contains("5. priority item 5"));
    assert!(!prompt.contains("priority item 6"));
    assert!(!prompt.contains("priority item 7"));
    assert!(prompt.contains("2026-10-17"));
    assert!(prompt.contains("Problem hypotheses: 1"));
    for (name, _) in EVALUATION_DIMENSIONS {
        assert!(prompt.contains(name), "missing dimension {}", name);
    }
}
