//! Tests for the phase output types, validated the way agent replies are

use persona_hearing::hearing::{
    Age, Confidence, HypothesisSet, InterviewResponse, PersonaSet, QuestionSet,
};
use persona_hearing::workflow_utils::{parse_structured, AgentError};
use serde_json::json;

use super::common::{hypothesis_set_json, persona_json, question_set_json};

fn personas_with_age(age: i64) -> Result<PersonaSet, AgentError> {
    let reply = json!({
        "personas": [persona_json("Aiko", age)],
        "generation_rationale": "One persona"
    });
    parse_structured::<PersonaSet>("PersonaGenerator", &reply.to_string())
}

fn hypotheses_with_confidence(level: i64) -> Result<HypothesisSet, AgentError> {
    let mut reply = hypothesis_set_json();
    reply["problem_hypotheses"][0]["confidence_level"] = json!(level);
    parse_structured::<HypothesisSet>("HypothesisBuilder", &reply.to_string())
}

#[test]
fn test_persona_age_bounds() {
    assert!(personas_with_age(0).is_err());
    assert!(personas_with_age(121).is_err());

    let youngest = personas_with_age(1).unwrap();
    assert_eq!(youngest.personas[0].age.get(), 1);
    let oldest = personas_with_age(120).unwrap();
    assert_eq!(oldest.personas[0].age.get(), 120);
}

#[test]
fn test_age_deserialization_rejects_out_of_range() {
    assert!(serde_json::from_value::<Age>(json!(0)).is_err());
    assert!(serde_json::from_value::<Age>(json!(121)).is_err());
    assert_eq!(serde_json::from_value::<Age>(json!(42)).unwrap().get(), 42);
}

#[test]
fn test_confidence_bounds() {
    assert!(hypotheses_with_confidence(0).is_err());
    assert!(hypotheses_with_confidence(11).is_err());

    for level in [1, 10] {
        let set = hypotheses_with_confidence(level).unwrap();
        assert_eq!(set.problem_hypotheses[0].confidence_level, Confidence::new(level).unwrap());
    }
}

#[test]
fn test_missing_intent_is_named() {
    let reply = json!({
        "questions": [{ "question": "How do you plan meetings?" }],
        "design_rationale": "Workflow first"
    });

    let err = parse_structured::<QuestionSet>("QuestionDesigner", &reply.to_string()).unwrap_err();
    assert!(matches!(err, AgentError::SchemaValidation { .. }));
    assert!(err.to_string().contains("intent"), "unexpected error: {}", err);
}

#[test]
fn test_empty_intent_is_rejected() {
    let mut reply = question_set_json();
    reply["questions"][1]["intent"] = json!("");

    let err = parse_structured::<QuestionSet>("QuestionDesigner", &reply.to_string()).unwrap_err();
    assert!(err.to_string().contains("intent"));
}

#[test]
fn test_unknown_fields_are_rejected() {
    let mut reply = question_set_json();
    reply["extra"] = json!("not allowed");

    assert!(parse_structured::<QuestionSet>("QuestionDesigner", &reply.to_string()).is_err());
}

#[test]
fn test_hypothesis_total() {
    let set = hypotheses_with_confidence(5).unwrap();
    assert_eq!(set.total(), 2);
    assert!(!set.synthesis_summary.is_empty());
}

#[test]
fn test_interview_answer_with_code_fences_survives() {
    let answer = "I paste ```json snippets``` into the team chat every day";
    let reply = json!({
        "persona_name": "Aiko",
        "answers": [answer],
        "key_insights": ["Shares raw config snippets"]
    });

    let response =
        parse_structured::<InterviewResponse>("Interviewer", &reply.to_string()).unwrap();
    assert_eq!(response.answers, vec![answer.to_string()]);
    assert!(response.supporting_evidence.is_empty());
}
