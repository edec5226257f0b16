//! Tests for evaluation report validation

use persona_hearing::hearing::{DepthLevel, EvaluationReport, Score};
use persona_hearing::workflow_utils::{parse_structured, AgentError};
use serde_json::{json, Value};

use super::common::evaluation_report_json;

fn parse(reply: &Value) -> Result<EvaluationReport, AgentError> {
    parse_structured::<EvaluationReport>("QuestionEvaluator", &reply.to_string())
}

fn with_validation_score(score: f64) -> Value {
    let mut reply = evaluation_report_json();
    reply["evaluation_dimensions"][0]["validation_score"] = json!(score);
    reply
}

#[test]
fn test_score_bounds() {
    assert!(parse(&with_validation_score(6.0)).is_err());
    assert!(parse(&with_validation_score(-0.5)).is_err());

    let low = parse(&with_validation_score(0.0)).unwrap();
    assert_eq!(low.evaluation_dimensions[0].validation_score.get(), 0.0);
    let high = parse(&with_validation_score(5.0)).unwrap();
    assert_eq!(high.evaluation_dimensions[0].validation_score.get(), 5.0);
}

#[test]
fn test_score_new() {
    assert!(Score::new(6.0).is_err());
    assert!(Score::new(f64::NAN).is_err());
    assert_eq!(Score::new(3.5).unwrap().get(), 3.5);
}

#[test]
fn test_depth_level_values() {
    for level in ["equivalent", "slight", "clear", "major", "dramatic"] {
        let mut reply = evaluation_report_json();
        reply["question_mappings"][0]["depth_level"] = json!(level);
        let report = parse(&reply).unwrap();
        assert_eq!(report.question_mappings[0].depth_level.as_str(), level);
    }

    let mut reply = evaluation_report_json();
    reply["question_mappings"][0]["depth_level"] = json!("enormous");
    assert!(parse(&reply).is_err());

    assert_eq!(DepthLevel::ALL.len(), 5);
}

#[test]
fn test_summary_scores_are_free_form() {
    let mut reply = evaluation_report_json();
    reply["summary_scores"] = json!({ "Neutrality": 3.0, "Depth": 4.0 });

    let report = parse(&reply).unwrap();
    assert_eq!(report.summary_scores.len(), 2);
    assert_eq!(report.summary_scores["Depth"], 4.0);
}
