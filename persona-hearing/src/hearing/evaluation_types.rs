//! Data structures for the question-set evaluation report

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use crate::hearing::types::string_list;
use crate::workflow_utils::agent::StructuredOutput;
use crate::workflow_utils::validation::ValidationError;

/// Rubric score, always within `0.0..=5.0`
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize, Deserialize)]
#[serde(try_from = "f64")]
pub struct Score(f64);

impl Score {
    pub const MIN: f64 = 0.0;
    pub const MAX: f64 = 5.0;

    pub fn new(value: f64) -> Result<Self, ValidationError> {
        if !(Self::MIN..=Self::MAX).contains(&value) {
            return Err(ValidationError::out_of_range("score", value, Self::MIN, Self::MAX));
        }
        Ok(Self(value))
    }

    pub fn get(self) -> f64 {
        self.0
    }
}

impl TryFrom<f64> for Score {
    type Error = ValidationError;

    fn try_from(value: f64) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

/// How much deeper a validation question probes than its initial counterpart
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DepthLevel {
    Equivalent,
    Slight,
    Clear,
    Major,
    Dramatic,
}

impl DepthLevel {
    pub const ALL: [DepthLevel; 5] = [
        DepthLevel::Equivalent,
        DepthLevel::Slight,
        DepthLevel::Clear,
        DepthLevel::Major,
        DepthLevel::Dramatic,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            DepthLevel::Equivalent => "equivalent",
            DepthLevel::Slight => "slight",
            DepthLevel::Clear => "clear",
            DepthLevel::Major => "major",
            DepthLevel::Dramatic => "dramatic",
        }
    }
}

impl fmt::Display for DepthLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Basic comparison between the two question sets
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuestionComparison {
    pub theme: String,
    pub question_count_initial: u32,
    pub question_count_validation: u32,
    pub count_change_percent: f64,
}

/// One rubric dimension scored for both question sets
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EvaluationDimension {
    pub dimension_name: String,
    pub initial_score: Score,
    pub validation_score: Score,
    pub improvement_points: f64,
    pub explanation: String,
    pub key_changes: Vec<String>,
}

/// Topic-level mapping between initial and validation questions
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuestionMapping {
    pub topic: String,
    /// 1-based question numbers in the initial set
    pub initial_questions: Vec<u32>,
    /// 1-based question numbers in the validation set
    pub validation_questions: Vec<u32>,
    pub depth_level: DepthLevel,
    pub analysis: String,
}

/// Comparative scoring report produced by the evaluation stage
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EvaluationReport {
    pub title: String,
    /// Free text as written by the model
    pub evaluation_date: String,
    pub comparison: QuestionComparison,
    pub overall_assessment: String,
    pub evaluation_dimensions: Vec<EvaluationDimension>,
    pub summary_scores: BTreeMap<String, f64>,
    pub question_mappings: Vec<QuestionMapping>,
    pub key_improvements: Vec<String>,
    pub recommendations: Vec<String>,
    pub strengths_initial: Vec<String>,
    pub strengths_validation: Vec<String>,
    pub future_improvements: Vec<String>,
}

impl StructuredOutput for EvaluationReport {
    const NAME: &'static str = "evaluation_report";
    // summary_scores is a free-form map
    const STRICT: bool = false;

    fn json_schema() -> Value {
        let depth_levels: Vec<&str> = DepthLevel::ALL.iter().map(|d| d.as_str()).collect();
        let score = json!({
            "type": "number",
            "minimum": Score::MIN,
            "maximum": Score::MAX
        });
        let indices = json!({ "type": "array", "items": { "type": "integer", "minimum": 0 } });

        json!({
            "type": "object",
            "properties": {
                "title": { "type": "string", "description": "Report title" },
                "evaluation_date": { "type": "string", "description": "Date of the evaluation" },
                "comparison": {
                    "type": "object",
                    "properties": {
                        "theme": { "type": "string" },
                        "question_count_initial": { "type": "integer", "minimum": 0 },
                        "question_count_validation": { "type": "integer", "minimum": 0 },
                        "count_change_percent": { "type": "number", "description": "Change in question count (%)" }
                    },
                    "required": ["theme", "question_count_initial", "question_count_validation", "count_change_percent"],
                    "additionalProperties": false
                },
                "overall_assessment": { "type": "string" },
                "evaluation_dimensions": {
                    "type": "array",
                    "items": {
                        "type": "object",
                        "properties": {
                            "dimension_name": { "type": "string" },
                            "initial_score": score.clone(),
                            "validation_score": score,
                            "improvement_points": { "type": "number" },
                            "explanation": { "type": "string" },
                            "key_changes": string_list("Main changes on this dimension")
                        },
                        "required": ["dimension_name", "initial_score", "validation_score", "improvement_points", "explanation", "key_changes"],
                        "additionalProperties": false
                    }
                },
                "summary_scores": {
                    "type": "object",
                    "description": "Overall score per evaluation item",
                    "additionalProperties": { "type": "number" }
                },
                "question_mappings": {
                    "type": "array",
                    "items": {
                        "type": "object",
                        "properties": {
                            "topic": { "type": "string" },
                            "initial_questions": indices.clone(),
                            "validation_questions": indices,
                            "depth_level": { "type": "string", "enum": depth_levels },
                            "analysis": { "type": "string" }
                        },
                        "required": ["topic", "initial_questions", "validation_questions", "depth_level", "analysis"],
                        "additionalProperties": false
                    }
                },
                "key_improvements": string_list("Most important improvements, highest priority first"),
                "recommendations": string_list("Suggestions for future improvement"),
                "strengths_initial": string_list("Strengths of the initial questions"),
                "strengths_validation": string_list("Strengths of the validation questions"),
                "future_improvements": string_list("Ideas for a hybrid question set combining both")
            },
            "required": [
                "title", "evaluation_date", "comparison", "overall_assessment",
                "evaluation_dimensions", "summary_scores", "question_mappings",
                "key_improvements", "recommendations", "strengths_initial",
                "strengths_validation", "future_improvements"
            ],
            "additionalProperties": false
        })
    }
}
