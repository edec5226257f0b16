//! Data structures for the hearing workflow
//!
//! Every value here is produced exactly once, by one phase, from a validated
//! model reply. Range-restricted fields use newtypes so an out-of-range value
//! cannot be constructed or deserialized.

use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use crate::workflow_utils::agent::StructuredOutput;
use crate::workflow_utils::validation::{require_non_empty, ValidationError};

// ============================================================================
// Bounded values
// ============================================================================

/// Persona age in years, always within `1..=120`
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "i64")]
pub struct Age(u8);

impl Age {
    pub const MIN: i64 = 1;
    pub const MAX: i64 = 120;

    pub fn new(years: i64) -> Result<Self, ValidationError> {
        if !(Self::MIN..=Self::MAX).contains(&years) {
            return Err(ValidationError::out_of_range("age", years, Self::MIN, Self::MAX));
        }
        Ok(Self(years as u8))
    }

    pub fn get(self) -> u8 {
        self.0
    }
}

impl TryFrom<i64> for Age {
    type Error = ValidationError;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl fmt::Display for Age {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Hypothesis confidence, always within `1..=10`
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "i64")]
pub struct Confidence(u8);

impl Confidence {
    pub const MIN: i64 = 1;
    pub const MAX: i64 = 10;

    pub fn new(level: i64) -> Result<Self, ValidationError> {
        if !(Self::MIN..=Self::MAX).contains(&level) {
            return Err(ValidationError::out_of_range(
                "confidence_level",
                level,
                Self::MIN,
                Self::MAX,
            ));
        }
        Ok(Self(level as u8))
    }

    pub fn get(self) -> u8 {
        self.0
    }
}

impl TryFrom<i64> for Confidence {
    type Error = ValidationError;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl fmt::Display for Confidence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

// ============================================================================
// Phase 1: Personas
// ============================================================================

/// A synthetic research subject
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Persona {
    pub name: String,
    pub age: Age,
    pub occupation: String,
    pub background: String,
    pub needs: Vec<String>,
    pub behaviors: Vec<String>,
    pub pain_points: Vec<String>,
}

/// Output of persona generation; list order is interview order
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PersonaSet {
    pub personas: Vec<Persona>,
    pub generation_rationale: String,
}

impl StructuredOutput for PersonaSet {
    const NAME: &'static str = "persona_set";

    fn json_schema() -> Value {
        json!({
            "type": "object",
            "properties": {
                "personas": {
                    "type": "array",
                    "description": "Generated personas",
                    "items": persona_schema()
                },
                "generation_rationale": {
                    "type": "string",
                    "description": "Why these personas were chosen and how they cover the theme"
                }
            },
            "required": ["personas", "generation_rationale"],
            "additionalProperties": false
        })
    }

    fn validate(&self) -> Result<(), ValidationError> {
        for (i, persona) in self.personas.iter().enumerate() {
            require_non_empty(format!("personas[{}].name", i), &persona.name)?;
        }
        Ok(())
    }
}

fn persona_schema() -> Value {
    json!({
        "type": "object",
        "properties": {
            "name": { "type": "string", "description": "Persona name" },
            "age": {
                "type": "integer",
                "minimum": Age::MIN,
                "maximum": Age::MAX,
                "description": "Age in years"
            },
            "occupation": { "type": "string", "description": "Occupation" },
            "background": { "type": "string", "description": "Background and attributes in detail" },
            "needs": string_list("Needs and problems"),
            "behaviors": string_list("Behavior patterns and habits"),
            "pain_points": string_list("Pain points and frustrations")
        },
        "required": ["name", "age", "occupation", "background", "needs", "behaviors", "pain_points"],
        "additionalProperties": false
    })
}

// ============================================================================
// Phase 2 / 5: Questions
// ============================================================================

/// A single interview question with its intent
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InterviewQuestion {
    pub question: String,
    pub intent: String,
}

impl InterviewQuestion {
    pub fn new(question: impl Into<String>, intent: impl Into<String>) -> Result<Self, ValidationError> {
        let question = Self {
            question: question.into(),
            intent: intent.into(),
        };
        question.check(0)?;
        Ok(question)
    }

    fn check(&self, index: usize) -> Result<(), ValidationError> {
        require_non_empty(format!("questions[{}].question", index), &self.question)?;
        require_non_empty(format!("questions[{}].intent", index), &self.intent)
    }
}

/// Output of initial question design
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuestionSet {
    pub questions: Vec<InterviewQuestion>,
    pub design_rationale: String,
}

impl StructuredOutput for QuestionSet {
    const NAME: &'static str = "question_set";

    fn json_schema() -> Value {
        json!({
            "type": "object",
            "properties": {
                "questions": {
                    "type": "array",
                    "description": "Interview questions in asking order",
                    "items": question_schema()
                },
                "design_rationale": {
                    "type": "string",
                    "description": "Intent and overall strategy of the question design"
                }
            },
            "required": ["questions", "design_rationale"],
            "additionalProperties": false
        })
    }

    fn validate(&self) -> Result<(), ValidationError> {
        check_questions(&self.questions)
    }
}

/// Output of validation question design
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValidationQuestionSet {
    pub questions: Vec<InterviewQuestion>,
    pub validation_strategy: String,
    /// Question content in priority order. Free text, not indices into `questions`.
    pub priority_order: Vec<String>,
}

impl StructuredOutput for ValidationQuestionSet {
    const NAME: &'static str = "validation_question_set";

    fn json_schema() -> Value {
        json!({
            "type": "object",
            "properties": {
                "questions": {
                    "type": "array",
                    "description": "Questions that can confirm or refute the hypotheses",
                    "minItems": 1,
                    "items": question_schema()
                },
                "validation_strategy": {
                    "type": "string",
                    "description": "How the questions validate the hypotheses"
                },
                "priority_order": string_list("Question contents ordered from highest to lowest priority")
            },
            "required": ["questions", "validation_strategy", "priority_order"],
            "additionalProperties": false
        })
    }

    fn validate(&self) -> Result<(), ValidationError> {
        if self.questions.is_empty() {
            return Err(ValidationError::Empty {
                field: "questions".to_string(),
            });
        }
        check_questions(&self.questions)
    }
}

fn check_questions(questions: &[InterviewQuestion]) -> Result<(), ValidationError> {
    questions
        .iter()
        .enumerate()
        .try_for_each(|(i, q)| q.check(i))
}

fn question_schema() -> Value {
    json!({
        "type": "object",
        "properties": {
            "question": { "type": "string", "description": "Question text" },
            "intent": { "type": "string", "description": "What the question is meant to uncover" }
        },
        "required": ["question", "intent"],
        "additionalProperties": false
    })
}

// ============================================================================
// Phase 3: Interviews
// ============================================================================

/// One persona's simulated answers
///
/// `answers` pairs with the question list by position only. `persona_name` is
/// free text as written by the model, not a reference to a [`Persona`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InterviewResponse {
    pub persona_name: String,
    pub answers: Vec<String>,
    pub key_insights: Vec<String>,
    #[serde(default)]
    pub supporting_evidence: Vec<String>,
}

impl StructuredOutput for InterviewResponse {
    const NAME: &'static str = "interview_response";
    // supporting_evidence is optional
    const STRICT: bool = false;

    fn json_schema() -> Value {
        json!({
            "type": "object",
            "properties": {
                "persona_name": { "type": "string", "description": "Name of the persona who answered" },
                "answers": string_list("One answer per question, in question order"),
                "key_insights": string_list("Important insights drawn from the answers"),
                "supporting_evidence": string_list("Supporting facts found through web search")
            },
            "required": ["persona_name", "answers", "key_insights"],
            "additionalProperties": false
        })
    }
}

// ============================================================================
// Phase 4: Hypotheses
// ============================================================================

/// A single problem or insight hypothesis
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HypothesisItem {
    /// Free-text label such as "problem" or "insight"
    pub hypothesis_type: String,
    pub statement: String,
    pub evidence: Vec<String>,
    pub confidence_level: Confidence,
    pub testable_prediction: String,
}

/// Output of hypothesis building; either list may be empty
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HypothesisSet {
    pub problem_hypotheses: Vec<HypothesisItem>,
    pub insight_hypotheses: Vec<HypothesisItem>,
    pub synthesis_summary: String,
}

impl HypothesisSet {
    pub fn total(&self) -> usize {
        self.problem_hypotheses.len() + self.insight_hypotheses.len()
    }
}

impl StructuredOutput for HypothesisSet {
    const NAME: &'static str = "hypothesis_set";

    fn json_schema() -> Value {
        json!({
            "type": "object",
            "properties": {
                "problem_hypotheses": {
                    "type": "array",
                    "description": "Hypotheses about problems the personas face",
                    "items": hypothesis_schema()
                },
                "insight_hypotheses": {
                    "type": "array",
                    "description": "Hypotheses about underlying motivations and insights",
                    "items": hypothesis_schema()
                },
                "synthesis_summary": {
                    "type": "string",
                    "description": "Integrated summary across all hypotheses"
                }
            },
            "required": ["problem_hypotheses", "insight_hypotheses", "synthesis_summary"],
            "additionalProperties": false
        })
    }

    fn validate(&self) -> Result<(), ValidationError> {
        require_non_empty("synthesis_summary", &self.synthesis_summary)
    }
}

fn hypothesis_schema() -> Value {
    json!({
        "type": "object",
        "properties": {
            "hypothesis_type": { "type": "string", "description": "Hypothesis category (problem / insight)" },
            "statement": { "type": "string", "description": "The hypothesis" },
            "evidence": string_list("Evidence supporting the hypothesis"),
            "confidence_level": {
                "type": "integer",
                "minimum": Confidence::MIN,
                "maximum": Confidence::MAX,
                "description": "Confidence from 1 to 10, 10 being highest"
            },
            "testable_prediction": { "type": "string", "description": "A prediction that can be checked" }
        },
        "required": ["hypothesis_type", "statement", "evidence", "confidence_level", "testable_prediction"],
        "additionalProperties": false
    })
}

pub(crate) fn string_list(description: &str) -> Value {
    json!({
        "type": "array",
        "description": description,
        "items": { "type": "string" }
    })
}
