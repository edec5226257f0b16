//! Typed prompt contexts for every hearing phase
//!
//! Each phase collects exactly the data it forwards to the model in a context
//! record. The record is turned into prompt text only by [`PromptContext::render`],
//! right before the agent is invoked, so prompt shaping can be tested without
//! running a workflow.

use crate::hearing::types::{
    HypothesisItem, HypothesisSet, InterviewQuestion, InterviewResponse, Persona, QuestionSet,
    ValidationQuestionSet,
};

/// Number of answers kept per interview digest
pub const DIGEST_ANSWERS: usize = 3;
/// Number of supporting-evidence items kept per interview digest
pub const DIGEST_EVIDENCE: usize = 2;
/// Number of validation priorities forwarded to the evaluator
pub const EVALUATION_PRIORITIES: usize = 5;

/// Rubric dimensions scored by the evaluator, in report order
pub const EVALUATION_DIMENSIONS: [(&str, &str); 7] = [
    (
        "Hypothesis linkage clarity",
        "Does each validation question clearly map to a hypothesis?",
    ),
    (
        "Falsifiability",
        "Is the set designed so that a hypothesis can be rejected?",
    ),
    (
        "Neutrality",
        "Are the questions free of leading toward a particular solution?",
    ),
    (
        "Specificity",
        "How strongly do the questions ask for concrete cases and examples?",
    ),
    (
        "Depth",
        "How far does a single question dig into the topic?",
    ),
    (
        "Breadth of perspective",
        "Are multiple stakeholders and problem areas covered?",
    ),
    (
        "Practicality",
        "Can the interview realistically be run, and is it time-efficient?",
    ),
];

const DIGEST_SEPARATOR_WIDTH: usize = 40;

/// A phase input that can be rendered into a model prompt
pub trait PromptContext {
    fn render(&self) -> String;
}

fn numbered_questions(questions: &[InterviewQuestion]) -> String {
    questions
        .iter()
        .enumerate()
        .map(|(i, q)| format!("{}. {}\n   Intent: {}", i + 1, q.question, q.intent))
        .collect::<Vec<_>>()
        .join("\n")
}

// ============================================================================
// Phase 1
// ============================================================================

/// Input for persona generation
#[derive(Debug, Clone, Copy)]
pub struct PersonaPrompt<'a> {
    pub theme: &'a str,
    pub num_personas: usize,
}

impl PromptContext for PersonaPrompt<'_> {
    fn render(&self) -> String {
        format!(
            r#"Generate {count} diverse personas for the following theme.

Theme:
{theme}

Requirements:
- Vary age, occupation and background across the personas
- Give each persona its own viewpoint and needs
- Include personas with different interests in and experiences of the theme
- Include extreme cases (early adopters, skeptics, and the like)
- Return exactly {count} personas"#,
            count = self.num_personas,
            theme = self.theme,
        )
    }
}

// ============================================================================
// Phase 2
// ============================================================================

/// Input for initial question design
///
/// Only the persona generation rationale is forwarded, not the full persona list.
#[derive(Debug, Clone, Copy)]
pub struct QuestionPrompt<'a> {
    pub theme: &'a str,
    pub persona_rationale: &'a str,
}

impl PromptContext for QuestionPrompt<'_> {
    fn render(&self) -> String {
        format!(
            r#"Design effective interview questions for the following theme.

Theme:
{theme}

Overview of the generated personas:
{rationale}

Requirements:
- Write roughly 10-15 questions
- Focus on open-ended questions
- Include questions exploring behavior, challenges and expectations
- State the intent of every question explicitly"#,
            theme = self.theme,
            rationale = self.persona_rationale,
        )
    }
}

// ============================================================================
// Phase 3
// ============================================================================

/// Input for one persona interview
#[derive(Debug, Clone, Copy)]
pub struct InterviewPrompt<'a> {
    pub persona: &'a Persona,
    pub questions: &'a [InterviewQuestion],
}

impl PromptContext for InterviewPrompt<'_> {
    fn render(&self) -> String {
        let p = self.persona;
        format!(
            r#"Answer the questions below while fully playing the following persona.

Persona:
- Name: {name}
- Age: {age}
- Occupation: {occupation}
- Background: {background}
- Needs: {needs}
- Behaviors: {behaviors}
- Pain points: {pain_points}

Questions:
{questions}

Requirements:
- Answer every question, in order, from this persona's background and attributes
- Include concrete episodes and experiences
- Use web search to check that the answers are realistic and record what backs them up
- Extract the important insights revealed by the answers
- Set persona_name to "{name}""#,
            name = p.name,
            age = p.age,
            occupation = p.occupation,
            background = p.background,
            needs = p.needs.join(", "),
            behaviors = p.behaviors.join(", "),
            pain_points = p.pain_points.join(", "),
            questions = numbered_questions(self.questions),
        )
    }
}

// ============================================================================
// Phase 4
// ============================================================================

/// Deliberately lossy summary of one interview
#[derive(Debug, Clone, PartialEq)]
pub struct InterviewDigest {
    pub persona_name: String,
    /// First [`DIGEST_ANSWERS`] answers
    pub answers: Vec<String>,
    pub insights: Vec<String>,
    /// First [`DIGEST_EVIDENCE`] supporting-evidence items
    pub evidence: Vec<String>,
}

impl From<&InterviewResponse> for InterviewDigest {
    fn from(response: &InterviewResponse) -> Self {
        Self {
            persona_name: response.persona_name.clone(),
            answers: response.answers.iter().take(DIGEST_ANSWERS).cloned().collect(),
            insights: response.key_insights.clone(),
            evidence: response
                .supporting_evidence
                .iter()
                .take(DIGEST_EVIDENCE)
                .cloned()
                .collect(),
        }
    }
}

impl InterviewDigest {
    fn render(&self) -> String {
        let evidence = if self.evidence.is_empty() {
            "none".to_string()
        } else {
            self.evidence.join(" / ")
        };
        format!(
            "Persona: {}\nAnswers: {} ...\nInsights: {}\nEvidence: {}",
            self.persona_name,
            self.answers.join(" / "),
            self.insights.join(" / "),
            evidence
        )
    }
}

/// Input for hypothesis building
#[derive(Debug, Clone)]
pub struct HypothesisPrompt<'a> {
    pub theme: &'a str,
    pub digests: Vec<InterviewDigest>,
}

impl<'a> HypothesisPrompt<'a> {
    pub fn new(theme: &'a str, interviews: &[InterviewResponse]) -> Self {
        Self {
            theme,
            digests: interviews.iter().map(InterviewDigest::from).collect(),
        }
    }
}

impl PromptContext for HypothesisPrompt<'_> {
    fn render(&self) -> String {
        let separator = "─".repeat(DIGEST_SEPARATOR_WIDTH);
        let digests = self
            .digests
            .iter()
            .map(InterviewDigest::render)
            .collect::<Vec<_>>()
            .join(&format!("\n{}\n", separator));

        format!(
            r#"Analyze the interview results below and derive problem hypotheses and insight hypotheses.

Theme:
{theme}

Interview results:
{separator}
{digests}

Requirements:
- Extract patterns shared by several personas
- Make every hypothesis testable
- Give evidence and a confidence level for each hypothesis
- Include both problem hypotheses and insight hypotheses
- Narrow the result down to about 5-10 hypotheses"#,
            theme = self.theme,
            separator = separator,
            digests = digests,
        )
    }
}

// ============================================================================
// Phase 5
// ============================================================================

/// Input for validation question design; evidence is omitted
#[derive(Debug, Clone, Copy)]
pub struct ValidationPrompt<'a> {
    pub theme: &'a str,
    pub problem: &'a [HypothesisItem],
    pub insight: &'a [HypothesisItem],
}

impl<'a> ValidationPrompt<'a> {
    pub fn new(theme: &'a str, hypotheses: &'a HypothesisSet) -> Self {
        Self {
            theme,
            problem: &hypotheses.problem_hypotheses,
            insight: &hypotheses.insight_hypotheses,
        }
    }
}

fn hypothesis_lines(items: &[HypothesisItem]) -> String {
    items
        .iter()
        .map(|h| format!("- {} (confidence: {}/10)", h.statement, h.confidence_level))
        .collect::<Vec<_>>()
        .join("\n")
}

impl PromptContext for ValidationPrompt<'_> {
    fn render(&self) -> String {
        format!(
            r#"Design interview items that can validate the following hypotheses.

Theme:
{theme}

Problem hypotheses:
{problem}

Insight hypotheses:
{insight}

Requirements:
- Write questions that can validate each hypothesis
- Include questions whose answers could refute a hypothesis
- Prioritize the questions and list them in priority_order by content
- Keep the set to about 10-20 questions"#,
            theme = self.theme,
            problem = hypothesis_lines(self.problem),
            insight = hypothesis_lines(self.insight),
        )
    }
}

// ============================================================================
// Evaluation
// ============================================================================

/// Input for the comparative evaluation of both question sets
#[derive(Debug, Clone, Copy)]
pub struct EvaluationPrompt<'a> {
    pub theme: &'a str,
    pub evaluation_date: &'a str,
    pub initial: &'a QuestionSet,
    pub validation: &'a ValidationQuestionSet,
    pub hypotheses: &'a HypothesisSet,
}

impl PromptContext for EvaluationPrompt<'_> {
    fn render(&self) -> String {
        let priorities = self
            .validation
            .priority_order
            .iter()
            .take(EVALUATION_PRIORITIES)
            .enumerate()
            .map(|(i, p)| format!("{}. {}", i + 1, p))
            .collect::<Vec<_>>()
            .join("\n");

        let dimensions = EVALUATION_DIMENSIONS
            .iter()
            .enumerate()
            .map(|(i, (name, question))| format!("{}. **{}** - {}", i + 1, name, question))
            .collect::<Vec<_>>()
            .join("\n");

        format!(
            r#"Compare and evaluate the initial interview questions against the validation interview questions.

## Theme
{theme}

## Evaluation date
{date}

## Initial interview questions ({initial_count})
Design rationale:
{rationale}

Questions:
{initial}

## Validation interview questions ({validation_count})
Validation strategy:
{strategy}

Top priorities:
{priorities}

Questions:
{validation}

## Hypotheses overview
Problem hypotheses: {problem_count}
Insight hypotheses: {insight_count}

Synthesis summary:
{summary}

## Evaluation task
Compare both question sets on the following dimensions:

{dimensions}

For each dimension give:
- the initial questions' score (0-5)
- the validation questions' score (0-5)
- the improvement in points
- a detailed explanation with concrete examples

Then write an overall report covering:
- the strengths of both sets
- a topic-by-topic mapping between the sets, with depth level one of: equivalent, slight, clear, major, dramatic
- recommendations for future improvement
- proposals for a hybrid version of both sets"#,
            theme = self.theme,
            date = self.evaluation_date,
            initial_count = self.initial.questions.len(),
            rationale = self.initial.design_rationale,
            initial = numbered_questions(&self.initial.questions),
            validation_count = self.validation.questions.len(),
            strategy = self.validation.validation_strategy,
            priorities = priorities,
            validation = numbered_questions(&self.validation.questions),
            problem_count = self.hypotheses.problem_hypotheses.len(),
            insight_count = self.hypotheses.insight_hypotheses.len(),
            summary = self.hypotheses.synthesis_summary,
            dimensions = dimensions,
        )
    }
}
