//! Markdown reports for every workflow output
//!
//! The `format_*` functions are pure: the same value always renders to the same
//! text. [`save_results`] writes one file per output into the output directory.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use tokio::fs;

use persona_hearing_sdk::log_artifact_written;

use crate::hearing::evaluation_types::EvaluationReport;
use crate::hearing::types::{
    HypothesisItem, HypothesisSet, InterviewQuestion, InterviewResponse, PersonaSet, QuestionSet,
    ValidationQuestionSet,
};
use crate::hearing::workflow::HearingResults;

pub const PERSONAS_FILE: &str = "personas.md";
pub const INITIAL_QUESTIONS_FILE: &str = "initial_questions.md";
pub const INTERVIEWS_FILE: &str = "interview_results.md";
pub const HYPOTHESES_FILE: &str = "hypotheses.md";
pub const VALIDATION_QUESTIONS_FILE: &str = "validation_questions.md";
pub const EVALUATION_FILE: &str = "evaluation.md";

fn bullets(lines: &mut Vec<String>, items: &[String]) {
    lines.extend(items.iter().map(|item| format!("- {}", item)));
}

fn numbered(lines: &mut Vec<String>, items: &[String]) {
    lines.extend(
        items
            .iter()
            .enumerate()
            .map(|(i, item)| format!("{}. {}", i + 1, item)),
    );
}

fn question_list(lines: &mut Vec<String>, questions: &[InterviewQuestion]) {
    for (i, q) in questions.iter().enumerate() {
        lines.push(format!("### Question {}", i + 1));
        lines.push(format!("**{}**\n", q.question));
        lines.push(format!("*Intent*: {}\n", q.intent));
    }
}

pub fn format_personas_markdown(personas: &PersonaSet) -> String {
    let mut lines = vec!["# Generated Personas\n".to_string()];
    lines.push(format!(
        "## Generation Rationale\n\n{}\n",
        personas.generation_rationale
    ));

    for (i, persona) in personas.personas.iter().enumerate() {
        lines.push(format!("## Persona {}: {}\n", i + 1, persona.name));
        lines.push(format!("- **Age**: {}", persona.age));
        lines.push(format!("- **Occupation**: {}", persona.occupation));
        lines.push(format!("- **Background**: {}\n", persona.background));

        lines.push("### Needs".to_string());
        bullets(&mut lines, &persona.needs);
        lines.push(String::new());

        lines.push("### Behaviors".to_string());
        bullets(&mut lines, &persona.behaviors);
        lines.push(String::new());

        lines.push("### Pain Points".to_string());
        bullets(&mut lines, &persona.pain_points);
        lines.push("\n---\n".to_string());
    }

    lines.join("\n")
}

pub fn format_questions_markdown(questions: &QuestionSet) -> String {
    let mut lines = vec!["# Initial Interview Questions\n".to_string()];
    lines.push(format!(
        "## Design Rationale\n\n{}\n",
        questions.design_rationale
    ));
    lines.push("## Questions\n".to_string());
    question_list(&mut lines, &questions.questions);

    lines.join("\n")
}

pub fn format_interviews_markdown(interviews: &[InterviewResponse]) -> String {
    let mut lines = vec!["# Interview Results\n".to_string()];

    for (i, interview) in interviews.iter().enumerate() {
        lines.push(format!("## {}. {}\n", i + 1, interview.persona_name));

        lines.push("### Answers".to_string());
        numbered(&mut lines, &interview.answers);
        lines.push(String::new());

        lines.push("### Key Insights".to_string());
        bullets(&mut lines, &interview.key_insights);
        lines.push(String::new());

        if !interview.supporting_evidence.is_empty() {
            lines.push("### Supporting Evidence (Web Search)".to_string());
            bullets(&mut lines, &interview.supporting_evidence);
            lines.push(String::new());
        }

        lines.push("---\n".to_string());
    }

    lines.join("\n")
}

fn hypothesis_section(lines: &mut Vec<String>, label: &str, items: &[HypothesisItem]) {
    for (i, hypothesis) in items.iter().enumerate() {
        lines.push(format!("### {} {}", label, i + 1));
        lines.push(format!("**{}**\n", hypothesis.statement));
        lines.push(format!(
            "- **Confidence**: {}/10",
            hypothesis.confidence_level
        ));
        lines.push(format!(
            "- **Testable prediction**: {}\n",
            hypothesis.testable_prediction
        ));
        lines.push("**Evidence**:".to_string());
        bullets(lines, &hypothesis.evidence);
        lines.push(String::new());
    }
}

pub fn format_hypotheses_markdown(hypotheses: &HypothesisSet) -> String {
    let mut lines = vec!["# Problem and Insight Hypotheses\n".to_string()];
    lines.push(format!("## Summary\n\n{}\n", hypotheses.synthesis_summary));

    lines.push("## Problem Hypotheses\n".to_string());
    hypothesis_section(&mut lines, "Problem Hypothesis", &hypotheses.problem_hypotheses);

    lines.push("---\n".to_string());
    lines.push("## Insight Hypotheses\n".to_string());
    hypothesis_section(&mut lines, "Insight Hypothesis", &hypotheses.insight_hypotheses);

    lines.join("\n")
}

pub fn format_validation_questions_markdown(validation: &ValidationQuestionSet) -> String {
    let mut lines = vec!["# Hypothesis Validation Questions\n".to_string()];
    lines.push(format!(
        "## Validation Strategy\n\n{}\n",
        validation.validation_strategy
    ));

    lines.push("## Priority Order".to_string());
    numbered(&mut lines, &validation.priority_order);
    lines.push("\n## Questions\n".to_string());
    question_list(&mut lines, &validation.questions);

    lines.join("\n")
}

fn join_numbers(numbers: &[u32]) -> String {
    numbers
        .iter()
        .map(|n| n.to_string())
        .collect::<Vec<_>>()
        .join(", ")
}

pub fn format_evaluation_markdown(report: &EvaluationReport) -> String {
    let mut lines = vec![format!("# {}\n", report.title)];
    lines.push(format!("**Evaluation date**: {}\n", report.evaluation_date));

    lines.push("## Comparison Summary\n".to_string());
    lines.push(format!(
        "- **Initial questions**: {}",
        report.comparison.question_count_initial
    ));
    lines.push(format!(
        "- **Validation questions**: {}",
        report.comparison.question_count_validation
    ));
    lines.push(format!(
        "- **Question count change**: {:+.1}%\n",
        report.comparison.count_change_percent
    ));

    lines.push("## Overall Assessment\n".to_string());
    lines.push(format!("{}\n", report.overall_assessment));

    lines.push("## Scores\n".to_string());
    for dimension in &report.evaluation_dimensions {
        lines.push(format!("### {}", dimension.dimension_name));
        lines.push(format!(
            "- **Initial questions**: {:.1}/5.0",
            dimension.initial_score.get()
        ));
        lines.push(format!(
            "- **Validation questions**: {:.1}/5.0",
            dimension.validation_score.get()
        ));
        lines.push(format!(
            "- **Improvement**: {:+.1} points\n",
            dimension.improvement_points
        ));
        lines.push(format!("**Explanation**: {}\n", dimension.explanation));
        lines.push("**Key changes**:".to_string());
        bullets(&mut lines, &dimension.key_changes);
        lines.push(String::new());
    }

    if !report.summary_scores.is_empty() {
        lines.push("## Summary Scores\n".to_string());
        lines.push("| Item | Score |".to_string());
        lines.push("|---|---|".to_string());
        for (name, score) in &report.summary_scores {
            lines.push(format!("| {} | {:.1} |", name, score));
        }
        lines.push(String::new());
    }

    lines.push("## Topic Mapping\n".to_string());
    for mapping in &report.question_mappings {
        lines.push(format!("### {}", mapping.topic));
        lines.push(format!(
            "- **Initial questions**: {}",
            join_numbers(&mapping.initial_questions)
        ));
        lines.push(format!(
            "- **Validation questions**: {}",
            join_numbers(&mapping.validation_questions)
        ));
        lines.push(format!("- **Depth level**: {}", mapping.depth_level));
        lines.push(format!("**Analysis**: {}\n", mapping.analysis));
    }

    lines.push("## Key Improvements\n".to_string());
    numbered(&mut lines, &report.key_improvements);
    lines.push(String::new());

    lines.push("## Strengths of Each Question Set\n".to_string());
    lines.push("### Initial Questions".to_string());
    bullets(&mut lines, &report.strengths_initial);
    lines.push(String::new());
    lines.push("### Validation Questions".to_string());
    bullets(&mut lines, &report.strengths_validation);
    lines.push(String::new());

    lines.push("## Recommendations\n".to_string());
    numbered(&mut lines, &report.recommendations);
    lines.push(String::new());

    lines.push("## Hybrid Version Proposals\n".to_string());
    bullets(&mut lines, &report.future_improvements);
    lines.push(String::new());

    lines.join("\n")
}

/// Write one Markdown report per output into `output_dir`
///
/// Creates the directory when missing. The evaluation report is written only when
/// present. Returns the written paths in write order.
pub async fn save_results(
    output_dir: &Path,
    results: &HearingResults,
    evaluation: Option<&EvaluationReport>,
) -> Result<Vec<PathBuf>> {
    fs::create_dir_all(output_dir)
        .await
        .with_context(|| format!("Failed to create output directory: {}", output_dir.display()))?;

    let mut documents = vec![
        (
            PERSONAS_FILE,
            "Persona report",
            format_personas_markdown(&results.personas),
        ),
        (
            INITIAL_QUESTIONS_FILE,
            "Initial question report",
            format_questions_markdown(&results.questions),
        ),
        (
            INTERVIEWS_FILE,
            "Interview result report",
            format_interviews_markdown(&results.interviews),
        ),
        (
            HYPOTHESES_FILE,
            "Hypothesis report",
            format_hypotheses_markdown(&results.hypotheses),
        ),
        (
            VALIDATION_QUESTIONS_FILE,
            "Validation question report",
            format_validation_questions_markdown(&results.validation),
        ),
    ];
    if let Some(report) = evaluation {
        documents.push((
            EVALUATION_FILE,
            "Evaluation report",
            format_evaluation_markdown(report),
        ));
    }

    let mut written = Vec::with_capacity(documents.len());
    for (file_name, description, content) in documents {
        let path = output_dir.join(file_name);
        fs::write(&path, content)
            .await
            .with_context(|| format!("Failed to write {}", path.display()))?;
        log_artifact_written!(path.display(), description);
        written.push(path);
    }

    Ok(written)
}
