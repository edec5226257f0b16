//! Workflow orchestration for the hearing pipeline
//!
//! [`HearingWorkflow::run`] executes the five generation phases strictly in
//! sequence, threading each phase's typed output into the next phase's prompt
//! context. Any phase error aborts the run; there is no partial result.
//!
//! [`HearingWorkflow::evaluate`] is a separate stage that only reads the finished
//! results. [`HearingWorkflow::run_with_evaluation`] chains both and downgrades an
//! evaluation failure to a warning so the main results survive it.

use std::sync::Arc;

use anyhow::Result;
use chrono::Local;
use tracing::Instrument;
use uuid::Uuid;

use persona_hearing_sdk::log_warning;

use crate::hearing::config::WorkflowConfig;
use crate::hearing::evaluation::{evaluate_questions, EvaluationInput};
use crate::hearing::evaluation_types::EvaluationReport;
use crate::hearing::phase1_personas::generate_personas;
use crate::hearing::phase2_questions::design_questions;
use crate::hearing::phase3_interviews::conduct_interviews;
use crate::hearing::phase4_hypotheses::build_hypotheses;
use crate::hearing::phase5_validation::design_validation_questions;
use crate::hearing::types::{
    HypothesisSet, InterviewResponse, PersonaSet, QuestionSet, ValidationQuestionSet,
};
use crate::workflow_utils::agent::TextGenerator;
use crate::workflow_utils::task::execute_phase;

/// Phases reported in workflow events: five generation phases plus evaluation
pub const TOTAL_PHASES: usize = 6;
/// Phase number used for the evaluation stage
pub const EVALUATION_PHASE: usize = 6;

/// All outputs of one successful pipeline run
#[derive(Debug, Clone, PartialEq)]
pub struct HearingResults {
    pub personas: PersonaSet,
    pub questions: QuestionSet,
    /// One response per persona, in persona order
    pub interviews: Vec<InterviewResponse>,
    pub hypotheses: HypothesisSet,
    pub validation: ValidationQuestionSet,
}

impl HearingResults {
    pub fn into_parts(
        self,
    ) -> (
        PersonaSet,
        QuestionSet,
        Vec<InterviewResponse>,
        HypothesisSet,
        ValidationQuestionSet,
    ) {
        (
            self.personas,
            self.questions,
            self.interviews,
            self.hypotheses,
            self.validation,
        )
    }
}

/// Pipeline results plus the evaluation report, when evaluation succeeded
#[derive(Debug, Clone)]
pub struct HearingOutcome {
    pub results: HearingResults,
    pub evaluation: Option<EvaluationReport>,
}

/// Orchestrates one hearing run against a text generator
pub struct HearingWorkflow {
    theme: String,
    num_personas: usize,
    interview_concurrency: usize,
    verbose: bool,
    generator: Arc<dyn TextGenerator>,
}

impl HearingWorkflow {
    pub fn new(config: &WorkflowConfig, generator: Arc<dyn TextGenerator>) -> Self {
        Self {
            theme: config.theme.clone(),
            num_personas: config.num_personas,
            interview_concurrency: config.interview_concurrency,
            verbose: config.verbose,
            generator,
        }
    }

    pub fn theme(&self) -> &str {
        &self.theme
    }

    /// Run the five generation phases and return every phase's output
    ///
    /// # Errors
    ///
    /// Returns the first phase error, with the failing phase named in its context.
    pub async fn run(&self) -> Result<HearingResults> {
        let run_id = Uuid::new_v4();
        let span = tracing::info_span!("hearing_run", %run_id);

        self.run_phases().instrument(span).await
    }

    async fn run_phases(&self) -> Result<HearingResults> {
        let generator = self.generator.as_ref();
        let theme = self.theme.as_str();
        let verbose = self.verbose;

        if verbose {
            println!("{}", "=".repeat(80));
            println!("MULTI-PERSONA HEARING WORKFLOW");
            println!("{}", "=".repeat(80));
            println!("Theme: {}", theme);
            println!("Personas: {}", self.num_personas);
            println!();
        }

        let personas = execute_phase(
            1,
            "Persona Generation",
            TOTAL_PHASES,
            generate_personas(generator, theme, self.num_personas, verbose),
        )
        .await?;

        let questions = execute_phase(
            2,
            "Question Design",
            TOTAL_PHASES,
            design_questions(generator, theme, &personas, verbose),
        )
        .await?;

        let interviews = execute_phase(
            3,
            "Interview Simulation",
            TOTAL_PHASES,
            conduct_interviews(
                generator,
                &personas,
                &questions,
                self.interview_concurrency,
                verbose,
            ),
        )
        .await?;

        let hypotheses = execute_phase(
            4,
            "Hypothesis Building",
            TOTAL_PHASES,
            build_hypotheses(generator, theme, &interviews, verbose),
        )
        .await?;

        let validation = execute_phase(
            5,
            "Validation Question Design",
            TOTAL_PHASES,
            design_validation_questions(generator, theme, &hypotheses, verbose),
        )
        .await?;

        if verbose {
            println!("{}", "=".repeat(80));
            println!("WORKFLOW COMPLETE");
            println!("{}", "=".repeat(80));
            println!();
        }

        Ok(HearingResults {
            personas,
            questions,
            interviews,
            hypotheses,
            validation,
        })
    }

    /// Score the initial and validation question sets against each other
    pub async fn evaluate(&self, results: &HearingResults) -> Result<EvaluationReport> {
        let evaluation_date = Local::now().format("%Y-%m-%d").to_string();
        let input = EvaluationInput {
            theme: &self.theme,
            evaluation_date: &evaluation_date,
            initial: &results.questions,
            validation: &results.validation,
            hypotheses: &results.hypotheses,
        };

        execute_phase(
            EVALUATION_PHASE,
            "Question Evaluation",
            TOTAL_PHASES,
            evaluate_questions(self.generator.as_ref(), input, EVALUATION_PHASE, self.verbose),
        )
        .await
    }

    /// Run the pipeline, then attempt the evaluation
    ///
    /// Pipeline errors are returned. An evaluation error is reported as a warning
    /// and leaves `evaluation` empty.
    pub async fn run_with_evaluation(&self) -> Result<HearingOutcome> {
        let results = self.run().await?;

        let evaluation = match self.evaluate(&results).await {
            Ok(report) => Some(report),
            Err(e) => {
                tracing::warn!(error = %format!("{:#}", e), "evaluation failed");
                log_warning!("Evaluation failed: {:#}", e);
                if let Some(note) = evaluation_failure_note(self.verbose) {
                    println!("{}", note);
                }
                None
            }
        };

        Ok(HearingOutcome {
            results,
            evaluation,
        })
    }
}

/// Follow-up line printed after a failed evaluation; suppressed in quiet mode
fn evaluation_failure_note(verbose: bool) -> Option<&'static str> {
    verbose.then_some("   The main workflow results will still be saved")
}
