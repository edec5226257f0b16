/*!
Multi-Persona Hearing

Simulates a customer-discovery study for a theme with a text-generation model.

Phases:
    Phase 1: Persona generation
    Phase 2: Initial interview question design
    Phase 3: One simulated interview per persona
    Phase 4: Problem and insight hypotheses
    Phase 5: Hypothesis validation question design
    Evaluation: Compare the initial and validation question sets

Every output is saved as Markdown in the output directory. A failed evaluation
is reported and the five main reports are still saved. Ctrl-C stops the run at
any point up to and including the save step and exits with status 130.

Environment:
    OPENAI_API_KEY   required, may be set in a .env file
    OPENAI_MODEL     optional, overridden by --model
    OPENAI_BASE_URL  optional
    RUST_LOG         tracing filter for stderr diagnostics (default: warn)
*/

use std::process::ExitCode;
use std::sync::Arc;

use clap::Parser;
use tokio::signal;
use tracing_subscriber::EnvFilter;

use persona_hearing::hearing::{save_results, Args, HearingWorkflow, WorkflowConfig};
use persona_hearing::llm::OpenAiGenerator;
use persona_hearing_sdk::log_file_saved;

/// Exit status after a user interrupt (128 + SIGINT)
const INTERRUPTED_EXIT: u8 = 130;

#[tokio::main]
async fn main() -> ExitCode {
    // .env must be loaded before the filter reads RUST_LOG
    let env_file = dotenv::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    if let Some(path) = env_file {
        tracing::debug!(path = %path.display(), "loaded .env");
    }
    let args = Args::parse();

    let config = match WorkflowConfig::resolve(&args, |key| std::env::var(key).ok()) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("❌ Error: {}", e);
            return ExitCode::FAILURE;
        }
    };

    let generator = match OpenAiGenerator::new(&config.model) {
        Ok(generator) => generator,
        Err(e) => {
            eprintln!("❌ Error: failed to build HTTP client: {}", e);
            return ExitCode::FAILURE;
        }
    };
    tracing::info!(model = generator.model(), "using model");

    let workflow = HearingWorkflow::new(&config, Arc::new(generator));

    let run_and_save = async {
        let outcome = workflow.run_with_evaluation().await?;
        save_results(
            &config.output_dir,
            &outcome.results,
            outcome.evaluation.as_ref(),
        )
        .await
    };

    let saved = tokio::select! {
        result = run_and_save => result,
        Ok(()) = signal::ctrl_c() => {
            println!();
            println!("⚠ Interrupted by user");
            return ExitCode::from(INTERRUPTED_EXIT);
        }
    };

    let saved = match saved {
        Ok(saved) => saved,
        Err(e) => {
            eprintln!();
            eprintln!("❌ Error: {:#}", e);
            return ExitCode::FAILURE;
        }
    };

    for path in &saved {
        log_file_saved!(path.display());
    }

    println!();
    println!("{}", "=".repeat(80));
    println!("All processing complete");
    println!("{}", "=".repeat(80));
    println!("Results saved to: {}", config.output_dir.display());

    ExitCode::SUCCESS
}
