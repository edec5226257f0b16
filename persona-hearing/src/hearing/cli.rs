//! CLI argument parsing for the hearing workflow

use std::path::PathBuf;

use clap::{ArgGroup, Parser};

use crate::hearing::config::{
    DEFAULT_INTERVIEW_CONCURRENCY, DEFAULT_NUM_PERSONAS, DEFAULT_OUTPUT_DIR,
    DEFAULT_REQUEST_TIMEOUT_SECS,
};

const EXAMPLES: &str = r#"Examples:
  # Give the theme directly
  persona-hearing --theme "A new SaaS business idea"

  # Read the theme from a file
  persona-hearing --input inputs/theme.md

  # Choose the persona count
  persona-hearing --theme "Remote work tooling" --num-personas 20

  # Choose the output directory and interview in parallel
  persona-hearing --theme "Health tracking app" --output-dir outputs/health_app --interview-concurrency 4"#;

/// Multi-persona hearing: personas, interviews, hypotheses and validation questions
#[derive(Parser, Debug, Clone)]
#[command(name = "persona-hearing", version, after_help = EXAMPLES)]
#[command(group(ArgGroup::new("source").required(true).args(["theme", "input"])))]
pub struct Args {
    /// Hearing theme, given directly
    #[arg(long)]
    pub theme: Option<String>,

    /// Path to a file containing the theme (Markdown recommended)
    #[arg(long)]
    pub input: Option<PathBuf>,

    /// Number of personas to generate
    #[arg(long, default_value_t = DEFAULT_NUM_PERSONAS)]
    pub num_personas: usize,

    /// Directory the Markdown reports are written to
    #[arg(long, default_value = DEFAULT_OUTPUT_DIR)]
    pub output_dir: PathBuf,

    /// Suppress progress narration
    #[arg(long)]
    pub quiet: bool,

    /// Number of persona interviews to run in parallel (default: 1 for sequential)
    #[arg(long, default_value_t = DEFAULT_INTERVIEW_CONCURRENCY)]
    pub interview_concurrency: usize,

    /// Model name (overrides OPENAI_MODEL)
    #[arg(long)]
    pub model: Option<String>,

    /// Per-request timeout in seconds
    #[arg(long, default_value_t = DEFAULT_REQUEST_TIMEOUT_SECS)]
    pub request_timeout: u64,
}
