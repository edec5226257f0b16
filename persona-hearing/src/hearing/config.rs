//! Workflow configuration
//!
//! Built once at process entry from the command line and the environment, then
//! handed by reference to the workflow. Nothing below this point reads the
//! environment.

use std::fmt;
use std::path::{Path, PathBuf};
use std::time::Duration;

use thiserror::Error;

use crate::hearing::cli::Args;

pub const DEFAULT_NUM_PERSONAS: usize = 15;
pub const DEFAULT_OUTPUT_DIR: &str = "outputs";
pub const DEFAULT_INTERVIEW_CONCURRENCY: usize = 1;
pub const DEFAULT_MODEL: &str = "gpt-4.1";
pub const DEFAULT_BASE_URL: &str = "https://api.openai.com/v1";
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 300;

pub const API_KEY_VAR: &str = "OPENAI_API_KEY";
pub const MODEL_VAR: &str = "OPENAI_MODEL";
pub const BASE_URL_VAR: &str = "OPENAI_BASE_URL";

/// Problems detected before any phase runs
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("{var} is not set; define it in the environment or in a .env file")]
    MissingCredential { var: &'static str },

    #[error("input file not found: {}", path.display())]
    InputNotFound { path: PathBuf },

    #[error("failed to read input file {}: {source}", path.display())]
    InputUnreadable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("theme is empty")]
    EmptyTheme,

    #[error("--num-personas must be at least 1")]
    ZeroPersonas,

    #[error("--interview-concurrency must be at least 1")]
    ZeroConcurrency,
}

/// Remote model settings
#[derive(Clone)]
pub struct ModelConfig {
    pub api_key: String,
    pub model: String,
    pub base_url: String,
    /// Per-call timeout, enforced by the HTTP client
    pub request_timeout: Duration,
}

impl Default for ModelConfig {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            model: DEFAULT_MODEL.to_string(),
            base_url: DEFAULT_BASE_URL.to_string(),
            request_timeout: Duration::from_secs(DEFAULT_REQUEST_TIMEOUT_SECS),
        }
    }
}

impl fmt::Debug for ModelConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ModelConfig")
            .field("api_key", &"<redacted>")
            .field("model", &self.model)
            .field("base_url", &self.base_url)
            .field("request_timeout", &self.request_timeout)
            .finish()
    }
}

/// Configuration for the hearing workflow
///
/// # Examples
///
/// ```no_run
/// use persona_hearing::hearing::WorkflowConfig;
///
/// let config = WorkflowConfig {
///     theme: "remote team collaboration tool".to_string(),
///     num_personas: 5,
///     ..Default::default()
/// };
/// ```
#[derive(Debug, Clone)]
pub struct WorkflowConfig {
    /// Hearing theme
    pub theme: String,
    /// Number of personas to generate
    pub num_personas: usize,
    /// Directory the Markdown reports are written to
    pub output_dir: PathBuf,
    /// Print progress narration
    pub verbose: bool,
    /// Maximum concurrent interviews in Phase 3 (1 = sequential)
    pub interview_concurrency: usize,
    pub model: ModelConfig,
}

impl Default for WorkflowConfig {
    fn default() -> Self {
        Self {
            theme: String::new(),
            num_personas: DEFAULT_NUM_PERSONAS,
            output_dir: PathBuf::from(DEFAULT_OUTPUT_DIR),
            verbose: true,
            interview_concurrency: DEFAULT_INTERVIEW_CONCURRENCY,
            model: ModelConfig::default(),
        }
    }
}

impl WorkflowConfig {
    /// Resolve the configuration from parsed arguments and an environment lookup
    ///
    /// `env` returns the value of a variable, or `None` when it is unset.
    /// Empty values count as unset.
    pub fn resolve<F>(args: &Args, env: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let lookup = |key: &str| env(key).filter(|value| !value.trim().is_empty());

        let api_key = lookup(API_KEY_VAR).ok_or(ConfigError::MissingCredential { var: API_KEY_VAR })?;

        let theme = match (&args.theme, &args.input) {
            (Some(theme), _) => theme.clone(),
            (None, Some(path)) => read_theme_file(path)?,
            (None, None) => return Err(ConfigError::EmptyTheme),
        };
        let theme = theme.trim().to_string();
        if theme.is_empty() {
            return Err(ConfigError::EmptyTheme);
        }

        if args.num_personas == 0 {
            return Err(ConfigError::ZeroPersonas);
        }
        if args.interview_concurrency == 0 {
            return Err(ConfigError::ZeroConcurrency);
        }

        let model = ModelConfig {
            api_key,
            model: args
                .model
                .clone()
                .or_else(|| lookup(MODEL_VAR))
                .unwrap_or_else(|| DEFAULT_MODEL.to_string()),
            base_url: lookup(BASE_URL_VAR)
                .map(|url| url.trim_end_matches('/').to_string())
                .unwrap_or_else(|| DEFAULT_BASE_URL.to_string()),
            request_timeout: Duration::from_secs(args.request_timeout),
        };

        Ok(Self {
            theme,
            num_personas: args.num_personas,
            output_dir: args.output_dir.clone(),
            verbose: !args.quiet,
            interview_concurrency: args.interview_concurrency,
            model,
        })
    }
}

fn read_theme_file(path: &Path) -> Result<String, ConfigError> {
    if !path.is_file() {
        return Err(ConfigError::InputNotFound {
            path: path.to_path_buf(),
        });
    }
    std::fs::read_to_string(path).map_err(|source| ConfigError::InputUnreadable {
        path: path.to_path_buf(),
        source,
    })
}
