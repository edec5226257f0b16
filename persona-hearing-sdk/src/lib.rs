use serde::{Deserialize, Serialize};

/// Tracing target that carries serialized [`HearingLog`] events.
pub const EVENT_TARGET: &str = "hearing_events";

/// Structured logging events emitted by hearing workflows
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum HearingLog {
    /// Phase started
    PhaseStarted {
        phase: usize,
        name: String,
        total_phases: usize,
    },
    /// Phase completed
    PhaseCompleted {
        phase: usize,
        name: String,
    },
    /// Phase failed
    PhaseFailed {
        phase: usize,
        name: String,
        error: String,
    },
    /// Task started (one persona interview, one evaluation run)
    TaskStarted {
        phase: usize,
        task_id: String,
        description: String,
        total_tasks: Option<usize>,
    },
    /// Task completed
    TaskCompleted {
        task_id: String,
        result: Option<String>,
    },
    /// Task failed
    TaskFailed {
        task_id: String,
        error: String,
    },
    /// Agent invocation started
    AgentStarted {
        task_id: String,
        agent_name: String,
        description: String,
    },
    /// Agent invocation completed
    AgentCompleted {
        task_id: String,
        agent_name: String,
        result: Option<String>,
    },
    /// Agent invocation failed
    AgentFailed {
        task_id: String,
        agent_name: String,
        error: String,
    },
    /// Report artifact written to disk
    ArtifactWritten {
        file_path: String,
        description: String,
    },
}

impl HearingLog {
    /// Emit this event as a JSON line on the [`EVENT_TARGET`] tracing target
    pub fn emit(&self) {
        match serde_json::to_string(self) {
            Ok(json) => tracing::info!(target: EVENT_TARGET, "{}", json),
            Err(e) => tracing::warn!(target: EVENT_TARGET, "failed to serialize event: {}", e),
        }
    }
}

/// Helper macros for workflow events
#[macro_export]
macro_rules! log_phase_start {
    ($phase:expr, $name:expr, $total:expr) => {
        $crate::HearingLog::PhaseStarted {
            phase: $phase,
            name: $name.to_string(),
            total_phases: $total,
        }
        .emit();
    };
}

#[macro_export]
macro_rules! log_phase_complete {
    ($phase:expr, $name:expr) => {
        $crate::HearingLog::PhaseCompleted {
            phase: $phase,
            name: $name.to_string(),
        }
        .emit();
    };
}

#[macro_export]
macro_rules! log_phase_failed {
    ($phase:expr, $name:expr, $error:expr) => {
        $crate::HearingLog::PhaseFailed {
            phase: $phase,
            name: $name.to_string(),
            error: $error.to_string(),
        }
        .emit();
    };
}

#[macro_export]
macro_rules! log_task_start {
    ($phase:expr, $task_id:expr, $desc:expr) => {
        $crate::HearingLog::TaskStarted {
            phase: $phase,
            task_id: $task_id.to_string(),
            description: $desc.to_string(),
            total_tasks: None,
        }
        .emit();
    };
    ($phase:expr, $task_id:expr, $desc:expr, $total:expr) => {
        $crate::HearingLog::TaskStarted {
            phase: $phase,
            task_id: $task_id.to_string(),
            description: $desc.to_string(),
            total_tasks: Some($total),
        }
        .emit();
    };
}

#[macro_export]
macro_rules! log_task_complete {
    ($task_id:expr) => {
        $crate::HearingLog::TaskCompleted {
            task_id: $task_id.to_string(),
            result: None,
        }
        .emit();
    };
    ($task_id:expr, $result:expr) => {
        $crate::HearingLog::TaskCompleted {
            task_id: $task_id.to_string(),
            result: Some($result.to_string()),
        }
        .emit();
    };
}

#[macro_export]
macro_rules! log_task_failed {
    ($task_id:expr, $error:expr) => {
        $crate::HearingLog::TaskFailed {
            task_id: $task_id.to_string(),
            error: $error.to_string(),
        }
        .emit();
    };
}

#[macro_export]
macro_rules! log_agent_start {
    ($task_id:expr, $agent:expr, $desc:expr) => {
        $crate::HearingLog::AgentStarted {
            task_id: $task_id.to_string(),
            agent_name: $agent.to_string(),
            description: $desc.to_string(),
        }
        .emit();
    };
}

#[macro_export]
macro_rules! log_agent_complete {
    ($task_id:expr, $agent:expr) => {
        $crate::HearingLog::AgentCompleted {
            task_id: $task_id.to_string(),
            agent_name: $agent.to_string(),
            result: None,
        }
        .emit();
    };
    ($task_id:expr, $agent:expr, $result:expr) => {
        $crate::HearingLog::AgentCompleted {
            task_id: $task_id.to_string(),
            agent_name: $agent.to_string(),
            result: Some($result.to_string()),
        }
        .emit();
    };
}

#[macro_export]
macro_rules! log_agent_failed {
    ($task_id:expr, $agent:expr, $error:expr) => {
        $crate::HearingLog::AgentFailed {
            task_id: $task_id.to_string(),
            agent_name: $agent.to_string(),
            error: $error.to_string(),
        }
        .emit();
    };
}

#[macro_export]
macro_rules! log_artifact_written {
    ($path:expr, $desc:expr) => {
        $crate::HearingLog::ArtifactWritten {
            file_path: $path.to_string(),
            description: $desc.to_string(),
        }
        .emit();
    };
}

// ============================================================================
// Console Logging Macros
// ============================================================================
// Human-readable progress narration, complementing the structured HearingLog
// events above. Callers decide whether narration is enabled.
// ============================================================================

/// Logs the start of a workflow phase with a header and description.
///
/// # Example
/// ```
/// use persona_hearing_sdk::log_phase_start_console;
/// log_phase_start_console!(1, "Persona Generation", "Generating 15 personas");
/// ```
///
/// Outputs:
/// ```text
/// ═══ PHASE 1: Persona Generation ═══
/// Generating 15 personas
/// ```
#[macro_export]
macro_rules! log_phase_start_console {
    ($phase:expr, $title:expr, $description:expr) => {
        println!("\x1b[1;36m═══ PHASE {}: {} ═══\x1b[0m", $phase, $title);
        println!("\x1b[36m{}\x1b[0m", $description);
    };
}

/// Logs progress of an operation.
///
/// # Example
/// ```
/// use persona_hearing_sdk::log_progress;
/// log_progress!(3, 5, "interviews");
/// ```
///
/// Outputs:
/// ```text
/// Progress: 3/5 interviews
/// ```
#[macro_export]
macro_rules! log_progress {
    ($current:expr, $total:expr, $item_type:expr) => {
        println!(
            "\x1b[36mProgress: {}/{} {}\x1b[0m",
            $current, $total, $item_type
        );
    };
}

/// Logs an informational message.
///
/// # Example
/// ```
/// use persona_hearing_sdk::log_info;
/// log_info!("Interviewing {} personas", 3);
/// ```
#[macro_export]
macro_rules! log_info {
    ($message:expr) => {
        println!("\x1b[36mℹ {}\x1b[0m", $message);
    };
    ($fmt:expr, $($arg:tt)*) => {
        println!("\x1b[36mℹ {}\x1b[0m", format!($fmt, $($arg)*));
    };
}

/// Logs a warning message.
///
/// Outputs:
/// ```text
/// ⚠ Warning: Evaluation failed
/// ```
#[macro_export]
macro_rules! log_warning {
    ($message:expr) => {
        println!("\x1b[33m⚠ Warning: {}\x1b[0m", $message);
    };
    ($fmt:expr, $($arg:tt)*) => {
        println!("\x1b[33m⚠ Warning: {}\x1b[0m", format!($fmt, $($arg)*));
    };
}

/// Logs that a file has been saved.
///
/// Outputs:
/// ```text
/// ✓ Saved: outputs/personas.md
/// ```
#[macro_export]
macro_rules! log_file_saved {
    ($path:expr) => {
        println!("\x1b[32m✓ Saved: {}\x1b[0m", $path);
    };
}
