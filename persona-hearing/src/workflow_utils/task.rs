//! Task and phase execution utilities with automatic logging

use anyhow::Result;
use std::future::Future;

use persona_hearing_sdk::{
    log_phase_complete, log_phase_failed, log_phase_start, log_task_complete, log_task_failed,
    log_task_start,
};

use crate::workflow_utils::batch::TaskContext;

/// Execute a single task with automatic logging
///
/// Wraps task execution with:
/// - `log_task_start` before execution
/// - `log_task_complete` on success
/// - `log_task_failed` on error
///
/// # Arguments
/// - `task_id`: Unique identifier for this task
/// - `description`: Human-readable description
/// - `ctx`: Task context (phase, task number, total)
/// - `executor`: Async function that performs the work and returns (result, summary_message)
pub async fn execute_task<F, Fut, R>(
    task_id: impl Into<String>,
    description: impl Into<String>,
    ctx: TaskContext,
    executor: F,
) -> Result<R>
where
    F: FnOnce() -> Fut,
    Fut: Future<Output = Result<(R, String)>>,
{
    let task_id = task_id.into();
    let description = description.into();

    log_task_start!(ctx.phase, &task_id, &description, ctx.total_tasks);

    match executor().await {
        Ok((result, summary)) => {
            log_task_complete!(&task_id, summary);
            Ok(result)
        }
        Err(e) => {
            log_task_failed!(&task_id, format!("{:#}", e));
            Err(e)
        }
    }
}

/// Execute a whole workflow phase with automatic logging
///
/// Emits phase started/completed/failed events and attaches the phase name to
/// any error so the failing stage is visible at the top level.
pub async fn execute_phase<Fut, R>(
    phase: usize,
    name: &str,
    total_phases: usize,
    work: Fut,
) -> Result<R>
where
    Fut: Future<Output = Result<R>>,
{
    log_phase_start!(phase, name, total_phases);

    match work.await {
        Ok(result) => {
            log_phase_complete!(phase, name);
            Ok(result)
        }
        Err(e) => {
            log_phase_failed!(phase, name, format!("{:#}", e));
            Err(e.context(format!("Phase {} ({}) failed", phase, name)))
        }
    }
}
