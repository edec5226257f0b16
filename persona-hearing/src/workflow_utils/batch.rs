//! Batch execution utilities for per-item task processing

use anyhow::{anyhow, Result};
use futures::{stream::FuturesUnordered, Future, StreamExt};
use tokio::sync::Semaphore;

/// Context provided to each task in a batch
#[derive(Debug, Clone, Copy)]
pub struct TaskContext {
    /// Phase number (for logging)
    pub phase: usize,
    /// Task number (1-indexed for display)
    pub task_number: usize,
    /// Total number of tasks in this batch
    pub total_tasks: usize,
}

/// Execute one task per item, with optional concurrency
///
/// # Arguments
/// - `phase`: Phase number for context
/// - `items`: Items to process
/// - `batch_size`: Maximum concurrent tasks. `0` or `1` runs the items strictly
///   one after another, in input order.
/// - `task_executor`: Function that processes each item, receives (item, context)
///
/// # Returns
/// Vector of results in input order, whatever order the tasks complete in.
/// Each task writes into its own pre-sized slot.
///
/// # Error Handling
/// Fails fast - if any task fails, the remaining tasks are dropped and the error
/// is returned.
///
/// # Example
/// ```rust,ignore
/// let responses = execute_batch(3, personas, 4, |persona, ctx| async move {
///     interview(persona, ctx).await
/// })
/// .await?;
/// ```
pub async fn execute_batch<T, F, Fut, R>(
    phase: usize,
    items: Vec<T>,
    batch_size: usize,
    task_executor: F,
) -> Result<Vec<R>>
where
    F: Fn(T, TaskContext) -> Fut,
    Fut: Future<Output = Result<R>>,
{
    let total = items.len();
    let context = |idx: usize| TaskContext {
        phase,
        task_number: idx + 1,
        total_tasks: total,
    };

    if batch_size <= 1 {
        let mut results = Vec::with_capacity(total);
        for (idx, item) in items.into_iter().enumerate() {
            results.push(task_executor(item, context(idx)).await?);
        }
        return Ok(results);
    }

    let sem = Semaphore::new(batch_size);
    let sem = &sem;
    let executor = &task_executor;
    let mut tasks = FuturesUnordered::new();

    for (idx, item) in items.into_iter().enumerate() {
        let ctx = context(idx);
        tasks.push(async move {
            // Acquire permit (waits while batch_size tasks are running)
            let _permit = sem
                .acquire()
                .await
                .map_err(|_| anyhow!("Semaphore closed"))?;

            executor(item, ctx).await.map(|result| (idx, result))
        });
    }

    let mut slots: Vec<Option<R>> = (0..total).map(|_| None).collect();
    while let Some(result) = tasks.next().await {
        let (idx, value) = result?;
        slots[idx] = Some(value);
    }

    slots
        .into_iter()
        .enumerate()
        .map(|(idx, slot)| slot.ok_or_else(|| anyhow!("Task {} produced no result", idx + 1)))
        .collect()
}
