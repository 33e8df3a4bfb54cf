//! Pass execution strategies
//!
//! Consensus passes are independent of each other, so they can run one after
//! another or fan out over a rayon pool. Results always come back in pass
//! order.

use crate::error::Result;
use serde::{Deserialize, Serialize};

/// Execution mode selector
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExecutionMode {
    /// Run passes one at a time on the calling thread
    Sequential,
    /// Run passes concurrently on a dedicated thread pool
    Parallel,
}

impl Default for ExecutionMode {
    fn default() -> Self {
        if cfg!(feature = "parallel") {
            ExecutionMode::Parallel
        } else {
            ExecutionMode::Sequential
        }
    }
}

/// Run `task` for every index in `0..count`, returning results in index order.
///
/// `threads` caps the pool size in parallel mode (`None` = all cores).
/// Without the `parallel` feature every mode runs sequentially.
pub fn run_indexed<T, F>(
    mode: ExecutionMode,
    threads: Option<usize>,
    count: usize,
    task: F,
) -> Result<Vec<T>>
where
    T: Send,
    F: Fn(usize) -> T + Send + Sync,
{
    match mode {
        ExecutionMode::Sequential => Ok((0..count).map(task).collect()),
        ExecutionMode::Parallel => run_parallel(threads, count, task),
    }
}

#[cfg(feature = "parallel")]
fn run_parallel<T, F>(threads: Option<usize>, count: usize, task: F) -> Result<Vec<T>>
where
    T: Send,
    F: Fn(usize) -> T + Send + Sync,
{
    use crate::error::EngineError;
    use rayon::prelude::*;

    if count < 2 {
        return Ok((0..count).map(task).collect());
    }

    let pool = rayon::ThreadPoolBuilder::new()
        .num_threads(threads.unwrap_or_else(num_cpus::get).min(count))
        .thread_name(|i| format!("sugya-pass-{i}"))
        .build()
        .map_err(|e| EngineError::ThreadPool(e.to_string()))?;

    log::debug!(
        "running {count} passes on {} threads",
        pool.current_num_threads()
    );

    Ok(pool.install(|| (0..count).into_par_iter().map(task).collect()))
}

#[cfg(not(feature = "parallel"))]
fn run_parallel<T, F>(_threads: Option<usize>, count: usize, task: F) -> Result<Vec<T>>
where
    T: Send,
    F: Fn(usize) -> T + Send + Sync,
{
    Ok((0..count).map(task).collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sequential_preserves_order() {
        let out = run_indexed(ExecutionMode::Sequential, None, 5, |i| i * 10).unwrap();
        assert_eq!(out, vec![0, 10, 20, 30, 40]);
    }

    #[test]
    fn test_parallel_preserves_order() {
        let out = run_indexed(ExecutionMode::Parallel, Some(3), 16, |i| i * i).unwrap();
        assert_eq!(out, (0..16).map(|i| i * i).collect::<Vec<_>>());
    }

    #[test]
    fn test_zero_tasks() {
        let out: Vec<usize> = run_indexed(ExecutionMode::Parallel, None, 0, |i| i).unwrap();
        assert!(out.is_empty());
    }
}
