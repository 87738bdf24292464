//! Supervisor: the driver composition around the runner.
//!
//! A run is: validate the task list, launch every task concurrently, wait
//! for every handle, aggregate a summary. The wait order is irrelevant;
//! each `wait` only synchronizes with its own execution.

use std::collections::HashSet;
use std::sync::Arc;

use tracing::{debug, info, warn};

use crate::domain::{CadenceError, PeriodicTask, RunFailure, RunId, RunSummary};
use crate::ports::IdGenerator;
use crate::runner::{ExecutionHandle, TaskRunner};

/// Ordered, validated collection of task descriptors for one run.
///
/// # Fail-fast 設計
/// - 重複する task name は構築時に `DuplicateTaskName` で拒否
/// - 空のリストは許可（ランは自明に完了する）
#[derive(Debug, Clone)]
pub struct TaskSet {
    tasks: Vec<PeriodicTask>,
}

impl TaskSet {
    pub fn new(tasks: Vec<PeriodicTask>) -> Result<Self, CadenceError> {
        let mut seen = HashSet::new();
        for task in &tasks {
            if !seen.insert(task.name().as_str().to_string()) {
                return Err(CadenceError::DuplicateTaskName(task.name().clone()));
            }
        }
        Ok(Self { tasks })
    }

    pub fn iter(&self) -> impl Iterator<Item = &PeriodicTask> {
        self.tasks.iter()
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }
}

/// Supervisor drives a full run against one runner.
pub struct Supervisor {
    runner: TaskRunner,
    ids: Arc<dyn IdGenerator>,
}

impl Supervisor {
    pub fn new(runner: TaskRunner, ids: Arc<dyn IdGenerator>) -> Self {
        Self { runner, ids }
    }

    /// Launch every task, then wait for every execution.
    ///
    /// A launch failure aborts immediately: the error propagates without
    /// waiting on already-launched executions (they are left to run; the
    /// caller terminates the process right after, which reclaims them).
    ///
    /// A panicked execution does not abort the run: it is recorded as a
    /// per-task failure, the remaining handles are still awaited, and the
    /// summary comes back `Failed`.
    pub async fn run(&self, tasks: TaskSet) -> Result<RunSummary, CadenceError> {
        let run_id: RunId = self.ids.generate_run_id();
        info!(run = %run_id, tasks = tasks.len(), "starting run");

        let mut handles: Vec<ExecutionHandle> = Vec::with_capacity(tasks.len());
        for task in tasks.iter() {
            handles.push(self.runner.launch(task.clone())?);
        }

        let mut reports = Vec::with_capacity(handles.len());
        let mut failures = Vec::new();
        for handle in handles {
            let task = handle.task().clone();
            match handle.wait().await {
                Ok(report) => {
                    debug!(task = %task, iterations = report.completed_iterations, "execution reported");
                    reports.push(report);
                }
                Err(e) => {
                    warn!(task = %task, error = %e, "execution lost");
                    failures.push(RunFailure {
                        task,
                        reason: e.to_string(),
                    });
                }
            }
        }

        let summary = RunSummary::new(run_id, reports, failures);
        info!(run = %run_id, state = ?summary.state(), "run finished");
        Ok(summary)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{RunState, TaskEvent, TaskName};
    use crate::impls::{MemorySink, NoopWork};
    use crate::ports::{SystemClock, UlidGenerator};
    use std::sync::Arc;
    use std::time::Duration;

    fn default_pair() -> TaskSet {
        TaskSet::new(vec![
            PeriodicTask::new("TASK_A", Duration::from_millis(10), 5).unwrap(),
            PeriodicTask::new("TASK_B", Duration::from_millis(16), 5).unwrap(),
        ])
        .unwrap()
    }

    fn supervisor(sink: Arc<MemorySink>) -> Supervisor {
        let ids: Arc<dyn IdGenerator> = Arc::new(UlidGenerator::new(SystemClock));
        let runner = TaskRunner::new(sink, Arc::new(NoopWork), Arc::clone(&ids));
        Supervisor::new(runner, ids)
    }

    #[test]
    fn duplicate_task_names_are_rejected() {
        let err = TaskSet::new(vec![
            PeriodicTask::new("A", Duration::from_millis(10), 5).unwrap(),
            PeriodicTask::new("A", Duration::from_millis(16), 5).unwrap(),
        ])
        .unwrap_err();
        assert!(matches!(
            err,
            CadenceError::DuplicateTaskName(ref name) if name.as_str() == "A"
        ));
    }

    #[tokio::test(start_paused = true)]
    async fn default_pair_runs_to_completion() {
        let sink = Arc::new(MemorySink::new());
        let summary = supervisor(Arc::clone(&sink))
            .run(default_pair())
            .await
            .unwrap();

        assert_eq!(summary.state(), RunState::Completed);
        assert_eq!(summary.counts().launched, 2);
        assert_eq!(summary.counts().completed, 2);

        // 5 iterations + 1 done per task
        assert_eq!(sink.len(), 12);
        for name in ["TASK_A", "TASK_B"] {
            let events = sink.events_for(name);
            assert_eq!(events.len(), 6);
            assert_eq!(events[5], TaskEvent::completed(&TaskName::new(name)));
        }
    }

    #[tokio::test(start_paused = true)]
    async fn empty_task_set_completes_trivially() {
        let sink = Arc::new(MemorySink::new());
        let summary = supervisor(Arc::clone(&sink))
            .run(TaskSet::new(vec![]).unwrap())
            .await
            .unwrap();

        assert!(summary.is_success());
        assert!(sink.is_empty());
    }

    // Real-clock smoke test: both tasks complete within a bounded window.
    // The lower bound is the sum of requested sleeps for the slower task;
    // the upper bound is deliberately generous for scheduler jitter.
    #[tokio::test]
    async fn concurrent_tasks_finish_within_a_bounded_window() {
        let sink = Arc::new(MemorySink::new());
        let tasks = TaskSet::new(vec![
            PeriodicTask::new("A", Duration::from_millis(2), 3).unwrap(),
            PeriodicTask::new("B", Duration::from_millis(3), 3).unwrap(),
        ])
        .unwrap();

        let started = std::time::Instant::now();
        let summary = supervisor(Arc::clone(&sink)).run(tasks).await.unwrap();
        let elapsed = started.elapsed();

        assert!(summary.is_success());
        assert!(elapsed >= Duration::from_millis(9), "elapsed = {elapsed:?}");
        assert!(elapsed < Duration::from_secs(5), "elapsed = {elapsed:?}");
        assert_eq!(sink.len(), 8);
    }
}
