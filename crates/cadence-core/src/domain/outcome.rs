//! Outcome model: the result shapes a run can record and explain later.
//!
//! This module is execution-agnostic: it does not know about tokio tasks or
//! sinks. It only defines the "shape" of what happened: per-execution
//! reports and the per-run aggregate.

use serde::{Deserialize, Serialize};
use std::time::Duration;

use super::ids::{ExecutionId, RunId};
use super::state::{ExecutionState, RunState};
use super::task::{PeriodicTask, TaskName};

/// Terminal report of one task execution.
///
/// Produced by the execution itself right before its thread of control
/// retires, so `completed_iterations` always equals the task's budget and
/// `state` is always terminal by the time a caller can observe the report.
#[derive(Debug, Clone, Serialize)]
pub struct ExecutionReport {
    pub execution_id: ExecutionId,
    pub task: PeriodicTask,
    pub completed_iterations: u32,
    pub state: ExecutionState,

    /// Wall-clock time from launch to completion.
    pub elapsed: Duration,
}

/// A lost execution: the task's name plus the reason its thread of control
/// disappeared without reporting.
#[derive(Debug, Clone, Serialize)]
pub struct RunFailure {
    pub task: TaskName,
    pub reason: String,
}

/// Aggregate result of one driver run (launch all, wait all).
#[derive(Debug, Clone, Serialize)]
pub struct RunSummary {
    run_id: RunId,
    state: RunState,
    reports: Vec<ExecutionReport>,
    failures: Vec<RunFailure>,
}

impl RunSummary {
    /// Aggregate the run state from what came back.
    ///
    /// All executions reported → Completed. Any lost execution → Failed.
    /// An empty run completes trivially.
    pub fn new(run_id: RunId, reports: Vec<ExecutionReport>, failures: Vec<RunFailure>) -> Self {
        let state = if failures.is_empty() {
            RunState::Completed
        } else {
            RunState::Failed
        };
        Self {
            run_id,
            state,
            reports,
            failures,
        }
    }

    pub fn run_id(&self) -> RunId {
        self.run_id
    }

    pub fn state(&self) -> RunState {
        self.state
    }

    pub fn is_success(&self) -> bool {
        self.state == RunState::Completed
    }

    pub fn reports(&self) -> &[ExecutionReport] {
        &self.reports
    }

    pub fn failures(&self) -> &[RunFailure] {
        &self.failures
    }

    pub fn counts(&self) -> RunCounts {
        RunCounts {
            launched: self.reports.len() + self.failures.len(),
            completed: self.reports.len(),
            failed: self.failures.len(),
        }
    }
}

/// Serializable counters for status output.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunCounts {
    pub launched: usize,
    pub completed: usize,
    pub failed: usize,
}
