//! Observable events produced by a running execution.
//!
//! Event order is total within one task (iteration 1, 2, ..., then the
//! completion event) because a single execution produces them sequentially.
//! Across tasks there is no ordering guarantee at all.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::task::TaskName;

/// One observable event from a task execution.
///
/// The `Display` impl is the wire format consumed by the output sink:
/// one line per event, `[<name>] iteration <i>` / `[<name>] done`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum TaskEvent {
    /// One iteration's work unit finished. `seq` is 1-based and dense:
    /// a budget-n execution emits exactly seq 1..=n with no gaps.
    Iteration { task: String, seq: u32 },

    /// The execution exhausted its iteration budget.
    Completed { task: String },
}

impl TaskEvent {
    pub fn iteration(task: &TaskName, seq: u32) -> Self {
        Self::Iteration {
            task: task.as_str().to_string(),
            seq,
        }
    }

    pub fn completed(task: &TaskName) -> Self {
        Self::Completed {
            task: task.as_str().to_string(),
        }
    }

    /// Name of the task this event belongs to.
    pub fn task(&self) -> &str {
        match self {
            TaskEvent::Iteration { task, .. } => task,
            TaskEvent::Completed { task } => task,
        }
    }
}

impl fmt::Display for TaskEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TaskEvent::Iteration { task, seq } => write!(f, "[{task}] iteration {seq}"),
            TaskEvent::Completed { task } => write!(f, "[{task}] done"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn iteration_renders_as_observability_line() {
        let ev = TaskEvent::iteration(&TaskName::new("TASK_A"), 3);
        assert_eq!(ev.to_string(), "[TASK_A] iteration 3");
    }

    #[test]
    fn completion_renders_as_done_line() {
        let ev = TaskEvent::completed(&TaskName::new("TASK_B"));
        assert_eq!(ev.to_string(), "[TASK_B] done");
    }

    #[test]
    fn event_is_tagged_enum() {
        let ev = TaskEvent::iteration(&TaskName::new("X"), 1);
        let v: serde_json::Value = serde_json::to_value(&ev).unwrap();
        // Example shape: {"kind":"iteration","task":"X","seq":1}
        assert_eq!(v["kind"], "iteration");
        assert_eq!(v["task"], "X");
        assert_eq!(v["seq"], 1);
    }

    #[test]
    fn task_accessor_works_for_both_kinds() {
        let name = TaskName::new("T");
        assert_eq!(TaskEvent::iteration(&name, 1).task(), "T");
        assert_eq!(TaskEvent::completed(&name).task(), "T");
    }
}
