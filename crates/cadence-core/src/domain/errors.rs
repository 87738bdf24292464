use thiserror::Error;

use super::task::TaskName;

/// CadenceError はドメインエラー
///
/// 構成エラー（ZeroIterationBudget, DuplicateTaskName）は構築時に同期的に
/// 返る。LaunchFailed はラン全体を即座に中断する致命エラー。リトライや
/// 回復はどこにも存在しない。
#[derive(Debug, Error)]
pub enum CadenceError {
    #[error("task {task} has an iteration budget of zero")]
    ZeroIterationBudget { task: TaskName },

    #[error("duplicate task name {0}")]
    DuplicateTaskName(TaskName),

    #[error("failed to launch execution for task {task}: {reason}")]
    LaunchFailed { task: TaskName, reason: String },

    #[error("execution of task {task} was lost: {reason}")]
    ExecutionPanicked { task: TaskName, reason: String },
}

impl CadenceError {
    /// Name of the task this error is about, for operator diagnostics.
    pub fn task(&self) -> &TaskName {
        match self {
            CadenceError::ZeroIterationBudget { task } => task,
            CadenceError::DuplicateTaskName(task) => task,
            CadenceError::LaunchFailed { task, .. } => task,
            CadenceError::ExecutionPanicked { task, .. } => task,
        }
    }

    /// True for errors that must abort the whole run immediately.
    pub fn is_fatal(&self) -> bool {
        matches!(self, CadenceError::LaunchFailed { .. })
    }
}
