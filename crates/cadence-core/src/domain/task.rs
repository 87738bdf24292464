use serde::Serialize;
use std::fmt;
use std::time::Duration;

use super::errors::CadenceError;

/// Opaque task identifier, unique within one run. Observability only.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct TaskName(String);

impl TaskName {
    pub fn new(s: impl Into<String>) -> Self {
        Self(s.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TaskName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Immutable description of one periodic task: identity, cadence, budget.
///
/// `period` is the delay between the end of one iteration's work and the
/// start of the next (a sleep, not a deadline), so the actual spacing between
/// iteration starts is `period + work_duration`.
///
/// Fields are private and there is no mutation after construction, so a value
/// can be read from any number of threads without synchronization.
///
/// # Fail-fast 設計
/// - `iterations == 0` は構築時に `ZeroIterationBudget` で拒否
/// - 不正な値を持つ `PeriodicTask` は存在できない
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PeriodicTask {
    name: TaskName,
    period: Duration,
    iterations: u32,
}

impl PeriodicTask {
    /// Create a task descriptor.
    ///
    /// The iteration budget must be at least 1; a budget of zero is a
    /// configuration error, never "zero iterations".
    pub fn new(
        name: impl Into<TaskName>,
        period: Duration,
        iterations: u32,
    ) -> Result<Self, CadenceError> {
        let name = name.into();
        if iterations == 0 {
            return Err(CadenceError::ZeroIterationBudget { task: name });
        }
        Ok(Self {
            name,
            period,
            iterations,
        })
    }

    pub fn name(&self) -> &TaskName {
        &self.name
    }

    pub fn period(&self) -> Duration {
        self.period
    }

    /// Total number of iterations this task performs before terminating.
    pub fn iterations(&self) -> u32 {
        self.iterations
    }
}

impl From<&str> for TaskName {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

impl From<String> for TaskName {
    fn from(s: String) -> Self {
        Self::new(s)
    }
}
