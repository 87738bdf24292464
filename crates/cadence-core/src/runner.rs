//! TaskRunner: drives one PeriodicTask per independently scheduled tokio
//! task on the multi-thread runtime.
//!
//! The runner owns the injected capabilities (sink, work unit, id
//! generator); each launched execution owns its own `TaskExecution` state
//! for the task's lifetime and retires immediately after emitting the
//! completion event.

use std::sync::Arc;

use tokio::task::JoinHandle;
use tracing::{debug, warn};

use crate::domain::{
    CadenceError, ExecutionId, ExecutionReport, ExecutionState, PeriodicTask, TaskEvent, TaskName,
};
use crate::impls::{ConsoleSink, SpinWork};
use crate::ports::{EventSink, IdGenerator, SystemClock, UlidGenerator, WorkUnit};

/// Execution engine for periodic tasks.
///
/// `launch` begins an execution immediately and never blocks the caller;
/// the returned handle is the only way to synchronize with it. The runner
/// imposes no limit on the number of concurrent executions.
pub struct TaskRunner {
    sink: Arc<dyn EventSink>,
    work: Arc<dyn WorkUnit>,
    ids: Arc<dyn IdGenerator>,
}

impl TaskRunner {
    pub fn new(
        sink: Arc<dyn EventSink>,
        work: Arc<dyn WorkUnit>,
        ids: Arc<dyn IdGenerator>,
    ) -> Self {
        Self { sink, work, ids }
    }

    /// Begin executing `task` on its own thread of control.
    ///
    /// Fails with `LaunchFailed` when there is no runtime to spawn onto
    /// (the execution substrate refused to start a thread of control).
    /// That error is fatal for the whole run; no retry is attempted and no
    /// event is emitted for the task.
    pub fn launch(&self, task: PeriodicTask) -> Result<ExecutionHandle, CadenceError> {
        let runtime =
            tokio::runtime::Handle::try_current().map_err(|e| CadenceError::LaunchFailed {
                task: task.name().clone(),
                reason: e.to_string(),
            })?;

        let execution_id = self.ids.generate_execution_id();
        let name = task.name().clone();
        let execution = TaskExecution::new(execution_id, task);
        let sink = Arc::clone(&self.sink);
        let work = Arc::clone(&self.work);

        debug!(execution = %execution_id, task = %name, "launching execution");
        let join = runtime.spawn(execution.run(sink, work));

        Ok(ExecutionHandle {
            task: name,
            execution_id,
            join,
        })
    }
}

impl Default for TaskRunner {
    /// Production wiring: console output, CPU-burning work unit, ULID ids.
    fn default() -> Self {
        Self::new(
            Arc::new(ConsoleSink::new()),
            Arc::new(SpinWork::default()),
            Arc::new(UlidGenerator::new(SystemClock)),
        )
    }
}

/// Runtime state of one driven task. Owned exclusively by its execution;
/// nothing outside the execution can observe it mid-flight.
struct TaskExecution {
    execution_id: ExecutionId,
    task: PeriodicTask,
    completed_iterations: u32,
    state: ExecutionState,
}

impl TaskExecution {
    fn new(execution_id: ExecutionId, task: PeriodicTask) -> Self {
        Self {
            execution_id,
            task,
            completed_iterations: 0,
            state: ExecutionState::Running,
        }
    }

    /// The execution loop: work → emit → sleep per iteration, completion
    /// event after the loop.
    ///
    /// The sleep runs after every iteration, the final one included, so the
    /// completion line trails the last iteration line by one period. The
    /// cadence is sleep-based, not deadline-based: inter-iteration spacing
    /// is `period + work_duration`.
    async fn run(mut self, sink: Arc<dyn EventSink>, work: Arc<dyn WorkUnit>) -> ExecutionReport {
        let started = tokio::time::Instant::now();

        for seq in 1..=self.task.iterations() {
            work.run();

            let event = TaskEvent::iteration(self.task.name(), seq);
            if let Err(e) = sink.emit(&event).await {
                warn!(task = %self.task.name(), error = %e, "event emit failed");
            }
            self.completed_iterations = seq;

            tokio::time::sleep(self.task.period()).await;
        }

        self.state = ExecutionState::Completed;
        let event = TaskEvent::completed(self.task.name());
        if let Err(e) = sink.emit(&event).await {
            warn!(task = %self.task.name(), error = %e, "event emit failed");
        }
        debug!(execution = %self.execution_id, task = %self.task.name(), "execution completed");

        ExecutionReport {
            execution_id: self.execution_id,
            completed_iterations: self.completed_iterations,
            state: self.state,
            elapsed: started.elapsed(),
            task: self.task,
        }
    }
}

/// Opaque reference to one launched execution.
///
/// `wait` is the only synchronization point between the caller and the
/// execution: it returns only after the execution's thread of control has
/// fully terminated, so no event can be observed after it returns.
#[derive(Debug)]
pub struct ExecutionHandle {
    task: TaskName,
    execution_id: ExecutionId,
    join: JoinHandle<ExecutionReport>,
}

impl ExecutionHandle {
    pub fn task(&self) -> &TaskName {
        &self.task
    }

    pub fn execution_id(&self) -> ExecutionId {
        self.execution_id
    }

    /// Block until this execution completes and collect its report.
    ///
    /// An execution that panicked surfaces as `ExecutionPanicked`; there is
    /// no other way for `wait` to fail (cancellation does not exist).
    pub async fn wait(self) -> Result<ExecutionReport, CadenceError> {
        let Self { task, join, .. } = self;
        join.await.map_err(|e| CadenceError::ExecutionPanicked {
            task,
            reason: e.to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::impls::{MemorySink, NoopWork};
    use std::time::Duration;

    fn test_runner(sink: Arc<MemorySink>) -> TaskRunner {
        TaskRunner::new(
            sink,
            Arc::new(NoopWork),
            Arc::new(UlidGenerator::new(SystemClock)),
        )
    }

    fn task(name: &str, period_ms: u64, iterations: u32) -> PeriodicTask {
        PeriodicTask::new(name, Duration::from_millis(period_ms), iterations).unwrap()
    }

    #[tokio::test(start_paused = true)]
    async fn execution_emits_budget_iterations_then_done() {
        let sink = Arc::new(MemorySink::new());
        let runner = test_runner(Arc::clone(&sink));

        let handle = runner.launch(task("T", 10, 3)).unwrap();
        let report = handle.wait().await.unwrap();

        let events = sink.events();
        let name = TaskName::new("T");
        assert_eq!(
            events,
            vec![
                TaskEvent::iteration(&name, 1),
                TaskEvent::iteration(&name, 2),
                TaskEvent::iteration(&name, 3),
                TaskEvent::completed(&name),
            ]
        );
        assert_eq!(report.completed_iterations, 3);
        assert_eq!(report.state, ExecutionState::Completed);
    }

    #[tokio::test(start_paused = true)]
    async fn cadence_is_one_period_per_iteration_including_the_last() {
        let sink = Arc::new(MemorySink::new());
        let runner = test_runner(Arc::clone(&sink));

        let started = tokio::time::Instant::now();
        let report = runner.launch(task("T", 10, 3)).unwrap().wait().await.unwrap();

        // 仮想時刻では NoopWork は 0 時間なので、経過は sleep の合計そのもの
        assert_eq!(started.elapsed(), Duration::from_millis(30));
        assert_eq!(report.elapsed, Duration::from_millis(30));
    }

    #[tokio::test(start_paused = true)]
    async fn zero_period_task_completes_without_delay() {
        let sink = Arc::new(MemorySink::new());
        let runner = test_runner(Arc::clone(&sink));

        let started = tokio::time::Instant::now();
        let report = runner.launch(task("X", 0, 3)).unwrap().wait().await.unwrap();

        assert_eq!(report.completed_iterations, 3);
        assert_eq!(started.elapsed(), Duration::ZERO);
        assert_eq!(sink.events_for("X").len(), 4);
    }

    #[tokio::test(start_paused = true)]
    async fn concurrent_executions_keep_intra_task_order() {
        let sink = Arc::new(MemorySink::new());
        let runner = test_runner(Arc::clone(&sink));

        let ha = runner.launch(task("TASK_A", 10, 5)).unwrap();
        let hb = runner.launch(task("TASK_B", 16, 5)).unwrap();
        ha.wait().await.unwrap();
        hb.wait().await.unwrap();

        for name in ["TASK_A", "TASK_B"] {
            let events = sink.events_for(name);
            let expected_name = TaskName::new(name);
            assert_eq!(events.len(), 6);
            for (i, event) in events.iter().take(5).enumerate() {
                assert_eq!(event, &TaskEvent::iteration(&expected_name, i as u32 + 1));
            }
            assert_eq!(events[5], TaskEvent::completed(&expected_name));
        }
    }

    #[tokio::test(start_paused = true)]
    async fn no_events_arrive_after_wait_returns() {
        let sink = Arc::new(MemorySink::new());
        let runner = test_runner(Arc::clone(&sink));

        runner.launch(task("T", 10, 3)).unwrap().wait().await.unwrap();
        let seen = sink.len();

        // 実行スレッドが完全に終了していれば、これ以上イベントは来ない
        tokio::time::sleep(Duration::from_millis(500)).await;
        assert_eq!(sink.len(), seen);
    }

    #[test]
    fn launch_without_a_runtime_fails_and_emits_nothing() {
        let sink = Arc::new(MemorySink::new());
        let runner = test_runner(Arc::clone(&sink));

        let err = runner.launch(task("T", 10, 3)).unwrap_err();
        assert!(matches!(err, CadenceError::LaunchFailed { ref task, .. } if task.as_str() == "T"));
        assert!(sink.is_empty());
    }

    struct PanicWork;

    impl WorkUnit for PanicWork {
        fn run(&self) {
            panic!("intentional failure");
        }
    }

    #[tokio::test(start_paused = true)]
    async fn panicked_execution_surfaces_through_wait() {
        let sink: Arc<dyn EventSink> = Arc::new(MemorySink::new());
        let runner = TaskRunner::new(
            Arc::clone(&sink),
            Arc::new(PanicWork),
            Arc::new(UlidGenerator::new(SystemClock)),
        );

        let err = runner
            .launch(task("T", 10, 3))
            .unwrap()
            .wait()
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            CadenceError::ExecutionPanicked { ref task, .. } if task.as_str() == "T"
        ));
    }
}
