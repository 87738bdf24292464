//! cadence - 周期タスクランナーのドライバ
//!
//! 設定されたタスクを全て並行に launch し、全実行の完了を待ってから
//! 最終ステータス行を出力する。イベント行は core の ConsoleSink が
//! stdout に書き、診断ログは stderr に出る（RUST_LOG で制御）。

use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use clap::Parser;
use serde::Deserialize;
use tracing::debug;
use tracing_subscriber::EnvFilter;

use cadence_core::impls::{ConsoleSink, DEFAULT_SPINS, SpinWork};
use cadence_core::ports::{IdGenerator, SystemClock, UlidGenerator};
use cadence_core::{PeriodicTask, RunSummary, Supervisor, TaskRunner, TaskSet};

/// Periodic-task runner: a fixed set of independent tasks, each running a
/// bounded number of iterations at its own period, all started concurrently.
#[derive(Debug, Parser)]
#[command(name = "cadence", version)]
struct Args {
    /// JSON task list: {"tasks":[{"name":..,"period_ms":..,"iterations":..}]}.
    /// Without this flag the built-in default pair is used.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Spin rounds burned by each iteration's work unit.
    #[arg(long, default_value_t = DEFAULT_SPINS)]
    spins: u64,

    /// Status line printed when every execution completed.
    #[arg(long, default_value = "ALL_TASKS_DONE")]
    success_line: String,

    /// Status line printed when the run failed.
    #[arg(long, default_value = "RUN_FAILED")]
    failure_line: String,
}

#[derive(Debug, Deserialize)]
struct RunConfig {
    tasks: Vec<TaskConfig>,
}

#[derive(Debug, Deserialize, PartialEq, Eq)]
struct TaskConfig {
    name: String,
    period_ms: u64,
    iterations: u32,
}

/// The built-in task list used when no config file is given.
fn default_tasks() -> Vec<TaskConfig> {
    vec![
        TaskConfig {
            name: "TASK_A".to_string(),
            period_ms: 10,
            iterations: 5,
        },
        TaskConfig {
            name: "TASK_B".to_string(),
            period_ms: 16,
            iterations: 5,
        },
    ]
}

fn load_config(path: &Path) -> anyhow::Result<Vec<TaskConfig>> {
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("reading config {}", path.display()))?;
    let config: RunConfig =
        serde_json::from_str(&raw).with_context(|| format!("parsing config {}", path.display()))?;
    Ok(config.tasks)
}

fn build_task_set(configs: Vec<TaskConfig>) -> anyhow::Result<TaskSet> {
    let mut tasks = Vec::with_capacity(configs.len());
    for config in configs {
        tasks.push(PeriodicTask::new(
            config.name,
            Duration::from_millis(config.period_ms),
            config.iterations,
        )?);
    }
    Ok(TaskSet::new(tasks)?)
}

async fn run(args: &Args) -> anyhow::Result<RunSummary> {
    let configs = match &args.config {
        Some(path) => load_config(path)?,
        None => default_tasks(),
    };
    let task_set = build_task_set(configs)?;
    debug!(tasks = task_set.len(), spins = args.spins, "configured");

    let ids: Arc<dyn IdGenerator> = Arc::new(UlidGenerator::new(SystemClock));
    let runner = TaskRunner::new(
        Arc::new(ConsoleSink::new()),
        Arc::new(SpinWork::new(args.spins)),
        Arc::clone(&ids),
    );
    let summary = Supervisor::new(runner, ids).run(task_set).await?;
    Ok(summary)
}

#[tokio::main]
async fn main() -> ExitCode {
    // 診断は stderr へ。stdout はイベント行と最終ステータス行のみ。
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();

    match run(&args).await {
        Ok(summary) if summary.is_success() => {
            println!("{}", args.success_line);
            ExitCode::SUCCESS
        }
        Ok(summary) => {
            for failure in summary.failures() {
                eprintln!("cadence: task {}: {}", failure.task, failure.reason);
            }
            println!("{}", args.failure_line);
            ExitCode::FAILURE
        }
        Err(e) => {
            eprintln!("cadence: {e:#}");
            println!("{}", args.failure_line);
            ExitCode::FAILURE
        }
    }
}
