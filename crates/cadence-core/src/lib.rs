//! cadence-core
//!
//! Core building blocks for the cadence periodic-task runner.
//!
//! # モジュール構成
//! - **domain**: ドメインモデル（ids, task, state, events, errors, outcome）
//! - **ports**: 抽象化レイヤー（EventSink, WorkUnit, Clock, IdGenerator）
//! - **impls**: 実装（ConsoleSink, MemorySink, SpinWork など）
//! - **runner**: 実行エンジン（launch → 独立した thread of control で周期実行）
//! - **supervisor**: ドライバ合成（launch all → wait all → RunSummary）
//!
//! # 実行モデル
//! タスクごとに 1 本の tokio task（multi-thread runtime 上で並列実行）。
//! イテレーションは work → emit → sleep の順で、sleep はデッドラインではなく
//! 単純な遅延。つまりイテレーション間隔は `period + work_duration` になる。

pub mod domain;
pub mod impls;
pub mod ports;
pub mod runner;
pub mod supervisor;

pub use domain::{
    CadenceError, ExecutionReport, ExecutionState, PeriodicTask, RunCounts, RunState, RunSummary,
    TaskEvent, TaskName,
};
pub use runner::{ExecutionHandle, TaskRunner};
pub use supervisor::{Supervisor, TaskSet};
