//! State - 実行とランの状態
//!
//! 状態遷移は一方向のみ。完了した実行が Running に戻ることはなく、
//! キャンセル遷移は存在しない（ランチ後は必ず完走する）。

use serde::{Deserialize, Serialize};

/// ExecutionState は1つの実行の状態を表現
///
/// # 状態遷移
/// - running: イテレーション消化中
/// - completed: 予算を使い切って終了（唯一の終端状態）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExecutionState {
    Running,
    Completed,
}

impl ExecutionState {
    pub fn is_terminal(&self) -> bool {
        matches!(self, ExecutionState::Completed)
    }
}

/// RunState はラン全体の集約状態を表現
///
/// # 状態遷移
/// - running: 少なくとも1つの実行が未完
/// - completed: 全実行が完了
/// - failed: 実行を失った（panic で落ちた実行がある）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RunState {
    Running,
    Completed,
    Failed,
}
