//! EventSink port - イベント記録の抽象化
//!
//! 実行ループが観測イベントを流し込む先。sink を差し替えることで、
//! テストはコンソール出力を読む代わりにイベントを直接捕捉できます。
//!
//! # 実装
//! - **ConsoleSink**: 1 行ずつ flush するコンソール出力（本番用）
//! - **MemorySink**: 順序付きで捕捉（テスト用）

use async_trait::async_trait;
use thiserror::Error;

use crate::domain::TaskEvent;

#[derive(Debug, Error)]
pub enum SinkError {
    #[error("sink write failed: {0}")]
    WriteFailed(String),
}

impl From<std::io::Error> for SinkError {
    fn from(e: std::io::Error) -> Self {
        SinkError::WriteFailed(e.to_string())
    }
}

/// EventSink はタスクイベントを記録
///
/// # 契約
/// - 1 イベント = 1 レコード。並行する emit 同士でレコードの途中が
///   混ざってはならない（実装側で排他すること）
/// - 異なるタスクのレコード間の順序は保証しなくてよい
#[async_trait]
pub trait EventSink: Send + Sync {
    async fn emit(&self, event: &TaskEvent) -> Result<(), SinkError>;
}
