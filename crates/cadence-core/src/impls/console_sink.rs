//! ConsoleSink - 本番用のイベント出力
//!
//! # 実装詳細
//! - stdout のロックを write + flush の間保持し、並行する emit の
//!   レコードがサブレコード単位で混ざらないようにする
//! - 1 行ごとに flush（ライブ観測用の出力なのでバッファしない）

use async_trait::async_trait;
use std::io::Write;

use crate::domain::TaskEvent;
use crate::ports::{EventSink, SinkError};

/// ConsoleSink はイベントを 1 行ずつ標準出力へ書く
///
/// # 使用例
/// ```ignore
/// let sink: Arc<dyn EventSink> = Arc::new(ConsoleSink::new());
/// sink.emit(&TaskEvent::iteration(&name, 1)).await?;
/// ```
#[derive(Debug, Default)]
pub struct ConsoleSink;

impl ConsoleSink {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl EventSink for ConsoleSink {
    async fn emit(&self, event: &TaskEvent) -> Result<(), SinkError> {
        // ロックは await を跨がない（短い臨界区間で完結）
        let mut out = std::io::stdout().lock();
        writeln!(out, "{event}")?;
        out.flush()?;
        Ok(())
    }
}
