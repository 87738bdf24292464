//! MemorySink - テスト用のイベント捕捉
//!
//! コンソール出力を読む代わりに、emit されたイベントを到着順に保持します。

use async_trait::async_trait;
use std::sync::Mutex;

use crate::domain::TaskEvent;
use crate::ports::{EventSink, SinkError};

/// MemorySink はイベントを到着順に記録
///
/// # 実装詳細
/// - std の Mutex で排他（await を跨いで保持しない）
/// - 到着順 = emit の完了順。タスク内の順序は保存されるが、
///   タスク間のインターリーブは実行ごとに異なってよい
#[derive(Debug, Default)]
pub struct MemorySink {
    events: Mutex<Vec<TaskEvent>>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of everything emitted so far, in arrival order.
    pub fn events(&self) -> Vec<TaskEvent> {
        self.events.lock().unwrap().clone()
    }

    /// Events belonging to one task, in arrival order.
    pub fn events_for(&self, task: &str) -> Vec<TaskEvent> {
        self.events
            .lock()
            .unwrap()
            .iter()
            .filter(|ev| ev.task() == task)
            .cloned()
            .collect()
    }

    pub fn len(&self) -> usize {
        self.events.lock().unwrap().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[async_trait]
impl EventSink for MemorySink {
    async fn emit(&self, event: &TaskEvent) -> Result<(), SinkError> {
        self.events.lock().unwrap().push(event.clone());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::TaskName;

    #[tokio::test]
    async fn records_events_in_arrival_order() {
        let sink = MemorySink::new();
        let a = TaskName::new("A");
        let b = TaskName::new("B");

        sink.emit(&TaskEvent::iteration(&a, 1)).await.unwrap();
        sink.emit(&TaskEvent::iteration(&b, 1)).await.unwrap();
        sink.emit(&TaskEvent::completed(&a)).await.unwrap();

        let events = sink.events();
        assert_eq!(events.len(), 3);
        assert_eq!(events[0], TaskEvent::iteration(&a, 1));
        assert_eq!(events[2], TaskEvent::completed(&a));

        // タスク単位の抽出
        assert_eq!(sink.events_for("A").len(), 2);
        assert_eq!(sink.events_for("B").len(), 1);
    }
}
