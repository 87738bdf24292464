//! Impls - ports の実装
//!
//! # 含まれる実装
//! - **ConsoleSink**: 本番用のイベント出力（行単位で排他・flush）
//! - **MemorySink**: テスト用のイベント捕捉
//! - **SpinWork / NoopWork**: 本番用・テスト用の work unit

pub mod console_sink;
pub mod memory_sink;
pub mod spin_work;

// 主要な型を再エクスポート
pub use self::console_sink::ConsoleSink;
pub use self::memory_sink::MemorySink;
pub use self::spin_work::{DEFAULT_SPINS, NoopWork, SpinWork};
