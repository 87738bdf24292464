//! WorkUnit port - イテレーション本体の抽象化
//!
//! 実行ループから見た「1 イテレーション分の作業」。差し替え可能にする
//! ことで、タイミングのテストを実際の CPU 消費から切り離せます。

/// WorkUnit は 1 イテレーション分の作業を実行
///
/// # 契約
/// - blocking・CPU-bound。途中に suspension point を持たない
/// - 消費時間は小さく有界で、CPU 消費以外の観測可能な副作用を持たない
pub trait WorkUnit: Send + Sync {
    fn run(&self);
}
