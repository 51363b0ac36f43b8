//! Schedule Store Module
//!
//! 最後に組み立てられた`ScheduleResult`を保持するストア。
//! 呼び出し側が構築し、読み取りエンドポイントに注入して使用します。

use std::sync::RwLock;

use crate::types::ScheduleResult;

/// 最新のスケジュールを保持するストア
///
/// アップロード成功のたびに置き換えられ、それ以外は読み取り専用です。
/// 複数スレッドから共有する場合は`Arc`で包んでください。
#[derive(Debug, Default)]
pub struct ScheduleStore {
    current: RwLock<ScheduleResult>,
}

impl ScheduleStore {
    /// 空の結果（センチネル）で初期化
    pub fn new() -> Self {
        Self::default()
    }

    /// 事前に読み込んだ結果で初期化
    pub fn with_result(result: ScheduleResult) -> Self {
        Self {
            current: RwLock::new(result),
        }
    }

    /// 保持している結果を置き換える
    pub fn replace(&self, result: ScheduleResult) {
        // 書き込み中のパニックで汚染されても、保持値自体は常に完全な結果
        let mut guard = self.current.write().unwrap_or_else(|e| e.into_inner());
        *guard = result;
    }

    /// 保持している結果のコピーを取得
    pub fn snapshot(&self) -> ScheduleResult {
        self.current
            .read()
            .unwrap_or_else(|e| e.into_inner())
            .clone()
    }
}
