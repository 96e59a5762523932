//! キー・バリューストア Outbound ポート
//!
//! 履歴コレクションは 1 つのキー（スロット）に JSON 文字列として丸ごと保存する。
//! 実装は `common::adapter::FileKeyValueStore`（ファイル）や `MemoryKeyValueStore`（テスト用）。

use crate::error::Error;

/// 永続 KV ストアの抽象
pub trait KeyValueStore: Send + Sync {
    /// キーの値を返す。存在しなければ `Ok(None)`
    fn get(&self, key: &str) -> Result<Option<String>, Error>;

    /// キーの値を丸ごと置き換える
    fn set(&self, key: &str, value: &str) -> Result<(), Error>;

    /// キーを削除する。存在しなくても成功
    fn remove(&self, key: &str) -> Result<(), Error>;
}
