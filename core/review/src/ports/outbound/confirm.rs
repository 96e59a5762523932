//! 破壊的操作の確認 Outbound ポート

/// y/N の確認を取る。非対話環境では false を返す実装を使う
pub trait ConfirmPrompt: Send + Sync {
    fn confirm(&self, message: &str) -> bool;
}
