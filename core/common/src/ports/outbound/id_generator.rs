//! 履歴 ID 生成 Outbound ポート
//!
//! HistoryStore は IdGenerator を注入し、テストでは連番 ID を返す実装を渡せる。

use crate::domain::AnalysisId;

/// AnalysisId を生成する抽象（Outbound ポート）
pub trait IdGenerator: Send + Sync {
    fn next_id(&self) -> AnalysisId;
}
