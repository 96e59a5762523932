//! 履歴操作ユースケース（一覧・詳細・削除・全消去）

use crate::ports::outbound::ConfirmPrompt;
use common::domain::{AnalysisId, SavedAnalysis};
use common::error::Error;
use common::history::HistoryStore;
use std::sync::Arc;

/// 全消去の結果
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClearOutcome {
    Cleared(usize),
    Cancelled,
}

pub struct HistoryUseCase {
    history: Arc<HistoryStore>,
    confirm: Arc<dyn ConfirmPrompt>,
}

impl HistoryUseCase {
    pub fn new(history: Arc<HistoryStore>, confirm: Arc<dyn ConfirmPrompt>) -> Self {
        Self { history, confirm }
    }

    pub fn list(&self) -> Vec<SavedAnalysis> {
        self.history.get_all()
    }

    pub fn show(&self, id: &AnalysisId) -> Result<SavedAnalysis, Error> {
        self.history
            .get(id)
            .ok_or_else(|| Error::invalid_argument(format!("No saved analysis with id '{}'", id)))
    }

    /// 削除する。読み書きの失敗は StorageWrite、存在しない ID は InvalidArgument
    pub fn delete(&self, id: &AnalysisId) -> Result<(), Error> {
        if self.history.delete(id)? {
            Ok(())
        } else {
            Err(Error::invalid_argument(format!("No saved analysis with id '{}'", id)))
        }
    }

    /// 全消去。`confirmed` が false なら ConfirmPrompt で確認する
    pub fn clear(&self, confirmed: bool) -> Result<ClearOutcome, Error> {
        let count = self.history.get_all().len();
        if !confirmed {
            let message = format!("Delete all {} saved analyses?", count);
            if !self.confirm.confirm(&message) {
                return Ok(ClearOutcome::Cancelled);
            }
        }
        self.history.clear()?;
        Ok(ClearOutcome::Cleared(count))
    }
}
