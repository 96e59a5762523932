//! review コマンドの enum（Command Pattern）
//!
//! 解析 / 履歴操作 / 接続確認の分岐を enum で明示する。

use common::domain::AnalysisId;
use std::path::PathBuf;

/// 解析対象コードの取得元
#[derive(Debug, Clone, PartialEq)]
pub enum CodeSource {
    File(PathBuf),
    Stdin,
    /// 同梱のサンプルコード
    Example,
}

/// review の実行モード
#[derive(Debug, Clone, PartialEq)]
pub enum ReviewCommand {
    /// ヘルプ表示
    Help,
    /// コードを解析し、既定では履歴に保存する
    Analyze { source: CodeSource, save: bool },
    HistoryList,
    HistoryShow { id: AnalysisId },
    HistoryDelete { id: AnalysisId },
    /// `confirmed` が false なら確認プロンプトを出す
    HistoryClear { confirmed: bool },
    /// API への接続確認
    Check,
}

impl ReviewCommand {
    /// ログ用のコマンド名
    pub fn name(&self) -> &'static str {
        match self {
            ReviewCommand::Help => "help",
            ReviewCommand::Analyze { .. } => "analyze",
            ReviewCommand::HistoryList => "history-list",
            ReviewCommand::HistoryShow { .. } => "history-show",
            ReviewCommand::HistoryDelete { .. } => "history-delete",
            ReviewCommand::HistoryClear { .. } => "history-clear",
            ReviewCommand::Check => "check",
        }
    }
}
