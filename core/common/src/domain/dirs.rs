//! 実行時ディレクトリ（XDG / REVIEW_HOME 解決結果）
//!
//! EnvResolver::resolve_dirs() で取得し、履歴・ログのパス計算に使う。

use std::path::PathBuf;

/// 解決済みの data / state ディレクトリ
#[derive(Debug, Clone)]
pub struct Dirs {
    pub data_dir: PathBuf,
    pub state_dir: PathBuf,
}

impl Dirs {
    /// REVIEW_HOME のように 1 つのルート配下にまとめる場合
    pub fn under(root: impl Into<PathBuf>) -> Self {
        let root = root.into();
        Self {
            data_dir: root.join("data"),
            state_dir: root.join("state"),
        }
    }

    /// 履歴スロットを置くディレクトリ（data/history）
    pub fn history_dir(&self) -> PathBuf {
        self.data_dir.join("history")
    }

    /// ログ格納ディレクトリ（state/logs）
    pub fn logs_dir(&self) -> PathBuf {
        self.state_dir.join("logs")
    }

    /// JSONL ログファイル
    pub fn log_file(&self) -> PathBuf {
        self.logs_dir().join("review.jsonl")
    }
}
