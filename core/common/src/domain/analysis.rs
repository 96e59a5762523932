//! 解析結果と履歴レコードのドメイン型
//!
//! 永続化形式は `SavedAnalysis` の JSON 配列（キーは camelCase）。

use chrono::{DateTime, TimeZone, Utc};
use serde::{Deserialize, Serialize};

/// 履歴に保持する最大件数
pub const MAX_HISTORY_ENTRIES: usize = 50;

/// 履歴に保存するコード断片の最大長（Unicode スカラー値 = `char` の個数。UTF-16 単位ではない）
pub const SNIPPET_MAX_CHARS: usize = 200;

/// 正規化済みの解析結果
///
/// 3 つのフィールドは常に存在する。永続データで欠けていても空配列として読む。
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisResult {
    #[serde(default)]
    pub errors: Vec<String>,
    #[serde(default)]
    pub security_vulnerabilities: Vec<String>,
    #[serde(default)]
    pub refactoring_suggestions: Vec<String>,
}

impl AnalysisResult {
    pub fn new(
        errors: Vec<String>,
        security_vulnerabilities: Vec<String>,
        refactoring_suggestions: Vec<String>,
    ) -> Self {
        Self {
            errors,
            security_vulnerabilities,
            refactoring_suggestions,
        }
    }

    /// 指摘の総数
    pub fn total_issues(&self) -> usize {
        self.errors.len() + self.security_vulnerabilities.len() + self.refactoring_suggestions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.total_issues() == 0
    }
}

/// 履歴レコードの ID（`analysis_<epoch-ms>_<suffix>`）
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AnalysisId(String);

impl AnalysisId {
    pub fn new(s: impl Into<String>) -> Self {
        Self(s.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for AnalysisId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for AnalysisId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

/// 履歴 1 件
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SavedAnalysis {
    pub id: AnalysisId,
    /// 作成時刻（Unix epoch ミリ秒）
    pub timestamp: u64,
    pub code_snippet: String,
    #[serde(default)]
    pub result: AnalysisResult,
}

impl SavedAnalysis {
    /// コードは先頭 SNIPPET_MAX_CHARS 文字に切り詰めて保持する
    pub fn new(id: AnalysisId, timestamp: u64, code: &str, result: AnalysisResult) -> Self {
        Self {
            id,
            timestamp,
            code_snippet: truncate_snippet(code),
            result,
        }
    }

    /// 作成時刻（UTC）。範囲外の値なら None
    pub fn created_at(&self) -> Option<DateTime<Utc>> {
        i64::try_from(self.timestamp)
            .ok()
            .and_then(|ms| Utc.timestamp_millis_opt(ms).single())
    }
}

/// 先頭 SNIPPET_MAX_CHARS 文字を返す（短ければそのまま）
pub fn truncate_snippet(code: &str) -> String {
    match code.char_indices().nth(SNIPPET_MAX_CHARS) {
        Some((end, _)) => code[..end].to_string(),
        None => code.to_string(),
    }
}
