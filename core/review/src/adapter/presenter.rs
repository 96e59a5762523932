//! 解析結果・履歴のテキスト整形（stdout 出力用）
//!
//! 文字列を返すだけで出力はしない。`--json` 指定時は使わず serde_json で出す。

use common::domain::{AnalysisResult, SavedAnalysis};
use serde::Serialize;

const PREVIEW_CHARS: usize = 60;

/// `analyze --json` の出力
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalyzeReport<'a> {
    pub result: &'a AnalysisResult,
    pub saved_id: Option<&'a str>,
    pub save_error: Option<String>,
}

fn section(out: &mut String, title: &str, items: &[String]) {
    out.push_str(&format!("{} ({})\n", title, items.len()));
    if items.is_empty() {
        out.push_str("  none\n");
        return;
    }
    for (i, item) in items.iter().enumerate() {
        out.push_str(&format!("  {}. {}\n", i + 1, item));
    }
}

/// 3 セクションに分けて番号付きで並べる
pub fn format_result(result: &AnalysisResult) -> String {
    if result.is_empty() {
        return "No issues found.\n".to_string();
    }
    let mut out = String::new();
    section(&mut out, "Errors", &result.errors);
    out.push('\n');
    section(&mut out, "Security vulnerabilities", &result.security_vulnerabilities);
    out.push('\n');
    section(&mut out, "Refactoring suggestions", &result.refactoring_suggestions);
    out
}

/// 1 行目を PREVIEW_CHARS 文字まで
fn preview(snippet: &str) -> String {
    let first = snippet.lines().find(|l| !l.trim().is_empty()).unwrap_or("").trim();
    let mut s: String = first.chars().take(PREVIEW_CHARS).collect();
    if first.chars().count() > PREVIEW_CHARS {
        s.push_str("...");
    }
    s
}

fn created_at(entry: &SavedAnalysis) -> String {
    entry
        .created_at()
        .map(|t| t.format("%Y-%m-%d %H:%M:%S UTC").to_string())
        .unwrap_or_else(|| entry.timestamp.to_string())
}

/// 履歴一覧（1 件 1 行）
pub fn format_history_list(entries: &[SavedAnalysis]) -> String {
    if entries.is_empty() {
        return "No saved analyses.\n".to_string();
    }
    entries
        .iter()
        .map(|e| {
            format!(
                "{}  {}  {} issue(s)  {}\n",
                e.id,
                created_at(e),
                e.result.total_issues(),
                preview(&e.code_snippet)
            )
        })
        .collect()
}

/// 履歴 1 件の詳細
pub fn format_saved(entry: &SavedAnalysis) -> String {
    let mut out = format!("ID:      {}\nCreated: {}\n\nCode:\n", entry.id, created_at(entry));
    for line in entry.code_snippet.lines() {
        out.push_str(&format!("  {}\n", line));
    }
    out.push('\n');
    out.push_str(&format_result(&entry.result));
    out
}
