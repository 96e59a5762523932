//! モデル応答の正規化
//!
//! LLM の自由記述テキストから JSON オブジェクトを取り出し、3 つのフィールドを
//! 文字列配列へ揃える。意味的な妥当性は見ない（形だけを整える）。

use crate::domain::AnalysisResult;
use regex::Regex;
use serde_json::{Map, Value};
use std::sync::OnceLock;

pub const FIELD_ERRORS: &str = "errors";
pub const FIELD_SECURITY_VULNERABILITIES: &str = "securityVulnerabilities";
pub const FIELD_REFACTORING_SUGGESTIONS: &str = "refactoringSuggestions";

/// オブジェクト要素から本文を取り出すときのキー（優先順）
const TEXT_KEYS: [&str; 3] = ["description", "recommendation", "message"];

/// 応答テキストから解析結果を取り出せなかった
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ParseError {
    #[error("Failed to parse analysis result: no JSON found in model response")]
    NoJsonFound,
    #[error("Failed to parse analysis result: malformed JSON: {0}")]
    MalformedJson(String),
}

fn json_span_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    // 最初の '{' から最後の '}' まで（貪欲）
    RE.get_or_init(|| Regex::new(r"(?s)\{.*\}").expect("static regex"))
}

/// テキスト中の最初の `{` から最後の `}` までを返す
pub fn extract_json_span(raw: &str) -> Option<&str> {
    json_span_re().find(raw).map(|m| m.as_str())
}

/// モデル応答を AnalysisResult に正規化する
///
/// # Returns
/// * `Ok(AnalysisResult)` - 欠けたフィールドは空配列
/// * `Err(ParseError)` - JSON が見つからない、またはパースできない
pub fn normalize(raw_text: &str) -> Result<AnalysisResult, ParseError> {
    let span = extract_json_span(raw_text).ok_or(ParseError::NoJsonFound)?;
    let value: Value =
        serde_json::from_str(span).map_err(|e| ParseError::MalformedJson(e.to_string()))?;
    Ok(normalize_value(&value))
}

/// パース済みの値から正規化する（オブジェクト以外は全フィールド空）
pub fn normalize_value(value: &Value) -> AnalysisResult {
    let Some(obj) = value.as_object() else {
        return AnalysisResult::default();
    };
    AnalysisResult {
        errors: field_texts(obj, FIELD_ERRORS),
        security_vulnerabilities: field_texts(obj, FIELD_SECURITY_VULNERABILITIES),
        refactoring_suggestions: field_texts(obj, FIELD_REFACTORING_SUGGESTIONS),
    }
}

fn field_texts(obj: &Map<String, Value>, field: &str) -> Vec<String> {
    match obj.get(field) {
        Some(Value::Array(items)) => items.iter().map(item_text).collect(),
        _ => Vec::new(),
    }
}

fn item_text(item: &Value) -> String {
    match item {
        Value::String(s) => s.clone(),
        Value::Object(fields) => TEXT_KEYS
            .iter()
            .filter_map(|key| fields.get(*key))
            .find(|v| is_truthy(v))
            .map(scalar_text)
            .unwrap_or_else(|| item.to_string()),
        other => scalar_text(other),
    }
}

/// 文字列はそのまま、それ以外は JSON 表記
fn scalar_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

/// null・空文字・false・0 は「値なし」として次のキーへ進む
fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::String(s) => !s.is_empty(),
        Value::Number(n) => n.as_f64().map_or(true, |f| f != 0.0),
        Value::Array(_) | Value::Object(_) => true,
    }
}
