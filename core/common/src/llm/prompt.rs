//! コード解析用プロンプト

/// 解析対象コードを埋め込んだプロンプトを作る
///
/// モデルには 3 つの文字列配列だけを持つ JSON オブジェクトを返すよう指示する。
/// 実際には前後に説明文が付いたり要素がオブジェクトになったりするため、応答は normalizer で整える。
pub fn build_analysis_prompt(code: &str) -> String {
    format!(
        r#"Analyze the following code and return any errors, security vulnerabilities and refactoring suggestions, each in its own list, as a single JSON object.

IMPORTANT: Respond only with string arrays. Every item must be plain text.

Format:
{{
  "errors": ["error description 1", "error description 2"],
  "securityVulnerabilities": ["security issue 1", "security issue 2"],
  "refactoringSuggestions": ["improvement suggestion 1", "improvement suggestion 2"]
}}

Code:
{}"#,
        code
    )
}
