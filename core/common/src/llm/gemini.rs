//! Geminiプロバイダの実装（generateContent、非ストリーミング）

use crate::domain::{ApiKey, ModelName};
use crate::error::Error;
use crate::llm::provider::LlmProvider;
use serde_json::{json, Value};

pub const DEFAULT_GEMINI_MODEL: &str = "gemini-2.0-flash";
const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";

/// Geminiプロバイダ
pub struct GeminiProvider {
    model: String,
    api_key: ApiKey,
    base_url: String,
}

impl GeminiProvider {
    /// 新しいGeminiプロバイダを作成
    ///
    /// # Arguments
    /// * `api_key` - API キー（前後の空白は除去。空なら InvalidArgument）
    /// * `model` - モデル名（デフォルト: "gemini-2.0-flash"）
    pub fn new(api_key: &str, model: Option<ModelName>) -> Result<Self, Error> {
        let api_key = api_key.trim();
        if api_key.is_empty() {
            return Err(Error::invalid_argument("API key is required"));
        }
        let model = model
            .map(|m| m.as_str().to_string())
            .unwrap_or_else(|| DEFAULT_GEMINI_MODEL.to_string());
        Ok(Self {
            model,
            api_key: ApiKey::new(api_key),
            base_url: DEFAULT_BASE_URL.to_string(),
        })
    }

    /// API のベース URL を差し替える（プロキシ・ローカル検証用）
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    fn generate_url(&self) -> String {
        format!("{}/models/{}:generateContent", self.base_url, self.model)
    }
}

impl LlmProvider for GeminiProvider {
    fn name(&self) -> &str {
        "gemini"
    }

    fn make_request_payload(&self, prompt: &str) -> Result<Value, Error> {
        Ok(json!({
            "contents": [{
                "parts": [{ "text": prompt }]
            }]
        }))
    }

    fn make_http_request(&self, request_json: &str) -> Result<String, Error> {
        let client = reqwest::blocking::Client::new();
        let response = client
            .post(self.generate_url())
            .header("Content-Type", "application/json")
            .header("X-goog-api-key", self.api_key.as_str())
            .body(request_json.to_string())
            .send()
            .map_err(|e| Error::http(format!("Network error during analysis: {}", e)))?;

        let status = response.status();
        let response_text = response
            .text()
            .map_err(|e| Error::http(format!("Failed to read response: {}", e)))?;

        if !status.is_success() {
            return Err(Error::http(api_error_message(status, &response_text)));
        }

        Ok(response_text)
    }

    fn parse_response_text(&self, response_json: &str) -> Result<Option<String>, Error> {
        let v: Value = serde_json::from_str(response_json)
            .map_err(|e| Error::json(format!("Failed to parse response JSON: {}", e)))?;

        if let Some(error) = v.get("error") {
            let error_msg = error["message"].as_str().unwrap_or("Unknown error");
            return Err(Error::http(format!("Gemini API error: {}", error_msg)));
        }

        let text = v["candidates"][0]["content"]["parts"]
            .as_array()
            .and_then(|parts| parts.iter().find_map(|part| part["text"].as_str()))
            .map(|s| s.to_string());

        Ok(text)
    }

    fn check_connection(&self) -> bool {
        let client = reqwest::blocking::Client::new();
        client
            .get(format!("{}/models", self.base_url))
            .header("X-goog-api-key", self.api_key.as_str())
            .send()
            .map(|r| r.status().is_success())
            .unwrap_or(false)
    }
}

/// ステータス異常時のメッセージ。JSON ボディなら error.message を優先する
fn api_error_message(status: reqwest::StatusCode, body: &str) -> String {
    let detail = serde_json::from_str::<Value>(body)
        .ok()
        .and_then(|v| v["error"]["message"].as_str().map(|s| s.to_string()));
    match detail {
        Some(msg) => format!("API request failed: {} ({})", status, msg),
        None => format!("API request failed: {}", status),
    }
}
