//! LLMドライバーの実装
//!
//! プロバイダに依存しない共通処理（ペイロード生成 → HTTP → テキスト抽出）を提供します。

use crate::error::Error;
use crate::llm::provider::LlmProvider;
use std::sync::Arc;

/// LLMドライバー
#[derive(Clone)]
pub struct LlmDriver {
    provider: Arc<dyn LlmProvider>,
}

impl LlmDriver {
    /// 新しいドライバーを作成
    pub fn new(provider: Arc<dyn LlmProvider>) -> Self {
        Self { provider }
    }

    /// LLMにプロンプトを送信して応答テキストを取得
    ///
    /// # Returns
    /// * `Ok(String)` - LLMからの応答テキスト
    /// * `Err(Error)` - 送信失敗、または応答にテキストが無い
    pub fn query(&self, prompt: &str) -> Result<String, Error> {
        let payload = self.provider.make_request_payload(prompt)?;

        let request_json = serde_json::to_string(&payload)
            .map_err(|e| Error::json(format!("Failed to serialize request: {}", e)))?;

        let response_json = self.provider.make_http_request(&request_json)?;

        self.provider
            .parse_response_text(&response_json)?
            .ok_or_else(|| Error::http("No response from AI model"))
    }

    /// プロバイダを取得
    pub fn provider(&self) -> &dyn LlmProvider {
        self.provider.as_ref()
    }
}
