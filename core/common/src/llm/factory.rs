//! プロバイダファクトリー
//!
//! プロバイダタイプに基づいて適切なプロバイダを作成します。

use crate::domain::{ApiKey, ModelName};
use crate::error::Error;
use crate::llm::echo::EchoProvider;
use crate::llm::gemini::GeminiProvider;
use crate::llm::provider::LlmProvider;
use std::sync::Arc;

/// プロバイダタイプ
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProviderType {
    /// Gemini（generateContent）
    Gemini,
    /// Echo（API を呼ばず固定応答）
    Echo,
}

impl ProviderType {
    /// 文字列からプロバイダタイプを解析
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "gemini" => Some(Self::Gemini),
            "echo" => Some(Self::Echo),
            _ => None,
        }
    }

    /// プロバイダタイプを文字列に変換
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Gemini => "gemini",
            Self::Echo => "echo",
        }
    }
}

/// プロバイダを作成する
///
/// Gemini は API キー必須。未設定なら Env エラー。
pub fn create_provider(
    provider_type: ProviderType,
    api_key: Option<&ApiKey>,
    model: Option<ModelName>,
) -> Result<Arc<dyn LlmProvider>, Error> {
    match provider_type {
        ProviderType::Gemini => {
            let key = api_key.ok_or_else(|| {
                Error::env("GEMINI_API_KEY environment variable is not set")
            })?;
            Ok(Arc::new(GeminiProvider::new(key.as_str(), model)?))
        }
        ProviderType::Echo => Ok(Arc::new(EchoProvider::new())),
    }
}
