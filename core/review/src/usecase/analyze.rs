//! コード解析ユースケース
//!
//! プロンプト生成 → LLM 問い合わせ → 応答の正規化 → 履歴保存。
//! 保存に失敗しても解析結果は捨てず、`AnalysisOutcome::save_error` として返す。

use common::domain::{AnalysisResult, SavedAnalysis};
use common::error::Error;
use common::history::{HistoryStore, StorageWriteError};
use common::llm::{build_analysis_prompt, LlmDriver};
use common::normalizer::normalize;
use common::ports::outbound::{Log, LogLevel, LogRecord};
use std::sync::Arc;

/// 解析 1 回分の結果
#[derive(Debug, Clone)]
pub struct AnalysisOutcome {
    pub result: AnalysisResult,
    /// 保存したレコード（--no-save または保存失敗時は None）
    pub saved: Option<SavedAnalysis>,
    pub save_error: Option<StorageWriteError>,
}

pub struct AnalyzeUseCase {
    driver: LlmDriver,
    history: Arc<HistoryStore>,
    log: Arc<dyn Log>,
}

impl AnalyzeUseCase {
    pub fn new(driver: LlmDriver, history: Arc<HistoryStore>, log: Arc<dyn Log>) -> Self {
        Self {
            driver,
            history,
            log,
        }
    }

    /// コードを解析する。`save` が true なら履歴に追加する
    pub fn analyze(&self, code: &str, save: bool) -> Result<AnalysisOutcome, Error> {
        if code.trim().is_empty() {
            return Err(Error::invalid_argument("Code cannot be empty"));
        }

        self.log_event(
            LogRecord::new(LogLevel::Info, "analysis request")
                .field("provider", self.driver.provider().name())
                .field("code_chars", code.chars().count()),
        );

        let prompt = build_analysis_prompt(code);
        let text = self.driver.query(&prompt).map_err(|e| {
            self.log_event(LogRecord::new(LogLevel::Error, e.to_string()).kind("llm"));
            e
        })?;

        let result = normalize(&text).map_err(|e| {
            self.log_event(
                LogRecord::new(LogLevel::Error, e.to_string())
                    .kind("parse")
                    .field("response_chars", text.chars().count()),
            );
            Error::from(e)
        })?;

        self.log_event(
            LogRecord::new(LogLevel::Info, "analysis normalized")
                .field("errors", result.errors.len())
                .field("security_vulnerabilities", result.security_vulnerabilities.len())
                .field("refactoring_suggestions", result.refactoring_suggestions.len()),
        );

        if !save {
            return Ok(AnalysisOutcome {
                result,
                saved: None,
                save_error: None,
            });
        }

        let (saved, save_error) = match self.history.save(code, &result) {
            Ok(record) => (Some(record), None),
            Err(e) => (None, Some(e)),
        };
        Ok(AnalysisOutcome {
            result,
            saved,
            save_error,
        })
    }

    /// プロバイダへの接続確認
    pub fn check_connection(&self) -> bool {
        let ok = self.driver.provider().check_connection();
        self.log_event(
            LogRecord::new(LogLevel::Info, "connection check")
                .field("provider", self.driver.provider().name())
                .field("ok", ok),
        );
        ok
    }

    fn log_event(&self, record: LogRecord) {
        let record = if record.kind.is_none() {
            record.kind("analysis")
        } else {
            record
        };
        let _ = self.log.log(&record.layer("usecase"));
    }
}
