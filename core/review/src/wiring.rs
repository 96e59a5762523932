//! 配線: 標準アダプタで UseCase を組み立てる

use std::sync::Arc;

use common::adapter::{
    FileJsonLog, FileKeyValueStore, StderrLog, StdClock, StdEnvResolver, StdFileSystem,
    StdIdGenerator, TeeLog,
};
use common::domain::{ModelName, ProviderName};
use common::error::Error;
use common::history::HistoryStore;
use common::llm::{create_provider, LlmDriver, ProviderType};
use common::ports::outbound::{Clock, EnvResolver, FileSystem, KeyValueStore, Log};

use crate::adapter::{StdCodeReader, StdinConfirm};
use crate::ports::outbound::{CodeReader, ConfirmPrompt};
use crate::usecase::{AnalyzeUseCase, HistoryUseCase};

const DEFAULT_PROFILE: &str = "gemini";

/// 配線済みのアプリケーション
pub struct App {
    pub env_resolver: Arc<dyn EnvResolver>,
    pub logger: Arc<dyn Log>,
    pub history: Arc<HistoryStore>,
    pub code_reader: Arc<dyn CodeReader>,
    pub confirm: Arc<dyn ConfirmPrompt>,
}

impl App {
    /// プロファイル・モデルを解決して解析ユースケースを作る（API キーはここで初めて要求する）
    pub fn analyze_use_case(
        &self,
        profile: Option<ProviderName>,
        model: Option<ModelName>,
    ) -> Result<AnalyzeUseCase, Error> {
        let profile = profile
            .or_else(|| self.env_resolver.default_profile())
            .unwrap_or_else(|| ProviderName::new(DEFAULT_PROFILE));
        let provider_type = ProviderType::parse(profile.as_str()).ok_or_else(|| {
            Error::invalid_argument(format!(
                "Unknown profile '{}'. Available: gemini, echo",
                profile
            ))
        })?;
        let model = model.or_else(|| self.env_resolver.default_model());
        let api_key = self.env_resolver.api_key();
        let provider = create_provider(provider_type, api_key.as_ref(), model)?;
        Ok(AnalyzeUseCase::new(
            LlmDriver::new(provider),
            Arc::clone(&self.history),
            Arc::clone(&self.logger),
        ))
    }

    pub fn history_use_case(&self) -> HistoryUseCase {
        HistoryUseCase::new(Arc::clone(&self.history), Arc::clone(&self.confirm))
    }
}

/// 配線: 標準アダプタで App を組み立てる
pub fn wire_app(verbose: bool) -> Result<App, Error> {
    let env_resolver: Arc<dyn EnvResolver> = Arc::new(StdEnvResolver::new());
    wire_app_with(env_resolver, verbose, Arc::new(StdinConfirm))
}

/// 環境変数の解決元と確認プロンプトを差し替えて組み立てる（テスト用にも使う）
pub fn wire_app_with(
    env_resolver: Arc<dyn EnvResolver>,
    verbose: bool,
    confirm: Arc<dyn ConfirmPrompt>,
) -> Result<App, Error> {
    let dirs = env_resolver.resolve_dirs()?;
    let fs: Arc<dyn FileSystem> = Arc::new(StdFileSystem);
    let clock: Arc<dyn Clock> = Arc::new(StdClock);

    let file_log: Arc<dyn Log> = Arc::new(FileJsonLog::new(Arc::clone(&fs), dirs.log_file()));
    let logger: Arc<dyn Log> = if verbose {
        Arc::new(TeeLog::new(vec![file_log, Arc::new(StderrLog)]))
    } else {
        file_log
    };

    let store: Arc<dyn KeyValueStore> =
        Arc::new(FileKeyValueStore::new(Arc::clone(&fs), dirs.history_dir()));
    let history = HistoryStore::new(
        store,
        Arc::clone(&clock),
        Arc::new(StdIdGenerator::new(Arc::clone(&clock))),
    )
    .with_log(Arc::clone(&logger));

    Ok(App {
        env_resolver,
        logger,
        history: Arc::new(history),
        code_reader: Arc::new(StdCodeReader::new(fs)),
        confirm,
    })
}

