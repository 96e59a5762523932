//! 標準環境変数解決実装（std::env を委譲）

use crate::domain::{ApiKey, Dirs, ModelName, ProviderName};
use crate::error::Error;
use crate::ports::outbound::EnvResolver;
use std::collections::HashMap;
use std::env;
use std::path::PathBuf;

const APP_DIR: &str = "code-review";

/// 環境変数の取得元。テストでは固定のマップを渡す
enum Source {
    Process,
    Fixed(HashMap<String, String>),
}

/// 標準環境変数解決実装
pub struct StdEnvResolver {
    source: Source,
}

impl Default for StdEnvResolver {
    fn default() -> Self {
        Self::new()
    }
}

impl StdEnvResolver {
    /// プロセスの環境変数を読む
    pub fn new() -> Self {
        Self {
            source: Source::Process,
        }
    }

    /// 与えたマップだけを環境変数として扱う
    pub fn from_map(vars: HashMap<String, String>) -> Self {
        Self {
            source: Source::Fixed(vars),
        }
    }

    /// 空文字は未設定扱い
    fn var(&self, name: &str) -> Option<String> {
        let value = match &self.source {
            Source::Process => env::var(name).ok(),
            Source::Fixed(vars) => vars.get(name).cloned(),
        };
        value.filter(|s| !s.trim().is_empty())
    }

    fn xdg_dir(&self, xdg_var: &str, home_fallback: &[&str]) -> Result<PathBuf, Error> {
        if let Some(base) = self.var(xdg_var) {
            return Ok(PathBuf::from(base).join(APP_DIR));
        }
        let home = self
            .var("HOME")
            .ok_or_else(|| Error::env("HOME is not set"))?;
        let mut path = PathBuf::from(home);
        for part in home_fallback {
            path.push(part);
        }
        path.push(APP_DIR);
        Ok(path)
    }
}

impl EnvResolver for StdEnvResolver {
    fn resolve_dirs(&self) -> Result<Dirs, Error> {
        if let Some(home) = self.var("REVIEW_HOME") {
            return Ok(Dirs::under(home));
        }
        Ok(Dirs {
            data_dir: self.xdg_dir("XDG_DATA_HOME", &[".local", "share"])?,
            state_dir: self.xdg_dir("XDG_STATE_HOME", &[".local", "state"])?,
        })
    }

    fn api_key(&self) -> Option<ApiKey> {
        self.var("GEMINI_API_KEY").map(ApiKey::new)
    }

    fn default_profile(&self) -> Option<ProviderName> {
        self.var("REVIEW_PROFILE").map(ProviderName::new)
    }

    fn default_model(&self) -> Option<ModelName> {
        self.var("REVIEW_MODEL").map(ModelName::new)
    }
}
