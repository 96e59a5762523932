//! 環境変数解決 Outbound ポート
//!
//! データ・ログのディレクトリ、API キー、プロファイル・モデルの既定値を環境変数から解決する。
//! usecase と配線はこの trait 経由でのみ環境変数にアクセスする。

use crate::domain::{ApiKey, Dirs, ModelName, ProviderName};
use crate::error::Error;

/// 環境変数解決抽象（Outbound ポート）
///
/// 実装は `common::adapter::StdEnvResolver` やテスト用のモックなど。
pub trait EnvResolver: Send + Sync {
    /// data / state ディレクトリを解決する
    ///
    /// 優先順位:
    /// 1. REVIEW_HOME（設定されていれば $REVIEW_HOME/data, $REVIEW_HOME/state）
    /// 2. $XDG_DATA_HOME/code-review, $XDG_STATE_HOME/code-review
    /// 3. $HOME/.local/share/code-review, $HOME/.local/state/code-review
    fn resolve_dirs(&self) -> Result<Dirs, Error>;

    /// GEMINI_API_KEY（空文字は未設定扱い）
    fn api_key(&self) -> Option<ApiKey>;

    /// REVIEW_PROFILE
    fn default_profile(&self) -> Option<ProviderName>;

    /// REVIEW_MODEL
    fn default_model(&self) -> Option<ModelName>;
}
