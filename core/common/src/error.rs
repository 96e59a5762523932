//! エラーハンドリング
//!
//! 全レイヤー共通のエラー型。ドメイン固有のエラー（ParseError / StorageWriteError）は
//! それぞれのモジュールで定義し、`From` でこの型へ変換する。

use crate::history::StorageWriteError;
use crate::normalizer::ParseError;

/// エラー型
///
/// 各バリアントは終了コードに対応する（`exit_code()`）。
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// 引数不正（usage を表示する）
    #[error("{0}")]
    InvalidArgument(String),
    /// 環境変数・設定の不備
    #[error("{0}")]
    Env(String),
    /// ファイル・ストレージ I/O
    #[error("{0}")]
    Io(String),
    /// JSON のシリアライズ・デシリアライズ
    #[error("{0}")]
    Json(String),
    /// HTTP・ネットワーク
    #[error("{0}")]
    Http(String),
    /// モデル応答から解析結果を取り出せなかった
    #[error(transparent)]
    Parse(#[from] ParseError),
    /// 履歴の書き込み・削除に失敗した
    #[error(transparent)]
    StorageWrite(#[from] StorageWriteError),
    /// その他の内部エラー
    #[error("{0}")]
    System(String),
}

impl Error {
    pub fn invalid_argument(msg: impl Into<String>) -> Self {
        Error::InvalidArgument(msg.into())
    }

    pub fn env(msg: impl Into<String>) -> Self {
        Error::Env(msg.into())
    }

    pub fn io_msg(msg: impl Into<String>) -> Self {
        Error::Io(msg.into())
    }

    pub fn json(msg: impl Into<String>) -> Self {
        Error::Json(msg.into())
    }

    pub fn http(msg: impl Into<String>) -> Self {
        Error::Http(msg.into())
    }

    pub fn system(msg: impl Into<String>) -> Self {
        Error::System(msg.into())
    }

    /// usage を併せて表示すべきエラーか
    pub fn is_usage(&self) -> bool {
        matches!(self, Error::InvalidArgument(_))
    }

    /// sysexits.h 準拠の終了コード
    pub fn exit_code(&self) -> i32 {
        match self {
            Error::InvalidArgument(_) => 64,
            Error::Json(_) | Error::Parse(_) => 65,
            Error::Http(_) => 69,
            Error::System(_) => 70,
            Error::Io(_) | Error::StorageWrite(_) => 74,
            Error::Env(_) => 78,
        }
    }
}

impl From<serde_json::Error> for Error {
    fn from(e: serde_json::Error) -> Self {
        Error::Json(e.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::history::StorageOp;

    #[test]
    fn test_error_helpers() {
        let err = Error::invalid_argument("test");
        assert_eq!(err.to_string(), "test");
        assert_eq!(err.exit_code(), 64);
        assert!(err.is_usage());

        let err = Error::system("test");
        assert_eq!(err.exit_code(), 70);
        assert!(!err.is_usage());
    }

    #[test]
    fn test_domain_errors_keep_their_message() {
        let err: Error = ParseError::NoJsonFound.into();
        assert_eq!(err.exit_code(), 65);
        assert_eq!(err.to_string(), ParseError::NoJsonFound.to_string());

        let err: Error = StorageWriteError::new(StorageOp::Save, "quota exceeded").into();
        assert_eq!(err.exit_code(), 74);
        assert!(err.to_string().contains("quota exceeded"));
    }
}
