//! 解析対象コードの読み込み Outbound ポート

use crate::domain::CodeSource;
use common::error::Error;

/// CodeSource からコード全文を読む
pub trait CodeReader: Send + Sync {
    fn read(&self, source: &CodeSource) -> Result<String, Error>;
}
