//! code-review 共通ライブラリ
//!
//! LLM によるコード解析の応答正規化と、解析履歴の永続化を提供します。
//! `review` コマンドはこのクレートのポートに標準アダプタを配線して使う。

/// エラーハンドリング
pub mod error;

/// ドメイン型（解析結果・履歴レコード・ディレクトリ）
pub mod domain;

/// モデル応答の正規化
pub mod normalizer;

/// 解析履歴ストア
pub mod history;

/// Ports & Adapters のポート定義
pub mod ports;

/// ポートの標準実装
pub mod adapter;

/// LLMドライバーとプロバイダ
pub mod llm;

pub use history::{HistoryStore, StorageOp, StorageWriteError, DEFAULT_HISTORY_KEY};
pub use normalizer::{normalize, ParseError};
