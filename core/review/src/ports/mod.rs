//! Ports & Adapters のポート定義
//!
//! - inbound: CLI がアプリを呼び出すインターフェース
//! - outbound: review 固有の外界アクセス（コード入力・確認プロンプト）

pub mod inbound;
pub mod outbound;
