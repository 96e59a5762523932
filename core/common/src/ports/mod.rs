//! ポート定義
//!
//! common はライブラリなので inbound は持たない。review が outbound の trait に標準アダプタを配線する。

pub mod outbound;
