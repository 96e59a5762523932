//! Outbound ポート: アプリが外界（KV ストア・FS・時刻・ID・ログ・環境変数・LLM）を使うための trait

pub mod clock;
pub mod env_resolver;
pub mod fs;
pub mod id_generator;
pub mod kv_store;
pub mod log;

pub use clock::Clock;
pub use env_resolver::EnvResolver;
pub use fs::FileSystem;
pub use id_generator::IdGenerator;
pub use kv_store::KeyValueStore;
/// トレイト本体は llm::provider に置く
pub use crate::llm::provider::LlmProvider;
pub use log::{now_iso8601, Log, LogLevel, LogRecord};
