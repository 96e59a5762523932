//! アダプター（外界の I/O を trait の標準実装として提供）
//!
//! usecase は ports::outbound の trait 経由でのみ KV ストア・ファイル・時刻・環境変数に触れる。
//! 実装は標準実装（Std*）やテスト用のメモリ実装を注入する。

pub mod file_json_log;
pub mod file_kv_store;
pub mod memory_kv_store;
pub mod std_clock;
pub mod std_env_resolver;
pub mod std_fs;
pub mod std_id_generator;

pub use file_json_log::{FileJsonLog, NoopLog, StderrLog, TeeLog};
pub use file_kv_store::FileKeyValueStore;
pub use memory_kv_store::MemoryKeyValueStore;
pub use std_clock::StdClock;
pub use std_env_resolver::StdEnvResolver;
pub use std_fs::StdFileSystem;
pub use std_id_generator::StdIdGenerator;
