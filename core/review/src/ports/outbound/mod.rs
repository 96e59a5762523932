//! Outbound ポート（review 固有）

pub mod code_reader;
pub mod confirm;

pub use code_reader::CodeReader;
pub use confirm::ConfirmPrompt;
