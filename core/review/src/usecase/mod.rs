//! ユースケース（ポート経由でのみ外界に触れる）

pub mod analyze;
pub mod history;

pub use analyze::{AnalysisOutcome, AnalyzeUseCase};
pub use history::{ClearOutcome, HistoryUseCase};
