//! AnalysisId を生成する IdGenerator の標準実装（Clock + UUID v4）
//!
//! 形式: `analysis_<epoch-ms>_<9 文字の小文字 hex>`。同一 ms 内でも乱数部で区別する。

use crate::domain::AnalysisId;
use crate::ports::outbound::{Clock, IdGenerator};
use std::sync::Arc;

const PREFIX: &str = "analysis";
const SUFFIX_LEN: usize = 9;

/// Clock + UUID v4 で AnalysisId を生成する標準実装
pub struct StdIdGenerator {
    clock: Arc<dyn Clock>,
}

impl StdIdGenerator {
    pub fn new(clock: Arc<dyn Clock>) -> Self {
        Self { clock }
    }
}

impl IdGenerator for StdIdGenerator {
    fn next_id(&self) -> AnalysisId {
        let ms = self.clock.now_ms();
        let random = uuid::Uuid::new_v4().simple().to_string();
        AnalysisId::new(format!("{}_{}_{}", PREFIX, ms, &random[..SUFFIX_LEN]))
    }
}
