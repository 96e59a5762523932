mod cli_tests;

use common::adapter::{MemoryKeyValueStore, NoopLog};
use common::domain::AnalysisId;
use common::history::HistoryStore;
use common::ports::outbound::{Clock, IdGenerator, KeyValueStore};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

/// 呼ぶたびに 1 ms 進む時計
pub(crate) struct StepClock(pub AtomicU64);

impl Clock for StepClock {
    fn now_ms(&self) -> u64 {
        self.0.fetch_add(1, Ordering::SeqCst)
    }
}

/// `analysis_<n>` を順に返す
pub(crate) struct SeqIds(pub AtomicU64);

impl IdGenerator for SeqIds {
    fn next_id(&self) -> AnalysisId {
        AnalysisId::new(format!("analysis_{}", self.0.fetch_add(1, Ordering::SeqCst)))
    }
}

/// メモリ KV ストア上の HistoryStore
pub(crate) fn memory_history() -> Arc<HistoryStore> {
    history_on(Arc::new(MemoryKeyValueStore::new()))
}

pub(crate) fn history_on(store: Arc<dyn KeyValueStore>) -> Arc<HistoryStore> {
    Arc::new(
        HistoryStore::new(
            store,
            Arc::new(StepClock(AtomicU64::new(1_000))),
            Arc::new(SeqIds(AtomicU64::new(1))),
        )
        .with_log(Arc::new(NoopLog)),
    )
}
