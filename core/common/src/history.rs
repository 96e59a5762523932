//! 解析履歴ストア
//!
//! 履歴コレクション（新しい順・最大 MAX_HISTORY_ENTRIES 件）を KV ストアの 1 スロットに
//! JSON 配列として丸ごと保存する。
//!
//! - 読み取り（`get_all`）はベストエフォート: 読めない・壊れている場合は空として返す
//! - 書き込み（`save` / `delete` / `clear`）の失敗は `StorageWriteError` として呼び出し元へ返す
//!
//! ロックは持たない。同じスロットへの read-modify-write が並行すると後勝ちになる。

use crate::domain::{AnalysisId, AnalysisResult, SavedAnalysis, MAX_HISTORY_ENTRIES};
use crate::error::Error;
use crate::ports::outbound::{Clock, IdGenerator, KeyValueStore, Log, LogLevel, LogRecord};
use std::sync::Arc;

/// 履歴を保存する既定のスロット名
pub const DEFAULT_HISTORY_KEY: &str = "code-analysis-history";

/// 失敗した書き込み操作の種類
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StorageOp {
    Save,
    Delete,
    Clear,
}

impl StorageOp {
    pub fn as_str(&self) -> &'static str {
        match self {
            StorageOp::Save => "save",
            StorageOp::Delete => "delete",
            StorageOp::Clear => "clear",
        }
    }
}

impl std::fmt::Display for StorageOp {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// 履歴の書き込み・削除に失敗した
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Failed to {op} analysis history: {reason}")]
pub struct StorageWriteError {
    pub op: StorageOp,
    pub reason: String,
}

impl StorageWriteError {
    pub fn new(op: StorageOp, reason: impl Into<String>) -> Self {
        Self {
            op,
            reason: reason.into(),
        }
    }
}

/// スロットの読み取り結果
enum Slot {
    Absent,
    Valid(Vec<SavedAnalysis>),
    Corrupt(String),
}

/// 解析履歴ストア
pub struct HistoryStore {
    store: Arc<dyn KeyValueStore>,
    clock: Arc<dyn Clock>,
    id_gen: Arc<dyn IdGenerator>,
    log: Option<Arc<dyn Log>>,
    key: String,
}

impl HistoryStore {
    pub fn new(
        store: Arc<dyn KeyValueStore>,
        clock: Arc<dyn Clock>,
        id_gen: Arc<dyn IdGenerator>,
    ) -> Self {
        Self {
            store,
            clock,
            id_gen,
            log: None,
            key: DEFAULT_HISTORY_KEY.to_string(),
        }
    }

    /// 読み取りのフォールバックや書き込みをログに記録する
    pub fn with_log(mut self, log: Arc<dyn Log>) -> Self {
        self.log = Some(log);
        self
    }

    /// スロット名を変える（履歴のスコープを分けたい場合）
    pub fn with_key(mut self, key: impl Into<String>) -> Self {
        self.key = key.into();
        self
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    /// 1 件保存し、作成したレコードを返す
    ///
    /// 先頭に追加し、MAX_HISTORY_ENTRIES を超えた古いものを末尾から捨てて丸ごと書き戻す。
    pub fn save(
        &self,
        code: &str,
        result: &AnalysisResult,
    ) -> Result<SavedAnalysis, StorageWriteError> {
        let mut entries = self.load_for_update(StorageOp::Save)?;
        let record = SavedAnalysis::new(
            self.id_gen.next_id(),
            self.clock.now_ms(),
            code,
            result.clone(),
        );
        entries.insert(0, record.clone());
        entries.truncate(MAX_HISTORY_ENTRIES);
        self.write(StorageOp::Save, &entries)?;
        self.log_event(
            LogRecord::new(LogLevel::Info, "history save")
                .field("id", record.id.as_str())
                .field("count", entries.len()),
        );
        Ok(record)
    }

    /// 全件（新しい順）。読めない・壊れている場合は空
    pub fn get_all(&self) -> Vec<SavedAnalysis> {
        match self.read_slot() {
            Ok(Slot::Valid(entries)) => entries,
            Ok(Slot::Absent) => Vec::new(),
            Ok(Slot::Corrupt(reason)) => {
                self.log_event(
                    LogRecord::new(LogLevel::Warn, "history slot is corrupt; treating as empty")
                        .field("reason", reason),
                );
                Vec::new()
            }
            Err(e) => {
                self.log_event(
                    LogRecord::new(LogLevel::Warn, "history read failed; treating as empty")
                        .field("reason", e.to_string()),
                );
                Vec::new()
            }
        }
    }

    /// ID で 1 件取得
    pub fn get(&self, id: &AnalysisId) -> Option<SavedAnalysis> {
        self.get_all().into_iter().find(|e| &e.id == id)
    }

    /// ID が一致するレコードを除いて書き戻す（一致が無くても書き戻す）
    ///
    /// 実際に取り除いたかどうかを返す。
    pub fn delete(&self, id: &AnalysisId) -> Result<bool, StorageWriteError> {
        let mut entries = self.load_for_update(StorageOp::Delete)?;
        let before = entries.len();
        entries.retain(|e| &e.id != id);
        let removed = before - entries.len();
        self.write(StorageOp::Delete, &entries)?;
        self.log_event(
            LogRecord::new(LogLevel::Info, "history delete")
                .field("id", id.as_str())
                .field("removed", removed),
        );
        Ok(removed > 0)
    }

    /// スロットごと削除
    pub fn clear(&self) -> Result<(), StorageWriteError> {
        self.store.remove(&self.key).map_err(|e| {
            let err = StorageWriteError::new(StorageOp::Clear, e.to_string());
            self.log_write_failure(&err);
            err
        })?;
        self.log_event(LogRecord::new(LogLevel::Info, "history clear"));
        Ok(())
    }

    fn read_slot(&self) -> Result<Slot, Error> {
        let Some(raw) = self.store.get(&self.key)? else {
            return Ok(Slot::Absent);
        };
        match serde_json::from_str::<Vec<SavedAnalysis>>(&raw) {
            Ok(entries) => Ok(Slot::Valid(entries)),
            Err(e) => Ok(Slot::Corrupt(e.to_string())),
        }
    }

    /// 更新前の読み取り。壊れたスロットは空から始めるが、I/O 失敗は書き込み失敗として返す
    fn load_for_update(&self, op: StorageOp) -> Result<Vec<SavedAnalysis>, StorageWriteError> {
        match self.read_slot() {
            Ok(Slot::Valid(entries)) => Ok(entries),
            Ok(Slot::Absent) => Ok(Vec::new()),
            Ok(Slot::Corrupt(reason)) => {
                self.log_event(
                    LogRecord::new(LogLevel::Warn, "history slot is corrupt; overwriting")
                        .field("operation", op.as_str())
                        .field("reason", reason),
                );
                Ok(Vec::new())
            }
            Err(e) => {
                let err = StorageWriteError::new(op, e.to_string());
                self.log_write_failure(&err);
                Err(err)
            }
        }
    }

    fn write(&self, op: StorageOp, entries: &[SavedAnalysis]) -> Result<(), StorageWriteError> {
        let json = serde_json::to_string(entries)
            .map_err(|e| StorageWriteError::new(op, e.to_string()))?;
        self.store.set(&self.key, &json).map_err(|e| {
            let err = StorageWriteError::new(op, e.to_string());
            self.log_write_failure(&err);
            err
        })
    }

    fn log_write_failure(&self, err: &StorageWriteError) {
        self.log_event(
            LogRecord::new(LogLevel::Error, err.to_string()).field("operation", err.op.as_str()),
        );
    }

    fn log_event(&self, record: LogRecord) {
        if let Some(logger) = &self.log {
            let record = record
                .layer("adapter")
                .kind("history")
                .field("key", self.key.as_str());
            let _ = logger.log(&record);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapter::{FileKeyValueStore, MemoryKeyValueStore, StdFileSystem};
    use std::sync::atomic::{AtomicU64, Ordering};
    use std::sync::Mutex;

    struct FixedClock(u64);

    impl Clock for FixedClock {
        fn now_ms(&self) -> u64 {
            self.0
        }
    }

    /// analysis_1, analysis_2, ... を順に返す
    #[derive(Default)]
    struct SeqIds(AtomicU64);

    impl IdGenerator for SeqIds {
        fn next_id(&self) -> AnalysisId {
            let n = self.0.fetch_add(1, Ordering::SeqCst) + 1;
            AnalysisId::new(format!("analysis_{}", n))
        }
    }

    /// 読み取り・書き込み・削除の失敗を個別に注入できるストア
    #[derive(Default)]
    struct FailingStore {
        inner: MemoryKeyValueStore,
        fail_get: bool,
        fail_set: bool,
        fail_remove: bool,
    }

    impl KeyValueStore for FailingStore {
        fn get(&self, key: &str) -> Result<Option<String>, Error> {
            if self.fail_get {
                return Err(Error::io_msg("storage unavailable"));
            }
            self.inner.get(key)
        }

        fn set(&self, key: &str, value: &str) -> Result<(), Error> {
            if self.fail_set {
                return Err(Error::io_msg("quota exceeded"));
            }
            self.inner.set(key, value)
        }

        fn remove(&self, key: &str) -> Result<(), Error> {
            if self.fail_remove {
                return Err(Error::io_msg("access denied"));
            }
            self.inner.remove(key)
        }
    }

    #[derive(Default)]
    struct CaptureLog(Mutex<Vec<LogRecord>>);

    impl Log for CaptureLog {
        fn log(&self, record: &LogRecord) -> Result<(), Error> {
            self.0.lock().unwrap().push(record.clone());
            Ok(())
        }
    }

    fn store_with(kv: Arc<dyn KeyValueStore>) -> HistoryStore {
        HistoryStore::new(kv, Arc::new(FixedClock(1_700_000_000_000)), Arc::new(SeqIds::default()))
    }

    fn result(errors: &[&str], refactors: &[&str]) -> AnalysisResult {
        AnalysisResult::new(
            errors.iter().map(|s| s.to_string()).collect(),
            vec![],
            refactors.iter().map(|s| s.to_string()).collect(),
        )
    }

    #[test]
    fn test_save_then_get_all_end_to_end() {
        let history = store_with(Arc::new(MemoryKeyValueStore::new()));
        let saved = history.save("var x=1;", &result(&["e1"], &["r1"])).unwrap();

        let all = history.get_all();
        assert_eq!(all.len(), 1);
        assert_eq!(all[0], saved);
        assert_eq!(all[0].code_snippet, "var x=1;");
        assert_eq!(all[0].timestamp, 1_700_000_000_000);
        assert_eq!(all[0].result.errors, vec!["e1".to_string()]);
        assert!(all[0].result.security_vulnerabilities.is_empty());
        assert_eq!(all[0].result.refactoring_suggestions, vec!["r1".to_string()]);
    }

    #[test]
    fn test_newest_first_and_length_grows_to_cap() {
        let history = store_with(Arc::new(MemoryKeyValueStore::new()));
        for i in 1..=60u64 {
            let prev = history.get_all().len();
            let saved = history.save(&format!("code {}", i), &AnalysisResult::default()).unwrap();
            let all = history.get_all();
            assert_eq!(all.len(), (prev + 1).min(MAX_HISTORY_ENTRIES));
            assert_eq!(all[0].id, saved.id);
        }
    }

    #[test]
    fn test_cap_evicts_oldest() {
        let history = store_with(Arc::new(MemoryKeyValueStore::new()));
        for i in 1..=MAX_HISTORY_ENTRIES {
            history.save(&format!("code {}", i), &AnalysisResult::default()).unwrap();
        }
        let before = history.get_all();
        assert_eq!(before.len(), MAX_HISTORY_ENTRIES);
        assert_eq!(before.last().unwrap().id.as_str(), "analysis_1");

        history.save("newest", &AnalysisResult::default()).unwrap();
        let after = history.get_all();
        assert_eq!(after.len(), MAX_HISTORY_ENTRIES);
        assert_eq!(after[0].code_snippet, "newest");
        assert_eq!(after.last().unwrap().id.as_str(), "analysis_2");
        assert!(after.iter().all(|e| e.id.as_str() != "analysis_1"));
    }

    #[test]
    fn test_snippet_is_truncated() {
        let history = store_with(Arc::new(MemoryKeyValueStore::new()));
        let code = "x".repeat(500);
        let saved = history.save(&code, &AnalysisResult::default()).unwrap();
        assert_eq!(saved.code_snippet.chars().count(), 200);
        assert_eq!(history.get_all()[0].code_snippet, "x".repeat(200));
    }

    #[test]
    fn test_get_all_on_absent_and_corrupt_slot() {
        let kv = Arc::new(MemoryKeyValueStore::new());
        let history = store_with(kv.clone());
        assert!(history.get_all().is_empty());

        kv.set(DEFAULT_HISTORY_KEY, "not valid json").unwrap();
        assert!(history.get_all().is_empty());

        kv.set(DEFAULT_HISTORY_KEY, r#"{"not":"an array"}"#).unwrap();
        assert!(history.get_all().is_empty());
    }

    #[test]
    fn test_get_all_swallows_read_failure() {
        let kv = Arc::new(FailingStore {
            fail_get: true,
            ..Default::default()
        });
        let log = Arc::new(CaptureLog::default());
        let history = store_with(kv).with_log(log.clone());
        assert!(history.get_all().is_empty());

        let records = log.0.lock().unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].level, LogLevel::Warn);
        assert_eq!(records[0].kind.as_deref(), Some("history"));
    }

    #[test]
    fn test_save_over_corrupt_slot_starts_fresh() {
        let kv = Arc::new(MemoryKeyValueStore::new());
        kv.set(DEFAULT_HISTORY_KEY, "{{{ garbage").unwrap();
        let history = store_with(kv.clone());
        history.save("fn f() {}", &AnalysisResult::default()).unwrap();

        assert_eq!(history.get_all().len(), 1);
        let raw = kv.get(DEFAULT_HISTORY_KEY).unwrap().unwrap();
        assert!(serde_json::from_str::<Vec<SavedAnalysis>>(&raw).is_ok());
    }

    #[test]
    fn test_save_over_non_utf8_file_starts_fresh() {
        let tmp = tempfile::tempdir().unwrap();
        let dir = tmp.path().join("history");
        std::fs::create_dir_all(&dir).unwrap();
        let slot = dir.join(format!("{}.json", DEFAULT_HISTORY_KEY));
        std::fs::write(&slot, [0xff, 0xfe, b'[']).unwrap();

        let kv = Arc::new(FileKeyValueStore::new(Arc::new(StdFileSystem), &dir));
        let history = store_with(kv);
        assert!(history.get_all().is_empty());
        history.save("a", &AnalysisResult::default()).unwrap();
        history.save("b", &AnalysisResult::default()).unwrap();

        assert_eq!(history.get_all().len(), 2);
        let raw = std::fs::read_to_string(&slot).unwrap();
        assert_eq!(serde_json::from_str::<Vec<SavedAnalysis>>(&raw).unwrap().len(), 2);
    }

    #[test]
    fn test_delete_over_corrupt_slot_writes_valid_array() {
        let kv = Arc::new(MemoryKeyValueStore::new());
        kv.set(DEFAULT_HISTORY_KEY, "not valid json").unwrap();
        let history = store_with(kv.clone());
        assert!(!history.delete(&AnalysisId::new("analysis_1")).unwrap());

        let raw = kv.get(DEFAULT_HISTORY_KEY).unwrap().unwrap();
        let entries: Vec<SavedAnalysis> = serde_json::from_str(&raw).unwrap();
        assert!(entries.is_empty());
    }

    #[test]
    fn test_save_write_failure_is_reported() {
        let kv = Arc::new(FailingStore {
            fail_set: true,
            ..Default::default()
        });
        let history = store_with(kv);
        let err = history.save("code", &AnalysisResult::default()).unwrap_err();
        assert_eq!(err.op, StorageOp::Save);
        assert!(err.reason.contains("quota exceeded"));
        assert!(history.get_all().is_empty());
    }

    #[test]
    fn test_save_read_failure_does_not_overwrite() {
        let kv = Arc::new(FailingStore {
            fail_get: true,
            ..Default::default()
        });
        kv.inner.set(DEFAULT_HISTORY_KEY, "[]").unwrap();
        let history = store_with(kv.clone());
        let err = history.save("code", &AnalysisResult::default()).unwrap_err();
        assert_eq!(err.op, StorageOp::Save);
        assert_eq!(kv.inner.get(DEFAULT_HISTORY_KEY).unwrap().as_deref(), Some("[]"));
    }

    #[test]
    fn test_delete_removes_only_matching_id() {
        let history = store_with(Arc::new(MemoryKeyValueStore::new()));
        for code in ["a", "b", "c", "d"] {
            history.save(code, &AnalysisResult::default()).unwrap();
        }
        assert!(history.delete(&AnalysisId::new("analysis_2")).unwrap());

        let snippets: Vec<_> = history.get_all().into_iter().map(|e| e.code_snippet).collect();
        assert_eq!(snippets, vec!["d", "c", "a"]);
    }

    #[test]
    fn test_delete_unknown_id_keeps_everything() {
        let kv = Arc::new(MemoryKeyValueStore::new());
        let history = store_with(kv.clone());
        assert!(!history.delete(&AnalysisId::new("missing")).unwrap());
        assert_eq!(kv.get(DEFAULT_HISTORY_KEY).unwrap().as_deref(), Some("[]"));

        history.save("a", &AnalysisResult::default()).unwrap();
        assert!(!history.delete(&AnalysisId::new("missing")).unwrap());
        assert_eq!(history.get_all().len(), 1);
    }

    #[test]
    fn test_delete_write_failure_is_reported() {
        let kv = Arc::new(FailingStore {
            fail_set: true,
            ..Default::default()
        });
        let history = store_with(kv);
        let err = history.delete(&AnalysisId::new("x")).unwrap_err();
        assert_eq!(err.op, StorageOp::Delete);
        assert_eq!(
            err.to_string(),
            "Failed to delete analysis history: quota exceeded"
        );
    }

    #[test]
    fn test_clear_removes_slot() {
        let kv = Arc::new(MemoryKeyValueStore::new());
        let history = store_with(kv.clone());
        history.save("a", &AnalysisResult::default()).unwrap();
        history.clear().unwrap();
        assert_eq!(kv.get(DEFAULT_HISTORY_KEY).unwrap(), None);
        assert!(history.get_all().is_empty());

        // 既に無いスロットの clear も成功
        history.clear().unwrap();
    }

    #[test]
    fn test_clear_failure_is_reported() {
        let kv = Arc::new(FailingStore {
            fail_remove: true,
            ..Default::default()
        });
        let log = Arc::new(CaptureLog::default());
        let history = store_with(kv).with_log(log.clone());
        let err = history.clear().unwrap_err();
        assert_eq!(err.op, StorageOp::Clear);

        let records = log.0.lock().unwrap();
        assert_eq!(records.last().unwrap().level, LogLevel::Error);
    }

    #[test]
    fn test_get_by_id() {
        let history = store_with(Arc::new(MemoryKeyValueStore::new()));
        history.save("first", &AnalysisResult::default()).unwrap();
        history.save("second", &AnalysisResult::default()).unwrap();
        let found = history.get(&AnalysisId::new("analysis_1")).unwrap();
        assert_eq!(found.code_snippet, "first");
        assert!(history.get(&AnalysisId::new("analysis_9")).is_none());
    }

    #[test]
    fn test_separate_keys_are_independent() {
        let kv: Arc<dyn KeyValueStore> = Arc::new(MemoryKeyValueStore::new());
        let a = store_with(kv.clone()).with_key("scope-a");
        let b = store_with(kv).with_key("scope-b");
        a.save("only in a", &AnalysisResult::default()).unwrap();
        assert_eq!(a.key(), "scope-a");
        assert_eq!(a.get_all().len(), 1);
        assert!(b.get_all().is_empty());
    }

    #[test]
    fn test_reads_records_written_by_other_clients() {
        let kv = Arc::new(MemoryKeyValueStore::new());
        kv.set(
            DEFAULT_HISTORY_KEY,
            r#"[{"id":"analysis_1700000000000_k3j2h1g0f","timestamp":1700000000000,"codeSnippet":"let a;","result":{"errors":[],"securityVulnerabilities":["xss"],"refactoringSuggestions":[]}}]"#,
        )
        .unwrap();
        let all = store_with(kv).get_all();
        assert_eq!(all.len(), 1);
        assert_eq!(all[0].result.security_vulnerabilities, vec!["xss".to_string()]);
    }
}
