//! ファイルに値を置く KeyValueStore 実装
//!
//! 1 キー = 1 ファイル（`<dir>/<key>.json`）。書き込みは一時ファイル経由の rename で置き換える。

use crate::error::Error;
use crate::ports::outbound::{FileSystem, KeyValueStore};
use std::path::{Path, PathBuf};
use std::sync::Arc;

const VALUE_EXT: &str = "json";
const TMP_EXT: &str = "json.tmp";

/// ディレクトリ配下のファイルを KV ストアとして使う実装
pub struct FileKeyValueStore {
    fs: Arc<dyn FileSystem>,
    dir: PathBuf,
}

impl FileKeyValueStore {
    /// ディレクトリは初回書き込み時に作成する
    pub fn new(fs: Arc<dyn FileSystem>, dir: impl AsRef<Path>) -> Self {
        Self {
            fs,
            dir: dir.as_ref().to_path_buf(),
        }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn path_for(&self, key: &str, ext: &str) -> Result<PathBuf, Error> {
        validate_key(key)?;
        Ok(self.dir.join(format!("{}.{}", key, ext)))
    }
}

/// キーはファイル名としてそのまま使うため `[A-Za-z0-9._-]` のみ許可する
fn validate_key(key: &str) -> Result<(), Error> {
    let valid = !key.is_empty()
        && !key.starts_with('.')
        && key
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_' || c == '.');
    if valid {
        Ok(())
    } else {
        Err(Error::invalid_argument(format!("Invalid storage key: '{}'", key)))
    }
}

impl KeyValueStore for FileKeyValueStore {
    fn get(&self, key: &str) -> Result<Option<String>, Error> {
        let path = self.path_for(key, VALUE_EXT)?;
        if !self.fs.exists(&path) {
            return Ok(None);
        }
        // 壊れた（UTF-8 でない）内容は置換文字入りの文字列として返し、解釈は呼び出し側に任せる
        let bytes = self.fs.read(&path)?;
        Ok(Some(String::from_utf8_lossy(&bytes).into_owned()))
    }

    fn set(&self, key: &str, value: &str) -> Result<(), Error> {
        let path = self.path_for(key, VALUE_EXT)?;
        let tmp = self.path_for(key, TMP_EXT)?;
        self.fs.create_dir_all(&self.dir)?;
        self.fs.write(&tmp, value)?;
        self.fs.rename(&tmp, &path)
    }

    fn remove(&self, key: &str) -> Result<(), Error> {
        let path = self.path_for(key, VALUE_EXT)?;
        if !self.fs.exists(&path) {
            return Ok(());
        }
        self.fs.remove_file(&path)
    }
}
