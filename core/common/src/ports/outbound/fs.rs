//! ファイルシステム Outbound ポート
//!
//! FileKeyValueStore / FileJsonLog / CodeReader はこの trait 経由でのみファイルに触れる。

use crate::error::Error;
use std::io::Write;
use std::path::Path;

pub trait FileSystem: Send + Sync {
    fn exists(&self, path: &Path) -> bool;
    fn read_to_string(&self, path: &Path) -> Result<String, Error>;
    /// バイト列のまま読む（UTF-8 でない内容も I/O エラーにしない）
    fn read(&self, path: &Path) -> Result<Vec<u8>, Error>;
    fn write(&self, path: &Path, contents: &str) -> Result<(), Error>;
    /// 同一ディレクトリ内の置き換え（履歴スロットの更新に使う）
    fn rename(&self, from: &Path, to: &Path) -> Result<(), Error>;
    fn create_dir_all(&self, path: &Path) -> Result<(), Error>;
    fn remove_file(&self, path: &Path) -> Result<(), Error>;
    /// 追記用に開く（無ければ作成）
    fn open_append(&self, path: &Path) -> Result<Box<dyn Write + Send>, Error>;
}
