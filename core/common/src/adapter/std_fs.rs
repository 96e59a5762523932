//! FileSystem の標準実装

use crate::error::Error;
use crate::ports::outbound::FileSystem;
use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::Path;

#[derive(Debug, Clone, Default)]
pub struct StdFileSystem;

/// "Failed to <action> '<path>': <cause>" 形式の Io エラー
fn io_error(action: &str, path: &Path, e: std::io::Error) -> Error {
    Error::io_msg(format!("Failed to {} '{}': {}", action, path.display(), e))
}

impl FileSystem for StdFileSystem {
    fn exists(&self, path: &Path) -> bool {
        path.exists()
    }

    fn read_to_string(&self, path: &Path) -> Result<String, Error> {
        fs::read_to_string(path).map_err(|e| io_error("read", path, e))
    }

    fn read(&self, path: &Path) -> Result<Vec<u8>, Error> {
        fs::read(path).map_err(|e| io_error("read", path, e))
    }

    fn write(&self, path: &Path, contents: &str) -> Result<(), Error> {
        fs::write(path, contents).map_err(|e| io_error("write", path, e))
    }

    fn rename(&self, from: &Path, to: &Path) -> Result<(), Error> {
        fs::rename(from, to).map_err(|e| io_error("replace", to, e))
    }

    fn create_dir_all(&self, path: &Path) -> Result<(), Error> {
        fs::create_dir_all(path).map_err(|e| io_error("create directory", path, e))
    }

    fn remove_file(&self, path: &Path) -> Result<(), Error> {
        fs::remove_file(path).map_err(|e| io_error("remove", path, e))
    }

    fn open_append(&self, path: &Path) -> Result<Box<dyn Write + Send>, Error> {
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(path)
            .map_err(|e| io_error("open", path, e))?;
        Ok(Box::new(file))
    }
}
