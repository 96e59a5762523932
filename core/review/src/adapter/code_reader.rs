//! CodeReader の標準実装（ファイルは FileSystem ポート、`-` は stdin）

use crate::domain::{CodeSource, EXAMPLE_CODE};
use crate::ports::outbound::CodeReader;
use common::error::Error;
use common::ports::outbound::FileSystem;
use std::io::Read;
use std::sync::Arc;

pub struct StdCodeReader {
    fs: Arc<dyn FileSystem>,
}

impl StdCodeReader {
    pub fn new(fs: Arc<dyn FileSystem>) -> Self {
        Self { fs }
    }
}

impl CodeReader for StdCodeReader {
    fn read(&self, source: &CodeSource) -> Result<String, Error> {
        match source {
            CodeSource::File(path) => self.fs.read_to_string(path),
            CodeSource::Stdin => {
                let mut buf = String::new();
                std::io::stdin()
                    .read_to_string(&mut buf)
                    .map_err(|e| Error::io_msg(format!("Failed to read stdin: {}", e)))?;
                Ok(buf)
            }
            CodeSource::Example => Ok(EXAMPLE_CODE.to_string()),
        }
    }
}
