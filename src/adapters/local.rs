use crate::domain::model::EntityKind;
use crate::domain::ports::Storage;
use crate::utils::error::Result;
use std::fs;
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;

/// One `<kind>.json` file per collection under `base_path`.
#[derive(Debug, Clone)]
pub struct LocalStorage {
    base_path: PathBuf,
}

impl LocalStorage {
    pub fn new(base_path: impl Into<PathBuf>) -> Self {
        Self {
            base_path: base_path.into(),
        }
    }

    /// 建立資料目錄並為缺少的集合寫入空陣列
    pub fn init(base_path: impl Into<PathBuf>) -> Result<Self> {
        let storage = Self::new(base_path);
        fs::create_dir_all(&storage.base_path)?;
        for kind in EntityKind::ALL {
            if !storage.document_path(kind).exists() {
                storage.write_document(kind, b"[]")?;
            }
        }
        Ok(storage)
    }

    pub fn base_path(&self) -> &Path {
        &self.base_path
    }

    pub fn document_path(&self, kind: EntityKind) -> PathBuf {
        self.base_path.join(kind.document_name())
    }
}

impl Storage for LocalStorage {
    fn read_document(&self, kind: EntityKind) -> Result<Option<Vec<u8>>> {
        match fs::read(self.document_path(kind)) {
            Ok(data) => Ok(Some(data)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn write_document(&self, kind: EntityKind, data: &[u8]) -> Result<()> {
        fs::create_dir_all(&self.base_path)?;

        // 先寫入同目錄的暫存檔，再原子地改名覆蓋
        let mut tmp = NamedTempFile::new_in(&self.base_path)?;
        tmp.write_all(data)?;
        tmp.as_file().sync_all()?;
        tmp.persist(self.document_path(kind)).map_err(|e| e.error)?;

        tracing::debug!(
            "Wrote {} bytes to {}",
            data.len(),
            self.document_path(kind).display()
        );
        Ok(())
    }
}
