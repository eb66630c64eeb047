use crate::domain::model::EntityKind;
use crate::utils::error::Result;
use std::path::Path;

/// Raw document access, one document per [`EntityKind`].
///
/// `read_document` returns `Ok(None)` when the document does not exist yet.
/// `write_document` must replace the whole document in one step.
pub trait Storage: Send + Sync {
    fn read_document(&self, kind: EntityKind) -> Result<Option<Vec<u8>>>;
    fn write_document(&self, kind: EntityKind, data: &[u8]) -> Result<()>;
}

pub trait ConfigProvider: Send + Sync {
    fn data_dir(&self) -> &Path;
    fn verbose(&self) -> bool;
    fn json_logs(&self) -> bool;
}
