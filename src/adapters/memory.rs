use crate::domain::model::EntityKind;
use crate::domain::ports::Storage;
use crate::utils::error::{ReservationError, Result};
use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard};

/// In-process documents. Clones share the same documents.
#[derive(Debug, Clone, Default)]
pub struct MemoryStorage {
    documents: Arc<Mutex<HashMap<EntityKind, Vec<u8>>>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_document(self, kind: EntityKind, data: impl Into<Vec<u8>>) -> Self {
        if let Ok(mut documents) = self.documents.lock() {
            documents.insert(kind, data.into());
        }
        self
    }

    pub fn document(&self, kind: EntityKind) -> Option<Vec<u8>> {
        self.documents.lock().ok()?.get(&kind).cloned()
    }

    fn lock(&self) -> Result<MutexGuard<'_, HashMap<EntityKind, Vec<u8>>>> {
        self.documents.lock().map_err(|_| {
            ReservationError::IoError(std::io::Error::other("memory storage lock poisoned"))
        })
    }
}

impl Storage for MemoryStorage {
    fn read_document(&self, kind: EntityKind) -> Result<Option<Vec<u8>>> {
        Ok(self.lock()?.get(&kind).cloned())
    }

    fn write_document(&self, kind: EntityKind, data: &[u8]) -> Result<()> {
        self.lock()?.insert(kind, data.to_vec());
        Ok(())
    }
}
