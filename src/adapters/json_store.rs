use crate::domain::model::Entity;
use crate::domain::ports::Storage;
use crate::utils::error::Result;
use serde_json::Value;

const EMPTY_DOCUMENT: &[u8] = b"[]";

/// Typed collections on top of a raw [`Storage`].
///
/// Loading never fails: a missing document is created empty, a corrupt or
/// non-array document reads as an empty collection, and each element that
/// fails schema or invariant checks is skipped on its own. Every fault is
/// logged. Saving always writes the full collection.
#[derive(Debug)]
pub struct JsonStore<S: Storage> {
    storage: S,
}

impl<S: Storage> JsonStore<S> {
    pub fn new(storage: S) -> Self {
        Self { storage }
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    pub fn load<E: Entity>(&self) -> Vec<E> {
        let kind = E::KIND;

        let raw = match self.storage.read_document(kind) {
            Ok(Some(raw)) => raw,
            Ok(None) => {
                tracing::debug!("No {} document yet, creating an empty one", kind);
                if let Err(e) = self.storage.write_document(kind, EMPTY_DOCUMENT) {
                    tracing::warn!("Could not create empty {} document: {}", kind, e);
                }
                return Vec::new();
            }
            Err(e) => {
                tracing::error!("Could not read {} document: {}", kind, e);
                return Vec::new();
            }
        };

        if raw.trim_ascii().is_empty() {
            return Vec::new();
        }

        let items = match serde_json::from_slice::<Value>(&raw) {
            Ok(Value::Array(items)) => items,
            Ok(other) => {
                tracing::error!(
                    "{} document is not a JSON array (found {}), ignoring it",
                    kind,
                    json_type_name(&other)
                );
                return Vec::new();
            }
            Err(e) => {
                tracing::error!("{} document is not valid JSON: {}", kind, e);
                return Vec::new();
            }
        };

        let total = items.len();
        let records: Vec<E> = items
            .into_iter()
            .enumerate()
            .filter_map(|(index, item)| match serde_json::from_value::<E>(item) {
                Ok(record) => Some(record),
                Err(e) => {
                    tracing::warn!("Skipping invalid {} record at index {}: {}", kind, index, e);
                    None
                }
            })
            .collect();

        tracing::debug!("Loaded {}/{} {} records", records.len(), total, kind);
        records
    }

    pub fn save<E: Entity>(&self, records: &[E]) -> Result<()> {
        let data = serde_json::to_vec_pretty(records)?;
        self.storage.write_document(E::KIND, &data)?;
        tracing::debug!("Saved {} {} records", records.len(), E::KIND);
        Ok(())
    }
}

fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
