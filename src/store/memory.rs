use serde_json::Value;
use std::collections::HashMap;

use super::{Collection, Document, DocumentStore, Filter, StoreError, StoreResult, ID_FIELD};
use crate::types::new_id;

/// Store kept entirely in memory. Nothing survives the process.
#[derive(Debug, Default)]
pub struct MemoryStore {
    collections: HashMap<Collection, Vec<Document>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn documents(&self, collection: Collection) -> &[Document] {
        self.collections
            .get(&collection)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }
}

fn id_of(document: &Document) -> Option<&str> {
    document.get(ID_FIELD).and_then(Value::as_str)
}

impl DocumentStore for MemoryStore {
    fn find(&self, collection: Collection, filter: &Filter) -> StoreResult<Vec<Document>> {
        Ok(self
            .documents(collection)
            .iter()
            .filter(|d| filter.matches(d))
            .cloned()
            .collect())
    }

    fn insert_one(&mut self, collection: Collection, mut document: Document) -> StoreResult<String> {
        let id = match id_of(&document) {
            Some(id) => id.to_string(),
            None => {
                let id = new_id();
                document.insert(ID_FIELD.to_string(), Value::String(id.clone()));
                id
            }
        };

        let docs = self.collections.entry(collection).or_default();
        if docs.iter().any(|d| id_of(d) == Some(id.as_str())) {
            return Err(StoreError::OperationFailed(format!(
                "duplicate {} in {}: {}",
                ID_FIELD, collection, id
            )));
        }
        docs.push(document);
        Ok(id)
    }

    fn update_one(&mut self, collection: Collection, id: &str, fields: Document) -> StoreResult<bool> {
        let Some(target) = self
            .collections
            .get_mut(&collection)
            .and_then(|docs| docs.iter_mut().find(|d| id_of(d) == Some(id)))
        else {
            return Ok(false);
        };

        for (key, value) in fields {
            if key != ID_FIELD {
                target.insert(key, value);
            }
        }
        Ok(true)
    }

    fn delete_many(&mut self, collection: Collection, filter: &Filter) -> StoreResult<u64> {
        let Some(docs) = self.collections.get_mut(&collection) else {
            return Ok(0);
        };
        let before = docs.len();
        docs.retain(|d| !filter.matches(d));
        Ok((before - docs.len()) as u64)
    }
}
