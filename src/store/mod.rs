//! Document store
//!
//! Documents are JSON objects with a string `_id`, grouped into a fixed set of
//! collections. The importer only needs find / insert / update / delete-many,
//! so that is all [`DocumentStore`] offers.
//!
//! - [`SqliteStore`]: persistent store, one table of JSON bodies per collection
//! - [`MemoryStore`]: in-process store used by tests

mod memory;
mod sqlite;

pub use memory::MemoryStore;
pub use sqlite::SqliteStore;

use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::{Map, Value};
use std::fmt;
use thiserror::Error;
use tracing::debug;

use crate::config::StoreConfig;
use crate::error::ImportResult;

pub type Document = Map<String, Value>;

pub type StoreResult<T> = Result<T, StoreError>;

/// Identifier field present on every stored document.
pub const ID_FIELD: &str = "_id";

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("Document store unavailable: {0}")]
    Unavailable(String),

    #[error("Document store operation failed: {0}")]
    OperationFailed(String),
}

impl StoreError {
    /// Connectivity problems end the run; a failed single operation does not.
    pub fn is_fatal(&self) -> bool {
        matches!(self, StoreError::Unavailable(_))
    }
}

impl From<serde_json::Error> for StoreError {
    fn from(e: serde_json::Error) -> Self {
        StoreError::OperationFailed(format!("document encoding: {}", e))
    }
}

/// Collections the importer writes to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Collection {
    Teams,
    Distances,
}

impl Collection {
    pub const ALL: [Collection; 2] = [Collection::Teams, Collection::Distances];

    pub fn as_str(&self) -> &'static str {
        match self {
            Collection::Teams => "teams",
            Collection::Distances => "distances",
        }
    }
}

impl fmt::Display for Collection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Conjunction of equality conditions on (possibly dotted) field paths.
///
/// `Filter::eq("stadium.name", "Soldier Field")` matches documents whose
/// embedded `stadium` object has that `name`. An empty filter matches all.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Filter {
    conditions: Vec<(String, Value)>,
}

impl Filter {
    pub fn all() -> Self {
        Self::default()
    }

    pub fn eq(path: impl Into<String>, value: impl Into<Value>) -> Self {
        Self::all().and(path, value)
    }

    pub fn and(mut self, path: impl Into<String>, value: impl Into<Value>) -> Self {
        self.conditions.push((path.into(), value.into()));
        self
    }

    pub fn conditions(&self) -> &[(String, Value)] {
        &self.conditions
    }

    pub fn is_empty(&self) -> bool {
        self.conditions.is_empty()
    }

    pub fn matches(&self, document: &Document) -> bool {
        self.conditions
            .iter()
            .all(|(path, expected)| lookup(document, path).unwrap_or(&Value::Null) == expected)
    }
}

/// Resolve a dotted path inside a document.
pub fn lookup<'a>(document: &'a Document, path: &str) -> Option<&'a Value> {
    let mut keys = path.split('.');
    let first = document.get(keys.next()?)?;
    keys.try_fold(first, |value, key| value.get(key))
}

pub trait DocumentStore {
    /// All documents matching `filter`, in insertion order.
    fn find(&self, collection: Collection, filter: &Filter) -> StoreResult<Vec<Document>>;

    /// Insert one document, assigning an `_id` when it has none. Returns the id.
    fn insert_one(&mut self, collection: Collection, document: Document) -> StoreResult<String>;

    /// Set the top-level fields of `fields` on the document with `id`.
    /// Fields not named are left as they are. Returns false when no document matched.
    fn update_one(&mut self, collection: Collection, id: &str, fields: Document) -> StoreResult<bool>;

    /// Delete every matching document, returning how many were removed.
    fn delete_many(&mut self, collection: Collection, filter: &Filter) -> StoreResult<u64>;

    fn find_one(&self, collection: Collection, filter: &Filter) -> StoreResult<Option<Document>> {
        Ok(self.find(collection, filter)?.into_iter().next())
    }

    fn count(&self, collection: Collection, filter: &Filter) -> StoreResult<u64> {
        Ok(self.find(collection, filter)?.len() as u64)
    }
}

/// Serialize a typed record into a store document.
pub fn to_document<T: Serialize>(value: &T) -> StoreResult<Document> {
    match serde_json::to_value(value)? {
        Value::Object(map) => Ok(map),
        other => Err(StoreError::OperationFailed(format!(
            "expected an object document, got {}",
            other
        ))),
    }
}

/// The `_id` of a stored document.
pub fn document_id(document: &Document) -> StoreResult<String> {
    document
        .get(ID_FIELD)
        .and_then(Value::as_str)
        .map(str::to_string)
        .ok_or_else(|| StoreError::OperationFailed(format!("document without {}", ID_FIELD)))
}

/// Deserialize a store document into a typed record.
pub fn from_document<T: DeserializeOwned>(document: Document) -> StoreResult<T> {
    Ok(serde_json::from_value(Value::Object(document))?)
}

/// Open the configured store, run `unit` against it, and close the store
/// whether or not `unit` succeeded.
///
/// An error from `unit` takes precedence over an error while closing.
pub fn with_store<T, F>(config: &StoreConfig, unit: F) -> ImportResult<T>
where
    F: FnOnce(&mut SqliteStore) -> ImportResult<T>,
{
    let mut store = SqliteStore::open(&config.database)?;
    debug!(database = %config.database.display(), "store opened");

    let outcome = unit(&mut store);
    let closed = store.close();
    debug!("store closed");

    let value = outcome?;
    closed?;
    Ok(value)
}
