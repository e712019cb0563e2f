use rusqlite::types::Value as SqlValue;
use rusqlite::{params, params_from_iter, Connection, OptionalExtension};
use serde_json::Value;
use std::path::{Path, PathBuf};

use super::{Collection, Document, DocumentStore, Filter, StoreError, StoreResult, ID_FIELD};
use crate::types::new_id;

const SCHEMA: &str = r#"
CREATE TABLE IF NOT EXISTS teams (
    id   TEXT PRIMARY KEY,
    body TEXT NOT NULL
);
CREATE TABLE IF NOT EXISTS distances (
    id   TEXT PRIMARY KEY,
    body TEXT NOT NULL
);
"#;

impl From<rusqlite::Error> for StoreError {
    fn from(e: rusqlite::Error) -> Self {
        StoreError::OperationFailed(e.to_string())
    }
}

/// Document store backed by a SQLite database file.
///
/// Each collection is a table of `(id, body)` rows where `body` is the JSON
/// document; filters are evaluated with `json_extract`.
pub struct SqliteStore {
    conn: Connection,
    path: PathBuf,
}

impl SqliteStore {
    /// Open (creating if needed) the database at `path`.
    pub fn open<P: AsRef<Path>>(path: P) -> StoreResult<Self> {
        let path = path.as_ref().to_path_buf();
        let conn = Connection::open(&path)
            .map_err(|e| StoreError::Unavailable(format!("{}: {}", path.display(), e)))?;
        Self::init(conn, path)
    }

    pub fn open_in_memory() -> StoreResult<Self> {
        let conn = Connection::open_in_memory().map_err(|e| StoreError::Unavailable(e.to_string()))?;
        Self::init(conn, PathBuf::from(":memory:"))
    }

    fn init(conn: Connection, path: PathBuf) -> StoreResult<Self> {
        conn.execute_batch(SCHEMA)
            .map_err(|e| StoreError::Unavailable(format!("{}: {}", path.display(), e)))?;
        Ok(Self { conn, path })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Release the connection, reporting any error SQLite raises while closing.
    pub fn close(self) -> StoreResult<()> {
        self.conn
            .close()
            .map_err(|(_, e)| StoreError::OperationFailed(format!("close: {}", e)))
    }

    fn load(&self, collection: Collection, id: &str) -> StoreResult<Option<Document>> {
        let sql = format!("SELECT body FROM {} WHERE id = ?1", collection.as_str());
        let body: Option<String> = self
            .conn
            .query_row(&sql, params![id], |row| row.get(0))
            .optional()?;
        body.map(|b| parse_body(&b)).transpose()
    }
}

fn parse_body(body: &str) -> StoreResult<Document> {
    match serde_json::from_str(body)? {
        Value::Object(map) => Ok(map),
        _ => Err(StoreError::OperationFailed(
            "stored body is not a JSON object".to_string(),
        )),
    }
}

/// Translate a filter into a `WHERE` clause over `json_extract` plus its bound parameters.
fn where_clause(filter: &Filter) -> StoreResult<(String, Vec<SqlValue>)> {
    let mut clauses = Vec::new();
    let mut bound = Vec::new();

    for (path, value) in filter.conditions() {
        bound.push(SqlValue::Text(format!("$.{}", path)));
        let path_param = bound.len();

        let sql_value = match value {
            Value::Null => {
                clauses.push(format!("json_extract(body, ?{}) IS NULL", path_param));
                continue;
            }
            Value::String(s) => SqlValue::Text(s.clone()),
            Value::Bool(b) => SqlValue::Integer(i64::from(*b)),
            Value::Number(n) => match n.as_i64() {
                Some(i) => SqlValue::Integer(i),
                None => SqlValue::Real(n.as_f64().unwrap_or(f64::NAN)),
            },
            Value::Array(_) | Value::Object(_) => {
                return Err(StoreError::OperationFailed(format!(
                    "cannot filter on structured value at '{}'",
                    path
                )))
            }
        };
        bound.push(sql_value);
        clauses.push(format!(
            "json_extract(body, ?{}) = ?{}",
            path_param,
            bound.len()
        ));
    }

    if clauses.is_empty() {
        Ok((String::new(), bound))
    } else {
        Ok((format!(" WHERE {}", clauses.join(" AND ")), bound))
    }
}

impl DocumentStore for SqliteStore {
    fn find(&self, collection: Collection, filter: &Filter) -> StoreResult<Vec<Document>> {
        let (clause, bound) = where_clause(filter)?;
        let sql = format!(
            "SELECT body FROM {}{} ORDER BY rowid",
            collection.as_str(),
            clause
        );

        let mut stmt = self.conn.prepare(&sql)?;
        let bodies = stmt
            .query_map(params_from_iter(bound.iter()), |row| row.get::<_, String>(0))?
            .collect::<Result<Vec<_>, _>>()?;

        bodies.iter().map(|b| parse_body(b)).collect()
    }

    fn insert_one(&mut self, collection: Collection, mut document: Document) -> StoreResult<String> {
        let id = match document.get(ID_FIELD).and_then(Value::as_str) {
            Some(id) => id.to_string(),
            None => {
                let id = new_id();
                document.insert(ID_FIELD.to_string(), Value::String(id.clone()));
                id
            }
        };

        let body = serde_json::to_string(&document)?;
        let sql = format!(
            "INSERT INTO {} (id, body) VALUES (?1, ?2)",
            collection.as_str()
        );
        self.conn.execute(&sql, params![id, body])?;
        Ok(id)
    }

    fn update_one(&mut self, collection: Collection, id: &str, fields: Document) -> StoreResult<bool> {
        let Some(mut document) = self.load(collection, id)? else {
            return Ok(false);
        };

        for (key, value) in fields {
            if key != ID_FIELD {
                document.insert(key, value);
            }
        }

        let body = serde_json::to_string(&document)?;
        let sql = format!("UPDATE {} SET body = ?1 WHERE id = ?2", collection.as_str());
        let changed = self.conn.execute(&sql, params![body, id])?;
        Ok(changed == 1)
    }

    fn delete_many(&mut self, collection: Collection, filter: &Filter) -> StoreResult<u64> {
        let (clause, bound) = where_clause(filter)?;
        let sql = format!("DELETE FROM {}{}", collection.as_str(), clause);
        let removed = self.conn.execute(&sql, params_from_iter(bound.iter()))?;
        Ok(removed as u64)
    }

    fn count(&self, collection: Collection, filter: &Filter) -> StoreResult<u64> {
        let (clause, bound) = where_clause(filter)?;
        let sql = format!("SELECT COUNT(*) FROM {}{}", collection.as_str(), clause);
        let count: i64 = self
            .conn
            .query_row(&sql, params_from_iter(bound.iter()), |row| row.get(0))?;
        Ok(count as u64)
    }
}
