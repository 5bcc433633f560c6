//! Depth cursor persistence.
//!
//! The cursor records the last forwarded measured depth per asset/log
//! scope so replayed windows are skipped. Values are stored as text, the
//! same serialized form the handler parses back.
//!
//! Advancement is a conditional upsert: a cursor only moves forward.
//! Concurrent invocations for the same scope cannot lose the larger
//! write, and a stale replay cannot drag the checkpoint backwards.

use async_trait::async_trait;
use rusqlite::{Connection, OptionalExtension};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use super::error::Result;

/// Key-value store for depth cursors.
#[async_trait]
pub trait CursorStore: Send + Sync {
    /// Read the cursor for a scope. `None` when no window has been
    /// forwarded for that scope yet.
    async fn get(&self, scope: &str) -> Result<Option<String>>;

    /// Advance the cursor to `measured_depth` if it is greater than the
    /// stored value. A smaller or equal value is a no-op.
    async fn advance(&self, scope: &str, measured_depth: f64) -> Result<()>;
}

/// SQLite-backed cursor store.
pub struct SqliteCursorStore {
    conn: Arc<Mutex<Connection>>,
}

impl SqliteCursorStore {
    /// Open (or create) the cursor database at `db_path`.
    ///
    /// Schema creation is idempotent; WAL mode keeps readers from
    /// blocking the runtime's writes.
    pub fn open(db_path: &str) -> Result<Self> {
        let conn = Connection::open(db_path)?;

        conn.pragma_update(None, "journal_mode", "WAL")?;

        conn.execute(
            "CREATE TABLE IF NOT EXISTS depth_cursors (
                scope TEXT PRIMARY KEY,
                measured_depth TEXT NOT NULL,
                updated_at INTEGER NOT NULL
            )",
            [],
        )?;

        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
        })
    }
}

#[async_trait]
impl CursorStore for SqliteCursorStore {
    async fn get(&self, scope: &str) -> Result<Option<String>> {
        let conn = self.conn.lock().unwrap();

        let value = conn
            .query_row(
                "SELECT measured_depth FROM depth_cursors WHERE scope = ?1",
                [scope],
                |row| row.get(0),
            )
            .optional()?;

        Ok(value)
    }

    async fn advance(&self, scope: &str, measured_depth: f64) -> Result<()> {
        let now = chrono::Utc::now().timestamp();
        let conn = self.conn.lock().unwrap();

        conn.execute(
            "INSERT INTO depth_cursors (scope, measured_depth, updated_at)
             VALUES (?1, ?2, ?3)
             ON CONFLICT(scope) DO UPDATE SET
                 measured_depth = excluded.measured_depth,
                 updated_at = excluded.updated_at
             WHERE CAST(excluded.measured_depth AS REAL)
                 > CAST(depth_cursors.measured_depth AS REAL)",
            rusqlite::params![scope, measured_depth.to_string(), now],
        )?;

        Ok(())
    }
}

/// In-memory cursor store for tests and dry runs.
#[derive(Default)]
pub struct MemoryCursorStore {
    cursors: Mutex<HashMap<String, String>>,
}

impl MemoryCursorStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Overwrite a cursor unconditionally. Test setup only; the runtime
    /// path goes through `advance`.
    pub fn set_raw(&self, scope: &str, value: &str) {
        self.cursors
            .lock()
            .unwrap()
            .insert(scope.to_string(), value.to_string());
    }

    /// Drop a cursor entirely, as if the scope had never forwarded.
    pub fn clear(&self, scope: &str) {
        self.cursors.lock().unwrap().remove(scope);
    }
}

#[async_trait]
impl CursorStore for MemoryCursorStore {
    async fn get(&self, scope: &str) -> Result<Option<String>> {
        Ok(self.cursors.lock().unwrap().get(scope).cloned())
    }

    async fn advance(&self, scope: &str, measured_depth: f64) -> Result<()> {
        let mut cursors = self.cursors.lock().unwrap();

        let stored = cursors.get(scope).and_then(|v| v.parse::<f64>().ok());
        match stored {
            Some(current) if measured_depth <= current => {}
            _ => {
                cursors.insert(scope.to_string(), measured_depth.to_string());
            }
        }

        Ok(())
    }
}
