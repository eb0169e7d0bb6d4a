mod schema;

use std::path::PathBuf;
use std::sync::{Arc, Mutex};

use anyhow::Result;
use chrono::Utc;
use rusqlite::{Connection, OptionalExtension};

/// SQLite-backed document storage.
///
/// The lab persists whole JSON documents under fixed keys, the same shape a
/// browser's local storage would give it. Every write replaces the document
/// in a single statement, so a reader never observes a partial write.
#[derive(Clone)]
pub struct Database {
    conn: Arc<Mutex<Connection>>,
}

impl Database {
    pub fn open(path: PathBuf) -> Result<Self> {
        let parent = path
            .parent()
            .ok_or_else(|| anyhow::anyhow!("Database path has no parent directory"))?;
        std::fs::create_dir_all(parent)?;
        let conn = Connection::open(&path)?;
        conn.pragma_update(None, "journal_mode", "WAL")?;
        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
        })
    }

    /// Open the database at `MAIRIS_DB_PATH`, or in the platform data directory.
    pub fn open_default() -> Result<Self> {
        if let Ok(path) = std::env::var("MAIRIS_DB_PATH") {
            return Self::open(PathBuf::from(path));
        }
        let dirs = directories::ProjectDirs::from("", "", "mairis-prime")
            .ok_or_else(|| anyhow::anyhow!("Could not determine data directory"))?;
        let db_path = dirs.data_dir().join("mairis.db");
        Self::open(db_path)
    }

    pub fn open_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
        })
    }

    pub fn migrate(&self) -> Result<()> {
        let conn = self.conn.lock().expect("database lock poisoned");
        schema::run_migrations(&conn)
    }

    // ============================================================
    // Document operations
    // ============================================================

    pub fn get_document(&self, key: &str) -> Result<Option<String>> {
        let conn = self.conn.lock().expect("database lock poisoned");
        let body = conn
            .query_row("SELECT body FROM documents WHERE key = ?", [key], |row| {
                row.get(0)
            })
            .optional()?;
        Ok(body)
    }

    pub fn put_document(&self, key: &str, body: &str) -> Result<()> {
        let conn = self.conn.lock().expect("database lock poisoned");
        conn.execute(
            "INSERT INTO documents (key, body, updated_at) VALUES (?, ?, ?)
             ON CONFLICT(key) DO UPDATE SET body = excluded.body, updated_at = excluded.updated_at",
            (key, body, Utc::now().to_rfc3339()),
        )?;
        Ok(())
    }

    pub fn delete_document(&self, key: &str) -> Result<bool> {
        let conn = self.conn.lock().expect("database lock poisoned");
        let rows = conn.execute("DELETE FROM documents WHERE key = ?", [key])?;
        Ok(rows > 0)
    }

    /// Drop whatever is stored under `key` and write `body` in its place,
    /// atomically.
    pub fn replace_document(&self, key: &str, body: &str) -> Result<()> {
        let mut conn = self.conn.lock().expect("database lock poisoned");
        let tx = conn.transaction()?;
        tx.execute("DELETE FROM documents WHERE key = ?", [key])?;
        tx.execute(
            "INSERT INTO documents (key, body, updated_at) VALUES (?, ?, ?)",
            (key, body, Utc::now().to_rfc3339()),
        )?;
        tx.commit()?;
        Ok(())
    }
}
