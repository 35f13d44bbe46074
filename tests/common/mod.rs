#![allow(dead_code)]

use catalog_db::prelude::*;
use tempfile::TempDir;

pub const SCHEMA: &str = "
CREATE TABLE users (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    name TEXT NOT NULL,
    email TEXT,
    active INTEGER NOT NULL DEFAULT 1,
    created_at TEXT
);
CREATE TABLE disciplines (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    name TEXT NOT NULL,
    workload INTEGER
);
CREATE TABLE modules (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    discipline_id INTEGER REFERENCES disciplines(id),
    title TEXT NOT NULL
);
CREATE TABLE sections (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    module_id INTEGER REFERENCES modules(id),
    name TEXT NOT NULL
);
CREATE TABLE advisors (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    user_id INTEGER REFERENCES users(id),
    room TEXT
);
CREATE TABLE students (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    user_id INTEGER REFERENCES users(id),
    advisor_id INTEGER REFERENCES advisors(id)
);
CREATE TABLE classes (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    discipline_id INTEGER REFERENCES disciplines(id),
    student_id INTEGER REFERENCES students(id)
);
";

/// Print statement logs when `CATALOG_DB_TRACE` is set.
pub fn init_tracing() {
    if std::env::var_os("CATALOG_DB_TRACE").is_some() {
        let _ = tracing_subscriber::fmt()
            .with_max_level(tracing::Level::DEBUG)
            .with_test_writer()
            .try_init();
    }
}

/// A fresh catalog database in its own temp directory.
///
/// Keep the returned `TempDir` alive for as long as the pool is used.
pub async fn catalog_pool() -> Result<(TempDir, ConfigAndPool), Box<dyn std::error::Error>> {
    init_tracing();
    let dir = tempfile::tempdir()?;
    let path = dir.path().join("catalog.db");
    let pool = ConfigAndPool::sqlite_builder(path.to_string_lossy().into_owned())
        .pool_size(4)
        .build()
        .await?;
    let mut conn = pool.get_connection().await?;
    conn.execute_batch(SCHEMA).await?;
    Ok((dir, pool))
}

pub fn user(name: &str) -> Record {
    Record::new()
        .with("name", name)
        .with("email", format!("{}@example.com", name.to_lowercase()))
}

pub fn text<'a>(row: &'a DbRow, column: &str) -> Option<&'a str> {
    row.get(column).and_then(RowValues::as_text)
}

pub fn int(row: &DbRow, column: &str) -> Option<i64> {
    row.get(column).and_then(RowValues::as_int).copied()
}
