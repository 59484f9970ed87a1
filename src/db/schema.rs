use rusqlite::Connection;

use crate::error::TmResult;

/// Initialize the preferences schema. Creates tables if they don't exist.
pub fn initialize(conn: &Connection) -> TmResult<()> {
    conn.execute_batch(
        "
        CREATE TABLE IF NOT EXISTS preferences (
            key TEXT PRIMARY KEY NOT NULL,
            value TEXT NOT NULL,
            updated_at TEXT NOT NULL DEFAULT (datetime('now'))
        );
        ",
    )?;
    Ok(())
}

/// Create an in-memory connection for testing. Available in test builds.
pub fn test_connection() -> Connection {
    let conn = Connection::open_in_memory().unwrap();
    initialize(&conn).unwrap();
    conn
}
