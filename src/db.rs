use eyre::Result;
use rusqlite::{params, Connection};

use crate::models::UserKey;

const INIT_SQL: &str = r#"
CREATE TABLE IF NOT EXISTS user_keys (
  id         INTEGER PRIMARY KEY AUTOINCREMENT,
  user_id    TEXT NOT NULL,
  public_key TEXT NOT NULL,
  created_at TEXT NOT NULL DEFAULT (datetime('now'))
);
"#;

/// Connect to SQLite (with WAL mode for performance)
pub fn connect(path: &str) -> Result<Connection> {
    let conn = Connection::open(path)?;
    conn.pragma_update(None, "journal_mode", "WAL")?;
    Ok(conn)
}

/// Run schema migrations
pub fn run_migrations(conn: &Connection) -> Result<()> {
    conn.execute_batch(INIT_SQL)?;
    Ok(())
}

/// Register a wallet for a user. No uniqueness constraint: the same key may
/// appear under several users, or several times under one.
pub fn add_user_key(conn: &Connection, user_id: &str, public_key: &str) -> Result<()> {
    conn.execute(
        "INSERT INTO user_keys (user_id, public_key) VALUES (?1, ?2)",
        params![user_id, public_key],
    )?;
    Ok(())
}

/// Load every (user_id, public_key) pair on file
pub fn list_user_keys(conn: &Connection) -> Result<Vec<UserKey>> {
    let mut stmt = conn.prepare("SELECT user_id, public_key FROM user_keys ORDER BY id")?;

    let rows = stmt.query_map([], |r| {
        Ok(UserKey {
            user_id: r.get(0)?,
            public_key: r.get(1)?,
        })
    })?;

    let mut keys = Vec::new();
    for row in rows {
        keys.push(row?);
    }
    Ok(keys)
}
