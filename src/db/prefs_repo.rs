use rusqlite::{params, Connection};

use crate::error::TmResult;
use crate::model::Session;

pub const AUTH_TOKEN_KEY: &str = "auth_token";
pub const USER_ID_KEY: &str = "user_id";

pub fn get(conn: &Connection, key: &str) -> TmResult<Option<String>> {
    let mut stmt = conn.prepare("SELECT value FROM preferences WHERE key = ?1")?;

    match stmt.query_row(params![key], |row| row.get::<_, String>(0)) {
        Ok(value) => Ok(Some(value)),
        Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
        Err(e) => Err(e.into()),
    }
}

pub fn set(conn: &Connection, key: &str, value: &str) -> TmResult<()> {
    conn.execute(
        "INSERT INTO preferences (key, value, updated_at) VALUES (?1, ?2, datetime('now'))
         ON CONFLICT(key) DO UPDATE SET value = excluded.value, updated_at = excluded.updated_at",
        params![key, value],
    )?;
    Ok(())
}

pub fn remove(conn: &Connection, key: &str) -> TmResult<()> {
    conn.execute("DELETE FROM preferences WHERE key = ?1", params![key])?;
    Ok(())
}

/// Load the persisted viewer. Returns None unless both the user id and token
/// are stored and non-blank.
pub fn load_session(conn: &Connection) -> TmResult<Option<Session>> {
    let user_id = get(conn, USER_ID_KEY)?;
    let token = get(conn, AUTH_TOKEN_KEY)?;

    match (user_id, token) {
        (Some(user_id), Some(token)) => {
            let session = Session::new(&user_id, &token);
            Ok(Some(session).filter(|s| s.is_authenticated()))
        }
        _ => Ok(None),
    }
}

pub fn save_session(conn: &Connection, session: &Session) -> TmResult<()> {
    set(conn, USER_ID_KEY, session.user_id.as_str())?;
    match &session.token {
        Some(token) => set(conn, AUTH_TOKEN_KEY, token),
        None => remove(conn, AUTH_TOKEN_KEY),
    }
}

pub fn clear_session(conn: &Connection) -> TmResult<()> {
    remove(conn, USER_ID_KEY)?;
    remove(conn, AUTH_TOKEN_KEY)
}
