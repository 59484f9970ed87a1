use travelmate::db::*;
use travelmate::model::*;

// ==========================================================================
// PREFERENCES TESTS
// ==========================================================================

#[test]
fn get_missing_key_returns_none() {
    let conn = schema::test_connection();
    assert_eq!(prefs_repo::get(&conn, "nope").unwrap(), None);
}

#[test]
fn set_then_get() {
    let conn = schema::test_connection();
    prefs_repo::set(&conn, "theme", "dark").unwrap();
    assert_eq!(prefs_repo::get(&conn, "theme").unwrap(), Some("dark".into()));
}

#[test]
fn set_overwrites_existing_value() {
    let conn = schema::test_connection();
    prefs_repo::set(&conn, "theme", "dark").unwrap();
    prefs_repo::set(&conn, "theme", "light").unwrap();
    assert_eq!(prefs_repo::get(&conn, "theme").unwrap(), Some("light".into()));
}

#[test]
fn remove_deletes_key() {
    let conn = schema::test_connection();
    prefs_repo::set(&conn, "theme", "dark").unwrap();
    prefs_repo::remove(&conn, "theme").unwrap();
    assert_eq!(prefs_repo::get(&conn, "theme").unwrap(), None);
}

#[test]
fn initialize_is_idempotent() {
    let conn = schema::test_connection();
    prefs_repo::set(&conn, "theme", "dark").unwrap();
    schema::initialize(&conn).unwrap();
    assert_eq!(prefs_repo::get(&conn, "theme").unwrap(), Some("dark".into()));
}

// ==========================================================================
// SESSION TESTS
// ==========================================================================

#[test]
fn no_session_when_nothing_saved() {
    let conn = schema::test_connection();
    assert!(prefs_repo::load_session(&conn).unwrap().is_none());
}

#[test]
fn session_survives_save_and_load() {
    let conn = schema::test_connection();
    let session = Session::new("65f0a1b2c3d4e5f6a7b8c9d0", "secret-token");
    prefs_repo::save_session(&conn, &session).unwrap();

    let loaded = prefs_repo::load_session(&conn).unwrap().unwrap();
    assert_eq!(loaded.user_id, session.user_id);
    assert_eq!(loaded.token.as_deref(), Some("secret-token"));
}

#[test]
fn session_without_token_is_not_loaded() {
    let conn = schema::test_connection();
    prefs_repo::set(&conn, prefs_repo::USER_ID_KEY, "u1").unwrap();
    assert!(prefs_repo::load_session(&conn).unwrap().is_none());
}

#[test]
fn clear_session_forgets_credentials() {
    let conn = schema::test_connection();
    prefs_repo::save_session(&conn, &Session::new("u1", "t")).unwrap();
    prefs_repo::clear_session(&conn).unwrap();
    assert!(prefs_repo::load_session(&conn).unwrap().is_none());
    assert_eq!(prefs_repo::get(&conn, prefs_repo::AUTH_TOKEN_KEY).unwrap(), None);
}
