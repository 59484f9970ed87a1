pub mod schema;
pub mod prefs_repo;
