use serde::{Deserialize, Serialize};

use super::ids::Id;

/// Marker type for user identifiers.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User;

/// The viewer on whose behalf requests are made.
#[derive(Debug, Clone)]
pub struct Session {
    pub user_id: Id<User>,
    pub token: Option<String>,
}

impl Session {
    pub fn new(user_id: &str, token: &str) -> Self {
        Self {
            user_id: Id::new(user_id),
            token: Some(token.trim().to_string()).filter(|t| !t.is_empty()),
        }
    }

    pub fn anonymous() -> Self {
        Self {
            user_id: Id::empty(),
            token: None,
        }
    }

    pub fn is_authenticated(&self) -> bool {
        !self.user_id.is_empty() && self.token.is_some()
    }
}
