use thiserror::Error;

#[derive(Debug, Error)]
pub enum TmError {
    #[error("{field} cannot be blank")]
    BlankField { field: String },

    #[error("Network error: {0}")]
    Network(String),

    #[error("Request failed (HTTP {status}): {message}")]
    Http { status: u16, message: String },

    /// The backend refused a join because the viewer is already a member.
    #[error("Already a member of group {group_id}: {message}")]
    AlreadyMember { group_id: String, message: String },

    #[error("Unexpected response: {0}")]
    Decode(String),

    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl TmError {
    /// True for the "already a member" join conflict, which heals local state.
    pub fn is_conflict(&self) -> bool {
        matches!(self, TmError::AlreadyMember { .. })
    }

    /// HTTP status carried by the error, if it came from a response.
    pub fn status(&self) -> Option<u16> {
        match self {
            TmError::Http { status, .. } => Some(*status),
            _ => None,
        }
    }
}

pub type TmResult<T> = Result<T, TmError>;
