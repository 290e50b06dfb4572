use iso8601_timestamp::Timestamp;
use serde::{Deserialize, Serialize};

/// Authenticated session record owned by the user service
///
/// `state` is empty while no CSRF challenge is outstanding; otherwise it
/// holds the raw form of the most recently issued challenge. Only the newest
/// one is ever valid.
#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct Session {
    pub id: u32,
    pub uuid: String,
    pub user_name: String,
    pub user_id: u32,
    #[serde(default)]
    pub state: String,
    pub created_at: Timestamp,
}

/// Long-lived anonymous visit record owned by the user service
#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct Visit {
    pub id: u32,
    pub uuid: String,
    #[serde(default)]
    pub state: String,
    pub created_at: Timestamp,
}

impl Session {
    /// Whether a CSRF challenge is outstanding for this session
    #[must_use]
    pub fn is_challenged(&self) -> bool {
        !self.state.is_empty()
    }
}

impl Visit {
    /// Whether a CSRF challenge is outstanding for this visit
    #[must_use]
    pub fn is_challenged(&self) -> bool {
        !self.state.is_empty()
    }
}
