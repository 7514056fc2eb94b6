use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One recorded assistant session.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SessionRecord {
    pub timestamp: DateTime<Utc>,
    pub summary: String,
}

/// Per-user profile persisted as a flat JSON file.
///
/// The fields are opaque labels as far as the core is concerned; the only
/// contract is that a profile round-trips through write-then-read unchanged.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct UserProfile {
    pub user_id: String,
    pub created_at: DateTime<Utc>,
    pub trading_experience: String,
    pub risk_tolerance: String,
    pub recurring_patterns: Vec<String>,
    pub sessions: Vec<SessionRecord>,
}

impl UserProfile {
    pub fn new(user_id: impl Into<String>) -> Self {
        Self {
            user_id: user_id.into(),
            created_at: Utc::now(),
            trading_experience: "unknown".to_string(),
            risk_tolerance: "medium".to_string(),
            recurring_patterns: Vec::new(),
            sessions: Vec::new(),
        }
    }

    pub fn record_session(&mut self, summary: impl Into<String>) {
        self.sessions.push(SessionRecord {
            timestamp: Utc::now(),
            summary: summary.into(),
        });
    }
}
