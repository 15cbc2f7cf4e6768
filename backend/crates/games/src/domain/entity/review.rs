//! Review Entity

use chrono::{DateTime, Utc};
use kernel::id::UserId;

/// A review of a game, joined with the reviewer's name
#[derive(Debug, Clone)]
pub struct Review {
    pub reviewer_id: UserId,
    pub reviewer_first_name: String,
    pub reviewer_last_name: String,
    /// 1 to 10 inclusive
    pub rating: i32,
    pub review: Option<String>,
    pub timestamp: DateTime<Utc>,
}
