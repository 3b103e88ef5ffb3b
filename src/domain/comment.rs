use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CommentItem {
    pub id: String,
    pub text: String,
    pub created_at: DateTime<Utc>,
}

impl CommentItem {
    /// Build a comment from raw input. Returns `None` when the input is blank.
    pub fn from_input(input: &str) -> Option<Self> {
        let text = input.trim();
        if text.is_empty() {
            return None;
        }

        Some(Self {
            id: Uuid::new_v4().to_string(),
            text: text.to_string(),
            created_at: Utc::now(),
        })
    }
}
