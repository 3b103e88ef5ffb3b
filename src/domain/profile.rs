use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct UserProfile {
    pub username: String,
    pub name: String,
    pub bio: String,
    pub followers: u64,
    pub following: u64,
    pub posts: u64,
    pub avatar: String,
    /// Ordered; duplicates are allowed.
    pub skills: Vec<String>,
}

impl Default for UserProfile {
    fn default() -> Self {
        Self {
            username: "you".to_string(),
            name: "New Creator".to_string(),
            bio: "Sharing what I learn".to_string(),
            followers: 0,
            following: 0,
            posts: 0,
            avatar: String::new(),
            skills: vec![
                "Cooking".to_string(),
                "Guitar".to_string(),
                "Yoga".to_string(),
                "Coding".to_string(),
                "Painting".to_string(),
                "Photography".to_string(),
            ],
        }
    }
}
