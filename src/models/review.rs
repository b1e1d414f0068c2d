use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Review {
    pub id: String,
    pub venue_id: String,
    pub user_id: String,
    pub rating: i32,
    pub comment: Option<String>,
    pub hidden: bool,
    pub created_at: NaiveDateTime,
}
