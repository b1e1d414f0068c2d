use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Court {
    pub id: String,
    pub venue_id: String,
    pub name: String,
    pub sport: String,
    /// Overrides the venue base rate when set.
    pub price_per_hour: Option<f64>,
    pub active: bool,
    pub created_at: NaiveDateTime,
}
