use chrono::{NaiveDateTime, NaiveTime};
use serde::{Deserialize, Serialize};

/// Daily wall-clock window during which a venue accepts bookings.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct OperatingHours {
    pub open: NaiveTime,
    pub close: NaiveTime,
}

impl OperatingHours {
    pub fn new(open: NaiveTime, close: NaiveTime) -> anyhow::Result<Self> {
        anyhow::ensure!(open < close, "opening time must be before closing time");
        Ok(Self { open, close })
    }

    pub fn parse(open: &str, close: &str) -> anyhow::Result<Self> {
        let open = NaiveTime::parse_from_str(open, "%H:%M")
            .map_err(|_| anyhow::anyhow!("invalid opening time: {open}"))?;
        let close = NaiveTime::parse_from_str(close, "%H:%M")
            .map_err(|_| anyhow::anyhow!("invalid closing time: {close}"))?;
        Self::new(open, close)
    }

    pub fn to_human_readable(&self) -> String {
        format!(
            "{}-{}",
            self.open.format("%H:%M"),
            self.close.format("%H:%M")
        )
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Venue {
    pub id: String,
    pub owner_id: String,
    pub name: String,
    pub address: String,
    pub sport: String,
    pub description: Option<String>,
    pub base_price_per_hour: f64,
    pub hours: OperatingHours,
    pub approved: bool,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}
