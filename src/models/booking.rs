use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use serde::{Deserialize, Serialize};

use crate::models::AdditionalService;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Booking {
    pub id: String,
    pub user_id: String,
    pub venue_id: String,
    pub court_id: String,
    pub date: NaiveDate,
    pub start_time: NaiveTime,
    pub end_time: NaiveTime,
    pub total_price: f64,
    pub status: BookingStatus,
    pub services: Vec<AdditionalService>,
    pub notes: Option<String>,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum BookingStatus {
    Pending,
    Confirmed,
    Cancelled,
    Completed,
    NoShow,
    Refunded,
    Expired,
    Rescheduled,
}

impl BookingStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            BookingStatus::Pending => "pending",
            BookingStatus::Confirmed => "confirmed",
            BookingStatus::Cancelled => "cancelled",
            BookingStatus::Completed => "completed",
            BookingStatus::NoShow => "no_show",
            BookingStatus::Refunded => "refunded",
            BookingStatus::Expired => "expired",
            BookingStatus::Rescheduled => "rescheduled",
        }
    }

    pub fn parse(s: &str) -> Self {
        match s {
            "confirmed" => BookingStatus::Confirmed,
            "cancelled" => BookingStatus::Cancelled,
            "completed" => BookingStatus::Completed,
            "no_show" => BookingStatus::NoShow,
            "refunded" => BookingStatus::Refunded,
            "expired" => BookingStatus::Expired,
            "rescheduled" => BookingStatus::Rescheduled,
            _ => BookingStatus::Pending,
        }
    }

    /// Whether a booking in this status still occupies its time slot.
    pub fn blocks_slot(&self) -> bool {
        !matches!(
            self,
            BookingStatus::Cancelled | BookingStatus::Refunded | BookingStatus::Expired
        )
    }

    /// Terminal statuses admit no further transitions.
    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            BookingStatus::Cancelled
                | BookingStatus::Completed
                | BookingStatus::NoShow
                | BookingStatus::Refunded
                | BookingStatus::Expired
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_round_trip() {
        for status in [
            BookingStatus::Pending,
            BookingStatus::Confirmed,
            BookingStatus::Cancelled,
            BookingStatus::Completed,
            BookingStatus::NoShow,
            BookingStatus::Refunded,
            BookingStatus::Expired,
            BookingStatus::Rescheduled,
        ] {
            assert_eq!(BookingStatus::parse(status.as_str()), status);
        }
    }

    #[test]
    fn test_unknown_status_defaults_to_pending() {
        assert_eq!(BookingStatus::parse("bogus"), BookingStatus::Pending);
    }

    #[test]
    fn test_released_statuses_do_not_block() {
        assert!(!BookingStatus::Cancelled.blocks_slot());
        assert!(!BookingStatus::Refunded.blocks_slot());
        assert!(!BookingStatus::Expired.blocks_slot());
        assert!(BookingStatus::Pending.blocks_slot());
        assert!(BookingStatus::Confirmed.blocks_slot());
        assert!(BookingStatus::Rescheduled.blocks_slot());
    }
}
