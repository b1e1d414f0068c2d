use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use serde::Deserialize;

use crate::models::AdditionalService;

/// Incoming booking payload, as posted by a client. Everything is optional
/// at the wire boundary; the validator reports every missing or malformed
/// field in one pass.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct BookingRequest {
    pub venue_id: Option<String>,
    pub court_id: Option<String>,
    pub user_id: Option<String>,
    pub date: Option<String>,
    pub start_time: Option<String>,
    pub end_time: Option<String>,
    #[serde(default)]
    pub services: Vec<AdditionalService>,
    pub notes: Option<String>,
}

impl BookingRequest {
    pub fn parse_date(&self) -> Option<NaiveDate> {
        let raw = self.date.as_deref()?;
        NaiveDate::parse_from_str(raw, "%Y-%m-%d").ok()
    }

    pub fn parse_start(&self) -> Option<NaiveTime> {
        parse_time(self.start_time.as_deref()?)
    }

    pub fn parse_end(&self) -> Option<NaiveTime> {
        parse_time(self.end_time.as_deref()?)
    }
}

fn parse_time(raw: &str) -> Option<NaiveTime> {
    NaiveTime::parse_from_str(raw, "%H:%M").ok()
}

#[derive(Debug, Clone)]
pub struct Validation {
    pub is_valid: bool,
    pub errors: Vec<String>,
}

/// Checks a booking request for completeness and temporal sanity.
///
/// All violated rules are accumulated rather than failing on the first, so
/// the caller can show the requester the full list at once. `now` is the
/// instant the request is being judged against.
pub fn validate_booking_request(req: &BookingRequest, now: NaiveDateTime) -> Validation {
    let mut errors = Vec::new();

    check_present(&mut errors, &req.venue_id, "venue_id");
    check_present(&mut errors, &req.court_id, "court_id");
    check_present(&mut errors, &req.user_id, "user_id");
    check_present(&mut errors, &req.date, "date");
    check_present(&mut errors, &req.start_time, "start_time");
    check_present(&mut errors, &req.end_time, "end_time");

    let date = match (&req.date, req.parse_date()) {
        (Some(raw), None) if !raw.trim().is_empty() => {
            errors.push(format!("invalid date: {raw} (expected YYYY-MM-DD)"));
            None
        }
        (_, parsed) => parsed,
    };
    let start = check_time(&mut errors, &req.start_time, req.parse_start(), "start_time");
    let end = check_time(&mut errors, &req.end_time, req.parse_end(), "end_time");

    if let (Some(date), Some(start), Some(end)) = (date, start, end) {
        if end <= start {
            errors.push("end_time must be after start_time".to_string());
        }
        if date.and_time(start) < now {
            errors.push("booking time cannot be in the past".to_string());
        }
    }

    Validation {
        is_valid: errors.is_empty(),
        errors,
    }
}

fn check_present(errors: &mut Vec<String>, field: &Option<String>, name: &str) {
    let missing = field.as_deref().map(str::trim).unwrap_or("").is_empty();
    if missing {
        errors.push(format!("{name} is required"));
    }
}

fn check_time(
    errors: &mut Vec<String>,
    raw: &Option<String>,
    parsed: Option<NaiveTime>,
    name: &str,
) -> Option<NaiveTime> {
    if let (Some(raw), None) = (raw.as_deref().map(str::trim).filter(|s| !s.is_empty()), parsed) {
        errors.push(format!("invalid {name}: {raw} (expected HH:MM)"));
    }
    parsed
}
