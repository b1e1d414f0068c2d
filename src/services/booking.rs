use chrono::NaiveDateTime;
use rusqlite::Connection;
use uuid::Uuid;

use crate::db::queries;
use crate::models::{Booking, BookingStatus};
use crate::services::pricing::total_price;
use crate::services::scheduling::{duration_minutes, is_booking_conflict};
use crate::services::validation::{validate_booking_request, BookingRequest};

#[derive(Debug)]
pub enum BookingError {
    Invalid(Vec<String>),
    Conflict,
    VenueNotFound(String),
    CourtNotFound(String),
    VenueNotBookable(String),
    Database(anyhow::Error),
}

impl std::fmt::Display for BookingError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            BookingError::Invalid(errors) => {
                write!(f, "invalid booking request: {}", errors.join("; "))
            }
            BookingError::Conflict => {
                write!(f, "that time slot is already booked")
            }
            BookingError::VenueNotFound(id) => write!(f, "venue not found: {id}"),
            BookingError::CourtNotFound(id) => write!(f, "court not found: {id}"),
            BookingError::VenueNotBookable(msg) => write!(f, "{msg}"),
            BookingError::Database(e) => write!(f, "database error: {e}"),
        }
    }
}

/// Validates, prices, and persists a booking request.
///
/// The conflict re-check and the insert run inside one transaction while the
/// caller holds the connection, so two racing submissions for the same slot
/// cannot both commit; the partial unique index on
/// `(court_id, date, start_time)` backs the same guarantee at the schema
/// level.
pub fn create_booking(
    conn: &mut Connection,
    req: &BookingRequest,
    now: NaiveDateTime,
) -> Result<Booking, BookingError> {
    let validation = validate_booking_request(req, now);
    if !validation.is_valid {
        return Err(BookingError::Invalid(validation.errors));
    }

    // Validation guarantees presence and parseability of all of these.
    let (Some(venue_id), Some(court_id), Some(user_id)) = (
        req.venue_id.as_deref(),
        req.court_id.as_deref(),
        req.user_id.as_deref(),
    ) else {
        return Err(BookingError::Invalid(vec!["missing identifiers".to_string()]));
    };
    let (Some(date), Some(start), Some(end)) =
        (req.parse_date(), req.parse_start(), req.parse_end())
    else {
        return Err(BookingError::Invalid(vec![
            "missing booking time".to_string()
        ]));
    };

    let venue = queries::get_venue_by_id(conn, venue_id)
        .map_err(BookingError::Database)?
        .ok_or_else(|| BookingError::VenueNotFound(venue_id.to_string()))?;
    if !venue.approved {
        return Err(BookingError::VenueNotBookable(
            "venue is not accepting bookings".to_string(),
        ));
    }

    let court = queries::get_court_by_id(conn, court_id)
        .map_err(BookingError::Database)?
        .filter(|c| c.venue_id == venue.id)
        .ok_or_else(|| BookingError::CourtNotFound(court_id.to_string()))?;
    if !court.active {
        return Err(BookingError::VenueNotBookable(
            "court is not open for booking".to_string(),
        ));
    }

    if start < venue.hours.open || end > venue.hours.close {
        return Err(BookingError::VenueNotBookable(format!(
            "requested time is outside operating hours ({})",
            venue.hours.to_human_readable()
        )));
    }

    let rate = court.price_per_hour.unwrap_or(venue.base_price_per_hour);
    let duration = duration_minutes(start, end);
    let price = total_price(rate, duration, &req.services);

    let tx = conn
        .transaction()
        .map_err(|e| BookingError::Database(e.into()))?;

    let existing =
        queries::get_blocking_bookings(&tx, court_id, date).map_err(BookingError::Database)?;
    if is_booking_conflict(date, start, end, &existing) {
        return Err(BookingError::Conflict);
    }

    let booking = Booking {
        id: Uuid::new_v4().to_string(),
        user_id: user_id.to_string(),
        venue_id: venue.id.clone(),
        court_id: court.id.clone(),
        date,
        start_time: start,
        end_time: end,
        total_price: price,
        status: BookingStatus::Pending,
        services: req.services.clone(),
        notes: req.notes.clone(),
        created_at: now,
        updated_at: now,
    };

    if let Err(e) = queries::create_booking(&tx, &booking) {
        // A constraint failure here means another writer took the slot
        // between snapshot and insert.
        return Err(match e.downcast_ref::<rusqlite::Error>() {
            Some(rusqlite::Error::SqliteFailure(f, _))
                if f.code == rusqlite::ErrorCode::ConstraintViolation =>
            {
                BookingError::Conflict
            }
            _ => BookingError::Database(e),
        });
    }

    tx.commit().map_err(|e| BookingError::Database(e.into()))?;

    tracing::info!(
        booking_id = %booking.id,
        court_id = %booking.court_id,
        date = %booking.date,
        "booking created"
    );

    Ok(booking)
}
