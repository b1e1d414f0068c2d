use anyhow::Context;
use chrono::{NaiveDate, NaiveDateTime, NaiveTime, Utc};
use rusqlite::{params, Connection};

use crate::models::{
    Booking, BookingStatus, Court, OperatingHours, Report, ReportStatus, ReportSubject, Review,
    Venue,
};

// ── Venues ──

pub fn create_venue(conn: &Connection, venue: &Venue) -> anyhow::Result<()> {
    conn.execute(
        "INSERT INTO venues (id, owner_id, name, address, sport, description, base_price_per_hour, open_time, close_time, approved, created_at, updated_at)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12)",
        params![
            venue.id,
            venue.owner_id,
            venue.name,
            venue.address,
            venue.sport,
            venue.description,
            venue.base_price_per_hour,
            venue.hours.open.format("%H:%M").to_string(),
            venue.hours.close.format("%H:%M").to_string(),
            venue.approved as i32,
            venue.created_at.format("%Y-%m-%d %H:%M:%S").to_string(),
            venue.updated_at.format("%Y-%m-%d %H:%M:%S").to_string(),
        ],
    )?;
    Ok(())
}

pub fn get_venue_by_id(conn: &Connection, id: &str) -> anyhow::Result<Option<Venue>> {
    let result = conn.query_row(
        "SELECT id, owner_id, name, address, sport, description, base_price_per_hour, open_time, close_time, approved, created_at, updated_at
         FROM venues WHERE id = ?1",
        params![id],
        |row| Ok(parse_venue_row(row)),
    );

    match result {
        Ok(venue) => Ok(Some(venue?)),
        Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
        Err(e) => Err(e.into()),
    }
}

pub fn list_venues(
    conn: &Connection,
    sport: Option<&str>,
    limit: i64,
) -> anyhow::Result<Vec<Venue>> {
    let (sql, params_vec): (String, Vec<Box<dyn rusqlite::types::ToSql>>) = match sport {
        Some(sport) => (
            "SELECT id, owner_id, name, address, sport, description, base_price_per_hour, open_time, close_time, approved, created_at, updated_at
             FROM venues WHERE approved = 1 AND sport = ?1 ORDER BY name ASC LIMIT ?2"
                .to_string(),
            vec![
                Box::new(sport.to_string()) as Box<dyn rusqlite::types::ToSql>,
                Box::new(limit),
            ],
        ),
        None => (
            "SELECT id, owner_id, name, address, sport, description, base_price_per_hour, open_time, close_time, approved, created_at, updated_at
             FROM venues WHERE approved = 1 ORDER BY name ASC LIMIT ?1"
                .to_string(),
            vec![Box::new(limit) as Box<dyn rusqlite::types::ToSql>],
        ),
    };

    let mut stmt = conn.prepare(&sql)?;
    let params_refs: Vec<&dyn rusqlite::types::ToSql> =
        params_vec.iter().map(|p| p.as_ref()).collect();
    let rows = stmt.query_map(params_refs.as_slice(), |row| Ok(parse_venue_row(row)))?;

    let mut venues = vec![];
    for row in rows {
        venues.push(row??);
    }
    Ok(venues)
}

pub fn update_venue(conn: &Connection, venue: &Venue) -> anyhow::Result<bool> {
    let now = Utc::now().naive_utc().format("%Y-%m-%d %H:%M:%S").to_string();
    let count = conn.execute(
        "UPDATE venues SET name = ?1, address = ?2, sport = ?3, description = ?4,
            base_price_per_hour = ?5, open_time = ?6, close_time = ?7, updated_at = ?8
         WHERE id = ?9",
        params![
            venue.name,
            venue.address,
            venue.sport,
            venue.description,
            venue.base_price_per_hour,
            venue.hours.open.format("%H:%M").to_string(),
            venue.hours.close.format("%H:%M").to_string(),
            now,
            venue.id,
        ],
    )?;
    Ok(count > 0)
}

pub fn set_venue_approved(conn: &Connection, id: &str, approved: bool) -> anyhow::Result<bool> {
    let now = Utc::now().naive_utc().format("%Y-%m-%d %H:%M:%S").to_string();
    let count = conn.execute(
        "UPDATE venues SET approved = ?1, updated_at = ?2 WHERE id = ?3",
        params![approved as i32, now, id],
    )?;
    Ok(count > 0)
}

fn parse_venue_row(row: &rusqlite::Row) -> anyhow::Result<Venue> {
    let id: String = row.get(0)?;
    let owner_id: String = row.get(1)?;
    let name: String = row.get(2)?;
    let address: String = row.get(3)?;
    let sport: String = row.get(4)?;
    let description: Option<String> = row.get(5)?;
    let base_price_per_hour: f64 = row.get(6)?;
    let open_str: String = row.get(7)?;
    let close_str: String = row.get(8)?;
    let approved: bool = row.get::<_, i32>(9)? != 0;
    let created_at_str: String = row.get(10)?;
    let updated_at_str: String = row.get(11)?;

    let open = NaiveTime::parse_from_str(&open_str, "%H:%M")
        .with_context(|| format!("bad open_time for venue {id}: {open_str}"))?;
    let close = NaiveTime::parse_from_str(&close_str, "%H:%M")
        .with_context(|| format!("bad close_time for venue {id}: {close_str}"))?;

    Ok(Venue {
        id,
        owner_id,
        name,
        address,
        sport,
        description,
        base_price_per_hour,
        hours: OperatingHours { open, close },
        approved,
        created_at: parse_timestamp(&created_at_str),
        updated_at: parse_timestamp(&updated_at_str),
    })
}

// ── Courts ──

pub fn create_court(conn: &Connection, court: &Court) -> anyhow::Result<()> {
    conn.execute(
        "INSERT INTO courts (id, venue_id, name, sport, price_per_hour, active, created_at)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
        params![
            court.id,
            court.venue_id,
            court.name,
            court.sport,
            court.price_per_hour,
            court.active as i32,
            court.created_at.format("%Y-%m-%d %H:%M:%S").to_string(),
        ],
    )?;
    Ok(())
}

pub fn get_court_by_id(conn: &Connection, id: &str) -> anyhow::Result<Option<Court>> {
    let result = conn.query_row(
        "SELECT id, venue_id, name, sport, price_per_hour, active, created_at
         FROM courts WHERE id = ?1",
        params![id],
        |row| Ok(parse_court_row(row)),
    );

    match result {
        Ok(court) => Ok(Some(court?)),
        Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
        Err(e) => Err(e.into()),
    }
}

pub fn list_courts(conn: &Connection, venue_id: &str) -> anyhow::Result<Vec<Court>> {
    let mut stmt = conn.prepare(
        "SELECT id, venue_id, name, sport, price_per_hour, active, created_at
         FROM courts WHERE venue_id = ?1 AND active = 1 ORDER BY name ASC",
    )?;

    let rows = stmt.query_map(params![venue_id], |row| Ok(parse_court_row(row)))?;

    let mut courts = vec![];
    for row in rows {
        courts.push(row??);
    }
    Ok(courts)
}

fn parse_court_row(row: &rusqlite::Row) -> anyhow::Result<Court> {
    let created_at_str: String = row.get(6)?;
    Ok(Court {
        id: row.get(0)?,
        venue_id: row.get(1)?,
        name: row.get(2)?,
        sport: row.get(3)?,
        price_per_hour: row.get(4)?,
        active: row.get::<_, i32>(5)? != 0,
        created_at: parse_timestamp(&created_at_str),
    })
}

// ── Bookings ──

pub fn create_booking(conn: &Connection, booking: &Booking) -> anyhow::Result<()> {
    let services_json = serde_json::to_string(&booking.services)?;

    conn.execute(
        "INSERT INTO bookings (id, user_id, venue_id, court_id, date, start_time, end_time, total_price, status, services, notes, created_at, updated_at)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13)",
        params![
            booking.id,
            booking.user_id,
            booking.venue_id,
            booking.court_id,
            booking.date.format("%Y-%m-%d").to_string(),
            booking.start_time.format("%H:%M").to_string(),
            booking.end_time.format("%H:%M").to_string(),
            booking.total_price,
            booking.status.as_str(),
            services_json,
            booking.notes,
            booking.created_at.format("%Y-%m-%d %H:%M:%S").to_string(),
            booking.updated_at.format("%Y-%m-%d %H:%M:%S").to_string(),
        ],
    )?;
    Ok(())
}

/// Bookings that still occupy a slot on this court and date. The status
/// filter mirrors `BookingStatus::blocks_slot`.
pub fn get_blocking_bookings(
    conn: &Connection,
    court_id: &str,
    date: NaiveDate,
) -> anyhow::Result<Vec<Booking>> {
    let date_str = date.format("%Y-%m-%d").to_string();

    let mut stmt = conn.prepare(
        "SELECT id, user_id, venue_id, court_id, date, start_time, end_time, total_price, status, services, notes, created_at, updated_at
         FROM bookings
         WHERE court_id = ?1 AND date = ?2 AND status NOT IN ('cancelled', 'refunded', 'expired')
         ORDER BY start_time ASC",
    )?;

    let rows = stmt.query_map(params![court_id, date_str], |row| Ok(parse_booking_row(row)))?;

    let mut bookings = vec![];
    for row in rows {
        bookings.push(row??);
    }
    Ok(bookings)
}

pub fn get_bookings_for_user(conn: &Connection, user_id: &str) -> anyhow::Result<Vec<Booking>> {
    let mut stmt = conn.prepare(
        "SELECT id, user_id, venue_id, court_id, date, start_time, end_time, total_price, status, services, notes, created_at, updated_at
         FROM bookings WHERE user_id = ?1 ORDER BY date DESC, start_time DESC",
    )?;

    let rows = stmt.query_map(params![user_id], |row| Ok(parse_booking_row(row)))?;

    let mut bookings = vec![];
    for row in rows {
        bookings.push(row??);
    }
    Ok(bookings)
}

pub fn get_all_bookings(
    conn: &Connection,
    status_filter: Option<&str>,
    limit: i64,
) -> anyhow::Result<Vec<Booking>> {
    let (sql, params_vec): (String, Vec<Box<dyn rusqlite::types::ToSql>>) = match status_filter {
        Some(status) => (
            "SELECT id, user_id, venue_id, court_id, date, start_time, end_time, total_price, status, services, notes, created_at, updated_at \
             FROM bookings WHERE status = ?1 ORDER BY date DESC, start_time DESC LIMIT ?2"
                .to_string(),
            vec![
                Box::new(status.to_string()) as Box<dyn rusqlite::types::ToSql>,
                Box::new(limit),
            ],
        ),
        None => (
            "SELECT id, user_id, venue_id, court_id, date, start_time, end_time, total_price, status, services, notes, created_at, updated_at \
             FROM bookings ORDER BY date DESC, start_time DESC LIMIT ?1"
                .to_string(),
            vec![Box::new(limit) as Box<dyn rusqlite::types::ToSql>],
        ),
    };

    let mut stmt = conn.prepare(&sql)?;
    let params_refs: Vec<&dyn rusqlite::types::ToSql> =
        params_vec.iter().map(|p| p.as_ref()).collect();
    let rows = stmt.query_map(params_refs.as_slice(), |row| Ok(parse_booking_row(row)))?;

    let mut bookings = vec![];
    for row in rows {
        bookings.push(row??);
    }
    Ok(bookings)
}

pub fn get_booking_by_id(conn: &Connection, id: &str) -> anyhow::Result<Option<Booking>> {
    let result = conn.query_row(
        "SELECT id, user_id, venue_id, court_id, date, start_time, end_time, total_price, status, services, notes, created_at, updated_at
         FROM bookings WHERE id = ?1",
        params![id],
        |row| Ok(parse_booking_row(row)),
    );

    match result {
        Ok(booking) => Ok(Some(booking?)),
        Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
        Err(e) => Err(e.into()),
    }
}

pub fn update_booking_status(
    conn: &Connection,
    id: &str,
    status: &BookingStatus,
) -> anyhow::Result<bool> {
    let now = Utc::now().naive_utc().format("%Y-%m-%d %H:%M:%S").to_string();
    let count = conn.execute(
        "UPDATE bookings SET status = ?1, updated_at = ?2 WHERE id = ?3",
        params![status.as_str(), now, id],
    )?;
    Ok(count > 0)
}

fn parse_booking_row(row: &rusqlite::Row) -> anyhow::Result<Booking> {
    let id: String = row.get(0)?;
    let user_id: String = row.get(1)?;
    let venue_id: String = row.get(2)?;
    let court_id: String = row.get(3)?;
    let date_str: String = row.get(4)?;
    let start_str: String = row.get(5)?;
    let end_str: String = row.get(6)?;
    let total_price: f64 = row.get(7)?;
    let status_str: String = row.get(8)?;
    let services_json: String = row.get(9)?;
    let notes: Option<String> = row.get(10)?;
    let created_at_str: String = row.get(11)?;
    let updated_at_str: String = row.get(12)?;

    let date = NaiveDate::parse_from_str(&date_str, "%Y-%m-%d")
        .with_context(|| format!("bad date for booking {id}: {date_str}"))?;
    let start_time = NaiveTime::parse_from_str(&start_str, "%H:%M")
        .with_context(|| format!("bad start_time for booking {id}: {start_str}"))?;
    let end_time = NaiveTime::parse_from_str(&end_str, "%H:%M")
        .with_context(|| format!("bad end_time for booking {id}: {end_str}"))?;
    let services = serde_json::from_str(&services_json).unwrap_or_default();

    Ok(Booking {
        id,
        user_id,
        venue_id,
        court_id,
        date,
        start_time,
        end_time,
        total_price,
        status: BookingStatus::parse(&status_str),
        services,
        notes,
        created_at: parse_timestamp(&created_at_str),
        updated_at: parse_timestamp(&updated_at_str),
    })
}

// ── Reviews ──

pub fn create_review(conn: &Connection, review: &Review) -> anyhow::Result<()> {
    conn.execute(
        "INSERT INTO reviews (id, venue_id, user_id, rating, comment, hidden, created_at)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
        params![
            review.id,
            review.venue_id,
            review.user_id,
            review.rating,
            review.comment,
            review.hidden as i32,
            review.created_at.format("%Y-%m-%d %H:%M:%S").to_string(),
        ],
    )?;
    Ok(())
}

pub fn list_reviews(conn: &Connection, venue_id: &str) -> anyhow::Result<Vec<Review>> {
    let mut stmt = conn.prepare(
        "SELECT id, venue_id, user_id, rating, comment, hidden, created_at
         FROM reviews WHERE venue_id = ?1 AND hidden = 0 ORDER BY created_at DESC",
    )?;

    let rows = stmt.query_map(params![venue_id], |row| {
        let created_at_str: String = row.get(6)?;
        Ok(Review {
            id: row.get(0)?,
            venue_id: row.get(1)?,
            user_id: row.get(2)?,
            rating: row.get(3)?,
            comment: row.get(4)?,
            hidden: row.get::<_, i32>(5)? != 0,
            created_at: parse_timestamp(&created_at_str),
        })
    })?;

    let mut reviews = vec![];
    for row in rows {
        reviews.push(row?);
    }
    Ok(reviews)
}

pub fn set_review_hidden(conn: &Connection, id: &str, hidden: bool) -> anyhow::Result<bool> {
    let count = conn.execute(
        "UPDATE reviews SET hidden = ?1 WHERE id = ?2",
        params![hidden as i32, id],
    )?;
    Ok(count > 0)
}

// ── Reports ──

pub fn create_report(conn: &Connection, report: &Report) -> anyhow::Result<()> {
    conn.execute(
        "INSERT INTO reports (id, reporter_id, subject_kind, subject_id, reason, status, created_at, resolved_at)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)",
        params![
            report.id,
            report.reporter_id,
            report.subject_kind.as_str(),
            report.subject_id,
            report.reason,
            report.status.as_str(),
            report.created_at.format("%Y-%m-%d %H:%M:%S").to_string(),
            report
                .resolved_at
                .map(|t| t.format("%Y-%m-%d %H:%M:%S").to_string()),
        ],
    )?;
    Ok(())
}

pub fn list_reports(
    conn: &Connection,
    status_filter: Option<&str>,
    limit: i64,
) -> anyhow::Result<Vec<Report>> {
    let (sql, params_vec): (String, Vec<Box<dyn rusqlite::types::ToSql>>) = match status_filter {
        Some(status) => (
            "SELECT id, reporter_id, subject_kind, subject_id, reason, status, created_at, resolved_at \
             FROM reports WHERE status = ?1 ORDER BY created_at DESC LIMIT ?2"
                .to_string(),
            vec![
                Box::new(status.to_string()) as Box<dyn rusqlite::types::ToSql>,
                Box::new(limit),
            ],
        ),
        None => (
            "SELECT id, reporter_id, subject_kind, subject_id, reason, status, created_at, resolved_at \
             FROM reports ORDER BY created_at DESC LIMIT ?1"
                .to_string(),
            vec![Box::new(limit) as Box<dyn rusqlite::types::ToSql>],
        ),
    };

    let mut stmt = conn.prepare(&sql)?;
    let params_refs: Vec<&dyn rusqlite::types::ToSql> =
        params_vec.iter().map(|p| p.as_ref()).collect();
    let rows = stmt.query_map(params_refs.as_slice(), |row| {
        let created_at_str: String = row.get(6)?;
        let resolved_at_str: Option<String> = row.get(7)?;
        let subject_kind: String = row.get(2)?;
        let status: String = row.get(5)?;
        Ok(Report {
            id: row.get(0)?,
            reporter_id: row.get(1)?,
            subject_kind: ReportSubject::parse(&subject_kind),
            subject_id: row.get(3)?,
            reason: row.get(4)?,
            status: ReportStatus::parse(&status),
            created_at: parse_timestamp(&created_at_str),
            resolved_at: resolved_at_str.as_deref().map(parse_timestamp),
        })
    })?;

    let mut reports = vec![];
    for row in rows {
        reports.push(row?);
    }
    Ok(reports)
}

pub fn resolve_report(
    conn: &Connection,
    id: &str,
    status: &ReportStatus,
) -> anyhow::Result<bool> {
    let now = Utc::now().naive_utc().format("%Y-%m-%d %H:%M:%S").to_string();
    let count = conn.execute(
        "UPDATE reports SET status = ?1, resolved_at = ?2 WHERE id = ?3 AND status = 'open'",
        params![status.as_str(), now, id],
    )?;
    Ok(count > 0)
}

// ── Dashboard ──

pub struct DashboardStats {
    pub approved_venues: i64,
    pub pending_venues: i64,
    pub open_reports: i64,
    pub upcoming_bookings_count: i64,
}

pub fn get_dashboard_stats(conn: &Connection) -> anyhow::Result<DashboardStats> {
    let today = Utc::now().naive_utc().date().format("%Y-%m-%d").to_string();

    let approved_venues: i64 = conn
        .query_row("SELECT COUNT(*) FROM venues WHERE approved = 1", [], |row| {
            row.get(0)
        })
        .unwrap_or(0);

    let pending_venues: i64 = conn
        .query_row("SELECT COUNT(*) FROM venues WHERE approved = 0", [], |row| {
            row.get(0)
        })
        .unwrap_or(0);

    let open_reports: i64 = conn
        .query_row("SELECT COUNT(*) FROM reports WHERE status = 'open'", [], |row| {
            row.get(0)
        })
        .unwrap_or(0);

    let upcoming_bookings_count: i64 = conn
        .query_row(
            "SELECT COUNT(*) FROM bookings WHERE date >= ?1 AND status IN ('pending', 'confirmed')",
            params![today],
            |row| row.get(0),
        )
        .unwrap_or(0);

    Ok(DashboardStats {
        approved_venues,
        pending_venues,
        open_reports,
        upcoming_bookings_count,
    })
}

fn parse_timestamp(s: &str) -> NaiveDateTime {
    NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S")
        .unwrap_or_else(|_| Utc::now().naive_utc())
}
