use chrono::{NaiveDate, NaiveTime, Timelike};
use serde::Serialize;

use crate::models::{Booking, OperatingHours};

pub const DEFAULT_SLOT_MINUTES: i64 = 60;

/// One candidate bookable interval inside a venue's operating hours.
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
pub struct Slot {
    pub start_time: NaiveTime,
    pub end_time: NaiveTime,
}

/// Minutes between two wall-clock times on a common reference day.
///
/// Ordering is not checked here; run the request validator first when
/// `end > start` is not already guaranteed.
pub fn duration_minutes(start: NaiveTime, end: NaiveTime) -> i64 {
    (end - start).num_minutes()
}

/// True iff the candidate interval `[start, end)` overlaps any existing
/// booking on the same date. Bookings on other dates never conflict, and
/// boundary-touching intervals (10:00-11:00 vs 11:00-12:00) do not overlap.
pub fn is_booking_conflict(
    date: NaiveDate,
    start: NaiveTime,
    end: NaiveTime,
    existing: &[Booking],
) -> bool {
    existing
        .iter()
        .any(|b| b.date == date && b.start_time < end && start < b.end_time)
}

/// Candidate slots for one day, stepping from the hour-floored opening time
/// in `slot_minutes` increments. Slots that would run past closing time or
/// collide with an existing booking are omitted. The iterator is lazy and
/// finite; call again to restart.
///
/// Operating hours are expected to be hour-aligned; a fractional opening
/// time is floored to its hour before iteration.
pub fn available_slots<'a>(
    hours: OperatingHours,
    date: NaiveDate,
    existing: &'a [Booking],
    slot_minutes: i64,
) -> impl Iterator<Item = Slot> + 'a {
    let step = slot_minutes.max(1);
    let open_minute = i64::from(hours.open.hour()) * 60;
    let close_minute = i64::from(hours.close.hour()) * 60 + i64::from(hours.close.minute());

    (0i64..)
        .map(move |i| open_minute + i * step)
        .take_while(move |start| start + step <= close_minute)
        .filter_map(move |start| {
            let slot = Slot {
                start_time: time_from_minutes(start)?,
                end_time: time_from_minutes(start + step)?,
            };
            let free = !is_booking_conflict(date, slot.start_time, slot.end_time, existing);
            free.then_some(slot)
        })
}

fn time_from_minutes(minutes: i64) -> Option<NaiveTime> {
    NaiveTime::from_hms_opt((minutes / 60) as u32, (minutes % 60) as u32, 0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::BookingStatus;
    use chrono::{NaiveDate, NaiveDateTime};

    fn date(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    fn time(s: &str) -> NaiveTime {
        NaiveTime::parse_from_str(s, "%H:%M").unwrap()
    }

    fn booking(d: &str, start: &str, end: &str) -> Booking {
        let now = NaiveDateTime::parse_from_str("2025-06-01 12:00:00", "%Y-%m-%d %H:%M:%S").unwrap();
        Booking {
            id: "b-1".to_string(),
            user_id: "u-1".to_string(),
            venue_id: "v-1".to_string(),
            court_id: "c-1".to_string(),
            date: date(d),
            start_time: time(start),
            end_time: time(end),
            total_price: 500.0,
            status: BookingStatus::Confirmed,
            services: vec![],
            notes: None,
            created_at: now,
            updated_at: now,
        }
    }

    fn hours(open: &str, close: &str) -> OperatingHours {
        OperatingHours::new(time(open), time(close)).unwrap()
    }

    #[test]
    fn test_duration_minutes() {
        assert_eq!(duration_minutes(time("09:00"), time("10:30")), 90);
        assert_eq!(duration_minutes(time("09:00"), time("09:00")), 0);
        assert_eq!(duration_minutes(time("00:00"), time("23:59")), 1439);
    }

    #[test]
    fn test_conflict_same_interval() {
        let existing = [booking("2025-06-16", "10:00", "11:00")];
        assert!(is_booking_conflict(
            date("2025-06-16"),
            time("10:00"),
            time("11:00"),
            &existing
        ));
    }

    #[test]
    fn test_no_conflict_different_date() {
        let existing = [booking("2025-06-16", "10:00", "11:00")];
        assert!(!is_booking_conflict(
            date("2025-06-17"),
            time("10:00"),
            time("11:00"),
            &existing
        ));
    }

    #[test]
    fn test_partial_overlap_conflicts() {
        let existing = [booking("2025-06-16", "10:00", "11:00")];
        assert!(is_booking_conflict(
            date("2025-06-16"),
            time("10:30"),
            time("11:30"),
            &existing
        ));
        assert!(is_booking_conflict(
            date("2025-06-16"),
            time("09:30"),
            time("10:30"),
            &existing
        ));
    }

    #[test]
    fn test_containment_conflicts() {
        let existing = [booking("2025-06-16", "10:00", "12:00")];
        // candidate inside existing
        assert!(is_booking_conflict(
            date("2025-06-16"),
            time("10:30"),
            time("11:00"),
            &existing
        ));
        // existing inside candidate
        assert!(is_booking_conflict(
            date("2025-06-16"),
            time("09:00"),
            time("13:00"),
            &existing
        ));
    }

    #[test]
    fn test_adjacent_intervals_do_not_conflict() {
        let existing = [booking("2025-06-16", "09:00", "10:00")];
        assert!(!is_booking_conflict(
            date("2025-06-16"),
            time("10:00"),
            time("11:00"),
            &existing
        ));
        assert!(!is_booking_conflict(
            date("2025-06-16"),
            time("08:00"),
            time("09:00"),
            &existing
        ));
    }

    #[test]
    fn test_conflict_is_order_independent() {
        let a = booking("2025-06-16", "08:00", "09:00");
        let b = booking("2025-06-16", "12:00", "13:00");
        let forward = [a.clone(), b.clone()];
        let backward = [b, a];
        for existing in [&forward, &backward] {
            assert!(is_booking_conflict(
                date("2025-06-16"),
                time("12:30"),
                time("13:30"),
                existing.as_slice()
            ));
        }
    }

    #[test]
    fn test_slots_skip_booked_hour() {
        let existing = [booking("2025-06-16", "09:00", "10:00")];
        let slots: Vec<Slot> =
            available_slots(hours("08:00", "11:00"), date("2025-06-16"), &existing, 60).collect();
        assert_eq!(
            slots,
            vec![
                Slot {
                    start_time: time("08:00"),
                    end_time: time("09:00")
                },
                Slot {
                    start_time: time("10:00"),
                    end_time: time("11:00")
                },
            ]
        );
    }

    #[test]
    fn test_slots_full_day_when_empty() {
        let slots: Vec<Slot> =
            available_slots(hours("08:00", "12:00"), date("2025-06-16"), &[], 60).collect();
        assert_eq!(slots.len(), 4);
        assert_eq!(slots[0].start_time, time("08:00"));
        assert_eq!(slots[3].end_time, time("12:00"));
    }

    #[test]
    fn test_slots_bookings_on_other_dates_ignored() {
        let existing = [booking("2025-06-17", "09:00", "10:00")];
        let slots: Vec<Slot> =
            available_slots(hours("08:00", "11:00"), date("2025-06-16"), &existing, 60).collect();
        assert_eq!(slots.len(), 3);
    }

    #[test]
    fn test_slots_fractional_close_truncates_last_slot() {
        // 10:30 close leaves no room for a 10:00-11:00 slot
        let slots: Vec<Slot> =
            available_slots(hours("08:00", "10:30"), date("2025-06-16"), &[], 60).collect();
        assert_eq!(slots.len(), 2);
        assert_eq!(slots[1].end_time, time("10:00"));
    }

    #[test]
    fn test_slots_fractional_open_floors_to_hour() {
        let slots: Vec<Slot> =
            available_slots(hours("08:30", "10:00"), date("2025-06-16"), &[], 60).collect();
        assert_eq!(slots[0].start_time, time("08:00"));
        assert_eq!(slots.len(), 2);
    }

    #[test]
    fn test_slots_restartable() {
        let hours = hours("08:00", "10:00");
        let first: Vec<Slot> = available_slots(hours, date("2025-06-16"), &[], 60).collect();
        let second: Vec<Slot> = available_slots(hours, date("2025-06-16"), &[], 60).collect();
        assert_eq!(first, second);
    }

    #[test]
    fn test_slots_thirty_minute_step() {
        let slots: Vec<Slot> =
            available_slots(hours("08:00", "09:00"), date("2025-06-16"), &[], 30).collect();
        assert_eq!(slots.len(), 2);
        assert_eq!(slots[0].end_time, time("08:30"));
    }
}
