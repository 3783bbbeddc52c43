//! Booking availability rules.
//!
//! Pure, side-effect-free predicates and generators. "Available" here means
//! "in principle bookable": the rules look only at the calendar date and the
//! studio's opening hours. There is no appointment store to consult, so two
//! bookings for the same slot are both accepted downstream.

use chrono::{Datelike, Duration, FixedOffset, NaiveDate, Utc, Weekday};
use serde::Serialize;

/// First bookable hour of the day (09:00).
pub const OPEN_HOUR: u32 = 9;
/// Closing hour (17:00); the last slot starts 30 minutes before it.
pub const CLOSE_HOUR: u32 = 17;

/// South Africa Standard Time (UTC+2, no daylight saving).
pub fn sast() -> FixedOffset {
    FixedOffset::east_opt(2 * 3600).unwrap()
}

/// Current date in the studio's timezone.
pub fn today() -> NaiveDate {
    Utc::now().with_timezone(&sast()).date_naive()
}

/// A bookable time of day.
///
/// The label set is generated statically per day; `available` is derived
/// from the date rules alone, never from existing reservations.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TimeSlot {
    pub time: String,
    pub available: bool,
}

/// Whether `date` can be booked, evaluated against an explicit `today`.
///
/// Fails closed: anything before the start of the current day or falling on
/// a Sunday is unavailable.
pub fn is_date_available_on(date: NaiveDate, today: NaiveDate) -> bool {
    if date < today {
        return false;
    }
    if date.weekday() == Weekday::Sun {
        return false;
    }
    true
}

/// Whether `date` can be booked as of now.
pub fn is_date_available(date: NaiveDate) -> bool {
    is_date_available_on(date, today())
}

/// Half-hour slot labels from opening to closing hour, end-exclusive.
///
/// The final slot is on the hour, 30 minutes before close, so the count is
/// `2 * (CLOSE_HOUR - OPEN_HOUR) - 1`.
pub fn generate_time_slots() -> Vec<String> {
    let mut slots = Vec::new();

    for hour in OPEN_HOUR..CLOSE_HOUR {
        slots.push(format!("{:02}:00", hour));
        if hour < CLOSE_HOUR - 1 {
            slots.push(format!("{:02}:30", hour));
        }
    }

    slots
}

/// Slot list for a given date, with the availability flag applied.
pub fn time_slots_for_on(date: NaiveDate, today: NaiveDate) -> Vec<TimeSlot> {
    let available = is_date_available_on(date, today);
    generate_time_slots()
        .into_iter()
        .map(|time| TimeSlot { time, available })
        .collect()
}

/// Slot list for a given date as of now.
pub fn time_slots_for(date: NaiveDate) -> Vec<TimeSlot> {
    time_slots_for_on(date, today())
}

/// First available date at or after `start`.
///
/// Terminates within 6 steps: the only recurring exclusion is Sunday.
pub fn next_available_date_from(start: NaiveDate) -> NaiveDate {
    let mut date = start;
    while !is_date_available_on(date, start) {
        date += Duration::days(1);
    }
    date
}

/// First available date from today.
pub fn next_available_date() -> NaiveDate {
    next_available_date_from(today())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn past_dates_are_unavailable() {
        let today = date(2025, 3, 12); // a Wednesday
        assert!(!is_date_available_on(date(2025, 3, 11), today));
        assert!(!is_date_available_on(date(2024, 12, 25), today));
        assert!(!is_date_available_on(date(2020, 1, 1), today));
    }

    #[test]
    fn sundays_are_unavailable_regardless_of_distance() {
        let today = date(2025, 3, 12);
        assert_eq!(date(2025, 3, 16).weekday(), Weekday::Sun);
        assert!(!is_date_available_on(date(2025, 3, 16), today));
        // A Sunday years out is still closed.
        assert_eq!(date(2030, 6, 2).weekday(), Weekday::Sun);
        assert!(!is_date_available_on(date(2030, 6, 2), today));
    }

    #[test]
    fn today_and_future_weekdays_are_available() {
        let today = date(2025, 3, 12);
        assert!(is_date_available_on(today, today));
        assert!(is_date_available_on(date(2025, 3, 15), today)); // Saturday
        assert!(is_date_available_on(date(2025, 3, 17), today)); // Monday
    }

    #[test]
    fn slot_list_is_fifteen_half_hour_labels() {
        let slots = generate_time_slots();
        assert_eq!(
            slots.len(),
            (2 * (CLOSE_HOUR - OPEN_HOUR) - 1) as usize
        );
        assert_eq!(slots.first().map(String::as_str), Some("09:00"));
        assert_eq!(slots.last().map(String::as_str), Some("16:00"));
        assert!(slots.contains(&"14:00".to_string()));
        // No slot in the final half hour before close.
        assert!(!slots.contains(&"16:30".to_string()));
        assert!(!slots.contains(&"17:00".to_string()));
    }

    #[test]
    fn slots_are_ordered_and_half_hour_aligned() {
        let slots = generate_time_slots();
        let mut sorted = slots.clone();
        sorted.sort();
        assert_eq!(slots, sorted);
        for slot in &slots {
            let minutes = &slot[3..];
            assert!(minutes == "00" || minutes == "30", "unaligned slot {slot}");
        }
    }

    #[test]
    fn slots_for_date_carry_availability_flag() {
        let today = date(2025, 3, 12);
        let open = time_slots_for_on(date(2025, 3, 13), today);
        assert!(open.iter().all(|s| s.available));
        let sunday = time_slots_for_on(date(2025, 3, 16), today);
        assert_eq!(sunday.len(), open.len());
        assert!(sunday.iter().all(|s| !s.available));
    }

    #[test]
    fn next_available_is_identity_on_open_days() {
        let monday = date(2025, 3, 10);
        assert_eq!(next_available_date_from(monday), monday);
    }

    #[test]
    fn next_available_skips_sunday() {
        let sunday = date(2025, 3, 16);
        assert_eq!(next_available_date_from(sunday), date(2025, 3, 17));
    }

    #[test]
    fn next_available_is_within_six_days_and_available() {
        for offset in 0..14 {
            let start = date(2025, 3, 1) + Duration::days(offset);
            let found = next_available_date_from(start);
            assert!(found - start <= Duration::days(6));
            assert!(is_date_available_on(found, start));
        }
    }
}
