use chrono::{Days, NaiveDate};
use serde::{Deserialize, Serialize};
use ulid::Ulid;

/// Half-open calendar range `[check_in, check_out)` — the checkout day itself
/// is free for the next check-in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Stay {
    pub check_in: NaiveDate,
    pub check_out: NaiveDate,
}

impl Stay {
    pub fn new(check_in: NaiveDate, check_out: NaiveDate) -> Self {
        debug_assert!(check_in < check_out, "Stay check-in must be before check-out");
        Self { check_in, check_out }
    }

    /// Occupancy range for a stay of `nights` nights starting on `check_in`.
    /// `nights` must be at least 1. Returns `None` when the checkout date
    /// would fall outside the supported calendar.
    pub fn from_nights(check_in: NaiveDate, nights: u32) -> Option<Self> {
        let check_out = check_in.checked_add_days(Days::new(u64::from(nights)))?;
        Some(Self::new(check_in, check_out))
    }

    /// The only interval-intersection predicate. Ranges that merely touch
    /// (one guest's checkout day is another's check-in day) do not overlap.
    pub fn overlaps(&self, other: &Stay) -> bool {
        self.check_in < other.check_out && other.check_in < self.check_out
    }
}

/// A stored reservation. `check_out` is derived from `check_in` plus `nights`
/// at creation and recomputed whenever the stay is extended; `check_in` and
/// `id` never change.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Booking {
    pub id: Ulid,
    #[serde(rename = "guestName")]
    pub guest_name: String,
    #[serde(rename = "unitID")]
    pub unit_id: String,
    #[serde(rename = "checkInDate")]
    pub check_in: NaiveDate,
    #[serde(rename = "checkOutDate")]
    pub check_out: NaiveDate,
    #[serde(rename = "numberOfNights")]
    pub nights: u32,
}

impl Booking {
    pub fn stay(&self) -> Stay {
        Stay::new(self.check_in, self.check_out)
    }
}

/// A requested booking before preconditions and conflict checks have run.
#[derive(Debug, Clone)]
pub struct BookingDraft {
    pub guest_name: String,
    pub unit_id: String,
    pub check_in: NaiveDate,
    pub nights: u32,
}

/// Validated field bundle handed to the store, which assigns the id.
#[derive(Debug, Clone)]
pub struct NewBooking {
    pub guest_name: String,
    pub unit_id: String,
    pub check_in: NaiveDate,
    pub check_out: NaiveDate,
    pub nights: u32,
}

// ── Validation outcome types ─────────────────────────────────────

/// An accepted extension: the checkout date and total nights to persist.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StayExtension {
    pub new_check_out: NaiveDate,
    pub new_nights: u32,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    #[test]
    fn stay_from_nights() {
        let s = Stay::from_nights(d(2025, 7, 1), 5).unwrap();
        assert_eq!(s.check_in, d(2025, 7, 1));
        assert_eq!(s.check_out, d(2025, 7, 6));
    }

    #[test]
    fn stay_from_nights_crosses_month_and_year() {
        let s = Stay::from_nights(d(2025, 12, 30), 4).unwrap();
        assert_eq!(s.check_out, d(2026, 1, 3));
    }

    #[test]
    fn stay_from_nights_calendar_edge() {
        assert!(Stay::from_nights(NaiveDate::MAX, 1).is_none());
    }

    #[test]
    fn stay_overlap() {
        let a = Stay::new(d(2025, 7, 1), d(2025, 7, 5));
        let b = Stay::new(d(2025, 7, 3), d(2025, 7, 8));
        let c = Stay::new(d(2025, 7, 5), d(2025, 7, 9));
        assert!(a.overlaps(&b));
        assert!(!a.overlaps(&c)); // touching, not overlapping
    }

    #[test]
    fn stay_overlap_is_symmetric() {
        let a = Stay::new(d(2025, 7, 1), d(2025, 7, 5));
        let b = Stay::new(d(2025, 7, 4), d(2025, 7, 10));
        assert_eq!(a.overlaps(&b), b.overlaps(&a));
        let c = Stay::new(d(2025, 7, 5), d(2025, 7, 6));
        assert_eq!(a.overlaps(&c), c.overlaps(&a));
    }

    #[test]
    fn stay_overlap_single_night() {
        // [1, 6) and [5, 9) share exactly one night.
        let a = Stay::new(d(2025, 7, 1), d(2025, 7, 6));
        let b = Stay::new(d(2025, 7, 5), d(2025, 7, 9));
        assert!(a.overlaps(&b));
    }

    #[test]
    fn stay_overlap_contained() {
        let outer = Stay::new(d(2025, 7, 1), d(2025, 7, 30));
        let inner = Stay::new(d(2025, 7, 10), d(2025, 7, 12));
        assert!(outer.overlaps(&inner));
        assert!(inner.overlaps(&outer));
    }

    #[test]
    fn stay_overlaps_itself() {
        let a = Stay::new(d(2025, 7, 1), d(2025, 7, 5));
        assert!(a.overlaps(&a));
    }

    #[test]
    fn booking_json_field_names() {
        let b = Booking {
            id: Ulid::new(),
            guest_name: "GuestA".into(),
            unit_id: "unit-7".into(),
            check_in: d(2025, 7, 1),
            check_out: d(2025, 7, 6),
            nights: 5,
        };
        let v = serde_json::to_value(&b).unwrap();
        assert_eq!(v["guestName"], "GuestA");
        assert_eq!(v["unitID"], "unit-7");
        assert_eq!(v["checkInDate"], "2025-07-01");
        assert_eq!(v["checkOutDate"], "2025-07-06");
        assert_eq!(v["numberOfNights"], 5);
        assert_eq!(v["id"].as_str().unwrap().len(), 26); // ULID string form

        let back: Booking = serde_json::from_value(v).unwrap();
        assert_eq!(back, b);
    }

    #[test]
    fn booking_stay_matches_dates() {
        let b = Booking {
            id: Ulid::new(),
            guest_name: "GuestA".into(),
            unit_id: "1".into(),
            check_in: d(2025, 7, 1),
            check_out: d(2025, 7, 6),
            nights: 5,
        };
        assert_eq!(b.stay(), Stay::new(d(2025, 7, 1), d(2025, 7, 6)));
    }
}
