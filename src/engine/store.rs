use async_trait::async_trait;
use chrono::NaiveDate;
use dashmap::DashMap;
use ulid::Ulid;

use crate::model::*;
use crate::observability;

/// Booking lookups and mutations the engine depends on. Implementations own
/// durability; the engine only ever sees snapshots and never holds a lock
/// across calls.
#[async_trait]
pub trait BookingStore: Send + Sync {
    /// Bookings for this guest in this unit, in creation order.
    async fn find_by_guest_and_unit(&self, guest_name: &str, unit_id: &str) -> Vec<Booking>;
    /// Bookings held by this guest anywhere, in creation order.
    async fn find_by_guest(&self, guest_name: &str) -> Vec<Booking>;
    /// Bookings on this unit, in creation order.
    async fn find_by_unit(&self, unit_id: &str) -> Vec<Booking>;
    async fn find_by_id(&self, id: Ulid) -> Option<Booking>;
    /// Persist a validated booking; the store assigns the id.
    async fn create(&self, new: NewBooking) -> Booking;
    /// Move a booking's checkout date and night count. `None` if the id is gone.
    async fn update_stay(&self, id: Ulid, new_check_out: NaiveDate, new_nights: u32)
        -> Option<Booking>;
}

/// DashMap-backed store. Individual calls are atomic, but nothing serializes
/// a lookup-validate-persist sequence across requests; implementations that
/// need strict consistency must close that window themselves.
pub struct InMemoryStore {
    bookings: DashMap<Ulid, Booking>,
}

impl Default for InMemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self {
            bookings: DashMap::new(),
        }
    }

    pub fn booking_count(&self) -> usize {
        self.bookings.len()
    }

    /// Snapshot of every booking matching `pred`, sorted by id. ULIDs are
    /// time-ordered, so id order is creation order and "first match" is
    /// deterministic.
    fn collect_sorted(&self, pred: impl Fn(&Booking) -> bool) -> Vec<Booking> {
        let mut out: Vec<Booking> = self
            .bookings
            .iter()
            .filter(|e| pred(e.value()))
            .map(|e| e.value().clone())
            .collect();
        out.sort_by_key(|b| b.id);
        out
    }
}

#[async_trait]
impl BookingStore for InMemoryStore {
    async fn find_by_guest_and_unit(&self, guest_name: &str, unit_id: &str) -> Vec<Booking> {
        self.collect_sorted(|b| b.guest_name == guest_name && b.unit_id == unit_id)
    }

    async fn find_by_guest(&self, guest_name: &str) -> Vec<Booking> {
        self.collect_sorted(|b| b.guest_name == guest_name)
    }

    async fn find_by_unit(&self, unit_id: &str) -> Vec<Booking> {
        self.collect_sorted(|b| b.unit_id == unit_id)
    }

    async fn find_by_id(&self, id: Ulid) -> Option<Booking> {
        self.bookings.get(&id).map(|e| e.value().clone())
    }

    async fn create(&self, new: NewBooking) -> Booking {
        let booking = Booking {
            id: Ulid::new(),
            guest_name: new.guest_name,
            unit_id: new.unit_id,
            check_in: new.check_in,
            check_out: new.check_out,
            nights: new.nights,
        };
        self.bookings.insert(booking.id, booking.clone());
        metrics::gauge!(observability::BOOKINGS_STORED).set(self.bookings.len() as f64);
        booking
    }

    async fn update_stay(
        &self,
        id: Ulid,
        new_check_out: NaiveDate,
        new_nights: u32,
    ) -> Option<Booking> {
        let mut entry = self.bookings.get_mut(&id)?;
        entry.check_out = new_check_out;
        entry.nights = new_nights;
        Some(entry.value().clone())
    }
}
