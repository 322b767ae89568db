mod conflict;
mod error;
mod store;

pub use conflict::{validate_extension, validate_new_booking};
pub use error::{EngineError, RejectReason};
pub use store::{BookingStore, InMemoryStore};

use std::sync::Arc;

use crate::model::*;

/// Booking orchestration over an injected store: gather snapshots, hand them
/// to the pure validators, persist on acceptance. The engine holds no locks
/// of its own, so two racing requests can validate against the same snapshot
/// and both commit; stores that need strict consistency serialize internally.
pub struct Engine {
    store: Arc<dyn BookingStore>,
}

impl Engine {
    pub fn new(store: Arc<dyn BookingStore>) -> Self {
        Self { store }
    }

    /// Book `draft.nights` nights in `draft.unit_id` starting `draft.check_in`.
    pub async fn create_booking(&self, draft: BookingDraft) -> Result<Booking, EngineError> {
        let candidate = conflict::validate_draft(&draft)?;

        let for_guest_unit = self
            .store
            .find_by_guest_and_unit(&draft.guest_name, &draft.unit_id)
            .await;
        let for_guest = self.store.find_by_guest(&draft.guest_name).await;
        let for_unit = self.store.find_by_unit(&draft.unit_id).await;

        validate_new_booking(&candidate, &for_guest_unit, &for_guest, &for_unit)?;

        let booking = self
            .store
            .create(NewBooking {
                guest_name: draft.guest_name,
                unit_id: draft.unit_id,
                check_in: candidate.check_in,
                check_out: candidate.check_out,
                nights: draft.nights,
            })
            .await;
        Ok(booking)
    }

    /// Push the checkout date of the guest's booking in `unit_id` out by
    /// `additional_nights`. The booking is found by (guest, unit); if
    /// duplicates exist the earliest-created one is extended.
    pub async fn extend_stay(
        &self,
        guest_name: &str,
        unit_id: &str,
        additional_nights: u32,
    ) -> Result<Booking, EngineError> {
        let existing = self
            .store
            .find_by_guest_and_unit(guest_name, unit_id)
            .await
            .into_iter()
            .next()
            .ok_or_else(|| EngineError::NotFound {
                guest_name: guest_name.to_string(),
                unit_id: unit_id.to_string(),
            })?;

        let for_unit = self.store.find_by_unit(unit_id).await;
        let extension = validate_extension(&existing, additional_nights, &for_unit)?;

        self.store
            .update_stay(existing.id, extension.new_check_out, extension.new_nights)
            .await
            .ok_or_else(|| EngineError::NotFound {
                guest_name: guest_name.to_string(),
                unit_id: unit_id.to_string(),
            })
    }
}
