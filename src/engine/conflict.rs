use chrono::Days;

use crate::model::*;

use super::error::RejectReason;
use super::EngineError;

pub(crate) fn validate_draft(draft: &BookingDraft) -> Result<Stay, EngineError> {
    use crate::limits::*;
    if draft.guest_name.trim().is_empty() {
        return Err(EngineError::InvalidInput("guest name must not be empty"));
    }
    if draft.guest_name.len() > MAX_GUEST_NAME_LEN {
        return Err(EngineError::InvalidInput("guest name too long"));
    }
    if draft.unit_id.trim().is_empty() {
        return Err(EngineError::InvalidInput("unit id must not be empty"));
    }
    if draft.unit_id.len() > MAX_UNIT_ID_LEN {
        return Err(EngineError::InvalidInput("unit id too long"));
    }
    validate_nights(draft.nights)?;
    Stay::from_nights(draft.check_in, draft.nights)
        .ok_or(EngineError::InvalidInput("checkout date out of calendar range"))
}

pub(crate) fn validate_nights(nights: u32) -> Result<(), EngineError> {
    use crate::limits::*;
    if nights == 0 {
        return Err(EngineError::InvalidInput("nights must be a positive integer"));
    }
    if nights > MAX_NIGHTS_PER_REQUEST {
        return Err(EngineError::InvalidInput("nights exceed the maximum stay length"));
    }
    Ok(())
}

/// The three creation checks, in order, first failure wins:
/// 1. the guest may not book the same unit twice,
/// 2. the guest may not hold bookings in two units, whatever the dates,
/// 3. the unit must be free for every requested night.
///
/// Pure: decides over the snapshots it is given and touches nothing else.
pub fn validate_new_booking(
    candidate: &Stay,
    existing_for_guest_unit: &[Booking],
    existing_for_guest: &[Booking],
    existing_for_unit: &[Booking],
) -> Result<(), EngineError> {
    if !existing_for_guest_unit.is_empty() {
        return Err(EngineError::Rejected(RejectReason::DuplicateUnitBooking));
    }
    // Date-blind: any booking held by the guest blocks a new one, overlapping or not.
    if !existing_for_guest.is_empty() {
        return Err(EngineError::Rejected(RejectReason::GuestAlreadyBooked));
    }
    for other in existing_for_unit {
        if candidate.overlaps(&other.stay()) {
            return Err(EngineError::Rejected(RejectReason::UnitOccupied));
        }
    }
    Ok(())
}

/// Check that pushing `existing`'s checkout out by `additional_nights` runs
/// into no later booking on the unit, and compute the dates to persist.
///
/// Entries sharing `existing.id` are skipped. Bookings starting at or before
/// `existing.check_in` are never a conflict source: they were settled against
/// this booking when it was created, and an extension only grows the tail.
pub fn validate_extension(
    existing: &Booking,
    additional_nights: u32,
    bookings_for_unit: &[Booking],
) -> Result<StayExtension, EngineError> {
    validate_nights(additional_nights)?;
    let new_check_out = existing
        .check_out
        .checked_add_days(Days::new(u64::from(additional_nights)))
        .ok_or(EngineError::InvalidInput("checkout date out of calendar range"))?;
    let new_nights = existing
        .nights
        .checked_add(additional_nights)
        .ok_or(EngineError::InvalidInput("nights exceed the maximum stay length"))?;

    let extended = Stay::new(existing.check_in, new_check_out);
    for other in bookings_for_unit {
        if other.id == existing.id {
            continue;
        }
        if existing.check_in < other.check_in && extended.overlaps(&other.stay()) {
            return Err(EngineError::Rejected(RejectReason::ExtensionBlocked));
        }
    }
    Ok(StayExtension { new_check_out, new_nights })
}
