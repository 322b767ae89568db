/// Why a booking or extension request was turned down. The `Display` form of
/// each variant is the stable, client-visible reason string; tests and
/// clients match on it verbatim.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RejectReason {
    /// The guest already holds a booking for this exact unit.
    DuplicateUnitBooking,
    /// The guest already holds a booking somewhere, whatever its dates.
    GuestAlreadyBooked,
    /// An existing booking occupies the unit for some of the requested nights.
    UnitOccupied,
    /// The extended stay would run into a later booking on the same unit.
    ExtensionBlocked,
}

impl std::fmt::Display for RejectReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RejectReason::DuplicateUnitBooking => {
                write!(f, "The given guest name cannot book the same unit multiple times")
            }
            RejectReason::GuestAlreadyBooked => {
                write!(f, "The same guest cannot be in multiple units at the same time")
            }
            RejectReason::UnitOccupied => {
                write!(f, "For the given dates, the unit is already occupied")
            }
            RejectReason::ExtensionBlocked => {
                write!(f, "The unit is not available for the requested extension period")
            }
        }
    }
}

#[derive(Debug)]
pub enum EngineError {
    /// Malformed or out-of-bounds input, refused before any business rule runs.
    InvalidInput(&'static str),
    /// No booking matches the (guest, unit) pair being extended.
    NotFound { guest_name: String, unit_id: String },
    /// A business rule turned the request down.
    Rejected(RejectReason),
}

impl std::fmt::Display for EngineError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            EngineError::InvalidInput(msg) => write!(f, "{msg}"),
            EngineError::NotFound { .. } => {
                write!(f, "No booking found for the specified guest and unit")
            }
            EngineError::Rejected(reason) => write!(f, "{reason}"),
        }
    }
}

impl std::error::Error for EngineError {}
