/// Longest accepted guest name, in bytes.
pub const MAX_GUEST_NAME_LEN: usize = 256;

/// Longest accepted unit identifier, in bytes.
pub const MAX_UNIT_ID_LEN: usize = 128;

/// Most nights a single create or extend request may ask for.
pub const MAX_NIGHTS_PER_REQUEST: u32 = 1000;

/// Largest accepted HTTP request body.
pub const MAX_BODY_BYTES: usize = 64 * 1024;
