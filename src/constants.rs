/// Maximum card message length, counted in characters
pub const MAX_MESSAGE_CHARS: usize = 40;

/// Sequence key for board ids
pub const BOARD_SEQUENCE: &str = "boards";

/// Sequence key for card ids
pub const CARD_SEQUENCE: &str = "cards";

// =============================================================================
// Error Messages
// =============================================================================

/// Body of every validation failure; never names the failing field
pub const ERR_INVALID_DATA: &str = "Invalid data";

/// Body of unexpected storage failures
pub const ERR_INTERNAL: &str = "Internal server error";
