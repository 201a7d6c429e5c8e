//! Canonical draughts-rule constants.
//!
//! Starting layouts and their position-notation strings, used to initialize
//! and validate game setup.

/// Black men fill squares 1..=20 at the start.
pub const BLACK_START: u64 = generate_start_mask(1, 20);
/// White men fill squares 31..=50 at the start.
pub const WHITE_START: u64 = generate_start_mask(31, 50);

/// Standard starting position, white to move.
pub const STARTING_POSITION_WHITE_FIRST: &str = "W:W31-50:B1-20";
/// Same layout with black moving first.
pub const STARTING_POSITION_BLACK_FIRST: &str = "B:W31-50:B1-20";

const fn generate_start_mask(first: u8, last: u8) -> u64 {
    let mut mask = 0u64;
    let mut number = first;
    while number <= last {
        let zero_based = number - 1;
        mask |= 1u64 << (zero_based + zero_based / 10);
        number += 1;
    }
    mask
}
