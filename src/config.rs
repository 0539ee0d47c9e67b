//! Demo application constants.

// Mock service behavior
pub const FETCH_DELAY_MS: u32 = 200;

// Starting selection for the normal-mode demo
pub const INITIAL_MIN: f64 = 10.0;
pub const INITIAL_MAX: f64 = 70.0;

// Price display for the fixed-mode demo
pub const CURRENCY_SUFFIX: &str = "€";
