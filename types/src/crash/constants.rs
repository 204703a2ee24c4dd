/// Version of the crash point generator. Bump on any change to the hash-to-float mapping.
pub const GENERATOR_VERSION: u8 = 1;

/// Number of finished rounds kept in the history feed.
pub const HISTORY_CAPACITY: usize = 20;

/// Default anchor granularity (10 minutes).
pub const DEFAULT_ANCHOR_MS: u64 = 10 * 60 * 1_000;

/// Default betting window.
pub const DEFAULT_BETTING_DURATION_MS: u64 = 5_000;

/// Default delay between a crash and the next betting window.
pub const DEFAULT_SETTLE_DURATION_MS: u64 = 3_000;

/// Default time it takes the curve to reach the maximum multiplier.
pub const DEFAULT_MAX_FLIGHT_DURATION_MS: u64 = 20_000;

/// Default multiplier cap (100.00x).
pub const DEFAULT_MAX_MULTIPLIER: f64 = 100.0;

/// Default house edge factor applied to the crash distribution.
pub const DEFAULT_HOUSE_EDGE_FACTOR: f64 = 0.96;

/// Default probability of an instant bust at 1.00x.
pub const DEFAULT_P_INSTANT: f64 = 0.04;

/// Default number of bet slots per client.
pub const DEFAULT_SLOTS: usize = 2;

/// Upper bound on slots per client.
pub const MAX_SLOTS: usize = 8;

/// Smallest auto-cashout target that can ever trigger with a profit.
pub const MIN_AUTO_CASHOUT: u32 = 101;

/// Transaction log descriptions
pub const BET_DESCRIPTION: &str = "Crash bet";
pub const WIN_DESCRIPTION: &str = "Crash cash-out";
