//! Crash point generation.
//!
//! Each round's crash point is a pure function of its id:
//!
//! ```text
//! digest = SHA256(NAMESPACE || GENERATOR_VERSION:u8 || round_id:u64 BE)
//! r      = (u64::from_be_bytes(digest[0..8]) >> 11) / 2^53      in [0, 1)
//! crash  = 1.00                                  if r < p_instant
//!        = floor_2dp(clamp(edge / (1 - r), 1.00, max))  otherwise
//! ```
//!
//! Every client implementation must reproduce this mapping bit for bit;
//! any change to it must bump [GENERATOR_VERSION].
//!
//! Long-run return to player is approximately `edge * (1 - p_instant)`:
//! `P(crash >= m) = edge / m` before the instant-bust branch, which then
//! removes another `p_instant` share of winning rounds. Truncation to two
//! decimals shaves a little more.

use ascent_types::{
    crash::{GameConfig, Multiplier, GENERATOR_VERSION},
    NAMESPACE,
};
use commonware_cryptography::{sha256::Sha256, Hasher};

/// Number of mantissa bits in an f64.
const UNIT_BITS: u32 = 53;

/// Relative nudge applied before truncation. It absorbs the representation
/// error of decimal constants (e.g. `0.95 / 0.5` evaluating to `1.8999...`)
/// and nothing larger, so true values just below a hundredth still floor down.
const TRUNCATION_RELATIVE_EPSILON: f64 = 1e-12;

/// Maps round ids to crash points.
#[derive(Clone, Copy, Debug)]
pub struct CrashPointGenerator {
    house_edge_factor: f64,
    p_instant: f64,
    max_multiplier: Multiplier,
}

impl CrashPointGenerator {
    pub fn new(config: &GameConfig) -> Self {
        Self {
            house_edge_factor: config.house_edge_factor,
            p_instant: config.p_instant,
            max_multiplier: config.max_multiplier,
        }
    }

    /// Uniform value in `[0, 1)` derived from `round_id`.
    pub fn unit(round_id: u64) -> f64 {
        let mut hasher = Sha256::new();
        hasher.update(NAMESPACE);
        hasher.update(&[GENERATOR_VERSION]);
        hasher.update(&round_id.to_be_bytes());
        let digest = hasher.finalize().0;

        let mut head = [0u8; 8];
        head.copy_from_slice(&digest[..8]);
        let bits = u64::from_be_bytes(head) >> (64 - UNIT_BITS);
        bits as f64 / (1u64 << UNIT_BITS) as f64
    }

    /// Crash point of `round_id`.
    pub fn crash_point(&self, round_id: u64) -> Multiplier {
        self.crash_point_from_unit(Self::unit(round_id))
    }

    /// Crash point for a given uniform draw.
    pub fn crash_point_from_unit(&self, r: f64) -> Multiplier {
        if r < self.p_instant {
            return Multiplier::ONE;
        }

        // r -> 1 blows up the quotient; anything non-finite saturates at the cap
        let crash = self.house_edge_factor / (1.0 - r);
        Multiplier::from_f64_floor(crash * (1.0 + TRUNCATION_RELATIVE_EPSILON))
            .unwrap_or(self.max_multiplier)
            .clamp_to(Multiplier::ONE, self.max_multiplier)
    }
}
