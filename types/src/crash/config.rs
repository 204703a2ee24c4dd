use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::{
    Multiplier, DEFAULT_ANCHOR_MS, DEFAULT_BETTING_DURATION_MS, DEFAULT_HOUSE_EDGE_FACTOR,
    DEFAULT_MAX_FLIGHT_DURATION_MS, DEFAULT_MAX_MULTIPLIER, DEFAULT_P_INSTANT,
    DEFAULT_SETTLE_DURATION_MS, DEFAULT_SLOTS, MAX_SLOTS,
};

/// Largest supported multiplier cap.
const MAX_MULTIPLIER_CAP: f64 = 10_000.0;

/// Game parameters shared by every client.
///
/// Every client must load identical values: any difference yields a
/// different timeline.
#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
pub struct Config {
    #[serde(default = "default_betting_duration_ms")]
    pub betting_duration_ms: u64,
    #[serde(default = "default_settle_duration_ms")]
    pub settle_duration_ms: u64,
    #[serde(default = "default_max_flight_duration_ms")]
    pub max_flight_duration_ms: u64,
    #[serde(default = "default_max_multiplier")]
    pub max_multiplier: f64,
    #[serde(default = "default_house_edge_factor")]
    pub house_edge_factor: f64,
    #[serde(default = "default_p_instant")]
    pub p_instant: f64,
    #[serde(default = "default_slots")]
    pub slots: usize,
    #[serde(default = "default_anchor_ms")]
    pub anchor_ms: u64,
}

fn default_betting_duration_ms() -> u64 {
    DEFAULT_BETTING_DURATION_MS
}

fn default_settle_duration_ms() -> u64 {
    DEFAULT_SETTLE_DURATION_MS
}

fn default_max_flight_duration_ms() -> u64 {
    DEFAULT_MAX_FLIGHT_DURATION_MS
}

fn default_max_multiplier() -> f64 {
    DEFAULT_MAX_MULTIPLIER
}

fn default_house_edge_factor() -> f64 {
    DEFAULT_HOUSE_EDGE_FACTOR
}

fn default_p_instant() -> f64 {
    DEFAULT_P_INSTANT
}

fn default_slots() -> usize {
    DEFAULT_SLOTS
}

fn default_anchor_ms() -> u64 {
    DEFAULT_ANCHOR_MS
}

impl Default for Config {
    fn default() -> Self {
        Self {
            betting_duration_ms: DEFAULT_BETTING_DURATION_MS,
            settle_duration_ms: DEFAULT_SETTLE_DURATION_MS,
            max_flight_duration_ms: DEFAULT_MAX_FLIGHT_DURATION_MS,
            max_multiplier: DEFAULT_MAX_MULTIPLIER,
            house_edge_factor: DEFAULT_HOUSE_EDGE_FACTOR,
            p_instant: DEFAULT_P_INSTANT,
            slots: DEFAULT_SLOTS,
            anchor_ms: DEFAULT_ANCHOR_MS,
        }
    }
}

#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    #[error("{field} must be > 0 (got {value})")]
    InvalidNonZero { field: &'static str, value: u64 },
    #[error("max_multiplier must be in (1, 10000] (got {value})")]
    InvalidMaxMultiplier { value: f64 },
    #[error("house_edge_factor must be in (0, 1] (got {value})")]
    InvalidHouseEdge { value: f64 },
    #[error("p_instant must be in [0, 1) (got {value})")]
    InvalidInstantProbability { value: f64 },
    #[error("slots must be in 1..=8 (got {value})")]
    InvalidSlots { value: usize },
    #[error("anchor_ms must fit at least one maximal round of {required}ms (got {value})")]
    AnchorTooShort { value: u64, required: u64 },
}

/// Validated, immutable game parameters.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GameConfig {
    pub betting_duration_ms: u64,
    pub settle_duration_ms: u64,
    pub max_flight_duration_ms: u64,
    pub max_multiplier: Multiplier,
    pub house_edge_factor: f64,
    pub p_instant: f64,
    pub slots: usize,
    pub anchor_ms: u64,
}

impl Config {
    pub fn validate(self) -> Result<GameConfig, ConfigError> {
        if self.betting_duration_ms == 0 {
            return Err(ConfigError::InvalidNonZero {
                field: "betting_duration_ms",
                value: self.betting_duration_ms,
            });
        }
        if self.max_flight_duration_ms == 0 {
            return Err(ConfigError::InvalidNonZero {
                field: "max_flight_duration_ms",
                value: self.max_flight_duration_ms,
            });
        }
        if !(self.max_multiplier > 1.0 && self.max_multiplier <= MAX_MULTIPLIER_CAP) {
            return Err(ConfigError::InvalidMaxMultiplier {
                value: self.max_multiplier,
            });
        }
        let max_multiplier = Multiplier::from_f64_floor(self.max_multiplier)
            .filter(|m| *m > Multiplier::ONE)
            .ok_or(ConfigError::InvalidMaxMultiplier {
                value: self.max_multiplier,
            })?;
        if !(self.house_edge_factor > 0.0 && self.house_edge_factor <= 1.0) {
            return Err(ConfigError::InvalidHouseEdge {
                value: self.house_edge_factor,
            });
        }
        if !(self.p_instant >= 0.0 && self.p_instant < 1.0) {
            return Err(ConfigError::InvalidInstantProbability {
                value: self.p_instant,
            });
        }
        if self.slots == 0 || self.slots > MAX_SLOTS {
            return Err(ConfigError::InvalidSlots { value: self.slots });
        }

        let config = GameConfig {
            betting_duration_ms: self.betting_duration_ms,
            settle_duration_ms: self.settle_duration_ms,
            max_flight_duration_ms: self.max_flight_duration_ms,
            max_multiplier,
            house_edge_factor: self.house_edge_factor,
            p_instant: self.p_instant,
            slots: self.slots,
            anchor_ms: self.anchor_ms,
        };
        if self.anchor_ms < config.max_round_ms() {
            return Err(ConfigError::AnchorTooShort {
                value: self.anchor_ms,
                required: config.max_round_ms(),
            });
        }
        Ok(config)
    }
}

impl GameConfig {
    /// Curve growth rate `k` such that the curve reaches the maximum
    /// multiplier after exactly `max_flight_duration_ms`.
    pub fn growth_rate(&self) -> f64 {
        self.max_multiplier.as_f64().ln() / (self.max_flight_duration_ms as f64 / 1_000.0)
    }

    /// Shortest possible round (instant bust).
    pub fn min_round_ms(&self) -> u64 {
        self.betting_duration_ms + self.settle_duration_ms
    }

    /// Longest possible round (flight to the cap).
    pub fn max_round_ms(&self) -> u64 {
        self.min_round_ms() + self.max_flight_duration_ms
    }

    /// Upper bound on the number of rounds that start within one anchor.
    pub fn rounds_per_anchor(&self) -> u64 {
        self.anchor_ms / self.min_round_ms() + 1
    }
}

impl Default for GameConfig {
    fn default() -> Self {
        GameConfig {
            betting_duration_ms: DEFAULT_BETTING_DURATION_MS,
            settle_duration_ms: DEFAULT_SETTLE_DURATION_MS,
            max_flight_duration_ms: DEFAULT_MAX_FLIGHT_DURATION_MS,
            max_multiplier: Multiplier::from_hundredths(
                (DEFAULT_MAX_MULTIPLIER * super::SCALE as f64) as u32,
            ),
            house_edge_factor: DEFAULT_HOUSE_EDGE_FACTOR,
            p_instant: DEFAULT_P_INSTANT,
            slots: DEFAULT_SLOTS,
            anchor_ms: DEFAULT_ANCHOR_MS,
        }
    }
}
