use ascent_types::crash::{self, GameConfig, Multiplier, MIN_AUTO_CASHOUT};
use serde::{Deserialize, Serialize};
use std::{str::FromStr, time::Duration};
use thiserror::Error;
use tracing::Level;

pub mod actor;
pub mod autoplay;
mod ingress;
pub mod ledger;


pub use actor::Actor;
pub use ingress::{Mailbox, MailboxError, Message};

/// Configuration for the simulator binary.
#[derive(Deserialize, Serialize)]
pub struct Config {
    #[serde(default)]
    pub game: crash::Config,

    #[serde(default = "default_log_level")]
    pub log_level: String,
    #[serde(default = "default_tick_ms")]
    pub tick_ms: u64,
    #[serde(default = "default_mailbox_size")]
    pub mailbox_size: usize,

    pub user: String,
    pub starting_balance: u64,
    #[serde(default = "default_stake")]
    pub default_stake: u64,
    /// Share of wallet operations the in-memory ledger rejects.
    #[serde(default)]
    pub wallet_failure_rate: f64,

    #[serde(default)]
    pub slots: Vec<SlotPreset>,
}

/// Initial setup of one bet slot.
#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct SlotPreset {
    pub stake: u64,
    #[serde(default)]
    pub auto_cashout: Option<f64>,
    #[serde(default)]
    pub auto_bet: bool,
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error(transparent)]
    Game(#[from] crash::ConfigError),
    #[error("invalid log level: {value}")]
    InvalidLogLevel { value: String },
    #[error("{field} must be > 0 (got {value})")]
    InvalidNonZero { field: &'static str, value: u64 },
    #[error("wallet_failure_rate must be in [0, 1] (got {value})")]
    InvalidFailureRate { value: f64 },
    #[error("{presets} slot presets configured but only {slots} slots exist")]
    TooManyPresets { presets: usize, slots: usize },
    #[error("slot preset {index} is invalid: {reason}")]
    InvalidPreset { index: usize, reason: &'static str },
}

pub struct ValidatedConfig {
    pub game: GameConfig,

    pub log_level: Level,
    pub tick: Duration,
    pub mailbox_size: usize,

    pub user: String,
    pub starting_balance: u64,
    pub default_stake: u64,
    pub wallet_failure_rate: f64,

    pub slots: Vec<ValidatedPreset>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ValidatedPreset {
    pub stake: u64,
    pub auto_cashout: Option<Multiplier>,
    pub auto_bet: bool,
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_tick_ms() -> u64 {
    16
}

fn default_mailbox_size() -> usize {
    1_024
}

fn default_stake() -> u64 {
    100
}

fn non_zero(field: &'static str, value: u64) -> Result<u64, ConfigError> {
    if value == 0 {
        return Err(ConfigError::InvalidNonZero { field, value });
    }
    Ok(value)
}

impl SlotPreset {
    fn validate(&self, index: usize) -> Result<ValidatedPreset, ConfigError> {
        if self.stake == 0 {
            return Err(ConfigError::InvalidPreset {
                index,
                reason: "stake must be > 0",
            });
        }
        let auto_cashout = match self.auto_cashout {
            None => None,
            Some(target) => {
                // Targets are written in decimal; round so 2.3 means 2.30x
                let hundredths = (target * 100.0).round();
                if !hundredths.is_finite()
                    || hundredths < MIN_AUTO_CASHOUT as f64
                    || hundredths > u32::MAX as f64
                {
                    return Err(ConfigError::InvalidPreset {
                        index,
                        reason: "auto_cashout must be at least 1.01",
                    });
                }
                Some(Multiplier::from_hundredths(hundredths as u32))
            }
        };
        Ok(ValidatedPreset {
            stake: self.stake,
            auto_cashout,
            auto_bet: self.auto_bet,
        })
    }
}

impl Config {
    pub fn validate(self) -> Result<ValidatedConfig, ConfigError> {
        let game = self.game.validate()?;
        let log_level =
            Level::from_str(&self.log_level).map_err(|_| ConfigError::InvalidLogLevel {
                value: self.log_level.clone(),
            })?;
        let tick = Duration::from_millis(non_zero("tick_ms", self.tick_ms)?);
        non_zero("mailbox_size", self.mailbox_size as u64)?;
        non_zero("default_stake", self.default_stake)?;
        if !(0.0..=1.0).contains(&self.wallet_failure_rate) {
            return Err(ConfigError::InvalidFailureRate {
                value: self.wallet_failure_rate,
            });
        }
        if self.slots.len() > game.slots {
            return Err(ConfigError::TooManyPresets {
                presets: self.slots.len(),
                slots: game.slots,
            });
        }
        let slots = self
            .slots
            .iter()
            .enumerate()
            .map(|(index, preset)| preset.validate(index))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(ValidatedConfig {
            game,
            log_level,
            tick,
            mailbox_size: self.mailbox_size,
            user: self.user,
            starting_balance: self.starting_balance,
            default_stake: self.default_stake,
            wallet_failure_rate: self.wallet_failure_rate,
            slots,
        })
    }
}
