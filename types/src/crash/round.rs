use bytes::{Buf, BufMut};
use commonware_codec::{Error, FixedSize, Read, ReadExt, Write};

use super::Multiplier;

/// Phase of a round.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum Phase {
    Betting = 0,
    Flying = 1,
    Crashed = 2,
}

impl Write for Phase {
    fn write(&self, writer: &mut impl BufMut) {
        (*self as u8).write(writer);
    }
}

impl Read for Phase {
    type Cfg = ();

    fn read_cfg(reader: &mut impl Buf, _: &Self::Cfg) -> Result<Self, Error> {
        let value = u8::read(reader)?;
        match value {
            0 => Ok(Self::Betting),
            1 => Ok(Self::Flying),
            2 => Ok(Self::Crashed),
            i => Err(Error::InvalidEnum(i)),
        }
    }
}

impl FixedSize for Phase {
    const SIZE: usize = 1;
}

/// The round that is current at some instant.
///
/// Never stored as mutable state: it is recomputed from wall-clock time on
/// every tick.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Resolution {
    pub round_id: u64,
    pub phase: Phase,
    /// Milliseconds since the round started.
    pub elapsed_ms: u64,
    pub crash_point: Multiplier,
    pub started_at_ms: u64,
    pub betting_duration_ms: u64,
    pub flight_duration_ms: u64,
    /// Length of the Crashed phase. May exceed the configured settle delay
    /// for the last round before an anchor boundary.
    pub settle_duration_ms: u64,
}

impl Resolution {
    /// Instant at which the flight starts.
    pub fn flight_starts_at_ms(&self) -> u64 {
        self.started_at_ms + self.betting_duration_ms
    }

    /// Instant at which the round crashes.
    pub fn crashes_at_ms(&self) -> u64 {
        self.flight_starts_at_ms() + self.flight_duration_ms
    }

    /// Instant at which the next round starts.
    pub fn ends_at_ms(&self) -> u64 {
        self.crashes_at_ms() + self.settle_duration_ms
    }

    /// Total length of the round.
    pub fn total_duration_ms(&self) -> u64 {
        self.betting_duration_ms + self.flight_duration_ms + self.settle_duration_ms
    }

    /// Milliseconds of flight elapsed (zero while betting, full flight once crashed).
    pub fn flight_elapsed_ms(&self) -> u64 {
        self.elapsed_ms
            .saturating_sub(self.betting_duration_ms)
            .min(self.flight_duration_ms)
    }

    /// Milliseconds left to place bets (zero outside of Betting).
    pub fn time_left_in_betting_ms(&self) -> u64 {
        match self.phase {
            Phase::Betting => self.betting_duration_ms.saturating_sub(self.elapsed_ms),
            _ => 0,
        }
    }
}
