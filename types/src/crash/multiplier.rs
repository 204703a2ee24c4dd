use bytes::{Buf, BufMut};
use commonware_codec::{Error, FixedSize, Read, ReadExt, Write};
use std::fmt;

/// Hundredths per whole multiplier (1.00x == 100).
pub const SCALE: u32 = 100;

/// Payout multiplier with two decimal places of precision.
///
/// Conversions from floating point always truncate toward zero so the
/// displayed value never rounds up past the underlying curve.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Multiplier(u32);

impl Multiplier {
    /// 1.00x
    pub const ONE: Self = Multiplier(SCALE);

    /// Create from a raw value in hundredths.
    pub const fn from_hundredths(value: u32) -> Self {
        Multiplier(value)
    }

    /// Truncate a floating point multiplier to hundredths.
    ///
    /// Returns `None` when the value is not finite or does not fit.
    pub fn from_f64_floor(value: f64) -> Option<Self> {
        if !value.is_finite() || value < 0.0 {
            return None;
        }
        let scaled = (value * SCALE as f64).floor();
        if scaled > u32::MAX as f64 {
            return None;
        }
        Some(Multiplier(scaled as u32))
    }

    /// Raw value in hundredths.
    pub const fn hundredths(self) -> u32 {
        self.0
    }

    pub fn as_f64(self) -> f64 {
        self.0 as f64 / SCALE as f64
    }

    /// Clamp into `[min, max]`.
    pub fn clamp_to(self, min: Self, max: Self) -> Self {
        Multiplier(self.0.clamp(min.0, max.0))
    }

    /// Total return for `stake` at this multiplier, truncated to whole chips.
    ///
    /// Returns `None` on overflow.
    pub fn payout(self, stake: u64) -> Option<u64> {
        stake
            .checked_mul(self.0 as u64)
            .map(|scaled| scaled / SCALE as u64)
    }
}

impl fmt::Display for Multiplier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{:02}x", self.0 / SCALE, self.0 % SCALE)
    }
}

impl Write for Multiplier {
    fn write(&self, writer: &mut impl BufMut) {
        self.0.write(writer);
    }
}

impl Read for Multiplier {
    type Cfg = ();

    fn read_cfg(reader: &mut impl Buf, _: &Self::Cfg) -> Result<Self, Error> {
        let value = u32::read(reader)?;
        if value < SCALE {
            return Err(Error::Invalid("Multiplier", "below 1.00x"));
        }
        Ok(Multiplier(value))
    }
}

impl FixedSize for Multiplier {
    const SIZE: usize = u32::SIZE;
}
