use bytes::{Buf, BufMut};
use commonware_codec::{Error, FixedSize, Read, ReadExt, Write};

use super::{Multiplier, Phase};

/// What rendering and audio consumers see after a tick.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Snapshot {
    pub round_id: u64,
    pub phase: Phase,
    /// Frozen at the crash point once the round has crashed.
    pub displayed_multiplier: Multiplier,
    pub is_crashed: bool,
    pub time_left_in_betting_ms: u64,
    /// Optimistic balance, including in-flight debits and credits.
    pub balance: u64,
}

impl Write for Snapshot {
    fn write(&self, writer: &mut impl BufMut) {
        self.round_id.write(writer);
        self.phase.write(writer);
        self.displayed_multiplier.write(writer);
        self.time_left_in_betting_ms.write(writer);
        self.balance.write(writer);
    }
}

impl Read for Snapshot {
    type Cfg = ();

    fn read_cfg(reader: &mut impl Buf, _: &Self::Cfg) -> Result<Self, Error> {
        let round_id = u64::read(reader)?;
        let phase = Phase::read(reader)?;
        Ok(Self {
            round_id,
            phase,
            displayed_multiplier: Multiplier::read(reader)?,
            is_crashed: phase == Phase::Crashed,
            time_left_in_betting_ms: u64::read(reader)?,
            balance: u64::read(reader)?,
        })
    }
}

impl FixedSize for Snapshot {
    const SIZE: usize = u64::SIZE + Phase::SIZE + Multiplier::SIZE + u64::SIZE + u64::SIZE;
}
