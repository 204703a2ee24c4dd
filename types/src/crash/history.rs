use bytes::{Buf, BufMut};
use commonware_codec::{EncodeSize, Error, FixedSize, Read, ReadExt, ReadRangeExt, Write};
use std::collections::VecDeque;

use super::{Multiplier, HISTORY_CAPACITY};

/// A finished round as shown in the history feed.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct HistoryEntry {
    pub round_id: u64,
    pub crash_point: Multiplier,
}

impl Write for HistoryEntry {
    fn write(&self, writer: &mut impl BufMut) {
        self.round_id.write(writer);
        self.crash_point.write(writer);
    }
}

impl Read for HistoryEntry {
    type Cfg = ();

    fn read_cfg(reader: &mut impl Buf, _: &Self::Cfg) -> Result<Self, Error> {
        Ok(Self {
            round_id: u64::read(reader)?,
            crash_point: Multiplier::read(reader)?,
        })
    }
}

impl FixedSize for HistoryEntry {
    const SIZE: usize = u64::SIZE + Multiplier::SIZE;
}

/// Bounded feed of the most recent crash values, newest first.
#[derive(Clone, Debug, PartialEq, Eq, Default)]
pub struct History {
    entries: VecDeque<HistoryEntry>,
}

impl History {
    /// Most recently finished round.
    pub fn head(&self) -> Option<&HistoryEntry> {
        self.entries.front()
    }

    /// Append a newly finished round, evicting the oldest entry when full.
    ///
    /// Returns false (and leaves the feed untouched) if the round is not
    /// newer than the current head.
    pub fn push(&mut self, entry: HistoryEntry) -> bool {
        if let Some(head) = self.head() {
            if entry.round_id <= head.round_id {
                return false;
            }
        }
        self.entries.push_front(entry);
        self.entries.truncate(HISTORY_CAPACITY);
        true
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entries from newest to oldest.
    pub fn iter(&self) -> impl Iterator<Item = &HistoryEntry> {
        self.entries.iter()
    }
}

impl Write for History {
    fn write(&self, writer: &mut impl BufMut) {
        let entries: Vec<HistoryEntry> = self.entries.iter().copied().collect();
        entries.write(writer);
    }
}

impl Read for History {
    type Cfg = ();

    fn read_cfg(reader: &mut impl Buf, _: &Self::Cfg) -> Result<Self, Error> {
        let entries = Vec::<HistoryEntry>::read_range(reader, 0..=HISTORY_CAPACITY)?;
        if entries.windows(2).any(|w| w[0].round_id <= w[1].round_id) {
            return Err(Error::Invalid("History", "entries out of order"));
        }
        Ok(Self {
            entries: entries.into(),
        })
    }
}

impl EncodeSize for History {
    fn encode_size(&self) -> usize {
        let entries: Vec<HistoryEntry> = self.entries.iter().copied().collect();
        entries.encode_size()
    }
}
