use ascent_types::crash::{History, HistoryEntry, Multiplier, Phase, Resolution, HISTORY_CAPACITY};
use tracing::debug;

use crate::oracle::TimelineOracle;

/// One-time side effect observed at a tick.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Transition {
    /// A new round was observed. `previous` is the round that just finished.
    RoundStarted {
        round_id: u64,
        previous: Option<HistoryEntry>,
    },
    /// The multiplier started climbing (start the ambient cue).
    FlightStarted { round_id: u64 },
    /// The round crashed (stop the cue, freeze the multiplier). Also emitted,
    /// ahead of `RoundStarted`, for a round last seen Flying whose crash fell
    /// between ticks.
    Crashed { round_id: u64, crash_point: Multiplier },
}

/// What the controller saw at a tick.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Observation {
    pub resolution: Resolution,
    pub displayed_multiplier: Multiplier,
    pub transitions: Vec<Transition>,
}

/// Drives round and phase transitions by re-resolving the timeline on every
/// tick and diffing against the last observation.
///
/// Nothing is incremented: skipped ticks (dropped frames, a suspended
/// process) are corrected on the next tick without replaying anything.
pub struct RoundController {
    oracle: TimelineOracle,
    last: Option<Resolution>,
    history: History,
}

impl RoundController {
    pub fn new(oracle: TimelineOracle) -> Self {
        Self {
            oracle,
            last: None,
            history: History::default(),
        }
    }

    pub fn oracle(&self) -> &TimelineOracle {
        &self.oracle
    }

    pub fn history(&self) -> &History {
        &self.history
    }

    /// Last observed resolution.
    pub fn current(&self) -> Option<&Resolution> {
        self.last.as_ref()
    }

    /// Multiplier to show for `resolution`.
    pub fn displayed_multiplier(&self, resolution: &Resolution) -> Multiplier {
        match resolution.phase {
            Phase::Betting => Multiplier::ONE,
            Phase::Flying => self
                .oracle
                .curve()
                .displayed(resolution.flight_elapsed_ms(), resolution.crash_point),
            Phase::Crashed => resolution.crash_point,
        }
    }

    pub fn tick(&mut self, now_ms: u64) -> Observation {
        let resolution = self.oracle.resolve(now_ms);
        let mut transitions = Vec::new();

        match self.last {
            None => {
                // Joining mid-timeline: show the same feed everyone else sees
                self.catch_up_history(&resolution);
                if resolution.phase == Phase::Flying {
                    transitions.push(Transition::FlightStarted {
                        round_id: resolution.round_id,
                    });
                }
            }
            Some(last) if last.round_id != resolution.round_id => {
                if last.phase == Phase::Flying {
                    debug!(
                        round_id = last.round_id,
                        crash_point = %last.crash_point,
                        "crash skipped between ticks"
                    );
                    transitions.push(Transition::Crashed {
                        round_id: last.round_id,
                        crash_point: last.crash_point,
                    });
                }
                self.catch_up_history(&resolution);
                let previous = self
                    .history
                    .head()
                    .copied()
                    .filter(|head| head.round_id < resolution.round_id);
                debug!(
                    round_id = resolution.round_id,
                    last_round_id = last.round_id,
                    phase = ?resolution.phase,
                    "round started"
                );
                transitions.push(Transition::RoundStarted {
                    round_id: resolution.round_id,
                    previous,
                });
                self.push_phase_entry(&resolution, &mut transitions);
            }
            Some(last) if last.phase != resolution.phase => {
                self.push_phase_entry(&resolution, &mut transitions);
            }
            Some(_) => {}
        }

        self.last = Some(resolution);
        Observation {
            displayed_multiplier: self.displayed_multiplier(&resolution),
            resolution,
            transitions,
        }
    }

    /// Emit the effect of entering the phase `resolution` is in.
    fn push_phase_entry(&self, resolution: &Resolution, transitions: &mut Vec<Transition>) {
        match resolution.phase {
            Phase::Betting => {}
            Phase::Flying => transitions.push(Transition::FlightStarted {
                round_id: resolution.round_id,
            }),
            Phase::Crashed => {
                debug!(
                    round_id = resolution.round_id,
                    crash_point = %resolution.crash_point,
                    "round crashed"
                );
                transitions.push(Transition::Crashed {
                    round_id: resolution.round_id,
                    crash_point: resolution.crash_point,
                })
            }
        }
    }

    /// Append every finished round newer than the history head, oldest first.
    fn catch_up_history(&mut self, resolution: &Resolution) {
        let head = self.history.head().map(|entry| entry.round_id);
        let mut missing = Vec::with_capacity(HISTORY_CAPACITY);
        let mut cursor = self.oracle.previous(resolution);
        while let Some(round) = cursor {
            if head.is_some_and(|head| round.round_id <= head) || missing.len() == HISTORY_CAPACITY {
                break;
            }
            missing.push(HistoryEntry {
                round_id: round.round_id,
                crash_point: round.crash_point,
            });
            cursor = self.oracle.previous(&round);
        }
        for entry in missing.into_iter().rev() {
            self.history.push(entry);
        }
    }
}
