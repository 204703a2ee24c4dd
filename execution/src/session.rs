use ascent_types::crash::{
    BetSlot, History, Multiplier, Phase, Snapshot, SlotId, SlotOutcome, WalletOutcome,
    WalletRequest,
};
use tracing::trace;

use crate::{
    controller::{RoundController, Transition},
    oracle::TimelineOracle,
    slots::{BetSlotManager, SlotError},
};

/// Player input, applied by [Session::tick] after boundary and auto-cashout handling.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Command {
    Configure {
        slot: SlotId,
        stake: u64,
        auto_cashout: Option<Multiplier>,
    },
    SetAutoBet {
        slot: SlotId,
        enabled: bool,
    },
    PlaceBet {
        slot: SlotId,
    },
    CashOut {
        slot: SlotId,
    },
}

/// Everything a tick produced.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Frame {
    pub snapshot: Snapshot,
    pub transitions: Vec<Transition>,
    pub outcomes: Vec<SlotOutcome>,
    /// Errors to surface to the player as soft notices.
    pub errors: Vec<SlotError>,
    /// Wallet operations to dispatch.
    pub requests: Vec<WalletRequest>,
}

/// One client's view of the game: the shared timeline plus its own slots.
pub struct Session {
    controller: RoundController,
    slots: BetSlotManager,
    pending: Vec<SlotError>,
}

impl Session {
    pub fn new(oracle: TimelineOracle, default_stake: u64, balance: u64) -> Self {
        let slots = BetSlotManager::new(oracle.config().slots, default_stake, balance);
        Self {
            controller: RoundController::new(oracle),
            slots,
            pending: Vec::new(),
        }
    }

    pub fn history(&self) -> &History {
        self.controller.history()
    }

    pub fn slots(&self) -> &[BetSlot] {
        self.slots.slots()
    }

    pub fn balance(&self) -> u64 {
        self.slots.balance()
    }

    /// Buffer a wallet outcome. Its effects show up in the next frame.
    pub fn apply(&mut self, outcome: WalletOutcome) {
        if let Some(err) = self.slots.apply(outcome) {
            self.pending.push(err);
        }
    }

    pub fn tick(&mut self, now_ms: u64, commands: &[Command]) -> Frame {
        let mut errors = std::mem::take(&mut self.pending);

        let observation = self.controller.tick(now_ms);
        let resolution = observation.resolution;
        let displayed = observation.displayed_multiplier;
        for transition in &observation.transitions {
            match *transition {
                Transition::RoundStarted { .. } => {
                    let generator = *self.controller.oracle().generator();
                    errors.extend(
                        self.slots
                            .start_round(&resolution, |round_id| generator.crash_point(round_id)),
                    );
                }
                Transition::Crashed {
                    round_id,
                    crash_point,
                } => self.slots.settle_crash(round_id, crash_point),
                Transition::FlightStarted { .. } => {}
            }
        }

        errors.extend(self.slots.auto_cashout(&resolution, displayed));

        for command in commands {
            trace!(?command, "applying command");
            let result = match *command {
                Command::Configure {
                    slot,
                    stake,
                    auto_cashout,
                } => self.slots.configure(slot, stake, auto_cashout),
                Command::SetAutoBet { slot, enabled } => self.slots.set_auto_bet(slot, enabled),
                Command::PlaceBet { slot } => self.slots.place_bet(slot, &resolution).map(|_| ()),
                Command::CashOut { slot } => self
                    .slots
                    .cash_out(slot, &resolution, displayed)
                    .map(|_| ()),
            };
            if let Err(err) = result {
                errors.push(err);
            }
        }

        Frame {
            snapshot: Snapshot {
                round_id: resolution.round_id,
                phase: resolution.phase,
                displayed_multiplier: displayed,
                is_crashed: resolution.phase == Phase::Crashed,
                time_left_in_betting_ms: resolution.time_left_in_betting_ms(),
                balance: self.slots.balance(),
            },
            transitions: observation.transitions,
            outcomes: self.slots.drain_outcomes(),
            errors,
            requests: self.slots.drain_requests(),
        }
    }
}
