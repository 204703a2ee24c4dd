//! Per-client bet slots.
//!
//! Every slot is an independent `Idle -> Placed -> CashedOut` state machine.
//! A slot still `Placed` when its round crashes has lost. All transitions
//! run synchronously inside a tick; money moves are queued as
//! [WalletRequest]s and their [WalletOutcome]s are applied on a later tick,
//! rolling back the optimistic balance on failure.
//!
//! A credit is never dispatched before the debit it pays out on has
//! confirmed: cashing out while the debit is in flight defers the credit,
//! and a failed debit cancels it.

use ascent_types::crash::{
    BetSlot, Multiplier, Phase, Resolution, SlotId, SlotOutcome, SlotState, WalletOperation,
    WalletOutcome, WalletRequest, MIN_AUTO_CASHOUT, WIN_DESCRIPTION,
};
use std::collections::BTreeMap;
use thiserror::Error;
use tracing::{debug, info, warn};

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SlotError {
    #[error("slot {slot} does not exist")]
    UnknownSlot { slot: SlotId },
    #[error("slot {slot} stake must be > 0")]
    InvalidStake { slot: SlotId },
    #[error("slot {slot} auto-cashout target {target} is below 1.01x")]
    InvalidTarget { slot: SlotId, target: Multiplier },
    #[error("slot {slot} cannot be reconfigured while a bet is active")]
    SlotBusy { slot: SlotId },
    #[error("slot {slot} stake {stake} exceeds balance {balance}")]
    InsufficientBalance {
        slot: SlotId,
        stake: u64,
        balance: u64,
    },
    #[error("slot {slot} payout overflowed at {multiplier}")]
    PayoutOverflow { slot: SlotId, multiplier: Multiplier },
    #[error("slot {slot} wallet {operation:?} failed: {reason}")]
    WalletGatewayFailure {
        slot: SlotId,
        operation: WalletOperation,
        reason: String,
    },
}

/// A debit that has been dispatched but not yet confirmed.
struct PendingDebit {
    slot: SlotId,
    round_id: u64,
    stake: u64,
    /// Payout owed once the debit confirms.
    deferred_credit: Option<u64>,
}

/// A credit that has been dispatched but not yet confirmed.
struct PendingCredit {
    slot: SlotId,
    amount: u64,
}

/// Owns every slot of a session and the client's optimistic balance.
pub struct BetSlotManager {
    slots: Vec<BetSlot>,
    balance: u64,
    next_ticket: u64,
    debits: BTreeMap<u64, PendingDebit>,
    credits: BTreeMap<u64, PendingCredit>,
    /// Last round whose losses were reported.
    settled_round: Option<u64>,
    requests: Vec<WalletRequest>,
    outcomes: Vec<SlotOutcome>,
}

impl BetSlotManager {
    pub fn new(count: usize, default_stake: u64, balance: u64) -> Self {
        Self {
            slots: (0..count).map(|id| BetSlot::new(id, default_stake)).collect(),
            balance,
            next_ticket: 0,
            debits: BTreeMap::new(),
            credits: BTreeMap::new(),
            settled_round: None,
            requests: Vec::new(),
            outcomes: Vec::new(),
        }
    }

    pub fn slots(&self) -> &[BetSlot] {
        &self.slots
    }

    pub fn slot(&self, slot: SlotId) -> Option<&BetSlot> {
        self.slots.get(slot)
    }

    /// Balance including in-flight debits and credits.
    pub fn balance(&self) -> u64 {
        self.balance
    }

    /// Number of wallet operations awaiting an outcome.
    pub fn in_flight(&self) -> usize {
        self.debits.len() + self.credits.len()
    }

    fn slot_mut(&mut self, slot: SlotId) -> Result<&mut BetSlot, SlotError> {
        self.slots
            .get_mut(slot)
            .ok_or(SlotError::UnknownSlot { slot })
    }

    /// Set the stake and auto-cashout target of an idle slot.
    pub fn configure(
        &mut self,
        slot: SlotId,
        stake: u64,
        auto_cashout: Option<Multiplier>,
    ) -> Result<(), SlotError> {
        let entry = self.slot_mut(slot)?;
        if entry.state != SlotState::Idle {
            return Err(SlotError::SlotBusy { slot });
        }
        if stake == 0 {
            return Err(SlotError::InvalidStake { slot });
        }
        if let Some(target) = auto_cashout {
            if target.hundredths() < MIN_AUTO_CASHOUT {
                return Err(SlotError::InvalidTarget { slot, target });
            }
        }
        entry.stake = stake;
        entry.auto_cashout = auto_cashout;
        Ok(())
    }

    /// Enable or disable automatic placement at every round boundary.
    pub fn set_auto_bet(&mut self, slot: SlotId, enabled: bool) -> Result<(), SlotError> {
        self.slot_mut(slot)?.auto_bet = enabled;
        Ok(())
    }

    /// Place the slot's stake into the current round.
    ///
    /// Returns `Ok(false)` outside of Betting or if the slot is not idle.
    pub fn place_bet(&mut self, slot: SlotId, resolution: &Resolution) -> Result<bool, SlotError> {
        let entry = self.slot(slot).ok_or(SlotError::UnknownSlot { slot })?;
        if resolution.phase != Phase::Betting || entry.state != SlotState::Idle {
            return Ok(false);
        }
        self.place(slot, resolution.round_id)?;
        Ok(true)
    }

    fn place(&mut self, slot: SlotId, round_id: u64) -> Result<(), SlotError> {
        let balance = self.balance;
        let ticket = self.next_ticket;
        let entry = self.slot_mut(slot)?;
        let stake = entry.stake;
        if stake == 0 {
            return Err(SlotError::InvalidStake { slot });
        }
        if stake > balance {
            return Err(SlotError::InsufficientBalance {
                slot,
                stake,
                balance,
            });
        }
        entry.place(round_id, ticket);

        self.next_ticket += 1;
        self.balance = balance - stake;
        self.debits.insert(
            ticket,
            PendingDebit {
                slot,
                round_id,
                stake,
                deferred_credit: None,
            },
        );
        self.requests.push(WalletRequest::Debit {
            ticket,
            slot,
            round_id,
            amount: stake,
        });
        info!(slot, round_id, stake, ticket, "bet placed");
        Ok(())
    }

    /// Cash the slot out at `multiplier`, the value displayed at the moment
    /// of the call.
    ///
    /// Returns `Ok(false)` outside of Flying, or if the slot is not placed in
    /// the current round.
    pub fn cash_out(
        &mut self,
        slot: SlotId,
        resolution: &Resolution,
        multiplier: Multiplier,
    ) -> Result<bool, SlotError> {
        let entry = self.slot_mut(slot)?;
        if resolution.phase != Phase::Flying
            || entry.state != SlotState::Placed
            || entry.bound_round != Some(resolution.round_id)
        {
            return Ok(false);
        }
        let Some(ticket) = entry.ticket() else {
            return Ok(false);
        };
        let payout = multiplier
            .payout(entry.stake)
            .ok_or(SlotError::PayoutOverflow { slot, multiplier })?;
        entry.cash_out(multiplier);

        self.balance = self.balance.saturating_add(payout);
        self.outcomes.push(SlotOutcome::Won {
            slot,
            round_id: resolution.round_id,
            multiplier,
            payout,
        });
        match self.debits.get_mut(&ticket) {
            Some(debit) => {
                debug!(slot, ticket, payout, "debit in flight, deferring credit");
                debit.deferred_credit = Some(payout);
            }
            None => self.dispatch_credit(ticket, slot, resolution.round_id, payout),
        }
        info!(slot, round_id = resolution.round_id, %multiplier, payout, "cashed out");
        Ok(true)
    }

    fn dispatch_credit(&mut self, ticket: u64, slot: SlotId, round_id: u64, amount: u64) {
        self.credits.insert(ticket, PendingCredit { slot, amount });
        self.requests.push(WalletRequest::Credit {
            ticket,
            slot,
            round_id,
            amount,
            reason: WIN_DESCRIPTION.to_string(),
        });
    }

    /// Cash out every placed slot whose target has been reached.
    ///
    /// Must run before any manual input of the same tick.
    pub fn auto_cashout(
        &mut self,
        resolution: &Resolution,
        multiplier: Multiplier,
    ) -> Vec<SlotError> {
        if resolution.phase != Phase::Flying {
            return Vec::new();
        }
        let due: Vec<SlotId> = self
            .slots
            .iter()
            .filter(|slot| slot.state == SlotState::Placed)
            .filter(|slot| slot.auto_cashout.is_some_and(|target| multiplier >= target))
            .map(|slot| slot.id)
            .collect();
        due.into_iter()
            .filter_map(|slot| self.cash_out(slot, resolution, multiplier).err())
            .collect()
    }

    /// Report every slot still placed in `round_id` as lost. Idempotent.
    pub fn settle_crash(&mut self, round_id: u64, crash_point: Multiplier) {
        if self.settled_round.is_some_and(|settled| settled >= round_id) {
            return;
        }
        self.settled_round = Some(round_id);
        for slot in &self.slots {
            if slot.state == SlotState::Placed && slot.bound_round == Some(round_id) {
                debug!(slot = slot.id, round_id, %crash_point, "bet lost");
                self.outcomes.push(SlotOutcome::Lost {
                    slot: slot.id,
                    round_id,
                    crash_point,
                    stake: slot.stake,
                });
            }
        }
    }

    /// Reset every slot for a new round and fire auto-bets.
    ///
    /// `crash_point_of` resolves the crash point of rounds whose losses were
    /// never reported (their crash was skipped). Auto-bets are only placed
    /// when the new round is still taking bets. A slot whose auto-bet is
    /// blocked by the balance has auto-bet disabled.
    pub fn start_round(
        &mut self,
        resolution: &Resolution,
        crash_point_of: impl Fn(u64) -> Multiplier,
    ) -> Vec<SlotError> {
        let unsettled: Vec<u64> = self
            .slots
            .iter()
            .filter(|slot| slot.state == SlotState::Placed)
            .filter_map(|slot| slot.bound_round)
            .filter(|round_id| *round_id < resolution.round_id)
            .collect();
        for round_id in unsettled {
            if self.settled_round.is_some_and(|settled| settled >= round_id) {
                continue;
            }
            self.settle_crash(round_id, crash_point_of(round_id));
        }
        for slot in &mut self.slots {
            slot.reset();
        }

        let mut errors = Vec::new();
        let auto: Vec<SlotId> = self
            .slots
            .iter()
            .filter(|slot| slot.auto_bet)
            .map(|slot| slot.id)
            .collect();
        if auto.is_empty() {
            return errors;
        }
        if resolution.phase != Phase::Betting {
            debug!(round_id = resolution.round_id, phase = ?resolution.phase, "round already closed, skipping auto-bets");
            return errors;
        }
        for slot in auto {
            if let Err(err) = self.place(slot, resolution.round_id) {
                warn!(slot, ?err, "auto-bet failed, disabling");
                self.slots[slot].auto_bet = false;
                errors.push(err);
            }
        }
        errors
    }

    /// Apply the result of a dispatched wallet request.
    pub fn apply(&mut self, outcome: WalletOutcome) -> Option<SlotError> {
        match outcome.operation {
            WalletOperation::Debit => self.apply_debit(outcome),
            WalletOperation::Credit => self.apply_credit(outcome),
        }
    }

    fn apply_debit(&mut self, outcome: WalletOutcome) -> Option<SlotError> {
        let Some(debit) = self.debits.remove(&outcome.ticket) else {
            warn!(ticket = outcome.ticket, "unknown debit outcome");
            return None;
        };
        let Some(reason) = outcome.error else {
            if let Some(payout) = debit.deferred_credit {
                self.dispatch_credit(outcome.ticket, debit.slot, debit.round_id, payout);
            }
            return None;
        };

        // Roll back: the stake never left the wallet and nothing can be paid on it
        warn!(slot = debit.slot, ticket = outcome.ticket, %reason, "debit failed, rolling back");
        self.balance = self.balance.saturating_add(debit.stake);
        if let Some(payout) = debit.deferred_credit {
            self.balance = self.balance.saturating_sub(payout);
            self.outcomes.push(SlotOutcome::Voided {
                slot: debit.slot,
                round_id: debit.round_id,
                payout,
            });
        }
        if let Some(slot) = self.slots.get_mut(debit.slot) {
            if slot.ticket() == Some(outcome.ticket) {
                slot.reset();
            }
        }
        Some(SlotError::WalletGatewayFailure {
            slot: debit.slot,
            operation: WalletOperation::Debit,
            reason,
        })
    }

    fn apply_credit(&mut self, outcome: WalletOutcome) -> Option<SlotError> {
        let Some(credit) = self.credits.remove(&outcome.ticket) else {
            warn!(ticket = outcome.ticket, "unknown credit outcome");
            return None;
        };
        let reason = outcome.error?;
        warn!(slot = credit.slot, ticket = outcome.ticket, %reason, "credit failed, rolling back");
        self.balance = self.balance.saturating_sub(credit.amount);
        Some(SlotError::WalletGatewayFailure {
            slot: credit.slot,
            operation: WalletOperation::Credit,
            reason,
        })
    }

    /// Take the wallet requests queued since the last call.
    pub fn drain_requests(&mut self) -> Vec<WalletRequest> {
        std::mem::take(&mut self.requests)
    }

    /// Take the outcomes settled since the last call.
    pub fn drain_outcomes(&mut self) -> Vec<SlotOutcome> {
        std::mem::take(&mut self.outcomes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn resolution(round_id: u64, phase: Phase) -> Resolution {
        Resolution {
            round_id,
            phase,
            elapsed_ms: match phase {
                Phase::Betting => 1_000,
                Phase::Flying => 7_000,
                Phase::Crashed => 20_000,
            },
            crash_point: Multiplier::from_hundredths(300),
            started_at_ms: 0,
            betting_duration_ms: 5_000,
            flight_duration_ms: 9_543,
            settle_duration_ms: 3_000,
        }
    }

    fn x(hundredths: u32) -> Multiplier {
        Multiplier::from_hundredths(hundredths)
    }

    fn debit_ticket(requests: &[WalletRequest]) -> u64 {
        match requests {
            [WalletRequest::Debit { ticket, .. }] => *ticket,
            other => panic!("expected single debit, got {other:?}"),
        }
    }

    #[test]
    fn test_place_bet_only_while_betting() {
        let mut manager = BetSlotManager::new(2, 100, 1_000);
        assert_eq!(manager.place_bet(0, &resolution(1, Phase::Flying)), Ok(false));
        assert_eq!(manager.place_bet(0, &resolution(1, Phase::Crashed)), Ok(false));
        assert_eq!(manager.slot(0).unwrap().state, SlotState::Idle);
        assert!(manager.drain_requests().is_empty());

        assert_eq!(manager.place_bet(0, &resolution(1, Phase::Betting)), Ok(true));
        let slot = manager.slot(0).unwrap();
        assert_eq!(slot.state, SlotState::Placed);
        assert_eq!(slot.bound_round, Some(1));
        assert_eq!(manager.balance(), 900);

        // A second click is a no-op
        assert_eq!(manager.place_bet(0, &resolution(1, Phase::Betting)), Ok(false));
        assert_eq!(manager.drain_requests().len(), 1);
    }

    #[test]
    fn test_insufficient_balance_rejected() {
        let mut manager = BetSlotManager::new(1, 50, 30);
        let result = manager.place_bet(0, &resolution(1, Phase::Betting));
        assert_eq!(
            result,
            Err(SlotError::InsufficientBalance {
                slot: 0,
                stake: 50,
                balance: 30,
            })
        );
        assert_eq!(manager.slot(0).unwrap().state, SlotState::Idle);
        assert_eq!(manager.balance(), 30);
        assert!(manager.drain_requests().is_empty());
    }

    #[test]
    fn test_same_tick_placements_serialize() {
        let mut manager = BetSlotManager::new(2, 60, 100);
        let betting = resolution(1, Phase::Betting);
        assert_eq!(manager.place_bet(0, &betting), Ok(true));
        assert!(matches!(
            manager.place_bet(1, &betting),
            Err(SlotError::InsufficientBalance { balance: 40, .. })
        ));
        assert_eq!(manager.balance(), 40);
    }

    #[test]
    fn test_cash_out_only_while_flying_and_once() {
        let mut manager = BetSlotManager::new(1, 100, 1_000);
        manager.place_bet(0, &resolution(1, Phase::Betting)).unwrap();
        let ticket = debit_ticket(&manager.drain_requests());
        assert!(manager.apply(WalletOutcome {
            ticket,
            operation: WalletOperation::Debit,
            error: None,
        })
        .is_none());

        assert_eq!(manager.cash_out(0, &resolution(1, Phase::Betting), x(150)), Ok(false));
        assert_eq!(manager.cash_out(0, &resolution(1, Phase::Crashed), x(300)), Ok(false));

        let flying = resolution(1, Phase::Flying);
        assert_eq!(manager.cash_out(0, &flying, x(150)), Ok(true));
        assert_eq!(manager.cash_out(0, &flying, x(180)), Ok(false));

        let slot = manager.slot(0).unwrap();
        assert_eq!(slot.state, SlotState::CashedOut);
        assert_eq!(slot.result, Some(x(150)));
        assert_eq!(manager.balance(), 1_050);
        assert!(matches!(
            manager.drain_requests().as_slice(),
            [WalletRequest::Credit { amount: 150, .. }]
        ));
    }

    #[test]
    fn test_cash_out_ignores_other_round() {
        let mut manager = BetSlotManager::new(1, 100, 1_000);
        manager.place_bet(0, &resolution(1, Phase::Betting)).unwrap();
        assert_eq!(manager.cash_out(0, &resolution(2, Phase::Flying), x(150)), Ok(false));
    }

    #[test]
    fn test_auto_cashout_pays_triggering_multiplier() {
        let mut manager = BetSlotManager::new(2, 100, 1_000);
        manager.configure(0, 100, Some(x(200))).unwrap();
        let betting = resolution(1, Phase::Betting);
        manager.place_bet(0, &betting).unwrap();
        manager.place_bet(1, &betting).unwrap();
        manager.drain_requests();

        let flying = resolution(1, Phase::Flying);
        assert!(manager.auto_cashout(&flying, x(199)).is_empty());
        assert_eq!(manager.slot(0).unwrap().state, SlotState::Placed);

        assert!(manager.auto_cashout(&flying, x(201)).is_empty());
        assert_eq!(manager.slot(0).unwrap().result, Some(x(201)));
        assert_eq!(manager.slot(1).unwrap().state, SlotState::Placed);

        // A later, larger multiplier changes nothing
        manager.auto_cashout(&flying, x(250));
        assert_eq!(manager.slot(0).unwrap().result, Some(x(201)));
        assert_eq!(
            manager.drain_outcomes(),
            vec![SlotOutcome::Won {
                slot: 0,
                round_id: 1,
                multiplier: x(201),
                payout: 201,
            }]
        );

        manager.settle_crash(1, x(300));
        assert_eq!(
            manager.drain_outcomes(),
            vec![SlotOutcome::Lost {
                slot: 1,
                round_id: 1,
                crash_point: x(300),
                stake: 100,
            }]
        );
        // Reported once
        manager.settle_crash(1, x(300));
        assert!(manager.drain_outcomes().is_empty());
    }

    #[test]
    fn test_debit_failure_rolls_back() {
        let mut manager = BetSlotManager::new(1, 100, 1_000);
        manager.place_bet(0, &resolution(1, Phase::Betting)).unwrap();
        let ticket = debit_ticket(&manager.drain_requests());
        assert_eq!(manager.balance(), 900);

        let error = manager.apply(WalletOutcome {
            ticket,
            operation: WalletOperation::Debit,
            error: Some("gateway unavailable".to_string()),
        });
        assert_eq!(
            error,
            Some(SlotError::WalletGatewayFailure {
                slot: 0,
                operation: WalletOperation::Debit,
                reason: "gateway unavailable".to_string(),
            })
        );
        assert_eq!(manager.balance(), 1_000);
        assert_eq!(manager.slot(0).unwrap().state, SlotState::Idle);
        assert_eq!(manager.in_flight(), 0);
    }

    #[test]
    fn test_credit_deferred_until_debit_confirms() {
        let mut manager = BetSlotManager::new(1, 100, 1_000);
        manager.place_bet(0, &resolution(1, Phase::Betting)).unwrap();
        let ticket = debit_ticket(&manager.drain_requests());

        manager.cash_out(0, &resolution(1, Phase::Flying), x(250)).unwrap();
        assert!(manager.drain_requests().is_empty());
        assert_eq!(manager.balance(), 1_150);

        manager.apply(WalletOutcome {
            ticket,
            operation: WalletOperation::Debit,
            error: None,
        });
        assert!(matches!(
            manager.drain_requests().as_slice(),
            [WalletRequest::Credit { amount: 250, .. }]
        ));
    }

    #[test]
    fn test_debit_failure_cancels_deferred_credit() {
        let mut manager = BetSlotManager::new(1, 100, 1_000);
        manager.place_bet(0, &resolution(1, Phase::Betting)).unwrap();
        let ticket = debit_ticket(&manager.drain_requests());
        manager.cash_out(0, &resolution(1, Phase::Flying), x(250)).unwrap();

        // The win was already shown before the debit came back
        assert!(matches!(
            manager.drain_outcomes().as_slice(),
            [SlotOutcome::Won { payout: 250, .. }]
        ));

        manager.apply(WalletOutcome {
            ticket,
            operation: WalletOperation::Debit,
            error: Some("declined".to_string()),
        });
        assert_eq!(manager.balance(), 1_000);
        assert!(manager.drain_requests().is_empty());
        assert_eq!(
            manager.drain_outcomes(),
            vec![SlotOutcome::Voided {
                slot: 0,
                round_id: 1,
                payout: 250,
            }]
        );
        assert_eq!(manager.slot(0).unwrap().state, SlotState::Idle);
    }

    #[test]
    fn test_credit_failure_rolls_back_payout() {
        let mut manager = BetSlotManager::new(1, 100, 1_000);
        manager.place_bet(0, &resolution(1, Phase::Betting)).unwrap();
        let debit = debit_ticket(&manager.drain_requests());
        manager.apply(WalletOutcome {
            ticket: debit,
            operation: WalletOperation::Debit,
            error: None,
        });
        manager.cash_out(0, &resolution(1, Phase::Flying), x(200)).unwrap();
        let credit = manager.drain_requests().remove(0);

        let error = manager.apply(WalletOutcome::failure(&credit, "timeout"));
        assert!(matches!(
            error,
            Some(SlotError::WalletGatewayFailure {
                operation: WalletOperation::Credit,
                ..
            })
        ));
        assert_eq!(manager.balance(), 900);
    }

    #[test]
    fn test_auto_bet_fires_once_per_round() {
        let mut manager = BetSlotManager::new(2, 100, 1_000);
        manager.set_auto_bet(1, true).unwrap();

        let next = resolution(2, Phase::Betting);
        assert!(manager.start_round(&next, |_| x(100)).is_empty());
        assert_eq!(manager.slot(0).unwrap().state, SlotState::Idle);
        assert_eq!(manager.slot(1).unwrap().state, SlotState::Placed);
        assert_eq!(manager.slot(1).unwrap().bound_round, Some(2));

        // Manual placement on the auto slot is a no-op this round
        assert_eq!(manager.place_bet(1, &next), Ok(false));
        assert_eq!(manager.drain_requests().len(), 1);
        assert_eq!(manager.balance(), 900);
    }

    #[test]
    fn test_auto_bet_disabled_when_balance_exhausted() {
        let mut manager = BetSlotManager::new(1, 100, 50);
        manager.set_auto_bet(0, true).unwrap();

        let errors = manager.start_round(&resolution(2, Phase::Betting), |_| x(100));
        assert!(matches!(
            errors.as_slice(),
            [SlotError::InsufficientBalance { slot: 0, .. }]
        ));
        assert!(!manager.slot(0).unwrap().auto_bet);

        // No retry on the following round
        assert!(manager
            .start_round(&resolution(3, Phase::Betting), |_| x(100))
            .is_empty());
        assert!(manager.drain_requests().is_empty());
    }

    #[test]
    fn test_start_round_settles_skipped_crash() {
        let mut manager = BetSlotManager::new(1, 100, 1_000);
        manager.place_bet(0, &resolution(4, Phase::Betting)).unwrap();

        manager.start_round(&resolution(7, Phase::Flying), |round_id| {
            assert_eq!(round_id, 4);
            x(123)
        });
        assert_eq!(
            manager.drain_outcomes(),
            vec![SlotOutcome::Lost {
                slot: 0,
                round_id: 4,
                crash_point: x(123),
                stake: 100,
            }]
        );
        assert_eq!(manager.slot(0).unwrap().state, SlotState::Idle);
    }

    #[test]
    fn test_auto_bet_skipped_when_round_closed() {
        let mut manager = BetSlotManager::new(1, 100, 1_000);
        manager.set_auto_bet(0, true).unwrap();
        assert!(manager
            .start_round(&resolution(2, Phase::Flying), |_| x(100))
            .is_empty());
        assert_eq!(manager.slot(0).unwrap().state, SlotState::Idle);
        assert!(manager.slot(0).unwrap().auto_bet);
    }

    #[test]
    fn test_configure_rules() {
        let mut manager = BetSlotManager::new(1, 100, 1_000);
        assert_eq!(manager.configure(0, 0, None), Err(SlotError::InvalidStake { slot: 0 }));
        assert_eq!(
            manager.configure(0, 10, Some(x(100))),
            Err(SlotError::InvalidTarget {
                slot: 0,
                target: x(100),
            })
        );
        assert_eq!(manager.configure(3, 10, None), Err(SlotError::UnknownSlot { slot: 3 }));
        manager.configure(0, 250, Some(x(150))).unwrap();
        assert_eq!(manager.slot(0).unwrap().stake, 250);

        manager.place_bet(0, &resolution(1, Phase::Betting)).unwrap();
        assert_eq!(manager.configure(0, 10, None), Err(SlotError::SlotBusy { slot: 0 }));
        assert!(manager.set_auto_bet(0, true).is_ok());
    }
}
