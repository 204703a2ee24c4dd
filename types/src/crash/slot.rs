use super::Multiplier;

/// Index of a bet slot within a session.
pub type SlotId = usize;

/// Lifecycle of a single wager lane.
///
/// A slot still `Placed` when its round crashes has lost; it returns to
/// `Idle` at the next round boundary.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
pub enum SlotState {
    #[default]
    Idle,
    Placed,
    CashedOut,
}

/// One independent wager lane.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BetSlot {
    pub id: SlotId,
    pub stake: u64,
    pub auto_cashout: Option<Multiplier>,
    pub state: SlotState,
    pub auto_bet: bool,
    /// Round the slot was placed into.
    pub bound_round: Option<u64>,
    /// Multiplier the slot was cashed out at.
    pub result: Option<Multiplier>,
    /// Correlates wallet outcomes with the placement that issued them.
    pub(crate) ticket: Option<u64>,
}

impl BetSlot {
    pub fn new(id: SlotId, stake: u64) -> Self {
        Self {
            id,
            stake,
            auto_cashout: None,
            state: SlotState::Idle,
            auto_bet: false,
            bound_round: None,
            result: None,
            ticket: None,
        }
    }

    /// Ticket of the current placement, if any.
    pub fn ticket(&self) -> Option<u64> {
        self.ticket
    }

    /// Bind the slot to `round_id` under a fresh placement ticket.
    pub fn place(&mut self, round_id: u64, ticket: u64) {
        self.state = SlotState::Placed;
        self.bound_round = Some(round_id);
        self.result = None;
        self.ticket = Some(ticket);
    }

    pub fn cash_out(&mut self, multiplier: Multiplier) {
        self.state = SlotState::CashedOut;
        self.result = Some(multiplier);
    }

    /// Return to `Idle`, dropping the binding to the previous round.
    pub fn reset(&mut self) {
        self.state = SlotState::Idle;
        self.bound_round = None;
        self.result = None;
        self.ticket = None;
    }
}

/// How a placement ended.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SlotOutcome {
    Won {
        slot: SlotId,
        round_id: u64,
        multiplier: Multiplier,
        payout: u64,
    },
    Lost {
        slot: SlotId,
        round_id: u64,
        crash_point: Multiplier,
        stake: u64,
    },
    /// A previously reported `Won` was reversed because its stake was never debited.
    Voided {
        slot: SlotId,
        round_id: u64,
        payout: u64,
    },
}
