use std::fmt;

use super::SlotId;

/// Kind of an audit log entry.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum TransactionKind {
    GameBet,
    GameWin,
}

impl fmt::Display for TransactionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TransactionKind::GameBet => write!(f, "game_bet"),
            TransactionKind::GameWin => write!(f, "game_win"),
        }
    }
}

/// Money movement requested by a bet slot, dispatched outside of the tick.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum WalletRequest {
    Debit {
        ticket: u64,
        slot: SlotId,
        round_id: u64,
        amount: u64,
    },
    Credit {
        ticket: u64,
        slot: SlotId,
        round_id: u64,
        amount: u64,
        reason: String,
    },
}

impl WalletRequest {
    pub fn ticket(&self) -> u64 {
        match self {
            WalletRequest::Debit { ticket, .. } | WalletRequest::Credit { ticket, .. } => *ticket,
        }
    }

    pub fn amount(&self) -> u64 {
        match self {
            WalletRequest::Debit { amount, .. } | WalletRequest::Credit { amount, .. } => *amount,
        }
    }

    pub fn kind(&self) -> TransactionKind {
        match self {
            WalletRequest::Debit { .. } => TransactionKind::GameBet,
            WalletRequest::Credit { .. } => TransactionKind::GameWin,
        }
    }
}

/// Which side of a placement an outcome settles.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum WalletOperation {
    Debit,
    Credit,
}

/// Result of a dispatched [WalletRequest], applied on a later tick.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct WalletOutcome {
    pub ticket: u64,
    pub operation: WalletOperation,
    /// Error message reported by the gateway, if the operation failed.
    pub error: Option<String>,
}

impl WalletOutcome {
    pub fn success(request: &WalletRequest) -> Self {
        Self {
            ticket: request.ticket(),
            operation: Self::operation_of(request),
            error: None,
        }
    }

    pub fn failure(request: &WalletRequest, error: impl Into<String>) -> Self {
        Self {
            ticket: request.ticket(),
            operation: Self::operation_of(request),
            error: Some(error.into()),
        }
    }

    fn operation_of(request: &WalletRequest) -> WalletOperation {
        match request {
            WalletRequest::Debit { .. } => WalletOperation::Debit,
            WalletRequest::Credit { .. } => WalletOperation::Credit,
        }
    }
}
