use ascent_types::crash::{TransactionKind, WalletOutcome, WalletRequest, BET_DESCRIPTION};
use std::future::Future;
use tracing::{debug, warn};

/// Trait for moving funds in and out of a user's wallet.
pub trait WalletGateway: Clone + Send + Sync + 'static {
    type Error: std::error::Error + Send + Sync + 'static;

    /// Remove `amount` from the user's wallet.
    fn debit(&self, user: &str, amount: u64) -> impl Future<Output = Result<(), Self::Error>> + Send;

    /// Add `amount` to the user's wallet.
    fn credit(
        &self,
        user: &str,
        amount: u64,
        reason: &str,
    ) -> impl Future<Output = Result<(), Self::Error>> + Send;
}

/// Trait for the audit log written after every successful wallet operation.
pub trait TransactionLog: Clone + Send + Sync + 'static {
    fn record(
        &self,
        user: &str,
        kind: TransactionKind,
        amount: u64,
        description: &str,
    ) -> impl Future<Output = ()> + Send;
}

/// Dispatch `request` against `wallet`, logging it if it succeeds.
pub async fn execute<W: WalletGateway, L: TransactionLog>(
    wallet: &W,
    log: &L,
    user: &str,
    request: &WalletRequest,
) -> WalletOutcome {
    let (result, description) = match request {
        WalletRequest::Debit { amount, .. } => (wallet.debit(user, *amount).await, BET_DESCRIPTION),
        WalletRequest::Credit { amount, reason, .. } => {
            (wallet.credit(user, *amount, reason).await, reason.as_str())
        }
    };
    match result {
        Ok(()) => {
            debug!(user, ticket = request.ticket(), kind = %request.kind(), amount = request.amount(), "wallet operation succeeded");
            log.record(user, request.kind(), request.amount(), description)
                .await;
            WalletOutcome::success(request)
        }
        Err(err) => {
            warn!(user, ticket = request.ticket(), kind = %request.kind(), ?err, "wallet operation failed");
            WalletOutcome::failure(request, err.to_string())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mocks::{MockLog, MockWallet};
    use ascent_types::crash::{WalletOperation, WIN_DESCRIPTION};
    use futures::executor::block_on;

    fn debit(amount: u64) -> WalletRequest {
        WalletRequest::Debit {
            ticket: 7,
            slot: 0,
            round_id: 3,
            amount,
        }
    }

    #[test]
    fn test_debit_logged_on_success() {
        let wallet = MockWallet::new(500);
        let log = MockLog::default();
        let outcome = block_on(execute(&wallet, &log, "alice", &debit(100)));

        assert_eq!(outcome.ticket, 7);
        assert_eq!(outcome.operation, WalletOperation::Debit);
        assert!(outcome.error.is_none());
        assert_eq!(wallet.balance(), 400);

        let entries = log.entries();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].kind, TransactionKind::GameBet);
        assert_eq!(entries[0].amount, 100);
        assert_eq!(entries[0].description, BET_DESCRIPTION);
    }

    #[test]
    fn test_credit_uses_reason() {
        let wallet = MockWallet::new(0);
        let log = MockLog::default();
        let request = WalletRequest::Credit {
            ticket: 1,
            slot: 1,
            round_id: 3,
            amount: 190,
            reason: WIN_DESCRIPTION.to_string(),
        };
        let outcome = block_on(execute(&wallet, &log, "alice", &request));

        assert!(outcome.error.is_none());
        assert_eq!(wallet.balance(), 190);
        assert_eq!(log.entries()[0].kind, TransactionKind::GameWin);
        assert_eq!(log.entries()[0].description, WIN_DESCRIPTION);
    }

    #[test]
    fn test_failure_not_logged() {
        let wallet = MockWallet::new(500);
        wallet.fail_next("gateway unavailable");
        let log = MockLog::default();
        let outcome = block_on(execute(&wallet, &log, "alice", &debit(100)));

        assert_eq!(outcome.error.as_deref(), Some("gateway unavailable"));
        assert_eq!(wallet.balance(), 500);
        assert!(log.entries().is_empty());
    }

    #[test]
    fn test_overdraft_rejected() {
        let wallet = MockWallet::new(50);
        let log = MockLog::default();
        let outcome = block_on(execute(&wallet, &log, "alice", &debit(100)));

        assert!(outcome.error.is_some());
        assert_eq!(wallet.balance(), 50);
    }
}
