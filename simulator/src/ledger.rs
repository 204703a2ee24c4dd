//! In-process wallet backing the simulator.

use ascent_execution::{TransactionLog, WalletGateway};
use ascent_types::crash::TransactionKind;
use rand::{rngs::StdRng, Rng, SeedableRng};
use std::{
    collections::HashMap,
    sync::{Arc, Mutex},
};
use thiserror::Error;
use tracing::info;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum LedgerError {
    #[error("unknown account: {0}")]
    UnknownAccount(String),
    #[error("insufficient funds: {balance} < {amount}")]
    InsufficientFunds { balance: u64, amount: u64 },
    #[error("ledger unavailable")]
    Unavailable,
    #[error("ledger lock poisoned")]
    Poisoned,
}

struct Inner {
    accounts: HashMap<String, u64>,
    failure_rate: f64,
    rng: StdRng,
}

/// Balances keyed by user, with a configurable rate of simulated outages.
#[derive(Clone)]
pub struct Ledger {
    inner: Arc<Mutex<Inner>>,
}

impl Ledger {
    pub fn new(seed: u64, failure_rate: f64) -> Self {
        Self {
            inner: Arc::new(Mutex::new(Inner {
                accounts: HashMap::new(),
                failure_rate,
                rng: StdRng::seed_from_u64(seed),
            })),
        }
    }

    /// Create or overwrite an account.
    pub fn open(&self, user: &str, balance: u64) -> Result<(), LedgerError> {
        let mut inner = self.inner.lock().map_err(|_| LedgerError::Poisoned)?;
        inner.accounts.insert(user.to_string(), balance);
        Ok(())
    }

    pub fn balance(&self, user: &str) -> Option<u64> {
        let inner = self.inner.lock().ok()?;
        inner.accounts.get(user).copied()
    }

    fn update(
        &self,
        user: &str,
        apply: impl FnOnce(u64) -> Result<u64, LedgerError>,
    ) -> Result<(), LedgerError> {
        let mut inner = self.inner.lock().map_err(|_| LedgerError::Poisoned)?;
        let failure_rate = inner.failure_rate;
        if failure_rate > 0.0 && inner.rng.gen_bool(failure_rate) {
            return Err(LedgerError::Unavailable);
        }
        let balance = inner
            .accounts
            .get_mut(user)
            .ok_or_else(|| LedgerError::UnknownAccount(user.to_string()))?;
        *balance = apply(*balance)?;
        Ok(())
    }
}

impl WalletGateway for Ledger {
    type Error = LedgerError;

    async fn debit(&self, user: &str, amount: u64) -> Result<(), Self::Error> {
        self.update(user, |balance| {
            balance
                .checked_sub(amount)
                .ok_or(LedgerError::InsufficientFunds { balance, amount })
        })
    }

    async fn credit(&self, user: &str, amount: u64, _reason: &str) -> Result<(), Self::Error> {
        self.update(user, |balance| Ok(balance.saturating_add(amount)))
    }
}

/// Audit log that writes every transaction to the tracing output.
#[derive(Clone, Default)]
pub struct TracingLog;

impl TransactionLog for TracingLog {
    async fn record(&self, user: &str, kind: TransactionKind, amount: u64, description: &str) {
        info!(user, %kind, amount, description, "transaction");
    }
}
