//! In-memory wallet and audit log for tests.

use crate::wallet::{TransactionLog, WalletGateway};
use ascent_types::crash::TransactionKind;
use std::{
    collections::VecDeque,
    sync::{Arc, Mutex},
};
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum MockError {
    #[error("{0}")]
    Injected(String),
    #[error("insufficient funds: {balance} < {amount}")]
    InsufficientFunds { balance: u64, amount: u64 },
}

#[derive(Default)]
struct WalletInner {
    balance: u64,
    failures: VecDeque<String>,
    debits: u64,
    credits: u64,
}

/// A wallet holding a single balance, with injectable failures.
#[derive(Clone, Default)]
pub struct MockWallet {
    inner: Arc<Mutex<WalletInner>>,
}

impl MockWallet {
    pub fn new(balance: u64) -> Self {
        Self {
            inner: Arc::new(Mutex::new(WalletInner {
                balance,
                ..Default::default()
            })),
        }
    }

    /// Fail the next operation with `reason`. Calls queue up.
    pub fn fail_next(&self, reason: impl Into<String>) {
        self.inner.lock().unwrap().failures.push_back(reason.into());
    }

    pub fn balance(&self) -> u64 {
        self.inner.lock().unwrap().balance
    }

    /// Number of successful debits and credits.
    pub fn operations(&self) -> (u64, u64) {
        let inner = self.inner.lock().unwrap();
        (inner.debits, inner.credits)
    }
}

impl WalletGateway for MockWallet {
    type Error = MockError;

    async fn debit(&self, _user: &str, amount: u64) -> Result<(), Self::Error> {
        let mut inner = self.inner.lock().unwrap();
        if let Some(reason) = inner.failures.pop_front() {
            return Err(MockError::Injected(reason));
        }
        if inner.balance < amount {
            return Err(MockError::InsufficientFunds {
                balance: inner.balance,
                amount,
            });
        }
        inner.balance -= amount;
        inner.debits += 1;
        Ok(())
    }

    async fn credit(&self, _user: &str, amount: u64, _reason: &str) -> Result<(), Self::Error> {
        let mut inner = self.inner.lock().unwrap();
        if let Some(reason) = inner.failures.pop_front() {
            return Err(MockError::Injected(reason));
        }
        inner.balance += amount;
        inner.credits += 1;
        Ok(())
    }
}

/// A recorded audit log entry.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LogEntry {
    pub user: String,
    pub kind: TransactionKind,
    pub amount: u64,
    pub description: String,
}

/// An audit log that keeps every entry in memory.
#[derive(Clone, Default)]
pub struct MockLog {
    entries: Arc<Mutex<Vec<LogEntry>>>,
}

impl MockLog {
    pub fn entries(&self) -> Vec<LogEntry> {
        self.entries.lock().unwrap().clone()
    }
}

impl TransactionLog for MockLog {
    async fn record(&self, user: &str, kind: TransactionKind, amount: u64, description: &str) {
        self.entries.lock().unwrap().push(LogEntry {
            user: user.to_string(),
            kind,
            amount,
            description: description.to_string(),
        });
    }
}
