pub mod controller;
pub mod curve;
pub mod generator;
pub mod oracle;
pub mod session;
pub mod slots;
pub mod wallet;

#[cfg(any(test, feature = "mocks"))]
pub mod mocks;

pub use controller::{Observation, RoundController, Transition};
pub use curve::FlightCurve;
pub use generator::CrashPointGenerator;
pub use oracle::TimelineOracle;
pub use session::{Command, Frame, Session};
pub use slots::{BetSlotManager, SlotError};
pub use wallet::{execute, TransactionLog, WalletGateway};
