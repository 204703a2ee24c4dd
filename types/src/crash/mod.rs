mod config;
mod constants;
mod history;
mod multiplier;
mod round;
mod slot;
mod snapshot;
mod wallet;

pub use config::*;
pub use constants::*;
pub use history::*;
pub use multiplier::*;
pub use round::*;
pub use slot::*;
pub use snapshot::*;
pub use wallet::*;
