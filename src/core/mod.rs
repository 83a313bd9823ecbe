//! Time and filesystem plumbing shared by the ledger, storage and CLI layers.

pub mod time;
pub mod utils;

pub use time::{Clock, FixedClock, SystemClock};
