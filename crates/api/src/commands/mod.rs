//! Commands - timed, logged entry points for the binary and embedders

mod billing;
mod database;

pub use billing::*;
pub use database::*;
