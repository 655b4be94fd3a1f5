//! # MspDash Core
//!
//! Pure business logic layer - no infrastructure dependencies.
//!
//! This crate contains:
//! - The billing engine (rates, line items, tickets, backups, receipts)
//! - Port interfaces (traits) the engine reads through
//! - The billing service used by the application layer
//!
//! ## Architecture Principles
//! - Only depends on `mspdash-domain`
//! - No database, HTTP, or platform code
//! - All external dependencies via traits

pub mod billing;

pub use billing::ports::{BillingRepository, Clock, SystemClock};
pub use billing::BillingService;
