//! Port interfaces for the billing engine
//!
//! The engine reads everything through these traits and never writes.
//! Queries are synchronous: one computation is a short burst of reads
//! against a local store, and callers that live on an async runtime move the
//! whole computation onto a blocking thread.

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use mspdash_domain::{
    Asset, AssetBillingOverride, BillingPlan, Client, ClientBillingOverride, CustomLineItem,
    ManualAsset, ManualUser, Result, TicketDetail, User, UserBillingOverride,
};

/// Read-only query surface over the synced billing data.
///
/// Every list is filtered by client account number. Lists keep the store's
/// ordering: assets by hostname, users by full name, line items by name.
pub trait BillingRepository: Send + Sync {
    fn find_client(&self, account_number: &str) -> Result<Option<Client>>;

    /// All clients, ordered by name.
    fn list_clients(&self) -> Result<Vec<Client>>;

    fn find_billing_plan(&self, plan: &str, term: &str) -> Result<Option<BillingPlan>>;

    fn find_client_override(&self, account_number: &str)
        -> Result<Option<ClientBillingOverride>>;

    fn list_assets(&self, account_number: &str) -> Result<Vec<Asset>>;

    fn list_manual_assets(&self, account_number: &str) -> Result<Vec<ManualAsset>>;

    /// Overrides for the client's synced assets, keyed by asset id.
    fn asset_overrides(&self, account_number: &str) -> Result<HashMap<i64, AssetBillingOverride>>;

    /// Synced users with status `Active`.
    fn list_active_users(&self, account_number: &str) -> Result<Vec<User>>;

    fn list_manual_users(&self, account_number: &str) -> Result<Vec<ManualUser>>;

    /// Overrides for the client's synced users, keyed by user id.
    fn user_overrides(&self, account_number: &str) -> Result<HashMap<i64, UserBillingOverride>>;

    /// Tickets whose `last_updated_at` falls in calendar year `year`.
    fn tickets_for_year(&self, account_number: &str, year: i32) -> Result<Vec<TicketDetail>>;

    fn list_custom_line_items(&self, account_number: &str) -> Result<Vec<CustomLineItem>>;
}

/// Source of "now" for the parts of billing anchored to the wall clock.
pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Utc>;
}

/// Wall-clock implementation used outside tests.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}
