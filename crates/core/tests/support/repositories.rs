//! In-memory `BillingRepository` for engine tests
//!
//! Mirrors the store's filtering and ordering (hostname, full name, name;
//! active users only; tickets by calendar year) over plain vectors.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use chrono::Datelike;
use mspdash_core::BillingRepository;
use mspdash_domain::constants::ACTIVE_USER_STATUS;
use mspdash_domain::{
    Asset, AssetBillingOverride, BillingPlan, Client, ClientBillingOverride, CustomLineItem,
    ManualAsset, ManualUser, Result as DomainResult, TicketDetail, User, UserBillingOverride,
};

#[derive(Default)]
struct Store {
    clients: Vec<Client>,
    plans: Vec<BillingPlan>,
    client_overrides: Vec<ClientBillingOverride>,
    assets: Vec<Asset>,
    manual_assets: Vec<ManualAsset>,
    asset_overrides: Vec<AssetBillingOverride>,
    users: Vec<User>,
    manual_users: Vec<ManualUser>,
    user_overrides: Vec<UserBillingOverride>,
    tickets: Vec<TicketDetail>,
    line_items: Vec<CustomLineItem>,
}

/// In-memory mock for `BillingRepository`.
///
/// Builder methods seed the store; queries clone matching rows.
#[derive(Default, Clone)]
pub struct InMemoryBillingRepository {
    store: Arc<Mutex<Store>>,
}

impl InMemoryBillingRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_client(self, client: Client) -> Self {
        self.store.lock().unwrap().clients.push(client);
        self
    }

    pub fn with_plan(self, plan: BillingPlan) -> Self {
        self.store.lock().unwrap().plans.push(plan);
        self
    }

    pub fn with_client_override(self, record: ClientBillingOverride) -> Self {
        self.store.lock().unwrap().client_overrides.push(record);
        self
    }

    pub fn with_asset(self, asset: Asset) -> Self {
        self.store.lock().unwrap().assets.push(asset);
        self
    }

    pub fn with_manual_asset(self, asset: ManualAsset) -> Self {
        self.store.lock().unwrap().manual_assets.push(asset);
        self
    }

    pub fn with_asset_override(self, record: AssetBillingOverride) -> Self {
        self.store.lock().unwrap().asset_overrides.push(record);
        self
    }

    pub fn with_user(self, user: User) -> Self {
        self.store.lock().unwrap().users.push(user);
        self
    }

    pub fn with_manual_user(self, user: ManualUser) -> Self {
        self.store.lock().unwrap().manual_users.push(user);
        self
    }

    pub fn with_user_override(self, record: UserBillingOverride) -> Self {
        self.store.lock().unwrap().user_overrides.push(record);
        self
    }

    pub fn with_ticket(self, ticket: TicketDetail) -> Self {
        self.store.lock().unwrap().tickets.push(ticket);
        self
    }

    pub fn with_line_item(self, item: CustomLineItem) -> Self {
        self.store.lock().unwrap().line_items.push(item);
        self
    }
}

impl BillingRepository for InMemoryBillingRepository {
    fn find_client(&self, account_number: &str) -> DomainResult<Option<Client>> {
        let store = self.store.lock().unwrap();
        Ok(store.clients.iter().find(|c| c.account_number == account_number).cloned())
    }

    fn list_clients(&self) -> DomainResult<Vec<Client>> {
        let mut clients = self.store.lock().unwrap().clients.clone();
        clients.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(clients)
    }

    fn find_billing_plan(&self, plan: &str, term: &str) -> DomainResult<Option<BillingPlan>> {
        let store = self.store.lock().unwrap();
        Ok(store
            .plans
            .iter()
            .find(|p| p.billing_plan == plan && p.term_length == term)
            .cloned())
    }

    fn find_client_override(
        &self,
        account_number: &str,
    ) -> DomainResult<Option<ClientBillingOverride>> {
        let store = self.store.lock().unwrap();
        Ok(store
            .client_overrides
            .iter()
            .find(|o| o.company_account_number == account_number)
            .cloned())
    }

    fn list_assets(&self, account_number: &str) -> DomainResult<Vec<Asset>> {
        let store = self.store.lock().unwrap();
        let mut assets: Vec<_> = store
            .assets
            .iter()
            .filter(|a| a.company_account_number == account_number)
            .cloned()
            .collect();
        assets.sort_by(|a, b| a.hostname.cmp(&b.hostname));
        Ok(assets)
    }

    fn list_manual_assets(&self, account_number: &str) -> DomainResult<Vec<ManualAsset>> {
        let store = self.store.lock().unwrap();
        let mut assets: Vec<_> = store
            .manual_assets
            .iter()
            .filter(|a| a.company_account_number == account_number)
            .cloned()
            .collect();
        assets.sort_by(|a, b| a.hostname.cmp(&b.hostname));
        Ok(assets)
    }

    fn asset_overrides(
        &self,
        account_number: &str,
    ) -> DomainResult<HashMap<i64, AssetBillingOverride>> {
        let store = self.store.lock().unwrap();
        let owned: Vec<i64> = store
            .assets
            .iter()
            .filter(|a| a.company_account_number == account_number)
            .map(|a| a.id)
            .collect();
        Ok(store
            .asset_overrides
            .iter()
            .filter(|o| owned.contains(&o.asset_id))
            .map(|o| (o.asset_id, o.clone()))
            .collect())
    }

    fn list_active_users(&self, account_number: &str) -> DomainResult<Vec<User>> {
        let store = self.store.lock().unwrap();
        let mut users: Vec<_> = store
            .users
            .iter()
            .filter(|u| u.company_account_number == account_number)
            .filter(|u| u.status.as_deref() == Some(ACTIVE_USER_STATUS))
            .cloned()
            .collect();
        users.sort_by(|a, b| a.full_name.cmp(&b.full_name));
        Ok(users)
    }

    fn list_manual_users(&self, account_number: &str) -> DomainResult<Vec<ManualUser>> {
        let store = self.store.lock().unwrap();
        let mut users: Vec<_> = store
            .manual_users
            .iter()
            .filter(|u| u.company_account_number == account_number)
            .cloned()
            .collect();
        users.sort_by(|a, b| a.full_name.cmp(&b.full_name));
        Ok(users)
    }

    fn user_overrides(
        &self,
        account_number: &str,
    ) -> DomainResult<HashMap<i64, UserBillingOverride>> {
        let store = self.store.lock().unwrap();
        let owned: Vec<i64> = store
            .users
            .iter()
            .filter(|u| u.company_account_number == account_number)
            .map(|u| u.id)
            .collect();
        Ok(store
            .user_overrides
            .iter()
            .filter(|o| owned.contains(&o.user_id))
            .map(|o| (o.user_id, o.clone()))
            .collect())
    }

    fn tickets_for_year(
        &self,
        account_number: &str,
        year: i32,
    ) -> DomainResult<Vec<TicketDetail>> {
        let store = self.store.lock().unwrap();
        Ok(store
            .tickets
            .iter()
            .filter(|t| t.company_account_number == account_number)
            .filter(|t| t.last_updated_at.year() == year)
            .cloned()
            .collect())
    }

    fn list_custom_line_items(&self, account_number: &str) -> DomainResult<Vec<CustomLineItem>> {
        let store = self.store.lock().unwrap();
        let mut items: Vec<_> = store
            .line_items
            .iter()
            .filter(|i| i.company_account_number == account_number)
            .cloned()
            .collect();
        items.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(items)
    }
}
