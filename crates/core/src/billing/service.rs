//! Billing service - loads client records and runs the engine

use std::sync::Arc;

use chrono::Datelike;
use mspdash_domain::{
    BillingPeriod, Client, ClientBilling, DashboardColumn, DashboardPage, DashboardQuery,
    DashboardRow, MspDashError, Result, SortOrder,
};
use tracing::{debug, warn};

use super::dashboard::{billed_row, paginate_dashboard, sort_dashboard_rows, unconfigured_row};
use super::invoice::{compute_client_billing, ClientRecords};
use super::ports::{BillingRepository, Clock};
use super::rates::effective_plan_key;

/// Entry point for invoice and dashboard computations
pub struct BillingService {
    repository: Arc<dyn BillingRepository>,
    clock: Arc<dyn Clock>,
}

impl BillingService {
    /// Create a new billing service
    pub fn new(repository: Arc<dyn BillingRepository>, clock: Arc<dyn Clock>) -> Self {
        Self { repository, clock }
    }

    /// Computes the invoice for `account_number` in `(year, month)`.
    ///
    /// Returns [`MspDashError::ClientNotFound`] for an unknown account and
    /// [`MspDashError::PlanNotConfigured`] when the client's effective
    /// `(plan, term)` has no billing plan row.
    pub fn compute_invoice(
        &self,
        account_number: &str,
        year: i32,
        month: u32,
    ) -> Result<ClientBilling> {
        let period = BillingPeriod::new(year, month)?;
        let records = self.load_records(account_number)?;
        compute_client_billing(&records, period, self.clock.now())
    }

    /// One row per client for the current month, sorted by `sort_by`.
    ///
    /// Clients without a configured plan are listed with zeroed figures.
    pub fn compute_dashboard(
        &self,
        sort_by: DashboardColumn,
        sort_order: SortOrder,
    ) -> Result<Vec<DashboardRow>> {
        let mut rows = self.dashboard_rows()?;
        sort_dashboard_rows(&mut rows, sort_by, sort_order);
        Ok(rows)
    }

    /// Searched, sorted and paginated dashboard.
    pub fn dashboard_page(&self, query: &DashboardQuery) -> Result<DashboardPage> {
        let rows = self.dashboard_rows()?;
        Ok(paginate_dashboard(rows, query))
    }

    fn dashboard_rows(&self) -> Result<Vec<DashboardRow>> {
        let now = self.clock.now();
        let period = BillingPeriod::containing(now);
        let clients = self.repository.list_clients()?;
        debug!(clients = clients.len(), period = %period, "computing billing dashboard");

        let mut rows = Vec::with_capacity(clients.len());
        for client in clients {
            let records = self.records_for(client)?;
            match compute_client_billing(&records, period, now) {
                Ok(billing) => rows.push(billed_row(&billing)),
                Err(MspDashError::PlanNotConfigured { plan, term }) => {
                    warn!(
                        account_number = %records.client.account_number,
                        plan = %plan,
                        term = %term,
                        "billing plan not configured"
                    );
                    rows.push(unconfigured_row(&records.client, plan, term));
                }
                Err(err) => return Err(err),
            }
        }
        Ok(rows)
    }

    fn load_records(&self, account_number: &str) -> Result<ClientRecords> {
        let client = self
            .repository
            .find_client(account_number)?
            .ok_or_else(|| MspDashError::ClientNotFound(account_number.to_string()))?;
        self.records_for(client)
    }

    fn records_for(&self, client: Client) -> Result<ClientRecords> {
        let repo = &self.repository;
        let account = client.account_number.clone();

        let overrides = repo.find_client_override(&account)?;
        let (plan_name, term) = effective_plan_key(&client, overrides.as_ref());
        let plan = repo.find_billing_plan(&plan_name, &term)?;
        if plan.is_none() {
            return Ok(ClientRecords { client, plan, overrides, ..ClientRecords::default() });
        }

        // Ticket history is anchored to the clock's year, not the period's.
        let ticket_year = self.clock.now().year();

        Ok(ClientRecords {
            plan,
            overrides,
            assets: repo.list_assets(&account)?,
            manual_assets: repo.list_manual_assets(&account)?,
            asset_overrides: repo.asset_overrides(&account)?,
            users: repo.list_active_users(&account)?,
            manual_users: repo.list_manual_users(&account)?,
            user_overrides: repo.user_overrides(&account)?,
            tickets_this_year: repo.tickets_for_year(&account, ticket_year)?,
            custom_line_items: repo.list_custom_line_items(&account)?,
            client,
        })
    }
}
