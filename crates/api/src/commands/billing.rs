//! Billing commands
//!
//! Thin wrappers over [`BillingService`](mspdash_core::BillingService) that
//! parse caller-supplied labels, run on the blocking pool and log the outcome.

use std::sync::Arc;

use mspdash_domain::constants::MAX_DASHBOARD_PAGE_SIZE;
use mspdash_domain::{
    ClientBilling, DashboardColumn, DashboardPage, DashboardQuery, DashboardRow, MspDashError,
    Result as DomainResult, SortOrder,
};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::context::AppContext;
use crate::utils::command_helpers::execute_blocking;

/// Dashboard request as received from a caller, with every field optional.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DashboardPageRequest {
    pub search: Option<String>,
    pub sort_by: Option<String>,
    pub sort_order: Option<String>,
    pub page: Option<u32>,
    pub per_page: Option<u32>,
}

impl DashboardPageRequest {
    /// Resolve labels and defaults into a [`DashboardQuery`].
    ///
    /// Unknown sort columns or orders are rejected with `InvalidInput`.
    pub fn into_query(self, default_page_size: u32) -> DomainResult<DashboardQuery> {
        Ok(DashboardQuery {
            search: self.search.filter(|s| !s.trim().is_empty()),
            sort_by: parse_column(self.sort_by.as_deref())?,
            sort_order: parse_order(self.sort_order.as_deref())?,
            page: self.page.unwrap_or(1).max(1),
            per_page: self.per_page.unwrap_or(default_page_size).clamp(1, MAX_DASHBOARD_PAGE_SIZE),
        })
    }
}

/// Compute the invoice for one client and billing month.
pub async fn compute_invoice(
    ctx: &Arc<AppContext>,
    account_number: String,
    year: i32,
    month: u32,
) -> DomainResult<ClientBilling> {
    execute_blocking(ctx, "billing::compute_invoice", move |ctx| {
        debug!(year, month, "computing invoice");
        ctx.billing.compute_invoice(&account_number, year, month)
    })
    .await
}

/// Every client's figures for the current month, sorted.
///
/// `sort_by` and `sort_order` are column and order labels (`"bill"`,
/// `"desc"`); `None` selects the defaults.
pub async fn compute_dashboard(
    ctx: &Arc<AppContext>,
    sort_by: Option<String>,
    sort_order: Option<String>,
) -> DomainResult<Vec<DashboardRow>> {
    execute_blocking(ctx, "billing::compute_dashboard", move |ctx| {
        let column = parse_column(sort_by.as_deref())?;
        let order = parse_order(sort_order.as_deref())?;
        ctx.billing.compute_dashboard(column, order)
    })
    .await
}

/// Searched, sorted and paginated dashboard.
pub async fn dashboard_page(
    ctx: &Arc<AppContext>,
    request: DashboardPageRequest,
) -> DomainResult<DashboardPage> {
    execute_blocking(ctx, "billing::dashboard_page", move |ctx| {
        let query = request.into_query(ctx.default_page_size())?;
        ctx.billing.dashboard_page(&query)
    })
    .await
}

fn parse_column(label: Option<&str>) -> DomainResult<DashboardColumn> {
    label.map_or(Ok(DashboardColumn::default()), |label| {
        label.parse().map_err(MspDashError::InvalidInput)
    })
}

fn parse_order(label: Option<&str>) -> DomainResult<SortOrder> {
    label.map_or(Ok(SortOrder::default()), |label| {
        label.parse().map_err(MspDashError::InvalidInput)
    })
}
