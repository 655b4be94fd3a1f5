//! Dashboard summary rows, sort keys and paging

use serde::{Deserialize, Serialize};

use crate::constants::DEFAULT_DASHBOARD_PAGE_SIZE;
use crate::impl_label_conversions;

/// Sortable dashboard column. Labels are the query-string names.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum DashboardColumn {
    #[default]
    Name,
    AccountNumber,
    BillingPlan,
    SupportLevel,
    ContractTermLength,
    ContractEndDate,
    Workstations,
    Servers,
    Vms,
    RegularUsers,
    Backup,
    Hours,
    Bill,
}

impl_label_conversions!(DashboardColumn {
    Name => "name",
    AccountNumber => "account_number",
    BillingPlan => "billing_plan",
    SupportLevel => "support_level",
    ContractTermLength => "contract_term_length",
    ContractEndDate => "contract_end_date",
    Workstations => "workstations",
    Servers => "servers",
    Vms => "vms",
    RegularUsers => "regular_users",
    Backup => "backup",
    Hours => "hours",
    Bill => "bill",
});

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    #[default]
    Asc,
    Desc,
}

impl_label_conversions!(SortOrder {
    Asc => "asc",
    Desc => "desc",
});

/// One client's row on the landing dashboard (current month).
///
/// Clients whose plan is not configured keep their identity columns and
/// carry zeros everywhere else, with `plan_configured` false.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct DashboardRow {
    pub account_number: String,
    pub name: Option<String>,
    pub billing_plan: Option<String>,
    pub contract_term_length: Option<String>,
    pub support_level: Option<String>,
    pub contract_end_date: Option<String>,
    pub contract_expired: bool,
    pub workstations: u32,
    pub servers: u32,
    pub vms: u32,
    pub regular_users: u32,
    pub total_hours: f64,
    pub total_backup_bytes: i64,
    pub total_bill: f64,
    pub plan_configured: bool,
}

/// Search, sort and paging request for the dashboard.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DashboardQuery {
    pub search: Option<String>,
    pub sort_by: DashboardColumn,
    pub sort_order: SortOrder,
    pub page: u32,
    pub per_page: u32,
}

impl Default for DashboardQuery {
    fn default() -> Self {
        Self {
            search: None,
            sort_by: DashboardColumn::default(),
            sort_order: SortOrder::default(),
            page: 1,
            per_page: DEFAULT_DASHBOARD_PAGE_SIZE,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DashboardPage {
    pub rows: Vec<DashboardRow>,
    pub page: u32,
    pub per_page: u32,
    pub total_rows: usize,
    pub total_pages: u32,
}
