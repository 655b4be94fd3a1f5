//! Dashboard rows, ordering, search and paging

use std::cmp::Ordering;

use mspdash_domain::constants::{MAX_DASHBOARD_PAGE_SIZE, SUPPORT_LEVEL_UNKNOWN};
use mspdash_domain::{
    Client, ClientBilling, DashboardColumn, DashboardPage, DashboardQuery, DashboardRow, SortOrder,
};

/// Summary row for a client whose billing computed successfully.
pub fn billed_row(billing: &ClientBilling) -> DashboardRow {
    DashboardRow {
        account_number: billing.client.account_number.clone(),
        name: billing.client.name.clone(),
        billing_plan: billing.client.billing_plan.clone(),
        contract_term_length: billing.client.contract_term_length.clone(),
        support_level: Some(billing.effective_rates.support_level_display.clone()),
        contract_end_date: Some(billing.contract_end_date.clone()),
        contract_expired: billing.contract_expired,
        workstations: billing.quantity("workstation"),
        servers: billing.quantity("server"),
        vms: billing.quantity("vm"),
        regular_users: billing.quantity("regular_users"),
        total_hours: billing.hours_this_year,
        total_backup_bytes: billing.backup.total_backup_bytes,
        total_bill: billing.receipt.total,
        plan_configured: true,
    }
}

/// Row for a client with no matching billing plan: identity columns kept,
/// every figure zeroed.
pub fn unconfigured_row(client: &Client, plan: String, term: String) -> DashboardRow {
    DashboardRow {
        account_number: client.account_number.clone(),
        name: client.name.clone(),
        billing_plan: Some(plan),
        contract_term_length: Some(term),
        support_level: Some(
            client.support_level.clone().unwrap_or_else(|| SUPPORT_LEVEL_UNKNOWN.to_string()),
        ),
        plan_configured: false,
        ..DashboardRow::default()
    }
}

#[derive(Debug, PartialEq, PartialOrd)]
enum SortValue<'a> {
    Text(&'a str),
    Count(f64),
}

fn text(value: &Option<String>) -> Option<SortValue<'_>> {
    value.as_deref().map(SortValue::Text)
}

fn sort_value(row: &DashboardRow, column: DashboardColumn) -> Option<SortValue<'_>> {
    match column {
        DashboardColumn::Name => text(&row.name),
        DashboardColumn::AccountNumber => Some(SortValue::Text(&row.account_number)),
        DashboardColumn::BillingPlan => text(&row.billing_plan),
        DashboardColumn::SupportLevel => text(&row.support_level),
        DashboardColumn::ContractTermLength => text(&row.contract_term_length),
        DashboardColumn::ContractEndDate => text(&row.contract_end_date),
        DashboardColumn::Workstations => Some(SortValue::Count(f64::from(row.workstations))),
        DashboardColumn::Servers => Some(SortValue::Count(f64::from(row.servers))),
        DashboardColumn::Vms => Some(SortValue::Count(f64::from(row.vms))),
        DashboardColumn::RegularUsers => Some(SortValue::Count(f64::from(row.regular_users))),
        DashboardColumn::Backup => Some(SortValue::Count(row.total_backup_bytes as f64)),
        DashboardColumn::Hours => Some(SortValue::Count(row.total_hours)),
        DashboardColumn::Bill => Some(SortValue::Count(row.total_bill)),
    }
}

fn compare_values(a: &SortValue<'_>, b: &SortValue<'_>) -> Ordering {
    match (a, b) {
        (SortValue::Text(a), SortValue::Text(b)) => {
            a.to_lowercase().cmp(&b.to_lowercase()).then_with(|| a.cmp(b))
        }
        (SortValue::Count(a), SortValue::Count(b)) => a.total_cmp(b),
        _ => a.partial_cmp(b).unwrap_or(Ordering::Equal),
    }
}

/// Stable sort by `column`. Missing values come first in both directions.
pub fn sort_dashboard_rows(rows: &mut [DashboardRow], column: DashboardColumn, order: SortOrder) {
    rows.sort_by(|a, b| match (sort_value(a, column), sort_value(b, column)) {
        (None, None) => Ordering::Equal,
        (None, Some(_)) => Ordering::Less,
        (Some(_), None) => Ordering::Greater,
        (Some(a), Some(b)) => {
            let ordering = compare_values(&a, &b);
            match order {
                SortOrder::Asc => ordering,
                SortOrder::Desc => ordering.reverse(),
            }
        }
    });
}

/// Keeps rows whose name or account number contains `search`, ignoring case.
pub fn filter_dashboard_rows(rows: Vec<DashboardRow>, search: Option<&str>) -> Vec<DashboardRow> {
    let needle = match search.map(str::trim) {
        Some(needle) if !needle.is_empty() => needle.to_lowercase(),
        _ => return rows,
    };
    rows.into_iter()
        .filter(|row| {
            row.account_number.to_lowercase().contains(&needle)
                || row.name.as_deref().is_some_and(|name| name.to_lowercase().contains(&needle))
        })
        .collect()
}

/// Filters, sorts and slices the rows for one page.
///
/// Page numbers start at 1 (0 is treated as 1). `per_page` is clamped to
/// `1..=MAX_DASHBOARD_PAGE_SIZE`. A page past the end is empty.
pub fn paginate_dashboard(rows: Vec<DashboardRow>, query: &DashboardQuery) -> DashboardPage {
    let mut rows = filter_dashboard_rows(rows, query.search.as_deref());
    sort_dashboard_rows(&mut rows, query.sort_by, query.sort_order);

    let per_page = query.per_page.clamp(1, MAX_DASHBOARD_PAGE_SIZE);
    let page = query.page.max(1);
    let total_rows = rows.len();
    let total_pages = total_rows.div_ceil(per_page as usize).max(1) as u32;

    let offset = (page as usize - 1).saturating_mul(per_page as usize);
    let rows = rows.into_iter().skip(offset).take(per_page as usize).collect();

    DashboardPage { rows, page, per_page, total_rows, total_pages }
}
