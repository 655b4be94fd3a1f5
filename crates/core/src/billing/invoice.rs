//! Invoice assembly
//!
//! [`compute_client_billing`] is a pure function of the records loaded for
//! one client, the requested period and "now". The service layer does the
//! loading; everything here is deterministic for identical inputs.

use std::collections::{BTreeMap, HashMap};

use chrono::{DateTime, Utc};
use mspdash_domain::{
    Asset, AssetBillingOverride, BillingPeriod, BillingPlan, Client, ClientBilling,
    ClientBillingOverride, CustomLineItem, EffectiveRates, ManualAsset, ManualUser,
    MspDashError, RateField, Receipt, Result, TicketDetail, User, UserBillingOverride,
};

use super::backup::{bill_backups, BackupCharges};
use super::contract::contract_end_date;
use super::custom_items::{select_custom_line_items, LineItemCharges};
use super::line_items::{aggregate_assets, aggregate_users, ItemCharges};
use super::rates::{effective_plan_key, resolve_rates};
use super::tickets::{bill_ticket_hours, summarize_ticket_hours, TicketCharges};

/// Everything read from the store for one client.
#[derive(Debug, Clone, Default)]
pub struct ClientRecords {
    pub client: Client,
    /// Plan row for the effective `(plan, term)` key, if one exists.
    pub plan: Option<BillingPlan>,
    pub overrides: Option<ClientBillingOverride>,
    pub assets: Vec<Asset>,
    pub manual_assets: Vec<ManualAsset>,
    pub asset_overrides: HashMap<i64, AssetBillingOverride>,
    pub users: Vec<User>,
    pub manual_users: Vec<ManualUser>,
    pub user_overrides: HashMap<i64, UserBillingOverride>,
    /// Tickets for the calendar year of "now", not of the billing period.
    pub tickets_this_year: Vec<TicketDetail>,
    pub custom_line_items: Vec<CustomLineItem>,
}

/// Sums every component into the final receipt.
pub fn assemble_receipt(
    rates: &EffectiveRates,
    assets: ItemCharges,
    users: ItemCharges,
    tickets: &TicketCharges,
    backup: &BackupCharges,
    line_items: LineItemCharges,
) -> Receipt {
    let nmf = rates.rate(RateField::NetworkManagementFee);
    let total = nmf
        + assets.total
        + users.total
        + tickets.ticket_charge
        + backup.backup_charge
        + line_items.total;

    Receipt {
        nmf,
        total_asset_charges: assets.total,
        total_user_charges: users.total,
        total_line_item_charges: line_items.total,
        billed_assets: assets.items,
        billed_users: users.items,
        billed_line_items: line_items.items,
        ticket_charge: tickets.ticket_charge,
        backup_charge: backup.backup_charge,
        total,
        hours_for_billing_period: tickets.hours_for_period,
        prepaid_hours_monthly: rates.prepaid_hours_monthly,
        prepaid_hours_yearly: rates.prepaid_hours_yearly,
        remaining_yearly_hours: tickets.remaining_yearly_hours,
        billable_hours: tickets.billable_hours,
        backup_base_workstation: backup.base_workstation,
        backup_base_server: backup.base_server,
        total_included_tb: backup.included_tb,
        overage_tb: backup.overage_tb,
        overage_charge: backup.overage_charge,
    }
}

/// Runs the full billing computation for one client and period.
///
/// Fails with [`MspDashError::PlanNotConfigured`] when `records.plan` is
/// absent. The client's plan and term in the result are the effective ones.
pub fn compute_client_billing(
    records: &ClientRecords,
    period: BillingPeriod,
    now: DateTime<Utc>,
) -> Result<ClientBilling> {
    let (plan_name, term) = effective_plan_key(&records.client, records.overrides.as_ref());
    let Some(plan) = records.plan.as_ref() else {
        return Err(MspDashError::PlanNotConfigured { plan: plan_name, term });
    };

    let rates = resolve_rates(plan, records.overrides.as_ref());

    let assets = aggregate_assets(
        &records.assets,
        &records.manual_assets,
        &records.asset_overrides,
        &rates,
    );
    let users =
        aggregate_users(&records.users, &records.manual_users, &records.user_overrides, &rates);
    let tickets = bill_ticket_hours(
        &records.tickets_this_year,
        period,
        rates.rate(RateField::PerHourTicketCost),
        rates.prepaid_hours_monthly,
        rates.prepaid_hours_yearly,
    );
    let backup = bill_backups(&records.assets, &rates);
    let line_items = select_custom_line_items(&records.custom_line_items, period);

    let mut quantities: BTreeMap<String, u32> = BTreeMap::new();
    for (key, count) in assets.quantities.iter().chain(users.quantities.iter()) {
        *quantities.entry(key.clone()).or_insert(0) += count;
    }

    let summary = summarize_ticket_hours(&records.tickets_this_year, now);
    let contract = contract_end_date(&records.client, now.date_naive());

    let client = Client {
        billing_plan: Some(plan_name),
        contract_term_length: Some(term),
        ..records.client.clone()
    };

    let receipt = assemble_receipt(&rates, assets, users, &tickets, &backup, line_items);

    Ok(ClientBilling {
        client,
        period,
        effective_rates: rates,
        receipt,
        quantities,
        backup: backup.summary,
        tickets_for_period: tickets.tickets_for_period,
        hours_this_year: summary.hours_this_year,
        hours_this_month: summary.hours_this_month,
        hours_last_month: summary.hours_last_month,
        contract_end_date: contract.display,
        contract_expired: contract.expired,
    })
}
