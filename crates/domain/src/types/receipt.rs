//! Invoice receipt and the full per-client billing package

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::client::Client;
use super::period::BillingPeriod;
use super::rates::EffectiveRates;
use super::ticket::TicketDetail;

/// One itemized invoice row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BilledItem {
    pub name: String,
    #[serde(rename = "type")]
    pub item_type: String,
    pub cost: f64,
}

impl BilledItem {
    pub fn new(name: impl Into<String>, item_type: impl Into<String>, cost: f64) -> Self {
        Self { name: name.into(), item_type: item_type.into(), cost }
    }
}

/// Final invoice for one client and one period.
///
/// Built once by the assembler and never mutated. Field names are the
/// stable shape export consumers rely on.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Receipt {
    pub nmf: f64,
    pub billed_assets: Vec<BilledItem>,
    pub billed_users: Vec<BilledItem>,
    pub billed_line_items: Vec<BilledItem>,
    pub total_asset_charges: f64,
    pub total_user_charges: f64,
    pub total_line_item_charges: f64,
    pub ticket_charge: f64,
    pub backup_charge: f64,
    pub total: f64,
    pub hours_for_billing_period: f64,
    pub prepaid_hours_monthly: f64,
    pub prepaid_hours_yearly: f64,
    pub remaining_yearly_hours: f64,
    pub billable_hours: f64,
    pub backup_base_workstation: f64,
    pub backup_base_server: f64,
    pub total_included_tb: f64,
    pub overage_tb: f64,
    pub overage_charge: f64,
}

/// Backup usage counted across a client's synced assets.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Default)]
pub struct BackupSummary {
    pub total_backup_bytes: i64,
    pub backed_up_workstations: u32,
    pub backed_up_servers: u32,
    pub total_backup_tb: f64,
}

/// Everything a breakdown view needs for one client and period.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClientBilling {
    pub client: Client,
    pub period: BillingPeriod,
    pub effective_rates: EffectiveRates,
    pub receipt: Receipt,
    pub quantities: BTreeMap<String, u32>,
    pub backup: BackupSummary,
    pub tickets_for_period: Vec<TicketDetail>,
    pub hours_this_year: f64,
    pub hours_this_month: f64,
    pub hours_last_month: f64,
    pub contract_end_date: String,
    pub contract_expired: bool,
}

impl ClientBilling {
    pub fn quantity(&self, key: &str) -> u32 {
        self.quantities.get(key).copied().unwrap_or(0)
    }
}
