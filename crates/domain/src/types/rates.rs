//! Billing plans, client rate overrides and the effective rate table
//!
//! Rates and feature flags are addressed through two descriptor tables,
//! [`RateField`] and [`FeatureField`]. Each descriptor knows its plan column
//! and the column holding its per-client "override enabled" flag, so the
//! resolver and the storage adapter walk the same static list instead of
//! building keys by hand.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// A numeric field on a billing plan that a client override may replace.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RateField {
    NetworkManagementFee,
    PerUserCost,
    PerServerCost,
    PerWorkstationCost,
    PerVmCost,
    PerSwitchCost,
    PerFirewallCost,
    PerHourTicketCost,
    BackupBaseFeeWorkstation,
    BackupBaseFeeServer,
    BackupIncludedTb,
    BackupPerTbFee,
}

impl RateField {
    /// Every overridable rate, in resolution order.
    pub const ALL: [RateField; 12] = [
        Self::NetworkManagementFee,
        Self::PerUserCost,
        Self::PerServerCost,
        Self::PerWorkstationCost,
        Self::PerVmCost,
        Self::PerSwitchCost,
        Self::PerFirewallCost,
        Self::PerHourTicketCost,
        Self::BackupBaseFeeWorkstation,
        Self::BackupBaseFeeServer,
        Self::BackupIncludedTb,
        Self::BackupPerTbFee,
    ];

    /// Column name on `billing_plans` and `client_billing_overrides`.
    pub const fn column(self) -> &'static str {
        match self {
            Self::NetworkManagementFee => "network_management_fee",
            Self::PerUserCost => "per_user_cost",
            Self::PerServerCost => "per_server_cost",
            Self::PerWorkstationCost => "per_workstation_cost",
            Self::PerVmCost => "per_vm_cost",
            Self::PerSwitchCost => "per_switch_cost",
            Self::PerFirewallCost => "per_firewall_cost",
            Self::PerHourTicketCost => "per_hour_ticket_cost",
            Self::BackupBaseFeeWorkstation => "backup_base_fee_workstation",
            Self::BackupBaseFeeServer => "backup_base_fee_server",
            Self::BackupIncludedTb => "backup_included_tb",
            Self::BackupPerTbFee => "backup_per_tb_fee",
        }
    }

    /// Looks up a rate by its column name.
    pub fn from_column(column: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|field| field.column() == column)
    }

    /// Column on `client_billing_overrides` that switches the override on.
    pub const fn override_flag_column(self) -> &'static str {
        match self {
            Self::NetworkManagementFee => "override_nmf_enabled",
            Self::PerUserCost => "override_puc_enabled",
            Self::PerServerCost => "override_psc_enabled",
            Self::PerWorkstationCost => "override_pwc_enabled",
            Self::PerVmCost => "override_pvc_enabled",
            Self::PerSwitchCost => "override_pswitchc_enabled",
            Self::PerFirewallCost => "override_pfirewallc_enabled",
            Self::PerHourTicketCost => "override_phtc_enabled",
            Self::BackupBaseFeeWorkstation => "override_bbfw_enabled",
            Self::BackupBaseFeeServer => "override_bbfs_enabled",
            Self::BackupIncludedTb => "override_bit_enabled",
            Self::BackupPerTbFee => "override_bpt_enabled",
        }
    }
}

/// A plan-level feature (text option such as `"Not Included"`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FeatureField {
    Antivirus,
    Soc,
    Training,
    Phone,
    Email,
}

impl FeatureField {
    pub const ALL: [FeatureField; 5] =
        [Self::Antivirus, Self::Soc, Self::Training, Self::Phone, Self::Email];

    pub const fn column(self) -> &'static str {
        match self {
            Self::Antivirus => "feature_antivirus",
            Self::Soc => "feature_soc",
            Self::Training => "feature_training",
            Self::Phone => "feature_phone",
            Self::Email => "feature_email",
        }
    }

    pub const fn override_flag_column(self) -> &'static str {
        match self {
            Self::Antivirus => "override_feature_antivirus_enabled",
            Self::Soc => "override_feature_soc_enabled",
            Self::Training => "override_feature_training_enabled",
            Self::Phone => "override_feature_phone_enabled",
            Self::Email => "override_feature_email_enabled",
        }
    }
}

/// Named rate card, unique per `(billing_plan, term_length)`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct BillingPlan {
    pub billing_plan: String,
    pub term_length: String,
    /// Absent keys are NULL columns.
    pub rates: BTreeMap<RateField, f64>,
    pub features: BTreeMap<FeatureField, String>,
}

impl BillingPlan {
    pub fn rate(&self, field: RateField) -> Option<f64> {
        self.rates.get(&field).copied()
    }

    pub fn with_rate(mut self, field: RateField, value: f64) -> Self {
        self.rates.insert(field, value);
        self
    }

    pub fn with_feature(mut self, field: FeatureField, value: impl Into<String>) -> Self {
        self.features.insert(field, value.into());
        self
    }
}

/// One overridable value together with its independent enable flag.
///
/// A stale `value` left behind after the flag is switched off never reaches
/// the effective rate table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldOverride<T> {
    pub value: Option<T>,
    pub enabled: bool,
}

impl<T> Default for FieldOverride<T> {
    fn default() -> Self {
        Self { value: None, enabled: false }
    }
}

impl<T> FieldOverride<T> {
    pub fn enabled(value: T) -> Self {
        Self { value: Some(value), enabled: true }
    }

    pub fn disabled(value: T) -> Self {
        Self { value: Some(value), enabled: false }
    }

    /// `Some(value)` only when the override is switched on. An enabled
    /// override with no value yields `Some(None)`.
    pub fn active(&self) -> Option<Option<&T>> {
        self.enabled.then(|| self.value.as_ref())
    }
}

/// Per-client override record (at most one per client).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct ClientBillingOverride {
    pub company_account_number: String,
    pub billing_plan: FieldOverride<String>,
    pub support_level: FieldOverride<String>,
    pub rates: BTreeMap<RateField, FieldOverride<f64>>,
    pub features: BTreeMap<FeatureField, FieldOverride<String>>,
    pub prepaid_hours_monthly: FieldOverride<f64>,
    pub prepaid_hours_yearly: FieldOverride<f64>,
}

impl ClientBillingOverride {
    pub fn new(company_account_number: impl Into<String>) -> Self {
        Self { company_account_number: company_account_number.into(), ..Self::default() }
    }

    pub fn rate(&self, field: RateField) -> Option<&FieldOverride<f64>> {
        self.rates.get(&field)
    }

    pub fn with_rate(mut self, field: RateField, value: FieldOverride<f64>) -> Self {
        self.rates.insert(field, value);
        self
    }

    pub fn with_feature(mut self, field: FeatureField, value: FieldOverride<String>) -> Self {
        self.features.insert(field, value);
        self
    }

    /// Monthly prepaid hours, 0 unless the override is enabled.
    pub fn effective_prepaid_monthly(&self) -> f64 {
        self.prepaid_hours_monthly.active().flatten().copied().unwrap_or(0.0)
    }

    /// Yearly prepaid hours, 0 unless the override is enabled.
    pub fn effective_prepaid_yearly(&self) -> f64 {
        self.prepaid_hours_yearly.active().flatten().copied().unwrap_or(0.0)
    }
}

/// Plan values merged with the enabled client overrides.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EffectiveRates {
    pub billing_plan: String,
    pub term_length: String,
    pub rates: BTreeMap<RateField, Option<f64>>,
    pub features: BTreeMap<FeatureField, Option<String>>,
    pub prepaid_hours_monthly: f64,
    pub prepaid_hours_yearly: f64,
    pub support_level_display: String,
}

impl EffectiveRates {
    /// Effective numeric rate; missing or NULL reads as 0.
    pub fn rate(&self, field: RateField) -> f64 {
        self.rates.get(&field).copied().flatten().unwrap_or(0.0)
    }

    /// Effective rate when one was set, distinguishing "unset" from 0.
    pub fn rate_opt(&self, field: RateField) -> Option<f64> {
        self.rates.get(&field).copied().flatten()
    }

    pub fn feature(&self, field: FeatureField) -> Option<&str> {
        self.features.get(&field).and_then(|value| value.as_deref())
    }
}
