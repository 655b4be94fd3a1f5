//! Billable inventory: assets, users and their per-item overrides

use serde::{Deserialize, Serialize};

use super::rates::RateField;

/// How an asset is charged.
///
/// Labels outside the exact known set are kept verbatim in
/// [`Other`](Self::Other) and billed at the `per_<type>_cost` rate, with the
/// type lower-cased, if such a rate exists, else 0.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AssetBillingType {
    Workstation,
    Server,
    #[serde(rename = "VM")]
    Vm,
    Switch,
    Firewall,
    Custom,
    #[serde(rename = "No Charge")]
    NoCharge,
    Other(String),
}

impl AssetBillingType {
    /// Parses a stored label exactly as written. Empty input means "not set".
    pub fn parse(label: &str) -> Option<Self> {
        if label.is_empty() {
            return None;
        }
        Some(match label {
            "Workstation" => Self::Workstation,
            "Server" => Self::Server,
            "VM" => Self::Vm,
            "Switch" => Self::Switch,
            "Firewall" => Self::Firewall,
            "Custom" => Self::Custom,
            "No Charge" => Self::NoCharge,
            other => Self::Other(other.to_string()),
        })
    }

    pub fn as_str(&self) -> &str {
        match self {
            Self::Workstation => "Workstation",
            Self::Server => "Server",
            Self::Vm => "VM",
            Self::Switch => "Switch",
            Self::Firewall => "Firewall",
            Self::Custom => "Custom",
            Self::NoCharge => "No Charge",
            Self::Other(label) => label,
        }
    }

    /// Per-unit rate billed for this type, if any.
    pub fn rate_field(&self) -> Option<RateField> {
        match self {
            Self::Workstation => Some(RateField::PerWorkstationCost),
            Self::Server => Some(RateField::PerServerCost),
            Self::Vm => Some(RateField::PerVmCost),
            Self::Switch => Some(RateField::PerSwitchCost),
            Self::Firewall => Some(RateField::PerFirewallCost),
            Self::Other(label) => {
                RateField::from_column(&format!("per_{}_cost", label.to_lowercase()))
            }
            Self::Custom | Self::NoCharge => None,
        }
    }

    /// Key used in the quantities tally.
    pub fn quantity_key(&self) -> String {
        self.as_str().to_lowercase()
    }
}

impl std::fmt::Display for AssetBillingType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// How a user is charged.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum UserBillingType {
    Paid,
    Free,
    Custom,
    Other(String),
}

impl UserBillingType {
    pub fn parse(label: &str) -> Option<Self> {
        let label = label.trim();
        if label.is_empty() {
            return None;
        }
        Some(match label {
            "Paid" => Self::Paid,
            "Free" => Self::Free,
            "Custom" => Self::Custom,
            other => Self::Other(other.to_string()),
        })
    }

    pub fn as_str(&self) -> &str {
        match self {
            Self::Paid => "Paid",
            Self::Free => "Free",
            Self::Custom => "Custom",
            Self::Other(label) => label,
        }
    }
}

impl std::fmt::Display for UserBillingType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Device synced from the RMM platform.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct Asset {
    pub id: i64,
    pub company_account_number: String,
    pub hostname: String,
    pub billing_type: Option<String>,
    pub backup_data_bytes: Option<i64>,
}

impl Asset {
    pub fn backup_bytes(&self) -> i64 {
        self.backup_data_bytes.unwrap_or(0)
    }
}

/// Device entered by an operator. Its own billing type and cost act as the
/// override, so there is no separate override record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct ManualAsset {
    pub id: i64,
    pub company_account_number: String,
    pub hostname: String,
    pub billing_type: Option<String>,
    pub custom_cost: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct AssetBillingOverride {
    pub asset_id: i64,
    pub billing_type: Option<String>,
    pub custom_cost: Option<f64>,
}

/// User synced from the PSA platform.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct User {
    pub id: i64,
    pub company_account_number: String,
    pub full_name: String,
    pub status: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct ManualUser {
    pub id: i64,
    pub company_account_number: String,
    pub full_name: String,
    pub billing_type: Option<String>,
    pub custom_cost: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct UserBillingOverride {
    pub user_id: i64,
    pub billing_type: Option<String>,
    pub custom_cost: Option<f64>,
}

/// The per-item override view shared by synced-item override records and
/// manual items.
pub trait ItemOverride {
    fn billing_type(&self) -> Option<&str>;
    fn custom_cost(&self) -> Option<f64>;
}

macro_rules! impl_item_override {
    ($($ty:ty),+ $(,)?) => {
        $(
            impl ItemOverride for $ty {
                fn billing_type(&self) -> Option<&str> {
                    self.billing_type.as_deref()
                }

                fn custom_cost(&self) -> Option<f64> {
                    self.custom_cost
                }
            }
        )+
    };
}

impl_item_override!(ManualAsset, AssetBillingOverride, ManualUser, UserBillingOverride);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn asset_labels_parse_to_known_types() {
        assert_eq!(AssetBillingType::parse("VM"), Some(AssetBillingType::Vm));
        assert_eq!(AssetBillingType::parse("No Charge"), Some(AssetBillingType::NoCharge));
        assert_eq!(AssetBillingType::parse(""), None);
        assert_eq!(
            AssetBillingType::parse("Printer"),
            Some(AssetBillingType::Other("Printer".into()))
        );
    }

    #[test]
    fn quantity_keys_are_lowercase() {
        assert_eq!(AssetBillingType::Vm.quantity_key(), "vm");
        assert_eq!(AssetBillingType::NoCharge.quantity_key(), "no charge");
    }

    #[test]
    fn only_rated_types_map_to_rate_fields() {
        assert_eq!(AssetBillingType::Server.rate_field(), Some(RateField::PerServerCost));
        assert_eq!(AssetBillingType::Custom.rate_field(), None);
        assert_eq!(AssetBillingType::NoCharge.rate_field(), None);
    }

    #[test]
    fn other_labels_resolve_rates_by_lowercased_name() {
        let rate = |label: &str| AssetBillingType::parse(label).and_then(|t| t.rate_field());
        assert_eq!(rate("workstation"), Some(RateField::PerWorkstationCost));
        assert_eq!(rate("SERVER"), Some(RateField::PerServerCost));
        assert_eq!(rate("vm"), Some(RateField::PerVmCost));
        assert_eq!(rate("custom"), None);
        assert_eq!(rate("no charge"), None);
        assert_eq!(rate(" Server"), None);
    }

    #[test]
    fn labels_are_not_trimmed() {
        assert_eq!(
            AssetBillingType::parse(" Server"),
            Some(AssetBillingType::Other(" Server".into()))
        );
        assert_eq!(
            AssetBillingType::parse("custom"),
            Some(AssetBillingType::Other("custom".into()))
        );
    }

    #[test]
    fn user_labels_parse() {
        assert_eq!(UserBillingType::parse("Free"), Some(UserBillingType::Free));
        assert_eq!(UserBillingType::parse(" "), None);
        assert_eq!(UserBillingType::Paid.to_string(), "Paid");
    }
}
