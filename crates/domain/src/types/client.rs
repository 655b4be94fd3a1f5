//! Client (company) records and contract terms

use serde::{Deserialize, Serialize};

use crate::constants::DEFAULT_CONTRACT_TERM;
use crate::impl_label_conversions;

/// Contract term length stored on a client and keyed on a billing plan.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ContractTerm {
    #[serde(rename = "1-Year")]
    OneYear,
    #[serde(rename = "2-Year")]
    TwoYear,
    #[serde(rename = "3-Year")]
    ThreeYear,
    #[serde(rename = "Month to Month")]
    MonthToMonth,
}

impl_label_conversions!(ContractTerm {
    OneYear => "1-Year",
    TwoYear => "2-Year",
    ThreeYear => "3-Year",
    MonthToMonth => "Month to Month",
});

impl ContractTerm {
    /// Exact-match lookup of a stored term. Plan rows are keyed on the same
    /// exact text, so `"1-year"` is not a known term here.
    pub fn from_label(label: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|term| term.as_str() == label)
    }

    /// Length of a fixed term in whole years. `None` for month to month.
    pub const fn years(self) -> Option<i32> {
        match self {
            Self::OneYear => Some(1),
            Self::TwoYear => Some(2),
            Self::ThreeYear => Some(3),
            Self::MonthToMonth => None,
        }
    }
}

/// A billed company, keyed by its PSA account number.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct Client {
    pub account_number: String,
    pub name: Option<String>,
    pub billing_plan: Option<String>,
    pub contract_term_length: Option<String>,
    /// ISO date, optionally followed by a time part (`2024-03-01T00:00:00`).
    pub contract_start_date: Option<String>,
    pub support_level: Option<String>,
}

impl Client {
    pub fn new(account_number: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            account_number: account_number.into(),
            name: Some(name.into()),
            ..Self::default()
        }
    }

    /// Stored term, or month to month when blank.
    pub fn term_or_default(&self) -> &str {
        match self.contract_term_length.as_deref().map(str::trim) {
            Some(term) if !term.is_empty() => term,
            _ => DEFAULT_CONTRACT_TERM,
        }
    }

    /// Stored plan name, trimmed. Empty when unset.
    pub fn plan_name(&self) -> &str {
        self.billing_plan.as_deref().map(str::trim).unwrap_or_default()
    }
}
