//! Operator-defined custom charges

use serde::{Deserialize, Serialize};

use crate::impl_label_conversions;

/// Billing mode a custom line item matched under.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LineItemKind {
    Recurring,
    #[serde(rename = "One-Off")]
    OneOff,
    Yearly,
}

impl_label_conversions!(LineItemKind {
    Recurring => "Recurring",
    OneOff => "One-Off",
    Yearly => "Yearly",
});

/// A custom charge attached to a client.
///
/// Exactly one mode is meant to be populated: `monthly_fee`, the one-off
/// fee with its target month, or the yearly fee with its bill month.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct CustomLineItem {
    pub id: i64,
    pub company_account_number: String,
    pub name: String,
    pub monthly_fee: Option<f64>,
    pub one_off_fee: Option<f64>,
    pub one_off_year: Option<i32>,
    pub one_off_month: Option<u32>,
    pub yearly_fee: Option<f64>,
    pub yearly_bill_month: Option<u32>,
    /// Stored but not consulted when matching.
    pub yearly_bill_day: Option<u32>,
}

impl CustomLineItem {
    pub fn recurring(name: impl Into<String>, fee: f64) -> Self {
        Self { name: name.into(), monthly_fee: Some(fee), ..Self::default() }
    }

    pub fn one_off(name: impl Into<String>, fee: f64, year: i32, month: u32) -> Self {
        Self {
            name: name.into(),
            one_off_fee: Some(fee),
            one_off_year: Some(year),
            one_off_month: Some(month),
            ..Self::default()
        }
    }

    pub fn yearly(name: impl Into<String>, fee: f64, month: u32, day: u32) -> Self {
        Self {
            name: name.into(),
            yearly_fee: Some(fee),
            yearly_bill_month: Some(month),
            yearly_bill_day: Some(day),
            ..Self::default()
        }
    }
}
