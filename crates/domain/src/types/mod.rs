//! Domain types and models

pub mod client;
pub mod dashboard;
pub mod inventory;
pub mod line_item;
pub mod period;
pub mod rates;
pub mod receipt;
pub mod ticket;

pub use client::{Client, ContractTerm};
pub use dashboard::{DashboardColumn, DashboardPage, DashboardQuery, DashboardRow, SortOrder};
pub use inventory::{
    Asset, AssetBillingOverride, AssetBillingType, ItemOverride, ManualAsset, ManualUser, User,
    UserBillingOverride, UserBillingType,
};
pub use line_item::{CustomLineItem, LineItemKind};
pub use period::BillingPeriod;
pub use rates::{
    BillingPlan, ClientBillingOverride, EffectiveRates, FeatureField, FieldOverride, RateField,
};
pub use receipt::{BackupSummary, BilledItem, ClientBilling, Receipt};
pub use ticket::TicketDetail;
