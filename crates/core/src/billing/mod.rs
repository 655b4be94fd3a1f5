//! Billing engine
//!
//! Rate resolution, line-item aggregation, ticket-hour and backup billing,
//! custom line items, receipt assembly and the client dashboard.

pub mod backup;
pub mod contract;
pub mod custom_items;
pub mod dashboard;
pub mod invoice;
pub mod line_items;
pub mod ports;
pub mod rates;
pub mod service;
pub mod tickets;

pub use backup::{bill_backups, BackupCharges};
pub use contract::{contract_end_date, ContractEnd};
pub use custom_items::{match_line_item, select_custom_line_items, LineItemCharges};
pub use dashboard::{filter_dashboard_rows, paginate_dashboard, sort_dashboard_rows};
pub use invoice::{assemble_receipt, compute_client_billing, ClientRecords};
pub use line_items::{aggregate_assets, aggregate_users, ItemCharges};
pub use ports::{BillingRepository, Clock, SystemClock};
pub use rates::{effective_plan_key, resolve_rates};
pub use service::BillingService;
pub use tickets::{bill_ticket_hours, summarize_ticket_hours, TicketCharges, TicketSummary};
