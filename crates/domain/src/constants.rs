//! Application constants
//!
//! Centralized location for domain-level constants shared by the billing
//! engine, the storage adapter and the command layer.

/// Bytes in one binary terabyte (2^40). Backup usage is reported in TiB.
pub const BYTES_PER_TB: f64 = 1_099_511_627_776.0;

/// Included backup allowance per backed-up device when the effective rate
/// table leaves `backup_included_tb` unset or zero.
pub const DEFAULT_BACKUP_INCLUDED_TB: f64 = 1.0;

/// Contract term assumed when a client has none recorded.
pub const DEFAULT_CONTRACT_TERM: &str = "Month to Month";

// Contract end date display values
pub const CONTRACT_END_NOT_SET: &str = "N/A";
pub const CONTRACT_END_MONTH_TO_MONTH: &str = "Month to Month";
pub const CONTRACT_END_INVALID: &str = "Invalid Start Date";

// Support level display values
pub const SUPPORT_LEVEL_UNLIMITED: &str = "Unlimited";
pub const SUPPORT_LEVEL_HOURLY: &str = "Billed Hourly";
pub const SUPPORT_LEVEL_UNKNOWN: &str = "N/A";

// Quantity tally keys for users
pub const QUANTITY_REGULAR_USERS: &str = "regular_users";
pub const QUANTITY_FREE_USERS: &str = "free_users";

/// Status value a synced user must carry to be billed.
pub const ACTIVE_USER_STATUS: &str = "Active";

// Dashboard paging
pub const DEFAULT_DASHBOARD_PAGE_SIZE: u32 = 50;
pub const MAX_DASHBOARD_PAGE_SIZE: u32 = 500;
