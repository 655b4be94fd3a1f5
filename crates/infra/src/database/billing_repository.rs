//! SQLCipher-backed billing repository.
//!
//! Implements the read-only `BillingRepository` port over the synced tables.
//! Plan and override columns are selected through the `RateField` and
//! `FeatureField` descriptor tables, so adding a rate means adding a column
//! and a descriptor, never editing SQL here.

use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use mspdash_common::storage::StorageError;
use mspdash_core::BillingRepository;
use mspdash_domain::constants::ACTIVE_USER_STATUS;
use mspdash_domain::{
    Asset, AssetBillingOverride, BillingPlan, Client, ClientBillingOverride, CustomLineItem,
    FeatureField, FieldOverride, ManualAsset, ManualUser, RateField, Result as DomainResult,
    TicketDetail, User, UserBillingOverride,
};
use rusqlite::Row;
use tracing::warn;

use super::manager::DbManager;

const CLIENT_COLUMNS: &str = "account_number, name, billing_plan, contract_term_length, \
                              contract_start_date, support_level";

/// `BillingRepository` over the encrypted store.
pub struct SqlCipherBillingRepository {
    db: Arc<DbManager>,
}

impl SqlCipherBillingRepository {
    /// Create a new repository with the given database manager.
    pub fn new(db: Arc<DbManager>) -> Self {
        Self { db }
    }
}

impl BillingRepository for SqlCipherBillingRepository {
    fn find_client(&self, account_number: &str) -> DomainResult<Option<Client>> {
        self.db.with_connection("find_client", |conn| {
            let sql = format!("SELECT {CLIENT_COLUMNS} FROM companies WHERE account_number = ?1");
            optional(conn.query_row(&sql, &[&account_number], map_client))
        })
    }

    fn list_clients(&self) -> DomainResult<Vec<Client>> {
        self.db.with_connection("list_clients", |conn| {
            let sql = format!("SELECT {CLIENT_COLUMNS} FROM companies ORDER BY name");
            conn.query_map(&sql, &[], map_client)
        })
    }

    fn find_billing_plan(&self, plan: &str, term: &str) -> DomainResult<Option<BillingPlan>> {
        self.db.with_connection("find_billing_plan", |conn| {
            let sql = format!(
                "SELECT billing_plan, term_length, {} FROM billing_plans \
                 WHERE billing_plan = ?1 AND term_length = ?2",
                plan_value_columns()
            );
            optional(conn.query_row(&sql, &[&plan, &term], map_billing_plan))
        })
    }

    fn find_client_override(
        &self,
        account_number: &str,
    ) -> DomainResult<Option<ClientBillingOverride>> {
        self.db.with_connection("find_client_override", |conn| {
            let sql = format!(
                "SELECT company_account_number, billing_plan, override_billing_plan_enabled, \
                 support_level, override_support_level_enabled, prepaid_hours_monthly, \
                 override_prepaid_hours_monthly_enabled, prepaid_hours_yearly, \
                 override_prepaid_hours_yearly_enabled, {} \
                 FROM client_billing_overrides WHERE company_account_number = ?1",
                override_value_columns()
            );
            optional(conn.query_row(&sql, &[&account_number], map_client_override))
        })
    }

    fn list_assets(&self, account_number: &str) -> DomainResult<Vec<Asset>> {
        self.db.with_connection("list_assets", |conn| {
            conn.query_map(
                "SELECT id, company_account_number, hostname, billing_type, backup_data_bytes \
                 FROM assets WHERE company_account_number = ?1 ORDER BY hostname",
                &[&account_number],
                |row| {
                    Ok(Asset {
                        id: row.get("id")?,
                        company_account_number: row.get("company_account_number")?,
                        hostname: text_or_empty(row, "hostname")?,
                        billing_type: row.get("billing_type")?,
                        backup_data_bytes: row.get("backup_data_bytes")?,
                    })
                },
            )
        })
    }

    fn list_manual_assets(&self, account_number: &str) -> DomainResult<Vec<ManualAsset>> {
        self.db.with_connection("list_manual_assets", |conn| {
            conn.query_map(
                "SELECT id, company_account_number, hostname, billing_type, custom_cost \
                 FROM manual_assets WHERE company_account_number = ?1 ORDER BY hostname",
                &[&account_number],
                |row| {
                    Ok(ManualAsset {
                        id: row.get("id")?,
                        company_account_number: row.get("company_account_number")?,
                        hostname: text_or_empty(row, "hostname")?,
                        billing_type: row.get("billing_type")?,
                        custom_cost: row.get("custom_cost")?,
                    })
                },
            )
        })
    }

    fn asset_overrides(
        &self,
        account_number: &str,
    ) -> DomainResult<HashMap<i64, AssetBillingOverride>> {
        let rows = self.db.with_connection("asset_overrides", |conn| {
            conn.query_map(
                "SELECT o.asset_id, o.billing_type, o.custom_cost \
                 FROM asset_billing_overrides o JOIN assets a ON a.id = o.asset_id \
                 WHERE a.company_account_number = ?1",
                &[&account_number],
                |row| {
                    Ok(AssetBillingOverride {
                        asset_id: row.get("asset_id")?,
                        billing_type: row.get("billing_type")?,
                        custom_cost: row.get("custom_cost")?,
                    })
                },
            )
        })?;
        Ok(rows.into_iter().map(|record| (record.asset_id, record)).collect())
    }

    fn list_active_users(&self, account_number: &str) -> DomainResult<Vec<User>> {
        self.db.with_connection("list_active_users", |conn| {
            conn.query_map(
                "SELECT id, company_account_number, full_name, status FROM users \
                 WHERE company_account_number = ?1 AND status = ?2 ORDER BY full_name",
                &[&account_number, &ACTIVE_USER_STATUS],
                |row| {
                    Ok(User {
                        id: row.get("id")?,
                        company_account_number: row.get("company_account_number")?,
                        full_name: text_or_empty(row, "full_name")?,
                        status: row.get("status")?,
                    })
                },
            )
        })
    }

    fn list_manual_users(&self, account_number: &str) -> DomainResult<Vec<ManualUser>> {
        self.db.with_connection("list_manual_users", |conn| {
            conn.query_map(
                "SELECT id, company_account_number, full_name, billing_type, custom_cost \
                 FROM manual_users WHERE company_account_number = ?1 ORDER BY full_name",
                &[&account_number],
                |row| {
                    Ok(ManualUser {
                        id: row.get("id")?,
                        company_account_number: row.get("company_account_number")?,
                        full_name: text_or_empty(row, "full_name")?,
                        billing_type: row.get("billing_type")?,
                        custom_cost: row.get("custom_cost")?,
                    })
                },
            )
        })
    }

    fn user_overrides(
        &self,
        account_number: &str,
    ) -> DomainResult<HashMap<i64, UserBillingOverride>> {
        let rows = self.db.with_connection("user_overrides", |conn| {
            conn.query_map(
                "SELECT o.user_id, o.billing_type, o.custom_cost \
                 FROM user_billing_overrides o JOIN users u ON u.id = o.user_id \
                 WHERE u.company_account_number = ?1",
                &[&account_number],
                |row| {
                    Ok(UserBillingOverride {
                        user_id: row.get("user_id")?,
                        billing_type: row.get("billing_type")?,
                        custom_cost: row.get("custom_cost")?,
                    })
                },
            )
        })?;
        Ok(rows.into_iter().map(|record| (record.user_id, record)).collect())
    }

    fn tickets_for_year(
        &self,
        account_number: &str,
        year: i32,
    ) -> DomainResult<Vec<TicketDetail>> {
        let year_text = format!("{year:04}");
        let rows = self.db.with_connection("tickets_for_year", |conn| {
            conn.query_map(
                "SELECT ticket_id, company_account_number, subject, last_updated_at, \
                 total_hours_spent FROM ticket_details \
                 WHERE company_account_number = ?1 AND strftime('%Y', last_updated_at) = ?2 \
                 ORDER BY last_updated_at, ticket_id",
                &[&account_number, &year_text],
                |row| {
                    Ok(RawTicket {
                        ticket_id: row.get("ticket_id")?,
                        company_account_number: row.get("company_account_number")?,
                        subject: row.get("subject")?,
                        last_updated_at: row.get("last_updated_at")?,
                        total_hours_spent: row.get("total_hours_spent")?,
                    })
                },
            )
        })?;

        Ok(rows.into_iter().filter_map(RawTicket::into_ticket).collect())
    }

    fn list_custom_line_items(&self, account_number: &str) -> DomainResult<Vec<CustomLineItem>> {
        self.db.with_connection("list_custom_line_items", |conn| {
            conn.query_map(
                "SELECT id, company_account_number, name, monthly_fee, one_off_fee, \
                 one_off_year, one_off_month, yearly_fee, yearly_bill_month, yearly_bill_day \
                 FROM custom_line_items WHERE company_account_number = ?1 ORDER BY name, id",
                &[&account_number],
                |row| {
                    Ok(CustomLineItem {
                        id: row.get("id")?,
                        company_account_number: row.get("company_account_number")?,
                        name: row.get("name")?,
                        monthly_fee: row.get("monthly_fee")?,
                        one_off_fee: row.get("one_off_fee")?,
                        one_off_year: row.get("one_off_year")?,
                        one_off_month: row.get("one_off_month")?,
                        yearly_fee: row.get("yearly_fee")?,
                        yearly_bill_month: row.get("yearly_bill_month")?,
                        yearly_bill_day: row.get("yearly_bill_day")?,
                    })
                },
            )
        })
    }
}

// ============================================================================
// Row mapping
// ============================================================================

struct RawTicket {
    ticket_id: i64,
    company_account_number: String,
    subject: Option<String>,
    last_updated_at: Option<String>,
    total_hours_spent: Option<f64>,
}

impl RawTicket {
    fn into_ticket(self) -> Option<TicketDetail> {
        let Some(last_updated_at) = self.last_updated_at.as_deref().and_then(parse_timestamp)
        else {
            warn!(
                ticket_id = self.ticket_id,
                last_updated_at = ?self.last_updated_at,
                "skipping ticket with unparseable timestamp"
            );
            return None;
        };

        Some(TicketDetail {
            ticket_id: self.ticket_id,
            company_account_number: self.company_account_number,
            subject: self.subject,
            last_updated_at,
            total_hours_spent: self.total_hours_spent,
        })
    }
}

/// Parse the timestamp formats the sync jobs write: RFC 3339, naive
/// `YYYY-MM-DD[T ]HH:MM:SS[.f]` taken as UTC, or a bare date at midnight.
fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    let raw = raw.trim();
    if let Ok(parsed) = DateTime::parse_from_rfc3339(raw) {
        return Some(parsed.with_timezone(&Utc));
    }
    for format in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"] {
        if let Ok(naive) = NaiveDateTime::parse_from_str(raw, format) {
            return Some(naive.and_utc());
        }
    }
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
}

fn map_client(row: &Row<'_>) -> rusqlite::Result<Client> {
    Ok(Client {
        account_number: row.get("account_number")?,
        name: row.get("name")?,
        billing_plan: row.get("billing_plan")?,
        contract_term_length: row.get("contract_term_length")?,
        contract_start_date: row.get("contract_start_date")?,
        support_level: row.get("support_level")?,
    })
}

fn map_billing_plan(row: &Row<'_>) -> rusqlite::Result<BillingPlan> {
    let mut rates = BTreeMap::new();
    for field in RateField::ALL {
        if let Some(value) = row.get::<_, Option<f64>>(field.column())? {
            rates.insert(field, value);
        }
    }

    let mut features = BTreeMap::new();
    for field in FeatureField::ALL {
        if let Some(value) = row.get::<_, Option<String>>(field.column())? {
            features.insert(field, value);
        }
    }

    Ok(BillingPlan {
        billing_plan: row.get("billing_plan")?,
        term_length: row.get("term_length")?,
        rates,
        features,
    })
}

fn map_client_override(row: &Row<'_>) -> rusqlite::Result<ClientBillingOverride> {
    let mut rates = BTreeMap::new();
    for field in RateField::ALL {
        rates.insert(field, field_override(row, field.column(), field.override_flag_column())?);
    }

    let mut features = BTreeMap::new();
    for field in FeatureField::ALL {
        features.insert(field, field_override(row, field.column(), field.override_flag_column())?);
    }

    Ok(ClientBillingOverride {
        company_account_number: row.get("company_account_number")?,
        billing_plan: field_override(row, "billing_plan", "override_billing_plan_enabled")?,
        support_level: field_override(row, "support_level", "override_support_level_enabled")?,
        rates,
        features,
        prepaid_hours_monthly: field_override(
            row,
            "prepaid_hours_monthly",
            "override_prepaid_hours_monthly_enabled",
        )?,
        prepaid_hours_yearly: field_override(
            row,
            "prepaid_hours_yearly",
            "override_prepaid_hours_yearly_enabled",
        )?,
    })
}

fn field_override<T: rusqlite::types::FromSql>(
    row: &Row<'_>,
    value_column: &str,
    flag_column: &str,
) -> rusqlite::Result<FieldOverride<T>> {
    Ok(FieldOverride {
        value: row.get(value_column)?,
        enabled: row.get::<_, Option<bool>>(flag_column)?.unwrap_or(false),
    })
}

fn text_or_empty(row: &Row<'_>, column: &str) -> rusqlite::Result<String> {
    Ok(row.get::<_, Option<String>>(column)?.unwrap_or_default())
}

fn plan_value_columns() -> String {
    RateField::ALL
        .iter()
        .map(|field| field.column())
        .chain(FeatureField::ALL.iter().map(|field| field.column()))
        .collect::<Vec<_>>()
        .join(", ")
}

fn override_value_columns() -> String {
    let rates = RateField::ALL.map(|field| [field.column(), field.override_flag_column()]);
    let features = FeatureField::ALL.map(|field| [field.column(), field.override_flag_column()]);

    rates.iter().chain(features.iter()).flatten().copied().collect::<Vec<_>>().join(", ")
}

fn optional<T>(result: Result<T, StorageError>) -> Result<Option<T>, StorageError> {
    match result {
        Ok(value) => Ok(Some(value)),
        Err(StorageError::Rusqlite(rusqlite::Error::QueryReturnedNoRows)) => Ok(None),
        Err(e) => Err(e),
    }
}

#[cfg(test)]
mod tests {
    use chrono::{Datelike, Timelike};

    use super::*;

    #[test]
    fn parses_sync_timestamp_formats() {
        let rfc = parse_timestamp("2025-03-03T15:30:00Z").unwrap();
        assert_eq!((rfc.month(), rfc.day(), rfc.hour()), (3, 3, 15));

        let offset = parse_timestamp("2025-03-03T23:30:00-02:00").unwrap();
        assert_eq!((offset.day(), offset.hour()), (4, 1));

        let naive = parse_timestamp("2025-03-03 08:15:00").unwrap();
        assert_eq!(naive.hour(), 8);

        let date_only = parse_timestamp("2025-03-03").unwrap();
        assert_eq!(date_only.hour(), 0);
    }

    #[test]
    fn garbage_timestamp_is_rejected() {
        assert!(parse_timestamp("last tuesday").is_none());
        assert!(parse_timestamp("").is_none());
    }

    #[test]
    fn ticket_without_timestamp_is_skipped() {
        let raw = RawTicket {
            ticket_id: 7,
            company_account_number: "1001".into(),
            subject: None,
            last_updated_at: None,
            total_hours_spent: Some(2.0),
        };
        assert!(raw.into_ticket().is_none());
    }

    #[test]
    fn override_columns_pair_values_with_flags() {
        let columns = override_value_columns();
        assert!(columns.contains("per_vm_cost, override_pvc_enabled"));
        assert!(columns.contains("feature_email, override_feature_email_enabled"));
        assert!(!plan_value_columns().contains("override_"));
    }
}
