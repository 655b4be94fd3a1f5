//! Shared fixtures for app integration tests.

#![allow(dead_code)]

use std::sync::Arc;

use chrono::{DateTime, TimeZone, Utc};
use mspdash_core::Clock;
use mspdash_domain::{Config, DatabaseConfig};
use mspdash_lib::context::AppContext;
use rusqlite::ToSql;
use tempfile::TempDir;

pub const TEST_KEY: &str = "test_key_64_chars_long_aaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaa";

/// Clock pinned to 2025-03-20 so dashboards bill March 2025.
#[derive(Debug, Clone, Copy)]
pub struct MarchClock;

impl Clock for MarchClock {
    fn now(&self) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 3, 20, 9, 0, 0).unwrap()
    }
}

/// Context over a throwaway encrypted database.
pub struct TestContext {
    pub ctx: Arc<AppContext>,
    _temp_dir: TempDir,
}

impl TestContext {
    pub fn execute(&self, sql: &str, params: &[&dyn ToSql]) {
        let conn = self.ctx.db.get_connection().expect("connection for seeding");
        conn.execute(sql, params).expect("seed statement should succeed");
    }

    /// Two clients on one plan, plus one client whose plan has no row.
    pub fn seed_clients(&self) {
        self.execute(
            "INSERT INTO billing_plans (billing_plan, term_length, per_workstation_cost, \
             per_user_cost, per_hour_ticket_cost) VALUES ('MSP Basic', '1-Year', 10, 5, 100)",
            &[],
        );
        for (account, name, plan) in [
            ("1001", "Acme Dental", "MSP Basic"),
            ("1002", "Birch Veterinary", "MSP Basic"),
            ("2001", "Cobalt Legal", "Legacy Gold"),
        ] {
            self.execute(
                "INSERT INTO companies (account_number, name, billing_plan, \
                 contract_term_length, contract_start_date) \
                 VALUES (?1, ?2, ?3, '1-Year', '2025-01-01')",
                &[&account, &name, &plan],
            );
        }
        self.execute(
            "INSERT INTO assets (id, company_account_number, hostname, billing_type) VALUES \
             (1, '1001', 'ACME-WS-01', 'Workstation'), \
             (2, '1001', 'ACME-WS-02', 'Workstation'), \
             (3, '1002', 'BIRCH-WS-01', 'Workstation')",
            &[],
        );
        self.execute(
            "INSERT INTO users (id, company_account_number, full_name, status) VALUES \
             (1, '1001', 'Dana Hygienist', 'Active')",
            &[],
        );
        self.execute(
            "INSERT INTO ticket_details (ticket_id, company_account_number, subject, \
             last_updated_at, total_hours_spent) VALUES \
             (1, '1001', 'Printer offline', '2025-03-04T10:00:00Z', 1.5)",
            &[],
        );
    }
}

pub fn test_config(temp_dir: &TempDir) -> Config {
    Config {
        database: DatabaseConfig {
            path: temp_dir.path().join("mspdash.db").to_string_lossy().to_string(),
            pool_size: 4,
            encryption_key: Some(TEST_KEY.to_string()),
        },
        ..Config::default()
    }
}

/// Create a context with a fresh schema and the March clock.
pub async fn setup_test_context() -> TestContext {
    let temp_dir = TempDir::new().expect("failed to create temporary database directory");
    let ctx = AppContext::new_with_clock(test_config(&temp_dir), Arc::new(MarchClock))
        .await
        .expect("failed to initialise application context");

    TestContext { ctx: Arc::new(ctx), _temp_dir: temp_dir }
}
