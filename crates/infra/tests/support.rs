//! Shared fixtures for infra integration tests.

#![allow(dead_code)]

use std::sync::Arc;

use mspdash_infra::database::{DbManager, SqlCipherBillingRepository};
use rusqlite::ToSql;
use tempfile::TempDir;

const TEST_DB_KEY: &str = "test_key_64_chars_long_aaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaa";

/// Migrated temporary database that lives as long as the wrapper.
pub struct TestDatabase {
    pub manager: Arc<DbManager>,
    _temp_dir: TempDir,
}

impl TestDatabase {
    /// Create a new encrypted database with the full schema applied.
    pub fn new() -> Self {
        let temp_dir = TempDir::new().expect("temp dir should be created");
        let db_path = temp_dir.path().join("billing.db");

        let manager =
            DbManager::new(&db_path, 4, Some(TEST_DB_KEY)).expect("db manager should be created");
        manager.run_migrations().expect("schema should apply");

        Self { manager: Arc::new(manager), _temp_dir: temp_dir }
    }

    pub fn repository(&self) -> SqlCipherBillingRepository {
        SqlCipherBillingRepository::new(Arc::clone(&self.manager))
    }

    /// Execute a batch of SQL statements against the database.
    pub fn execute_batch(&self, sql: &str) {
        let conn = self.manager.get_connection().expect("connection for execute_batch");
        conn.execute_batch(sql).expect("SQL batch execution should succeed");
    }

    /// Execute one parameterised statement.
    pub fn execute(&self, sql: &str, params: &[&dyn ToSql]) {
        let conn = self.manager.get_connection().expect("connection for execute");
        conn.execute(sql, params).expect("SQL statement should succeed");
    }

    pub fn insert_company(&self, account: &str, name: &str, plan: &str, term: &str) {
        self.execute(
            "INSERT INTO companies (account_number, name, billing_plan, contract_term_length, \
             contract_start_date) VALUES (?1, ?2, ?3, ?4, '2025-01-01')",
            &[&account, &name, &plan, &term],
        );
    }

    /// Insert a plan row, leaving every other column at its schema default.
    pub fn insert_plan(&self, plan: &str, term: &str, per_workstation: f64) {
        self.execute(
            "INSERT INTO billing_plans (billing_plan, term_length, per_workstation_cost) \
             VALUES (?1, ?2, ?3)",
            &[&plan, &term, &per_workstation],
        );
    }

    pub fn insert_asset(&self, id: i64, account: &str, hostname: &str, billing_type: &str) {
        self.execute(
            "INSERT INTO assets (id, company_account_number, hostname, billing_type) \
             VALUES (?1, ?2, ?3, ?4)",
            &[&id, &account, &hostname, &billing_type],
        );
    }

    pub fn insert_user(&self, id: i64, account: &str, full_name: &str, status: &str) {
        self.execute(
            "INSERT INTO users (id, company_account_number, full_name, status) \
             VALUES (?1, ?2, ?3, ?4)",
            &[&id, &account, &full_name, &status],
        );
    }

    pub fn insert_ticket(&self, id: i64, account: &str, updated_at: &str, hours: f64) {
        self.execute(
            "INSERT INTO ticket_details (ticket_id, company_account_number, subject, \
             last_updated_at, total_hours_spent) VALUES (?1, ?2, 'Printer offline', ?3, ?4)",
            &[&id, &account, &updated_at, &hours],
        );
    }
}

impl Default for TestDatabase {
    fn default() -> Self {
        Self::new()
    }
}
