//! Application context - dependency injection container

use std::sync::Arc;

use mspdash_core::{BillingService, Clock, SystemClock};
use mspdash_domain::{Config, MspDashError, Result};
use mspdash_infra::{config, DbManager, SqlCipherBillingRepository};
use tracing::info;

use crate::utils::health::{ComponentHealth, HealthReport};

/// Application context - holds all services and dependencies
pub struct AppContext {
    pub config: Config,
    pub db: Arc<DbManager>,
    pub billing: Arc<BillingService>,
}

impl AppContext {
    /// Load configuration (environment first, then file) and build the context.
    pub async fn new() -> Result<Self> {
        Self::new_with_config(config::load()?).await
    }

    /// Build the context from an explicit configuration with the wall clock.
    pub async fn new_with_config(config: Config) -> Result<Self> {
        Self::new_with_clock(config, Arc::new(SystemClock)).await
    }

    /// Build the context with an injected clock.
    ///
    /// Opens the encrypted database, applies the schema and wires the
    /// billing service to the SQLCipher repository.
    pub async fn new_with_clock(config: Config, clock: Arc<dyn Clock>) -> Result<Self> {
        let database = config.database.clone();

        let db = tokio::task::spawn_blocking(move || {
            let db = DbManager::new(
                &database.path,
                database.pool_size,
                database.encryption_key.as_deref(),
            )?;
            db.run_migrations()?;
            Ok::<_, MspDashError>(Arc::new(db))
        })
        .await
        .map_err(|e| MspDashError::Internal(format!("spawn_blocking failed: {e}")))??;

        let repository = Arc::new(SqlCipherBillingRepository::new(Arc::clone(&db)));
        let billing = Arc::new(BillingService::new(repository, clock));

        info!(db_path = %db.path().display(), "application context initialised");

        Ok(Self { config, db, billing })
    }

    /// Rows per dashboard page when a request does not specify one.
    pub fn default_page_size(&self) -> u32 {
        self.config.billing.default_page_size
    }

    /// Check the database and whether any billing plan is configured.
    pub async fn health_check(&self) -> HealthReport {
        let mut report = HealthReport::new()
            .add_component(self.check_database_health().await)
            .add_component(self.check_billing_plans().await);

        report.calculate_score();
        report
    }

    async fn check_database_health(&self) -> ComponentHealth {
        let db = Arc::clone(&self.db);
        match tokio::task::spawn_blocking(move || db.health_check()).await {
            Ok(Ok(status)) => ComponentHealth::healthy_with(
                "database",
                format!(
                    "{} active / {} idle of {} connections",
                    status.active_connections, status.idle_connections, status.max_connections
                ),
            ),
            Ok(Err(e)) => ComponentHealth::unhealthy("database", e.to_string()),
            Err(e) => ComponentHealth::unhealthy("database", format!("health task failed: {e}")),
        }
    }

    async fn check_billing_plans(&self) -> ComponentHealth {
        let db = Arc::clone(&self.db);
        let count = tokio::task::spawn_blocking(move || {
            db.with_connection("count_billing_plans", |conn| {
                conn.query_row("SELECT COUNT(*) FROM billing_plans", &[], |row| {
                    row.get::<_, i64>(0)
                })
            })
        })
        .await;

        match count {
            Ok(Ok(0)) => ComponentHealth::unhealthy("billing_plans", "no billing plans configured"),
            Ok(Ok(n)) => ComponentHealth::healthy_with("billing_plans", format!("{n} configured")),
            Ok(Err(e)) => ComponentHealth::unhealthy("billing_plans", e.to_string()),
            Err(e) => {
                ComponentHealth::unhealthy("billing_plans", format!("health task failed: {e}"))
            }
        }
    }
}
