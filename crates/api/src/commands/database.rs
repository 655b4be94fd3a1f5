//! Database commands

use std::sync::Arc;

use mspdash_domain::Result as DomainResult;
use mspdash_infra::SCHEMA_VERSION;
use serde::{Deserialize, Serialize};

use crate::context::AppContext;
use crate::utils::command_helpers::execute_blocking;
use crate::utils::health::HealthReport;

/// Outcome of [`init_database`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DatabaseInitReport {
    pub db_path: String,
    pub schema_version: i32,
    pub max_connections: usize,
}

/// Apply the schema to the configured database.
///
/// Idempotent; the context already migrates on construction, so this mainly
/// confirms the file opens with the configured key.
pub async fn init_database(ctx: &Arc<AppContext>) -> DomainResult<DatabaseInitReport> {
    execute_blocking(ctx, "database::init_database", |ctx| {
        ctx.db.run_migrations()?;
        let status = ctx.db.health_check()?;
        Ok(DatabaseInitReport {
            db_path: ctx.db.path().display().to_string(),
            schema_version: SCHEMA_VERSION,
            max_connections: status.max_connections,
        })
    })
    .await
}

/// Component health of the running context.
pub async fn get_app_health(ctx: &Arc<AppContext>) -> HealthReport {
    ctx.health_check().await
}
