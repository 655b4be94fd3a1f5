//! Integration tests for AppContext lifecycle

mod support;

use std::sync::Arc;

use mspdash_domain::{Config, DatabaseConfig, MspDashError};
use mspdash_lib::context::AppContext;
use mspdash_lib::{get_app_health, init_database};
use support::{setup_test_context, test_config, MarchClock, TEST_KEY};
use tempfile::TempDir;

#[tokio::test(flavor = "multi_thread")]
async fn context_creation_applies_schema() {
    let test = setup_test_context().await;

    let report = init_database(&test.ctx).await.expect("init succeeds");
    assert_eq!(report.schema_version, mspdash_infra::SCHEMA_VERSION);
    assert_eq!(report.max_connections, 4);
    assert!(report.db_path.ends_with("mspdash.db"));
}

#[tokio::test(flavor = "multi_thread")]
async fn missing_key_is_a_security_error() {
    let temp_dir = TempDir::new().expect("temp dir");
    let config = Config {
        database: DatabaseConfig {
            path: temp_dir.path().join("mspdash.db").to_string_lossy().to_string(),
            pool_size: 2,
            encryption_key: None,
        },
        ..Config::default()
    };

    let result = AppContext::new_with_clock(config, Arc::new(MarchClock)).await;
    assert!(matches!(result, Err(MspDashError::Security(_))));
}

#[tokio::test(flavor = "multi_thread")]
async fn reopening_with_wrong_key_fails() {
    let temp_dir = TempDir::new().expect("temp dir");
    let config = test_config(&temp_dir);
    let ctx = AppContext::new_with_clock(config.clone(), Arc::new(MarchClock))
        .await
        .expect("first open");
    drop(ctx);

    let mut wrong = config;
    wrong.database.encryption_key = Some(TEST_KEY.replace('a', "b"));
    let result = AppContext::new_with_clock(wrong, Arc::new(MarchClock)).await;
    assert!(matches!(result, Err(MspDashError::Security(_))));
}

#[tokio::test(flavor = "multi_thread")]
async fn health_flags_missing_billing_plans() {
    let test = setup_test_context().await;

    let report = get_app_health(&test.ctx).await;
    assert!(!report.is_healthy);
    assert_eq!(report.components.len(), 2);
    assert!(report.components[0].is_healthy, "database should be healthy");
    assert!(!report.components[1].is_healthy);

    test.seed_clients();
    let report = get_app_health(&test.ctx).await;
    assert!(report.is_healthy);
}
