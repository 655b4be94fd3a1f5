//! Integration tests for billing commands over an encrypted database

mod support;

use mspdash_domain::MspDashError;
use mspdash_lib::{compute_dashboard, compute_invoice, dashboard_page, DashboardPageRequest};
use support::setup_test_context;

#[tokio::test(flavor = "multi_thread")]
async fn invoice_totals_assets_users_and_hours() {
    let test = setup_test_context().await;
    test.seed_clients();

    let billing =
        compute_invoice(&test.ctx, "1001".into(), 2025, 3).await.expect("invoice computes");

    assert_eq!(billing.receipt.total_asset_charges, 20.0);
    assert_eq!(billing.receipt.total_user_charges, 5.0);
    assert_eq!(billing.receipt.hours_for_billing_period, 1.5);
    assert_eq!(billing.receipt.ticket_charge, 150.0);
    assert_eq!(billing.receipt.total, 175.0);
    assert_eq!(billing.contract_end_date, "2025-12-31");
}

#[tokio::test(flavor = "multi_thread")]
async fn invoice_reports_typed_outcomes() {
    let test = setup_test_context().await;
    test.seed_clients();

    let missing = compute_invoice(&test.ctx, "9999".into(), 2025, 3).await;
    assert_eq!(missing.unwrap_err(), MspDashError::ClientNotFound("9999".into()));

    let unconfigured = compute_invoice(&test.ctx, "2001".into(), 2025, 3).await;
    assert_eq!(
        unconfigured.unwrap_err(),
        MspDashError::PlanNotConfigured { plan: "Legacy Gold".into(), term: "1-Year".into() }
    );
}

#[tokio::test(flavor = "multi_thread")]
async fn dashboard_sorts_by_bill_and_zeroes_unconfigured() {
    let test = setup_test_context().await;
    test.seed_clients();

    let rows = compute_dashboard(&test.ctx, Some("bill".into()), Some("desc".into()))
        .await
        .expect("dashboard computes");

    let accounts: Vec<_> = rows.iter().map(|r| r.account_number.as_str()).collect();
    assert_eq!(accounts, ["1001", "1002", "2001"]);
    assert_eq!(rows[0].total_bill, 175.0);
    assert_eq!(rows[1].total_bill, 10.0);
    assert!(!rows[2].plan_configured);
    assert_eq!(rows[2].total_bill, 0.0);
}

#[tokio::test(flavor = "multi_thread")]
async fn dashboard_rejects_unknown_sort_column() {
    let test = setup_test_context().await;

    let result = compute_dashboard(&test.ctx, Some("revenue".into()), None).await;
    assert!(matches!(result, Err(MspDashError::InvalidInput(_))));
}

#[tokio::test(flavor = "multi_thread")]
async fn dashboard_page_searches_and_pages() {
    let test = setup_test_context().await;
    test.seed_clients();

    let request = DashboardPageRequest {
        search: Some("1".into()),
        sort_by: Some("account_number".into()),
        per_page: Some(2),
        page: Some(2),
        ..DashboardPageRequest::default()
    };
    let page = dashboard_page(&test.ctx, request).await.expect("page computes");

    assert_eq!(page.total_rows, 3);
    assert_eq!(page.total_pages, 2);
    assert_eq!(page.rows.len(), 1);
    assert_eq!(page.rows[0].account_number, "2001");
}

#[tokio::test(flavor = "multi_thread")]
async fn dashboard_page_uses_configured_page_size() {
    let test = setup_test_context().await;
    test.seed_clients();

    let page = dashboard_page(&test.ctx, DashboardPageRequest::default()).await.expect("page");
    assert_eq!(page.per_page, test.ctx.default_page_size());
    assert_eq!(page.rows.len(), 3);
}
