//! Report aggregation, home counts and demo seeding.
//!
//! Run with: `cargo test --test reports_test`
mod common;

use actix_web::http::StatusCode;
use actix_web::test;
use chrono::{Duration, Utc};
use serde_json::Value;

use common::{add_client, add_service, app, assign, bearer, pay, test_db};
use excellon_backoffice::db::{departments, reports, seed, services};
use excellon_backoffice::models::ListQuery;

#[actix_web::test]
async fn test_dashboard_on_empty_database_is_all_zero() {
    let db = test_db().await;
    let app = test::init_service(app(db.clone())).await;

    let req = test::TestRequest::get()
        .uri("/Reports/Dashboard")
        .insert_header(bearer())
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let body: Value = test::read_body_json(resp).await;
    for key in [
        "total_services",
        "total_departments",
        "total_employees",
        "total_clients",
        "total_payments",
        "active_clients",
        "active_services",
    ] {
        assert_eq!(body[key], 0, "{key}");
    }
    assert_eq!(body["total_payment_amount"], 0.0);
    assert_eq!(body["recent_payments"].as_array().unwrap().len(), 0);
    assert!(body["service_usage"].as_object().unwrap().is_empty());
}

#[actix_web::test]
async fn test_dashboard_totals_and_usage() {
    let db = test_db().await;
    let conn = db.get_ref();
    let acme = add_client(conn, "Acme Co", true).await;
    let globex = add_client(conn, "Globex", false).await;
    let inbound = add_service(conn, "In-bound", true).await;
    let outbound = add_service(conn, "Out-bound", true).await;
    add_service(conn, "Tele Marketing", false).await;
    assign(conn, acme.id, inbound.id, 4, true).await;
    assign(conn, globex.id, inbound.id, 2, true).await;
    assign(conn, acme.id, outbound.id, 1, false).await;

    let now = Utc::now();
    for days in 0..7 {
        pay(conn, acme.id, 100.0, now - Duration::days(days)).await;
    }

    let report = reports::dashboard(conn).await.unwrap();
    assert_eq!(report.total_services, 3);
    assert_eq!(report.active_services, 2);
    assert_eq!(report.total_clients, 2);
    assert_eq!(report.active_clients, 1);
    assert_eq!(report.total_payments, 7);
    assert!((report.total_payment_amount - 700.0).abs() < 1e-9);

    assert_eq!(report.recent_payments.len(), 5);
    assert!(
        report
            .recent_payments
            .windows(2)
            .all(|w| w[0].payment_date >= w[1].payment_date)
    );
    assert_eq!(report.recent_payments[0].client_name, "Acme Co");

    assert_eq!(report.service_usage["In-bound"], 2);
    assert_eq!(report.service_usage["Out-bound"], 0);
    assert_eq!(report.service_usage["Tele Marketing"], 0);
}

#[actix_web::test]
async fn test_late_payments_uses_a_thirty_day_window() {
    let db = test_db().await;
    let conn = db.get_ref();
    let now = Utc::now();

    let overdue = add_client(conn, "Overdue Inc", true).await;
    pay(conn, overdue.id, 50.0, now - Duration::days(45)).await;

    let current = add_client(conn, "Current LLC", true).await;
    pay(conn, current.id, 50.0, now - Duration::days(10)).await;

    // Never paid and active: late. Inactive: never listed.
    add_client(conn, "Brand New", true).await;
    add_client(conn, "Retired", false).await;

    let late = reports::late_payment_clients(conn, now).await.unwrap();
    let names: Vec<&str> = late.iter().map(|c| c.company_name.as_str()).collect();
    assert_eq!(names, vec!["Brand New", "Overdue Inc"]);

    // Evaluated 40 days later, the 10-day-old payment has aged out too.
    let later = reports::late_payment_clients(conn, now + Duration::days(40))
        .await
        .unwrap();
    assert!(later.iter().any(|c| c.company_name == "Current LLC"));
}

#[actix_web::test]
async fn test_service_usage_groups_active_assignments() {
    let db = test_db().await;
    let conn = db.get_ref();
    let a = add_client(conn, "A", true).await;
    let b = add_client(conn, "B", true).await;
    let inbound = add_service(conn, "In-bound", true).await;
    let outbound = add_service(conn, "Out-bound", true).await;
    assign(conn, a.id, outbound.id, 10, true).await;
    assign(conn, b.id, outbound.id, 15, true).await;
    assign(conn, a.id, inbound.id, 3, true).await;
    assign(conn, b.id, inbound.id, 99, false).await;

    let rows = reports::service_usage(conn).await.unwrap();
    assert_eq!(rows.len(), 2);
    assert_eq!(rows[0].service_name, "Out-bound");
    assert_eq!(rows[0].client_count, 2);
    assert_eq!(rows[0].total_employees, 25);
    assert_eq!(rows[1].service_name, "In-bound");
    assert_eq!(rows[1].client_count, 1);
    assert_eq!(rows[1].total_employees, 3);
}

#[actix_web::test]
async fn test_client_summary_and_late_payment_endpoints() {
    let db = test_db().await;
    let conn = db.get_ref();
    let zeta = add_client(conn, "Zeta", true).await;
    add_client(conn, "Alpha", true).await;
    let service = add_service(conn, "In-bound", true).await;
    assign(conn, zeta.id, service.id, 2, true).await;
    let app = test::init_service(app(db.clone())).await;

    let req = test::TestRequest::get()
        .uri("/Reports/ClientSummary")
        .insert_header(bearer())
        .to_request();
    let body: Value = test::read_body_json(test::call_service(&app, req).await).await;
    assert_eq!(body["clients"][0]["company_name"], "Alpha");
    assert_eq!(body["clients"][1]["company_name"], "Zeta");
    assert_eq!(body["client_services"][0]["client_id"], zeta.id);
    assert_eq!(body["client_services"][0]["service_name"], "In-bound");

    let req = test::TestRequest::get()
        .uri("/Reports/LatePayments")
        .insert_header(bearer())
        .to_request();
    let body: Value = test::read_body_json(test::call_service(&app, req).await).await;
    assert_eq!(body["window_days"], 30);
    assert_eq!(body["clients"].as_array().unwrap().len(), 2);
    assert_eq!(
        body["report_date"],
        Utc::now().format("%Y-%m-%d").to_string()
    );
}

#[actix_web::test]
async fn test_home_dashboard_counts() {
    let db = test_db().await;
    let conn = db.get_ref();
    let acme = add_client(conn, "Acme Co", true).await;
    pay(conn, acme.id, 1250.5, Utc::now()).await;
    let app = test::init_service(app(db.clone())).await;

    let req = test::TestRequest::get()
        .uri("/dashboard")
        .insert_header(bearer())
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["counts"]["clients"], 1);
    assert_eq!(body["counts"]["payments"], 1);
    assert_eq!(body["counts"]["total_payment_amount"], 1250.5);
    assert_eq!(body["user"]["role"], "Admin");
}

#[actix_web::test]
async fn test_demo_seed_runs_once() {
    let db = test_db().await;
    let conn = db.get_ref();

    assert!(seed::seed_demo_data(conn).await.unwrap());
    assert!(!seed::seed_demo_data(conn).await.unwrap());

    let all = services::list_services(conn, &ListQuery::default()).await.unwrap();
    let names: Vec<&str> = all.iter().map(|s| s.name.as_str()).collect();
    assert_eq!(names, vec!["In-bound", "Out-bound", "Tele Marketing"]);
    assert_eq!(all[1].daily_charge_per_employee, 6000.0);

    let counts = departments::count_departments(conn).await.unwrap();
    assert_eq!(counts.total, 6);
    assert_eq!(counts.active, None);
}
