//! Services and Departments maintained over HTTP.
//!
//! Run with: `cargo test --test catalog_test`
mod common;

use actix_web::http::StatusCode;
use actix_web::http::header::LOCATION;
use actix_web::test;
use sea_orm::{EntityTrait, PaginatorTrait};
use serde_json::Value;

use common::{app, bearer, test_db};
use excellon_backoffice::db::{departments, services};
use excellon_backoffice::models::{departments as department, services as service};

#[actix_web::test]
async fn test_service_lifecycle_keeps_created_date() {
    let db = test_db().await;
    let conn = db.get_ref();
    let app = test::init_service(app(db.clone())).await;

    let req = test::TestRequest::post()
        .uri("/Services/Create")
        .insert_header(bearer())
        .set_form([
            ("name", "Tele Marketing"),
            ("description", "Promote products by phone"),
            ("daily_charge_per_employee", "5500"),
        ])
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::SEE_OTHER);
    assert_eq!(resp.headers().get(LOCATION).unwrap(), "/Services");
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["notice"], "Service created successfully!");

    let created = service::Entity::find().all(conn).await.unwrap();
    assert_eq!(created.len(), 1);
    let created = &created[0];
    assert_eq!(created.name, "Tele Marketing");
    assert_eq!(created.description, "Promote products by phone");
    assert_eq!(created.daily_charge_per_employee, 5500.0);
    assert!(created.is_active);

    let id = created.id.to_string();
    let req = test::TestRequest::post()
        .uri(&format!("/Services/Edit/{id}"))
        .insert_header(bearer())
        .set_form([
            ("id", id.as_str()),
            ("name", "Telemarketing"),
            ("description", "Outbound sales calls"),
            ("daily_charge_per_employee", "6000"),
            ("is_active", "false"),
        ])
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::SEE_OTHER);

    let edited = services::get_service_by_id(conn, created.id)
        .await
        .unwrap()
        .expect("service still exists");
    assert_eq!(edited.name, "Telemarketing");
    assert_eq!(edited.daily_charge_per_employee, 6000.0);
    assert!(!edited.is_active);
    assert_eq!(edited.created_date, created.created_date);

    let req = test::TestRequest::post()
        .uri(&format!("/Services/Delete/{id}"))
        .insert_header(bearer())
        .to_request();
    assert_eq!(test::call_service(&app, req).await.status(), StatusCode::SEE_OTHER);
    assert_eq!(service::Entity::find().count(conn).await.unwrap(), 0);
}

#[actix_web::test]
async fn test_service_requires_a_charge() {
    let db = test_db().await;
    let app = test::init_service(app(db.clone())).await;

    let req = test::TestRequest::post()
        .uri("/Services/Create")
        .insert_header(bearer())
        .set_form([("name", "In-bound"), ("description", "Receive calls")])
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::UNPROCESSABLE_ENTITY);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(
        body["field_errors"]["daily_charge_per_employee"][0],
        "Daily Charge per Employee is required"
    );
    assert_eq!(services::count_services(db.get_ref()).await.unwrap().total, 0);
}

#[actix_web::test]
async fn test_department_lifecycle_and_counts() {
    let db = test_db().await;
    let conn = db.get_ref();
    let app = test::init_service(app(db.clone())).await;

    let req = test::TestRequest::post()
        .uri("/Departments/Create")
        .insert_header(bearer())
        .set_form([("name", "Quality Assurance"), ("description", "Call audits")])
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::SEE_OTHER);
    assert_eq!(resp.headers().get(LOCATION).unwrap(), "/Departments");

    let req = test::TestRequest::get()
        .uri("/Departments")
        .insert_header(bearer())
        .to_request();
    let body: Value = test::read_body_json(test::call_service(&app, req).await).await;
    assert_eq!(body["items"][0]["name"], "Quality Assurance");
    assert_eq!(body["items"][0]["description"], "Call audits");
    assert_eq!(body["counts"]["total"], 1);
    assert!(body["counts"]["active"].is_null());
    assert!(body["counts"]["inactive"].is_null());

    let created = department::Entity::find().all(conn).await.unwrap().remove(0);
    let id = created.id.to_string();
    let req = test::TestRequest::post()
        .uri(&format!("/Departments/Edit/{id}"))
        .insert_header(bearer())
        .set_form([("id", id.as_str()), ("name", "QA")])
        .to_request();
    assert_eq!(test::call_service(&app, req).await.status(), StatusCode::SEE_OTHER);

    let edited = departments::get_department_by_id(conn, created.id)
        .await
        .unwrap()
        .expect("department still exists");
    assert_eq!(edited.name, "QA");
    assert_eq!(edited.description, None);
    assert_eq!(edited.created_date, created.created_date);

    for _ in 0..2 {
        let req = test::TestRequest::post()
            .uri(&format!("/Departments/Delete/{id}"))
            .insert_header(bearer())
            .to_request();
        assert_eq!(test::call_service(&app, req).await.status(), StatusCode::SEE_OTHER);
    }
    assert_eq!(departments::count_departments(conn).await.unwrap().total, 0);
}

#[actix_web::test]
async fn test_department_name_is_required() {
    let db = test_db().await;
    let app = test::init_service(app(db.clone())).await;

    let req = test::TestRequest::post()
        .uri("/Departments/Create")
        .insert_header(bearer())
        .set_form([("description", "No name given")])
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::UNPROCESSABLE_ENTITY);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["field_errors"]["name"][0], "Department Name is required");
    assert_eq!(body["form"]["description"], "No name given");
}
