use std::sync::Arc;

use axum::{
    Router,
    body::Body,
    http::{Request, StatusCode},
};
use http_body_util::BodyExt;
use migration::MigratorTrait;
use sea_orm::Database;
use server::{ServerState, router};
use tower::ServiceExt;

async fn test_router() -> Router {
    let db = Database::connect("sqlite::memory:").await.unwrap();
    migration::Migrator::up(&db, None).await.unwrap();
    let engine = engine::Engine::builder()
        .database(db)
        .build()
        .await
        .unwrap();
    router(ServerState {
        engine: Arc::new(engine),
    })
}

fn json_post(uri: &str, body: serde_json::Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

#[tokio::test]
async fn create_then_list_round_trip() {
    let app = test_router().await;

    let response = app
        .clone()
        .oneshot(json_post(
            "/entries",
            serde_json::json!({ "name": "Ravi", "place": "Pune", "amount_received": "100" }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);

    let response = app
        .oneshot(
            Request::builder()
                .uri("/entries")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let page: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(page["total_matching"], 1);
    assert_eq!(page["total_pages"], 1);
    assert_eq!(page["entries"][0]["sno"], 1);
    assert_eq!(page["entries"][0]["name"], "Ravi");
    assert_eq!(page["entries"][0]["balance_minor"], 10_000);
    assert_eq!(page["entries"][0]["balance_state"], "outstanding");
    assert_eq!(page["entries"][0]["balance_display"], "100.00");
}

#[tokio::test]
async fn blank_name_is_unprocessable() {
    let app = test_router().await;

    let response = app
        .oneshot(json_post(
            "/entries",
            serde_json::json!({ "name": "  ", "amount_received": "5" }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn unknown_id_is_not_found() {
    let app = test_router().await;

    let response = app
        .oneshot(
            Request::builder()
                .method("DELETE")
                .uri(format!("/entries/{}", uuid::Uuid::new_v4()))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn import_then_export_preserves_rows() {
    let app = test_router().await;

    let csv = "Name,Place,Amount Received,Amount Given\nRavi,Pune,100,25\nMeera,,50,\n";
    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/import")
                .body(Body::from(csv))
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let outcome: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(outcome["imported"], 2);
    assert_eq!(outcome["skipped"], 0);

    let response = app
        .oneshot(
            Request::builder()
                .uri("/export")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response.headers()["content-type"].to_str().unwrap(),
        "text/csv"
    );

    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let text = String::from_utf8(bytes.to_vec()).unwrap();
    let mut lines = text.lines();
    assert_eq!(
        lines.next().unwrap(),
        "S.No,Name,Place/Home,Amount Received,Amount Receivable,Balance"
    );
    assert_eq!(lines.next().unwrap(), "1,Ravi,Pune,100.00,25.00,75.00");
    assert_eq!(lines.next().unwrap(), "2,Meera,,50.00,0.00,50.00");
}

#[tokio::test]
async fn suggestions_endpoint_dedups() {
    let app = test_router().await;

    for (name, place) in [("Amit", "Pune"), ("AMIT", "Delhi"), ("Amita", "")] {
        let response = app
            .clone()
            .oneshot(json_post(
                "/entries",
                serde_json::json!({ "name": name, "place": place, "amount_received": "1" }),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::CREATED);
    }

    let response = app
        .oneshot(
            Request::builder()
                .uri("/suggestions?name=am")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let body: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
    let suggestions = body["suggestions"].as_array().unwrap();
    assert_eq!(suggestions.len(), 2);
    assert_eq!(suggestions[0]["name"], "Amit");
    assert_eq!(suggestions[0]["place"], "Pune");
    assert_eq!(suggestions[1]["name"], "Amita");
}
