mod common;

use axum::{
    body::Body,
    http::{header, Request, StatusCode},
    Router,
};
use retirement::models::Security;
use retirement::routes;
use retirement::services::{db::Database, repository};
use serde_json::json;
use tower::ServiceExt;

use common::{get_request, json_request, response_json, test_state};

fn app() -> Router {
    // API routes never call the client, so the base URL is unused
    routes::app(test_state("http://127.0.0.1:9"))
}

async fn create(app: &Router, body: serde_json::Value) -> serde_json::Value {
    let res = app
        .clone()
        .oneshot(json_request("POST", "/api/securities", body))
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::CREATED);
    response_json(res).await
}

fn merge_patch(uri: &str, body: serde_json::Value) -> Request<Body> {
    Request::builder()
        .method("PATCH")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/merge-patch+json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

#[tokio::test]
async fn create_security_assigns_id_and_location() {
    let app = app();
    let res = app
        .clone()
        .oneshot(json_request(
            "POST",
            "/api/securities",
            json!({ "name": "Apple", "ticker": "AAPL", "type": "SHARE", "region": "USA" }),
        ))
        .await
        .unwrap();

    assert_eq!(res.status(), StatusCode::CREATED);
    let alert = res.headers().get("x-retirementapp-alert").unwrap().to_str().unwrap().to_string();
    assert_eq!(alert, "retirementApp.security.created");
    let location = res.headers().get(header::LOCATION).unwrap().to_str().unwrap().to_string();

    let body = response_json(res).await;
    let id = body["id"].as_i64().expect("server assigned id");
    assert_eq!(location, format!("/api/securities/{id}"));
    assert_eq!(body["ticker"], "AAPL");
    assert_eq!(body["type"], "SHARE");
    assert_eq!(body["region"], "USA");
}

#[tokio::test]
async fn create_security_with_existing_id_is_rejected() {
    let res = app()
        .oneshot(json_request("POST", "/api/securities", json!({ "id": 1, "ticker": "AAPL" })))
        .await
        .unwrap();

    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    assert_eq!(
        res.headers().get("x-retirementapp-error").unwrap(),
        "error.idexists"
    );
    let body = response_json(res).await;
    assert_eq!(body["errorKey"], "idexists");
    assert_eq!(body["entityName"], "security");
}

#[tokio::test]
async fn get_all_securities_ignores_cache_buster() {
    let app = app();
    create(&app, json!({ "ticker": "AAPL" })).await;
    create(&app, json!({ "ticker": "MSFT" })).await;

    let res = app
        .oneshot(get_request("/api/securities?cacheBuster=1700000000000"))
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);

    let body = response_json(res).await;
    let tickers: Vec<&str> = body
        .as_array()
        .unwrap()
        .iter()
        .map(|s| s["ticker"].as_str().unwrap())
        .collect();
    assert_eq!(tickers, vec!["AAPL", "MSFT"]);
}

#[tokio::test]
async fn get_missing_security_returns_404_problem() {
    let res = app()
        .oneshot(get_request(&format!("/api/securities/{}", i64::MAX)))
        .await
        .unwrap();

    assert_eq!(res.status(), StatusCode::NOT_FOUND);
    assert_eq!(
        res.headers().get(header::CONTENT_TYPE).unwrap(),
        "application/problem+json"
    );
    let body = response_json(res).await;
    assert_eq!(body["status"], 404);
    assert_eq!(body["title"], "Not Found");
}

#[tokio::test]
async fn update_security_checks_ids() {
    let app = app();
    let created = create(&app, json!({ "ticker": "AAPL" })).await;
    let id = created["id"].as_i64().unwrap();

    let cases = [
        (format!("/api/securities/{id}"), json!({ "ticker": "X" }), "idnull"),
        (format!("/api/securities/{}", id + 100), json!({ "id": id, "ticker": "X" }), "idinvalid"),
        (format!("/api/securities/{}", id + 100), json!({ "id": id + 100, "ticker": "X" }), "idnotfound"),
    ];

    for (uri, body, key) in cases {
        let res = app.clone().oneshot(json_request("PUT", &uri, body)).await.unwrap();
        assert_eq!(res.status(), StatusCode::BAD_REQUEST, "{key}");
        assert_eq!(response_json(res).await["errorKey"], key);
    }
}

#[tokio::test]
async fn update_security_replaces_every_field() {
    let app = app();
    let created = create(
        &app,
        json!({ "name": "Apple", "ticker": "AAPL", "type": "SHARE", "region": "USA" }),
    )
    .await;
    let id = created["id"].as_i64().unwrap();

    let res = app
        .clone()
        .oneshot(json_request(
            "PUT",
            &format!("/api/securities/{id}"),
            json!({ "id": id, "ticker": "OFZ", "type": "BOND" }),
        ))
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    assert_eq!(
        res.headers().get("x-retirementapp-alert").unwrap(),
        "retirementApp.security.updated"
    );

    let fetched = response_json(
        app.oneshot(get_request(&format!("/api/securities/{id}"))).await.unwrap(),
    )
    .await;
    assert_eq!(fetched["ticker"], "OFZ");
    assert_eq!(fetched["type"], "BOND");
    assert!(fetched["name"].is_null());
    assert!(fetched["region"].is_null());
}

#[tokio::test]
async fn partial_update_keeps_untouched_fields() {
    let app = app();
    let created = create(
        &app,
        json!({ "name": "Apple", "ticker": "AAPL", "type": "SHARE", "region": "USA" }),
    )
    .await;
    let id = created["id"].as_i64().unwrap();

    let res = app
        .clone()
        .oneshot(merge_patch(
            &format!("/api/securities/{id}"),
            json!({ "id": id, "region": "OTHERS", "name": null }),
        ))
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);

    let body = response_json(res).await;
    assert_eq!(body["name"], "Apple");
    assert_eq!(body["ticker"], "AAPL");
    assert_eq!(body["region"], "OTHERS");
}

#[tokio::test]
async fn partial_update_requires_merge_patch_content_type() {
    let app = app();
    let created = create(&app, json!({ "ticker": "AAPL" })).await;
    let id = created["id"].as_i64().unwrap();

    let res = app
        .oneshot(json_request(
            "PATCH",
            &format!("/api/securities/{id}"),
            json!({ "id": id, "ticker": "X" }),
        ))
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::UNSUPPORTED_MEDIA_TYPE);
}

#[tokio::test]
async fn partial_update_unknown_id_is_bad_request() {
    let res = app()
        .oneshot(merge_patch("/api/securities/999", json!({ "id": 999, "ticker": "X" })))
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    assert_eq!(response_json(res).await["errorKey"], "idnotfound");
}

#[tokio::test]
async fn delete_security_returns_no_content_then_404() {
    let app = app();
    let created = create(&app, json!({ "ticker": "AAPL" })).await;
    let id = created["id"].as_i64().unwrap();

    let res = app
        .clone()
        .oneshot(
            Request::builder()
                .method("DELETE")
                .uri(format!("/api/securities/{id}"))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::NO_CONTENT);
    assert_eq!(
        res.headers().get("x-retirementapp-alert").unwrap(),
        "retirementApp.security.deleted"
    );

    let res = app
        .oneshot(get_request(&format!("/api/securities/{id}")))
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn put_without_id_in_path_is_method_not_allowed() {
    let res = app()
        .oneshot(json_request("PUT", "/api/securities", json!({ "id": 1 })))
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::METHOD_NOT_ALLOWED);
}

#[tokio::test]
async fn replace_after_delete_does_not_recreate_security() {
    let db = Database::memory();
    let saved = repository::insert(
        &db,
        &Security {
            ticker: Some("AAPL".to_string()),
            ..Default::default()
        },
    )
    .await
    .unwrap();
    let id = saved.id.unwrap();
    repository::delete_by_id::<Security>(&db, id).await.unwrap();

    let replaced = repository::replace(
        &db,
        &Security {
            ticker: Some("AAPL.US".to_string()),
            ..saved
        },
    )
    .await
    .unwrap();

    assert!(replaced.is_none());
    assert!(repository::find_by_id::<Security>(&db, id).await.unwrap().is_none());
    assert!(repository::find_all::<Security>(&db).await.unwrap().is_empty());
}
