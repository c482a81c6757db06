mod common;

use retirement::models::{Currency, Purchase, Region, Security, SecurityType};
use retirement::services::api_client::{clean_entity, ApiClient};
use retirement::store::{Lookup, PurchaseStore, SecurityStore};
use serde_json::json;

use common::spawn_app;

fn apple() -> Security {
    Security {
        name: Some("Apple".to_string()),
        ticker: Some("AAPL".to_string()),
        kind: Some(SecurityType::Share),
        region: Some(Region::Usa),
        ..Default::default()
    }
}

#[tokio::test]
async fn created_security_appears_in_list_with_server_id() {
    let app = spawn_app().await;
    let store = SecurityStore::new();

    let saved = store.create_entity(&app.state.api, apple()).await;
    assert!(saved.update_success);
    assert_eq!(saved.error_message, None);
    let id = saved.entity.id.expect("server assigned id");

    // create refreshes the list afterwards
    let after = store.snapshot();
    assert!(!after.loading);
    assert!(after.list_loaded);
    let listed = after
        .entities
        .iter()
        .find(|s| s.ticker.as_deref() == Some("AAPL"))
        .expect("AAPL listed");
    assert_eq!(listed.id, Some(id));
}

#[tokio::test]
async fn purchase_detail_carries_linked_security() {
    let (app, security_id) = app_with_apple().await;

    let purchases = PurchaseStore::new();
    let saved = purchases
        .create_entity(
            &app.state.api,
            Purchase {
                price: Some(150.25),
                currency: Some(Currency::Usd),
                number: Some(10),
                comission: Some(1.5),
                security: Some(Security::reference(security_id)),
                ..Default::default()
            },
        )
        .await;
    assert!(saved.update_success);
    let purchase_id = saved.entity.id.unwrap();

    let detail = PurchaseStore::new().get_entity(&app.state.api, purchase_id).await;
    assert!(!detail.loading);
    assert_eq!(detail.entity.price, Some(150.25));
    assert_eq!(detail.entity.number, Some(10));
    assert_eq!(detail.entity.security_id(), Some(security_id));
    assert_eq!(
        detail.entity.security.as_ref().and_then(|s| s.ticker.as_deref()),
        Some("AAPL")
    );
}

async fn app_with_apple() -> (common::TestApp, i64) {
    let app = spawn_app().await;
    let saved = SecurityStore::new().create_entity(&app.state.api, apple()).await;
    let id = saved.entity.id.unwrap();
    (app, id)
}

#[tokio::test]
async fn nonexistent_entity_ends_with_error_and_empty_entity() {
    let app = spawn_app().await;
    let store = SecurityStore::new();

    let state = store.get_entity(&app.state.api, 987_654).await;
    assert!(!state.loading);
    let message = state.error_message.expect("error message");
    assert!(message.starts_with("Request failed with status code 404"), "{message}");
    assert_eq!(state.entity, Security::default());
}

#[tokio::test]
async fn unreachable_api_surfaces_transport_error() {
    // nothing listens on the discard port
    let api = ApiClient::new("http://127.0.0.1:9");
    let state = SecurityStore::new().get_entities(&api).await;

    assert!(!state.loading);
    assert!(state.entities.is_empty());
    assert!(state.error_message.is_some());
    assert!(!state.list_loaded);
}

#[tokio::test]
async fn delete_removes_entity_from_refreshed_list() {
    let (app, id) = app_with_apple().await;
    let store = SecurityStore::new();

    let listed = store.get_entities(&app.state.api).await;
    assert!(listed.entities.iter().any(|s| s.id == Some(id)));

    let deleted = store.delete_entity(&app.state.api, id).await;
    assert!(deleted.update_success);
    assert_eq!(deleted.entity, Security::default());

    let refreshed = store.snapshot();
    assert!(refreshed.list_loaded);
    assert!(!refreshed.entities.iter().any(|s| s.id == Some(id)));
}

#[tokio::test]
async fn update_and_partial_update_round_trip() {
    let (app, id) = app_with_apple().await;
    let store = SecurityStore::new();

    let mut entity = store.get_entity(&app.state.api, id).await.entity;
    entity.name = None;
    entity.region = Some(Region::Others);

    let updated = store.update_entity(&app.state.api, entity).await;
    assert!(updated.update_success);
    assert_eq!(updated.entity.name, None);
    assert_eq!(updated.entity.region, Some(Region::Others));

    let patch = Security {
        id: Some(id),
        name: Some("Apple Inc".to_string()),
        ..Default::default()
    };
    let patched = store.partial_update(&app.state.api, patch).await;
    assert!(patched.update_success, "{:?}", patched.error_message);
    assert_eq!(patched.entity.name.as_deref(), Some("Apple Inc"));
    assert_eq!(patched.entity.ticker.as_deref(), Some("AAPL"));
    assert_eq!(patched.entity.region, Some(Region::Others));
}

#[tokio::test]
async fn failed_create_reports_message_and_no_success() {
    let app = spawn_app().await;
    let store = SecurityStore::new();

    let mut entity = apple();
    entity.id = Some(5);
    let state = store.create_entity(&app.state.api, entity).await;

    assert!(!state.updating);
    assert!(!state.update_success);
    let message = state.error_message.unwrap();
    assert!(message.contains("400"), "{message}");
    assert!(message.contains("cannot already have an ID"), "{message}");
    // no refresh after a failed create
    assert!(!state.list_loaded);
}

#[tokio::test]
async fn subscribers_see_final_state() {
    let app = spawn_app().await;
    let store = SecurityStore::new();
    let mut rx = store.subscribe();

    store.create_entity(&app.state.api, apple()).await;

    assert!(rx.has_changed().unwrap());
    let seen = rx.borrow_and_update().clone();
    assert!(!seen.loading);
    assert_eq!(seen.entities.len(), 1);
}

#[tokio::test]
async fn security_lookup_after_list_load() {
    let (app, id) = app_with_apple().await;
    let store = SecurityStore::new();

    assert_eq!(store.snapshot().lookup(id), Lookup::NotLoaded);

    let state = store.get_entities(&app.state.api).await;
    assert!(matches!(state.lookup(id), Lookup::Found(s) if s.ticker.as_deref() == Some("AAPL")));
    assert_eq!(state.lookup(id + 1000), Lookup::Missing(id + 1000));
}

#[test]
fn clean_entity_strips_nulls_and_empty_references() {
    let purchase = Purchase {
        price: Some(1.5),
        security: Some(Security::default()),
        ..Default::default()
    };
    assert_eq!(clean_entity(&purchase).unwrap(), json!({ "price": 1.5 }));

    let linked = Purchase {
        number: Some(3),
        security: Some(Security::reference(8)),
        ..Default::default()
    };
    let cleaned = clean_entity(&linked).unwrap();
    assert_eq!(cleaned["number"], 3);
    assert_eq!(cleaned["security"]["id"], 8);
    assert!(cleaned.get("id").is_none());
    assert!(cleaned.get("currency").is_none());
}
