//! End-to-end checkout flow against the in-memory database
//!
//! Exercises the HTTP surface the front ends actually use: menu, cart
//! verification, order creation, tracking, and staff status transitions
//! including the compare-and-swap conflict path.

use axum::Router;
use axum::body::Body;
use comanda_server::core::{Config, ServerState};
use comanda_server::db::DbService;
use comanda_server::db::models::{MenuItemCreate, SectionCreate, SettingsUpdate};
use http::{Request, StatusCode, header};
use http_body_util::BodyExt;
use rust_decimal::Decimal;
use serde_json::{Value, json};
use tower::ServiceExt;

/// Server state over a fresh in-memory database, seeded with one section
/// and two items: A1 "Paella" at $1.79 and A2 "Horchata" (unavailable)
async fn seeded_state() -> (ServerState, String, String) {
    let db = DbService::memory().await.unwrap().db;
    let state = ServerState::with_db(Config::with_overrides("/tmp/comanda-test", 0), db)
        .await
        .unwrap();

    let section = state
        .catalog
        .sections()
        .create(SectionCreate {
            slug: "mains".to_string(),
            title: "Mains".to_string(),
            description: None,
            image_ref: None,
            parent: None,
            sort_order: None,
        })
        .await
        .unwrap();

    let paella = state
        .catalog
        .items()
        .create(MenuItemCreate {
            code: "A1".to_string(),
            name: "Paella".to_string(),
            price: Decimal::new(179, 2),
            description: None,
            section: section.key(),
            sort_order: None,
            is_available: Some(true),
        })
        .await
        .unwrap();

    let horchata = state
        .catalog
        .items()
        .create(MenuItemCreate {
            code: "A2".to_string(),
            name: "Horchata".to_string(),
            price: Decimal::new(300, 2),
            description: None,
            section: section.key(),
            sort_order: None,
            is_available: Some(false),
        })
        .await
        .unwrap();

    (state, paella.key(), horchata.key())
}

fn app(state: &ServerState) -> Router {
    comanda_server::api::build_app(state.clone())
}

async fn send(app: Router, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let request = match body {
        Some(json) => Request::builder()
            .method(method)
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(json.to_string()))
            .unwrap(),
        None => Request::builder()
            .method(method)
            .uri(uri)
            .body(Body::empty())
            .unwrap(),
    };

    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, value)
}

#[tokio::test]
async fn test_menu_returns_tree_with_items() {
    let (state, _, _) = seeded_state().await;
    let (status, body) = send(app(&state), "GET", "/api/menu", None).await;

    assert_eq!(status, StatusCode::OK);
    let sections = body.as_array().unwrap();
    assert_eq!(sections.len(), 1);
    assert_eq!(sections[0]["slug"], "mains");
    assert_eq!(sections[0]["items"].as_array().unwrap().len(), 2);
}

#[tokio::test]
async fn test_verify_reprices_tampered_cart() {
    let (state, paella, _) = seeded_state().await;

    // Client claims $5.00; the catalog says $1.79
    let (status, body) = send(
        app(&state),
        "POST",
        "/api/checkout/verify",
        Some(json!({
            "cart": [{"item_id": paella, "client_price": "5.00", "quantity": 1}]
        })),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    let line = &body["verified_cart"][0];
    assert_eq!(line["price"], "1.79");
    assert_eq!(line["price_modified"], true);
    assert_eq!(body["price_changed"], true);
}

#[tokio::test]
async fn test_verify_rejects_empty_cart_and_unknown_item() {
    let (state, _, _) = seeded_state().await;

    let (status, body) = send(
        app(&state),
        "POST",
        "/api/checkout/verify",
        Some(json!({"cart": []})),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "E0010");
    assert_eq!(body["category"], "validation");

    let (status, body) = send(
        app(&state),
        "POST",
        "/api/checkout/verify",
        Some(json!({
            "cart": [{"item_id": "ghost", "client_price": "1.00", "quantity": 1}]
        })),
    )
    .await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["code"], "E1001");
    assert_eq!(body["category"], "integrity");
}

#[tokio::test]
async fn test_unavailable_item_blocks_checkout() {
    let (state, _, horchata) = seeded_state().await;

    let (status, body) = send(
        app(&state),
        "POST",
        "/api/checkout/verify",
        Some(json!({
            "cart": [{"item_id": horchata, "client_price": "3.00", "quantity": 1}]
        })),
    )
    .await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["code"], "E1002");
}

#[tokio::test]
async fn test_pickup_order_totals_with_tax() {
    let (state, paella, _) = seeded_state().await;

    // 8.25% flat tax; catalog price wins over the tampered client price
    state
        .settings
        .update(SettingsUpdate {
            tax_percentage: Some(Decimal::new(825, 2)),
            ..Default::default()
        })
        .await
        .unwrap();

    let (status, body) = send(
        app(&state),
        "POST",
        "/api/orders",
        Some(json!({
            "items": [{"item_id": paella, "client_price": "0.01", "quantity": 3}],
            "order_type": "pickup",
            "payment_method": "card",
            "customer_name": "Ada",
            "customer_phone": "555-0100"
        })),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    // $1.79 × 3 = $5.37, tax 8.25% = $0.44, total $5.81
    assert_eq!(body["subtotal"], "5.37");
    assert_eq!(body["tax"], "0.44");
    assert_eq!(body["delivery_fee"], "0");
    assert_eq!(body["total"], "5.81");
    assert_eq!(body["status"], "pending");
    assert!(body["order_number"].as_str().unwrap().starts_with("ORD-"));

    // Customer-facing tracking by order number
    let number = body["order_number"].as_str().unwrap();
    let (status, tracked) = send(app(&state), "GET", &format!("/api/orders/{number}"), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(tracked["status_title"], "Order Received");
}

#[tokio::test]
async fn test_delivery_below_minimum_rejected() {
    let (state, paella, _) = seeded_state().await;

    state
        .settings
        .update(SettingsUpdate {
            minimum_order_amount: Some(Decimal::new(1500, 2)),
            ..Default::default()
        })
        .await
        .unwrap();

    let (status, body) = send(
        app(&state),
        "POST",
        "/api/orders",
        Some(json!({
            "items": [{"item_id": paella, "client_price": "1.79", "quantity": 1}],
            "order_type": "delivery",
            "payment_method": "card",
            "customer_name": "Ada",
            "customer_phone": "555-0100",
            "address": "Calle Mayor 1"
        })),
    )
    .await;

    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["code"], "E2001");
    assert_eq!(body["category"], "business_rule");
    // The threshold is reported so the UI can explain the gap
    let message = body["message"].as_str().unwrap();
    assert!(message.contains("15.00"));
    assert!(message.contains("1.79"));
}

#[tokio::test]
async fn test_delivery_disabled_rejected() {
    let (state, paella, _) = seeded_state().await;

    state
        .settings
        .update(SettingsUpdate {
            enable_delivery: Some(false),
            ..Default::default()
        })
        .await
        .unwrap();

    let (status, body) = send(
        app(&state),
        "POST",
        "/api/orders",
        Some(json!({
            "items": [{"item_id": paella, "client_price": "1.79", "quantity": 4}],
            "order_type": "delivery",
            "payment_method": "card",
            "customer_name": "Ada",
            "customer_phone": "555-0100",
            "address": "Calle Mayor 1"
        })),
    )
    .await;

    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["code"], "E2002");
}

#[tokio::test]
async fn test_delivery_requires_address() {
    let (state, paella, _) = seeded_state().await;

    let (status, _) = send(
        app(&state),
        "POST",
        "/api/orders",
        Some(json!({
            "items": [{"item_id": paella, "client_price": "1.79", "quantity": 1}],
            "order_type": "delivery",
            "payment_method": "card",
            "customer_name": "Ada",
            "customer_phone": "555-0100"
        })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

async fn create_pickup_order(state: &ServerState, paella: &str) -> Value {
    let (status, body) = send(
        app(state),
        "POST",
        "/api/orders",
        Some(json!({
            "items": [{"item_id": paella, "client_price": "1.79", "quantity": 1}],
            "order_type": "pickup",
            "payment_method": "cash",
            "customer_name": "Ada",
            "customer_phone": "555-0100"
        })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    body
}

#[tokio::test]
async fn test_status_advances_and_stale_patch_conflicts() {
    let (state, paella, _) = seeded_state().await;
    let order = create_pickup_order(&state, &paella).await;
    let id = order["id"].as_str().unwrap().to_string();

    // pending → confirmed
    let (status, body) = send(
        app(&state),
        "PATCH",
        &format!("/api/orders/{id}"),
        Some(json!({"status": "confirmed", "expected_status": "pending"})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "confirmed");

    // A second staff client still believing the order is pending loses
    let (status, body) = send(
        app(&state),
        "PATCH",
        &format!("/api/orders/{id}"),
        Some(json!({"status": "confirmed", "expected_status": "pending"})),
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["code"], "E3004");
    assert_eq!(body["category"], "conflict");
}

#[tokio::test]
async fn test_concurrent_advances_have_exactly_one_winner() {
    let (state, paella, _) = seeded_state().await;
    let order = create_pickup_order(&state, &paella).await;
    let id = order["id"].as_str().unwrap().to_string();

    let patch = |state: ServerState, id: String| async move {
        let (status, _) = send(
            app(&state),
            "PATCH",
            &format!("/api/orders/{id}"),
            Some(json!({"status": "confirmed", "expected_status": "pending"})),
        )
        .await;
        status
    };

    let (a, b) = tokio::join!(
        patch(state.clone(), id.clone()),
        patch(state.clone(), id.clone())
    );

    let successes = [a, b].iter().filter(|s| **s == StatusCode::OK).count();
    let conflicts = [a, b]
        .iter()
        .filter(|s| **s == StatusCode::CONFLICT)
        .count();
    assert_eq!(successes, 1, "exactly one writer must win");
    assert_eq!(conflicts, 1, "the loser must see a conflict, not a success");
}

#[tokio::test]
async fn test_pickup_skips_out_for_delivery() {
    let (state, paella, _) = seeded_state().await;
    let order = create_pickup_order(&state, &paella).await;
    let id = order["id"].as_str().unwrap().to_string();

    for next in ["confirmed", "preparing", "ready"] {
        let (status, _) = send(
            app(&state),
            "PATCH",
            &format!("/api/orders/{id}"),
            Some(json!({"status": next})),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
    }

    // ready → out-for-delivery is illegal for pickup
    let (status, body) = send(
        app(&state),
        "PATCH",
        &format!("/api/orders/{id}"),
        Some(json!({"status": "out-for-delivery"})),
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["code"], "E3002");

    // ready → delivered ("picked up") is the legal successor
    let (status, body) = send(
        app(&state),
        "PATCH",
        &format!("/api/orders/{id}"),
        Some(json!({"status": "delivered"})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status_title"], "Picked Up");

    // Terminal: no further transition, cancel reports already-terminal
    let (status, body) = send(
        app(&state),
        "POST",
        &format!("/api/orders/{id}/cancel"),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["code"], "E3003");
}

#[tokio::test]
async fn test_price_edit_invalidates_catalog_for_next_verify() {
    let (state, paella, _) = seeded_state().await;

    // Admin bumps the price; the cache is invalidated by the handler
    let (status, _) = send(
        app(&state),
        "PUT",
        &format!("/api/items/{paella}"),
        Some(json!({"price": "2.29"})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let (status, body) = send(
        app(&state),
        "POST",
        "/api/checkout/verify",
        Some(json!({
            "cart": [{"item_id": paella, "client_price": "1.79", "quantity": 1}]
        })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["verified_cart"][0]["price"], "2.29");
    assert_eq!(body["verified_cart"][0]["price_modified"], true);
}

#[tokio::test]
async fn test_settings_roundtrip() {
    let (state, _, _) = seeded_state().await;

    let (status, body) = send(app(&state), "GET", "/api/settings", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["enable_delivery"], true);

    let (status, body) = send(
        app(&state),
        "PUT",
        "/api/settings",
        Some(json!({"tax_percentage": "8.25", "restaurant_name": "Casa Ada"})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["tax_percentage"], "8.25");
    assert_eq!(body["restaurant_name"], "Casa Ada");

    // The cached read path sees the update
    let (_, body) = send(app(&state), "GET", "/api/settings", None).await;
    assert_eq!(body["tax_percentage"], "8.25");
}
