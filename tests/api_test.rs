//! HTTP-level tests for the `/stores/{store_id}` API, run against the
//! in-memory repositories.

use std::str::FromStr;
use std::sync::Arc;

use actix_web::http::{header, StatusCode};
use actix_web::{test, App};
use bigdecimal::BigDecimal;
use jsonwebtoken::{encode, EncodingKey, Header};
use serde_json::{json, Value};
use uuid::Uuid;

use store_console::application::order_service::PricingConfig;
use store_console::auth::{Claims, StoreClaimData};
use store_console::infrastructure::memory::{InMemoryAccountRepository, InMemoryOrderRepository};
use store_console::AppState;

const SECRET: &str = "api-test-secret";

fn state() -> AppState {
    AppState::new(
        Arc::new(InMemoryAccountRepository::default()),
        Arc::new(InMemoryOrderRepository::default()),
        PricingConfig {
            tax_rate: BigDecimal::from_str("0.07").unwrap(),
            default_shipping_fee: BigDecimal::from_str("21.5").unwrap(),
        },
        SECRET,
    )
}

fn token_for(store_id: Uuid) -> String {
    let claims = Claims {
        data: StoreClaimData { store_id },
        exp: (chrono::Utc::now().timestamp() + 3600) as usize,
    };
    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(SECRET.as_bytes()),
    )
    .unwrap()
}

macro_rules! app {
    ($state:expr) => {{
        let state = $state;
        test::init_service(App::new().configure(move |cfg| state.configure(cfg))).await
    }};
}

fn order_body() -> Value {
    json!({
        "items": [
            { "code": "A", "name": "Mug", "unitPrice": "10", "quantity": 2 },
            { "code": "B", "name": "Tea", "unitPrice": "5", "quantity": 1 }
        ],
        "shippingFee": "21.5",
        "customerName": "Jane Tan",
        "customerContact": "+65 5550 1234",
        "shippingAddress": "1 Harbour Rd",
        "billingAddress": "1 Harbour Rd"
    })
}

// ── Authentication ────────────────────────────────────────────────────────────

#[actix_web::test]
async fn missing_token_is_unauthorized() {
    let app = app!(state());
    let req = test::TestRequest::get()
        .uri(&format!("/stores/{}/accounts", Uuid::new_v4()))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
}

#[actix_web::test]
async fn token_for_another_store_is_forbidden() {
    let app = app!(state());
    let req = test::TestRequest::get()
        .uri(&format!("/stores/{}/accounts", Uuid::new_v4()))
        .insert_header((header::AUTHORIZATION, token_for(Uuid::new_v4())))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::FORBIDDEN);
}

// ── Accounts ──────────────────────────────────────────────────────────────────

#[actix_web::test]
async fn empty_account_list_has_one_page() {
    let app = app!(state());
    let store = Uuid::new_v4();
    let req = test::TestRequest::get()
        .uri(&format!("/stores/{store}/accounts"))
        .insert_header((header::AUTHORIZATION, token_for(store)))
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;

    assert_eq!(body["count"], 0);
    assert_eq!(body["pageCount"], 1);
    assert_eq!(body["page"], 1);
    assert_eq!(body["size"], 10);
    assert_eq!(body["data"], json!([]));
}

#[actix_web::test]
async fn accounts_are_paginated_and_status_toggles() {
    let app = app!(state());
    let store = Uuid::new_v4();
    let token = token_for(store);

    let mut ids = Vec::new();
    for n in 0..11 {
        let req = test::TestRequest::post()
            .uri(&format!("/stores/{store}/accounts"))
            .insert_header((header::AUTHORIZATION, token.clone()))
            .set_json(json!({
                "name": format!("Op {n}"),
                "email": format!("op{n}@shop.test"),
                "role": "staff",
            }))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::CREATED);
        let body: Value = test::read_body_json(resp).await;
        ids.push(body["id"].as_str().unwrap().to_string());
    }

    let req = test::TestRequest::get()
        .uri(&format!("/stores/{store}/accounts?page=2&size=10"))
        .insert_header((header::AUTHORIZATION, format!("Bearer {token}")))
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["count"], 11);
    assert_eq!(body["pageCount"], 2);
    assert_eq!(body["data"].as_array().unwrap().len(), 1);

    let req = test::TestRequest::delete()
        .uri(&format!("/stores/{store}/accounts/{}", ids[0]))
        .insert_header((header::AUTHORIZATION, token.clone()))
        .to_request();
    assert_eq!(test::call_service(&app, req).await.status(), StatusCode::NO_CONTENT);

    let req = test::TestRequest::get()
        .uri(&format!("/stores/{store}/accounts/{}", ids[0]))
        .insert_header((header::AUTHORIZATION, token.clone()))
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["status"], false);

    let req = test::TestRequest::patch()
        .uri(&format!("/stores/{store}/accounts/{}", ids[0]))
        .insert_header((header::AUTHORIZATION, token.clone()))
        .to_request();
    assert_eq!(test::call_service(&app, req).await.status(), StatusCode::NO_CONTENT);
}

#[actix_web::test]
async fn page_past_the_end_serves_last_page() {
    let app = app!(state());
    let store = Uuid::new_v4();
    let token = token_for(store);

    for n in 0..3 {
        let req = test::TestRequest::post()
            .uri(&format!("/stores/{store}/accounts"))
            .insert_header((header::AUTHORIZATION, token.clone()))
            .set_json(json!({ "name": "Op", "email": format!("op{n}@shop.test"), "role": "staff" }))
            .to_request();
        test::call_service(&app, req).await;
    }

    let req = test::TestRequest::get()
        .uri(&format!("/stores/{store}/accounts?page=7&size=2"))
        .insert_header((header::AUTHORIZATION, token))
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["page"], 2);
    assert_eq!(body["pageCount"], 2);
    assert_eq!(body["data"].as_array().unwrap().len(), 1);
}

#[actix_web::test]
async fn largest_page_number_serves_last_page() {
    let app = app!(state());
    let store = Uuid::new_v4();
    let token = token_for(store);

    let req = test::TestRequest::post()
        .uri(&format!("/stores/{store}/accounts"))
        .insert_header((header::AUTHORIZATION, token.clone()))
        .set_json(json!({ "name": "Op", "email": "op@shop.test", "role": "staff" }))
        .to_request();
    test::call_service(&app, req).await;

    let req = test::TestRequest::get()
        .uri(&format!("/stores/{store}/accounts?page={}&size=10", i64::MAX))
        .insert_header((header::AUTHORIZATION, token))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["page"], 1);
    assert_eq!(body["pageCount"], 1);
    assert_eq!(body["data"].as_array().unwrap().len(), 1);
}

#[actix_web::test]
async fn unknown_account_status_update_is_not_found() {
    let app = app!(state());
    let store = Uuid::new_v4();
    let req = test::TestRequest::patch()
        .uri(&format!("/stores/{store}/accounts/{}", Uuid::new_v4()))
        .insert_header((header::AUTHORIZATION, token_for(store)))
        .to_request();
    assert_eq!(test::call_service(&app, req).await.status(), StatusCode::NOT_FOUND);
}

#[actix_web::test]
async fn invalid_account_lists_missing_fields() {
    let app = app!(state());
    let store = Uuid::new_v4();
    let req = test::TestRequest::post()
        .uri(&format!("/stores/{store}/accounts"))
        .insert_header((header::AUTHORIZATION, token_for(store)))
        .set_json(json!({ "name": "Op" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::UNPROCESSABLE_ENTITY);

    let body: Value = test::read_body_json(resp).await;
    let fields: Vec<&str> = body["fields"]
        .as_array()
        .unwrap()
        .iter()
        .map(|f| f["field"].as_str().unwrap())
        .collect();
    assert_eq!(fields, vec!["email", "role"]);
}

// ── Orders ────────────────────────────────────────────────────────────────────

#[actix_web::test]
async fn create_fetch_and_edit_order() {
    let app = app!(state());
    let store = Uuid::new_v4();
    let token = token_for(store);

    let req = test::TestRequest::post()
        .uri(&format!("/stores/{store}/orders"))
        .insert_header((header::AUTHORIZATION, token.clone()))
        .set_json(order_body())
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::CREATED);
    let created: Value = test::read_body_json(resp).await;
    let id = created["id"].as_str().unwrap().to_string();
    assert!(created["code"].as_str().unwrap().starts_with("ORD-"));

    let req = test::TestRequest::get()
        .uri(&format!("/stores/{store}/orders/{id}"))
        .insert_header((header::AUTHORIZATION, token.clone()))
        .to_request();
    let order: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(order["totals"]["subtotal"], "25.00");
    assert_eq!(order["totals"]["tax"], "1.75");
    assert_eq!(order["totals"]["total"], "48.25");
    assert_eq!(order["items"][0]["amount"], "20.00");

    // Remove "A" (10 × 2); only "B" (5 × 1) remains.
    let req = test::TestRequest::delete()
        .uri(&format!("/stores/{store}/orders/{id}/items/A"))
        .insert_header((header::AUTHORIZATION, token.clone()))
        .to_request();
    let order: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(order["items"].as_array().unwrap().len(), 1);
    assert_eq!(order["totals"]["subtotal"], "5.00");

    // Unknown codes leave the order as it was.
    let req = test::TestRequest::delete()
        .uri(&format!("/stores/{store}/orders/{id}/items/nonexistent"))
        .insert_header((header::AUTHORIZATION, token.clone()))
        .to_request();
    let order: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(order["items"].as_array().unwrap().len(), 1);

    let req = test::TestRequest::post()
        .uri(&format!("/stores/{store}/orders/{id}/items"))
        .insert_header((header::AUTHORIZATION, token.clone()))
        .set_json(json!({ "code": "C", "name": "Spoon", "unitPrice": "1.25", "quantity": 4 }))
        .to_request();
    let order: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(order["totals"]["subtotal"], "10.00");

    let req = test::TestRequest::post()
        .uri(&format!("/stores/{store}/orders/{id}/items"))
        .insert_header((header::AUTHORIZATION, token))
        .set_json(json!({ "code": "C", "name": "Spoon", "unitPrice": "1.25", "quantity": 1 }))
        .to_request();
    assert_eq!(test::call_service(&app, req).await.status(), StatusCode::CONFLICT);
}

#[actix_web::test]
async fn update_replaces_order_wholesale() {
    let app = app!(state());
    let store = Uuid::new_v4();
    let token = token_for(store);

    let req = test::TestRequest::post()
        .uri(&format!("/stores/{store}/orders"))
        .insert_header((header::AUTHORIZATION, token.clone()))
        .set_json(order_body())
        .to_request();
    let created: Value = test::call_and_read_body_json(&app, req).await;
    let id = created["id"].as_str().unwrap().to_string();

    let mut body = order_body();
    body["items"] = json!([{ "code": "Z", "name": "Kettle", "unitPrice": "40", "quantity": 1 }]);
    body["shippingFee"] = json!("0");
    let req = test::TestRequest::put()
        .uri(&format!("/stores/{store}/orders/{id}"))
        .insert_header((header::AUTHORIZATION, token))
        .set_json(body)
        .to_request();
    let order: Value = test::call_and_read_body_json(&app, req).await;

    assert_eq!(order["code"], created["code"]);
    assert_eq!(order["items"][0]["code"], "Z");
    assert_eq!(order["totals"]["total"], "42.80");
}

#[actix_web::test]
async fn order_validation_errors_are_unprocessable() {
    let app = app!(state());
    let store = Uuid::new_v4();
    let mut body = order_body();
    body["customerName"] = json!("");

    let req = test::TestRequest::post()
        .uri(&format!("/stores/{store}/orders"))
        .insert_header((header::AUTHORIZATION, token_for(store)))
        .set_json(body)
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::UNPROCESSABLE_ENTITY);

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["fields"][0]["field"], "customerName");
    assert_eq!(body["fields"][0]["message"], "Required");
}

#[actix_web::test]
async fn duplicate_item_codes_conflict() {
    let app = app!(state());
    let store = Uuid::new_v4();
    let mut body = order_body();
    body["items"][1]["code"] = json!("A");

    let req = test::TestRequest::post()
        .uri(&format!("/stores/{store}/orders"))
        .insert_header((header::AUTHORIZATION, token_for(store)))
        .set_json(body)
        .to_request();
    assert_eq!(test::call_service(&app, req).await.status(), StatusCode::CONFLICT);
}

#[actix_web::test]
async fn quote_uses_default_shipping_fee() {
    let app = app!(state());
    let store = Uuid::new_v4();
    let req = test::TestRequest::post()
        .uri(&format!("/stores/{store}/orders/quote"))
        .insert_header((header::AUTHORIZATION, token_for(store)))
        .set_json(json!({
            "items": [
                { "code": "A", "unitPrice": "10", "quantity": 2 },
                { "code": "B", "unitPrice": "5", "quantity": 1 }
            ]
        }))
        .to_request();
    let totals: Value = test::call_and_read_body_json(&app, req).await;

    assert_eq!(totals["shipping"], "21.50");
    assert_eq!(totals["total"], "48.25");
}

#[actix_web::test]
async fn orders_of_other_stores_are_not_found() {
    let app = app!(state());
    let owner = Uuid::new_v4();
    let req = test::TestRequest::post()
        .uri(&format!("/stores/{owner}/orders"))
        .insert_header((header::AUTHORIZATION, token_for(owner)))
        .set_json(order_body())
        .to_request();
    let created: Value = test::call_and_read_body_json(&app, req).await;

    let other = Uuid::new_v4();
    let req = test::TestRequest::get()
        .uri(&format!("/stores/{other}/orders/{}", created["id"].as_str().unwrap()))
        .insert_header((header::AUTHORIZATION, token_for(other)))
        .to_request();
    assert_eq!(test::call_service(&app, req).await.status(), StatusCode::NOT_FOUND);
}

#[actix_web::test]
async fn quote_rejects_amounts_beyond_column_range() {
    let app = app!(state());
    let store = Uuid::new_v4();
    let req = test::TestRequest::post()
        .uri(&format!("/stores/{store}/orders/quote"))
        .insert_header((header::AUTHORIZATION, token_for(store)))
        .set_json(json!({
            "items": [{ "code": "A", "unitPrice": "1e1000000", "quantity": 1 }]
        }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::UNPROCESSABLE_ENTITY);

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["fields"][0]["field"], "items.unitPrice");
    assert_eq!(body["fields"][0]["message"], "Out of range");
}

#[actix_web::test]
async fn empty_quote_has_two_place_zeros() {
    let app = app!(state());
    let store = Uuid::new_v4();
    let req = test::TestRequest::post()
        .uri(&format!("/stores/{store}/orders/quote"))
        .insert_header((header::AUTHORIZATION, token_for(store)))
        .set_json(json!({ "items": [], "shippingFee": "0" }))
        .to_request();
    let totals: Value = test::call_and_read_body_json(&app, req).await;

    assert_eq!(
        totals,
        json!({ "subtotal": "0.00", "tax": "0.00", "shipping": "0.00", "total": "0.00" })
    );
}

#[actix_web::test]
async fn half_cents_round_up() {
    let app = app!(state());
    let store = Uuid::new_v4();
    let req = test::TestRequest::post()
        .uri(&format!("/stores/{store}/orders/quote"))
        .insert_header((header::AUTHORIZATION, token_for(store)))
        .set_json(json!({
            "items": [{ "code": "A", "unitPrice": "0.125", "quantity": 1 }],
            "shippingFee": "0"
        }))
        .to_request();
    let totals: Value = test::call_and_read_body_json(&app, req).await;

    assert_eq!(totals["subtotal"], "0.13");
    assert_eq!(totals["tax"], "0.01");
    assert_eq!(totals["total"], "0.13");
}

#[actix_web::test]
async fn fee_finer_than_a_cent_is_rejected_and_order_kept() {
    let app = app!(state());
    let store = Uuid::new_v4();
    let token = token_for(store);

    let req = test::TestRequest::post()
        .uri(&format!("/stores/{store}/orders"))
        .insert_header((header::AUTHORIZATION, token.clone()))
        .set_json(order_body())
        .to_request();
    let created: Value = test::call_and_read_body_json(&app, req).await;
    let id = created["id"].as_str().unwrap().to_string();

    let mut body = order_body();
    body["shippingFee"] = json!("0.005");
    let req = test::TestRequest::put()
        .uri(&format!("/stores/{store}/orders/{id}"))
        .insert_header((header::AUTHORIZATION, token.clone()))
        .set_json(body)
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::UNPROCESSABLE_ENTITY);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["fields"][0]["field"], "shippingFee");
    assert_eq!(body["fields"][0]["message"], "Too many decimal places");

    let req = test::TestRequest::get()
        .uri(&format!("/stores/{store}/orders/{id}"))
        .insert_header((header::AUTHORIZATION, token))
        .to_request();
    let order: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(order["shippingFee"], "21.50");
    assert_eq!(order["totals"]["total"], "48.25");
}
