use actix_web::{web, HttpResponse};
use bigdecimal::BigDecimal;
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use utoipa::ToSchema;
use uuid::Uuid;

use crate::application::order_service::PricedOrder;
use crate::auth::StoreSession;
use crate::domain::errors::{DomainError, FieldError};
use crate::domain::order::{LineItem, OrderDraft};
use crate::domain::totals::{format_cents, OrderTotals};
use crate::errors::AppError;
use crate::SharedOrderService;

// ── Request / response DTOs ──────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct LineItemRequest {
    pub code: String,
    #[serde(default)]
    pub name: String,
    /// Decimal price as a string to avoid floating-point issues, e.g. "9.99"
    pub unit_price: String,
    pub quantity: i32,
}

impl LineItemRequest {
    fn into_line_item(self) -> Result<LineItem, DomainError> {
        let unit_price = parse_decimal("items.unitPrice", &self.unit_price)
            .map_err(|f| DomainError::Validation(vec![f]))?;
        Ok(LineItem::new(self.code, self.name, unit_price, self.quantity))
    }
}

/// The order form as submitted by the console. Missing text fields are read
/// as empty and reported by validation.
#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase", default)]
pub struct OrderDraftRequest {
    pub items: Vec<LineItemRequest>,
    /// Decimal string; the configured default fee applies when omitted.
    pub shipping_fee: Option<String>,
    pub customer_name: String,
    pub customer_contact: String,
    pub shipping_address: String,
    pub billing_address: String,
}

impl OrderDraftRequest {
    /// Build a draft, parsing money fields and adding items one by one so a
    /// repeated code is rejected.
    pub fn into_draft(self, default_shipping_fee: &BigDecimal) -> Result<OrderDraft, DomainError> {
        let mut errors = Vec::new();

        let shipping_fee = match self.shipping_fee.as_deref().map(str::trim) {
            None | Some("") => default_shipping_fee.clone(),
            Some(raw) => parse_decimal("shippingFee", raw).unwrap_or_else(|f| {
                errors.push(f);
                default_shipping_fee.clone()
            }),
        };

        let mut draft = OrderDraft {
            id: None,
            code: None,
            items: Vec::with_capacity(self.items.len()),
            shipping_fee,
            customer_name: self.customer_name,
            customer_contact: self.customer_contact,
            shipping_address: self.shipping_address,
            billing_address: self.billing_address,
        };

        for item in self.items {
            match parse_decimal("items.unitPrice", &item.unit_price) {
                Ok(unit_price) => {
                    draft.add_item(LineItem::new(item.code, item.name, unit_price, item.quantity))?
                }
                Err(f) => errors.push(f),
            }
        }

        if errors.is_empty() {
            Ok(draft)
        } else {
            Err(DomainError::Validation(errors))
        }
    }
}

/// Longest amount string accepted; the widest column value needs 14 characters.
const MAX_AMOUNT_LEN: usize = 32;

fn parse_decimal(field: &'static str, raw: &str) -> Result<BigDecimal, FieldError> {
    let raw = raw.trim();
    if raw.len() > MAX_AMOUNT_LEN {
        return Err(FieldError::new(field, "Too long"));
    }
    BigDecimal::from_str(raw).map_err(|_| FieldError::new(field, "Must be a number"))
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct LineItemResponse {
    pub code: String,
    pub name: String,
    pub unit_price: String,
    pub quantity: i32,
    pub amount: String,
}

/// Money figures rounded to cents.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct TotalsResponse {
    pub subtotal: String,
    pub tax: String,
    pub shipping: String,
    pub total: String,
}

impl From<&OrderTotals> for TotalsResponse {
    fn from(totals: &OrderTotals) -> Self {
        let rounded = totals.rounded();
        TotalsResponse {
            subtotal: format_cents(&rounded.subtotal),
            tax: format_cents(&rounded.tax),
            shipping: format_cents(&rounded.shipping),
            total: format_cents(&rounded.total),
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct OrderResponse {
    pub id: Option<Uuid>,
    pub code: Option<String>,
    pub items: Vec<LineItemResponse>,
    pub shipping_fee: String,
    pub customer_name: String,
    pub customer_contact: String,
    pub shipping_address: String,
    pub billing_address: String,
    pub totals: TotalsResponse,
}

impl From<PricedOrder> for OrderResponse {
    fn from(order: PricedOrder) -> Self {
        let PricedOrder { draft, totals } = order;
        OrderResponse {
            id: draft.id,
            code: draft.code,
            items: draft
                .items
                .into_iter()
                .map(|item| LineItemResponse {
                    amount: format_cents(&item.amount()),
                    unit_price: item.unit_price.to_string(),
                    code: item.code,
                    name: item.name,
                    quantity: item.quantity,
                })
                .collect(),
            shipping_fee: format_cents(&draft.shipping_fee),
            customer_name: draft.customer_name,
            customer_contact: draft.customer_contact,
            shipping_address: draft.shipping_address,
            billing_address: draft.billing_address,
            totals: TotalsResponse::from(&totals),
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct CreateOrderResponse {
    pub id: Uuid,
    pub code: String,
}

// ── Handlers ─────────────────────────────────────────────────────────────────

/// GET /stores/{store_id}/orders/{id}
///
/// Returns the order draft with freshly computed totals.
#[utoipa::path(
    get,
    path = "/stores/{store_id}/orders/{id}",
    params(
        ("store_id" = Uuid, Path, description = "Store UUID"),
        ("id" = Uuid, Path, description = "Order UUID"),
    ),
    responses(
        (status = 200, description = "Order found", body = OrderResponse),
        (status = 404, description = "Order not found"),
    ),
    tag = "orders"
)]
pub async fn get_order(
    session: StoreSession,
    service: web::Data<SharedOrderService>,
    path: web::Path<(Uuid, Uuid)>,
) -> Result<HttpResponse, AppError> {
    let (store_id, id) = path.into_inner();
    let store_id = session.authorize(store_id)?;

    let order = web::block(move || service.get_order(store_id, id))
        .await
        .map_err(|e| AppError::Internal(e.to_string()))??;

    Ok(HttpResponse::Ok().json(OrderResponse::from(order)))
}

/// POST /stores/{store_id}/orders
///
/// Creates a new order from a complete draft.
#[utoipa::path(
    post,
    path = "/stores/{store_id}/orders",
    params(("store_id" = Uuid, Path, description = "Store UUID")),
    request_body = OrderDraftRequest,
    responses(
        (status = 201, description = "Order created", body = CreateOrderResponse),
        (status = 409, description = "Two line items share a code"),
        (status = 422, description = "Required fields missing or malformed"),
    ),
    tag = "orders"
)]
pub async fn create_order(
    session: StoreSession,
    service: web::Data<SharedOrderService>,
    path: web::Path<Uuid>,
    body: web::Json<OrderDraftRequest>,
) -> Result<HttpResponse, AppError> {
    let store_id = session.authorize(path.into_inner())?;
    let draft = body
        .into_inner()
        .into_draft(&service.pricing().default_shipping_fee)?;

    let (id, code) = web::block(move || service.create_order(store_id, draft))
        .await
        .map_err(|e| AppError::Internal(e.to_string()))??;

    Ok(HttpResponse::Created().json(CreateOrderResponse { id, code }))
}

/// PUT /stores/{store_id}/orders/{id}
///
/// Replaces the order with the submitted draft, line items included.
#[utoipa::path(
    put,
    path = "/stores/{store_id}/orders/{id}",
    params(
        ("store_id" = Uuid, Path, description = "Store UUID"),
        ("id" = Uuid, Path, description = "Order UUID"),
    ),
    request_body = OrderDraftRequest,
    responses(
        (status = 200, description = "Order updated", body = OrderResponse),
        (status = 404, description = "Order not found"),
        (status = 409, description = "Two line items share a code"),
        (status = 422, description = "Required fields missing or malformed"),
    ),
    tag = "orders"
)]
pub async fn update_order(
    session: StoreSession,
    service: web::Data<SharedOrderService>,
    path: web::Path<(Uuid, Uuid)>,
    body: web::Json<OrderDraftRequest>,
) -> Result<HttpResponse, AppError> {
    let (store_id, id) = path.into_inner();
    let store_id = session.authorize(store_id)?;
    let draft = body
        .into_inner()
        .into_draft(&service.pricing().default_shipping_fee)?;

    let order = web::block(move || service.update_order(store_id, id, draft))
        .await
        .map_err(|e| AppError::Internal(e.to_string()))??;

    Ok(HttpResponse::Ok().json(OrderResponse::from(order)))
}

/// POST /stores/{store_id}/orders/quote
///
/// Computes totals for an unsaved draft. Customer fields are not required.
#[utoipa::path(
    post,
    path = "/stores/{store_id}/orders/quote",
    params(("store_id" = Uuid, Path, description = "Store UUID")),
    request_body = OrderDraftRequest,
    responses(
        (status = 200, description = "Totals for the draft", body = TotalsResponse),
        (status = 409, description = "Two line items share a code"),
        (status = 422, description = "Malformed amounts"),
    ),
    tag = "orders"
)]
pub async fn quote_order(
    session: StoreSession,
    service: web::Data<SharedOrderService>,
    path: web::Path<Uuid>,
    body: web::Json<OrderDraftRequest>,
) -> Result<HttpResponse, AppError> {
    session.authorize(path.into_inner())?;
    let draft = body
        .into_inner()
        .into_draft(&service.pricing().default_shipping_fee)?;

    let totals = service.quote(&draft)?;

    Ok(HttpResponse::Ok().json(TotalsResponse::from(&totals)))
}

/// POST /stores/{store_id}/orders/{id}/items
#[utoipa::path(
    post,
    path = "/stores/{store_id}/orders/{id}/items",
    params(
        ("store_id" = Uuid, Path, description = "Store UUID"),
        ("id" = Uuid, Path, description = "Order UUID"),
    ),
    request_body = LineItemRequest,
    responses(
        (status = 200, description = "Item added", body = OrderResponse),
        (status = 404, description = "Order not found"),
        (status = 409, description = "The order already has an item with this code"),
    ),
    tag = "orders"
)]
pub async fn add_order_item(
    session: StoreSession,
    service: web::Data<SharedOrderService>,
    path: web::Path<(Uuid, Uuid)>,
    body: web::Json<LineItemRequest>,
) -> Result<HttpResponse, AppError> {
    let (store_id, id) = path.into_inner();
    let store_id = session.authorize(store_id)?;
    let item = body.into_inner().into_line_item()?;

    let order = web::block(move || service.add_item(store_id, id, item))
        .await
        .map_err(|e| AppError::Internal(e.to_string()))??;

    Ok(HttpResponse::Ok().json(OrderResponse::from(order)))
}

/// DELETE /stores/{store_id}/orders/{id}/items/{code}
///
/// Removes the line item with the given code. An unknown code leaves the
/// order unchanged.
#[utoipa::path(
    delete,
    path = "/stores/{store_id}/orders/{id}/items/{code}",
    params(
        ("store_id" = Uuid, Path, description = "Store UUID"),
        ("id" = Uuid, Path, description = "Order UUID"),
        ("code" = String, Path, description = "Line item code"),
    ),
    responses(
        (status = 200, description = "Order after removal", body = OrderResponse),
        (status = 404, description = "Order not found"),
    ),
    tag = "orders"
)]
pub async fn remove_order_item(
    session: StoreSession,
    service: web::Data<SharedOrderService>,
    path: web::Path<(Uuid, Uuid, String)>,
) -> Result<HttpResponse, AppError> {
    let (store_id, id, code) = path.into_inner();
    let store_id = session.authorize(store_id)?;

    let order = web::block(move || service.remove_item(store_id, id, &code))
        .await
        .map_err(|e| AppError::Internal(e.to_string()))??;

    Ok(HttpResponse::Ok().json(OrderResponse::from(order)))
}
