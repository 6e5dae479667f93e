pub mod accounts;
pub mod orders;

use actix_web::web;
use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    paths(
        accounts::list_accounts,
        accounts::get_account,
        accounts::create_account,
        accounts::activate_account,
        accounts::deactivate_account,
        orders::get_order,
        orders::create_order,
        orders::update_order,
        orders::quote_order,
        orders::add_order_item,
        orders::remove_order_item,
    ),
    components(schemas(
        accounts::AccountResponse,
        accounts::ListAccountsResponse,
        accounts::CreateAccountRequest,
        orders::LineItemRequest,
        orders::OrderDraftRequest,
        orders::LineItemResponse,
        orders::TotalsResponse,
        orders::OrderResponse,
        orders::CreateOrderResponse,
    )),
    tags(
        (name = "accounts", description = "Store operator accounts"),
        (name = "orders", description = "Order drafts and their totals"),
    )
)]
pub struct ApiDoc;

/// Register every `/stores/{store_id}` route.
pub fn routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/stores/{store_id}")
            .route("/accounts", web::get().to(accounts::list_accounts))
            .route("/accounts", web::post().to(accounts::create_account))
            .route("/accounts/{id}", web::get().to(accounts::get_account))
            .route("/accounts/{id}", web::patch().to(accounts::activate_account))
            .route("/accounts/{id}", web::delete().to(accounts::deactivate_account))
            .route("/orders", web::post().to(orders::create_order))
            .route("/orders/quote", web::post().to(orders::quote_order))
            .route("/orders/{id}", web::get().to(orders::get_order))
            .route("/orders/{id}", web::put().to(orders::update_order))
            .route("/orders/{id}/items", web::post().to(orders::add_order_item))
            .route(
                "/orders/{id}/items/{code}",
                web::delete().to(orders::remove_order_item),
            ),
    );
}
