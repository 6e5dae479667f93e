use actix_web::{web, HttpResponse};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::auth::StoreSession;
use crate::domain::account::{Account, AccountStatus, NewAccount};
use crate::domain::pagination::{PageRequest, DEFAULT_PAGE_SIZE};
use crate::errors::AppError;
use crate::SharedAccountService;

// ── Request / response DTOs ──────────────────────────────────────────────────

#[derive(Debug, Deserialize, ToSchema)]
pub struct ListAccountsParams {
    /// Page number (1-based). Defaults to 1.
    #[serde(default = "default_page")]
    pub page: i64,
    /// Number of accounts per page. Defaults to 10, maximum 100.
    #[serde(default = "default_size")]
    pub size: i64,
}

fn default_page() -> i64 {
    1
}

fn default_size() -> i64 {
    DEFAULT_PAGE_SIZE
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AccountResponse {
    pub id: Uuid,
    pub code: String,
    pub name: String,
    pub email: String,
    pub role: String,
    /// `true` when the account may sign in.
    pub status: bool,
    pub joined_on: String,
}

impl From<Account> for AccountResponse {
    fn from(a: Account) -> Self {
        AccountResponse {
            id: a.id,
            code: a.code,
            name: a.name,
            email: a.email,
            role: a.role,
            status: a.status.is_active(),
            joined_on: a.joined_on.to_rfc3339(),
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ListAccountsResponse {
    pub data: Vec<AccountResponse>,
    pub count: i64,
    pub page: i64,
    pub size: i64,
    pub page_count: i64,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateAccountRequest {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub role: String,
}

// ── Handlers ─────────────────────────────────────────────────────────────────

/// GET /stores/{store_id}/accounts
///
/// Returns one page of the store's accounts along with the total count and
/// the number of pages at the requested size.
#[utoipa::path(
    get,
    path = "/stores/{store_id}/accounts",
    params(
        ("store_id" = Uuid, Path, description = "Store UUID"),
        ("page" = Option<i64>, Query, description = "Page number (1-based, default 1)"),
        ("size" = Option<i64>, Query, description = "Accounts per page (default 10, max 100)"),
    ),
    responses(
        (status = 200, description = "Paginated list of accounts", body = ListAccountsResponse),
        (status = 401, description = "Missing or invalid credentials"),
        (status = 403, description = "Token belongs to another store"),
    ),
    tag = "accounts"
)]
pub async fn list_accounts(
    session: StoreSession,
    service: web::Data<SharedAccountService>,
    path: web::Path<Uuid>,
    query: web::Query<ListAccountsParams>,
) -> Result<HttpResponse, AppError> {
    let store_id = session.authorize(path.into_inner())?;
    let params = query.into_inner();
    let request = PageRequest::new(params.page, params.size);

    // A page past the end (e.g. after the last entry on it was removed) is
    // served as the last page that has data.
    let result = web::block(move || service.list_accounts(store_id, request))
        .await
        .map_err(|e| AppError::Internal(e.to_string()))??;
    if result.page != request {
        log::debug!(
            "Page {} is past the end, serving page {}",
            request.page_no,
            result.page.page_no
        );
    }

    Ok(HttpResponse::Ok().json(ListAccountsResponse {
        count: result.total_count,
        page: result.page.page_no,
        size: result.page.page_size,
        page_count: result.page_count(),
        data: result.items.into_iter().map(AccountResponse::from).collect(),
    }))
}

/// GET /stores/{store_id}/accounts/{id}
#[utoipa::path(
    get,
    path = "/stores/{store_id}/accounts/{id}",
    params(
        ("store_id" = Uuid, Path, description = "Store UUID"),
        ("id" = Uuid, Path, description = "Account UUID"),
    ),
    responses(
        (status = 200, description = "Account found", body = AccountResponse),
        (status = 404, description = "Account not found"),
    ),
    tag = "accounts"
)]
pub async fn get_account(
    session: StoreSession,
    service: web::Data<SharedAccountService>,
    path: web::Path<(Uuid, Uuid)>,
) -> Result<HttpResponse, AppError> {
    let (store_id, id) = path.into_inner();
    let store_id = session.authorize(store_id)?;

    let account = web::block(move || service.get_account(store_id, id))
        .await
        .map_err(|e| AppError::Internal(e.to_string()))??;

    Ok(HttpResponse::Ok().json(AccountResponse::from(account)))
}

/// POST /stores/{store_id}/accounts
#[utoipa::path(
    post,
    path = "/stores/{store_id}/accounts",
    params(("store_id" = Uuid, Path, description = "Store UUID")),
    request_body = CreateAccountRequest,
    responses(
        (status = 201, description = "Account created", body = AccountResponse),
        (status = 422, description = "Required fields missing"),
    ),
    tag = "accounts"
)]
pub async fn create_account(
    session: StoreSession,
    service: web::Data<SharedAccountService>,
    path: web::Path<Uuid>,
    body: web::Json<CreateAccountRequest>,
) -> Result<HttpResponse, AppError> {
    let store_id = session.authorize(path.into_inner())?;
    let body = body.into_inner();
    let account = NewAccount {
        name: body.name,
        email: body.email,
        role: body.role,
    };

    let created = web::block(move || service.create_account(store_id, account))
        .await
        .map_err(|e| AppError::Internal(e.to_string()))??;

    Ok(HttpResponse::Created().json(AccountResponse::from(created)))
}

/// PATCH /stores/{store_id}/accounts/{id}
///
/// Re-enables a disabled account.
#[utoipa::path(
    patch,
    path = "/stores/{store_id}/accounts/{id}",
    params(
        ("store_id" = Uuid, Path, description = "Store UUID"),
        ("id" = Uuid, Path, description = "Account UUID"),
    ),
    responses(
        (status = 204, description = "Account enabled"),
        (status = 404, description = "Account not found"),
    ),
    tag = "accounts"
)]
pub async fn activate_account(
    session: StoreSession,
    service: web::Data<SharedAccountService>,
    path: web::Path<(Uuid, Uuid)>,
) -> Result<HttpResponse, AppError> {
    set_status(session, service, path.into_inner(), AccountStatus::Active).await
}

/// DELETE /stores/{store_id}/accounts/{id}
///
/// Disables the account. The record is kept and can be re-enabled.
#[utoipa::path(
    delete,
    path = "/stores/{store_id}/accounts/{id}",
    params(
        ("store_id" = Uuid, Path, description = "Store UUID"),
        ("id" = Uuid, Path, description = "Account UUID"),
    ),
    responses(
        (status = 204, description = "Account disabled"),
        (status = 404, description = "Account not found"),
    ),
    tag = "accounts"
)]
pub async fn deactivate_account(
    session: StoreSession,
    service: web::Data<SharedAccountService>,
    path: web::Path<(Uuid, Uuid)>,
) -> Result<HttpResponse, AppError> {
    set_status(session, service, path.into_inner(), AccountStatus::Disabled).await
}

async fn set_status(
    session: StoreSession,
    service: web::Data<SharedAccountService>,
    (store_id, id): (Uuid, Uuid),
    status: AccountStatus,
) -> Result<HttpResponse, AppError> {
    let store_id = session.authorize(store_id)?;

    web::block(move || service.set_status(store_id, id, status))
        .await
        .map_err(|e| AppError::Internal(e.to_string()))??;

    Ok(HttpResponse::NoContent().finish())
}
