pub mod application;
pub mod auth;
pub mod config;
pub mod db;
pub mod domain;
pub mod errors;
pub mod handlers;
pub mod infrastructure;
pub mod schema;

use std::sync::Arc;

use actix_web::{middleware::Logger, web, App, HttpServer};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use application::account_service::AccountService;
use application::order_service::{OrderService, PricingConfig};
use auth::AuthConfig;
use domain::ports::{AccountRepository, OrderRepository};
use infrastructure::account_repo::DieselAccountRepository;
use infrastructure::order_repo::DieselOrderRepository;

pub use config::Settings;
pub use db::{create_pool, run_migrations, DbPool};

pub type SharedAccountService = AccountService<Arc<dyn AccountRepository>>;
pub type SharedOrderService = OrderService<Arc<dyn OrderRepository>>;

/// Everything the HTTP handlers need, shared across workers.
#[derive(Clone)]
pub struct AppState {
    accounts: web::Data<SharedAccountService>,
    orders: web::Data<SharedOrderService>,
    auth: web::Data<AuthConfig>,
}

impl AppState {
    pub fn new(
        accounts: Arc<dyn AccountRepository>,
        orders: Arc<dyn OrderRepository>,
        pricing: PricingConfig,
        jwt_secret: &str,
    ) -> Self {
        Self {
            accounts: web::Data::new(AccountService::new(accounts)),
            orders: web::Data::new(OrderService::new(orders, pricing)),
            auth: web::Data::new(AuthConfig::new(jwt_secret)),
        }
    }

    /// State backed by the Postgres repositories.
    pub fn with_pool(pool: DbPool, settings: &Settings) -> Self {
        Self::new(
            Arc::new(DieselAccountRepository::new(pool.clone())),
            Arc::new(DieselOrderRepository::new(pool)),
            settings.pricing.clone(),
            &settings.jwt_secret,
        )
    }

    /// Attach shared state and the API routes to an app or scope.
    pub fn configure(&self, cfg: &mut web::ServiceConfig) {
        cfg.app_data(self.accounts.clone())
            .app_data(self.orders.clone())
            .app_data(self.auth.clone())
            .configure(handlers::routes);
    }
}

/// Build and return an actix-web `Server` bound to `host:port`.
///
/// The caller is responsible for `.await`-ing (or `tokio::spawn`-ing) the
/// returned server.
pub fn build_server(
    state: AppState,
    host: &str,
    port: u16,
) -> std::io::Result<actix_web::dev::Server> {
    let openapi = handlers::ApiDoc::openapi();
    Ok(HttpServer::new(move || {
        let state = state.clone();
        App::new()
            .wrap(Logger::default())
            .configure(move |cfg| state.configure(cfg))
            .service(
                SwaggerUi::new("/swagger-ui/{_:.*}")
                    .url("/api-docs/openapi.json", openapi.clone()),
            )
    })
    .bind((host.to_string(), port))?
    .run())
}
