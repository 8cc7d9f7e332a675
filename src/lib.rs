pub mod application;
pub mod config;
pub mod db;
pub mod domain;
pub mod errors;
pub mod handlers;
pub mod infrastructure;
pub mod openapi;
pub mod schema;

use std::sync::Arc;

use actix_web::{middleware::Logger, web, App, HttpServer};
use diesel_migrations::{embed_migrations, EmbeddedMigrations, MigrationHarness};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

pub use application::order_service::OrderService;
pub use config::Config;
pub use db::{create_pool, DbPool};
pub use domain::ports::{OrderRepository, ProductCatalog};

use infrastructure::order_repo::DieselOrderRepository;

pub const MIGRATIONS: EmbeddedMigrations = embed_migrations!("migrations");

/// Run any pending Diesel migrations against the pool's database.
pub fn run_migrations(pool: &DbPool) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let mut conn = pool.get()?;
    conn.run_pending_migrations(MIGRATIONS)?;
    Ok(())
}

/// Register the order and health routes.
///
/// The caller provides `web::Data<OrderService>` as app data.
pub fn routes(cfg: &mut web::ServiceConfig) {
    cfg.route("/health", web::get().to(handlers::health::health))
        .service(
            web::scope("/orders")
                .route("", web::get().to(handlers::orders::list_orders))
                .route("", web::post().to(handlers::orders::create_order))
                .route(
                    "/multiple",
                    web::post().to(handlers::orders::create_multiple_orders),
                )
                .route("/{id}", web::get().to(handlers::orders::get_order))
                .route("/{id}", web::put().to(handlers::orders::update_order))
                .route("/{id}", web::delete().to(handlers::orders::delete_order)),
        );
}

/// Build and return an actix-web `Server` bound to `host:port`.
///
/// The caller is responsible for `.await`-ing (or `tokio::spawn`-ing) the
/// returned server.
pub fn build_server(
    pool: DbPool,
    catalog: Arc<dyn ProductCatalog>,
    host: &str,
    port: u16,
) -> std::io::Result<actix_web::dev::Server> {
    let repo: Arc<dyn OrderRepository> = Arc::new(DieselOrderRepository::new(pool));
    let service = web::Data::new(OrderService::new(repo, catalog));

    Ok(HttpServer::new(move || {
        App::new()
            .app_data(service.clone())
            .wrap(Logger::default())
            .configure(routes)
            .service(
                SwaggerUi::new("/swagger-ui/{_:.*}")
                    .url("/api-docs/openapi.json", openapi::ApiDoc::openapi()),
            )
    })
    .bind((host.to_string(), port))?
    .run())
}
