use std::sync::Arc;

use dotenvy::dotenv;
use order_service::infrastructure::product_client::HttpProductCatalog;
use order_service::{build_server, create_pool, run_migrations, Config};

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    dotenv().ok();
    env_logger::init_from_env(env_logger::Env::default().default_filter_or("info"));

    let config = Config::from_env().map_err(std::io::Error::other)?;

    let pool = create_pool(&config.database_url).map_err(std::io::Error::other)?;
    run_migrations(&pool).map_err(std::io::Error::other)?;

    let catalog = HttpProductCatalog::new(&config.products_base_url, config.products_timeout)
        .map_err(std::io::Error::other)?;

    log::info!(
        "Starting server at http://{}:{} (products service at {})",
        config.host,
        config.port,
        config.products_base_url
    );

    build_server(pool, Arc::new(catalog), &config.host, config.port)?.await
}
