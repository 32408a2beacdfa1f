use actix_web::{middleware, web, App, HttpServer};
use dotenv::dotenv;
use env_logger::Env;

use travel_api::{config::AppConfig, db};

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    dotenv().ok();
    env_logger::init_from_env(Env::default().default_filter_or("info"));

    let config = AppConfig::from_env().map_err(|e| {
        log::error!("invalid configuration: {}", e);
        std::io::Error::new(std::io::ErrorKind::InvalidInput, e)
    })?;

    log::info!("Connecting to database...");
    let pool = db::get_db_pool(&config).await.map_err(|e| {
        log::error!("failed to open database: {}", e);
        std::io::Error::new(std::io::ErrorKind::Other, e)
    })?;

    log::info!("Running migrations...");
    db::run_migrations(&pool).await.map_err(|e| {
        log::error!("failed to run migrations: {}", e);
        std::io::Error::new(std::io::ErrorKind::Other, e)
    })?;

    log::info!(
        "Starting server at http://{}:{} (docs at /docs/)",
        config.host,
        config.port
    );

    let pool_data = web::Data::new(pool);

    HttpServer::new(move || {
        App::new()
            .app_data(pool_data.clone())
            .wrap(middleware::Logger::default())
            .configure(travel_api::configure)
    })
    .bind((config.host.as_str(), config.port))?
    .run()
    .await
}
