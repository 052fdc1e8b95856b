use std::io;
use std::sync::Arc;

use actix_cors::Cors;
use actix_web::{middleware::Logger, web, App, HttpServer};
use sqlx::PgPool;

use servicehub::{
    auth::{AuthMiddleware, Authenticator},
    config::Config,
    error::json_error_handler,
    routes::{self, health},
    store::{PgUserStore, UserStore},
};

#[actix_web::main]
async fn main() -> io::Result<()> {
    dotenv::dotenv().ok();
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = Config::from_env().map_err(|e| io::Error::new(io::ErrorKind::InvalidInput, e))?;

    let pool = PgPool::connect(&config.database_url)
        .await
        .map_err(|e| io::Error::new(io::ErrorKind::Other, e))?;
    log::info!("Database connected");

    sqlx::migrate!("./migrations")
        .run(&pool)
        .await
        .map_err(|e| io::Error::new(io::ErrorKind::Other, e))?;

    let store: Arc<dyn UserStore> = Arc::new(PgUserStore::new(pool));
    let authenticator = Arc::new(Authenticator::from_config(&config, Arc::clone(&store)));

    log::info!("Environment: {:?}", config.app_env);
    log::info!("Starting ServiceHub server at {}", config.server_url());

    let cors_origin = config.cors_origin.clone();
    HttpServer::new(move || {
        App::new()
            .app_data(web::Data::from(Arc::clone(&store)))
            .app_data(web::JsonConfig::default().error_handler(json_error_handler))
            .wrap(
                Cors::default()
                    .allowed_origin(&cors_origin)
                    .allow_any_method()
                    .allow_any_header()
                    .supports_credentials()
                    .max_age(3600),
            )
            .wrap(Logger::default())
            .service(health::index)
            .service(health::health)
            .service(
                web::scope("/api")
                    .wrap(AuthMiddleware::new(Arc::clone(&authenticator)))
                    .configure(routes::config),
            )
            .default_service(web::to(routes::not_found))
    })
    .bind((config.server_host.as_str(), config.server_port))?
    .run()
    .await
}
