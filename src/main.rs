use actix_cors::Cors;
use actix_web::{middleware, web, App, HttpServer};
use finder_match::config::Settings;
use finder_match::routes::auth::JwtVerifier;
use finder_match::routes::errors::{handle_json_payload_error, handle_query_payload_error};
use finder_match::routes::{self, AppState};
use finder_match::services::{PostgresStore, Store};
use std::io;
use std::sync::Arc;
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

fn init_tracing(level: &str, format: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_level(true);

    if format == "pretty" {
        subscriber.pretty().init();
    } else {
        subscriber.json().init();
    }
}

#[actix_web::main]
async fn main() -> io::Result<()> {
    // Load .env file if present
    dotenv::dotenv().ok();

    let settings = Settings::load().map_err(|e| {
        eprintln!("Configuration error: {}", e);
        io::Error::new(io::ErrorKind::InvalidInput, e.to_string())
    })?;

    init_tracing(&settings.logging.level, &settings.logging.format);

    info!("Starting Finder Match service...");

    if settings.auth.jwt_secret.is_empty() {
        error!("auth.jwt_secret is not set; refusing to start");
        return Err(io::Error::new(
            io::ErrorKind::InvalidInput,
            "auth.jwt_secret must be configured",
        ));
    }
    if settings.auth.jwt_secret == "change-me" {
        warn!("auth.jwt_secret still has the default value");
    }

    let store = PostgresStore::from_settings(&settings.database)
        .await
        .map_err(|e| {
            error!("Failed to initialize PostgreSQL store: {}", e);
            io::Error::new(io::ErrorKind::Other, e.to_string())
        })?;

    info!(
        "PostgreSQL store initialized (max: {} connections)",
        settings.database.max_connections
    );

    let store: Arc<dyn Store> = Arc::new(store);
    let app_state = AppState::new(store, JwtVerifier::new(&settings.auth));

    // Configure HTTP server
    let host = settings.server.host.clone();
    let port = settings.server.port;
    let workers = settings.server.workers.unwrap_or(4);

    info!("Starting HTTP server on {}:{}", host, port);

    HttpServer::new(move || {
        let cors = Cors::permissive();

        App::new()
            .app_data(web::Data::new(app_state.clone()))
            .app_data(web::JsonConfig::default().error_handler(handle_json_payload_error))
            .app_data(web::QueryConfig::default().error_handler(handle_query_payload_error))
            .wrap(cors)
            .wrap(middleware::Logger::default())
            .wrap(middleware::Compress::default())
            .configure(routes::configure_routes)
    })
    .workers(workers)
    .bind((host, port))?
    .run()
    .await
}
