use actix_cors::Cors;
use actix_web::{web, App, HttpServer, middleware};
use hoodmatch::config::{LoggingSettings, Settings};
use hoodmatch::routes::{self, AppState};
use hoodmatch::services::{Catalog, UserStore};
use hoodmatch::Matcher;
use std::sync::Arc;
use tracing::{info, error};
use tracing_subscriber::EnvFilter;

/// LOG_LEVEL and LOG_FORMAT override the configured logging section
fn init_tracing(logging: &LoggingSettings) {
    let log_level = std::env::var("LOG_LEVEL").unwrap_or_else(|_| logging.level.clone());
    let log_format = std::env::var("LOG_FORMAT").unwrap_or_else(|_| logging.format.clone());

    let filter = EnvFilter::try_new(&log_level).unwrap_or_else(|_| EnvFilter::new("info"));

    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_level(true);

    if log_format == "pretty" {
        subscriber.pretty().init();
    } else {
        subscriber.compact().init();
    }
}

fn startup_error(context: &str, err: impl std::fmt::Display) -> std::io::Error {
    error!("{}: {}", context, err);
    std::io::Error::new(std::io::ErrorKind::Other, format!("{}: {}", context, err))
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    // Load .env file if present
    dotenv::dotenv().ok();

    let settings = Settings::load();

    // Initialize logging
    let logging = settings
        .as_ref()
        .map(|settings| settings.logging.clone())
        .unwrap_or_default();
    init_tracing(&logging);

    info!("Starting Hoodmatch neighborhood matching service...");

    let settings = settings.map_err(|e| startup_error("Failed to load configuration", e))?;

    info!("Configuration loaded successfully");

    // Load the neighborhood catalog
    let catalog = match settings.catalog.path.as_deref() {
        Some(path) => Catalog::from_path(path),
        None => Catalog::builtin(),
    }
    .map_err(|e| startup_error("Failed to load catalog", e))?;

    info!("Catalog loaded with {} neighborhoods", catalog.len());

    // Open the user store (in-memory when no path is configured)
    let store = match settings.store.path.as_deref().filter(|path| !path.is_empty()) {
        Some(path) => UserStore::open(path)
            .await
            .map_err(|e| startup_error("Failed to open user store", e))?,
        None => {
            info!("No store path configured, users are kept in memory");
            UserStore::in_memory()
        }
    };

    // Initialize matcher with configured weights
    let weights = settings.scoring_weights();
    let matcher = Matcher::new(weights);

    info!("Matcher initialized with weights: {:?}", weights);

    // Build application state
    let app_state = AppState {
        catalog: Arc::new(catalog),
        store: Arc::new(store),
        matcher,
        matching: settings.matching.clone(),
    };

    // Configure HTTP server
    let host = settings.server.host.clone();
    let port = settings.server.port;
    let workers = settings.server.workers.unwrap_or(4);

    info!("Starting HTTP server on {}:{}", host, port);

    HttpServer::new(move || {
        let cors = Cors::permissive();

        App::new()
            .app_data(web::Data::new(app_state.clone()))
            .app_data(web::JsonConfig::default().error_handler(routes::json_error_handler))
            .app_data(web::QueryConfig::default().error_handler(routes::query_error_handler))
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
