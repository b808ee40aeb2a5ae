use actix_cors::Cors;
use actix_web::{web, App, HttpServer, middleware};
use lovefi_match::config::{LogFormat, Settings};
use lovefi_match::core::CompatibilityScorer;
use lovefi_match::models::ScoringWeights;
use lovefi_match::routes::{self, handle_json_payload_error, AppState};
use lovefi_match::services::{CachedLookup, StaticGazetteer};
use std::sync::Arc;
use std::time::Duration;
use tracing::{info, error};
use tracing_subscriber::EnvFilter;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    // Load .env file if present
    dotenv::dotenv().ok();

    // Load configuration
    let settings = match Settings::load() {
        Ok(settings) => settings,
        Err(e) => {
            eprintln!("Failed to load configuration: {}", e);
            return Err(std::io::Error::new(std::io::ErrorKind::InvalidInput, e));
        }
    };

    // Initialize logging; LOG_LEVEL / LOG_FORMAT win over the config file
    let log_level = std::env::var("LOG_LEVEL").unwrap_or_else(|_| settings.logging.level.clone());
    let log_format = std::env::var("LOG_FORMAT").unwrap_or_else(|_| settings.logging.format.clone());

    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_new(&log_level).unwrap_or_else(|_| EnvFilter::new("info")))
        .with_target(false)
        .with_level(true);

    match LogFormat::parse(&log_format) {
        LogFormat::Json => subscriber.json().init(),
        LogFormat::Pretty => subscriber.pretty().init(),
        LogFormat::Compact => subscriber.compact().init(),
    }

    info!("Starting LoveFi Match scoring service...");

    // Build the coordinate lookup from the configured places
    let places = settings
        .geocoder
        .places
        .iter()
        .map(|place| (place.address.as_str(), place.latitude, place.longitude));

    let gazetteer = StaticGazetteer::from_entries(places).map_err(|e| {
        error!("Invalid geocoder configuration: {}", e);
        std::io::Error::new(std::io::ErrorKind::InvalidInput, e)
    })?;

    info!("Gazetteer loaded with {} places", gazetteer.len());

    let lookup = CachedLookup::new(
        gazetteer,
        settings.geocoder.cache_size,
        settings.geocoder.cache_ttl_secs,
    );

    // Initialize scorer with configured weights
    let weights = ScoringWeights::from(&settings.scoring.weights);

    let scorer = CompatibilityScorer::new(weights, Arc::new(lookup))
        .map_err(|e| {
            error!("Invalid scoring configuration: {}", e);
            std::io::Error::new(std::io::ErrorKind::InvalidInput, e)
        })?
        .with_default_max_age_diff(settings.scoring.default_max_age_diff);

    info!("Scorer initialized with weights: {:?}", weights);

    // Build application state
    let app_state = AppState {
        scorer,
        default_search_radius_km: settings.scoring.default_search_radius_km,
        scoring_timeout: Duration::from_millis(settings.scoring.timeout_ms),
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
            .app_data(web::JsonConfig::default().error_handler(handle_json_payload_error))
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
