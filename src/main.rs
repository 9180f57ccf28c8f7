use actix_cors::Cors;
use actix_web::{web, App, HttpServer, HttpResponse, middleware, error, http::StatusCode};
use neko_match::config::Settings;
use neko_match::routes::{self, recommend::AppState};
use neko_match::services::{load_catalog, open_store, AnthropicClient};
use neko_match::{logging, Recommender};
use std::sync::Arc;
use tracing::{info, error};

/// JSON error response for JSON payload errors
#[derive(Debug, serde::Serialize)]
pub struct JsonError {
    pub error: String,
    pub message: String,
    pub status_code: u16,
}

impl std::fmt::Display for JsonError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.error, self.message)
    }
}

impl std::error::Error for JsonError {}

impl error::ResponseError for JsonError {
    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(StatusCode::from_u16(self.status_code).unwrap_or(StatusCode::BAD_REQUEST))
            .json(self)
    }
}

/// Handle JSON payload errors
pub fn handle_json_payload_error(err: error::JsonPayloadError, req: &actix_web::HttpRequest) -> actix_web::Error {
    tracing::info!("JSON payload error on {}: {}", req.path(), err);
    JsonError {
        error: "invalid_json".to_string(),
        message: format!("Invalid JSON: {}", err),
        status_code: 400,
    }
    .into()
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    // Load .env file if present
    dotenv::dotenv().ok();

    // Load configuration
    let settings = Settings::load().unwrap_or_else(|e| {
        eprintln!("Failed to load configuration: {}", e);
        panic!("Configuration error: {}", e);
    });

    logging::init(&settings.logging);

    info!("Starting Neko Match recommendation service...");

    // Load the catalog once; it stays read-only for the life of the process
    let store = open_store(&settings.catalog).await.map_err(|e| {
        error!("Failed to open catalog: {}", e);
        std::io::Error::new(std::io::ErrorKind::Other, e.to_string())
    })?;
    let catalog = load_catalog(store.as_ref()).await.map_err(|e| {
        error!("Failed to load catalog from {}: {}", store.describe(), e);
        std::io::Error::new(std::io::ErrorKind::InvalidData, e.to_string())
    })?;

    let client = AnthropicClient::from_settings(&settings.llm).map_err(|e| {
        error!("Failed to initialize language model client: {}", e);
        std::io::Error::new(std::io::ErrorKind::Other, e.to_string())
    })?;

    info!("Language model client initialized ({})", client.model());

    let app_state = AppState {
        catalog,
        recommender: Recommender::new(Arc::new(client)),
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
