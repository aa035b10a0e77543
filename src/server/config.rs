use std::sync::Arc;
use std::{env, fs};

use axum::{
    extract::Request,
    http::StatusCode,
    middleware::{self, Next},
    response::Response,
    routing::{get, post},
    Router,
};
use tower_http::{cors::CorsLayer, services::ServeDir};
use tracing::info;

use crate::routes::{health_check, home};
use crate::server::handlers::{get_response, upload_pdf};
use crate::server::services::{
    conversation::ConversationService,
    gemini::GeminiService,
    ingest::{IngestService, UPLOADS_DIR},
    store::{ConversationStore, DATA_FILE},
};

pub const SYSTEM_INSTRUCTION_FILE: &str = "system_instruction.txt";

#[derive(Clone)]
pub struct AppState {
    pub ingest: Arc<IngestService>,
    pub conversation: Arc<ConversationService>,
}

pub fn configure_app() -> Router {
    // Create shared services
    let api_key = env::var("GEMINI_API_KEY").expect("GEMINI_API_KEY must be set");
    let system_instruction = fs::read_to_string(SYSTEM_INSTRUCTION_FILE)
        .expect("system_instruction.txt must be readable");

    let gemini = Arc::new(GeminiService::new(api_key));
    let store = Arc::new(ConversationStore::new(DATA_FILE));

    let ingest = Arc::new(IngestService::new(
        gemini.clone(),
        store.clone(),
        UPLOADS_DIR,
        system_instruction.clone(),
    ));
    let conversation = Arc::new(ConversationService::new(gemini, store, system_instruction));

    app_router(AppState {
        ingest,
        conversation,
    })
}

async fn log_request(request: Request, next: Next) -> Result<Response, StatusCode> {
    info!("{} {}", request.method(), request.uri().path());
    Ok(next.run(request).await)
}

pub fn app_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(home))
        .route("/health", get(health_check))
        .route("/upload_pdf", post(upload_pdf))
        .route("/get_response", post(get_response))
        // Static files
        .nest_service("/static", ServeDir::new("./static"))
        .layer(middleware::from_fn(log_request))
        .layer(CorsLayer::permissive())
        .with_state(state)
}
