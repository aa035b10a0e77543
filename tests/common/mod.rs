use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

use archive_intellect::server::config::{app_router, AppState};
use archive_intellect::server::services::{
    conversation::ConversationService, gemini::GeminiService, ingest::IngestService,
    store::ConversationStore,
};
use axum::Router;

pub const TEST_SYSTEM_INSTRUCTION: &str = "You are a helpful archive assistant.";

/// Builds the real router against a mock Gemini base URL and temp paths,
/// with the production delays shrunk so tests do not sleep.
pub fn test_app(gemini_base_url: &str, data_file: &Path, uploads_dir: &Path) -> Router {
    let gemini = Arc::new(
        GeminiService::with_base_url("test-key".to_string(), gemini_base_url.to_string())
            .with_poll_interval(Duration::from_millis(10)),
    );
    let store = Arc::new(ConversationStore::new(data_file));

    let ingest = Arc::new(IngestService::new(
        gemini.clone(),
        store.clone(),
        uploads_dir,
        TEST_SYSTEM_INSTRUCTION.to_string(),
    ));
    let conversation = Arc::new(
        ConversationService::new(gemini, store, TEST_SYSTEM_INSTRUCTION.to_string())
            .with_cooldown(Duration::ZERO),
    );

    app_router(AppState {
        ingest,
        conversation,
    })
}
