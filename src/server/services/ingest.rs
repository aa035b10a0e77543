use std::fs;
use std::io;
use std::path::PathBuf;
use std::sync::Arc;

use bytes::Bytes;
use thiserror::Error;
use tracing::info;

use super::gemini::{Content, GeminiService, SUMMARY_CONFIG};
use super::store::{ConversationStore, ConversationTurn, PdfReference, StoreError};

/// Default directory for locally persisted uploads, relative to the working
/// directory.
pub const UPLOADS_DIR: &str = "uploads";

const SUMMARY_PROMPT: &str = "Summarize the PDF";
const PDF_MIME_TYPE: &str = "application/pdf";

#[derive(Debug, Error)]
pub enum IngestError {
    #[error("Failed to upload file to Gemini: {0}")]
    Upload(String),
    #[error("Error during file processing: {0}")]
    Processing(String),
    #[error("Failed to save uploaded file: {0}")]
    Io(#[from] io::Error),
    #[error(transparent)]
    Store(#[from] StoreError),
    #[error("Summarization failed: {0}")]
    Service(String),
}

/// Takes an uploaded PDF through the whole pipeline: local save, Gemini
/// upload, processing wait, reference bookkeeping, and a one-shot summary.
pub struct IngestService {
    gemini: Arc<GeminiService>,
    store: Arc<ConversationStore>,
    uploads_dir: PathBuf,
    system_instruction: String,
}

impl IngestService {
    pub fn new(
        gemini: Arc<GeminiService>,
        store: Arc<ConversationStore>,
        uploads_dir: impl Into<PathBuf>,
        system_instruction: String,
    ) -> Self {
        Self {
            gemini,
            store,
            uploads_dir: uploads_dir.into(),
            system_instruction,
        }
    }

    /// Runs the full ingestion sequence and returns the summary text.
    /// Side effects are not rolled back on failure: a file can be saved
    /// locally without its reference ever being recorded.
    pub async fn ingest_pdf(&self, filename: &str, bytes: Bytes) -> Result<String, IngestError> {
        fs::create_dir_all(&self.uploads_dir)?;

        // Saved under the original filename; an existing file with the same
        // name is overwritten.
        let local_path = self.uploads_dir.join(filename);
        fs::write(&local_path, &bytes)?;
        info!("Saved upload to {}", local_path.display());

        let file = self
            .gemini
            .upload_file(bytes, filename, PDF_MIME_TYPE)
            .await
            .map_err(|e| IngestError::Upload(e.to_string()))?;

        let file = self
            .gemini
            .wait_for_active(file)
            .await
            .map_err(|e| IngestError::Processing(e.to_string()))?;

        let mut data = self.store.load()?;
        data.pdfs.push(PdfReference {
            filename: filename.to_string(),
            uri: file.uri.clone(),
            local_path: local_path.to_string_lossy().into_owned(),
        });

        // Fresh session seeded with the document itself.
        let seed = vec![Content::user_file(&file, PDF_MIME_TYPE)];
        let mut session =
            self.gemini
                .start_chat(self.system_instruction.as_str(), SUMMARY_CONFIG, seed);
        let summary = session
            .send_message(SUMMARY_PROMPT)
            .await
            .map_err(|e| IngestError::Service(e.to_string()))?;

        data.history.push(ConversationTurn::model(summary.clone()));
        self.store.save(&data)?;

        info!("Recorded summary for '{}'", filename);
        Ok(summary)
    }
}
