use axum::{
    body::Bytes,
    extract::{Multipart, State},
    http::StatusCode,
    Json,
};
use serde::Serialize;
use serde_json::json;
use tracing::{error, info};

use crate::server::config::AppState;

#[derive(Debug, Serialize)]
pub struct UploadResponse {
    pub summary: String,
}

type UploadRejection = (StatusCode, Json<serde_json::Value>);

pub async fn upload_pdf(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Json<UploadResponse>, UploadRejection> {
    let mut upload: Option<(String, Bytes)> = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| bad_request(e.to_string()))?
    {
        if field.name() == Some("file") {
            let filename = field.file_name().unwrap_or("upload.pdf").to_string();
            let bytes = field
                .bytes()
                .await
                .map_err(|e| bad_request(e.to_string()))?;
            upload = Some((filename, bytes));
        }
    }

    let Some((filename, bytes)) = upload else {
        return Err(bad_request("No file uploaded".to_string()));
    };

    info!("Received upload '{}' ({} bytes)", filename, bytes.len());

    let summary = state.ingest.ingest_pdf(&filename, bytes).await.map_err(|e| {
        error!("Ingestion failed: {:?}", e);
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(json!({ "error": e.to_string() })),
        )
    })?;

    Ok(Json(UploadResponse { summary }))
}

fn bad_request(message: String) -> UploadRejection {
    (StatusCode::BAD_REQUEST, Json(json!({ "error": message })))
}
