use anyhow::{anyhow, Result};
use bytes::Bytes;
use reqwest::multipart::{Form, Part};
use tracing::info;

use super::types::{FileState, GeminiFile, UploadFileResponse};
use super::GeminiService;

impl GeminiService {
    /// Uploads raw file bytes to the Gemini Files API and returns the
    /// tracked file, usually still in the PROCESSING state.
    pub async fn upload_file(
        &self,
        bytes: Bytes,
        display_name: &str,
        mime_type: &str,
    ) -> Result<GeminiFile> {
        info!("Uploading '{}' to Gemini", display_name);

        let metadata = serde_json::json!({ "file": { "display_name": display_name } });
        let form = Form::new()
            .part(
                "metadata",
                Part::text(metadata.to_string()).mime_str("application/json")?,
            )
            .part(
                "file",
                Part::bytes(bytes.to_vec())
                    .file_name(display_name.to_string())
                    .mime_str(mime_type)?,
            );

        let url = format!("{}/upload/v1beta/files?key={}", self.base_url, self.api_key);
        let response = self
            .client
            .post(&url)
            .header("X-Goog-Upload-Protocol", "multipart")
            .multipart(form)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let text = response.text().await?;
            return Err(anyhow!(
                "File upload failed with status {}: {}",
                status,
                text
            ));
        }

        let uploaded: UploadFileResponse = response.json().await?;
        info!(
            "Uploaded file '{}' as: {}",
            display_name, uploaded.file.uri
        );
        Ok(uploaded.file)
    }

    pub async fn get_file(&self, name: &str) -> Result<GeminiFile> {
        let url = format!("{}/v1beta/{}?key={}", self.base_url, name, self.api_key);
        let response = self.client.get(&url).send().await?;

        if !response.status().is_success() {
            let status = response.status();
            let text = response.text().await?;
            return Err(anyhow!(
                "File status request failed with status {}: {}",
                status,
                text
            ));
        }

        Ok(response.json().await?)
    }

    /// Polls the file on a fixed interval while it is PROCESSING. There is
    /// no upper bound on iterations; a file stuck in PROCESSING blocks the
    /// caller indefinitely.
    pub async fn wait_for_active(&self, mut file: GeminiFile) -> Result<GeminiFile> {
        info!("Waiting for file processing...");

        while file.state == FileState::Processing {
            tokio::time::sleep(self.poll_interval).await;
            file = self.get_file(&file.name).await?;
        }

        if file.state != FileState::Active {
            return Err(anyhow!("File {} failed to process", file.name));
        }

        info!("File {} is active", file.name);
        Ok(file)
    }
}
