use anyhow::{anyhow, Result};
use tracing::info;

use super::types::{
    Content, GenerateContentRequest, GenerateContentResponse, GenerationConfig, Part,
    SystemInstruction,
};
use super::{GeminiService, GEMINI_MODEL};

/// A conversation with the model: a system instruction, a sampling config,
/// and the accumulated contents sent with every request.
#[derive(Debug, Clone)]
pub struct ChatSession {
    service: GeminiService,
    system_instruction: String,
    config: GenerationConfig,
    history: Vec<Content>,
}

impl GeminiService {
    pub fn start_chat(
        &self,
        system_instruction: impl Into<String>,
        config: GenerationConfig,
        history: Vec<Content>,
    ) -> ChatSession {
        ChatSession {
            service: self.clone(),
            system_instruction: system_instruction.into(),
            config,
            history,
        }
    }
}

impl ChatSession {
    pub async fn send_message(&mut self, message: &str) -> Result<String> {
        info!("Making generation request to Gemini");

        self.history.push(Content::user_text(message));

        let request = GenerateContentRequest {
            contents: self.history.clone(),
            system_instruction: Some(SystemInstruction {
                parts: vec![Part::text(self.system_instruction.as_str())],
            }),
            generation_config: self.config,
        };

        let url = format!(
            "{}/v1beta/models/{}:generateContent?key={}",
            self.service.base_url, GEMINI_MODEL, self.service.api_key
        );
        let response = self
            .service
            .client
            .post(&url)
            .header("Content-Type", "application/json")
            .json(&request)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let text = response.text().await?;
            return Err(anyhow!(
                "Generation request failed with status {}: {}",
                status,
                text
            ));
        }

        let text = response.text().await?;
        if text.is_empty() {
            return Err(anyhow!("Empty response from Gemini"));
        }

        let parsed: GenerateContentResponse = serde_json::from_str(&text).map_err(|e| {
            anyhow!(
                "Failed to parse generation response: {}\nResponse text: {}",
                e,
                text
            )
        })?;

        let Some(candidate) = parsed.candidates.into_iter().next() else {
            return Err(anyhow!("No response from model"));
        };

        let reply: String = candidate
            .content
            .parts
            .iter()
            .filter_map(|part| part.text.as_deref())
            .collect();
        if reply.is_empty() {
            return Err(anyhow!("No response from model"));
        }

        self.history.push(candidate.content);
        Ok(reply)
    }
}
