use serde::{Deserialize, Serialize};

/// Sampling parameters for a generation call. The two call types each use a
/// fixed config; nothing here is computed at runtime.
#[derive(Debug, Clone, Copy, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerationConfig {
    pub temperature: f64,
    pub top_p: f64,
    pub top_k: i32,
    pub max_output_tokens: i32,
    pub response_mime_type: &'static str,
}

/// Config for one-shot document summarization.
pub const SUMMARY_CONFIG: GenerationConfig = GenerationConfig {
    temperature: 1.0,
    top_p: 0.95,
    top_k: 64,
    max_output_tokens: 8192,
    response_mime_type: "application/json",
};

/// Config for conversational replies.
pub const CHAT_CONFIG: GenerationConfig = GenerationConfig {
    temperature: 1.35,
    top_p: 0.95,
    top_k: 64,
    max_output_tokens: 300,
    response_mime_type: "text/plain",
};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Part {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub file_data: Option<FileData>,
}

impl Part {
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            text: Some(text.into()),
            file_data: None,
        }
    }

    pub fn file(file_uri: String, mime_type: &str) -> Self {
        Self {
            text: None,
            file_data: Some(FileData {
                mime_type: mime_type.to_string(),
                file_uri,
            }),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FileData {
    pub mime_type: String,
    pub file_uri: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Content {
    pub role: String,
    pub parts: Vec<Part>,
}

impl Content {
    pub fn user_text(text: impl Into<String>) -> Self {
        Self {
            role: "user".to_string(),
            parts: vec![Part::text(text)],
        }
    }

    pub fn user_file(file: &GeminiFile, mime_type: &str) -> Self {
        Self {
            role: "user".to_string(),
            parts: vec![Part::file(file.uri.clone(), mime_type)],
        }
    }
}

#[derive(Debug, Serialize)]
pub struct SystemInstruction {
    pub parts: Vec<Part>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateContentRequest {
    pub contents: Vec<Content>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub system_instruction: Option<SystemInstruction>,
    pub generation_config: GenerationConfig,
}

#[derive(Debug, Deserialize)]
pub struct GenerateContentResponse {
    #[serde(default)]
    pub candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
pub struct Candidate {
    pub content: Content,
}

/// A file tracked by the Gemini Files API.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GeminiFile {
    pub name: String,
    pub uri: String,
    #[serde(default)]
    pub state: FileState,
    #[serde(default)]
    pub display_name: Option<String>,
    #[serde(default)]
    pub mime_type: Option<String>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum FileState {
    #[default]
    StateUnspecified,
    Processing,
    Active,
    Failed,
}

#[derive(Debug, Deserialize)]
pub struct UploadFileResponse {
    pub file: GeminiFile,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn generation_configs_serialize_camel_case() {
        let value = serde_json::to_value(SUMMARY_CONFIG).unwrap();
        assert_eq!(value["temperature"], 1.0);
        assert_eq!(value["topP"], 0.95);
        assert_eq!(value["topK"], 64);
        assert_eq!(value["maxOutputTokens"], 8192);
        assert_eq!(value["responseMimeType"], "application/json");

        let value = serde_json::to_value(CHAT_CONFIG).unwrap();
        assert_eq!(value["temperature"], 1.35);
        assert_eq!(value["maxOutputTokens"], 300);
        assert_eq!(value["responseMimeType"], "text/plain");
    }

    #[test]
    fn file_part_serializes_as_file_data() {
        let part = Part::file("https://example.com/files/abc".to_string(), "application/pdf");
        let value = serde_json::to_value(&part).unwrap();
        assert!(value.get("text").is_none());
        assert_eq!(value["fileData"]["fileUri"], "https://example.com/files/abc");
        assert_eq!(value["fileData"]["mimeType"], "application/pdf");
    }

    #[test]
    fn file_state_parses_screaming_snake_case() {
        let file: GeminiFile = serde_json::from_value(serde_json::json!({
            "name": "files/abc",
            "uri": "https://example.com/files/abc",
            "state": "PROCESSING"
        }))
        .unwrap();
        assert_eq!(file.state, FileState::Processing);
    }
}
