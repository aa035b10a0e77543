mod chat;
mod files;
mod types;

pub use chat::ChatSession;
pub use types::*;

use std::time::Duration;

use reqwest::Client;

pub const GEMINI_API_BASE: &str = "https://generativelanguage.googleapis.com";
pub const GEMINI_MODEL: &str = "gemini-1.5-flash";

/// How long to wait between file status checks while Gemini processes an
/// uploaded document.
const FILE_POLL_INTERVAL: Duration = Duration::from_secs(10);

#[derive(Debug, Clone)]
pub struct GeminiService {
    client: Client,
    api_key: String,
    base_url: String,
    poll_interval: Duration,
}

impl GeminiService {
    pub fn new(api_key: String) -> Self {
        Self {
            client: Client::new(),
            api_key,
            base_url: GEMINI_API_BASE.to_string(),
            poll_interval: FILE_POLL_INTERVAL,
        }
    }

    pub fn with_base_url(api_key: String, base_url: String) -> Self {
        Self {
            client: Client::new(),
            api_key,
            base_url,
            poll_interval: FILE_POLL_INTERVAL,
        }
    }

    pub fn with_poll_interval(mut self, interval: Duration) -> Self {
        self.poll_interval = interval;
        self
    }
}
