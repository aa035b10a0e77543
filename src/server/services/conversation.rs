use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use tracing::error;

use super::gemini::{Content, GeminiService, Part, CHAT_CONFIG};
use super::store::{ConversationStore, ConversationTurn, StoreData, StoreError};

/// Fixed pause before every generation call. A flat throttle, not a backoff.
pub const CHAT_COOLDOWN: Duration = Duration::from_secs(2);

const PDF_LISTING_HEADER: &str = "\n\nYou have access to the following PDF files for reference:\n";

#[derive(Debug)]
pub struct ChatOutcome {
    pub response: String,
    pub history: Vec<ConversationTurn>,
}

/// Drives one chat exchange: rebuild context from the store, call the
/// model, and persist the new turns.
pub struct ConversationService {
    gemini: Arc<GeminiService>,
    store: Arc<ConversationStore>,
    system_instruction: String,
    cooldown: Duration,
}

impl ConversationService {
    pub fn new(
        gemini: Arc<GeminiService>,
        store: Arc<ConversationStore>,
        system_instruction: String,
    ) -> Self {
        Self {
            gemini,
            store,
            system_instruction,
            cooldown: CHAT_COOLDOWN,
        }
    }

    pub fn with_cooldown(mut self, cooldown: Duration) -> Self {
        self.cooldown = cooldown;
        self
    }

    /// Produces a reply to the user's message. Generation failures do not
    /// propagate: the error text becomes the response and the store is left
    /// as it was on disk, so the user's turn survives only in the returned
    /// in-memory history. A load failure is the one hard error.
    pub async fn respond(&self, message: &str) -> Result<ChatOutcome, StoreError> {
        let mut data = self.store.load()?;

        let mut system_instruction = self.system_instruction.clone();
        system_instruction.push_str(PDF_LISTING_HEADER);
        for pdf in &data.pdfs {
            system_instruction.push_str(&format!("- {}: {}\n", pdf.filename, pdf.uri));
        }

        data.history.push(ConversationTurn::user(message));

        tokio::time::sleep(self.cooldown).await;

        let response = match self.exchange(&mut data, &system_instruction, message).await {
            Ok(text) => text,
            Err(err) => {
                error!("Chat exchange failed: {}", err);
                format!("Error: {}", err)
            }
        };

        Ok(ChatOutcome {
            response,
            history: data.history,
        })
    }

    async fn exchange(
        &self,
        data: &mut StoreData,
        system_instruction: &str,
        message: &str,
    ) -> Result<String> {
        // The seeded history already carries the user's turn; send_message
        // appends the message again, so the request holds it twice. This
        // mirrors how the conversation flow has always called the API.
        let mut session =
            self.gemini
                .start_chat(system_instruction, CHAT_CONFIG, to_contents(&data.history));
        let text = session.send_message(message).await?;

        data.history.push(ConversationTurn::model(text.clone()));
        self.store.save(data)?;

        Ok(text)
    }
}

fn to_contents(history: &[ConversationTurn]) -> Vec<Content> {
    history
        .iter()
        .map(|turn| Content {
            role: turn.role.clone(),
            parts: turn
                .parts
                .iter()
                .map(|part| Part::text(part.text.clone()))
                .collect(),
        })
        .collect()
}
