use std::fs;
use std::io;
use std::path::PathBuf;

use serde::{Deserialize, Deserializer, Serialize};
use thiserror::Error;

/// Default location of the conversation store, relative to the working directory.
pub const DATA_FILE: &str = "data.json";

pub const ROLE_USER: &str = "user";
pub const ROLE_MODEL: &str = "model";

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Failed to read store file: {0}")]
    Io(#[from] io::Error),
    #[error("Failed to parse store file: {0}")]
    Parse(#[from] serde_json::Error),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TurnPart {
    pub text: String,
}

/// One message in the conversation history. Turns are append-only and never
/// mutated after they are recorded.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConversationTurn {
    pub role: String,
    pub parts: Vec<TurnPart>,
}

impl ConversationTurn {
    pub fn user(text: impl Into<String>) -> Self {
        Self {
            role: ROLE_USER.to_string(),
            parts: vec![TurnPart { text: text.into() }],
        }
    }

    pub fn model(text: impl Into<String>) -> Self {
        Self {
            role: ROLE_MODEL.to_string(),
            parts: vec![TurnPart { text: text.into() }],
        }
    }
}

/// Metadata for an uploaded document. The local path is persisted under the
/// key `path`, which is the layout of existing store files.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PdfReference {
    pub filename: String,
    pub uri: String,
    #[serde(rename = "path")]
    pub local_path: String,
}

/// The whole persisted document: conversation history plus PDF references.
/// Both fields tolerate missing or malformed values on load and normalize
/// to empty lists instead of failing.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StoreData {
    #[serde(default, deserialize_with = "lenient_vec")]
    pub history: Vec<ConversationTurn>,
    #[serde(default, deserialize_with = "lenient_vec")]
    pub pdfs: Vec<PdfReference>,
}

fn lenient_vec<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: serde::de::DeserializeOwned,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    Ok(serde_json::from_value(value).unwrap_or_default())
}

/// File-backed store for the conversation document. Each request reads the
/// document fully, mutates it in memory, and writes it back whole. There is
/// no locking and no atomic rename; concurrent writers are last-writer-wins.
#[derive(Debug, Clone)]
pub struct ConversationStore {
    path: PathBuf,
}

impl ConversationStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn load(&self) -> Result<StoreData, StoreError> {
        let raw = match fs::read_to_string(&self.path) {
            Ok(raw) => raw,
            Err(err) if err.kind() == io::ErrorKind::NotFound => {
                return Ok(StoreData::default())
            }
            Err(err) => return Err(err.into()),
        };
        Ok(serde_json::from_str(&raw)?)
    }

    pub fn save(&self, data: &StoreData) -> Result<(), StoreError> {
        let raw = serde_json::to_string_pretty(data)?;
        fs::write(&self.path, raw)?;
        Ok(())
    }
}

impl Default for ConversationStore {
    fn default() -> Self {
        Self::new(DATA_FILE)
    }
}
