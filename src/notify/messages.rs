use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Transcript event pushed on the side-channel after a successful
/// transcribe or translate.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TranscriptEvent {
    /// The session the text belongs to, if one is active. `create`-mode
    /// requests always carry one.
    pub session_id: Option<String>,

    /// Transcribed or translated text.
    pub text: String,

    /// When the result was produced.
    pub timestamp: DateTime<Utc>,
}
