use serde::{Deserialize, Serialize};

/// How a transcript is forwarded on the notification side-channel.
///
/// Modes change routing, not computation; `create` additionally resolves a
/// session identity from the audio content before forwarding.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    #[default]
    Document,
    Chat,
    Create,
}

impl Mode {
    /// Subject suffix on the side-channel. `document` and `create` feed the
    /// same consumer; `chat` has its own stream.
    pub fn subject(&self) -> &'static str {
        match self {
            Mode::Document | Mode::Create => "document",
            Mode::Chat => "chat",
        }
    }
}

/// A decoded command envelope.
///
/// `audio_data` (inline base64) and `audio_url` are alternative encodings of
/// the same field; a request carries one or the other, never both required.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Request {
    pub command: String,

    /// Inline base64-encoded audio bytes.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub audio_data: Option<String>,

    /// Dereferenceable URL to fetch the audio from.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub audio_url: Option<String>,

    #[serde(default)]
    pub mode: Mode,

    /// Only meaningful for `load_model`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub model_name: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Status {
    Success,
    Error,
}

/// The reply envelope.
///
/// Every command funnels through one of the constructors below, so the wire
/// format is uniform regardless of which command ran: `status` plus the
/// command's result field, or `status: error` plus `message`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Response {
    pub status: Status,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub language: Option<String>,
}

impl Response {
    /// Success carrying a human-readable confirmation.
    pub fn success_message(message: impl Into<String>) -> Self {
        Self {
            status: Status::Success,
            message: Some(message.into()),
            text: None,
            language: None,
        }
    }

    /// Success carrying transcribed or translated text.
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            status: Status::Success,
            message: None,
            text: Some(text.into()),
            language: None,
        }
    }

    /// Success carrying a detected language tag.
    pub fn language(language: impl Into<String>) -> Self {
        Self {
            status: Status::Success,
            message: None,
            text: None,
            language: Some(language.into()),
        }
    }

    /// Error with a diagnostic for the peer.
    pub fn error(message: impl Into<String>) -> Self {
        Self {
            status: Status::Error,
            message: Some(message.into()),
            text: None,
            language: None,
        }
    }

    pub fn is_success(&self) -> bool {
        self.status == Status::Success
    }
}
