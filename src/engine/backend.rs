use anyhow::{bail, Result};
use async_trait::async_trait;

/// Model names accepted by the stock loader, mirroring the whisper family.
pub const KNOWN_MODELS: &[&str] = &["tiny", "base", "small", "medium", "large", "turbo"];

/// A loaded speech model.
///
/// The gateway never implements inference itself; it only calls through
/// this trait. Real engines (whisper.cpp, a hosted API, ...) plug in here.
#[async_trait]
pub trait SpeechEngine: Send + Sync {
    /// Name of the model backing this engine.
    fn model_name(&self) -> &str;

    /// Identify the dominant language of the audio, as a short language tag.
    async fn detect_language(&self, audio: &[u8]) -> Result<String>;

    /// Speech to text in the source language.
    async fn transcribe(&self, audio: &[u8]) -> Result<String>;

    /// Speech to English text.
    async fn translate(&self, audio: &[u8]) -> Result<String>;
}

/// Builds engines by model name. `load_model` goes through this seam, so
/// switching models is the loader's problem, not the dispatcher's.
#[async_trait]
pub trait EngineLoader: Send + Sync {
    async fn load(&self, model_name: &str) -> Result<Box<dyn SpeechEngine>>;
}

/// Deterministic engine for tests and demo deployments: answers are derived
/// from the model name and payload size, never from actual inference.
pub struct CannedEngine {
    model_name: String,
}

impl CannedEngine {
    pub fn new(model_name: impl Into<String>) -> Self {
        Self {
            model_name: model_name.into(),
        }
    }
}

#[async_trait]
impl SpeechEngine for CannedEngine {
    fn model_name(&self) -> &str {
        &self.model_name
    }

    async fn detect_language(&self, _audio: &[u8]) -> Result<String> {
        Ok("en".to_string())
    }

    async fn transcribe(&self, audio: &[u8]) -> Result<String> {
        Ok(format!(
            "[{} transcript of {} bytes]",
            self.model_name,
            audio.len()
        ))
    }

    async fn translate(&self, audio: &[u8]) -> Result<String> {
        Ok(format!(
            "[{} translation of {} bytes]",
            self.model_name,
            audio.len()
        ))
    }
}

/// Loader for [`CannedEngine`]s. Rejects names outside [`KNOWN_MODELS`] so
/// `load_model` failure paths behave like a real loader's.
pub struct CannedLoader;

#[async_trait]
impl EngineLoader for CannedLoader {
    async fn load(&self, model_name: &str) -> Result<Box<dyn SpeechEngine>> {
        if !KNOWN_MODELS.contains(&model_name) {
            bail!("unknown model: {}", model_name);
        }
        Ok(Box::new(CannedEngine::new(model_name)))
    }
}
