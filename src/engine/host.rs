use anyhow::Result;
use tokio::sync::RwLock;
use tracing::info;

use super::backend::{EngineLoader, SpeechEngine};

/// Owns the active engine and serializes model switches against in-flight
/// inference.
///
/// Every inference call runs under the read lock for its full duration; a
/// switch takes the write lock. A request that started on one model always
/// finishes on it, and a switch waits for in-flight requests to drain.
pub struct ModelHost {
    loader: Box<dyn EngineLoader>,
    active: RwLock<Box<dyn SpeechEngine>>,
}

impl ModelHost {
    /// Load `initial_model` through `loader` and start serving it.
    pub async fn new(loader: Box<dyn EngineLoader>, initial_model: &str) -> Result<Self> {
        let engine = loader.load(initial_model).await?;
        info!("Loaded model: {}", initial_model);

        Ok(Self {
            loader,
            active: RwLock::new(engine),
        })
    }

    /// Name of the model currently serving inference.
    pub async fn active_model(&self) -> String {
        self.active.read().await.model_name().to_string()
    }

    /// Switch the active engine to `model_name`. No-op if already active.
    pub async fn load(&self, model_name: &str) -> Result<()> {
        {
            let active = self.active.read().await;
            if active.model_name() == model_name {
                return Ok(());
            }
        }

        // Load outside the write lock so in-flight inference keeps running
        // while the replacement engine comes up.
        let engine = self.loader.load(model_name).await?;

        let mut active = self.active.write().await;
        *active = engine;
        info!("Switched active model to {}", model_name);

        Ok(())
    }

    pub async fn detect_language(&self, audio: &[u8]) -> Result<String> {
        let active = self.active.read().await;
        active.detect_language(audio).await
    }

    pub async fn transcribe(&self, audio: &[u8]) -> Result<String> {
        let active = self.active.read().await;
        active.transcribe(audio).await
    }

    pub async fn translate(&self, audio: &[u8]) -> Result<String> {
        let active = self.active.read().await;
        active.translate(audio).await
    }
}
