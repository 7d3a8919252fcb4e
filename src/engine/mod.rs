mod backend;
mod host;

pub use backend::{CannedEngine, CannedLoader, EngineLoader, SpeechEngine, KNOWN_MODELS};
pub use host::ModelHost;
