pub mod audio;
pub mod config;
pub mod discovery;
pub mod engine;
pub mod notify;
pub mod protocol;
pub mod server;
pub mod session;

pub use audio::AudioSource;
pub use config::Config;
pub use discovery::{Endpoint, EndpointDirectory, FixedDirectory};
pub use engine::{CannedEngine, CannedLoader, EngineLoader, ModelHost, SpeechEngine, KNOWN_MODELS};
pub use notify::{NatsNotifier, NoopNotifier, Notifier, TranscriptEvent};
pub use protocol::{
    receive_message, send_message, FrameError, Mode, Request, Response, Status, MAX_FRAME_SIZE,
};
pub use server::{serve, serve_on, Dispatcher};
pub use session::{fingerprint, SessionRegistry};
