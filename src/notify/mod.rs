pub mod client;
pub mod messages;

pub use client::{NatsNotifier, NoopNotifier, Notifier};
pub use messages::TranscriptEvent;
