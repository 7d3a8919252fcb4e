use std::collections::HashMap;

use sha2::{Digest, Sha512};
use tokio::sync::Mutex;
use uuid::Uuid;

/// Content fingerprint of a submitted audio payload, as lowercase hex.
///
/// Always computed over the resolved raw bytes, so the inline and URL
/// encodings of the same audio converge on the same fingerprint.
pub fn fingerprint(audio: &[u8]) -> String {
    hex::encode(Sha512::digest(audio))
}

/// Maps content fingerprints to stable session ids.
///
/// The map lives for the whole server process and only grows: a fingerprint
/// seen once keeps its id forever, so repeated submissions of the same audio
/// resolve to the same logical session without a client-supplied identifier.
/// Shared by every connection; only `create`-mode requests touch it.
pub struct SessionRegistry {
    sessions: Mutex<HashMap<String, String>>,
}

impl SessionRegistry {
    pub fn new() -> Self {
        Self {
            sessions: Mutex::new(HashMap::new()),
        }
    }

    /// Return the session id for `fingerprint`, creating one on first sight.
    ///
    /// Lookup and insert happen under a single lock, so concurrent
    /// first-sight calls from different connections still agree on one id.
    pub async fn resolve_or_create(&self, fingerprint: &str) -> String {
        let mut sessions = self.sessions.lock().await;
        sessions
            .entry(fingerprint.to_string())
            .or_insert_with(|| Uuid::new_v4().to_string())
            .clone()
    }

    /// Number of distinct audio contents seen so far.
    pub async fn len(&self) -> usize {
        self.sessions.lock().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.sessions.lock().await.is_empty()
    }
}

impl Default for SessionRegistry {
    fn default() -> Self {
        Self::new()
    }
}
