use anyhow::{bail, Context, Result};
use base64::Engine;

use crate::protocol::Request;

/// Where a command's audio comes from.
///
/// The two variants are alternative encodings of the same semantic field:
/// clients on the same host submit bytes inline, remote deployments pass a
/// URL the server can dereference.
#[derive(Debug, Clone)]
pub enum AudioSource {
    /// Base64-encoded audio bytes carried in the request itself.
    Inline(String),
    /// Audio fetched from a URL at dispatch time.
    Url(String),
}

impl AudioSource {
    /// Extract the audio source from a command envelope.
    pub fn from_request(request: &Request) -> Result<Self> {
        match (&request.audio_data, &request.audio_url) {
            (Some(data), _) => Ok(AudioSource::Inline(data.clone())),
            (None, Some(url)) => Ok(AudioSource::Url(url.clone())),
            (None, None) => bail!("missing audio data"),
        }
    }

    /// Resolve to raw audio bytes.
    pub async fn resolve(&self) -> Result<Vec<u8>> {
        match self {
            AudioSource::Inline(data) => base64::engine::general_purpose::STANDARD
                .decode(data)
                .context("audio data is not valid base64"),
            AudioSource::Url(url) => {
                let response = reqwest::get(url)
                    .await
                    .and_then(|r| r.error_for_status())
                    .with_context(|| format!("failed to fetch audio from {}", url))?;

                let bytes = response
                    .bytes()
                    .await
                    .with_context(|| format!("failed to read audio body from {}", url))?;

                Ok(bytes.to_vec())
            }
        }
    }
}
