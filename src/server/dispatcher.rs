use std::sync::Arc;

use crate::audio::AudioSource;
use crate::engine::ModelHost;
use crate::notify::Notifier;
use crate::protocol::{Mode, Request, Response};
use crate::session::{fingerprint, SessionRegistry};

enum Task {
    Transcribe,
    Translate,
}

/// Routes one decoded command to the matching capability.
///
/// Every outcome folds into a [`Response`]: capability and audio failures
/// come back as `status: error`, unknown commands likewise. Nothing in here
/// can terminate the connection; closing is the transport layer's call alone.
pub struct Dispatcher {
    host: Arc<ModelHost>,
    registry: Arc<SessionRegistry>,
    notifier: Arc<dyn Notifier>,
}

impl Dispatcher {
    pub fn new(
        host: Arc<ModelHost>,
        registry: Arc<SessionRegistry>,
        notifier: Arc<dyn Notifier>,
    ) -> Self {
        Self {
            host,
            registry,
            notifier,
        }
    }

    /// Dispatch one message.
    ///
    /// `active_session` is the connection's current session pointer; only
    /// `create`-mode requests move it, `chat` and `document` requests reuse
    /// whatever it holds.
    pub async fn dispatch(
        &self,
        request: Request,
        active_session: &mut Option<String>,
    ) -> Response {
        match request.command.as_str() {
            "load_model" => self.load_model(&request).await,
            "detect_language" => self.detect_language(&request).await,
            "transcribe" => {
                self.speech_to_text(&request, active_session, Task::Transcribe)
                    .await
            }
            "translate" => {
                self.speech_to_text(&request, active_session, Task::Translate)
                    .await
            }
            _ => Response::error("Unknown command"),
        }
    }

    async fn load_model(&self, request: &Request) -> Response {
        let Some(model_name) = request.model_name.as_deref() else {
            return Response::error("missing model_name");
        };

        match self.host.load(model_name).await {
            Ok(()) => {
                Response::success_message(format!("Loaded {} model successfully", model_name))
            }
            Err(e) => Response::error(e.to_string()),
        }
    }

    async fn detect_language(&self, request: &Request) -> Response {
        let audio = match self.resolve_audio(request).await {
            Ok(audio) => audio,
            Err(e) => return Response::error(e.to_string()),
        };

        match self.host.detect_language(&audio).await {
            Ok(language) => Response::language(language),
            Err(e) => Response::error(e.to_string()),
        }
    }

    async fn speech_to_text(
        &self,
        request: &Request,
        active_session: &mut Option<String>,
        task: Task,
    ) -> Response {
        let audio = match self.resolve_audio(request).await {
            Ok(audio) => audio,
            Err(e) => return Response::error(e.to_string()),
        };

        if request.mode == Mode::Create {
            let id = self.registry.resolve_or_create(&fingerprint(&audio)).await;
            *active_session = Some(id);
        }

        let result = match task {
            Task::Transcribe => self.host.transcribe(&audio).await,
            Task::Translate => self.host.translate(&audio).await,
        };

        match result {
            Ok(text) => {
                self.notifier
                    .emit(request.mode, active_session.as_deref(), &text)
                    .await;
                Response::text(text)
            }
            Err(e) => Response::error(e.to_string()),
        }
    }

    async fn resolve_audio(&self, request: &Request) -> anyhow::Result<Vec<u8>> {
        AudioSource::from_request(request)?.resolve().await
    }
}
