// End-to-end tests over real TCP connections
//
// A full server (canned engine, real registry, recording notifier) is bound
// to an ephemeral port; clients speak the framed protocol over TcpStream.

use std::sync::Arc;

use anyhow::Result;
use async_trait::async_trait;
use base64::Engine;
use futures::future::join_all;
use scribe_relay::{
    receive_message, send_message, serve_on, CannedLoader, Dispatcher, Mode, ModelHost, Notifier,
    Request, Response, SessionRegistry, Status,
};
use serde_json::json;
use tokio::io::AsyncWriteExt;
use tokio::net::{TcpListener, TcpStream};
use tokio::sync::Mutex;

#[derive(Default)]
struct RecordingNotifier {
    events: Mutex<Vec<(Mode, Option<String>, String)>>,
}

#[async_trait]
impl Notifier for RecordingNotifier {
    async fn emit(&self, mode: Mode, session_id: Option<&str>, text: &str) {
        self.events
            .lock()
            .await
            .push((mode, session_id.map(String::from), text.to_string()));
    }
}

/// Start a full server on an ephemeral port; returns its address and the
/// notifier capturing side-channel traffic.
async fn start_server() -> Result<(String, Arc<RecordingNotifier>)> {
    let host = Arc::new(ModelHost::new(Box::new(CannedLoader), "tiny").await?);
    let registry = Arc::new(SessionRegistry::new());
    let notifier = Arc::new(RecordingNotifier::default());

    let dispatcher = Arc::new(Dispatcher::new(
        host,
        registry,
        Arc::clone(&notifier) as Arc<dyn Notifier>,
    ));

    let listener = TcpListener::bind("127.0.0.1:0").await?;
    let addr = listener.local_addr()?.to_string();

    tokio::spawn(async move {
        let _ = serve_on(listener, dispatcher).await;
    });

    Ok((addr, notifier))
}

fn transcribe_request(audio: &[u8], mode: Mode) -> Request {
    Request {
        command: "transcribe".to_string(),
        audio_data: Some(base64::engine::general_purpose::STANDARD.encode(audio)),
        audio_url: None,
        mode,
        model_name: None,
    }
}

async fn round_trip(stream: &mut TcpStream, request: &Request) -> Result<Response> {
    send_message(stream, request).await?;
    let payload = receive_message(stream)
        .await?
        .expect("server closed before responding");
    Ok(serde_json::from_value(payload)?)
}

#[tokio::test]
async fn test_end_to_end_transcribe_create() -> Result<()> {
    let (addr, notifier) = start_server().await?;
    let mut stream = TcpStream::connect(&addr).await?;

    let request = transcribe_request(b"courtroom recording", Mode::Create);

    let response = round_trip(&mut stream, &request).await?;
    assert_eq!(response.status, Status::Success);
    assert!(response.text.unwrap().contains("tiny transcript"));

    // The identical submission again: same success on the wire, and the
    // side-channel shows both events under one session id.
    let response = round_trip(&mut stream, &request).await?;
    assert_eq!(response.status, Status::Success);

    let events = notifier.events.lock().await;
    assert_eq!(events.len(), 2);
    let first = events[0].1.clone().expect("create mode must carry a session");
    assert_eq!(events[1].1.as_deref(), Some(first.as_str()));

    Ok(())
}

#[tokio::test]
async fn test_unknown_command_leaves_connection_usable() -> Result<()> {
    let (addr, _) = start_server().await?;
    let mut stream = TcpStream::connect(&addr).await?;

    send_message(&mut stream, &json!({"command": "bogus"})).await?;
    let payload = receive_message(&mut stream).await?.unwrap();
    assert_eq!(payload["status"], "error");
    assert_eq!(payload["message"], "Unknown command");

    // Same connection, valid command.
    let request = Request {
        command: "detect_language".to_string(),
        audio_data: Some(base64::engine::general_purpose::STANDARD.encode(b"pcm")),
        audio_url: None,
        mode: Mode::Document,
        model_name: None,
    };
    let response = round_trip(&mut stream, &request).await?;
    assert_eq!(response.status, Status::Success);
    assert_eq!(response.language.as_deref(), Some("en"));

    Ok(())
}

#[tokio::test]
async fn test_unreachable_audio_url_is_an_error_not_a_close() -> Result<()> {
    let (addr, _) = start_server().await?;
    let mut stream = TcpStream::connect(&addr).await?;

    let request = Request {
        command: "transcribe".to_string(),
        audio_data: None,
        // Nothing listens on the discard port.
        audio_url: Some("http://127.0.0.1:9/missing.wav".to_string()),
        mode: Mode::Document,
        model_name: None,
    };

    let response = round_trip(&mut stream, &request).await?;
    assert_eq!(response.status, Status::Error);
    assert!(response.message.unwrap().contains("failed to fetch audio"));

    // The connection survives the failure.
    let response = round_trip(&mut stream, &transcribe_request(b"ok", Mode::Document)).await?;
    assert_eq!(response.status, Status::Success);

    Ok(())
}

#[tokio::test]
async fn test_malformed_json_frame_gets_error_response() -> Result<()> {
    let (addr, _) = start_server().await?;
    let mut stream = TcpStream::connect(&addr).await?;

    // A well-framed body that is not JSON.
    let body = b"definitely not json";
    stream
        .write_all(&(body.len() as u32).to_be_bytes())
        .await?;
    stream.write_all(body).await?;
    stream.flush().await?;

    let payload = receive_message(&mut stream).await?.unwrap();
    assert_eq!(payload["status"], "error");

    // Framing stayed intact: the next frame dispatches normally.
    let response = round_trip(&mut stream, &transcribe_request(b"ok", Mode::Document)).await?;
    assert_eq!(response.status, Status::Success);

    Ok(())
}

#[tokio::test]
async fn test_missing_required_field_is_reported() -> Result<()> {
    let (addr, _) = start_server().await?;
    let mut stream = TcpStream::connect(&addr).await?;

    send_message(&mut stream, &json!({"command": "transcribe"})).await?;
    let payload = receive_message(&mut stream).await?.unwrap();

    assert_eq!(payload["status"], "error");
    assert_eq!(payload["message"], "missing audio data");

    Ok(())
}

#[tokio::test]
async fn test_load_model_over_the_wire() -> Result<()> {
    let (addr, _) = start_server().await?;
    let mut stream = TcpStream::connect(&addr).await?;

    let request = Request {
        command: "load_model".to_string(),
        audio_data: None,
        audio_url: None,
        mode: Mode::Document,
        model_name: Some("base".to_string()),
    };

    let response = round_trip(&mut stream, &request).await?;
    assert_eq!(response.status, Status::Success);
    assert_eq!(
        response.message.as_deref(),
        Some("Loaded base model successfully")
    );

    // Transcripts now come from the new model.
    let response = round_trip(&mut stream, &transcribe_request(b"ok", Mode::Document)).await?;
    assert!(response.text.unwrap().contains("base transcript"));

    Ok(())
}

#[tokio::test]
async fn test_concurrent_identical_submissions_share_one_session() -> Result<()> {
    let (addr, notifier) = start_server().await?;

    let clients: Vec<_> = (0..8)
        .map(|_| {
            let addr = addr.clone();
            tokio::spawn(async move {
                let mut stream = TcpStream::connect(&addr).await?;
                let request = transcribe_request(b"the very same audio", Mode::Create);
                round_trip(&mut stream, &request).await
            })
        })
        .collect();

    for result in join_all(clients).await {
        let response = result??;
        assert_eq!(response.status, Status::Success);
    }

    let events = notifier.events.lock().await;
    assert_eq!(events.len(), 8);

    let ids: std::collections::HashSet<_> =
        events.iter().map(|(_, id, _)| id.clone().unwrap()).collect();
    assert_eq!(ids.len(), 1, "racing connections must agree on one session");

    Ok(())
}

#[tokio::test]
async fn test_one_connection_closing_does_not_affect_others() -> Result<()> {
    let (addr, _) = start_server().await?;

    let mut surviving = TcpStream::connect(&addr).await?;

    // Another peer connects, sends half a frame, and drops.
    {
        let mut dying = TcpStream::connect(&addr).await?;
        dying.write_all(&[0u8, 0, 1]).await?;
    }

    let response =
        round_trip(&mut surviving, &transcribe_request(b"still here", Mode::Document)).await?;
    assert_eq!(response.status, Status::Success);

    Ok(())
}
