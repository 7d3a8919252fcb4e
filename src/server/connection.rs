use std::net::SocketAddr;
use std::sync::Arc;

use tokio::net::TcpStream;
use tracing::{info, warn};

use super::dispatcher::Dispatcher;
use crate::protocol::{receive_message, send_message, Request, Response};

/// Drive one accepted connection until the peer closes or the transport
/// fails.
///
/// Protocol errors (malformed JSON, missing fields, unknown commands) are
/// answered in-band and keep the loop alive; only transport-level failures
/// end it. The peer always sees either a well-formed response or a
/// connection close for every frame it manages to deliver.
pub async fn handle(mut stream: TcpStream, peer: SocketAddr, dispatcher: Arc<Dispatcher>) {
    info!("New connection from {}", peer);

    // Session identity this connection currently operates under. Exclusively
    // owned here; only create-mode requests move it.
    let mut active_session: Option<String> = None;

    loop {
        let payload = match receive_message(&mut stream).await {
            Ok(Some(payload)) => payload,
            Ok(None) => break,
            Err(e) if e.is_fatal() => {
                warn!("Transport error from {}: {}", peer, e);
                break;
            }
            Err(e) => {
                // A whole frame arrived but its body wasn't JSON; report and
                // wait for the next frame.
                if send_message(&mut stream, &Response::error(e.to_string()))
                    .await
                    .is_err()
                {
                    warn!("Failed to send response to {}", peer);
                    break;
                }
                continue;
            }
        };

        let response = match serde_json::from_value::<Request>(payload) {
            Ok(request) => dispatcher.dispatch(request, &mut active_session).await,
            Err(e) => Response::error(format!("invalid request: {}", e)),
        };

        if let Err(e) = send_message(&mut stream, &response).await {
            warn!("Failed to send response to {}: {}", peer, e);
            break;
        }
    }

    info!("Connection closed from {}", peer);
}
