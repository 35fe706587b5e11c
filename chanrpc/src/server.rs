//! Server side: the handler capability and the per-session dispatch loop.
//!
//! Each session runs as its own tokio task spawned at connect time. Sessions
//! share nothing with each other except the handler capability itself.

use std::sync::Arc;

use crate::client::Client;
use crate::protocol::{ClientFrame, Request, Response};
use crate::transport::{ServerChannel, session_channel};

/// Pluggable dispatch capability served by a [`SessionServer`].
///
/// One instance backs every session of its server, so implementations must
/// be safe to invoke from multiple session tasks concurrently.
pub trait Handler: Send + Sync + 'static {
    /// Instance name, used in session lifecycle logs only. Never part of
    /// the protocol payload.
    fn name(&self) -> &str;

    /// Dispatch one request.
    ///
    /// Must produce a response for every input, including empty method and
    /// params, and must not block indefinitely: a stalled handler stalls
    /// its whole session.
    fn handle(&self, method: &str, params: &str) -> Response;
}

/// Hands out sessions against one handler capability.
pub struct SessionServer<H> {
    handler: Arc<H>,
}

impl<H: Handler> SessionServer<H> {
    pub fn new(handler: H) -> Self {
        Self {
            handler: Arc::new(handler),
        }
    }

    /// Open a new session: create its channel pair, spawn the handler loop
    /// on the server end, and return the client binding for the other end.
    ///
    /// Local and infallible; there is no handshake.
    pub fn connect(&self) -> Client {
        let (client_end, server_end) = session_channel();
        let handler = Arc::clone(&self.handler);
        tracing::debug!(server = handler.name(), "session opened");
        tokio::spawn(run_session(handler, server_end));
        Client::new(client_end)
    }
}

/// Per-session dispatch loop.
///
/// Receives one frame at a time, dispatches it, sends the reply, repeats.
/// Exits on a close frame or when the client end disappears; never sends
/// unsolicited messages.
async fn run_session<H: Handler>(handler: Arc<H>, mut channel: ServerChannel) {
    loop {
        let frame = match channel.rx.recv().await {
            Some(frame) => frame,
            None => {
                tracing::debug!(server = handler.name(), "client end dropped, session closed");
                break;
            }
        };

        let text = match frame {
            ClientFrame::Call(text) => text,
            ClientFrame::Close => {
                tracing::debug!(server = handler.name(), "session closed");
                break;
            }
        };

        // Malformed input is swallowed on purpose, preserved from the
        // original protocol: the request falls back to all-empty fields,
        // dispatch proceeds, and the caller is never told.
        let request = match Request::decode(&text) {
            Ok(request) => request,
            Err(error) => {
                tracing::warn!(server = handler.name(), %error, text, "invalid request format");
                Request::default()
            }
        };

        tracing::trace!(server = handler.name(), method = %request.method, "dispatching request");
        let response = handler.handle(&request.method, &request.params);

        let reply = match response.encode() {
            Ok(reply) => reply,
            Err(error) => {
                // Unreachable for two plain string fields.
                tracing::error!(server = handler.name(), %error, "failed to encode response");
                break;
            }
        };

        if channel.tx.send(reply).await.is_err() {
            tracing::debug!(
                server = handler.name(),
                "client end dropped mid-call, session closed"
            );
            break;
        }
    }
}
