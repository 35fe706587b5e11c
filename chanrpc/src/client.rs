//! Client binding: one session, one in-flight call at a time.

use std::time::Duration;

use crate::protocol::{ClientFrame, Request, Response};
use crate::transport::ClientChannel;

/// Errors surfaced by [`Client::call`].
#[derive(Debug, thiserror::Error)]
pub enum CallError {
    /// The request could not be serialized to wire text. Practically
    /// unreachable for two plain string fields.
    #[error("failed to encode request: {0}")]
    Encode(#[source] serde_json::Error),

    /// The server's reply is not a well-formed response. Unlike the server
    /// side, which swallows malformed input, this is surfaced to the caller.
    #[error("failed to decode response: {0}")]
    Decode(#[source] serde_json::Error),

    /// The paired handler loop is gone; the session can never answer.
    #[error("session closed")]
    SessionClosed,

    /// The deadline passed to [`Client::call_with_timeout`] expired before
    /// the reply arrived.
    #[error("call timed out")]
    TimedOut,
}

/// One client's binding to a live session.
///
/// `call` takes `&mut self`, so a session can never carry more than one
/// outstanding request. `close` consumes the binding, making post-close use
/// a compile error rather than a hang.
pub struct Client {
    channel: ClientChannel,
}

impl Client {
    pub(crate) fn new(channel: ClientChannel) -> Self {
        Self { channel }
    }

    /// One round trip: encode the request, send it, await the reply,
    /// decode it. Returns the response or the error, never both.
    ///
    /// Has no deadline; a stalled handler stalls the call. See
    /// [`Client::call_with_timeout`] for the bounded variant.
    pub async fn call(&mut self, method: &str, params: &str) -> Result<Response, CallError> {
        let text = Request::new(method, params)
            .encode()
            .map_err(CallError::Encode)?;

        self.channel
            .tx
            .send(ClientFrame::Call(text))
            .await
            .map_err(|_| CallError::SessionClosed)?;

        let reply = self
            .channel
            .rx
            .recv()
            .await
            .ok_or(CallError::SessionClosed)?;

        Response::decode(&reply).map_err(CallError::Decode)
    }

    /// [`Client::call`] bounded by a deadline covering the whole round trip.
    ///
    /// On [`CallError::TimedOut`] the request may still reach the handler
    /// and be answered after the fact, leaving the session's turn-taking
    /// indeterminate; the binding must not be reused after a timeout, only
    /// closed or dropped.
    pub async fn call_with_timeout(
        &mut self,
        method: &str,
        params: &str,
        deadline: Duration,
    ) -> Result<Response, CallError> {
        tokio::time::timeout(deadline, self.call(method, params))
            .await
            .map_err(|_| CallError::TimedOut)?
    }

    /// Terminate the session.
    ///
    /// Fire-and-forget: does not wait for the handler loop to exit.
    /// Dropping the binding without calling this also ends the session,
    /// via channel disconnect.
    pub async fn close(self) {
        let _ = self.channel.tx.send(ClientFrame::Close).await;
    }

    #[cfg(test)]
    pub(crate) async fn send_raw(&mut self, frame: ClientFrame) -> Result<(), CallError> {
        self.channel
            .tx
            .send(frame)
            .await
            .map_err(|_| CallError::SessionClosed)
    }

    #[cfg(test)]
    pub(crate) async fn recv_raw(&mut self) -> Result<String, CallError> {
        self.channel.rx.recv().await.ok_or(CallError::SessionClosed)
    }
}
