//! Per-session channel pair.
//!
//! Two capacity-1 mpsc channels, one per direction, bundled into a client
//! end and a server end. Exactly two parties ever hold ends. Capacity 1
//! plus strict call/reply alternation means at most one message is ever in
//! flight per direction; a send parks the sender until the peer drains the
//! slot, matching the original rendezvous discipline.

use tokio::sync::mpsc;

use crate::protocol::ClientFrame;

/// Client end of a session: sends frames, receives reply text.
pub struct ClientChannel {
    pub(crate) tx: mpsc::Sender<ClientFrame>,
    pub(crate) rx: mpsc::Receiver<String>,
}

/// Server end of a session: receives frames, sends reply text.
pub struct ServerChannel {
    pub(crate) rx: mpsc::Receiver<ClientFrame>,
    pub(crate) tx: mpsc::Sender<String>,
}

/// Create the channel pair backing one session.
pub fn session_channel() -> (ClientChannel, ServerChannel) {
    let (frame_tx, frame_rx) = mpsc::channel(1);
    let (reply_tx, reply_rx) = mpsc::channel(1);

    (
        ClientChannel {
            tx: frame_tx,
            rx: reply_rx,
        },
        ServerChannel {
            rx: frame_rx,
            tx: reply_tx,
        },
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn frames_cross_client_to_server() {
        let (client, mut server) = session_channel();
        client
            .tx
            .send(ClientFrame::Call("{}".to_string()))
            .await
            .unwrap();
        assert_eq!(
            server.rx.recv().await,
            Some(ClientFrame::Call("{}".to_string()))
        );
    }

    #[tokio::test]
    async fn replies_cross_server_to_client() {
        let (mut client, server) = session_channel();
        server.tx.send("reply".to_string()).await.unwrap();
        assert_eq!(client.rx.recv().await, Some("reply".to_string()));
    }

    #[tokio::test]
    async fn dropping_client_end_disconnects_server_end() {
        let (client, mut server) = session_channel();
        drop(client);
        assert_eq!(server.rx.recv().await, None);
    }
}
