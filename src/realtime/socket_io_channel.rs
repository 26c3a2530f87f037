use crate::domain::{BearerToken, ChannelError, ChannelMessage, RealtimeChannel, RealtimeConnection};
use async_trait::async_trait;
use futures::FutureExt;
use rust_socketio::Payload;
use rust_socketio::asynchronous::{Client, ClientBuilder};
use serde_json::{Value, json};
use std::fmt::{Debug, Formatter};
use tokio::sync::mpsc::Sender;
use tracing::{debug, info, instrument, warn};

/// Emitted with the order hash to receive that order's rider events.
const JOIN_ROOM_EVENT: &str = "joinTrackingRoom";

/// A realtime channel over socket.io. The bearer token travels in the handshake `auth` payload.
#[derive(Debug)]
pub struct SocketIoChannel {
    url: String,
}

impl SocketIoChannel {
    pub fn new(url: &str) -> Self {
        SocketIoChannel { url: url.to_string() }
    }
}

#[async_trait]
impl RealtimeChannel for SocketIoChannel {
    #[instrument(skip(self, auth_token, tx))]
    async fn open(
        &self,
        auth_token: &BearerToken,
        room: &str,
        event: &str,
        tx: Sender<ChannelMessage>,
    ) -> Result<Box<dyn RealtimeConnection>, ChannelError> {
        info!("🔌 Connecting to realtime channel {}...", self.url);
        let event_tx = tx.clone();
        let error_tx = tx.clone();
        let close_tx = tx;

        let client = ClientBuilder::new(self.url.as_str())
            .auth(handshake_auth(auth_token))
            .reconnect(false)
            .on(event, move |payload, _| {
                let tx = event_tx.clone();
                async move {
                    if let Some(message) = event_message(payload) {
                        let _ = tx.send(message).await;
                    }
                }
                .boxed()
            })
            .on("error", move |payload, _| {
                let tx = error_tx.clone();
                async move {
                    let _ = tx.send(ChannelMessage::Failed(ChannelError::Transport(describe(&payload)))).await;
                }
                .boxed()
            })
            .on("close", move |_, _| {
                let tx = close_tx.clone();
                async move {
                    let _ = tx.send(ChannelMessage::Failed(ChannelError::Closed)).await;
                }
                .boxed()
            })
            .connect()
            .await?;
        info!("🔌 Connecting to realtime channel {}... OK", self.url);

        if let Err(e) = client.emit(JOIN_ROOM_EVENT, json!(room)).await {
            let _ = client.disconnect().await;
            return Err(e.into());
        }
        info!(room, "Joined tracking room");

        Ok(Box::new(SocketIoConnection { client }))
    }
}

struct SocketIoConnection {
    client: Client,
}

impl Debug for SocketIoConnection {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str("SocketIoConnection")
    }
}

impl RealtimeConnection for SocketIoConnection {
    fn disconnect(self: Box<Self>) {
        let client = self.client;
        tokio::spawn(async move {
            match client.disconnect().await {
                Ok(()) => info!("Disconnected from realtime channel"),
                Err(e) => warn!("⚠️ Unable to disconnect cleanly from realtime channel: {}", e),
            }
        });
    }
}

fn handshake_auth(auth_token: &BearerToken) -> Value {
    json!({ "token": auth_token.secret() })
}

/// The first argument of a socket.io event is the location payload.
fn event_message(payload: Payload) -> Option<ChannelMessage> {
    match payload {
        Payload::Text(values) => {
            let data = values.into_iter().next()?;
            debug!(%data, "🔸 Received realtime event");
            Some(ChannelMessage::Event(data))
        }
        _ => {
            warn!("⚠️ Ignoring a realtime event without a JSON payload");
            None
        }
    }
}

fn describe(payload: &Payload) -> String {
    match payload {
        Payload::Text(values) => values
            .iter()
            .map(|value| value.as_str().map(str::to_string).unwrap_or_else(|| value.to_string()))
            .collect::<Vec<_>>()
            .join(", "),
        Payload::Binary(bytes) => String::from_utf8_lossy(bytes).to_string(),
        _ => "unknown transport error".to_string(),
    }
}
