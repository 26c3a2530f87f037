use crate::domain::BearerToken;
use async_trait::async_trait;
use serde_json::Value;
use std::fmt::Debug;
use thiserror::Error;
use tokio::sync::mpsc::Sender;

/// A push connection delivering named events for a joined room.
#[async_trait]
pub trait RealtimeChannel: Debug + Send + Sync {
    /// Connects with `auth_token`, joins `room` and forwards every `event` payload to `tx`.
    ///
    /// A transport failure after the connection is established is forwarded as [`ChannelMessage::Failed`].
    async fn open(
        &self,
        auth_token: &BearerToken,
        room: &str,
        event: &str,
        tx: Sender<ChannelMessage>,
    ) -> Result<Box<dyn RealtimeConnection>, ChannelError>;
}

/// An open channel, closed with [`RealtimeConnection::disconnect`].
pub trait RealtimeConnection: Debug + Send {
    fn disconnect(self: Box<Self>);
}

#[derive(Debug)]
pub enum ChannelMessage {
    Event(Value),
    Failed(ChannelError),
}

#[derive(Error, Debug)]
pub enum ChannelError {
    #[error("socket.io error: {0}")]
    SocketIo(#[from] rust_socketio::Error),
    #[error("{0}")]
    Transport(String),
    #[error("connection closed")]
    Closed,
}
