//! In-process transport backed by per-channel mpsc queues. Used by the
//! test suites and by local development without a websocket host.

use async_trait::async_trait;
use dashmap::DashMap;
use serde_json::Value;
use tokio::sync::mpsc;

use super::{ChannelId, ChannelTransport, TransportError};

/// Frame as it would go over the wire.
#[derive(Debug, Clone)]
pub struct OutboundFrame {
    pub event: String,
    pub payload: Value,
}

#[derive(Debug, Default)]
pub struct LoopbackTransport {
    channels: DashMap<ChannelId, mpsc::UnboundedSender<OutboundFrame>>,
}

impl LoopbackTransport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Open a channel and return its receiving end.
    pub fn open(&self, channel: ChannelId) -> mpsc::UnboundedReceiver<OutboundFrame> {
        let (tx, rx) = mpsc::unbounded_channel();
        self.channels.insert(channel, tx);
        rx
    }

    /// Drop a channel; subsequent sends to it fail as closed.
    pub fn close(&self, channel: &ChannelId) {
        self.channels.remove(channel);
    }
}

#[async_trait]
impl ChannelTransport for LoopbackTransport {
    async fn send(
        &self,
        channel: &ChannelId,
        event: &str,
        payload: Value,
    ) -> Result<(), TransportError> {
        let sender = self
            .channels
            .get(channel)
            .ok_or_else(|| TransportError::ChannelClosed(channel.clone()))?;

        sender
            .send(OutboundFrame {
                event: event.to_string(),
                payload,
            })
            .map_err(|_| TransportError::ChannelClosed(channel.clone()))
    }
}
