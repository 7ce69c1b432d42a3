//! Outbound side of the push-channel collaborator.
//!
//! The transport host (a websocket server, in production) owns the
//! connection lifecycle and calls into the registry on authenticate and
//! disconnect events; this crate only needs to address a channel and
//! send to it.

pub mod loopback;

pub use loopback::{LoopbackTransport, OutboundFrame};

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

/// Opaque handle identifying one live channel.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ChannelId(String);

impl ChannelId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for ChannelId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, Error)]
pub enum TransportError {
    #[error("channel {0} is closed")]
    ChannelClosed(ChannelId),

    #[error("transport failure: {0}")]
    Transport(#[from] anyhow::Error),
}

#[async_trait]
pub trait ChannelTransport: Send + Sync {
    /// Deliver an event to a single live channel.
    async fn send(
        &self,
        channel: &ChannelId,
        event: &str,
        payload: Value,
    ) -> Result<(), TransportError>;
}
