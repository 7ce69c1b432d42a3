//! taskhub-realtime: identity-addressed push delivery over live channels.
//!
//! A connected client announces its user id once after the handshake;
//! the registry keeps at most one live channel per user, and the
//! dispatcher delivers fire-and-forget notifications to whichever
//! channel is currently bound. Nothing here is persisted: a user with
//! no live channel simply misses the notification.
pub mod dispatcher;
pub mod models;
pub mod registry;
pub mod transport;

pub use dispatcher::NotificationDispatcher;
pub use registry::ConnectionRegistry;
pub use transport::{ChannelId, ChannelTransport, TransportError};
