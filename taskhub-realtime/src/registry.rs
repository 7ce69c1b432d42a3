use dashmap::DashMap;

use crate::transport::ChannelId;

/// Maps an application-level user id to its most recent live channel.
///
/// One binding per user: a client announcing itself from a second
/// channel silently displaces the first. Bindings live only in process
/// memory and die with the process.
#[derive(Debug, Default)]
pub struct ConnectionRegistry {
    bindings: DashMap<String, ChannelId>,
    // Reverse index so a disconnect can unbind without knowing the user.
    channels: DashMap<ChannelId, String>,
}

impl ConnectionRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Bind a user to a channel, overwriting any previous binding. The
    /// identity announcement is trusted as asserted; the channel layer
    /// performs no token validation.
    pub fn bind(&self, user_id: impl Into<String>, channel: ChannelId) {
        let user_id = user_id.into();

        if let Some(displaced) = self.bindings.insert(user_id.clone(), channel.clone()) {
            if displaced != channel {
                self.channels.remove(&displaced);
            }
        }
        self.channels.insert(channel.clone(), user_id.clone());

        tracing::debug!(user_id, channel = %channel, "channel bound");
    }

    /// Remove the binding held by this channel. A disconnect of an
    /// already-displaced channel must not evict the newer binding, so
    /// the forward entry is only removed while it still points here.
    pub fn unbind(&self, channel: &ChannelId) {
        if let Some((_, user_id)) = self.channels.remove(channel) {
            self.bindings
                .remove_if(&user_id, |_, bound| bound == channel);
            tracing::debug!(user_id, channel = %channel, "channel unbound");
        }
    }

    pub fn lookup(&self, user_id: &str) -> Option<ChannelId> {
        self.bindings.get(user_id).map(|entry| entry.value().clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bind_then_lookup() {
        let registry = ConnectionRegistry::new();
        registry.bind("u1", ChannelId::new("sockA"));

        assert_eq!(registry.lookup("u1"), Some(ChannelId::new("sockA")));
        assert_eq!(registry.lookup("u2"), None);
    }

    #[test]
    fn rebind_overwrites_instead_of_accumulating() {
        let registry = ConnectionRegistry::new();
        registry.bind("u1", ChannelId::new("sockA"));
        registry.bind("u1", ChannelId::new("sockB"));

        assert_eq!(registry.lookup("u1"), Some(ChannelId::new("sockB")));
    }

    #[test]
    fn unbind_removes_the_binding() {
        let registry = ConnectionRegistry::new();
        registry.bind("u1", ChannelId::new("sockB"));
        registry.unbind(&ChannelId::new("sockB"));

        assert_eq!(registry.lookup("u1"), None);
    }

    #[test]
    fn unbind_of_unknown_channel_is_a_noop() {
        let registry = ConnectionRegistry::new();
        registry.bind("u1", ChannelId::new("sockA"));
        registry.unbind(&ChannelId::new("sockZ"));

        assert_eq!(registry.lookup("u1"), Some(ChannelId::new("sockA")));
    }

    #[test]
    fn stale_disconnect_does_not_evict_the_newer_binding() {
        let registry = ConnectionRegistry::new();
        registry.bind("u1", ChannelId::new("sockA"));
        registry.bind("u1", ChannelId::new("sockB"));

        // sockA's disconnect arrives after the rebind.
        registry.unbind(&ChannelId::new("sockA"));

        assert_eq!(registry.lookup("u1"), Some(ChannelId::new("sockB")));
    }

    #[test]
    fn two_users_keep_independent_bindings() {
        let registry = ConnectionRegistry::new();
        registry.bind("u1", ChannelId::new("sockA"));
        registry.bind("u2", ChannelId::new("sockB"));

        registry.unbind(&ChannelId::new("sockA"));

        assert_eq!(registry.lookup("u1"), None);
        assert_eq!(registry.lookup("u2"), Some(ChannelId::new("sockB")));
    }
}
