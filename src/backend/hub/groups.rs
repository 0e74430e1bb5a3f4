/**
 * Hub Group Registry
 *
 * Tracks live hub connections and the board groups they joined.
 *
 * # Structure
 *
 * - connection id → connection entry (user, outbound sender, joined groups)
 * - group name → set of connection ids
 *
 * Both maps sit behind one async `RwLock` so membership changes are atomic.
 * Sending clones the frame into every member's unbounded channel; the
 * connection's writer task drains it onto the socket.
 *
 * Empty groups are pruned as soon as their last member leaves.
 */

use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use tokio::sync::{mpsc, RwLock};

use super::protocol::HubFrame;
use crate::shared::UserIdentity;

/// Outbound queue of a single hub connection
pub type FrameSender = mpsc::UnboundedSender<HubFrame>;

/// Group name for a board
pub fn board_group(board_id: &str) -> String {
    format!("Board_{}", board_id)
}

struct ConnectionEntry {
    user: UserIdentity,
    sender: FrameSender,
    groups: HashSet<String>,
}

#[derive(Default)]
struct Registry {
    connections: HashMap<String, ConnectionEntry>,
    groups: HashMap<String, HashSet<String>>,
}

impl Registry {
    fn detach(&mut self, connection_id: &str, group: &str) -> bool {
        let Some(members) = self.groups.get_mut(group) else {
            return false;
        };
        let removed = members.remove(connection_id);
        if members.is_empty() {
            self.groups.remove(group);
            tracing::debug!("[Hub] Group {} pruned", group);
        }
        removed
    }
}

/// What remains of a connection after it was unregistered
#[derive(Debug, Clone, PartialEq)]
pub struct DisconnectedConnection {
    pub user: UserIdentity,
    /// Groups the connection was still a member of
    pub groups: Vec<String>,
}

/// Shared registry of connections and board groups
#[derive(Clone, Default)]
pub struct GroupRegistry {
    inner: Arc<RwLock<Registry>>,
}

impl GroupRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a freshly handshaken connection
    ///
    /// Returns `false` and leaves the registry untouched if the id is already live.
    pub async fn register(&self, connection_id: &str, user: UserIdentity, sender: FrameSender) -> bool {
        let mut registry = self.inner.write().await;
        if registry.connections.contains_key(connection_id) {
            return false;
        }
        registry.connections.insert(
            connection_id.to_string(),
            ConnectionEntry {
                user,
                sender,
                groups: HashSet::new(),
            },
        );
        tracing::debug!(
            "[Hub] Connection {} registered ({} live)",
            connection_id,
            registry.connections.len()
        );
        true
    }

    /// Remove a connection from the registry and every group it joined
    ///
    /// Returns `None` if the connection was not registered.
    pub async fn unregister(&self, connection_id: &str) -> Option<DisconnectedConnection> {
        let mut registry = self.inner.write().await;
        let entry = registry.connections.remove(connection_id)?;

        let mut groups: Vec<String> = entry.groups.into_iter().collect();
        groups.sort();
        for group in &groups {
            registry.detach(connection_id, group);
        }

        tracing::debug!(
            "[Hub] Connection {} unregistered from {} group(s)",
            connection_id,
            groups.len()
        );
        Some(DisconnectedConnection { user: entry.user, groups })
    }

    /// Add a connection to a group
    ///
    /// Returns `false` if the connection is unknown. Joining twice is a no-op.
    pub async fn add_to_group(&self, connection_id: &str, group: &str) -> bool {
        let mut registry = self.inner.write().await;
        let Some(entry) = registry.connections.get_mut(connection_id) else {
            return false;
        };
        entry.groups.insert(group.to_string());
        registry
            .groups
            .entry(group.to_string())
            .or_default()
            .insert(connection_id.to_string());
        true
    }

    /// Remove a connection from a group
    ///
    /// Returns `true` if the connection was a member.
    pub async fn remove_from_group(&self, connection_id: &str, group: &str) -> bool {
        let mut registry = self.inner.write().await;
        if let Some(entry) = registry.connections.get_mut(connection_id) {
            entry.groups.remove(group);
        }
        registry.detach(connection_id, group)
    }

    /// Queue a frame for every member of a group
    ///
    /// Returns the number of connections the frame was queued for. Members
    /// whose writer already stopped are skipped.
    pub async fn send_to_group(&self, group: &str, frame: &HubFrame) -> usize {
        let registry = self.inner.read().await;
        let Some(members) = registry.groups.get(group) else {
            return 0;
        };

        members
            .iter()
            .filter_map(|id| registry.connections.get(id))
            .filter(|entry| entry.sender.send(frame.clone()).is_ok())
            .count()
    }

    /// Queue a frame for a single connection
    pub async fn send_to_connection(&self, connection_id: &str, frame: HubFrame) -> bool {
        let registry = self.inner.read().await;
        registry
            .connections
            .get(connection_id)
            .map(|entry| entry.sender.send(frame).is_ok())
            .unwrap_or(false)
    }

    pub async fn user(&self, connection_id: &str) -> Option<UserIdentity> {
        let registry = self.inner.read().await;
        registry.connections.get(connection_id).map(|entry| entry.user.clone())
    }

    pub async fn member_count(&self, group: &str) -> usize {
        let registry = self.inner.read().await;
        registry.groups.get(group).map(HashSet::len).unwrap_or(0)
    }

    pub async fn group_count(&self) -> usize {
        self.inner.read().await.groups.len()
    }

    pub async fn connection_count(&self) -> usize {
        self.inner.read().await.connections.len()
    }

    /// Groups a connection belongs to, sorted
    pub async fn groups_of(&self, connection_id: &str) -> Vec<String> {
        let registry = self.inner.read().await;
        let mut groups: Vec<String> = registry
            .connections
            .get(connection_id)
            .map(|entry| entry.groups.iter().cloned().collect())
            .unwrap_or_default();
        groups.sort();
        groups
    }
}
