//! Room entity and host authority rules.

use std::collections::HashMap;

use super::{
    error::RoomError,
    value_object::{PeerId, RoomCode, RoomState, Timestamp},
};

/// A peer currently present in a room.
#[derive(Debug, Clone, PartialEq)]
pub struct Peer {
    pub id: PeerId,
    pub joined_at: Timestamp,
}

impl Peer {
    pub fn new(id: PeerId, joined_at: Timestamp) -> Self {
        Self { id, joined_at }
    }
}

/// A broadcast group with one authoritative state blob and at most one host.
///
/// Invariant: `host_id`, when set, is always a key of `peers`.
#[derive(Debug, Clone)]
pub struct Room {
    code: RoomCode,
    peers: HashMap<PeerId, Peer>,
    state: Option<RoomState>,
    host_id: Option<PeerId>,
    last_activity: Timestamp,
    created_at: Timestamp,
}

impl Room {
    /// Create an empty room with no host and no state.
    pub fn new(code: RoomCode, now: Timestamp) -> Self {
        Self {
            code,
            peers: HashMap::new(),
            state: None,
            host_id: None,
            last_activity: now,
            created_at: now,
        }
    }

    pub fn code(&self) -> &RoomCode {
        &self.code
    }

    pub fn state(&self) -> Option<&RoomState> {
        self.state.as_ref()
    }

    pub fn host_id(&self) -> Option<&PeerId> {
        self.host_id.as_ref()
    }

    pub fn last_activity(&self) -> Timestamp {
        self.last_activity
    }

    pub fn created_at(&self) -> Timestamp {
        self.created_at
    }

    pub fn peer_count(&self) -> usize {
        self.peers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.peers.is_empty()
    }

    pub fn contains_peer(&self, id: &PeerId) -> bool {
        self.peers.contains_key(id)
    }

    pub fn is_host(&self, id: &PeerId) -> bool {
        self.host_id.as_ref() == Some(id)
    }

    /// Peers sorted by id, for stable listings.
    pub fn peers(&self) -> Vec<&Peer> {
        let mut peers: Vec<&Peer> = self.peers.values().collect();
        peers.sort_by(|a, b| a.id.cmp(&b.id));
        peers
    }

    /// Ids of every peer in the room, in no particular order.
    pub fn peer_ids(&self) -> Vec<PeerId> {
        self.peers.keys().cloned().collect()
    }

    /// Ids of every peer except `exclude`, in no particular order.
    pub fn peer_ids_except(&self, exclude: &PeerId) -> Vec<PeerId> {
        self.peers
            .keys()
            .filter(|id| *id != exclude)
            .cloned()
            .collect()
    }

    /// Register a peer.
    ///
    /// The peer becomes host when it claims the role or when the room has no
    /// host yet. A claim always wins, even over a host that is still present.
    /// Re-adding an existing id replaces its entry.
    pub fn add_peer(&mut self, id: PeerId, as_host: bool, now: Timestamp) {
        if as_host || self.host_id.is_none() {
            self.host_id = Some(id.clone());
        }
        self.peers.insert(id.clone(), Peer::new(id, now));
        self.last_activity = now;
    }

    /// Remove a peer and fail over host authority if needed.
    ///
    /// Returns the promoted peer when the removed peer was host and someone
    /// remains. Which survivor is promoted is unspecified.
    pub fn remove_peer(&mut self, id: &PeerId, now: Timestamp) -> Option<PeerId> {
        self.peers.remove(id);
        self.last_activity = now;

        if !self.is_host(id) {
            return None;
        }

        self.host_id = self.peers.keys().next().cloned();
        self.host_id.clone()
    }

    /// Overwrite the state. Only the current host may do this.
    pub fn set_state(
        &mut self,
        requester: &PeerId,
        state: RoomState,
        now: Timestamp,
    ) -> Result<(), RoomError> {
        if !self.is_host(requester) {
            return Err(RoomError::NotHost(requester.as_str().to_string()));
        }
        self.state = Some(state);
        self.last_activity = now;
        Ok(())
    }

    /// Whether the room is empty and has seen no activity for longer than
    /// `idle_threshold_millis`.
    pub fn is_idle(&self, now: Timestamp, idle_threshold_millis: i64) -> bool {
        self.peers.is_empty() && now.millis_since(self.last_activity) > idle_threshold_millis
    }
}
