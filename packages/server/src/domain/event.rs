//! Events the relay sends to peers.

use super::value_object::{PeerId, RoomCode, RoomState, Timestamp};

/// An outbound notification, independent of its wire encoding.
#[derive(Debug, Clone, PartialEq)]
pub enum RelayEvent {
    /// Reply to a join: the room as the joining peer should see it.
    Joined {
        code: RoomCode,
        host_id: Option<PeerId>,
        state: Option<RoomState>,
    },
    /// A peer entered (`joined == true`) or left the room.
    Presence { id: PeerId, joined: bool },
    /// The host published a new state.
    StateChanged { state: RoomState },
    /// Host authority moved to another peer.
    HostChanged { host_id: PeerId },
    /// Keepalive reply.
    Pong { at: Timestamp },
}
