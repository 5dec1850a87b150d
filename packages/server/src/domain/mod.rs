//! Domain layer: rooms, peers and the events they emit.
//!
//! This layer knows nothing about WebSocket or JSON. The ports it needs
//! (`RoomRepository`, `MessagePusher`) are defined here and implemented by the
//! infrastructure layer.

pub mod entity;
pub mod error;
pub mod event;
pub mod message_pusher;
pub mod repository;
pub mod value_object;

pub use entity::{Peer, Room};
pub use error::{MessagePushError, RoomError};
pub use event::RelayEvent;
pub use message_pusher::{MessagePusher, PusherChannel};
#[cfg(test)]
pub use message_pusher::MockMessagePusher;
pub use repository::{RoomRepository, SharedRoom};
pub use value_object::{ConnectionId, PeerAddress, PeerId, RoomCode, RoomState, Timestamp};
