//! 接続とルームの紐付け

use crate::domain::{ConnectionId, PeerAddress, SharedRoom};

/// join 済みの接続が保持するセッション
///
/// 1 つの接続は同時に 1 つのセッションしか持ちません。
pub struct RoomSession {
    connection_id: ConnectionId,
    address: PeerAddress,
    room: SharedRoom,
}

impl RoomSession {
    pub fn new(connection_id: ConnectionId, address: PeerAddress, room: SharedRoom) -> Self {
        Self {
            connection_id,
            address,
            room,
        }
    }

    pub fn connection_id(&self) -> ConnectionId {
        self.connection_id
    }

    pub fn address(&self) -> &PeerAddress {
        &self.address
    }

    pub fn room(&self) -> &SharedRoom {
        &self.room
    }
}
