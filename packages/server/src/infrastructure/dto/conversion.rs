//! Conversion logic between DTOs and domain entities.

use podium_shared::time::timestamp_to_rfc3339;
use serde_json::Value;

use crate::domain::{Peer, RelayEvent, Room, RoomState};
use crate::infrastructure::dto::{http, websocket as dto};

// ========================================
// Domain → WebSocket DTO
// ========================================

impl From<RelayEvent> for dto::ServerMessage {
    fn from(event: RelayEvent) -> Self {
        match event {
            RelayEvent::Joined {
                code,
                host_id,
                state,
            } => Self::Joined {
                code: code.into_string(),
                host_id: host_id.map(|id| id.into_string()),
                state: state.map(RoomState::into_value).unwrap_or(Value::Null),
            },
            RelayEvent::Presence { id, joined } => Self::Presence {
                id: id.into_string(),
                joined,
            },
            RelayEvent::StateChanged { state } => Self::State {
                state: state.into_value(),
            },
            RelayEvent::HostChanged { host_id } => Self::Host {
                host_id: host_id.into_string(),
            },
            RelayEvent::Pong { at } => Self::Pong { t: at.value() },
        }
    }
}

// ========================================
// Domain → HTTP DTO
// ========================================

impl From<&Peer> for http::PeerDetailDto {
    fn from(peer: &Peer) -> Self {
        Self {
            id: peer.id.as_str().to_string(),
            joined_at: timestamp_to_rfc3339(peer.joined_at.value()),
        }
    }
}

impl From<&Room> for http::RoomSummaryDto {
    fn from(room: &Room) -> Self {
        Self {
            code: room.code().as_str().to_string(),
            peers: room
                .peers()
                .iter()
                .map(|p| p.id.as_str().to_string())
                .collect(),
            host_id: room.host_id().map(|id| id.as_str().to_string()),
            last_activity: timestamp_to_rfc3339(room.last_activity().value()),
        }
    }
}

impl From<&Room> for http::RoomDetailDto {
    fn from(room: &Room) -> Self {
        Self {
            code: room.code().as_str().to_string(),
            peers: room.peers().into_iter().map(Into::into).collect(),
            host_id: room.host_id().map(|id| id.as_str().to_string()),
            state: room
                .state()
                .map(|s| s.as_value().clone())
                .unwrap_or(Value::Null),
            last_activity: timestamp_to_rfc3339(room.last_activity().value()),
            created_at: timestamp_to_rfc3339(room.created_at().value()),
        }
    }
}
