//! HTTP API response DTOs.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// One entry of `GET /api/rooms`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoomSummaryDto {
    pub code: String,
    pub peers: Vec<String>,
    pub host_id: Option<String>,
    pub last_activity: String,
}

/// A peer inside `RoomDetailDto`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PeerDetailDto {
    pub id: String,
    pub joined_at: String,
}

/// Response of `GET /api/rooms/{code}`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoomDetailDto {
    pub code: String,
    pub peers: Vec<PeerDetailDto>,
    pub host_id: Option<String>,
    pub state: Value,
    pub last_activity: String,
    pub created_at: String,
}
