//! Shared application state.

use std::sync::Arc;

use podium_shared::time::Clock;

use crate::usecase::{
    GetRoomDetailUseCase, GetRoomsUseCase, JoinRoomUseCase, LeaveRoomUseCase, PushStateUseCase,
};

/// Shared application state
pub struct AppState {
    /// JoinRoomUseCase（ルーム参加のユースケース）
    pub join_room_usecase: Arc<JoinRoomUseCase>,
    /// LeaveRoomUseCase（ルーム退出のユースケース）
    pub leave_room_usecase: Arc<LeaveRoomUseCase>,
    /// PushStateUseCase（状態送信のユースケース）
    pub push_state_usecase: Arc<PushStateUseCase>,
    /// GetRoomsUseCase（ルーム一覧取得のユースケース）
    pub get_rooms_usecase: Arc<GetRoomsUseCase>,
    /// GetRoomDetailUseCase（ルーム詳細取得のユースケース）
    pub get_room_detail_usecase: Arc<GetRoomDetailUseCase>,
    /// pong に載せるサーバー時刻
    pub clock: Arc<dyn Clock>,
}
