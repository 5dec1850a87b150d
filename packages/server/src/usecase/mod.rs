//! UseCase 層
//!
//! 1 ユースケース = 1 構造体。Repository / MessagePusher / Clock を注入して使います。

mod error;
mod get_room_detail;
mod get_rooms;
mod join_room;
mod leave_room;
mod push_state;
mod reap_idle_rooms;
mod session;

pub use error::{GetRoomDetailError, PushStateError};
pub use get_room_detail::GetRoomDetailUseCase;
pub use get_rooms::GetRoomsUseCase;
pub use join_room::{JoinRequest, JoinRoomUseCase};
pub use leave_room::{LeaveOutcome, LeaveRoomUseCase};
pub use push_state::PushStateUseCase;
pub use reap_idle_rooms::ReapIdleRoomsUseCase;
pub use session::RoomSession;
