//! Infrastructure layer: concrete registry, message pushing and wire DTOs.

pub mod dto;
pub mod message_pusher;
pub mod repository;
