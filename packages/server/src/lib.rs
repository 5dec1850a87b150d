//! Room relay server library.
//!
//! Peers join a room by code and the room's host pushes an opaque JSON state
//! that is mirrored to every other peer over WebSocket.

// layers
pub mod domain;
pub mod infrastructure;
pub mod ui;
pub mod usecase;

pub mod config;
