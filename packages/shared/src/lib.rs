//! Utilities shared by the Podium server and client binaries.

pub mod logger;
pub mod time;
