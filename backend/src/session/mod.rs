//! Session Module
//!
//! The stateful shell around a ledger: room codes, per-session
//! configuration, and the controller that applies user actions.

pub mod config;
pub mod controller;
pub mod room;

pub use config::{ConfigError, SessionConfig};
pub use controller::{SessionController, SessionError, SessionStatus};
pub use room::{
    RoomCode, RoomCodeError, RoomCodeGenerator, DEFAULT_ROOM_CODE_LENGTH, MAX_ROOM_CODE_LENGTH,
    MIN_ROOM_CODE_LENGTH, ROOM_CODE_ALPHABET,
};
