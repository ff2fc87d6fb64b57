//! Room codes
//!
//! A room code is a short, human-shareable session identifier made of
//! upper-case base-36 characters (e.g. `K7Q2ZD`). Codes are not checked for
//! collisions; two sessions may end up with the same code.
//!
//! Generation goes through [`RoomCodeGenerator`], a xorshift64* generator:
//! a fixed seed always produces the same sequence of codes, which keeps
//! tests and scripted sessions reproducible.

use serde::Serialize;
use std::fmt;
use thiserror::Error;
use uuid::Uuid;

/// Characters a room code may contain
pub const ROOM_CODE_ALPHABET: &[u8; 36] = b"0123456789ABCDEFGHIJKLMNOPQRSTUVWXYZ";

pub const DEFAULT_ROOM_CODE_LENGTH: usize = 6;
pub const MIN_ROOM_CODE_LENGTH: usize = 4;
pub const MAX_ROOM_CODE_LENGTH: usize = 12;

/// Errors raised when parsing a user-entered room code
#[derive(Debug, Error, PartialEq)]
pub enum RoomCodeError {
    #[error("Room code must be {expected} characters, got {actual}")]
    BadLength { expected: usize, actual: usize },

    #[error("Room code contains invalid character '{0}'")]
    BadCharacter(char),
}

/// Deterministic xorshift64* source for room codes
///
/// # Example
/// ```
/// use poker_ledger_core::session::RoomCodeGenerator;
///
/// let mut a = RoomCodeGenerator::new(42);
/// let mut b = RoomCodeGenerator::new(42);
/// assert_eq!(a.next_u64(), b.next_u64());
/// ```
#[derive(Debug, Clone)]
pub struct RoomCodeGenerator {
    state: u64,
}

impl RoomCodeGenerator {
    /// Seeded generator (a zero seed is replaced by 1)
    pub fn new(seed: u64) -> Self {
        let state = if seed == 0 { 1 } else { seed };
        Self { state }
    }

    /// Generator seeded from a random UUID
    pub fn from_entropy() -> Self {
        let bytes = *Uuid::new_v4().as_bytes();
        Self::new(u128::from_le_bytes(bytes) as u64)
    }

    pub fn next_u64(&mut self) -> u64 {
        let mut x = self.state;
        x ^= x >> 12;
        x ^= x << 25;
        x ^= x >> 27;
        self.state = x;
        x.wrapping_mul(0x2545F4914F6CDD1D)
    }

    /// Next character drawn from [`ROOM_CODE_ALPHABET`]
    pub fn next_symbol(&mut self) -> char {
        // High bits of xorshift64* are the best distributed
        let index = (self.next_u64() >> 32) % ROOM_CODE_ALPHABET.len() as u64;
        ROOM_CODE_ALPHABET[index as usize] as char
    }
}

/// Validated, upper-case room code
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct RoomCode(String);

impl RoomCode {
    /// Draw a new code of `length` characters
    ///
    /// # Example
    /// ```
    /// use poker_ledger_core::session::{RoomCode, RoomCodeGenerator};
    ///
    /// let mut generator = RoomCodeGenerator::new(7);
    /// let code = RoomCode::generate(&mut generator, 6);
    /// assert_eq!(code.as_str().len(), 6);
    /// assert!(RoomCode::parse(&code.as_str().to_lowercase(), 6).is_ok());
    /// ```
    pub fn generate(generator: &mut RoomCodeGenerator, length: usize) -> Self {
        Self((0..length).map(|_| generator.next_symbol()).collect())
    }

    /// Normalize and validate a code typed by a user
    ///
    /// Surrounding whitespace is ignored and letters are upper-cased.
    ///
    /// # Errors
    /// `BadLength` or `BadCharacter`.
    pub fn parse(input: &str, length: usize) -> Result<Self, RoomCodeError> {
        let code = input.trim().to_ascii_uppercase();

        if let Some(bad) = code.chars().find(|c| !c.is_ascii_alphanumeric()) {
            return Err(RoomCodeError::BadCharacter(bad));
        }
        if code.len() != length {
            return Err(RoomCodeError::BadLength {
                expected: length,
                actual: code.chars().count(),
            });
        }

        Ok(Self(code))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for RoomCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
