//! Basic type definitions for the battleship server
//!
//! Provides newtype wrappers for type safety:
//! - `ClientId`: UUID-based unique connection identifier
//! - `Coord`: a board cell, convertible to and from labels like "A5"

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use uuid::Uuid;

use crate::error::AppError;

/// Side length of the (square) board. Labels run A..J and 1..10.
pub const BOARD_SIZE: u8 = 10;

/// Unique connection identifier (newtype pattern)
///
/// Wraps a UUID v4 for type-safe client identification.
/// Implements Hash and Eq for use as HashMap keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ClientId(pub Uuid);

impl ClientId {
    /// Create a new random client ID
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for ClientId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for ClientId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A cell on the board, zero-based
///
/// Bijective with labels of the form `<column-letter><row-number>`
/// ("A5", "j10"). Parsing is case-insensitive; display renders the
/// canonical uppercase label. On the wire a coordinate is always the
/// label string, never a row/col pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Coord {
    pub row: u8,
    pub col: u8,
}

impl Coord {
    /// Create a coordinate from zero-based indices.
    ///
    /// Callers are expected to stay inside the board; parsed input is
    /// bounds-checked in `from_str`.
    pub fn new(row: u8, col: u8) -> Self {
        Self { row, col }
    }
}

impl FromStr for Coord {
    type Err = AppError;

    fn from_str(label: &str) -> Result<Self, Self::Err> {
        let malformed = || AppError::MalformedCoordinate(label.to_string());

        let mut chars = label.chars();
        let letter = chars.next().ok_or_else(malformed)?;
        if !letter.is_ascii_alphabetic() {
            return Err(malformed());
        }
        let col = letter.to_ascii_uppercase() as u8 - b'A';

        let digits = chars.as_str();
        if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
            return Err(malformed());
        }
        let row_number: u8 = digits.parse().map_err(|_| malformed())?;
        if row_number == 0 {
            return Err(malformed());
        }
        let row = row_number - 1;

        if row >= BOARD_SIZE || col >= BOARD_SIZE {
            return Err(malformed());
        }
        Ok(Self { row, col })
    }
}

impl fmt::Display for Coord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", (b'A' + self.col) as char, self.row + 1)
    }
}

impl Serialize for Coord {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Coord {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let label = String::deserialize(deserializer)?;
        label.parse().map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_id_unique() {
        let id1 = ClientId::new();
        let id2 = ClientId::new();
        assert_ne!(id1, id2);
    }

    #[test]
    fn test_coord_round_trip() {
        for row in 0..BOARD_SIZE {
            for col in 0..BOARD_SIZE {
                let coord = Coord::new(row, col);
                let parsed: Coord = coord.to_string().parse().unwrap();
                assert_eq!(parsed, coord);
            }
        }
    }

    #[test]
    fn test_coord_parse_case_insensitive() {
        let lower: Coord = "a5".parse().unwrap();
        let upper: Coord = "A5".parse().unwrap();
        assert_eq!(lower, upper);
        assert_eq!(lower, Coord::new(4, 0));
    }

    #[test]
    fn test_coord_display_canonical() {
        assert_eq!(Coord::new(0, 0).to_string(), "A1");
        assert_eq!(Coord::new(9, 9).to_string(), "J10");
    }

    #[test]
    fn test_coord_parse_rejects_malformed() {
        for label in ["", "5", "A", "A0", "A11", "K1", "AA1", "A1A", "A+1", "1A"] {
            assert!(
                label.parse::<Coord>().is_err(),
                "{:?} should not parse",
                label
            );
        }
    }

    #[test]
    fn test_coord_serde_as_label() {
        let coord = Coord::new(6, 2);
        let json = serde_json::to_string(&coord).unwrap();
        assert_eq!(json, "\"C7\"");
        let back: Coord = serde_json::from_str(&json).unwrap();
        assert_eq!(back, coord);
    }
}
