use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::{SeatError, SeatRejection, SeatResult};

/// A seat on the map, written as row number followed by letter ("12C").
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(into = "String", try_from = "String")]
pub struct SeatId {
    row: u8,
    letter: char,
}

impl SeatId {
    pub fn new(row: u8, letter: char) -> Self {
        Self {
            row,
            letter: letter.to_ascii_uppercase(),
        }
    }

    pub fn row(&self) -> u8 {
        self.row
    }

    pub fn letter(&self) -> char {
        self.letter
    }
}

impl fmt::Display for SeatId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.row, self.letter)
    }
}

impl FromStr for SeatId {
    type Err = SeatError;

    fn from_str(raw: &str) -> SeatResult<Self> {
        let trimmed = raw.trim();
        let malformed = || SeatError::invalid_seat(raw, SeatRejection::Malformed);

        let split = trimmed
            .find(|c: char| !c.is_ascii_digit())
            .ok_or_else(malformed)?;
        let (digits, rest) = trimmed.split_at(split);

        let row: u8 = digits.parse().map_err(|_| malformed())?;
        if row == 0 {
            return Err(malformed());
        }

        let mut chars = rest.chars();
        match (chars.next(), chars.next()) {
            (Some(letter), None) if letter.is_ascii_alphabetic() => Ok(SeatId::new(row, letter)),
            _ => Err(malformed()),
        }
    }
}

impl From<SeatId> for String {
    fn from(id: SeatId) -> Self {
        id.to_string()
    }
}

impl TryFrom<String> for SeatId {
    type Error = SeatError;

    fn try_from(value: String) -> SeatResult<Self> {
        value.parse()
    }
}

/// Cabin grid: numbered rows, lettered seats per row, one aisle.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SeatLayout {
    rows: u8,
    letters: Vec<char>,
    aisle_after: usize,
}

impl SeatLayout {
    pub const MAX_ROWS: u8 = 99;

    pub fn new(rows: u8, letters: &str, aisle_after: usize) -> SeatResult<Self> {
        if rows == 0 || rows > Self::MAX_ROWS {
            return Err(SeatError::InvalidLayout(format!(
                "rows must be between 1 and {}, got {}",
                Self::MAX_ROWS,
                rows
            )));
        }

        let letters: Vec<char> = letters.chars().collect();
        if letters.is_empty() || letters.len() > 26 {
            return Err(SeatError::InvalidLayout(format!(
                "expected 1 to 26 seat letters, got {}",
                letters.len()
            )));
        }
        if let Some(bad) = letters.iter().find(|c| !c.is_ascii_uppercase()) {
            return Err(SeatError::InvalidLayout(format!(
                "seat letter {:?} is not an uppercase ASCII letter",
                bad
            )));
        }
        for (i, letter) in letters.iter().enumerate() {
            if letters[..i].contains(letter) {
                return Err(SeatError::InvalidLayout(format!("seat letter {} repeats", letter)));
            }
        }
        if aisle_after > letters.len() {
            return Err(SeatError::InvalidLayout(format!(
                "aisle position {} is past the last seat letter",
                aisle_after
            )));
        }

        Ok(Self {
            rows,
            letters,
            aisle_after,
        })
    }

    pub fn rows(&self) -> u8 {
        self.rows
    }

    pub fn letters(&self) -> &[char] {
        &self.letters
    }

    /// Number of seat letters left of the aisle.
    pub fn aisle_after(&self) -> usize {
        self.aisle_after
    }

    pub fn seat_count(&self) -> usize {
        self.rows as usize * self.letters.len()
    }

    pub fn contains(&self, seat: &SeatId) -> bool {
        (1..=self.rows).contains(&seat.row) && self.letters.contains(&seat.letter)
    }

    /// All seats, row by row, letters in layout order.
    pub fn seats(&self) -> impl Iterator<Item = SeatId> + '_ {
        (1..=self.rows).flat_map(move |row| self.letters.iter().map(move |&letter| SeatId::new(row, letter)))
    }
}

impl Default for SeatLayout {
    fn default() -> Self {
        Self {
            rows: 8,
            letters: vec!['A', 'B', 'C', 'D', 'E', 'F'],
            aisle_after: 3,
        }
    }
}
