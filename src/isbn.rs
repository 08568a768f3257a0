//! ISBN normalization and checksum validation
//!
//! Callers paste ISBNs in whatever shape their catalog prints them
//! (`978-0-13-468599-1`, `978 0134685991`, `097522980x`). The canonical
//! form strips separators and upper-cases the ISBN-10 check character.
//! Validation happens once here; everything downstream works with a
//! checked [`Isbn`] and never re-validates.

use std::fmt;

use crate::error::{Error, Result};

/// A validated, canonical ISBN (10 or 13 characters, separators removed).
///
/// Immutable once constructed; the only way to obtain one is [`normalize`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Isbn(String);

impl Isbn {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Isbn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Strip separators and validate as ISBN-10 or ISBN-13.
///
/// Returns the canonical [`Isbn`] on success, `Error::InvalidIsbn` otherwise.
/// Pure function, no side effects.
pub fn normalize(input: &str) -> Result<Isbn> {
    let canonical: String = input
        .chars()
        .filter(|c| *c != '-' && !c.is_whitespace())
        .map(|c| c.to_ascii_uppercase())
        .collect();

    let valid = match canonical.len() {
        10 => is_valid_isbn10(&canonical),
        13 => is_valid_isbn13(&canonical),
        _ => false,
    };

    if valid {
        Ok(Isbn(canonical))
    } else {
        Err(Error::InvalidIsbn(input.to_string()))
    }
}

/// ISBN-10 checksum: sum of (10 - i) * digit[i] must be divisible by 11.
/// The final position may be `X`, standing for the value 10.
fn is_valid_isbn10(s: &str) -> bool {
    let mut sum = 0u32;
    for (i, b) in s.bytes().enumerate() {
        let value = match b {
            b'0'..=b'9' => u32::from(b - b'0'),
            b'X' if i == 9 => 10,
            _ => return false,
        };
        sum += (10 - i as u32) * value;
    }
    sum % 11 == 0
}

/// ISBN-13 checksum: digits weighted alternately 1 and 3 must sum to a
/// multiple of 10. All thirteen characters must be digits.
fn is_valid_isbn13(s: &str) -> bool {
    let mut sum = 0u32;
    for (i, b) in s.bytes().enumerate() {
        if !b.is_ascii_digit() {
            return false;
        }
        let weight = if i % 2 == 0 { 1 } else { 3 };
        sum += weight * u32::from(b - b'0');
    }
    sum % 10 == 0
}
