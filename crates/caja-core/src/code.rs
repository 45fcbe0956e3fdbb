//! # Product Code Derivation
//!
//! Pure helpers for generating business codes like `ELEC-LAPT-001`.
//!
//! ## Code Anatomy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │   ELEC - LAPT - GAME - 001                                              │
//! │   ────   ───────────   ───                                              │
//! │    │          │          │                                              │
//! │    │          │          └── sequence, zero-padded, scoped to prefix    │
//! │    │          └── first two name words, 4 letters each, uppercased      │
//! │    └── first 4 letters of the category ("GEN" when absent)              │
//! │                                                                         │
//! │   Only ASCII letters survive: "Coca-Cola 330ml" → COCA-ML              │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The sequence lookup needs the database, so the storage layer calls
//! [`code_prefix`] / [`next_sequence`] / [`format_code`] around its queries;
//! everything here stays pure and unit-testable.

// =============================================================================
// Prefix Derivation
// =============================================================================

/// Keeps the first `n` ASCII letters of `s`, uppercased.
fn letter_chunk(s: &str, n: usize) -> String {
    s.chars()
        .filter(|c| c.is_ascii_alphabetic())
        .take(n)
        .map(|c| c.to_ascii_uppercase())
        .collect()
}

/// Derives the stable prefix of a product code from category and name.
///
/// ## Example
/// ```rust
/// use caja_core::code::code_prefix;
///
/// assert_eq!(code_prefix(Some("Electronics"), "Laptop Gamer X"), "ELEC-LAPT-GAME");
/// assert_eq!(code_prefix(None, "Laptop"), "GEN-LAPT");
/// assert_eq!(code_prefix(Some("電子"), "Coca-Cola 330ml"), "GEN-COCA-ML");
/// ```
pub fn code_prefix(category: Option<&str>, name: &str) -> String {
    let mut category_code = letter_chunk(category.unwrap_or(""), 4);
    if category_code.is_empty() {
        category_code = "GEN".to_string();
    }

    let name_code = name
        .split_whitespace()
        .take(2)
        .map(|part| letter_chunk(part, 4))
        .filter(|chunk| !chunk.is_empty())
        .collect::<Vec<_>>()
        .join("-");

    if name_code.is_empty() {
        format!("{category_code}-PROD")
    } else {
        format!("{category_code}-{name_code}")
    }
}

// =============================================================================
// Sequence Handling
// =============================================================================

/// Computes the next sequence number from the latest existing code under a
/// prefix (`None` when the prefix is fresh).
///
/// Codes whose final segment is not numeric restart the sequence at 1, the
/// same way the original data set recovered from hand-edited codes.
///
/// ## Example
/// ```rust
/// use caja_core::code::next_sequence;
///
/// assert_eq!(next_sequence(None), 1);
/// assert_eq!(next_sequence(Some("ELEC-LAPT-007")), 8);
/// assert_eq!(next_sequence(Some("ELEC-LAPT-custom")), 1);
/// ```
pub fn next_sequence(last_code: Option<&str>) -> u32 {
    last_code
        .and_then(|code| code.rsplit('-').next())
        .and_then(|segment| segment.parse::<u32>().ok())
        .map(|last| last + 1)
        .unwrap_or(1)
}

/// Formats a full product code from prefix and sequence.
///
/// ## Example
/// ```rust
/// use caja_core::code::format_code;
///
/// assert_eq!(format_code("ELEC-LAPT", 1), "ELEC-LAPT-001");
/// assert_eq!(format_code("ELEC-LAPT", 1234), "ELEC-LAPT-1234");
/// ```
pub fn format_code(prefix: &str, sequence: u32) -> String {
    format!("{prefix}-{sequence:03}")
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prefix_uses_category_and_two_name_words() {
        assert_eq!(
            code_prefix(Some("Electronics"), "Laptop Gamer Pro"),
            "ELEC-LAPT-GAME"
        );
        assert_eq!(code_prefix(Some("Bebidas"), "Cola"), "BEBI-COLA");
    }

    #[test]
    fn test_prefix_strips_non_letters() {
        assert_eq!(code_prefix(Some("Food & Drink"), "Coca-Cola 330ml"), "FOOD-COCA-ML");
    }

    #[test]
    fn test_prefix_falls_back_to_gen_and_prod() {
        assert_eq!(code_prefix(None, "Laptop"), "GEN-LAPT");
        assert_eq!(code_prefix(Some("123"), "Laptop"), "GEN-LAPT");
        assert_eq!(code_prefix(Some("Electronics"), "123 456"), "ELEC-PROD");
    }

    #[test]
    fn test_next_sequence() {
        assert_eq!(next_sequence(None), 1);
        assert_eq!(next_sequence(Some("ELEC-LAPT-001")), 2);
        assert_eq!(next_sequence(Some("ELEC-LAPT-099")), 100);
        // A hand-edited tail restarts the sequence.
        assert_eq!(next_sequence(Some("ELEC-LAPT-custom")), 1);
    }

    #[test]
    fn test_format_code_pads_to_three_digits() {
        assert_eq!(format_code("ELEC-LAPT", 1), "ELEC-LAPT-001");
        assert_eq!(format_code("ELEC-LAPT", 42), "ELEC-LAPT-042");
        assert_eq!(format_code("ELEC-LAPT", 420), "ELEC-LAPT-420");
        // Sequences past 999 simply grow wider.
        assert_eq!(format_code("ELEC-LAPT", 1000), "ELEC-LAPT-1000");
    }
}
