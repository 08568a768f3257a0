//! Unit tests for ISBN normalization and checksum validation

use lexos::error::Error;
use lexos::isbn::normalize;

// ============================================================================
// Acceptance
// ============================================================================

#[test]
fn valid_isbn13_with_hyphens_is_canonicalized() {
    let isbn = normalize("978-0-13-468599-1").unwrap();
    assert_eq!(isbn.as_str(), "9780134685991");
}

#[test]
fn valid_isbn13_without_separators() {
    let isbn = normalize("9780134685991").unwrap();
    assert_eq!(isbn.as_str(), "9780134685991");
}

#[test]
fn valid_isbn13_with_spaces() {
    let isbn = normalize("978 0134685991").unwrap();
    assert_eq!(isbn.as_str(), "9780134685991");
}

#[test]
fn valid_isbn10() {
    let isbn = normalize("0-306-40615-2").unwrap();
    assert_eq!(isbn.as_str(), "0306406152");
}

#[test]
fn valid_isbn10_with_x_check_digit() {
    let isbn = normalize("097522980X").unwrap();
    assert_eq!(isbn.as_str(), "097522980X");
}

#[test]
fn lowercase_x_check_digit_is_uppercased() {
    let isbn = normalize("097522980x").unwrap();
    assert_eq!(isbn.as_str(), "097522980X");
}

// ============================================================================
// Rejection
// ============================================================================

#[test]
fn ten_digits_with_bad_checksum_are_rejected() {
    assert!(matches!(
        normalize("1234567890"),
        Err(Error::InvalidIsbn(_))
    ));
}

#[test]
fn thirteen_digits_with_bad_checksum_are_rejected() {
    // Last digit off by one from the valid 9780134685991
    assert!(matches!(
        normalize("9780134685990"),
        Err(Error::InvalidIsbn(_))
    ));
}

#[test]
fn x_anywhere_but_last_position_is_rejected() {
    assert!(normalize("09752298X0").is_err());
}

#[test]
fn x_is_not_allowed_in_isbn13() {
    assert!(normalize("978013468599X").is_err());
}

#[test]
fn wrong_lengths_are_rejected() {
    assert!(normalize("").is_err());
    assert!(normalize("12345").is_err());
    assert!(normalize("97801346859911").is_err());
}

#[test]
fn non_digit_garbage_is_rejected() {
    assert!(normalize("not-an-isbn!").is_err());
    assert!(normalize("97801346ZZ991").is_err());
}

#[test]
fn error_message_names_the_input() {
    let err = normalize("1234567890").unwrap_err();
    assert!(err.to_string().contains("1234567890"));
}
