//! cardutils - Identify, validate and format payment card input
//!
//! This crate classifies card numbers by brand, groups them for display and
//! sanity-checks numbers, expiry dates and CVC codes. Everything is a pure
//! function of its input and an immutable brand table; nothing contacts a
//! payment network, so a passing number is only well-formed, not real.
//!
//! The free functions below use the built-in brand table. Build a
//! [`CardTable`] to work with custom brands.
//!
//! # Example
//! ```
//! use cardutils::{format_card_number, parse_card_type, validate_card_number};
//!
//! let input = "4012 8888 8888 1881";
//! assert_eq!(format_card_number(input), "4012 8888 8888 1881");
//! assert_eq!(parse_card_type(input), Some("visa"));
//! assert!(validate_card_number(input));
//! ```

pub mod error;
pub mod expiry;
pub mod format;
pub mod table;
pub mod validate;

pub use card_brands::{types, BrandDefinition, BrandError, BrandSpec};
pub use card_common::luhn_check;
pub use error::{ExpiryError, NumberError};
pub use expiry::{
    check_card_expiry, check_card_expiry_at, parse_card_expiry, parse_card_expiry_at,
    validate_card_expiry, validate_card_expiry_at, ParsedExpiry,
};
pub use table::CardTable;

/// The built-in brand table, in classification order
pub fn cards() -> &'static [BrandDefinition] {
    CardTable::default_table().cards()
}

/// Format a card number into space-separated display groups
pub fn format_card_number(input: &str) -> String {
    CardTable::default_table().format_card_number(input)
}

/// Brand identifier of a card number, or `None` if no brand matches
pub fn parse_card_type(input: &str) -> Option<&'static str> {
    CardTable::default_table().parse_card_type(input)
}

pub fn card_from_number(input: &str) -> Option<&'static BrandDefinition> {
    CardTable::default_table().card_from_number(input)
}

pub fn card_from_type(card_type: &str) -> Option<&'static BrandDefinition> {
    CardTable::default_table().card_from_type(card_type)
}

/// Whether a card number has a known shape and a valid checksum
pub fn validate_card_number(input: &str) -> bool {
    CardTable::default_table().validate_card_number(input)
}

pub fn check_card_number(input: &str) -> Result<Option<&'static BrandDefinition>, NumberError> {
    CardTable::default_table().check_card_number(input)
}

/// Whether a CVC has a valid length for `card_type` (3-4 digits if unknown)
pub fn validate_card_cvc(cvc: &str, card_type: Option<&str>) -> bool {
    CardTable::default_table().validate_card_cvc(cvc, card_type)
}
