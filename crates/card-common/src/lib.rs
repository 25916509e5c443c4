//! Card Common - Shared digit handling and checksum utilities for card input

/// Strip everything except ASCII digits from free-form input
///
/// Spaces, dashes and any other noise a user might type around a card
/// number are dropped; the relative order of the digits is kept.
pub fn digits_only(input: &str) -> String {
    input.chars().filter(|c| c.is_ascii_digit()).collect()
}

/// Returns true when `input` is non-empty and made only of ASCII digits
pub fn is_all_digits(input: &str) -> bool {
    !input.is_empty() && input.bytes().all(|b| b.is_ascii_digit())
}

/// Luhn (mod 10) checksum over a digit string
///
/// Every second digit counting from the rightmost one is doubled, and
/// doubled values above 9 have 9 subtracted. The number is valid when the
/// total is a multiple of 10.
///
/// # Returns
/// * `true` - `digits` is non-empty, all digits, and passes the checksum
/// * `false` - otherwise
pub fn luhn_check(digits: &str) -> bool {
    if !is_all_digits(digits) {
        return false;
    }

    luhn_sum(digits, false) % 10 == 0
}

/// Compute the Luhn check digit that makes `payload` + digit valid
///
/// Returns `None` if `payload` contains anything other than ASCII digits.
/// An empty payload yields `Some(0)`.
pub fn luhn_check_digit(payload: &str) -> Option<u8> {
    if !payload.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }

    // The check digit will sit at the rightmost position, so the payload's
    // last digit is the first one to be doubled.
    let sum = luhn_sum(payload, true);
    Some(((10 - sum % 10) % 10) as u8)
}

/// Luhn total of `digits`, reduced mod 10 as it accumulates
fn luhn_sum(digits: &str, double_first: bool) -> u32 {
    digits
        .bytes()
        .rev()
        .enumerate()
        .map(|(i, b)| {
            let digit = u32::from(b - b'0');
            let double = (i % 2 == 1) != double_first;
            if !double {
                return digit;
            }

            let doubled = digit * 2;
            if doubled > 9 {
                doubled - 9
            } else {
                doubled
            }
        })
        .fold(0, |sum, value| (sum + value) % 10)
}

/// Split a digit string into chunks of `size`, joined with a single space
///
/// The last chunk may be shorter and is emitted without a trailing space.
/// A `size` of zero leaves the input unchanged.
pub fn group_digits(digits: &str, size: usize) -> String {
    if size == 0 {
        return digits.to_string();
    }

    let chars: Vec<char> = digits.chars().collect();
    chars
        .chunks(size)
        .map(|chunk| chunk.iter().collect::<String>())
        .collect::<Vec<_>>()
        .join(" ")
}

/// Generic shape limits used when a number or CVC matches no known brand
pub mod limits {
    use std::ops::RangeInclusive;

    /// Accepted digit counts for a card number of unknown brand
    pub const GENERIC_NUMBER_LENGTHS: RangeInclusive<usize> = 12..=19;

    /// Accepted digit counts for a CVC when the brand is unknown
    pub const GENERIC_CVC_LENGTHS: RangeInclusive<usize> = 3..=4;

    /// Digits per group in the default display format
    pub const DEFAULT_GROUP_SIZE: usize = 4;
}
