//! Rejection reasons for card numbers and expiry dates

/// Why a card number failed validation
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum NumberError {
    /// Nothing left after stripping separators and noise
    #[error("card number contains no digits")]
    NoDigits,

    /// Digit count not accepted by the detected brand (or by the generic rule)
    #[error("{length} digits is not a valid length for {}", .card_type.as_deref().unwrap_or("an unknown brand"))]
    InvalidLength {
        card_type: Option<String>,
        length: usize,
    },

    #[error("invalid checksum (Luhn check failed)")]
    InvalidChecksum,
}

/// Why an expiry month/year pair was rejected
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum ExpiryError {
    #[error("month {0} is outside 1-12")]
    InvalidMonth(u32),

    #[error("year must be a positive number")]
    InvalidYear,

    /// The stated month ended before the reference date
    #[error("card expired in {month:02}/{year}")]
    Expired { month: u32, year: u32 },
}
