//! Card number and CVC validation

use card_brands::BrandDefinition;
use card_common::{digits_only, is_all_digits, limits, luhn_check};
use tracing::debug;

use crate::error::NumberError;
use crate::table::CardTable;

impl CardTable {
    /// Check a card number's shape and checksum, explaining any rejection
    ///
    /// # Returns
    /// * `Ok(Some(brand))` - valid number of a known brand
    /// * `Ok(None)` - valid number matching no brand (12-19 digits, Luhn-valid)
    /// * `Err(NumberError)` - why the number was rejected
    pub fn check_card_number(&self, input: &str) -> Result<Option<&BrandDefinition>, NumberError> {
        let digits = digits_only(input);
        if !is_all_digits(&digits) {
            return Err(NumberError::NoDigits);
        }

        let length = digits.len();
        let card = self.card_from_digits(&digits);

        let (length_ok, luhn_required) = match card {
            Some(card) => (card.accepts_length(length), card.luhn()),
            None => (limits::GENERIC_NUMBER_LENGTHS.contains(&length), true),
        };

        if !length_ok {
            debug!("Rejected card number: {} digits", length);
            return Err(NumberError::InvalidLength {
                card_type: card.map(|card| card.card_type().to_string()),
                length,
            });
        }

        if luhn_required && !luhn_check(&digits) {
            debug!("Rejected card number: Luhn check failed");
            return Err(NumberError::InvalidChecksum);
        }

        Ok(card)
    }

    /// Whether `input` looks like a valid card number
    pub fn validate_card_number(&self, input: &str) -> bool {
        self.check_card_number(input).is_ok()
    }

    /// Whether `cvc` has a plausible length for the given brand
    ///
    /// Non-digits are stripped first. An unknown or absent `card_type`
    /// accepts 3 or 4 digits.
    pub fn validate_card_cvc(&self, cvc: &str, card_type: Option<&str>) -> bool {
        let digits = digits_only(cvc);
        if digits.is_empty() {
            return false;
        }

        match card_type.and_then(|card_type| self.card_from_type(card_type)) {
            Some(card) => card.accepts_cvc_length(digits.len()),
            None => limits::GENERIC_CVC_LENGTHS.contains(&digits.len()),
        }
    }
}
