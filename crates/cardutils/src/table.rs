//! Ordered brand table and first-match classification

use card_brands::{BrandDefinition, BrandError};
use card_common::{digits_only, limits};
use once_cell::sync::Lazy;
use tracing::{debug, trace};

static DEFAULT_TABLE: Lazy<CardTable> = Lazy::new(|| CardTable {
    cards: card_brands::default_definitions(),
});

/// An immutable, ordered sequence of brand definitions
///
/// Classification walks the table from the top and stops at the first
/// brand whose pattern matches, so the order of `cards` is significant.
/// All validation and formatting operations are available on any table;
/// the crate-level functions use [`CardTable::default_table`].
#[derive(Debug, Clone)]
pub struct CardTable {
    cards: Vec<BrandDefinition>,
}

impl CardTable {
    /// Build a custom table, keeping the given order
    pub fn new(cards: Vec<BrandDefinition>) -> Result<Self, BrandError> {
        card_brands::ensure_unique_types(&cards)?;
        Ok(Self { cards })
    }

    /// Build a custom table from a JSON array of brand specs
    pub fn from_json(json: &str) -> Result<Self, BrandError> {
        let cards = card_brands::definitions_from_json(json)?;
        debug!("Built card table with {} brand(s)", cards.len());
        Ok(Self { cards })
    }

    /// The built-in table, built on first use and shared process-wide
    pub fn default_table() -> &'static CardTable {
        &DEFAULT_TABLE
    }

    pub fn cards(&self) -> &[BrandDefinition] {
        &self.cards
    }

    /// Upper bound on the number of digits any number can usefully carry
    pub fn max_card_length(&self) -> usize {
        self.cards
            .iter()
            .map(BrandDefinition::max_length)
            .max()
            .unwrap_or(0)
            .max(*limits::GENERIC_NUMBER_LENGTHS.end())
    }

    /// First brand whose pattern matches the digits of `input`
    pub fn card_from_number(&self, input: &str) -> Option<&BrandDefinition> {
        self.card_from_digits(&digits_only(input))
    }

    pub(crate) fn card_from_digits(&self, digits: &str) -> Option<&BrandDefinition> {
        if digits.is_empty() {
            return None;
        }

        let card = self.cards.iter().find(|card| card.matches(digits));
        match card {
            Some(card) => trace!("Classified number as {}", card.card_type()),
            None => debug!("No brand matches a {}-digit number", digits.len()),
        }
        card
    }

    /// Look up a brand by its exact type identifier
    pub fn card_from_type(&self, card_type: &str) -> Option<&BrandDefinition> {
        card_brands::find_brand(&self.cards, card_type)
    }

    /// Brand identifier of `input`, or `None` when no brand matches
    pub fn parse_card_type(&self, input: &str) -> Option<&str> {
        self.card_from_number(input).map(BrandDefinition::card_type)
    }
}

impl Default for CardTable {
    fn default() -> Self {
        DEFAULT_TABLE.clone()
    }
}
