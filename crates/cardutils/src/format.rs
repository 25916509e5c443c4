//! Display formatting of card numbers

use card_common::{digits_only, group_digits, limits};
use regex::{Match, Regex};
use tracing::debug;

use crate::table::CardTable;

impl CardTable {
    /// Format a card number into space-separated groups
    ///
    /// Non-digits are dropped and the number is capped at
    /// [`CardTable::max_card_length`] digits. Brands with a display format
    /// (Amex 4-6-5, Diners Club 4-6-4) are grouped by it; everything else
    /// is grouped in fours.
    ///
    /// # Example
    /// ```
    /// use cardutils::CardTable;
    ///
    /// let table = CardTable::default_table();
    /// assert_eq!(table.format_card_number("4111111111111111"), "4111 1111 1111 1111");
    /// assert_eq!(table.format_card_number("378282246310005"), "3782 822463 10005");
    /// ```
    pub fn format_card_number(&self, input: &str) -> String {
        let mut digits = digits_only(input);
        digits.truncate(self.max_card_length());

        let format = self.card_from_digits(&digits).and_then(|card| card.format());
        if let Some(groups) = format.and_then(|format| group_by_format(format, &digits)) {
            return groups;
        }

        group_digits(&digits, limits::DEFAULT_GROUP_SIZE)
    }
}

/// Join successive matches of `format` with single spaces
///
/// When the format has capture groups, the non-empty groups of each match
/// are used; otherwise the whole match is. A group is only taken if it
/// starts where the previous one ended, so nested or skipped groups never
/// repeat or drop digits. Returns `None` if the groups do not run
/// contiguously to the end of `digits`.
fn group_by_format(format: &Regex, digits: &str) -> Option<String> {
    let mut groups: Vec<&str> = Vec::new();
    let mut end = 0;

    for caps in format.captures_iter(digits) {
        let candidates: Vec<Match<'_>> = if caps.len() > 1 {
            caps.iter().skip(1).flatten().collect()
        } else {
            caps.get(0).into_iter().collect()
        };

        for group in candidates {
            if group.is_empty() || group.start() != end {
                continue;
            }
            groups.push(group.as_str());
            end = group.end();
        }
    }

    if end != digits.len() {
        debug!(
            "Format '{}' covers {} of {} digits, using default grouping",
            format.as_str(),
            end,
            digits.len()
        );
        return None;
    }

    Some(groups.join(" "))
}
