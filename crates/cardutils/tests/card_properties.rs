//! End-to-end checks of the public card API
//!
//! Set RUST_LOG=debug to see classification and rejection logs:
//!
//!     RUST_LOG=debug cargo test --package cardutils --test card_properties -- --nocapture

use cardutils::{
    card_from_number, cards, format_card_number, luhn_check, parse_card_expiry,
    parse_card_expiry_at, parse_card_type, validate_card_cvc, validate_card_expiry,
    validate_card_expiry_at, validate_card_number, CardTable, ParsedExpiry,
};
use chrono::{Datelike, Local};
use pretty_assertions::assert_eq;
use proptest::prelude::*;
use tracing_subscriber::EnvFilter;

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_target(false)
        .with_test_writer()
        .try_init();
}

/// Known-good test numbers for each default brand
const SAMPLE_NUMBERS: &[(&str, &str)] = &[
    ("visaelectron", "4917300800000000"),
    ("maestro", "6759649826438453"),
    ("forbrugsforeningen", "6007220000000004"),
    ("dankort", "5019717010103742"),
    ("visa", "4111111111111111"),
    ("mastercard", "5555555555554444"),
    ("amex", "378282246310005"),
    ("dinersclub", "30569309025904"),
    ("discover", "6011111111111117"),
    ("unionpay", "6271136264806203568"),
    ("jcb", "3530111333300000"),
];

#[test]
fn test_end_to_end_visa() {
    init_tracing();

    let input = "4012 8888 8888 1881";
    assert_eq!(format_card_number(input), "4012 8888 8888 1881");
    assert_eq!(parse_card_type(input), Some("visa"));
    assert!(validate_card_number(input));
}

#[test]
fn test_sample_numbers_cover_table() {
    init_tracing();

    let mut covered: Vec<&str> = SAMPLE_NUMBERS.iter().map(|(t, _)| *t).collect();
    let mut table: Vec<&str> = cards().iter().map(|c| c.card_type()).collect();
    covered.sort_unstable();
    table.sort_unstable();
    assert_eq!(covered, table);
}

#[test]
fn test_sample_numbers_classify_and_validate() {
    init_tracing();

    for (card_type, number) in SAMPLE_NUMBERS {
        assert_eq!(parse_card_type(number), Some(*card_type), "{}", number);
        assert!(validate_card_number(number), "{} should validate", number);

        let formatted = format_card_number(number);
        assert_eq!(formatted.replace(' ', ""), *number);
    }
}

#[test]
fn test_parse_card_type_examples() {
    assert_eq!(parse_card_type("4111111111111111"), Some("visa"));
    assert_eq!(parse_card_type("379999999999999"), Some("amex"));
    assert_eq!(parse_card_type("0000000000000000"), None);
}

#[test]
fn test_card_from_number_exposes_metadata() {
    let amex = card_from_number("3782 822463 10005").unwrap();
    assert_eq!(amex.card_type(), "amex");
    assert_eq!(amex.lengths(), &[15]);
    assert_eq!(amex.cvc_lengths(), &[3, 4]);
    assert!(amex.luhn());
    assert!(amex.format().is_some());
    assert_eq!(amex.pattern().as_str(), "^3[47]");
}

#[test]
fn test_cvc_examples() {
    assert!(validate_card_cvc("1234", Some("amex")));
    assert!(!validate_card_cvc("1234", Some("visa")));
    assert!(validate_card_cvc("123", None));
}

#[test]
fn test_expiry_examples() {
    let today = Local::now().date_naive();
    let year = today.year() as u32;
    let month = today.month();

    assert_eq!(parse_card_expiry("09/2040"), ParsedExpiry { month: 9, year: 2040 });
    assert_eq!(parse_card_expiry_at("09/40", today), ParsedExpiry { month: 9, year: 2040 });
    assert!(validate_card_expiry_at(month, year, today));

    let (prev_month, prev_year) = if month == 1 { (12, year - 1) } else { (month - 1, year) };
    assert!(!validate_card_expiry_at(prev_month, prev_year, today));

    assert!(!validate_card_expiry_at(0, year + 1, today));
    assert!(!validate_card_expiry_at(13, year + 1, today));

    assert!(validate_card_expiry(month, year + 1));
}

#[test]
fn test_custom_table_end_to_end() {
    init_tracing();

    let table = CardTable::from_json(
        r#"[
            {"type": "troy", "pattern": "^9792", "length": [16], "cvcLength": [3]},
            {"type": "uatp", "pattern": "^1", "format": "(\\d{1,4})(\\d{1,5})?(\\d{1,6})?", "length": [15], "cvcLength": [3], "luhn": false}
        ]"#,
    )
    .unwrap();

    assert_eq!(table.parse_card_type("9792 0300 0000 0000"), Some("troy"));
    assert_eq!(table.format_card_number("100000000000000"), "1000 00000 000000");
    assert!(table.validate_card_number("100000000000001"));
    assert!(table.validate_card_cvc("123", Some("troy")));
    assert!(!table.validate_card_cvc("1234", Some("uatp")));

    // Brands outside a custom table are unknown to it
    assert_eq!(table.parse_card_type("4111111111111111"), None);
    assert!(table.validate_card_number("4111111111111111"));
}

proptest! {
    /// Formatted output is only digits and single spaces, and keeps every digit.
    #[test]
    fn format_preserves_digits(input in "[0-9 a-z/-]{0,40}") {
        let formatted = format_card_number(&input);
        let digits: String = input.chars().filter(|c| c.is_ascii_digit()).take(19).collect();

        prop_assert!(formatted.chars().all(|c| c.is_ascii_digit() || c == ' '));
        prop_assert!(!formatted.contains("  "));
        prop_assert!(!formatted.starts_with(' ') && !formatted.ends_with(' '));
        prop_assert_eq!(formatted.replace(' ', ""), digits);
    }

    /// Formatting an already formatted number changes nothing.
    #[test]
    fn format_is_idempotent(digits in "[0-9]{0,19}") {
        let once = format_card_number(&digits);
        prop_assert_eq!(format_card_number(&once), once.clone());
    }

    /// Changing the last digit of a Luhn-valid number invalidates it.
    #[test]
    fn altered_last_digit_breaks_luhn(index in 0usize..11, delta in 1u8..10) {
        let (_, number) = SAMPLE_NUMBERS[index];
        prop_assume!(luhn_check(number));

        let mut altered = number.to_string();
        let last = altered.pop().unwrap().to_digit(10).unwrap() as u8;
        altered.push(char::from(b'0' + (last + delta) % 10));
        prop_assert!(!luhn_check(&altered));
    }

    /// Every public function is total over arbitrary text.
    #[test]
    fn functions_never_panic(input in ".{0,64}", month in 0u32..20, year in 0u32..3000) {
        let _ = format_card_number(&input);
        let _ = parse_card_type(&input);
        let _ = parse_card_expiry(&input);
        let _ = validate_card_number(&input);
        let _ = validate_card_cvc(&input, Some(input.as_str()));
        let _ = validate_card_expiry(month, year);
    }
}
