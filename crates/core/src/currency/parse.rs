//! Free-text amount parsing: `"$1,234.56"`, `"100 EUR"`, `"¥500"`.

use std::str::FromStr;

use tally_shared::types::{Currency, MoneyError, MonetaryValue};

/// Extracts an amount and currency from free-form text.
///
/// The currency is taken from the first recognized ISO code token or
/// currency symbol; `default_currency` applies when neither is present.
/// The amount is the first numeral run in the text, with thousands commas
/// stripped.
pub fn parse_amount(text: &str, default_currency: Currency) -> Result<MonetaryValue, MoneyError> {
    let currency = detect_currency(text).unwrap_or(default_currency);
    let numeral = extract_numeral(text).ok_or_else(|| MoneyError::InvalidNumeral(text.into()))?;
    MonetaryValue::from_numeral(&numeral, currency)
}

fn detect_currency(text: &str) -> Option<Currency> {
    for token in text.split_whitespace() {
        let token = token.trim_matches(|c: char| !c.is_ascii_alphabetic());
        if let Ok(currency) = Currency::from_str(token) {
            return Some(currency);
        }
    }
    text.chars().find_map(|c| match c {
        '$' => Some(Currency::Usd),
        '€' => Some(Currency::Eur),
        '£' => Some(Currency::Gbp),
        '¥' => Some(Currency::Jpy),
        _ => None,
    })
}

fn extract_numeral(text: &str) -> Option<String> {
    let start = text.find(|c: char| c.is_ascii_digit() || c == '-')?;
    let run: String = text[start..]
        .chars()
        .take_while(|c| c.is_ascii_digit() || matches!(c, '.' | ',' | '-'))
        .filter(|c| *c != ',')
        .collect();
    if run.chars().any(|c| c.is_ascii_digit()) {
        Some(run)
    } else {
        None
    }
}
