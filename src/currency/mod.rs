//! Integer currency formatting and lenient amount parsing.

use serde::{Deserialize, Serialize};

use crate::config::Config;

/// Display preferences for whole-unit amounts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AmountFormat {
    pub symbol: String,
    pub grouping_separator: char,
}

impl Default for AmountFormat {
    fn default() -> Self {
        Self {
            symbol: "Rp".into(),
            grouping_separator: '.',
        }
    }
}

impl AmountFormat {
    pub fn from_config(config: &Config) -> Self {
        Self {
            symbol: config.currency_symbol.clone(),
            grouping_separator: config.grouping_separator,
        }
    }

    /// `1250000` -> `Rp 1.250.000`.
    pub fn format(&self, amount: u64) -> String {
        let grouped = group_digits(amount, self.grouping_separator);
        if self.symbol.is_empty() {
            grouped
        } else {
            format!("{} {}", self.symbol, grouped)
        }
    }

    /// Signed variant used for transient feedback, e.g. `+Rp 50.000`.
    pub fn format_delta(&self, amount: u64) -> String {
        format!("+{}", self.format(amount))
    }
}

pub fn group_digits(amount: u64, separator: char) -> String {
    let digits = amount.to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (idx, ch) in digits.chars().enumerate() {
        if idx > 0 && (digits.len() - idx) % 3 == 0 {
            grouped.push(separator);
        }
        grouped.push(ch);
    }
    grouped
}

/// Keeps ASCII digits only and parses the result.
///
/// Returns `None` when no digits remain or the value does not fit in `u64`.
/// Zero is a valid result here; callers decide whether it is acceptable.
pub fn parse_digits(raw: &str) -> Option<u64> {
    let digits: String = raw.chars().filter(char::is_ascii_digit).collect();
    if digits.is_empty() {
        return None;
    }
    digits.parse().ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn groups_thousands() {
        assert_eq!(group_digits(0, '.'), "0");
        assert_eq!(group_digits(999, '.'), "999");
        assert_eq!(group_digits(1000, '.'), "1.000");
        assert_eq!(group_digits(1_250_000, ','), "1,250,000");
    }

    #[test]
    fn formats_with_symbol() {
        let format = AmountFormat::default();
        assert_eq!(format.format(123_000), "Rp 123.000");
        assert_eq!(format.format_delta(5_000), "+Rp 5.000");
        let bare = AmountFormat {
            symbol: String::new(),
            grouping_separator: ' ',
        };
        assert_eq!(bare.format(1_000_000), "1 000 000");
    }

    #[test]
    fn parse_digits_strips_noise() {
        assert_eq!(parse_digits("12a3.000"), Some(123_000));
        assert_eq!(parse_digits("Rp 1.500"), Some(1500));
        assert_eq!(parse_digits("0"), Some(0));
        assert_eq!(parse_digits(""), None);
        assert_eq!(parse_digits("abc"), None);
        assert_eq!(parse_digits("99999999999999999999999"), None);
    }
}
