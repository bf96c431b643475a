//! Format providers
//!
//! Locale rules for turning filter strings into numbers and dates. A single
//! process-wide default is used unless a provider is passed explicitly.

use std::sync::{Arc, LazyLock};

use chrono::{DateTime, NaiveDate, Utc};
use parking_lot::RwLock;

use crate::utils::time::{parse_date_with_formats, parse_datetime_with_formats};

/// Invariant date-time layouts, tried after RFC 3339
pub const INVARIANT_DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M",
    "%m/%d/%Y %H:%M:%S",
    "%m/%d/%Y %H:%M",
];

/// Invariant date layouts; dates without a time resolve to midnight UTC
pub const INVARIANT_DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%m/%d/%Y"];

static DEFAULT_PROVIDER: LazyLock<RwLock<Arc<FormatProvider>>> =
    LazyLock::new(|| RwLock::new(Arc::new(FormatProvider::invariant())));

/// Culture rules for parsing filter values
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormatProvider {
    pub decimal_separator: char,
    pub group_separator: Option<char>,
    pub datetime_formats: Vec<String>,
    pub date_formats: Vec<String>,
}

impl Default for FormatProvider {
    fn default() -> Self {
        Self::invariant()
    }
}

impl FormatProvider {
    /// Locale-invariant rules: `.` decimals, `,` grouping, ISO-style dates
    pub fn invariant() -> Self {
        Self {
            decimal_separator: '.',
            group_separator: Some(','),
            datetime_formats: INVARIANT_DATETIME_FORMATS
                .iter()
                .map(|s| s.to_string())
                .collect(),
            date_formats: INVARIANT_DATE_FORMATS.iter().map(|s| s.to_string()).collect(),
        }
    }

    /// Rewrite a localized number into the form `str::parse` expects
    ///
    /// A group separator must follow a digit of the integer part and be
    /// followed by exactly three digits; anywhere else the input is rejected.
    fn normalize_number(&self, raw: &str) -> Result<String, String> {
        let chars: Vec<char> = raw.trim().chars().collect();
        let mut normalized = String::with_capacity(chars.len());
        let mut in_integer_part = true;

        for (i, &c) in chars.iter().enumerate() {
            if Some(c) == self.group_separator {
                let after_digit = i > 0 && chars[i - 1].is_ascii_digit();
                let full_group = chars
                    .get(i + 1..i + 4)
                    .is_some_and(|group| group.iter().all(char::is_ascii_digit))
                    && !chars.get(i + 4).is_some_and(char::is_ascii_digit);
                if !(in_integer_part && after_digit && full_group) {
                    return Err(format!("misplaced group separator '{}'", c));
                }
                continue;
            }
            if c == self.decimal_separator {
                in_integer_part = false;
                normalized.push('.');
            } else {
                if c == 'e' || c == 'E' {
                    in_integer_part = false;
                }
                normalized.push(c);
            }
        }
        Ok(normalized)
    }

    pub fn parse_integer(&self, raw: &str) -> Result<i64, String> {
        self.normalize_number(raw)?
            .parse::<i64>()
            .map_err(|e| e.to_string())
    }

    pub fn parse_float(&self, raw: &str) -> Result<f64, String> {
        let normalized = self.normalize_number(raw)?;
        // Rust accepts "inf"/"NaN"; grid input never means those
        if normalized.chars().any(|c| c.is_ascii_alphabetic() && c != 'e' && c != 'E') {
            return Err("invalid float literal".to_string());
        }
        normalized.parse::<f64>().map_err(|e| e.to_string())
    }

    pub fn parse_bool(&self, raw: &str) -> Result<bool, String> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "true" => Ok(true),
            "false" => Ok(false),
            other => Err(format!("'{}' is not a boolean", other)),
        }
    }

    /// Lenient date-time parse: trims input and normalizes to UTC
    pub fn parse_datetime(&self, raw: &str) -> Option<DateTime<Utc>> {
        parse_datetime_with_formats(raw, &self.datetime_formats, &self.date_formats)
    }

    /// Lenient date parse: accepts date layouts and date-time layouts
    pub fn parse_date(&self, raw: &str) -> Option<NaiveDate> {
        parse_date_with_formats(raw, &self.date_formats)
            .or_else(|| self.parse_datetime(raw).map(|dt| dt.date_naive()))
    }
}

/// The current process-wide provider
pub fn default_format_provider() -> Arc<FormatProvider> {
    DEFAULT_PROVIDER.read().clone()
}

/// Replace the process-wide provider
///
/// Compilations already in flight keep the provider they started with.
pub fn set_default_format_provider(provider: FormatProvider) {
    tracing::debug!(
        decimal_separator = %provider.decimal_separator,
        group_separator = ?provider.group_separator,
        "Replacing default format provider"
    );
    *DEFAULT_PROVIDER.write() = Arc::new(provider);
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Datelike, Timelike};

    fn german() -> FormatProvider {
        FormatProvider {
            decimal_separator: ',',
            group_separator: Some('.'),
            datetime_formats: vec!["%d.%m.%Y %H:%M:%S".to_string()],
            date_formats: vec!["%d.%m.%Y".to_string()],
        }
    }

    #[test]
    fn invariant_numbers() {
        let p = FormatProvider::invariant();
        assert_eq!(p.parse_integer(" 1,024 "), Ok(1024));
        assert_eq!(p.parse_float("3.25"), Ok(3.25));
        assert_eq!(p.parse_float("-1e3"), Ok(-1000.0));
        assert!(p.parse_integer("1.5").is_err());
        assert!(p.parse_integer("abc").is_err());
        assert!(p.parse_float("NaN").is_err());
        assert!(p.parse_float("inf").is_err());
    }

    #[test]
    fn localized_numbers() {
        let p = german();
        assert_eq!(p.parse_float("1.234,5"), Ok(1234.5));
        assert_eq!(p.parse_integer("1.000"), Ok(1000));
        assert_eq!(p.parse_integer("-12.345.678"), Ok(-12345678));
        assert!(p.parse_float("1,5.0").is_err());
    }

    #[test]
    fn misplaced_group_separators_are_rejected() {
        let p = FormatProvider::invariant();
        assert!(p.parse_float(",5").is_err());
        assert!(p.parse_float("5,").is_err());
        assert!(p.parse_integer("1,,2").is_err());
        assert!(p.parse_integer("1,2,3").is_err());
        assert!(p.parse_integer("1,0245").is_err());
        assert!(p.parse_float("1.5,0").is_err());
        assert!(p.parse_float("1e3,000").is_err());
        assert_eq!(p.parse_integer("1,234,567"), Ok(1234567));
        assert_eq!(p.parse_float("1,234.5"), Ok(1234.5));
    }

    #[test]
    fn no_group_separator_means_none_accepted() {
        let p = FormatProvider {
            group_separator: None,
            ..FormatProvider::invariant()
        };
        assert!(p.parse_integer("1,024").is_err());
        assert_eq!(p.parse_integer("1024"), Ok(1024));
    }

    #[test]
    fn booleans() {
        let p = FormatProvider::invariant();
        assert_eq!(p.parse_bool("TRUE"), Ok(true));
        assert_eq!(p.parse_bool(" false "), Ok(false));
        assert!(p.parse_bool("yes").is_err());
    }

    #[test]
    fn localized_dates() {
        let p = german();
        let dt = p.parse_datetime("15.01.2024 10:30:00").unwrap();
        assert_eq!((dt.day(), dt.month(), dt.hour()), (15, 1, 10));

        let d = p.parse_date("15.01.2024").unwrap();
        assert_eq!((d.year(), d.month(), d.day()), (2024, 1, 15));

        assert!(p.parse_datetime("01/15/2024").is_none());
    }

    #[test]
    fn invariant_date_from_datetime_layout() {
        let p = FormatProvider::invariant();
        let d = p.parse_date("2024-03-01T23:00:00Z").unwrap();
        assert_eq!((d.month(), d.day()), (3, 1));
    }
}
