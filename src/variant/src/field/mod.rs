use std::fmt::{self, Display, Formatter};

use crate::reading::{Reading, NOT_SEQUENCED};

/// A typed value of a variant summary table.
///
/// Values are typed once, when a row is read, and keep that type until they are written back:
/// - `Float`: any non-integer numeric string, rounded to two decimals.
/// - `Int`  : a string made only of decimal digits.
/// - `Text` : everything else, including the `na` sentinel.
#[derive(Debug, Clone, PartialEq)]
pub enum Field {
    Float(f64),
    Int(u64),
    Text(String),
}

impl Field {
    /// Type a raw table value.
    ///
    /// # Behavior
    /// - Digit-only strings are parsed as integers (`"007"` becomes `7`). Digit strings too large
    ///   to fit within a `u64` are kept verbatim.
    /// - Any other string that parses as a float is rounded to two decimals: `"0.333"` -> `0.33`.
    ///   The stored value is the rounded one, so that threshold comparisons and the written output
    ///   always agree.
    #[must_use]
    pub fn typed(raw: &str) -> Self {
        if !raw.is_empty() && raw.bytes().all(|b| b.is_ascii_digit()) {
            return raw.parse::<u64>().map_or_else(|_| Self::Text(raw.to_string()), Self::Int)
        }

        match raw.trim().parse::<f64>() {
            Ok(value) => Self::Float(round_2(value)),
            Err(_)    => Self::Text(raw.to_string()),
        }
    }

    /// Interpret this field as a sequencing measurement.
    /// Returns `None` if the field is neither numeric, nor the `na` sentinel.
    #[must_use]
    pub fn reading(&self) -> Option<Reading> {
        match self {
            Self::Float(value)                        => Some(Reading::Measured(*value)),
            Self::Int(value)                          => Some(Reading::Measured(*value as f64)),
            Self::Text(text) if text == NOT_SEQUENCED => Some(Reading::NotSequenced),
            Self::Text(_)                             => None,
        }
    }

    /// Return the raw text of this field, if it was left untyped.
    #[must_use]
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(text) => Some(text),
            _                => None,
        }
    }
}

/// Round a value to two decimals, using the exact same rounding as the output formatting.
fn round_2(value: f64) -> f64 {
    format!("{value:.2}").parse().unwrap_or(value)
}

impl Display for Field {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Self::Float(value) if value.is_nan() => f.write_str("nan"),
            Self::Float(value) => write!(f, "{value:.2}"),
            Self::Int(value)   => write!(f, "{value}"),
            Self::Text(text)   => f.write_str(text),
        }
    }
}

impl From<&str> for Field {
    fn from(raw: &str) -> Self {
        Self::typed(raw)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use float_cmp::approx_eq;

    #[test]
    fn digits_are_integers() {
        assert_eq!(Field::typed("50"), Field::Int(50));
        assert_eq!(Field::typed("007"), Field::Int(7));
        assert_eq!(Field::typed("007").to_string(), "7");
    }

    #[test]
    fn floats_are_rounded() {
        assert_eq!(Field::typed("0.3").to_string(), "0.30");
        assert_eq!(Field::typed("0.333").to_string(), "0.33");
        let Field::Float(value) = Field::typed("0.337") else { panic!("expected a float") };
        assert!(approx_eq!(f64, value, 0.34, ulps = 2));
    }

    #[test]
    fn signed_and_scientific_values_are_floats() {
        assert_eq!(Field::typed("-5").to_string(), "-5.00");
        assert_eq!(Field::typed("1e3").to_string(), "1000.00");
        assert_eq!(Field::typed(" 2.5").to_string(), "2.50");
    }

    #[test]
    fn text_is_left_untouched() {
        for raw in ["na", "TP53", "chrX", "", "in_strelka", "A>T"] {
            assert_eq!(Field::typed(raw), Field::Text(raw.to_string()));
            assert_eq!(Field::typed(raw).to_string(), raw);
        }
    }

    #[test]
    fn overflowing_digits_are_kept_verbatim() {
        let raw = "123456789012345678901234567890";
        assert_eq!(Field::typed(raw), Field::Text(raw.to_string()));
    }

    #[test]
    fn readings() {
        assert_eq!(Field::typed("na").reading(), Some(Reading::NotSequenced));
        assert_eq!(Field::typed("12").reading(), Some(Reading::Measured(12.0)));
        assert_eq!(Field::typed("NA").reading(), None);
        assert_eq!(Field::typed("TP53").reading(), None);
    }
}
