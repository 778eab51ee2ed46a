//! Token Amount Conversion
//!
//! Amounts are held as fixed-point integers counted in the smallest indivisible
//! unit of the token. One whole token equals `10^D` smallest units, where `D`
//! is the converter's number of decimal places.
//!
//! ## Conversion Table (D = 10)
//!
//! | Input / Value          | Direction              | Result              |
//! |------------------------|------------------------|---------------------|
//! | `"1"`                  | text -> smallest unit  | `10000000000`       |
//! | `"1,000.5"`            | text -> smallest unit  | `10005000000000`    |
//! | `"0.123456789012"`     | text -> smallest unit  | `1234567890`        |
//! | `1234500000`, prec. 4  | smallest unit -> text  | `"0.1234"`          |
//! | `-15000000000`, prec. 4| smallest unit -> text  | `"-1.5"`            |
//! | `-5000000000`, prec. 4 | smallest unit -> text  | `"0.5"`             |
//!
//! ## Conversion Rules
//!
//! 1. **Truncation, never rounding**: fractional digits beyond `D` on input and
//!    beyond the requested precision on output are dropped.
//!
//! 2. **Separators**: commas, underscores and whitespace are stripped from input
//!    before parsing, so grouped display strings parse back.
//!
//! 3. **Sign**: the integer quotient carries the sign of a displayed value and the
//!    fractional digits are always rendered unsigned. Values strictly between
//!    minus one token and zero therefore display without a minus sign.

use crate::errors::{AmountError, ConfigError, Result};
use crate::format::group_thousands;
use crate::token_amount::TokenAmount;
use num_bigint::{BigInt, BigUint, Sign};
use num_traits::Signed;
use tracing::{debug, trace, warn};

/// Number of decimal places of the platform token (1 token = 10^10 smallest units)
pub const DECIMAL_PLACES: u32 = 10;

/// Fractional digits shown when no precision is requested
pub const DEFAULT_PRECISION: u32 = 4;

/// Upper bound accepted for configured decimal places
pub const MAX_DECIMAL_PLACES: u32 = 36;

/// Converts between decimal amount strings and smallest-unit integers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AmountConverter {
    decimals: u32,
    /// `10^decimals`, the number of smallest units in one whole token
    unit: BigInt,
}

impl AmountConverter {
    /// Create a converter for a token with `decimals` decimal places.
    ///
    /// Fails when `decimals` exceeds [`MAX_DECIMAL_PLACES`].
    pub fn new(decimals: u32) -> std::result::Result<Self, ConfigError> {
        if decimals > MAX_DECIMAL_PLACES {
            return Err(ConfigError::DecimalPlacesOutOfRange {
                decimals,
                max: MAX_DECIMAL_PLACES,
            });
        }
        Ok(Self::with_decimals(decimals))
    }

    fn with_decimals(decimals: u32) -> Self {
        Self {
            decimals,
            unit: num_traits::pow(BigInt::from(10u8), decimals as usize),
        }
    }

    /// Number of decimal places `D`
    pub fn decimals(&self) -> u32 {
        self.decimals
    }

    /// Smallest units in one whole token (`10^D`)
    pub fn one_token(&self) -> TokenAmount {
        TokenAmount::from(self.unit.clone())
    }

    /// Parse a human-entered decimal string into smallest units.
    ///
    /// Empty input (after separators are removed) is zero. Fractional digits
    /// beyond `D` are truncated. A single leading `-` or `+` is accepted on the
    /// integer part; any other non-digit character is rejected.
    pub fn to_smallest_unit(&self, input: &str) -> Result<TokenAmount> {
        let sanitized: String = input.chars().filter(|c| !is_separator(*c)).collect();
        let sanitized = if sanitized.is_empty() {
            "0"
        } else {
            sanitized.as_str()
        };

        let (integer, fraction) = sanitized.split_once('.').unwrap_or((sanitized, ""));

        let (negative, integer) = match integer.as_bytes().first() {
            Some(b'-') => (true, &integer[1..]),
            Some(b'+') => (false, &integer[1..]),
            _ => (false, integer),
        };

        if !integer.bytes().all(|b| b.is_ascii_digit()) {
            return Err(AmountError::invalid(input, "integer part must be digits"));
        }
        if !fraction.bytes().all(|b| b.is_ascii_digit()) {
            return Err(AmountError::invalid(input, "fractional part must be digits"));
        }

        let decimals = self.decimals as usize;
        let fraction = if fraction.len() > decimals {
            warn!(
                "Truncating {} fractional digits to {} decimal places",
                fraction.len(),
                decimals
            );
            &fraction[..decimals]
        } else {
            fraction
        };

        let mut digits = String::with_capacity(integer.len() + decimals);
        digits.push_str(integer);
        digits.push_str(fraction);
        digits.extend(std::iter::repeat('0').take(decimals - fraction.len()));

        let magnitude = if digits.is_empty() {
            BigUint::default()
        } else {
            BigUint::parse_bytes(digits.as_bytes(), 10)
                .ok_or_else(|| AmountError::invalid(input, "not a base-10 integer"))?
        };

        let sign = if negative { Sign::Minus } else { Sign::Plus };
        let value = BigInt::from_biguint(sign, magnitude);
        debug!(input, decimals = self.decimals, %value, "parsed amount");
        Ok(TokenAmount::from(value))
    }

    /// Same as [`to_smallest_unit`](Self::to_smallest_unit), handing back the raw
    /// signed big integer.
    pub fn to_smallest_unit_bigint_strict(&self, input: &str) -> Result<BigInt> {
        self.to_smallest_unit(input).map(TokenAmount::into_inner)
    }

    /// Render smallest units as a decimal string with at most `precision`
    /// fractional digits.
    ///
    /// Digits past `precision` are truncated and trailing zeros are stripped;
    /// the decimal point is omitted when no fractional digits remain. Precision
    /// above `D` is clamped to `D`.
    pub fn to_display_string(&self, value: &TokenAmount, precision: u32) -> String {
        let precision = self.clamp_precision(precision) as usize;
        let value = value.base_units();

        // BigInt division truncates toward zero; the remainder keeps the
        // dividend's sign and is rendered as its absolute value.
        let quotient = value / &self.unit;
        let remainder = (value % &self.unit).abs();

        let padded = format!(
            "{:0>width$}",
            remainder.to_string(),
            width = self.decimals as usize
        );
        let fraction = padded[..precision].trim_end_matches('0');

        trace!(%value, precision, "formatted amount");
        if fraction.is_empty() {
            quotient.to_string()
        } else {
            format!("{quotient}.{fraction}")
        }
    }

    /// Display string with [`DEFAULT_PRECISION`] fractional digits.
    pub fn display(&self, value: &TokenAmount) -> String {
        self.to_display_string(value, DEFAULT_PRECISION)
    }

    /// Display string with `,` thousands separators on the integer part.
    pub fn format_token_value(&self, value: &TokenAmount, precision: u32) -> String {
        group_thousands(&self.to_display_string(value, precision))
    }

    /// Grouped display string followed by a unit symbol, e.g. `"1,000.5 JOY"`.
    pub fn format_with_symbol(&self, value: &TokenAmount, precision: u32, symbol: &str) -> String {
        format!("{} {symbol}", self.format_token_value(value, precision))
    }

    fn clamp_precision(&self, precision: u32) -> u32 {
        if precision > self.decimals {
            warn!(
                "Precision {} exceeds {} decimal places, clamping",
                precision, self.decimals
            );
            self.decimals
        } else {
            precision
        }
    }
}

impl Default for AmountConverter {
    fn default() -> Self {
        Self::with_decimals(DECIMAL_PLACES)
    }
}

fn is_separator(c: char) -> bool {
    c == ',' || c == '_' || c.is_whitespace()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tokens(units: &str) -> TokenAmount {
        units.parse().unwrap()
    }

    #[test]
    fn test_zero_and_one() {
        let conv = AmountConverter::default();
        assert!(conv.to_smallest_unit("0").unwrap().is_zero());
        assert_eq!(conv.to_smallest_unit("1").unwrap(), tokens("10000000000"));
        assert_eq!(conv.one_token(), tokens("10000000000"));
    }

    #[test]
    fn test_empty_input_is_zero() {
        let conv = AmountConverter::default();
        assert!(conv.to_smallest_unit("").unwrap().is_zero());
        assert!(conv.to_smallest_unit("  ,_ ").unwrap().is_zero());
        assert!(conv.to_smallest_unit(".").unwrap().is_zero());
    }

    #[test]
    fn test_separators_are_stripped() {
        let conv = AmountConverter::default();
        assert_eq!(
            conv.to_smallest_unit("1,000.5").unwrap(),
            tokens("10005000000000")
        );
        assert_eq!(
            conv.to_smallest_unit("1_000 000\t.25").unwrap(),
            tokens("10000002500000000")
        );
    }

    #[test]
    fn test_missing_integer_part() {
        let conv = AmountConverter::default();
        assert_eq!(conv.to_smallest_unit(".5").unwrap(), tokens("5000000000"));
        assert_eq!(conv.to_smallest_unit("-.5").unwrap(), tokens("-5000000000"));
    }

    #[test]
    fn test_excess_fraction_truncated_at_decimals() {
        let conv = AmountConverter::default();
        assert_eq!(
            conv.to_smallest_unit("0.12345678909").unwrap(),
            tokens("1234567890")
        );
        assert_eq!(
            conv.to_smallest_unit("0.99999999999999").unwrap(),
            tokens("9999999999")
        );
    }

    #[test]
    fn test_signs() {
        let conv = AmountConverter::default();
        assert_eq!(conv.to_smallest_unit("-1.5").unwrap(), tokens("-15000000000"));
        assert_eq!(conv.to_smallest_unit("+2").unwrap(), tokens("20000000000"));
        assert!(conv.to_smallest_unit("-0").unwrap().is_zero());
    }

    #[test]
    fn test_invalid_input() {
        let conv = AmountConverter::default();
        for input in ["abc", "1.2.3", "1e5", "--1", "1-", "0x10", "1.-5", "½"] {
            let err = conv.to_smallest_unit(input).unwrap_err();
            assert!(
                matches!(err, AmountError::InvalidNumericFormat { .. }),
                "{input} should be rejected"
            );
        }
    }

    #[test]
    fn test_strict_matches_typed() {
        let conv = AmountConverter::default();
        let strict = conv.to_smallest_unit_bigint_strict("12.5").unwrap();
        assert_eq!(strict, BigInt::from(125_000_000_000u64));
        assert!(conv.to_smallest_unit_bigint_strict("abc").is_err());
    }

    #[test]
    fn test_display_whole_token() {
        let conv = AmountConverter::default();
        assert_eq!(conv.to_display_string(&tokens("10000000000"), 4), "1");
        assert_eq!(conv.to_display_string(&TokenAmount::zero(), 4), "0");
    }

    #[test]
    fn test_display_truncates_to_precision() {
        let conv = AmountConverter::default();
        assert_eq!(conv.to_display_string(&tokens("1234500000"), 4), "0.1234");
        assert_eq!(conv.to_display_string(&tokens("1999999999"), 2), "0.19");
        assert_eq!(conv.to_display_string(&tokens("1999999999"), 0), "0");
    }

    #[test]
    fn test_display_strips_trailing_zeros() {
        let conv = AmountConverter::default();
        assert_eq!(conv.to_display_string(&tokens("15000000000"), 4), "1.5");
        assert_eq!(conv.to_display_string(&tokens("10000000001"), 4), "1");
        assert_eq!(conv.to_display_string(&tokens("10000000001"), 10), "1.0000000001");
    }

    #[test]
    fn test_precision_clamped_to_decimals() {
        let conv = AmountConverter::default();
        assert_eq!(
            conv.to_display_string(&tokens("10000000001"), 50),
            conv.to_display_string(&tokens("10000000001"), 10)
        );
    }

    #[test]
    fn test_negative_display_sign_policy() {
        let conv = AmountConverter::default();
        // -1.5 tokens: quotient -1 carries the sign
        assert_eq!(conv.to_display_string(&tokens("-15000000000"), 4), "-1.5");
        // -0.5 tokens: quotient is zero, fraction is unsigned
        assert_eq!(conv.to_display_string(&tokens("-5000000000"), 4), "0.5");
        assert_eq!(conv.to_display_string(&tokens("-20000000000"), 4), "-2");
    }

    #[test]
    fn test_zero_decimal_token() {
        let conv = AmountConverter::new(0).unwrap();
        assert_eq!(conv.to_smallest_unit("42").unwrap(), tokens("42"));
        assert_eq!(conv.to_smallest_unit("42.9").unwrap(), tokens("42"));
        assert_eq!(conv.to_display_string(&tokens("42"), 4), "42");
        assert!(conv.to_smallest_unit("-").unwrap().is_zero());
    }

    #[test]
    fn test_decimal_places_cap() {
        assert_eq!(AmountConverter::new(36).unwrap().decimals(), 36);
        let err = AmountConverter::new(37).unwrap_err();
        assert!(matches!(
            err,
            ConfigError::DecimalPlacesOutOfRange {
                decimals: 37,
                max: MAX_DECIMAL_PLACES
            }
        ));
        assert!(AmountConverter::new(u32::MAX).is_err());
    }

    #[test]
    fn test_display_uses_default_precision() {
        let conv = AmountConverter::default();
        assert_eq!(conv.display(&tokens("1234567890")), "0.1234");
        assert_eq!(
            conv.display(&tokens("-15000000000")),
            conv.to_display_string(&tokens("-15000000000"), DEFAULT_PRECISION)
        );
    }

    #[test]
    fn test_beyond_native_range() {
        let conv = AmountConverter::default();
        let huge = "340282366920938463463374607431768211456"; // 2^128
        let value = conv.to_smallest_unit(huge).unwrap();
        assert_eq!(value.to_string(), format!("{huge}0000000000"));
        assert_eq!(conv.to_display_string(&value, 4), huge);
    }

    #[test]
    fn test_grouped_formatting() {
        let conv = AmountConverter::default();
        let value = conv.to_smallest_unit("1234567.891").unwrap();
        assert_eq!(conv.format_token_value(&value, 2), "1,234,567.89");
        assert_eq!(conv.format_with_symbol(&value, 0, "JOY"), "1,234,567 JOY");
    }
}
