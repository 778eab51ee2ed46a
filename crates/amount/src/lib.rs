//! Pioneer Amount Conversion
//!
//! Converts token amounts between human-entered decimal strings and
//! fixed-point smallest-unit integers:
//! - Separator-tolerant parsing (`"1,000.5"`, `"1_000 000"`)
//! - Truncating display with configurable precision
//! - Arbitrary-precision values via `num-bigint`
//!
//! The free functions use the platform token's [`DECIMAL_PLACES`]; build an
//! [`AmountConverter`] (directly or from [`ConverterConfig`]) for other tokens.

pub mod config;
pub mod converter;
pub mod errors;
pub mod format;
pub mod token_amount;

pub use config::*;
pub use converter::*;
pub use errors::*;
pub use format::*;
pub use token_amount::*;

use num_bigint::BigInt;
use once_cell::sync::Lazy;

static DEFAULT_CONVERTER: Lazy<AmountConverter> = Lazy::new(AmountConverter::default);

/// Process-wide converter for [`DECIMAL_PLACES`]
pub fn default_converter() -> &'static AmountConverter {
    &DEFAULT_CONVERTER
}

/// Parse a decimal amount string into smallest units.
pub fn to_smallest_unit(input: &str) -> Result<TokenAmount> {
    DEFAULT_CONVERTER.to_smallest_unit(input)
}

/// Parse a decimal amount string into a raw signed big integer.
pub fn to_smallest_unit_bigint_strict(input: &str) -> Result<BigInt> {
    DEFAULT_CONVERTER.to_smallest_unit_bigint_strict(input)
}

/// Render smallest units with at most `precision` fractional digits.
pub fn to_display_string(value: &TokenAmount, precision: u32) -> String {
    DEFAULT_CONVERTER.to_display_string(value, precision)
}

/// Render smallest units with [`DEFAULT_PRECISION`] fractional digits.
pub fn display(value: &TokenAmount) -> String {
    DEFAULT_CONVERTER.display(value)
}

/// Module version for API introspection
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
