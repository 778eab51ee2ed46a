//! Smallest-unit token amounts backed by an arbitrary-precision integer.

use crate::errors::AmountError;
use num_bigint::BigInt;
use num_traits::{Signed, ToPrimitive, Zero};
use serde::de::{self, Visitor};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::iter::Sum;
use std::ops::{Add, AddAssign, Neg, Sub, SubAssign};
use std::str::FromStr;

/// An amount counted in the smallest indivisible unit of the token.
///
/// Serialized as a decimal string so values above 2^53 survive JSON consumers.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct TokenAmount(BigInt);

impl TokenAmount {
    /// Zero amount
    pub fn zero() -> Self {
        Self(BigInt::zero())
    }

    /// Create an amount from raw smallest units
    pub fn from_base_units(units: BigInt) -> Self {
        Self(units)
    }

    /// Raw smallest units
    pub fn base_units(&self) -> &BigInt {
        &self.0
    }

    /// Consume into raw smallest units
    pub fn into_inner(self) -> BigInt {
        self.0
    }

    /// Check if amount is zero
    pub fn is_zero(&self) -> bool {
        self.0.is_zero()
    }

    /// Check if amount is below zero
    pub fn is_negative(&self) -> bool {
        self.0.is_negative()
    }

    /// Narrow to `u128`, `None` when negative or too large
    pub fn to_u128(&self) -> Option<u128> {
        self.0.to_u128()
    }

    /// Narrow to `i128`, `None` when out of range
    pub fn to_i128(&self) -> Option<i128> {
        self.0.to_i128()
    }
}

impl From<BigInt> for TokenAmount {
    fn from(units: BigInt) -> Self {
        Self(units)
    }
}

impl From<TokenAmount> for BigInt {
    fn from(amount: TokenAmount) -> Self {
        amount.0
    }
}

impl From<u64> for TokenAmount {
    fn from(units: u64) -> Self {
        Self(BigInt::from(units))
    }
}

impl From<u128> for TokenAmount {
    fn from(units: u128) -> Self {
        Self(BigInt::from(units))
    }
}

impl From<i64> for TokenAmount {
    fn from(units: i64) -> Self {
        Self(BigInt::from(units))
    }
}

impl From<i128> for TokenAmount {
    fn from(units: i128) -> Self {
        Self(BigInt::from(units))
    }
}

impl FromStr for TokenAmount {
    type Err = AmountError;

    /// Parse a plain base-10 integer of smallest units (optional leading `-`).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let digits = s.strip_prefix('-').unwrap_or(s);
        if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
            return Err(AmountError::invalid(s, "not a base-10 integer"));
        }
        BigInt::parse_bytes(s.as_bytes(), 10)
            .map(Self)
            .ok_or_else(|| AmountError::invalid(s, "not a base-10 integer"))
    }
}

impl fmt::Display for TokenAmount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl Add for TokenAmount {
    type Output = Self;

    fn add(self, other: Self) -> Self {
        Self(self.0 + other.0)
    }
}

impl AddAssign for TokenAmount {
    fn add_assign(&mut self, other: Self) {
        self.0 += other.0;
    }
}

impl Sub for TokenAmount {
    type Output = Self;

    fn sub(self, other: Self) -> Self {
        Self(self.0 - other.0)
    }
}

impl SubAssign for TokenAmount {
    fn sub_assign(&mut self, other: Self) {
        self.0 -= other.0;
    }
}

impl Neg for TokenAmount {
    type Output = Self;

    fn neg(self) -> Self {
        Self(-self.0)
    }
}

impl Sum for TokenAmount {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Self::zero(), |acc, amount| acc + amount)
    }
}

impl Serialize for TokenAmount {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(&self.0)
    }
}

impl<'de> Deserialize<'de> for TokenAmount {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_any(TokenAmountVisitor)
    }
}

struct TokenAmountVisitor;

impl<'de> Visitor<'de> for TokenAmountVisitor {
    type Value = TokenAmount;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("an integer or a string of smallest token units")
    }

    fn visit_str<E: de::Error>(self, v: &str) -> Result<Self::Value, E> {
        v.parse().map_err(E::custom)
    }

    fn visit_u64<E: de::Error>(self, v: u64) -> Result<Self::Value, E> {
        Ok(TokenAmount::from(v))
    }

    fn visit_i64<E: de::Error>(self, v: i64) -> Result<Self::Value, E> {
        Ok(TokenAmount::from(v))
    }

    fn visit_u128<E: de::Error>(self, v: u128) -> Result<Self::Value, E> {
        Ok(TokenAmount::from(v))
    }

    fn visit_i128<E: de::Error>(self, v: i128) -> Result<Self::Value, E> {
        Ok(TokenAmount::from(v))
    }
}
