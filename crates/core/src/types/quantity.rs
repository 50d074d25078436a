//! Line item quantity with a floor of one.

use core::fmt;

use serde::{Deserialize, Serialize};

/// Errors that can occur when building a [`Quantity`] from a raw count.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum QuantityError {
    /// The count is below the floor.
    #[error("quantity must be at least 1")]
    Zero,
}

/// How many units of an item are in the cart.
///
/// ## Constraints
///
/// - Never below 1. Deserializing `0` fails, so a stored snapshot can't
///   smuggle in an empty line.
///
/// ## Examples
///
/// ```
/// use cart_widget_core::Quantity;
///
/// assert_eq!(Quantity::parse_input("3").get(), 3);
/// assert_eq!(Quantity::parse_input("2.7").get(), 2);
/// assert_eq!(Quantity::parse_input("-4").get(), 1);
/// assert_eq!(Quantity::parse_input("abc").get(), 1);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u32", into = "u32")]
pub struct Quantity(u32);

impl Quantity {
    /// The floor.
    pub const MIN: Self = Self(1);

    /// Create a quantity, or `None` for zero.
    #[must_use]
    pub const fn new(count: u32) -> Option<Self> {
        if count == 0 { None } else { Some(Self(count)) }
    }

    /// Get the count.
    #[must_use]
    pub const fn get(self) -> u32 {
        self.0
    }

    /// Clamp an arbitrary integer into the valid range.
    #[must_use]
    pub fn clamped(raw: i64) -> Self {
        if raw < 1 {
            return Self::MIN;
        }
        Self(u32::try_from(raw).unwrap_or(u32::MAX))
    }

    /// Read a quantity typed into a number input.
    ///
    /// Takes the leading integer the way a browser's `parseInt` does, then
    /// clamps. Text with no leading integer becomes the floor.
    #[must_use]
    pub fn parse_input(raw: &str) -> Self {
        parse_leading_int(raw).map_or(Self::MIN, Self::clamped)
    }

    /// One more, saturating.
    #[must_use]
    pub const fn increment(self) -> Self {
        Self(self.0.saturating_add(1))
    }

    /// One fewer, or `None` at the floor.
    #[must_use]
    pub const fn decrement(self) -> Option<Self> {
        Self::new(self.0 - 1)
    }
}

impl Default for Quantity {
    fn default() -> Self {
        Self::MIN
    }
}

impl fmt::Display for Quantity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl TryFrom<u32> for Quantity {
    type Error = QuantityError;

    fn try_from(count: u32) -> Result<Self, Self::Error> {
        Self::new(count).ok_or(QuantityError::Zero)
    }
}

impl From<Quantity> for u32 {
    fn from(quantity: Quantity) -> Self {
        quantity.0
    }
}

/// Parse the leading integer of `raw`, ignoring leading whitespace.
///
/// Returns `None` when no digits follow the optional sign. Values outside
/// the `i64` range saturate.
#[must_use]
pub fn parse_leading_int(raw: &str) -> Option<i64> {
    let trimmed = raw.trim_start();
    let (negative, rest) = trimmed.strip_prefix('-').map_or_else(
        || (false, trimmed.strip_prefix('+').unwrap_or(trimmed)),
        |rest| (true, rest),
    );

    let end = rest.find(|c: char| !c.is_ascii_digit()).unwrap_or(rest.len());
    let (digits, _) = rest.split_at(end);
    if digits.is_empty() {
        return None;
    }

    let value = digits.bytes().fold(0_i64, |acc, b| {
        acc.saturating_mul(10).saturating_add(i64::from(b - b'0'))
    });
    Some(if negative { -value } else { value })
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_new_rejects_zero() {
        assert!(Quantity::new(0).is_none());
        assert_eq!(Quantity::new(5).unwrap().get(), 5);
    }

    #[test]
    fn test_clamped() {
        assert_eq!(Quantity::clamped(-10), Quantity::MIN);
        assert_eq!(Quantity::clamped(0), Quantity::MIN);
        assert_eq!(Quantity::clamped(7).get(), 7);
        assert_eq!(Quantity::clamped(i64::MAX).get(), u32::MAX);
    }

    #[test]
    fn test_parse_leading_int() {
        assert_eq!(parse_leading_int("12"), Some(12));
        assert_eq!(parse_leading_int("  3abc"), Some(3));
        assert_eq!(parse_leading_int("2.9"), Some(2));
        assert_eq!(parse_leading_int("+4"), Some(4));
        assert_eq!(parse_leading_int("-4"), Some(-4));
        assert_eq!(parse_leading_int("1e3"), Some(1));
        assert_eq!(parse_leading_int(""), None);
        assert_eq!(parse_leading_int("-"), None);
        assert_eq!(parse_leading_int("abc"), None);
    }

    #[test]
    fn test_parse_leading_int_saturates() {
        assert_eq!(parse_leading_int("99999999999999999999999"), Some(i64::MAX));
    }

    #[test]
    fn test_parse_input_clamps() {
        assert_eq!(Quantity::parse_input("0"), Quantity::MIN);
        assert_eq!(Quantity::parse_input(""), Quantity::MIN);
        assert_eq!(Quantity::parse_input("9").get(), 9);
    }

    #[test]
    fn test_step() {
        let two = Quantity::new(2).unwrap();
        assert_eq!(two.increment().get(), 3);
        assert_eq!(two.decrement(), Some(Quantity::MIN));
        assert_eq!(Quantity::MIN.decrement(), None);
        assert_eq!(Quantity::new(u32::MAX).unwrap().increment().get(), u32::MAX);
    }

    #[test]
    fn test_serde_rejects_zero() {
        assert!(serde_json::from_str::<Quantity>("0").is_err());
        assert_eq!(serde_json::from_str::<Quantity>("2").unwrap().get(), 2);
        assert_eq!(serde_json::to_string(&Quantity::MIN).unwrap(), "1");
    }
}
