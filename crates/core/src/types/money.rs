//! Money in minor currency units and the rupee formatter.
//!
//! Amounts are kept as integer paise so cart arithmetic never rounds.
//! Display follows the `en-IN` rules for INR: rupee sign, the last three
//! integer digits grouped together and every two digits above that, and
//! exactly two fraction digits.
//!
//! ```rust
//! use cart_widget_core::{Money, format_inr};
//!
//! assert_eq!(format_inr(150_000), "₹1,500.00");
//! assert_eq!(Money::from_minor(123_456_789).to_string(), "₹12,34,567.89");
//! ```

use core::fmt;
use core::iter::Sum;

use serde::{Deserialize, Serialize};

use crate::types::quantity::Quantity;

/// Rupee sign used as the currency prefix.
pub const RUPEE_SIGN: char = '₹';

/// An amount in minor currency units (paise).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Money(i64);

impl Money {
    /// Zero paise.
    pub const ZERO: Self = Self(0);

    /// Create an amount from minor units.
    #[must_use]
    pub const fn from_minor(minor: i64) -> Self {
        Self(minor)
    }

    /// Get the amount in minor units.
    #[must_use]
    pub const fn minor(self) -> i64 {
        self.0
    }

    /// Price of `quantity` units at this unit price.
    ///
    /// Saturates at the `i64` bounds.
    #[must_use]
    pub fn times(self, quantity: Quantity) -> Self {
        Self(self.0.saturating_mul(i64::from(quantity.get())))
    }

    /// Saturating addition.
    #[must_use]
    pub const fn saturating_add(self, other: Self) -> Self {
        Self(self.0.saturating_add(other.0))
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&format_inr(self.0))
    }
}

impl Sum for Money {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Self::ZERO, Self::saturating_add)
    }
}

impl From<i64> for Money {
    fn from(minor: i64) -> Self {
        Self(minor)
    }
}

/// Format an amount of paise as an `en-IN` rupee string.
#[must_use]
pub fn format_inr(minor: i64) -> String {
    let abs = minor.unsigned_abs();
    let rupees = group_indian(abs / 100);
    let paise = abs % 100;
    let sign = if minor < 0 { "-" } else { "" };
    format!("{sign}{RUPEE_SIGN}{rupees}.{paise:02}")
}

/// Group digits as 12,34,56,789.
fn group_indian(value: u64) -> String {
    let digits = value.to_string();
    if digits.len() <= 3 {
        return digits;
    }

    let (mut head, tail) = digits.split_at(digits.len() - 3);
    let mut groups = Vec::new();
    while head.len() > 2 {
        let (rest, pair) = head.split_at(head.len() - 2);
        groups.push(pair);
        head = rest;
    }
    groups.push(head);
    groups.reverse();

    format!("{},{tail}", groups.join(","))
}
