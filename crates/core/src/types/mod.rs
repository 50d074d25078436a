//! Core types for the cart widget.

pub mod id;
pub mod money;
pub mod quantity;

pub use id::*;
pub use money::{Money, RUPEE_SIGN, format_inr};
pub use quantity::{Quantity, QuantityError, parse_leading_int};
