//! Cart Widget Core - Shared types library.
//!
//! This crate provides the value types the cart widget is built from:
//! - `ItemId` - type-safe line item identifier
//! - `Money` - amounts in paise, with the `en-IN` rupee formatter
//! - `Quantity` - a unit count that never drops below one
//!
//! # Architecture
//!
//! The core crate contains only types - no I/O, no storage, no HTTP clients.
//! The `cart-widget` crate builds the state, rendering and loading on top.

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
