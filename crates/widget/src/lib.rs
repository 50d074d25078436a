//! Cart Widget library.
//!
//! Keeps three copies of a shopping cart in step: the in-memory
//! [`cart::CartState`], the snapshot in a [`store::CartStore`], and the
//! rendered [`render::Page`]. The [`loader`] fills them once from a remote
//! payload; the [`controller`] applies user edits afterwards.
//!
//! The HTTP surface ([`routes`], [`state`]) serves the page and feeds
//! HTMX-delegated events to the controller.

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod cart;
pub mod config;
pub mod controller;
pub mod error;
pub mod loader;
pub mod render;
pub mod routes;
pub mod source;
pub mod state;
pub mod store;
