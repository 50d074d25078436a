//! HTTP route handlers for the cart widget.
//!
//! # Route Structure
//!
//! ```text
//! GET  /                  - Cart page
//! GET  /health            - Health check
//!
//! # Cart (HTMX fragments)
//! GET  /cart              - Cart page
//! GET  /cart/items        - Container contents (polled by the loading view)
//! POST /cart/events       - Delegated item-list event (returns out-of-band fragments)
//! POST /cart/checkout     - Checkout notice (HX-Trigger: cart-notice)
//! ```

pub mod cart;

use axum::{
    Router,
    routing::{get, post},
};

use crate::state::AppState;

/// Create the cart routes router.
pub fn cart_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(cart::show))
        .route("/items", get(cart::items))
        .route("/events", post(cart::event))
        .route("/checkout", post(cart::checkout))
}

/// Create all routes for the widget.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/", get(cart::show))
        .route("/health", get(health))
        .nest("/cart", cart_routes())
}

/// Liveness health check endpoint.
async fn health() -> &'static str {
    "ok"
}
