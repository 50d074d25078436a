//! Integration tests for the cart widget.
//!
//! Every test runs against real sockets on `127.0.0.1`: a fixture server
//! stands in for the cart endpoint, and the widget server is started on an
//! ephemeral port when a test needs the HTTP surface.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p cart-widget-integration-tests
//! ```

use std::io;
use std::net::SocketAddr;

use axum::{Router, http::StatusCode, routing::get};
use cart_widget::routes;
use cart_widget::source::HttpCartSource;
use cart_widget::state::{AppState, LiveStore};
use tokio::net::TcpListener;
use url::Url;

/// One shoe at ₹1,500.00, quantity 2.
pub const SHOE: &str = r#"{"items":[{"id":1,"title":"Shoe","image":"https://cdn.example.com/shoe.png","presentment_price":150000,"quantity":2}]}"#;

/// Two items, the second without a quantity.
pub const SHOE_AND_CAP: &str = r#"{"items":[
    {"id":1,"title":"Shoe","image":"https://cdn.example.com/shoe.png","presentment_price":150000,"quantity":2},
    {"id":2,"title":"Cap","image":"https://cdn.example.com/cap.png","presentment_price":49900}
]}"#;

async fn serve(app: Router) -> io::Result<SocketAddr> {
    let listener = TcpListener::bind("127.0.0.1:0").await?;
    let addr = listener.local_addr()?;
    tokio::spawn(async move {
        let _ = axum::serve(listener, app).await;
    });
    Ok(addr)
}

fn url_for(addr: SocketAddr, path: &str) -> io::Result<Url> {
    Url::parse(&format!("http://{addr}{path}")).map_err(io::Error::other)
}

/// Serve `body` with `status` at `/cart.json` and return its URL.
///
/// # Errors
///
/// Returns an I/O error if no local port could be bound.
pub async fn serve_payload(status: StatusCode, body: &'static str) -> io::Result<Url> {
    let app = Router::new().route(
        "/cart.json",
        get(move || async move {
            (
                status,
                [(axum::http::header::CONTENT_TYPE, "application/json")],
                body,
            )
        }),
    );
    let addr = serve(app).await?;
    url_for(addr, "/cart.json")
}

/// A URL on a port nothing listens on.
///
/// # Errors
///
/// Returns an I/O error if no local port could be bound.
pub async fn unreachable_url() -> io::Result<Url> {
    let listener = TcpListener::bind("127.0.0.1:0").await?;
    let addr = listener.local_addr()?;
    drop(listener);
    url_for(addr, "/cart.json")
}

/// Boot a widget against `source_url` and serve it. Returns the base URL.
///
/// The bootstrap finishes before this returns, so the first request sees
/// either the loaded cart or the error view.
///
/// # Errors
///
/// Returns an I/O error if no local port could be bound.
pub async fn spawn_widget(source_url: Url, store: LiveStore) -> io::Result<Url> {
    let state = AppState::new();
    state.boot(store, &HttpCartSource::new(source_url)).await;
    let addr = serve(routes::routes().with_state(state)).await?;
    url_for(addr, "/")
}
