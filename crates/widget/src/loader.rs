//! One-shot bootstrap of the cart.
//!
//! ```text
//! render loading -> hydrate from store -> fetch -> replace items
//!     -> render all -> recompute totals -> render totals -> bind controller
//! ```
//!
//! The fetch is the only suspension point. Any fetch or parse failure shows
//! the error view and stops: no retry, no partial list, no controller.

use thiserror::Error;
use tracing::{error, info, instrument};

use crate::cart::CartState;
use crate::controller::Controller;
use crate::render::Renderer;
use crate::source::{CartSource, SourceError};
use crate::store::CartStore;

/// Errors that stop the bootstrap.
#[derive(Debug, Error)]
pub enum LoadError {
    /// Fetching or parsing the remote payload failed.
    #[error("Failed to load cart: {0}")]
    Source(#[from] SourceError),
}

/// Outcome of the bootstrap.
#[derive(Debug)]
pub enum Boot<S, R> {
    /// The cart is rendered and the controller is bound.
    Ready(Controller<S, R>),
    /// The error view is rendered and nothing is bound.
    Failed { renderer: R, error: LoadError },
}

impl<S, R> Boot<S, R> {
    #[must_use]
    pub const fn is_ready(&self) -> bool {
        matches!(self, Self::Ready(_))
    }
}

/// Load the cart and wire the controller.
#[instrument(skip_all)]
pub async fn bootstrap<S, R, F>(store: S, mut renderer: R, source: &F) -> Boot<S, R>
where
    S: CartStore,
    R: Renderer,
    F: CartSource,
{
    renderer.render_loading();

    let mut state = store.load().unwrap_or_else(|| {
        info!("No stored cart snapshot, starting empty");
        CartState::default()
    });

    let payload = match source.fetch().await {
        Ok(payload) => payload,
        Err(e) => {
            let error = LoadError::from(e);
            error!(error = %error, "Error fetching cart data");
            renderer.render_error();
            return Boot::Failed { renderer, error };
        }
    };

    state.replace_items(payload.items);
    renderer.render_all(&state.items);
    state.recompute_totals(&store);
    renderer.render_totals(state.subtotal, state.total);

    info!(items = state.items.len(), total = %state.total, "Cart loaded");
    Boot::Ready(Controller::bind(state, store, renderer))
}
