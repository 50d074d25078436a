//! Application state shared across handlers.

use std::sync::{Arc, Mutex};

use tracing::warn;

use crate::controller::Controller;
use crate::error::AppError;
use crate::loader::{self, Boot};
use crate::render::Page;
use crate::source::CartSource;
use crate::store::CartStore;

/// Store type held by the running server.
pub type LiveStore = Box<dyn CartStore + Send>;

/// Controller type held by the running server.
pub type LiveController = Controller<LiveStore, Page>;

/// Where the widget is in its lifecycle.
pub enum Widget {
    /// The startup fetch hasn't finished.
    Loading(Page),
    /// Loaded and accepting events.
    Ready(LiveController),
    /// The startup fetch failed; only the error view is shown.
    Failed(Page),
}

impl Widget {
    /// The page as it currently stands.
    #[must_use]
    pub fn page(&self) -> &Page {
        match self {
            Self::Loading(page) | Self::Failed(page) => page,
            Self::Ready(controller) => controller.renderer(),
        }
    }
}

/// Application state shared across all handlers.
///
/// Cheaply cloneable via `Arc`. The widget sits behind one mutex, which
/// serializes events the way a browser's event queue does; it is never held
/// across an `.await`.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    widget: Mutex<Widget>,
}

impl Default for AppState {
    fn default() -> Self {
        Self::new()
    }
}

impl AppState {
    /// State for a widget that is still loading.
    #[must_use]
    pub fn new() -> Self {
        Self {
            inner: Arc::new(AppStateInner {
                widget: Mutex::new(Widget::Loading(Page::loading())),
            }),
        }
    }

    /// Run the bootstrap and install its outcome.
    pub async fn boot<F: CartSource>(&self, store: LiveStore, source: &F) {
        let boot = loader::bootstrap(store, Page::default(), source).await;
        self.install(boot);
    }

    /// Replace the loading widget with the bootstrap outcome.
    pub fn install(&self, boot: Boot<LiveStore, Page>) {
        let widget = match boot {
            Boot::Ready(controller) => Widget::Ready(controller),
            Boot::Failed { renderer, .. } => Widget::Failed(renderer),
        };
        match self.inner.widget.lock() {
            Ok(mut slot) => *slot = widget,
            Err(poisoned) => {
                warn!("Widget lock poisoned, installing anyway");
                *poisoned.into_inner() = widget;
            }
        }
    }

    /// Run `f` with exclusive access to the widget.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Internal` if an earlier handler panicked while
    /// holding the widget.
    pub fn with_widget<T>(&self, f: impl FnOnce(&mut Widget) -> T) -> Result<T, AppError> {
        let mut widget = self
            .inner
            .widget
            .lock()
            .map_err(|_| AppError::Internal("widget lock poisoned".to_string()))?;
        Ok(f(&mut widget))
    }
}
