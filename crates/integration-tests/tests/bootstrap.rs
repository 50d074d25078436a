//! Integration tests for the startup bootstrap over a real HTTP fetch.

use std::sync::Arc;

use axum::http::StatusCode;
use cart_widget::controller::{AnsweredPrompt, Control, Handled, Target, UiEvent};
use cart_widget::loader::{Boot, LoadError, bootstrap};
use cart_widget::render::{Container, ERROR_MESSAGE, Page};
use cart_widget::source::{HttpCartSource, SourceError};
use cart_widget::store::{CartStore, FileStore, MemoryStore};
use cart_widget_core::ItemId;
use cart_widget_integration_tests::{SHOE, SHOE_AND_CAP, serve_payload, unreachable_url};

async fn source(status: StatusCode, body: &'static str) -> HttpCartSource {
    HttpCartSource::new(
        serve_payload(status, body)
            .await
            .expect("fixture server should start"),
    )
}

// =============================================================================
// Successful load
// =============================================================================

#[tokio::test]
async fn test_fetched_cart_is_rendered_and_persisted() {
    let source = source(StatusCode::OK, SHOE).await;
    let Boot::Ready(controller) = bootstrap(MemoryStore::new(), Page::default(), &source).await
    else {
        panic!("bootstrap should succeed");
    };

    let page = controller.renderer();
    let block = page.block(ItemId::new(1)).expect("shoe should be rendered");
    assert_eq!(block.title, "Shoe");
    assert_eq!(block.unit_price, "₹1,500.00");
    assert_eq!(block.quantity, "2");
    assert_eq!(block.subtotal, "₹3,000.00");
    assert_eq!(page.subtotal_text(), "₹3,000.00");
    assert_eq!(page.total_text(), "₹3,000.00");

    let stored = controller.store().load().expect("snapshot should be written");
    assert_eq!(&stored, controller.state());
}

#[tokio::test]
async fn test_items_render_in_payload_order() {
    let source = source(StatusCode::OK, SHOE_AND_CAP).await;
    let Boot::Ready(controller) = bootstrap(MemoryStore::new(), Page::default(), &source).await
    else {
        panic!("bootstrap should succeed");
    };

    let ids: Vec<i64> = controller
        .renderer()
        .blocks()
        .iter()
        .map(|block| block.id.as_i64())
        .collect();
    assert_eq!(ids, vec![1, 2]);
    assert_eq!(controller.renderer().total_text(), "₹3,499.00");
}

#[tokio::test]
async fn test_increment_after_load() {
    let source = source(StatusCode::OK, SHOE).await;
    let Boot::Ready(mut controller) =
        bootstrap(MemoryStore::new(), Page::default(), &source).await
    else {
        panic!("bootstrap should succeed");
    };

    let handled = controller.dispatch(
        &UiEvent::Click(Target::new(Control::Increment, ItemId::new(1))),
        &mut AnsweredPrompt::new(true),
    );

    assert!(matches!(handled, Handled::Quantity { .. }));
    let page = controller.renderer();
    assert_eq!(
        page.block(ItemId::new(1)).expect("shoe").subtotal,
        "₹4,500.00"
    );
    assert_eq!(page.total_text(), "₹4,500.00");
}

#[tokio::test]
async fn test_file_store_snapshot_survives_restart() {
    let dir = tempfile::tempdir().expect("scratch dir");

    let source = source(StatusCode::OK, SHOE).await;
    let Boot::Ready(mut controller) =
        bootstrap(FileStore::new(dir.path(), "cartState"), Page::default(), &source).await
    else {
        panic!("bootstrap should succeed");
    };
    controller.dispatch(
        &UiEvent::Change(Target::new(Control::QuantityInput, ItemId::new(1)).with_value("5")),
        &mut AnsweredPrompt::new(true),
    );
    drop(controller);

    let reopened = FileStore::new(dir.path(), "cartState");
    let snapshot = reopened.load().expect("snapshot should be on disk");
    assert_eq!(snapshot.items.len(), 1);
    assert_eq!(snapshot.subtotal.minor(), 750_000);
    assert_eq!(snapshot.total.minor(), 750_000);
    assert!(snapshot.is_consistent());
}

// =============================================================================
// Failed load
// =============================================================================

fn assert_error_only(boot: Boot<MemoryStore, Page>) -> LoadError {
    let Boot::Failed { renderer, error } = boot else {
        panic!("bootstrap should fail");
    };
    assert_eq!(renderer.container(), &Container::Error);
    let html = renderer.container_html().expect("error view renders");
    assert!(html.contains(ERROR_MESSAGE));
    assert!(!html.contains("cart-item"));
    error
}

#[tokio::test]
async fn test_server_error_shows_error_view() {
    let source = source(StatusCode::INTERNAL_SERVER_ERROR, "oops").await;
    let error = assert_error_only(bootstrap(MemoryStore::new(), Page::default(), &source).await);
    assert!(matches!(
        error,
        LoadError::Source(SourceError::Status(StatusCode::INTERNAL_SERVER_ERROR))
    ));
}

#[tokio::test]
async fn test_malformed_json_shows_error_view() {
    let source = source(StatusCode::OK, "{\"items\": [").await;
    let error = assert_error_only(bootstrap(MemoryStore::new(), Page::default(), &source).await);
    assert!(matches!(error, LoadError::Source(SourceError::Parse(_))));
}

#[tokio::test]
async fn test_unreachable_endpoint_shows_error_view() {
    let url = unreachable_url().await.expect("local port");
    let source = HttpCartSource::new(url);
    let error = assert_error_only(bootstrap(MemoryStore::new(), Page::default(), &source).await);
    assert!(matches!(error, LoadError::Source(SourceError::Http(_))));
}

#[tokio::test]
async fn test_failed_load_leaves_stored_snapshot_untouched() {
    let store = Arc::new(MemoryStore::with_raw(r#"{"items":[],"subtotal":0,"total":0}"#));
    let source = source(StatusCode::NOT_FOUND, "").await;

    let Boot::Failed { .. } = bootstrap(Arc::clone(&store), Page::default(), &source).await else {
        panic!("bootstrap should fail");
    };
    assert_eq!(
        store.raw().as_deref(),
        Some(r#"{"items":[],"subtotal":0,"total":0}"#)
    );
}
