//! Cart route handlers.
//!
//! The item-list container posts every relevant click and change to
//! `/cart/events` (HTMX event delegation). Responses carry only the
//! fragments that changed, marked `hx-swap-oob`, so the rest of the list
//! keeps its focus and scroll position.

use axum::{
    Form,
    extract::State,
    http::StatusCode,
    response::{AppendHeaders, Html, IntoResponse, Response},
};
use serde::Deserialize;
use tracing::instrument;

use crate::controller::{AnsweredPrompt, Control, Handled, Target, UiEvent};
use crate::error::{AppError, Result};
use crate::render::{CartShowTemplate, Page};
use crate::state::{AppState, Widget};

/// Delegated event form data.
#[derive(Debug, Deserialize)]
pub struct EventForm {
    /// DOM event type: `click` or `change`.
    pub event: String,
    /// Class list of the element the event started on.
    #[serde(default)]
    pub control: String,
    /// `data-id` of the closest cart item, empty outside any item.
    #[serde(default)]
    pub item_id: String,
    /// Value of the element, for inputs.
    #[serde(default)]
    pub value: Option<String>,
    /// The user's answer to the removal confirmation.
    #[serde(default)]
    pub confirmed: bool,
}

impl EventForm {
    fn to_event(&self) -> Result<UiEvent> {
        let target = Target {
            control: Control::from_class_list(&self.control),
            item: self.item_id.parse().ok(),
            value: self.value.clone(),
        };

        match self.event.as_str() {
            "click" => Ok(UiEvent::Click(target)),
            "change" => Ok(UiEvent::Change(target)),
            other => Err(AppError::BadRequest(format!("unsupported event: {other}"))),
        }
    }
}

/// Display the cart page.
#[instrument(skip(state))]
pub async fn show(State(state): State<AppState>) -> Result<CartShowTemplate> {
    Ok(state.with_widget(|widget| widget.page().document())??)
}

/// Container contents (HTMX).
///
/// The loading view polls this. Once the cart has loaded or failed the
/// response no longer carries the loading view, so the polling stops, and
/// the totals come along out-of-band.
#[instrument(skip(state))]
pub async fn items(State(state): State<AppState>) -> Result<Html<String>> {
    let html = state.with_widget(|widget| {
        let page = widget.page();
        let mut html = page.container_html()?;
        if !matches!(widget, Widget::Loading(_)) {
            html.push_str(&page.totals_html()?);
        }
        Ok::<_, askama::Error>(html)
    })??;
    Ok(Html(html))
}

/// Handle a delegated item-list event (HTMX).
#[instrument(skip(state))]
pub async fn event(State(state): State<AppState>, Form(form): Form<EventForm>) -> Result<Response> {
    let event = form.to_event()?;
    let mut prompt = AnsweredPrompt::new(form.confirmed);

    state.with_widget(|widget| {
        let Widget::Ready(controller) = widget else {
            return Err(AppError::NotReady);
        };
        let handled = controller.dispatch(&event, &mut prompt);
        fragments(controller.renderer(), handled)
    })?
}

/// Show the checkout notice (HTMX).
///
/// The notice rides back in an `HX-Trigger` header; the page script shows it.
#[instrument(skip(state))]
pub async fn checkout(State(state): State<AppState>) -> Result<Response> {
    let mut prompt = AnsweredPrompt::new(false);

    state.with_widget(|widget| match widget {
        Widget::Ready(controller) => {
            controller.checkout(&mut prompt);
            Ok(())
        }
        _ => Err(AppError::NotReady),
    })??;

    let trigger = serde_json::json!({ "cart-notice": prompt.notices().join("\n") }).to_string();
    Ok((AppendHeaders([("HX-Trigger", trigger)]), Html(String::new())).into_response())
}

/// Out-of-band fragments for what a handled event changed.
fn fragments(page: &Page, handled: Handled) -> Result<Response> {
    let changed = match handled {
        Handled::Ignored | Handled::Kept(_) => return Ok(StatusCode::NO_CONTENT.into_response()),
        Handled::Quantity { id, rewritten, .. } => page.item_patch_html(id, rewritten)?,
        Handled::Removed(id) => Page::item_removed_html(id)?,
    };

    Ok(Html(changed + &page.totals_html()?).into_response())
}
