//! Interaction controller: delegated UI events to cart operations.
//!
//! All item events arrive through one entry point, [`Controller::dispatch`],
//! the way a single listener on the item-list container would see them. The
//! event names the control that was hit (resolved from its class list) and
//! the item block it sits in; blocks added or removed later need no
//! re-binding.
//!
//! Every handler runs to completion. The only questions asked of the user go
//! through the [`Prompt`] capability so tests can answer them.

use cart_widget_core::{ItemId, Quantity, parse_leading_int};
use tracing::{debug, info};

use crate::cart::CartState;
use crate::render::Renderer;
use crate::store::CartStore;

/// Question asked before an item is removed.
pub const REMOVE_CONFIRMATION: &str = "Are you sure you want to remove this item from your cart?";
/// Notice shown when checkout is clicked.
pub const CHECKOUT_NOTICE: &str = "Proceeding to checkout...";

/// Blocking yes/no and acknowledgement dialogs.
pub trait Prompt {
    /// Ask a yes/no question.
    fn confirm(&mut self, message: &str) -> bool;

    /// Show a notice the user has to acknowledge.
    fn alert(&mut self, message: &str);
}

/// A prompt whose answer is known up front.
///
/// Notices are collected instead of shown.
#[derive(Debug, Clone, Default)]
pub struct AnsweredPrompt {
    answer: bool,
    asked: Vec<String>,
    notices: Vec<String>,
}

impl AnsweredPrompt {
    /// A prompt that answers every question with `answer`.
    #[must_use]
    pub fn new(answer: bool) -> Self {
        Self {
            answer,
            ..Self::default()
        }
    }

    /// Questions asked so far.
    #[must_use]
    pub fn asked(&self) -> &[String] {
        &self.asked
    }

    /// Notices shown so far.
    #[must_use]
    pub fn notices(&self) -> &[String] {
        &self.notices
    }
}

impl Prompt for AnsweredPrompt {
    fn confirm(&mut self, message: &str) -> bool {
        self.asked.push(message.to_string());
        self.answer
    }

    fn alert(&mut self, message: &str) {
        self.notices.push(message.to_string());
    }
}

/// Which control an event landed on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Control {
    Decrement,
    Increment,
    Remove,
    QuantityInput,
    Other,
}

impl Control {
    /// Resolve a control from the target element's class list.
    ///
    /// The trash icon inside the remove button counts as the button.
    #[must_use]
    pub fn from_class_list(classes: &str) -> Self {
        let mut classes = classes.split_whitespace();
        classes
            .find_map(|class| match class {
                "minus" => Some(Self::Decrement),
                "plus" => Some(Self::Increment),
                "remove-item" | "fa-trash" => Some(Self::Remove),
                "quantity-input" => Some(Self::QuantityInput),
                _ => None,
            })
            .unwrap_or(Self::Other)
    }
}

/// The element an event was dispatched on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Target {
    pub control: Control,
    /// Id of the closest enclosing item block, if any.
    pub item: Option<ItemId>,
    /// Value of the element (only inputs have one).
    pub value: Option<String>,
}

impl Target {
    /// Target a control inside the block for `item`.
    #[must_use]
    pub const fn new(control: Control, item: ItemId) -> Self {
        Self {
            control,
            item: Some(item),
            value: None,
        }
    }

    /// Attach the element's value.
    #[must_use]
    pub fn with_value(mut self, value: impl Into<String>) -> Self {
        self.value = Some(value.into());
        self
    }
}

/// A UI event bubbling up to the item-list container.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UiEvent {
    Click(Target),
    Change(Target),
}

/// What a dispatched event did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Handled {
    /// The event didn't concern the cart.
    Ignored,
    /// The quantity of `id` was set (state untouched on a lookup miss).
    ///
    /// `rewritten` is false when the input already shows `quantity`.
    Quantity {
        id: ItemId,
        quantity: Quantity,
        rewritten: bool,
    },
    /// The item was removed.
    Removed(ItemId),
    /// The user declined the removal.
    Kept(ItemId),
}

/// Owns the cart state, the store and the renderer once the cart is loaded.
#[derive(Debug)]
pub struct Controller<S, R> {
    state: CartState,
    store: S,
    renderer: R,
}

impl<S: CartStore, R: Renderer> Controller<S, R> {
    /// Bind a controller to an already rendered cart.
    pub(crate) fn bind(state: CartState, store: S, renderer: R) -> Self {
        Self {
            state,
            store,
            renderer,
        }
    }

    #[must_use]
    pub const fn state(&self) -> &CartState {
        &self.state
    }

    #[must_use]
    pub const fn store(&self) -> &S {
        &self.store
    }

    #[must_use]
    pub const fn renderer(&self) -> &R {
        &self.renderer
    }

    /// Handle one event bubbling up to the item container.
    pub fn dispatch(&mut self, event: &UiEvent, prompt: &mut impl Prompt) -> Handled {
        let (target, is_click) = match event {
            UiEvent::Click(target) => (target, true),
            UiEvent::Change(target) => (target, false),
        };
        let Some(id) = target.item else {
            debug!(?event, "Event outside any cart item");
            return Handled::Ignored;
        };

        match (target.control, is_click) {
            (Control::Decrement, true) => self.decrement(id),
            (Control::Increment, true) => self.increment(id),
            (Control::Remove, true) => self.remove(id, prompt),
            (Control::QuantityInput, false) => {
                self.quantity_entered(id, target.value.as_deref().unwrap_or_default())
            }
            _ => Handled::Ignored,
        }
    }

    /// Log the cart and show the checkout notice.
    pub fn checkout(&self, prompt: &mut impl Prompt) {
        let snapshot = serde_json::to_string(&self.state).unwrap_or_default();
        info!(cart = %snapshot, "Current cart state");
        prompt.alert(CHECKOUT_NOTICE);
    }

    fn displayed_quantity(&self, id: ItemId) -> Option<i64> {
        self.renderer
            .quantity_input(id)
            .and_then(|value| parse_leading_int(&value))
    }

    fn decrement(&mut self, id: ItemId) -> Handled {
        match self.displayed_quantity(id) {
            Some(shown) if shown > 1 => {
                self.apply_quantity(id, Quantity::clamped(shown - 1), true)
            }
            _ => Handled::Ignored,
        }
    }

    fn increment(&mut self, id: ItemId) -> Handled {
        if self.renderer.quantity_input(id).is_none() {
            return Handled::Ignored;
        }
        let shown = self.displayed_quantity(id).unwrap_or(0);
        self.apply_quantity(id, Quantity::clamped(shown.saturating_add(1)), true)
    }

    fn quantity_entered(&mut self, id: ItemId, raw: &str) -> Handled {
        let quantity = Quantity::parse_input(raw);
        self.apply_quantity(id, quantity, raw != quantity.to_string())
    }

    /// Show `quantity` in the input, then update state, line and totals.
    fn apply_quantity(&mut self, id: ItemId, quantity: Quantity, rewritten: bool) -> Handled {
        self.renderer.set_quantity_input(id, &quantity.to_string());

        if self.state.set_quantity(id, quantity) {
            self.state.recompute_totals(&self.store);
            if let Some(item) = self.state.item(id) {
                self.renderer
                    .patch_item_subtotal(id, quantity, item.presentment_price);
            }
            self.renderer
                .render_totals(self.state.subtotal, self.state.total);
        }

        Handled::Quantity {
            id,
            quantity,
            rewritten,
        }
    }

    fn remove(&mut self, id: ItemId, prompt: &mut impl Prompt) -> Handled {
        if !prompt.confirm(REMOVE_CONFIRMATION) {
            return Handled::Kept(id);
        }

        self.state.remove_item(id);
        self.renderer.remove_item_block(id);
        self.state.recompute_totals(&self.store);
        self.renderer
            .render_totals(self.state.subtotal, self.state.total);
        Handled::Removed(id)
    }
}
