//! In-memory cart state.
//!
//! `CartState` is the single source of truth for what is in the cart. The
//! totals are derived: only [`CartState::recompute_totals`] writes them, and
//! every recompute persists a snapshot through the injected [`CartStore`].

use serde::{Deserialize, Serialize};

use cart_widget_core::{ItemId, Money, Quantity};

use crate::source::RemoteItem;
use crate::store::CartStore;

/// A line in the cart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartItem {
    pub id: ItemId,
    pub title: String,
    /// Image URL.
    pub image: String,
    /// Unit price in paise.
    pub presentment_price: Money,
    pub quantity: Quantity,
}

impl CartItem {
    /// Unit price times quantity.
    #[must_use]
    pub fn line_subtotal(&self) -> Money {
        self.presentment_price.times(self.quantity)
    }
}

impl From<RemoteItem> for CartItem {
    fn from(item: RemoteItem) -> Self {
        Self {
            id: item.id,
            title: item.title,
            image: item.image,
            presentment_price: item.presentment_price,
            quantity: item.quantity.map_or(Quantity::MIN, Quantity::clamped),
        }
    }
}

/// Items in display order plus the derived totals.
///
/// This is also the shape of the persisted snapshot.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartState {
    pub items: Vec<CartItem>,
    pub subtotal: Money,
    pub total: Money,
}

impl CartState {
    /// Look up an item by id.
    #[must_use]
    pub fn item(&self, id: ItemId) -> Option<&CartItem> {
        self.items.iter().find(|item| item.id == id)
    }

    /// Sum of every line subtotal.
    #[must_use]
    pub fn computed_subtotal(&self) -> Money {
        self.items.iter().map(CartItem::line_subtotal).sum()
    }

    /// Whether the stored totals match the items.
    #[must_use]
    pub fn is_consistent(&self) -> bool {
        self.subtotal == self.computed_subtotal() && self.total == self.subtotal
    }

    /// Recompute subtotal and total, then persist the snapshot.
    ///
    /// No tax or shipping is modelled, so the total equals the subtotal. A
    /// failed save is logged; the recomputed totals stand either way.
    pub fn recompute_totals<S: CartStore + ?Sized>(&mut self, store: &S) {
        self.subtotal = self.computed_subtotal();
        self.total = self.subtotal;

        if let Err(e) = store.save(self) {
            tracing::warn!(error = %e, "Failed to persist cart snapshot");
        }
    }

    /// Set the quantity of the item with `id`.
    ///
    /// Returns `false` (and changes nothing) when no such item exists.
    /// Totals are left to the caller.
    pub fn set_quantity(&mut self, id: ItemId, quantity: Quantity) -> bool {
        match self.items.iter_mut().find(|item| item.id == id) {
            Some(item) => {
                item.quantity = quantity;
                true
            }
            None => false,
        }
    }

    /// Remove every item with `id`, keeping the order of the rest.
    ///
    /// Returns how many items were removed.
    pub fn remove_item(&mut self, id: ItemId) -> usize {
        let before = self.items.len();
        self.items.retain(|item| item.id != id);
        before - self.items.len()
    }

    /// Replace the item list wholesale with a freshly fetched one.
    ///
    /// Quantities already in the cart are not carried over: the remote list
    /// wins, and a missing remote quantity means one.
    pub fn replace_items(&mut self, remote: Vec<RemoteItem>) {
        self.items = remote.into_iter().map(CartItem::from).collect();
    }
}
