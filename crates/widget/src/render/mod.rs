//! Rendering port and the page model that implements it.
//!
//! The controller and loader only talk to [`Renderer`]. [`Page`] keeps the
//! document as plain data (the text every element shows) and turns it into
//! HTML with askama templates, either whole or as the out-of-band fragments
//! an HTMX response swaps into the browser's copy.

mod page;
mod templates;

pub use page::{Container, ItemBlock, Page};
pub use templates::{
    CartItemsTemplate, CartShowTemplate, ErrorTemplate, ItemPatchTemplate, ItemRemovedTemplate,
    LoadingTemplate, TotalsTemplate,
};

use cart_widget_core::{ItemId, Money, Quantity};

use crate::cart::CartItem;

/// Heading above the item list.
pub const HEADING: &str = "Shopping Cart";
/// Loading indicator text.
pub const LOADING_MESSAGE: &str = "Loading cart items...";
/// Static error view text.
pub const ERROR_MESSAGE: &str = "Error loading cart items. Please try again later.";

/// Rendering port.
///
/// Mirrors what the cart touches in a document: the item-list container,
/// the per-item blocks inside it, and the two totals texts.
pub trait Renderer {
    /// Replace the container contents with the loading indicator.
    fn render_loading(&mut self);

    /// Replace the container contents with the static error message.
    fn render_error(&mut self);

    /// Replace the container contents with the heading and one block per item.
    fn render_all(&mut self, items: &[CartItem]);

    /// Update only the line-subtotal text of the block for `id`.
    fn patch_item_subtotal(&mut self, id: ItemId, quantity: Quantity, price_each: Money);

    /// Update only the subtotal and total texts.
    fn render_totals(&mut self, subtotal: Money, total: Money);

    /// Current value of the quantity input in the block for `id`.
    fn quantity_input(&self, id: ItemId) -> Option<String>;

    /// Overwrite the value of the quantity input in the block for `id`.
    fn set_quantity_input(&mut self, id: ItemId, value: &str);

    /// Remove the block for `id`. Returns whether a block was removed.
    fn remove_item_block(&mut self, id: ItemId) -> bool;
}
