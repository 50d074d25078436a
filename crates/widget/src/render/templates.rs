//! Askama templates for the cart page and its fragments.

use askama::Template;
use askama_web::WebTemplate;

use cart_widget_core::ItemId;

use super::ItemBlock;

/// Full cart page.
#[derive(Template, WebTemplate)]
#[template(path = "cart/show.html")]
pub struct CartShowTemplate {
    /// Pre-rendered container contents.
    pub items_html: String,
    pub subtotal: String,
    pub total: String,
    pub heading: &'static str,
    pub confirm_message: &'static str,
}

/// Loading indicator.
#[derive(Template)]
#[template(path = "partials/loading.html")]
pub struct LoadingTemplate<'a> {
    pub message: &'a str,
}

/// Static error view.
#[derive(Template)]
#[template(path = "partials/error.html")]
pub struct ErrorTemplate<'a> {
    pub message: &'a str,
}

/// Heading plus every item block.
#[derive(Template)]
#[template(path = "partials/cart_items.html")]
pub struct CartItemsTemplate<'a> {
    pub heading: &'a str,
    pub blocks: &'a [ItemBlock],
    pub oob: bool,
}

/// Line subtotal of one block, plus its quantity input when the shown
/// value changed, swapped out-of-band.
#[derive(Template)]
#[template(path = "partials/item_patch.html")]
pub struct ItemPatchTemplate<'a> {
    pub block: &'a ItemBlock,
    pub with_input: bool,
    pub oob: bool,
}

/// Out-of-band deletion of one block.
#[derive(Template)]
#[template(path = "partials/item_removed.html")]
pub struct ItemRemovedTemplate {
    pub id: ItemId,
}

/// Out-of-band subtotal and total texts.
#[derive(Template)]
#[template(path = "partials/totals.html")]
pub struct TotalsTemplate<'a> {
    pub subtotal: &'a str,
    pub total: &'a str,
}
