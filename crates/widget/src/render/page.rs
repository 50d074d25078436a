//! In-memory document model of the cart page.

use askama::Template;

use cart_widget_core::{ItemId, Money, Quantity};

use super::templates::{
    CartItemsTemplate, CartShowTemplate, ErrorTemplate, ItemPatchTemplate, ItemRemovedTemplate,
    LoadingTemplate, TotalsTemplate,
};
use super::{ERROR_MESSAGE, HEADING, LOADING_MESSAGE, Renderer};
use crate::cart::CartItem;
use crate::controller::REMOVE_CONFIRMATION;

/// What the item-list container currently shows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Container {
    Empty,
    Loading,
    Error,
    Items(Vec<ItemBlock>),
}

/// One rendered item, as the texts its elements display.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ItemBlock {
    pub id: ItemId,
    pub image: String,
    pub title: String,
    /// Formatted unit price.
    pub unit_price: String,
    /// Raw value of the quantity input.
    pub quantity: String,
    /// Formatted line subtotal.
    pub subtotal: String,
}

impl From<&CartItem> for ItemBlock {
    fn from(item: &CartItem) -> Self {
        Self {
            id: item.id,
            image: item.image.clone(),
            title: item.title.clone(),
            unit_price: item.presentment_price.to_string(),
            quantity: item.quantity.to_string(),
            subtotal: item.line_subtotal().to_string(),
        }
    }
}

/// The cart page: item container plus the subtotal and total texts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Page {
    container: Container,
    subtotal: String,
    total: String,
}

impl Default for Page {
    fn default() -> Self {
        Self {
            container: Container::Empty,
            subtotal: Money::ZERO.to_string(),
            total: Money::ZERO.to_string(),
        }
    }
}

impl Page {
    /// A page already showing the loading indicator.
    #[must_use]
    pub fn loading() -> Self {
        let mut page = Self::default();
        page.render_loading();
        page
    }

    #[must_use]
    pub const fn container(&self) -> &Container {
        &self.container
    }

    /// Rendered item blocks, empty unless the container shows items.
    #[must_use]
    pub fn blocks(&self) -> &[ItemBlock] {
        match &self.container {
            Container::Items(blocks) => blocks,
            _ => &[],
        }
    }

    /// The block tagged with `id`.
    #[must_use]
    pub fn block(&self, id: ItemId) -> Option<&ItemBlock> {
        self.blocks().iter().find(|block| block.id == id)
    }

    fn block_mut(&mut self, id: ItemId) -> Option<&mut ItemBlock> {
        match &mut self.container {
            Container::Items(blocks) => blocks.iter_mut().find(|block| block.id == id),
            _ => None,
        }
    }

    #[must_use]
    pub fn subtotal_text(&self) -> &str {
        &self.subtotal
    }

    #[must_use]
    pub fn total_text(&self) -> &str {
        &self.total
    }

    /// HTML of the container contents.
    ///
    /// # Errors
    ///
    /// Returns an error if a template fails to render.
    pub fn container_html(&self) -> askama::Result<String> {
        match &self.container {
            Container::Empty => Ok(String::new()),
            Container::Loading => LoadingTemplate {
                message: LOADING_MESSAGE,
            }
            .render(),
            Container::Error => ErrorTemplate {
                message: ERROR_MESSAGE,
            }
            .render(),
            Container::Items(blocks) => CartItemsTemplate {
                heading: HEADING,
                blocks,
                oob: false,
            }
            .render(),
        }
    }

    /// The full page template.
    ///
    /// # Errors
    ///
    /// Returns an error if the container contents fail to render.
    pub fn document(&self) -> askama::Result<CartShowTemplate> {
        Ok(CartShowTemplate {
            items_html: self.container_html()?,
            subtotal: self.subtotal.clone(),
            total: self.total.clone(),
            heading: HEADING,
            confirm_message: REMOVE_CONFIRMATION,
        })
    }

    /// Out-of-band HTML for the line subtotal of `id`, and for its quantity
    /// input when `with_input` is set.
    ///
    /// Empty when no block has that id. Leaving the input out keeps the
    /// browser's focus on it.
    ///
    /// # Errors
    ///
    /// Returns an error if the template fails to render.
    pub fn item_patch_html(&self, id: ItemId, with_input: bool) -> askama::Result<String> {
        self.block(id).map_or_else(
            || Ok(String::new()),
            |block| {
                ItemPatchTemplate {
                    block,
                    with_input,
                    oob: true,
                }
                .render()
            },
        )
    }

    /// Out-of-band HTML that deletes the block for `id`.
    ///
    /// # Errors
    ///
    /// Returns an error if the template fails to render.
    pub fn item_removed_html(id: ItemId) -> askama::Result<String> {
        ItemRemovedTemplate { id }.render()
    }

    /// Out-of-band HTML for the subtotal and total texts.
    ///
    /// # Errors
    ///
    /// Returns an error if the template fails to render.
    pub fn totals_html(&self) -> askama::Result<String> {
        TotalsTemplate {
            subtotal: &self.subtotal,
            total: &self.total,
        }
        .render()
    }
}

impl Renderer for Page {
    fn render_loading(&mut self) {
        self.container = Container::Loading;
    }

    fn render_error(&mut self) {
        self.container = Container::Error;
    }

    fn render_all(&mut self, items: &[CartItem]) {
        self.container = Container::Items(items.iter().map(ItemBlock::from).collect());
    }

    fn patch_item_subtotal(&mut self, id: ItemId, quantity: Quantity, price_each: Money) {
        if let Some(block) = self.block_mut(id) {
            block.subtotal = price_each.times(quantity).to_string();
        }
    }

    fn render_totals(&mut self, subtotal: Money, total: Money) {
        self.subtotal = subtotal.to_string();
        self.total = total.to_string();
    }

    fn quantity_input(&self, id: ItemId) -> Option<String> {
        self.block(id).map(|block| block.quantity.clone())
    }

    fn set_quantity_input(&mut self, id: ItemId, value: &str) {
        if let Some(block) = self.block_mut(id) {
            block.quantity = value.to_string();
        }
    }

    fn remove_item_block(&mut self, id: ItemId) -> bool {
        match &mut self.container {
            Container::Items(blocks) => {
                let before = blocks.len();
                blocks.retain(|block| block.id != id);
                blocks.len() != before
            }
            _ => false,
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn shoe() -> CartItem {
        CartItem {
            id: ItemId::new(1),
            title: "Shoe".to_string(),
            image: "https://cdn.example/shoe.png".to_string(),
            presentment_price: Money::from_minor(150_000),
            quantity: Quantity::new(2).unwrap(),
        }
    }

    fn sock() -> CartItem {
        CartItem {
            id: ItemId::new(2),
            title: "Sock <wool>".to_string(),
            image: "https://cdn.example/sock.png".to_string(),
            presentment_price: Money::from_minor(9_900),
            quantity: Quantity::MIN,
        }
    }

    #[test]
    fn test_render_all_formats_block() {
        let mut page = Page::default();
        page.render_all(&[shoe()]);

        let block = page.block(ItemId::new(1)).unwrap();
        assert_eq!(block.unit_price, "₹1,500.00");
        assert_eq!(block.subtotal, "₹3,000.00");
        assert_eq!(block.quantity, "2");
    }

    #[test]
    fn test_render_all_keeps_order() {
        let mut page = Page::default();
        page.render_all(&[sock(), shoe()]);

        let ids: Vec<i64> = page.blocks().iter().map(|b| b.id.as_i64()).collect();
        assert_eq!(ids, vec![2, 1]);
    }

    #[test]
    fn test_container_html_items() {
        let mut page = Page::default();
        page.render_all(&[shoe(), sock()]);

        let html = page.container_html().unwrap();
        assert!(html.contains("<h2>Shopping Cart</h2>"));
        assert!(html.contains(r#"data-id="1""#));
        assert!(html.contains("Subtotal: ₹3,000.00"));
        assert!(html.contains("quantity-btn minus"));
        assert!(html.contains("fa-trash"));
        // Titles are escaped.
        assert!(html.contains("Sock &#60;wool&#62;") || html.contains("Sock &lt;wool&gt;"));
        assert!(!html.contains("hx-swap-oob"));
    }

    #[test]
    fn test_loading_and_error_views() {
        let mut page = Page::loading();
        assert_eq!(page.container(), &Container::Loading);
        assert!(page.container_html().unwrap().contains(LOADING_MESSAGE));

        page.render_all(&[shoe()]);
        page.render_error();
        let html = page.container_html().unwrap();
        assert!(html.contains(ERROR_MESSAGE));
        assert!(!html.contains("cart-item"));
        assert!(page.blocks().is_empty());
    }

    #[test]
    fn test_patch_item_subtotal_touches_one_block() {
        let mut page = Page::default();
        page.render_all(&[shoe(), sock()]);
        let sock_before = page.block(ItemId::new(2)).cloned();

        page.patch_item_subtotal(ItemId::new(1), Quantity::new(3).unwrap(), Money::from_minor(150_000));

        assert_eq!(page.block(ItemId::new(1)).unwrap().subtotal, "₹4,500.00");
        assert_eq!(page.block(ItemId::new(2)).cloned(), sock_before);
    }

    #[test]
    fn test_render_totals() {
        let mut page = Page::default();
        assert_eq!(page.total_text(), "₹0.00");

        page.render_totals(Money::from_minor(300_000), Money::from_minor(300_000));
        assert_eq!(page.subtotal_text(), "₹3,000.00");
        assert_eq!(page.total_text(), "₹3,000.00");

        let html = page.totals_html().unwrap();
        assert!(html.contains(r#"id="cart-total" hx-swap-oob="true">₹3,000.00"#));
    }

    #[test]
    fn test_quantity_input_round_trip() {
        let mut page = Page::default();
        page.render_all(&[shoe()]);

        page.set_quantity_input(ItemId::new(1), "5");
        assert_eq!(page.quantity_input(ItemId::new(1)).as_deref(), Some("5"));
        assert_eq!(page.quantity_input(ItemId::new(9)), None);
    }

    #[test]
    fn test_item_patch_html_is_out_of_band() {
        let mut page = Page::default();
        page.render_all(&[shoe()]);

        let html = page.item_patch_html(ItemId::new(1), true).unwrap();
        assert!(html.contains(r#"id="qty-1""#));
        assert!(html.contains(r#"id="subtotal-1" hx-swap-oob="true""#));
        assert!(page.item_patch_html(ItemId::new(9), true).unwrap().is_empty());
    }

    #[test]
    fn test_item_patch_html_without_input() {
        let mut page = Page::default();
        page.render_all(&[shoe()]);

        let html = page.item_patch_html(ItemId::new(1), false).unwrap();
        assert!(!html.contains("quantity-input"));
        assert!(html.contains(r#"id="subtotal-1" hx-swap-oob="true""#));
    }

    #[test]
    fn test_remove_item_block() {
        let mut page = Page::default();
        page.render_all(&[shoe(), sock()]);

        assert!(page.remove_item_block(ItemId::new(1)));
        assert!(!page.remove_item_block(ItemId::new(1)));
        assert_eq!(page.blocks().len(), 1);

        let html = Page::item_removed_html(ItemId::new(1)).unwrap();
        assert!(html.contains(r#"id="cart-item-1" hx-swap-oob="delete""#));
    }

    #[test]
    fn test_document_embeds_container_and_totals() {
        let mut page = Page::default();
        page.render_all(&[shoe()]);
        page.render_totals(Money::from_minor(300_000), Money::from_minor(300_000));

        let html = page.document().unwrap().render().unwrap();
        assert!(html.contains(r#"class="cart-items""#));
        assert!(html.contains("Subtotal: ₹3,000.00"));
        assert!(html.contains(r#"id="cart-total">₹3,000.00"#));
        assert!(html.contains("checkout-btn"));
    }
}
