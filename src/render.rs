//! Text rendering of the page and the catalog screens.

use std::fmt::Write;

use rusty_money::{iso::Currency, Money};
use tabled::{
    builder::Builder,
    settings::{object::Columns, Alignment, Style},
};

use crate::model::{CartLine, Product, PurchaseReceipt};
use crate::page::{PageState, Phase};

/// Formats an amount in minor units of `currency`, e.g. `¥1,500`.
pub fn format_amount(amount: u64, currency: &Currency) -> String {
    let minor = i64::try_from(amount).unwrap_or(i64::MAX);
    Money::from_minor(minor, currency).to_string()
}

/// Renders the whole checkout page.
pub fn render_page(state: &PageState, currency: &Currency) -> String {
    let mut out = String::new();

    match state.phase() {
        Phase::Loading => out.push_str("[ Loading... ]\n"),
        Phase::Submitting => out.push_str("[ Submitting... ]\n"),
        Phase::Idle | Phase::Confirming => {}
    }
    if let Some(error) = &state.error {
        _ = writeln!(out, "! {error}");
    }

    _ = writeln!(out, "Code: {}", state.entered_code);

    if let Some(product) = &state.loaded_product {
        out.push_str(&render_product(product, currency));
    }

    if state.cart.is_empty() {
        out.push_str("Cart is empty\n");
    } else {
        _ = writeln!(out, "{}", cart_table(state.cart.lines(), currency));
    }
    _ = writeln!(
        out,
        "Items: {}  Total: {}",
        state.cart.item_count(),
        format_amount(state.cart.total(), currency)
    );

    if let Some(receipt) = &state.last_receipt {
        out.push('\n');
        out.push_str(&render_receipt(receipt, currency));
        out.push_str("Type `ok` to start the next sale\n");
    }

    out
}

/// Panel for a product that was looked up but not yet added.
pub fn render_product(product: &Product, currency: &Currency) -> String {
    let mut out = String::new();
    _ = writeln!(
        out,
        "> {} ({})  {}",
        product.name,
        product.code,
        format_amount(product.price_with_tax, currency)
    );
    if let Some(category) = &product.category {
        _ = writeln!(out, "  Category: {category}");
    }
    if let Some(description) = &product.description {
        _ = writeln!(out, "  {description}");
    }
    _ = writeln!(out, "  In stock: {}", product.stock_quantity);
    out
}

/// Table for the `list` and `search` screens.
pub fn render_products(products: &[Product], currency: &Currency) -> String {
    if products.is_empty() {
        return "No products\n".to_string();
    }

    let mut builder = Builder::default();
    builder.push_record(["Code", "Name", "Category", "Price", "Stock"]);
    for product in products {
        builder.push_record([
            product.code.clone(),
            product.name.clone(),
            product.category.clone().unwrap_or_default(),
            format_amount(product.price_with_tax, currency),
            product.stock_quantity.to_string(),
        ]);
    }

    let mut table = builder.build();
    table.with(Style::modern_rounded());
    table.modify(Columns::new(3..5), Alignment::right());
    format!("{table}\n")
}

/// Receipt as confirmed by the server.
pub fn render_receipt(receipt: &PurchaseReceipt, currency: &Currency) -> String {
    let mut out = String::new();
    _ = writeln!(out, "Purchase #{}  {}", receipt.purchase_id, receipt.purchase_datetime);
    _ = writeln!(out, "Cashier: {}", receipt.cashier_code);
    if !receipt.items.is_empty() {
        _ = writeln!(out, "{}", cart_table(&receipt.items, currency));
    }
    _ = writeln!(out, "Total: {}", format_amount(receipt.total_amount, currency));
    out
}

fn cart_table(lines: &[CartLine], currency: &Currency) -> String {
    let mut builder = Builder::default();
    builder.push_record(["#", "Item", "Unit", "Qty", "Subtotal"]);
    for (index, line) in lines.iter().enumerate() {
        builder.push_record([
            (index + 1).to_string(),
            line.product_name.clone(),
            format_amount(line.unit_price, currency),
            line.quantity.to_string(),
            format_amount(line.subtotal(), currency),
        ]);
    }

    let mut table = builder.build();
    table.with(Style::modern_rounded());
    table.modify(Columns::new(2..5), Alignment::right());
    table.to_string()
}

#[cfg(test)]
mod tests {
    use rusty_money::iso;

    use super::*;
    use crate::cart::Cart;
    use crate::page::PendingCall;

    fn tea() -> Product {
        Product::new("4901681517305", "Tea", 150)
            .with_category("Drinks")
            .with_stock(12)
    }

    #[test]
    fn test_format_amount_uses_currency_exponent() {
        assert!(format_amount(1500, iso::JPY).contains("1,500"));
        assert!(format_amount(1500, iso::USD).contains("15.00"));
    }

    #[test]
    fn test_render_page_shows_cart_and_total() {
        let mut cart = Cart::default();
        cart.add_or_merge(&tea());
        cart.add_or_merge(&tea());
        let state = PageState {
            cart,
            ..PageState::default()
        };

        let page = render_page(&state, iso::JPY);

        assert!(page.contains("Tea"));
        assert!(page.contains("Items: 2"));
        assert!(page.contains("300"));
        assert!(!page.contains("Cart is empty"));
    }

    #[test]
    fn test_render_page_shows_status_and_error() {
        let state = PageState {
            pending: Some(PendingCall::ProductLookup),
            error: Some("Product not found".to_string()),
            ..PageState::default()
        };

        let page = render_page(&state, iso::JPY);

        assert!(page.contains("Loading..."));
        assert!(page.contains("! Product not found"));
        assert!(page.contains("Cart is empty"));
    }

    #[test]
    fn test_render_page_shows_loaded_product_panel() {
        let state = PageState {
            loaded_product: Some(tea()),
            ..PageState::default()
        };

        let page = render_page(&state, iso::JPY);

        assert!(page.contains("> Tea (4901681517305)"));
        assert!(page.contains("Category: Drinks"));
        assert!(page.contains("In stock: 12"));
    }

    #[test]
    fn test_render_receipt_uses_server_total() {
        let receipt = PurchaseReceipt {
            purchase_id: 42,
            total_amount: 999,
            purchase_datetime: "2024-05-01T10:00:00".to_string(),
            cashier_code: "9999999999".to_string(),
            items: vec![CartLine::from_product(&tea())],
        };

        let text = render_receipt(&receipt, iso::JPY);

        assert!(text.contains("Purchase #42"));
        assert!(text.contains("Total:"));
        assert!(text.contains("999"));
    }

    #[test]
    fn test_render_products_empty() {
        assert_eq!(render_products(&[], iso::JPY), "No products\n");
        assert!(render_products(&[tea()], iso::JPY).contains("Drinks"));
    }
}
