//! # Cart Engine
//!
//! An ordered, in-memory collection of [`CartLine`]s with the four operations
//! the checkout flow needs: add-or-merge, quantity edit, removal and total.
//!
//! Everything here is synchronous and free of I/O. Each operation mutates the
//! cart in place behind `&mut self`, so a caller never observes a half-applied
//! change.
//!
//! ## Invariants
//!
//! - At most one line per product code. Only [`Cart::add_or_merge`] creates
//!   lines, and it merges into an existing line instead of duplicating it.
//! - Every line has `quantity >= 1`. [`Cart::set_quantity`] ignores anything
//!   below 1; [`Cart::remove`] is the only way a line goes away.
//! - Quantities are capped at `u32::MAX`; larger requests are clamped.
//! - Totals saturate at `u64::MAX` instead of overflowing.
//! - Line identity is positional. Removing a line shifts every later index
//!   down by one, so displays must re-number after each mutation.
//!
//! ## Pricing on merge
//!
//! Adding a product that is already in the cart bumps the quantity and keeps
//! the name and unit price captured on the first add, even if the newly loaded
//! product carries a different price. Whether that is the right pricing policy
//! is an open question; see DESIGN.md before changing it.

use tracing::debug;

use crate::model::{CartLine, Product};

/// The purchase cart for one checkout session.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Cart {
    lines: Vec<CartLine>,
}

impl Cart {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds one unit of `product`.
    ///
    /// If a line with the same product code exists its quantity goes up by one
    /// and nothing else about it changes. Otherwise a new line with quantity 1
    /// is appended, priced at `product.price_with_tax`.
    ///
    /// Returns the index of the line that was touched.
    pub fn add_or_merge(&mut self, product: &Product) -> usize {
        if let Some(index) = self.position(&product.code) {
            if let Some(line) = self.lines.get_mut(index) {
                line.quantity = line.quantity.saturating_add(1);
                debug!(code = %product.code, index, quantity = line.quantity, "Merged into existing line");
            }
            return index;
        }

        self.lines.push(CartLine::from_product(product));
        let index = self.lines.len() - 1;
        debug!(code = %product.code, index, "Appended line");
        index
    }

    /// Replaces the quantity of the line at `index`.
    ///
    /// Values below 1 are silently ignored, as are indices past the end of the
    /// cart. Values above `u32::MAX` are clamped to it. Returns `true` when the
    /// cart changed.
    pub fn set_quantity(&mut self, index: usize, new_quantity: i64) -> bool {
        if new_quantity < 1 {
            return false;
        }
        let quantity = u32::try_from(new_quantity).unwrap_or(u32::MAX);
        match self.lines.get_mut(index) {
            Some(line) if line.quantity != quantity => {
                line.quantity = quantity;
                true
            }
            _ => false,
        }
    }

    /// Moves the quantity of the line at `index` by `delta`, with the same
    /// floor of 1 as [`Cart::set_quantity`].
    pub fn adjust_quantity(&mut self, index: usize, delta: i64) -> bool {
        match self.lines.get(index) {
            Some(line) => self.set_quantity(index, i64::from(line.quantity).saturating_add(delta)),
            None => false,
        }
    }

    /// Removes and returns the line at `index`. Later lines shift down by one.
    pub fn remove(&mut self, index: usize) -> Option<CartLine> {
        if index < self.lines.len() {
            Some(self.lines.remove(index))
        } else {
            None
        }
    }

    /// Sum of `unit_price × quantity` over all lines. Integer arithmetic only.
    pub fn total(&self) -> u64 {
        total(&self.lines)
    }

    /// Total number of units across all lines.
    pub fn item_count(&self) -> u64 {
        self.lines.iter().map(|line| u64::from(line.quantity)).sum()
    }

    pub fn lines(&self) -> &[CartLine] {
        &self.lines
    }

    pub fn get(&self, index: usize) -> Option<&CartLine> {
        self.lines.get(index)
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    pub fn clear(&mut self) {
        self.lines.clear();
    }

    fn position(&self, product_code: &str) -> Option<usize> {
        self.lines
            .iter()
            .position(|line| line.product_code == product_code)
    }
}

/// Sum of `unit_price × quantity` for an arbitrary slice of lines, saturating
/// at `u64::MAX`.
pub fn total(lines: &[CartLine]) -> u64 {
    lines
        .iter()
        .map(CartLine::subtotal)
        .fold(0, u64::saturating_add)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tea() -> Product {
        Product::new("4901681517305", "Tea", 150)
    }

    fn cola() -> Product {
        Product::new("4902102072618", "Cola", 160)
    }

    fn line(unit_price: u64, quantity: u32) -> CartLine {
        CartLine {
            product_code: format!("code-{unit_price}"),
            product_name: "Item".to_string(),
            unit_price,
            quantity,
        }
    }

    #[test]
    fn test_add_new_product_appends_single_unit() {
        let mut cart = Cart::new();
        cart.add_or_merge(&tea());

        let index = cart.add_or_merge(&cola());

        assert_eq!(index, 1);
        assert_eq!(cart.len(), 2);
        let added = cart.get(1).unwrap();
        assert_eq!(added.product_code, "4902102072618");
        assert_eq!(added.quantity, 1);
        assert_eq!(added.unit_price, 160);
    }

    #[test]
    fn test_add_existing_product_merges_and_keeps_first_price() {
        let mut cart = Cart::new();
        cart.add_or_merge(&tea());
        cart.add_or_merge(&cola());

        let repriced = Product::new("4901681517305", "Tea (new label)", 180);
        let index = cart.add_or_merge(&repriced);

        assert_eq!(index, 0);
        assert_eq!(cart.len(), 2);
        let merged = cart.get(0).unwrap();
        assert_eq!(merged.quantity, 2);
        assert_eq!(merged.unit_price, 150);
        assert_eq!(merged.product_name, "Tea");
    }

    #[test]
    fn test_set_quantity_below_one_is_ignored() {
        let mut cart = Cart::new();
        cart.add_or_merge(&tea());
        cart.add_or_merge(&tea());
        let before = cart.clone();

        assert!(!cart.set_quantity(0, 0));
        assert!(!cart.set_quantity(0, -5));

        assert_eq!(cart, before);
    }

    #[test]
    fn test_set_quantity_replaces_value() {
        let mut cart = Cart::new();
        cart.add_or_merge(&tea());

        assert!(cart.set_quantity(0, 7));

        assert_eq!(cart.get(0).unwrap().quantity, 7);
        assert_eq!(cart.total(), 1050);
    }

    #[test]
    fn test_set_quantity_out_of_range_is_ignored() {
        let mut cart = Cart::new();
        cart.add_or_merge(&tea());
        let before = cart.clone();

        assert!(!cart.set_quantity(3, 2));

        assert_eq!(cart, before);
    }

    #[test]
    fn test_adjust_quantity_stops_at_one() {
        let mut cart = Cart::new();
        cart.add_or_merge(&tea());

        assert!(!cart.adjust_quantity(0, -1));
        assert_eq!(cart.get(0).unwrap().quantity, 1);

        assert!(cart.adjust_quantity(0, 1));
        assert!(cart.adjust_quantity(0, 1));
        assert!(cart.adjust_quantity(0, -1));
        assert_eq!(cart.get(0).unwrap().quantity, 2);
    }

    #[test]
    fn test_remove_shifts_later_lines_down() {
        let mut cart = Cart::new();
        cart.add_or_merge(&tea());
        cart.add_or_merge(&cola());
        cart.add_or_merge(&Product::new("4987176014", "Water", 100));

        let removed = cart.remove(1).unwrap();

        assert_eq!(removed.product_code, "4902102072618");
        assert_eq!(cart.len(), 2);
        assert_eq!(cart.get(1).unwrap().product_code, "4987176014");
    }

    #[test]
    fn test_remove_out_of_range_is_ignored() {
        let mut cart = Cart::new();
        cart.add_or_merge(&tea());

        assert!(cart.remove(1).is_none());
        assert_eq!(cart.len(), 1);
    }

    #[test]
    fn test_removed_product_can_be_added_again_as_new_line() {
        let mut cart = Cart::new();
        cart.add_or_merge(&tea());
        cart.add_or_merge(&tea());
        cart.remove(0);

        cart.add_or_merge(&tea());

        assert_eq!(cart.len(), 1);
        assert_eq!(cart.get(0).unwrap().quantity, 1);
    }

    #[test]
    fn test_total_of_empty_cart_is_zero() {
        assert_eq!(Cart::new().total(), 0);
        assert_eq!(total(&[]), 0);
    }

    #[test]
    fn test_total_sums_price_times_quantity() {
        assert_eq!(total(&[line(100, 3), line(250, 1)]), 550);
    }

    #[test]
    fn test_total_saturates_instead_of_overflowing() {
        let mut cart = Cart::new();
        cart.add_or_merge(&Product::new("A", "Big", 10_000_000_000));
        assert!(cart.set_quantity(0, 4_000_000_000));
        assert_eq!(cart.total(), u64::MAX);

        let half = u64::MAX / 2 + 1;
        assert_eq!(total(&[line(half, 1), line(half - 1, 1), line(7, 1)]), u64::MAX);
    }

    #[test]
    fn test_set_quantity_clamps_to_u32_max() {
        let mut cart = Cart::new();
        cart.add_or_merge(&tea());

        assert!(cart.set_quantity(0, 5_000_000_000));
        assert_eq!(cart.get(0).unwrap().quantity, u32::MAX);

        // Already at the cap, so nothing changes.
        assert!(!cart.adjust_quantity(0, 1));
        assert_eq!(cart.get(0).unwrap().quantity, u32::MAX);
    }

    #[test]
    fn test_item_count_sums_quantities() {
        let mut cart = Cart::new();
        cart.add_or_merge(&tea());
        cart.add_or_merge(&tea());
        cart.add_or_merge(&cola());

        assert_eq!(cart.item_count(), 3);
        assert_eq!(cart.total(), 460);
    }
}
