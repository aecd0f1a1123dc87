//! Cart aggregate and its state transitions.

use crate::cart::item::{CartItem, LineKey};
use serde::{Deserialize, Serialize};

/// A shopping cart.
///
/// Lines are kept in insertion order, which is also display order. Every
/// transition is total: inputs that match no line, or carry a zero
/// quantity, leave the cart unchanged instead of failing.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct Cart {
    /// Items in the cart.
    pub items: Vec<CartItem>,
}

impl Cart {
    /// Create an empty cart.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a cart from untrusted lines (e.g. decoded from storage).
    ///
    /// Zero-quantity lines are dropped, lines sharing an identity are
    /// merged into the first occurrence, and prices are clamped.
    pub fn normalized(items: impl IntoIterator<Item = CartItem>) -> Self {
        let mut cart = Self::new();
        for item in items {
            cart.add_item(item);
        }
        cart
    }

    /// Add an item to the cart.
    ///
    /// An item matching an existing line (same id and options) increases
    /// that line's quantity by `item.quantity` (saturating at `u32::MAX`);
    /// otherwise the item is appended. Returns `true` if the cart changed.
    pub fn add_item(&mut self, item: CartItem) -> bool {
        if item.quantity == 0 {
            return false;
        }

        if let Some(existing) = self.find_mut(item.key()) {
            let new_quantity = existing.quantity.saturating_add(item.quantity);
            let changed = new_quantity != existing.quantity;
            existing.quantity = new_quantity;
            return changed;
        }

        self.items.push(item.sanitized());
        true
    }

    /// Increase the quantity of an existing line by one.
    ///
    /// Does nothing if the line is absent or already at `u32::MAX`.
    pub fn increase_quantity(&mut self, item: &CartItem) -> bool {
        let Some(existing) = self.find_mut(item.key()) else {
            return false;
        };
        match existing.quantity.checked_add(1) {
            Some(quantity) => {
                existing.quantity = quantity;
                true
            }
            None => false,
        }
    }

    /// Decrease the quantity of an existing line by one.
    ///
    /// A line reaching zero is removed.
    pub fn decrease_quantity(&mut self, item: &CartItem) -> bool {
        let Some(index) = self.position(item.key()) else {
            return false;
        };

        let remaining = self.items[index].quantity.saturating_sub(1);
        if remaining == 0 {
            self.items.remove(index);
        } else {
            self.items[index].quantity = remaining;
        }
        true
    }

    /// Remove a line regardless of its quantity.
    pub fn remove_item(&mut self, item: &CartItem) -> bool {
        let len_before = self.items.len();
        let key = item.key();
        self.items.retain(|i| i.key() != key);
        self.items.len() < len_before
    }

    /// Clear all items from the cart.
    pub fn clear(&mut self) -> bool {
        let changed = !self.items.is_empty();
        self.items.clear();
        changed
    }

    /// Get total item count (sum of quantities).
    pub fn item_count(&self) -> u64 {
        self.items.iter().map(|i| u64::from(i.quantity)).sum()
    }

    /// Get number of distinct lines.
    pub fn unique_item_count(&self) -> usize {
        self.items.len()
    }

    /// Check if cart is empty.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Get a line by identity.
    pub fn get_item(&self, key: LineKey<'_>) -> Option<&CartItem> {
        self.items.iter().find(|i| i.key() == key)
    }

    /// Sum of `price * quantity` over all lines.
    pub fn subtotal(&self) -> f64 {
        self.items.iter().map(CartItem::line_total).sum()
    }

    fn position(&self, key: LineKey<'_>) -> Option<usize> {
        self.items.iter().position(|i| i.key() == key)
    }

    fn find_mut(&mut self, key: LineKey<'_>) -> Option<&mut CartItem> {
        self.items.iter_mut().find(|i| i.key() == key)
    }
}
