//! Cart line items and line identity.

use crate::ids::ProductId;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Option selections for a line (e.g. `color -> Red`, `size -> M`).
pub type ItemOptions = BTreeMap<String, String>;

/// A purchasable line entry.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CartItem {
    /// Product being purchased.
    pub id: ProductId,
    /// Display name (denormalized for display).
    pub title: String,
    /// Opaque reference to the product image, passed through untouched.
    #[serde(default)]
    pub image: serde_json::Value,
    /// Unit price, snapshotted when the item was added.
    pub price: f64,
    /// Quantity.
    pub quantity: u32,
    /// Selected options. An empty map means "no options".
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub options: ItemOptions,
}

impl CartItem {
    /// Create an item with quantity 1 and no options.
    pub fn new(id: impl Into<ProductId>, title: impl Into<String>, price: f64) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            image: serde_json::Value::Null,
            price,
            quantity: 1,
            options: ItemOptions::new(),
        }
    }

    /// Set the quantity.
    pub fn with_quantity(mut self, quantity: u32) -> Self {
        self.quantity = quantity;
        self
    }

    /// Set the image reference.
    pub fn with_image(mut self, image: impl Into<serde_json::Value>) -> Self {
        self.image = image.into();
        self
    }

    /// Add an option selection, replacing any previous value for `name`.
    pub fn with_option(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.options.insert(name.into(), value.into());
        self
    }

    /// Line identity of this item.
    pub fn key(&self) -> LineKey<'_> {
        LineKey {
            id: &self.id,
            options: &self.options,
        }
    }

    /// Whether `other` refers to the same cart line.
    pub fn same_line(&self, other: &CartItem) -> bool {
        self.key() == other.key()
    }

    /// Line total (`price * quantity`).
    pub fn line_total(&self) -> f64 {
        self.price * f64::from(self.quantity)
    }

    /// Clamp the price into its valid range.
    ///
    /// Negative or non-finite prices become `0.0` so the item always
    /// serializes to a number.
    pub(crate) fn sanitized(mut self) -> Self {
        if !self.price.is_finite() || self.price < 0.0 {
            self.price = 0.0;
        }
        self
    }
}

/// Identity of a cart line: product id plus the exact option selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct LineKey<'a> {
    /// Product id.
    pub id: &'a ProductId,
    /// Option selection.
    pub options: &'a ItemOptions,
}
